//! AcroForm widget types.
//!
//! Provides [`FieldType`] (the raw `/FT` entry), [`WidgetKind`] (the numeric
//! widget type legend reported by the inspector), [`FormWidget`] (a snapshot
//! of one widget instance on one page) and [`FieldRecord`] (the flattened
//! row written to `fields.json` / `fields.csv`).

use std::fmt;

use crate::BBox;

/// `/Ff` bit 16: button field is a radio button.
pub const FF_RADIO: u32 = 1 << 15;
/// `/Ff` bit 17: button field is a push button.
pub const FF_PUSHBUTTON: u32 = 1 << 16;
/// `/Ff` bit 18: choice field is a combo box.
pub const FF_COMBO: u32 = 1 << 17;

/// The type of a PDF form field.
///
/// Corresponds to the `/FT` entry in a field dictionary (PDF 1.7 Table 220).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldType {
    /// Text field (`/FT /Tx`).
    Text,
    /// Button field (`/FT /Btn`): checkboxes, radio buttons, push buttons.
    Button,
    /// Choice field (`/FT /Ch`): combo boxes and list boxes.
    Choice,
    /// Signature field (`/FT /Sig`).
    Signature,
}

impl FieldType {
    /// Parse a field type from its PDF name string.
    ///
    /// Returns `None` if the string is not a recognized field type.
    pub fn from_pdf_name(name: &str) -> Option<Self> {
        match name {
            "Tx" => Some(Self::Text),
            "Btn" => Some(Self::Button),
            "Ch" => Some(Self::Choice),
            "Sig" => Some(Self::Signature),
            _ => None,
        }
    }
}

/// Numeric widget type as reported in inspector output.
///
/// The codes are stable and shared by the JSON/CSV artifacts and the
/// legend file; `Unknown` (code 0) covers widgets without a usable `/FT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WidgetKind {
    Unknown,
    PushButton,
    CheckBox,
    RadioButton,
    ComboBox,
    ListBox,
    Signature,
    Text,
}

impl WidgetKind {
    /// Every known kind in code order (the legend, without `Unknown`).
    pub const LEGEND: [WidgetKind; 7] = [
        WidgetKind::PushButton,
        WidgetKind::CheckBox,
        WidgetKind::RadioButton,
        WidgetKind::ComboBox,
        WidgetKind::ListBox,
        WidgetKind::Signature,
        WidgetKind::Text,
    ];

    /// Classify a widget from its (possibly inherited) `/FT` and `/Ff`.
    pub fn classify(field_type: Option<FieldType>, flags: u32) -> Self {
        match field_type {
            Some(FieldType::Text) => Self::Text,
            Some(FieldType::Signature) => Self::Signature,
            Some(FieldType::Choice) if flags & FF_COMBO != 0 => Self::ComboBox,
            Some(FieldType::Choice) => Self::ListBox,
            Some(FieldType::Button) if flags & FF_PUSHBUTTON != 0 => Self::PushButton,
            Some(FieldType::Button) if flags & FF_RADIO != 0 => Self::RadioButton,
            Some(FieldType::Button) => Self::CheckBox,
            None => Self::Unknown,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::PushButton => 1,
            Self::CheckBox => 2,
            Self::RadioButton => 3,
            Self::ComboBox => 4,
            Self::ListBox => 5,
            Self::Signature => 6,
            Self::Text => 7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::PushButton => "PushButton",
            Self::CheckBox => "CheckBox",
            Self::RadioButton => "RadioButton",
            Self::ComboBox => "ComboBox",
            Self::ListBox => "ListBox",
            Self::Signature => "Signature",
            Self::Text => "Text",
        }
    }

    /// Whether the widget carries a list of options.
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::ComboBox | Self::ListBox)
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Render the type legend, one `code = label` line per known kind.
pub fn legend_lines() -> Vec<String> {
    WidgetKind::LEGEND
        .iter()
        .map(|kind| format!("{} = {}", kind.code(), kind.label()))
        .collect()
}

/// A single widget instance found while walking a page's `/Annots`.
///
/// Names are not unique: the same field may have widgets on several pages,
/// and each one is reported separately.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormWidget {
    /// 0-based index of the page holding the widget annotation.
    pub page_index: usize,
    /// Fully qualified field name (`/T` segments joined with `.`), trimmed.
    pub name: String,
    pub kind: WidgetKind,
    /// Position on the page, top-left origin.
    pub bbox: BBox,
    /// Current `/V` value, if any.
    pub value: Option<String>,
    /// Options for combo and list boxes; empty for every other kind.
    pub choices: Vec<String>,
    /// Field flags from `/Ff` (inherited).
    pub flags: u32,
}

/// Inspector output row: a flattened snapshot of one [`FormWidget`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldRecord {
    /// 1-based page number.
    pub page: usize,
    pub field_name: String,
    pub field_type: u8,
    pub field_type_name: String,
    /// `[left, top, right, bottom]`.
    pub rect: [f64; 4],
    /// Current value; empty when the widget has none.
    pub value: String,
    pub choices: Vec<String>,
}

impl From<&FormWidget> for FieldRecord {
    fn from(widget: &FormWidget) -> Self {
        Self {
            page: widget.page_index + 1,
            field_name: widget.name.clone(),
            field_type: widget.kind.code(),
            field_type_name: widget.kind.label().to_string(),
            rect: widget.bbox.to_array(),
            value: widget.value.clone().unwrap_or_default(),
            choices: if widget.kind.is_choice() {
                widget.choices.clone()
            } else {
                Vec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(kind: WidgetKind) -> FormWidget {
        FormWidget {
            page_index: 0,
            name: "F[0].P1[0].NamedInsured_FullName_A[0]".to_string(),
            kind,
            bbox: BBox::new(50.0, 100.0, 200.0, 120.0),
            value: None,
            choices: vec![],
            flags: 0,
        }
    }

    #[test]
    fn field_type_from_pdf_name() {
        assert_eq!(FieldType::from_pdf_name("Tx"), Some(FieldType::Text));
        assert_eq!(FieldType::from_pdf_name("Btn"), Some(FieldType::Button));
        assert_eq!(FieldType::from_pdf_name("Ch"), Some(FieldType::Choice));
        assert_eq!(FieldType::from_pdf_name("Sig"), Some(FieldType::Signature));
        assert_eq!(FieldType::from_pdf_name("Unknown"), None);
    }

    #[test]
    fn classify_buttons_by_flags() {
        assert_eq!(
            WidgetKind::classify(Some(FieldType::Button), 0),
            WidgetKind::CheckBox
        );
        assert_eq!(
            WidgetKind::classify(Some(FieldType::Button), FF_RADIO),
            WidgetKind::RadioButton
        );
        assert_eq!(
            WidgetKind::classify(Some(FieldType::Button), FF_PUSHBUTTON),
            WidgetKind::PushButton
        );
    }

    #[test]
    fn classify_choices_by_flags() {
        assert_eq!(
            WidgetKind::classify(Some(FieldType::Choice), FF_COMBO),
            WidgetKind::ComboBox
        );
        assert_eq!(
            WidgetKind::classify(Some(FieldType::Choice), 0),
            WidgetKind::ListBox
        );
    }

    #[test]
    fn classify_without_type_is_unknown() {
        assert_eq!(WidgetKind::classify(None, FF_COMBO), WidgetKind::Unknown);
    }

    #[test]
    fn legend_codes_are_one_through_seven() {
        let codes: Vec<u8> = WidgetKind::LEGEND.iter().map(WidgetKind::code).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(WidgetKind::Unknown.code(), 0);
    }

    #[test]
    fn legend_lines_are_sorted_by_code() {
        let lines = legend_lines();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "1 = PushButton");
        assert_eq!(lines[1], "2 = CheckBox");
        assert_eq!(lines[6], "7 = Text");
    }

    #[test]
    fn record_from_text_widget() {
        let mut w = widget(WidgetKind::Text);
        w.page_index = 2;
        w.value = Some("Acme Corp".to_string());
        let record = FieldRecord::from(&w);
        assert_eq!(record.page, 3);
        assert_eq!(record.field_type, 7);
        assert_eq!(record.field_type_name, "Text");
        assert_eq!(record.rect, [50.0, 100.0, 200.0, 120.0]);
        assert_eq!(record.value, "Acme Corp");
        assert!(record.choices.is_empty());
    }

    #[test]
    fn record_missing_value_is_empty_string() {
        let record = FieldRecord::from(&widget(WidgetKind::CheckBox));
        assert_eq!(record.value, "");
        assert_eq!(record.field_type_name, "CheckBox");
    }

    #[test]
    fn record_keeps_choices_only_for_choice_kinds() {
        let mut combo = widget(WidgetKind::ComboBox);
        combo.choices = vec!["AN".to_string(), "QT".to_string()];
        assert_eq!(FieldRecord::from(&combo).choices, vec!["AN", "QT"]);

        let mut text = widget(WidgetKind::Text);
        text.choices = vec!["stray".to_string()];
        assert!(FieldRecord::from(&text).choices.is_empty());
    }
}
