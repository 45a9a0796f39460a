//! Value application: locating widgets by name and writing text or
//! checkbox values into them.

use std::borrow::Borrow;
use std::collections::HashSet;

use acroform_core::{
    ApplyReport, FieldUpdate, FieldValue, InputValue, SkipReason, WidgetKind, WidgetOutcome,
};
use lopdf::{Dictionary, Object, ObjectId, Stream, dictionary};

use crate::appearance::{
    APPEARANCE_FONT, DefaultAppearance, checkbox_off_appearance, checkbox_on_appearance,
    text_appearance,
};
use crate::error::BackendError;
use crate::lopdf_backend::{FormDocument, LopdfWidget, lookup_inherited, read_rect, resolve_dict};
use crate::pdf_string::{encode_pdf_string, object_to_text};

/// `/Ff` bit for multi-line text fields.
const FF_MULTILINE: u32 = 1 << 12;

/// State name used when a checkbox has no `/AP /N` entries to learn from.
const DEFAULT_ON_STATE: &str = "Yes";
pub(crate) const OFF_STATE: &str = "Off";

/// Everything needed to write one widget, gathered before any mutation.
#[derive(Debug)]
pub(crate) struct WidgetTarget {
    pub(crate) name: String,
    pub(crate) annot_id: ObjectId,
    field_id: ObjectId,
    pub(crate) kind: WidgetKind,
    orphaned: bool,
    size: Option<(f64, f64)>,
    da: DefaultAppearance,
    multiline: bool,
    pub(crate) on_state: String,
    /// Names present in an `/AP /N` state dictionary; empty when `/N` is a
    /// single stream or missing.
    pub(crate) normal_states: Vec<String>,
}

impl FormDocument {
    /// Write `value` into every widget, on every page, whose trimmed name
    /// equals the trimmed `name`.
    ///
    /// `force_checkbox` overrides type inference: `Some(true)` writes
    /// checkbox semantics, `Some(false)` text semantics, `None` uses
    /// checkbox semantics only for widgets declared as checkboxes.
    ///
    /// Widgets are enumerated fresh on each call. Per-widget failures are
    /// recorded in the returned [`FieldUpdate`] and never abort the loop.
    pub fn apply_field(
        &mut self,
        name: &str,
        value: &InputValue,
        force_checkbox: Option<bool>,
    ) -> FieldUpdate {
        let mut update = FieldUpdate::default();
        let target_name = name.trim();
        if target_name.is_empty() {
            return update;
        }

        let targets = match self.collect_targets(target_name) {
            Ok(targets) => targets,
            Err(e) => {
                tracing::warn!(field = target_name, error = %e, "widget enumeration failed");
                return update;
            }
        };

        for target in targets {
            let as_checkbox = force_checkbox.unwrap_or(target.kind == WidgetKind::CheckBox);
            let resolved = FieldValue::resolve(value, as_checkbox);
            let outcome = self.write_widget(&target, &resolved);
            if let WidgetOutcome::Skipped(reason) = &outcome {
                tracing::warn!(field = %target.name, %reason, "widget skipped");
            }
            update.record(outcome);
        }
        update
    }

    /// Apply a name → value mapping in iteration order.
    ///
    /// Names in `checkbox_names` are forced to checkbox semantics; all other
    /// names use the widget's declared type.
    pub fn apply_many<K, V>(
        &mut self,
        mapping: impl IntoIterator<Item = (K, V)>,
        checkbox_names: &HashSet<String>,
    ) -> ApplyReport
    where
        K: AsRef<str>,
        V: Borrow<InputValue>,
    {
        let mut report = ApplyReport::default();
        for (name, value) in mapping {
            let name = name.as_ref();
            let force = checkbox_names.contains(name).then_some(true);
            let update = self.apply_field(name, value.borrow(), force);
            if !update.found() {
                tracing::debug!(field = name, "field not present in document");
            }
            report.absorb(name, &update);
        }
        report
    }

    fn collect_targets(&self, target_name: &str) -> Result<Vec<WidgetTarget>, BackendError> {
        let mut targets = Vec::new();
        for page_index in 0..self.page_count() {
            for widget in self.widgets_on_page(page_index)? {
                if widget.widget.name != target_name {
                    continue;
                }
                targets.push(self.target_for(widget));
            }
        }
        Ok(targets)
    }

    pub(crate) fn target_for(&self, widget: LopdfWidget) -> WidgetTarget {
        let doc = &self.inner;
        let annot = doc.get_object(widget.annot_id).and_then(|o| o.as_dict()).ok();

        let size = annot
            .and_then(|a| a.get(b"Rect").ok())
            .and_then(|r| read_rect(doc, r))
            .map(|r| ((r[2] - r[0]).abs(), (r[3] - r[1]).abs()));
        let da = annot
            .and_then(|a| lookup_inherited(doc, a, b"DA"))
            .and_then(object_to_text)
            .map(|da| DefaultAppearance::parse(&da))
            .unwrap_or_default();
        let normal_states: Vec<String> = annot
            .and_then(|a| a.get(b"AP").ok())
            .and_then(|ap| resolve_dict(doc, ap))
            .and_then(|ap| ap.get(b"N").ok())
            .and_then(|n| resolve_dict(doc, n))
            .map(|n| {
                n.iter()
                    .map(|(k, _)| String::from_utf8_lossy(k).into_owned())
                    .collect()
            })
            .unwrap_or_default();
        let on_state = normal_states
            .iter()
            .find(|s| s.as_str() != OFF_STATE)
            .cloned()
            .unwrap_or_else(|| DEFAULT_ON_STATE.to_string());

        WidgetTarget {
            name: widget.widget.name,
            annot_id: widget.annot_id,
            field_id: widget.field_id,
            kind: widget.widget.kind,
            orphaned: widget.orphaned,
            size,
            da,
            multiline: widget.widget.flags & FF_MULTILINE != 0,
            on_state,
            normal_states,
        }
    }

    fn write_widget(&mut self, target: &WidgetTarget, value: &FieldValue) -> WidgetOutcome {
        if target.orphaned {
            return WidgetOutcome::Skipped(SkipReason::OrphanedReference);
        }
        let result = match value {
            FieldValue::Text(text) => self.write_text(target, text),
            FieldValue::Checkbox(on) => self.write_checkbox(target, *on),
        };
        match result {
            Ok(()) => WidgetOutcome::Updated,
            Err(e) => WidgetOutcome::Skipped(SkipReason::Malformed(e.to_string())),
        }
    }

    fn write_text(&mut self, target: &WidgetTarget, text: &str) -> Result<(), BackendError> {
        if target.size.is_none() {
            return Err(BackendError::Parse("widget has no /Rect".to_string()));
        }
        self.dict_mut(target.field_id)?
            .set("V", encode_pdf_string(text));
        self.write_text_appearance(target, text)
    }

    /// Replace the widget's `/AP` with a single normal stream drawing `text`.
    pub(crate) fn write_text_appearance(
        &mut self,
        target: &WidgetTarget,
        text: &str,
    ) -> Result<(), BackendError> {
        let (width, height) = target
            .size
            .ok_or_else(|| BackendError::Parse("widget has no /Rect".to_string()))?;

        let content = text_appearance(width, height, text, &target.da, target.multiline);
        let font_id = self.helv_font_id();
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Form",
                "BBox" => form_bbox(width, height),
                "Resources" => dictionary! {
                    "Font" => dictionary! { APPEARANCE_FONT => font_id },
                },
            },
            content,
        );
        let stream_id = self.inner.add_object(stream);
        self.dict_mut(target.annot_id)?
            .set("AP", dictionary! { "N" => stream_id });
        Ok(())
    }

    pub(crate) fn write_checkbox(&mut self, target: &WidgetTarget, on: bool) -> Result<(), BackendError> {
        let state = if on {
            target.on_state.as_str()
        } else {
            OFF_STATE
        };

        self.dict_mut(target.field_id)?
            .set("V", Object::Name(state.as_bytes().to_vec()));

        let missing_on = !target.normal_states.contains(&target.on_state);
        let missing_off = !target.normal_states.iter().any(|s| s == OFF_STATE);
        let mut generated = Dictionary::new();
        if missing_on || missing_off {
            let (width, height) = target.size.unwrap_or((10.0, 10.0));
            if missing_on {
                let id = self.add_form_xobject(width, height, checkbox_on_appearance(width, height));
                generated.set(target.on_state.as_bytes().to_vec(), id);
            }
            if missing_off {
                let id = self.add_form_xobject(width, height, checkbox_off_appearance());
                generated.set(OFF_STATE, id);
            }
        }

        self.dict_mut(target.annot_id)?
            .set("AS", Object::Name(state.as_bytes().to_vec()));
        if generated.is_empty() {
            return Ok(());
        }
        if target.normal_states.is_empty() {
            self.dict_mut(target.annot_id)?
                .set("AP", dictionary! { "N" => generated });
            Ok(())
        } else {
            self.merge_normal_states(target.annot_id, generated)
        }
    }

    /// Add generated state streams to an existing `/AP /N` dictionary,
    /// which may sit behind references.
    fn merge_normal_states(
        &mut self,
        annot_id: ObjectId,
        generated: Dictionary,
    ) -> Result<(), BackendError> {
        let doc = &self.inner;
        let annot = doc
            .get_object(annot_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| BackendError::Parse(format!("widget annotation: {e}")))?;
        let mut ap = annot
            .get(b"AP")
            .ok()
            .and_then(|ap| resolve_dict(doc, ap))
            .cloned()
            .unwrap_or_else(Dictionary::new);
        let mut normal = ap
            .get(b"N")
            .ok()
            .and_then(|n| resolve_dict(doc, n))
            .cloned()
            .unwrap_or_else(Dictionary::new);
        for (state, stream) in generated.iter() {
            normal.set(state.clone(), stream.clone());
        }
        ap.set("N", normal);
        self.dict_mut(annot_id)?.set("AP", ap);
        Ok(())
    }

    fn add_form_xobject(&mut self, width: f64, height: f64, content: Vec<u8>) -> ObjectId {
        self.inner.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Form",
                "BBox" => form_bbox(width, height),
            },
            content,
        ))
    }

    fn helv_font_id(&mut self) -> ObjectId {
        if let Some(id) = self.helv_font {
            return id;
        }
        let id = self.inner.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        self.helv_font = Some(id);
        id
    }

    pub(crate) fn dict_mut(&mut self, id: ObjectId) -> Result<&mut Dictionary, BackendError> {
        self.inner
            .get_object_mut(id)
            .and_then(|o| o.as_dict_mut())
            .map_err(|e| BackendError::Parse(format!("object {} {}: {e}", id.0, id.1)))
    }
}

fn form_bbox(width: f64, height: f64) -> Vec<Object> {
    vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(width as f32),
        Object::Real(height as f32),
    ]
}
