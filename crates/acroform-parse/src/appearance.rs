//! Normal-appearance stream generation for text and checkbox widgets.
//!
//! Appearances are regenerated whenever a text value is written so that
//! flattening draws the new value rather than whatever the template shipped
//! with. Checkbox appearances are only generated when the widget has none.

use crate::pdf_string::{encode_win_ansi, escape_literal};

/// Resource name the generated streams use for their font.
pub const APPEARANCE_FONT: &str = "Helv";

/// Inner padding between the widget border and its text.
const PADDING: f64 = 2.0;
/// Approximate Helvetica advance width as a fraction of the font size.
const AVG_CHAR_WIDTH: f64 = 0.5;

/// Text styling pulled out of a `/DA` (default appearance) string.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultAppearance {
    /// Font size; `0.0` means auto-size.
    pub font_size: f64,
    /// Fill color operator with operands, e.g. `0 g` or `0 0 1 rg`.
    pub color: String,
}

impl Default for DefaultAppearance {
    fn default() -> Self {
        Self {
            font_size: 0.0,
            color: "0 g".to_string(),
        }
    }
}

impl DefaultAppearance {
    /// Parse a `/DA` string such as `/Helv 0 Tf 0 g`.
    ///
    /// Unknown operators are ignored; missing pieces fall back to defaults.
    pub fn parse(da: &str) -> Self {
        let mut result = Self::default();
        let mut operands: Vec<&str> = Vec::new();
        for token in da.split_whitespace() {
            match token {
                "Tf" => {
                    if let Some(size) = operands.last().and_then(|s| s.parse::<f64>().ok()) {
                        result.font_size = size.max(0.0);
                    }
                    operands.clear();
                }
                "g" | "rg" | "k" => {
                    let arity = match token {
                        "g" => 1,
                        "rg" => 3,
                        _ => 4,
                    };
                    if operands.len() >= arity {
                        let start = operands.len() - arity;
                        result.color = format!("{} {token}", operands[start..].join(" "));
                    }
                    operands.clear();
                }
                _ if token.starts_with('/') || token.parse::<f64>().is_ok() => operands.push(token),
                _ => operands.clear(),
            }
        }
        result
    }

    fn resolved_size(&self, height: f64, multiline: bool) -> f64 {
        if self.font_size > 0.0 {
            self.font_size
        } else if multiline {
            (height * 0.3).clamp(4.0, 10.0)
        } else {
            ((height - 2.0 * PADDING) * 0.8).clamp(4.0, 12.0)
        }
    }
}

/// Content stream for a text widget of the given size showing `text`.
///
/// Multiline widgets wrap on word boundaries using an average glyph width.
pub fn text_appearance(
    width: f64,
    height: f64,
    text: &str,
    da: &DefaultAppearance,
    multiline: bool,
) -> Vec<u8> {
    let mut stream = Vec::new();
    stream.extend_from_slice(b"/Tx BMC\nq\n");
    stream.extend_from_slice(
        format!(
            "{} {} {} {} re W n\n",
            fmt_num(1.0),
            fmt_num(1.0),
            fmt_num((width - 2.0).max(0.0)),
            fmt_num((height - 2.0).max(0.0))
        )
        .as_bytes(),
    );

    if !text.is_empty() {
        let size = da.resolved_size(height, multiline);
        let lines = if multiline {
            wrap_lines(text, width - 2.0 * PADDING, size)
        } else {
            vec![text.replace(['\r', '\n'], " ")]
        };
        let leading = size * 1.15;
        let first_baseline = if multiline {
            height - PADDING - size
        } else {
            (height - size) / 2.0 + size * 0.22
        };

        stream.extend_from_slice(b"BT\n");
        stream.extend_from_slice(format!("{}\n", da.color).as_bytes());
        stream.extend_from_slice(
            format!("/{APPEARANCE_FONT} {} Tf\n", fmt_num(size)).as_bytes(),
        );
        stream.extend_from_slice(
            format!("{} {} Td\n", fmt_num(PADDING), fmt_num(first_baseline)).as_bytes(),
        );
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                stream.extend_from_slice(format!("0 {} Td\n", fmt_num(-leading)).as_bytes());
            }
            stream.push(b'(');
            stream.extend_from_slice(&escape_literal(&encode_win_ansi(line)));
            stream.extend_from_slice(b") Tj\n");
        }
        stream.extend_from_slice(b"ET\n");
    }

    stream.extend_from_slice(b"Q\nEMC\n");
    stream
}

/// Content stream for a checked checkbox: a check mark inside the box.
pub fn checkbox_on_appearance(width: f64, height: f64) -> Vec<u8> {
    let margin = width.min(height) * 0.2;
    format!(
        "q\n0 G\n{} w\n{} {} m {} {} l {} {} l S\nQ\n",
        fmt_num(width.min(height) * 0.1),
        fmt_num(margin),
        fmt_num(height * 0.5),
        fmt_num(width * 0.4),
        fmt_num(margin),
        fmt_num(width - margin),
        fmt_num(height - margin)
    )
    .into_bytes()
}

/// Content stream for an unchecked checkbox (draws nothing).
pub fn checkbox_off_appearance() -> Vec<u8> {
    b"q\nQ\n".to_vec()
}

fn wrap_lines(text: &str, max_width: f64, size: f64) -> Vec<String> {
    let max_chars = ((max_width / (size * AVG_CHAR_WIDTH)).floor() as usize).max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    lines
}

/// Format a number for a content stream without trailing zeros.
pub fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        let s = format!("{rounded:.3}");
        s.trim_end_matches('0').to_string()
    }
}
