//! PDF text string decoding and encoding.

use encoding_rs::WINDOWS_1252;
use lopdf::{Object, StringFormat};

/// Decode a PDF text string.
///
/// Handles the UTF-16BE and UTF-8 byte-order marks; anything else is read
/// as Windows-1252, which agrees with PDFDocEncoding on printable text.
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        String::from_utf8_lossy(&bytes[3..]).into_owned()
    } else {
        let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
        text.into_owned()
    }
}

/// Encode a value for a `/V` entry.
///
/// Text that fits a single byte per character is written as a literal
/// string; anything else is written as UTF-16BE with a byte-order mark.
pub fn encode_pdf_string(text: &str) -> Object {
    if let Some(bytes) = single_byte(text) {
        return Object::String(bytes, StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Windows-1252 bytes for `text`, limited to the ranges where
/// PDFDocEncoding agrees: ASCII and `0xA1..=0xFF` except `0xAD`.
fn single_byte(text: &str) -> Option<Vec<u8>> {
    if text.is_ascii() {
        return Some(text.as_bytes().to_vec());
    }
    let (bytes, _, had_errors) = WINDOWS_1252.encode(text);
    if had_errors {
        return None;
    }
    bytes
        .iter()
        .all(|&b| b < 0x80 || (b >= 0xA1 && b != 0xAD))
        .then(|| bytes.into_owned())
}

/// Encode text for a `Tj` operand drawn with a WinAnsi font.
///
/// Characters outside Windows-1252 become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        if ch.is_ascii() {
            out.push(ch as u8);
            continue;
        }
        let (bytes, _, had_errors) = WINDOWS_1252.encode(ch.encode_utf8(&mut buf));
        if had_errors || bytes.len() != 1 {
            out.push(b'?');
        } else {
            out.extend_from_slice(&bytes);
        }
    }
    out
}

/// Escape bytes for use inside a literal string `( … )` in a content stream.
pub fn escape_literal(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + 8);
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(b);
            }
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\n' => out.extend_from_slice(b"\\n"),
            _ => out.push(b),
        }
    }
    out
}

/// Read a string or name object as text.
pub fn object_to_text(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}
