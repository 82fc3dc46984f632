//! Attachment extraction from MIME trees.

use std::path::Path;

use crate::cloud::mail::MimePart;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file carried by a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl Attachment {
    /// Extension of the filename including the dot, or an empty string.
    #[must_use]
    pub fn extension(&self) -> String {
        Path::new(&self.filename)
            .extension()
            .and_then(|extension| extension.to_str())
            .map(|extension| format!(".{extension}"))
            .unwrap_or_default()
    }
}

/// Collect attachments depth-first.
///
/// A part is an attachment when its disposition is `attachment`, or `inline`
/// with a filename. Parts are addressed by their 1-based position path.
#[must_use]
pub fn extract_attachments(root: &MimePart) -> Vec<Attachment> {
    let mut found = Vec::new();
    let mut path = Vec::new();

    walk(root, &mut path, &mut found);

    found
}

fn walk(part: &MimePart, path: &mut Vec<usize>, found: &mut Vec<Attachment>) {
    if let Some(attachment) = as_attachment(part, path) {
        found.push(attachment);
    }

    for (index, child) in part.parts.iter().enumerate() {
        path.push(index + 1);
        walk(child, path, found);
        path.pop();
    }
}

fn as_attachment(part: &MimePart, path: &[usize]) -> Option<Attachment> {
    let disposition = part.header("Content-Disposition")?;
    let kind = disposition
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let filename = parameter(disposition, "filename");

    let is_attachment = match kind.as_str() {
        "attachment" => true,
        "inline" => filename.is_some(),
        _ => false,
    };

    if !is_attachment {
        return None;
    }

    let content_type = part.header("Content-Type");

    let filename = filename
        .or_else(|| content_type.and_then(|value| parameter(value, "name")))
        .unwrap_or_else(|| fallback_name(path));

    let content_type = if part.mime_type.is_empty() {
        content_type
            .and_then(|value| value.split(';').next())
            .map_or(DEFAULT_CONTENT_TYPE, str::trim)
            .to_string()
    } else {
        part.mime_type.clone()
    };

    Some(Attachment {
        filename,
        content_type,
        data: part.body.clone(),
    })
}

fn fallback_name(path: &[usize]) -> String {
    if path.is_empty() {
        return "attachment-1".to_string();
    }

    let joined = path
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("-");

    format!("attachment-{joined}")
}

/// Value of a header parameter, honouring quotes and RFC 2231 `name*`.
fn parameter(header: &str, name: &str) -> Option<String> {
    let extended = format!("{name}*");

    split_parameters(header)
        .into_iter()
        .skip(1)
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let key = key.trim();

            if key.eq_ignore_ascii_case(name) {
                Some(unquote(value.trim()))
            } else if key.eq_ignore_ascii_case(&extended) {
                decode_extended(value.trim())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty())
}

fn split_parameters(header: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut quoted = false;
    let mut start = 0;

    for (index, character) in header.char_indices() {
        match character {
            '"' => quoted = !quoted,
            ';' if !quoted => {
                pieces.push(header.get(start..index).unwrap_or_default());
                start = index + 1;
            }
            _ => {}
        }
    }

    pieces.push(header.get(start..).unwrap_or_default());

    pieces
}

fn unquote(value: &str) -> String {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .map_or_else(|| value.to_string(), |inner| inner.replace("\\\"", "\""))
}

/// `charset'language'percent-encoded`
fn decode_extended(value: &str) -> Option<String> {
    let encoded = value.splitn(3, '\'').nth(2)?;
    let mut bytes = Vec::with_capacity(encoded.len());
    let mut input = encoded.bytes();

    while let Some(byte) = input.next() {
        if byte == b'%' {
            let high = input.next().and_then(hex_value)?;
            let low = input.next().and_then(hex_value)?;

            bytes.push((high << 4) | low);
        } else {
            bytes.push(byte);
        }
    }

    String::from_utf8(bytes).ok()
}

fn hex_value(byte: u8) -> Option<u8> {
    char::from(byte)
        .to_digit(16)
        .and_then(|digit| u8::try_from(digit).ok())
}
