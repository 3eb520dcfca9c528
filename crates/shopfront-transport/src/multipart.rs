//! multipart/form-data encoding.
//!
//! Payloads for binary-capable resources are assembled by hand: scalar
//! values become text parts, attachments become file parts, and a field
//! holding several attachments repeats its name once per file. Empty and
//! null values are omitted entirely.

use shopfront_types::form::{FieldValue, FileAttachment, FormValues};
use uuid::Uuid;

/// An encoded multipart body plus the Content-Type header that carries its
/// boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartBody {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Encode form values as multipart/form-data with a random boundary.
pub fn encode_form(values: &FormValues) -> MultipartBody {
    let boundary = format!("shopfront-{}", Uuid::new_v4().simple());
    let mut bytes = Vec::new();

    for (name, value) in values.iter() {
        if value.is_empty() {
            continue;
        }
        match value {
            FieldValue::File(file) => push_file_part(&mut bytes, &boundary, name, file),
            FieldValue::Files(files) => {
                for file in files {
                    push_file_part(&mut bytes, &boundary, name, file);
                }
            }
            other => {
                if let Some(text) = other.to_text() {
                    push_text_part(&mut bytes, &boundary, name, &text);
                }
            }
        }
    }

    bytes.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    MultipartBody {
        content_type: format!("multipart/form-data; boundary={boundary}"),
        bytes,
    }
}

fn push_text_part(bytes: &mut Vec<u8>, boundary: &str, name: &str, value: &str) {
    bytes.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{value}\r\n",
            escape_quotes(name)
        )
        .as_bytes(),
    );
}

fn push_file_part(bytes: &mut Vec<u8>, boundary: &str, name: &str, file: &FileAttachment) {
    bytes.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            escape_quotes(name),
            escape_quotes(&file.filename),
            file.content_type
        )
        .as_bytes(),
    );
    bytes.extend_from_slice(&file.bytes);
    bytes.extend_from_slice(b"\r\n");
}

fn escape_quotes(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_text(body: &MultipartBody) -> String {
        String::from_utf8_lossy(&body.bytes).to_string()
    }

    #[test]
    fn test_boundary_in_header_and_body() {
        let values = FormValues::new().with("name", "Widget");
        let body = encode_form(&values);
        let boundary = body
            .content_type
            .split("boundary=")
            .nth(1)
            .unwrap()
            .to_string();
        let text = body_text(&body);
        assert!(text.contains(&format!("--{boundary}\r\n")));
        assert!(text.ends_with(&format!("--{boundary}--\r\n")));
    }

    #[test]
    fn test_scalars_become_text_parts() {
        let mut values = FormValues::new()
            .with("name", "Widget")
            .with("price", "19.99")
            .with("active", true);
        values.coerce_numeric_strings();
        let text = body_text(&encode_form(&values));
        assert!(text.contains("name=\"name\"\r\n\r\nWidget\r\n"));
        assert!(text.contains("name=\"price\"\r\n\r\n19.99\r\n"));
        assert!(text.contains("name=\"active\"\r\n\r\ntrue\r\n"));
    }

    #[test]
    fn test_empty_values_are_omitted() {
        let values = FormValues::new()
            .with("name", "Widget")
            .with("comment", "")
            .with("note", FieldValue::Null);
        let text = body_text(&encode_form(&values));
        assert!(!text.contains("comment"));
        assert!(!text.contains("note"));
    }

    #[test]
    fn test_file_array_repeats_key() {
        let values = FormValues::new().with(
            "photos",
            FieldValue::Files(vec![
                FileAttachment::new("a.png", "image/png", vec![1, 2]),
                FileAttachment::new("b.png", "image/png", vec![3, 4]),
            ]),
        );
        let text = body_text(&encode_form(&values));
        assert_eq!(text.matches("name=\"photos\"").count(), 2);
        assert!(text.contains("filename=\"a.png\""));
        assert!(text.contains("filename=\"b.png\""));
    }

    #[test]
    fn test_file_part_carries_content_type() {
        let values = FormValues::new().with(
            "image",
            FileAttachment::new("w.png", "image/png", b"PNGDATA".to_vec()),
        );
        let text = body_text(&encode_form(&values));
        assert!(text.contains("Content-Type: image/png\r\n\r\nPNGDATA\r\n"));
    }

    #[test]
    fn test_each_nonempty_key_appears_once() {
        let values = FormValues::new()
            .with("name", "Widget")
            .with("category", "tools")
            .with("image", FileAttachment::new("w.png", "image/png", vec![1]));
        let text = body_text(&encode_form(&values));
        for key in ["name", "category", "image"] {
            assert_eq!(text.matches(&format!("name=\"{key}\"")).count(), 1, "{key}");
        }
    }
}
