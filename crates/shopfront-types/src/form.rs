//! Ordered form values and file attachments.
//!
//! A submission is a list of `(name, value)` pairs where a value may be
//! text, a number, a boolean, or one-or-more binary attachments. Entries
//! keep declaration order, so error reporting and encoding are stable.

use serde_json::{Map, Value};

/// One binary attachment captured from a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileAttachment {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Size of the attachment in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lowercase filename extension including the dot (e.g. `.png`).
    pub fn extension(&self) -> Option<String> {
        let name = self.filename.rsplit('.').next()?;
        if name.len() == self.filename.len() {
            return None;
        }
        Some(format!(".{}", name.to_lowercase()))
    }

    /// True for `image/*` content types.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// One submitted field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    File(FileAttachment),
    Files(Vec<FileAttachment>),
    Null,
}

impl FieldValue {
    /// True when the value carries nothing worth encoding.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Files(files) => files.is_empty(),
            _ => false,
        }
    }

    /// True for single or multiple attachments.
    pub fn is_file(&self) -> bool {
        matches!(self, FieldValue::File(_) | FieldValue::Files(_))
    }

    /// Text form of a scalar value, as it would appear in a form control.
    /// Attachments and null have no text form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Integer(n) => Some(n.to_string()),
            FieldValue::Float(f) => Some(f.to_string()),
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::File(_) | FieldValue::Files(_) | FieldValue::Null => None,
        }
    }

    /// JSON form of a scalar value. Attachments have no JSON form.
    pub fn to_json(&self) -> Option<Value> {
        match self {
            FieldValue::Text(s) => Some(Value::String(s.clone())),
            FieldValue::Integer(n) => Some(Value::from(*n)),
            FieldValue::Float(f) => Some(Value::from(*f)),
            FieldValue::Bool(b) => Some(Value::Bool(*b)),
            FieldValue::Null => Some(Value::Null),
            FieldValue::File(_) | FieldValue::Files(_) => None,
        }
    }

    /// Coerce numeric-looking text into a number, leaving everything else
    /// untouched. `"42"` becomes an integer, `"4.2"` a float.
    pub fn coerce_numeric(self) -> FieldValue {
        if let FieldValue::Text(text) = &self {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                if let Ok(n) = trimmed.parse::<i64>() {
                    return FieldValue::Integer(n);
                }
                if let Ok(f) = trimmed.parse::<f64>() {
                    return FieldValue::Float(f);
                }
            }
        }
        self
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<FileAttachment> for FieldValue {
    fn from(value: FileAttachment) -> Self {
        FieldValue::File(value)
    }
}

/// Ordered collection of submitted field values.
///
/// Setting an existing name replaces its value in place; new names append.
/// Empty values are kept here and dropped at encoding time, so validation
/// still sees which fields were submitted blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    entries: Vec<(String, FieldValue)>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or replace a value, keeping the original position on replace.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if any entry carries an attachment.
    pub fn has_files(&self) -> bool {
        self.entries.iter().any(|(_, v)| v.is_file())
    }

    /// Coerce every numeric-looking text value into a number. Attachments
    /// and non-numeric text pass through untouched.
    pub fn coerce_numeric_strings(&mut self) {
        for (_, value) in self.entries.iter_mut() {
            let coerced = value.clone().coerce_numeric();
            *value = coerced;
        }
    }

    /// JSON object of the scalar entries, dropping empty/null values.
    /// Attachments are skipped; callers that need them use multipart.
    pub fn to_json_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for (name, value) in self.iter() {
            if value.is_empty() || value.is_file() {
                continue;
            }
            if let Some(json) = value.to_json() {
                map.insert(name.to_string(), json);
            }
        }
        map
    }
}

impl FromIterator<(String, FieldValue)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        let mut values = FormValues::new();
        for (name, value) in iter {
            values.set(name, value);
        }
        values
    }
}
