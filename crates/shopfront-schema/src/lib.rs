//! Declarative validation schemas.
//!
//! A [`Schema`] is an ordered list of field rules checked against submitted
//! [`FormValues`]. Validation never touches the network: it either passes
//! or produces [`FieldErrors`], per-field message lists keyed by field name.
//!
//! Rules run after numeric coercion, so `"42"` submitted in a numeric field
//! arrives here as an integer. The flip side is that numeric-looking text in
//! a text field fails the text rule; fields that legitimately hold digits
//! (codes, phone numbers) should use [`ValueRule::Any`].
//!
//! # Example
//!
//! ```ignore
//! let schema = Schema::new()
//!     .required_text("name", 1, 120)
//!     .required_number("price", Some(0.0), None)
//!     .email("email")
//!     .one_of("category", &["tools", "toys"])
//!     .file("image", true);
//! schema.validate(&values)?;
//! ```

use shopfront_types::error::FieldErrors;
use shopfront_types::form::{FieldValue, FormValues};

/// Constraint applied to one field's value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueRule {
    /// Free text with optional length bounds (in characters).
    Text {
        min_len: Option<usize>,
        max_len: Option<usize>,
    },
    /// A number with optional inclusive bounds. `integer` rejects floats.
    Number {
        min: Option<f64>,
        max: Option<f64>,
        integer: bool,
    },
    /// A plausible email address.
    Email,
    /// Text restricted to an enumerated option set.
    OneOf(Vec<String>),
    /// One or more file attachments.
    File,
    /// Anything goes; only the required flag applies.
    Any,
}

/// One field's rule within a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub name: String,
    pub required: bool,
    pub rule: ValueRule,
}

/// Ordered validation schema for one form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<FieldRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field rule. Builder-style, declaration order is kept.
    pub fn field(mut self, name: impl Into<String>, required: bool, rule: ValueRule) -> Self {
        self.fields.push(FieldRule {
            name: name.into(),
            required,
            rule,
        });
        self
    }

    pub fn required_text(self, name: impl Into<String>, min_len: usize, max_len: usize) -> Self {
        self.field(
            name,
            true,
            ValueRule::Text {
                min_len: Some(min_len),
                max_len: Some(max_len),
            },
        )
    }

    pub fn optional_text(self, name: impl Into<String>, max_len: usize) -> Self {
        self.field(
            name,
            false,
            ValueRule::Text {
                min_len: None,
                max_len: Some(max_len),
            },
        )
    }

    pub fn required_number(
        self,
        name: impl Into<String>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Self {
        self.field(
            name,
            true,
            ValueRule::Number {
                min,
                max,
                integer: false,
            },
        )
    }

    pub fn required_integer(
        self,
        name: impl Into<String>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Self {
        self.field(
            name,
            true,
            ValueRule::Number {
                min,
                max,
                integer: true,
            },
        )
    }

    pub fn email(self, name: impl Into<String>) -> Self {
        self.field(name, true, ValueRule::Email)
    }

    pub fn one_of(self, name: impl Into<String>, options: &[&str]) -> Self {
        self.field(
            name,
            true,
            ValueRule::OneOf(options.iter().map(|s| s.to_string()).collect()),
        )
    }

    pub fn file(self, name: impl Into<String>, required: bool) -> Self {
        self.field(name, required, ValueRule::File)
    }

    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    /// Check submitted values against every rule, in declaration order.
    ///
    /// Fields absent from the schema are ignored. A missing or empty value
    /// only fails when the field is required.
    pub fn validate(&self, values: &FormValues) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for rule in &self.fields {
            let value = values.get(&rule.name);
            let messages = check_field(rule, value);
            if !messages.is_empty() {
                errors.insert(rule.name.clone(), messages);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_field(rule: &FieldRule, value: Option<&FieldValue>) -> Vec<String> {
    let empty = value.map(FieldValue::is_empty).unwrap_or(true);
    if empty {
        return if rule.required {
            vec![format!("{} is required", rule.name)]
        } else {
            Vec::new()
        };
    }
    let value = match value {
        Some(v) => v,
        None => return Vec::new(),
    };
    match &rule.rule {
        ValueRule::Text { min_len, max_len } => check_text(rule, value, *min_len, *max_len),
        ValueRule::Number { min, max, integer } => check_number(rule, value, *min, *max, *integer),
        ValueRule::Email => check_email(rule, value),
        ValueRule::OneOf(options) => check_one_of(rule, value, options),
        ValueRule::File => check_file(rule, value),
        ValueRule::Any => Vec::new(),
    }
}

fn check_text(
    rule: &FieldRule,
    value: &FieldValue,
    min_len: Option<usize>,
    max_len: Option<usize>,
) -> Vec<String> {
    let text = match value {
        FieldValue::Text(s) => s,
        _ => return vec![format!("{} must be text", rule.name)],
    };
    let mut messages = Vec::new();
    let chars = text.chars().count();
    if let Some(min) = min_len {
        if chars < min {
            messages.push(format!(
                "{} must be at least {min} characters long",
                rule.name
            ));
        }
    }
    if let Some(max) = max_len {
        if chars > max {
            messages.push(format!(
                "{} must be at most {max} characters long",
                rule.name
            ));
        }
    }
    messages
}

fn check_number(
    rule: &FieldRule,
    value: &FieldValue,
    min: Option<f64>,
    max: Option<f64>,
    integer: bool,
) -> Vec<String> {
    let number = match value {
        FieldValue::Integer(n) => *n as f64,
        FieldValue::Float(f) if !integer => *f,
        FieldValue::Float(_) => {
            return vec![format!("{} must be a whole number", rule.name)];
        }
        _ => return vec![format!("{} must be a number", rule.name)],
    };
    let mut messages = Vec::new();
    if let Some(min) = min {
        if number < min {
            messages.push(format!("{} must be at least {min}", rule.name));
        }
    }
    if let Some(max) = max {
        if number > max {
            messages.push(format!("{} must be at most {max}", rule.name));
        }
    }
    messages
}

fn check_email(rule: &FieldRule, value: &FieldValue) -> Vec<String> {
    let text = match value {
        FieldValue::Text(s) => s,
        _ => return vec![format!("{} must be a valid email address", rule.name)],
    };
    let valid = match text.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };
    if valid {
        Vec::new()
    } else {
        vec![format!("{} must be a valid email address", rule.name)]
    }
}

fn check_one_of(rule: &FieldRule, value: &FieldValue, options: &[String]) -> Vec<String> {
    let text = value.to_text();
    match text {
        Some(text) if options.iter().any(|o| *o == text) => Vec::new(),
        _ => vec![format!(
            "{} must be one of: {}",
            rule.name,
            options.join(", ")
        )],
    }
}

fn check_file(rule: &FieldRule, value: &FieldValue) -> Vec<String> {
    if value.is_file() {
        Vec::new()
    } else {
        vec![format!("{} must be a file", rule.name)]
    }
}
