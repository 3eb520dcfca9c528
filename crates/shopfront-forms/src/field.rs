//! Static field descriptors.
//!
//! A form is declared as an ordered list of [`FieldConfig`]s. The kind
//! drives which input behavior renders; constraints (options, file limits)
//! live on the kind variant that uses them.

use crate::render::{RenderedField, RenderFn};
use std::fmt;
use std::sync::Arc;

/// How a mutually exclusive option group lays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChoiceLayout {
    #[default]
    Vertical,
    Horizontal,
}

/// One selectable option. Exclusive-choice options may carry secondary
/// descriptive text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
    pub description: Option<String>,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Limits applied to a file field's selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileConstraints {
    /// Comma-separated allowlist of `.ext` entries and MIME patterns
    /// (one `*` segment allowed, e.g. `image/*`). `None` accepts anything.
    pub accept: Option<String>,
    pub multiple: bool,
    /// Maximum size per file, in bytes.
    pub max_size: Option<u64>,
    /// Maximum number of selected files.
    pub max_files: Option<usize>,
}

impl FileConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn max_size(mut self, bytes: u64) -> Self {
        self.max_size = Some(bytes);
        self
    }

    pub fn max_files(mut self, count: usize) -> Self {
        self.max_files = Some(count);
        self
    }
}

/// Callback a choice field fires after the engine applies the new value.
pub type ChoiceCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// What kind of input a field is.
#[derive(Clone, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Numeric,
    Password,
    FreeText {
        rows: u32,
    },
    Choice {
        options: Vec<ChoiceOption>,
        on_change: Option<ChoiceCallback>,
    },
    ExclusiveChoice {
        options: Vec<ChoiceOption>,
        layout: ChoiceLayout,
    },
    File(FileConstraints),
    /// Renders nothing but still participates in submission.
    Hidden,
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => f.write_str("Text"),
            FieldKind::Numeric => f.write_str("Numeric"),
            FieldKind::Password => f.write_str("Password"),
            FieldKind::FreeText { rows } => write!(f, "FreeText {{ rows: {rows} }}"),
            FieldKind::Choice { options, .. } => {
                write!(f, "Choice {{ options: {} }}", options.len())
            }
            FieldKind::ExclusiveChoice { options, layout } => {
                write!(f, "ExclusiveChoice {{ options: {}, layout: {layout:?} }}", options.len())
            }
            FieldKind::File(constraints) => write!(f, "File({constraints:?})"),
            FieldKind::Hidden => f.write_str("Hidden"),
        }
    }
}

/// Static declaration of one form field.
#[derive(Clone)]
pub struct FieldConfig {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub placeholder: Option<String>,
    pub required: bool,
    pub disabled: bool,
    pub help_text: Option<String>,
    /// Escape hatch: callers may take over rendering of this field.
    pub custom_render: Option<RenderFn>,
}

impl FieldConfig {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            placeholder: None,
            required: false,
            disabled: false,
            help_text: None,
            custom_render: None,
        }
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn numeric(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Numeric)
    }

    pub fn password(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Password)
    }

    pub fn free_text(name: impl Into<String>, label: impl Into<String>, rows: u32) -> Self {
        Self::new(name, label, FieldKind::FreeText { rows })
    }

    pub fn choice(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<ChoiceOption>,
    ) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Choice {
                options,
                on_change: None,
            },
        )
    }

    pub fn exclusive_choice(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<ChoiceOption>,
        layout: ChoiceLayout,
    ) -> Self {
        Self::new(name, label, FieldKind::ExclusiveChoice { options, layout })
    }

    pub fn file(
        name: impl Into<String>,
        label: impl Into<String>,
        constraints: FileConstraints,
    ) -> Self {
        Self::new(name, label, FieldKind::File(constraints))
    }

    pub fn hidden(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), name, FieldKind::Hidden)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    pub fn on_choice_change(mut self, callback: ChoiceCallback) -> Self {
        if let FieldKind::Choice { on_change, .. } = &mut self.kind {
            *on_change = Some(callback);
        }
        self
    }

    pub fn custom_render(
        mut self,
        render: impl Fn(&crate::state::FieldState) -> RenderedField + Send + Sync + 'static,
    ) -> Self {
        self.custom_render = Some(Arc::new(render));
        self
    }
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConfig")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("disabled", &self.disabled)
            .field("custom_render", &self.custom_render.is_some())
            .finish()
    }
}
