//! Render dispatch.
//!
//! Turns field descriptors plus runtime state into view-agnostic
//! [`RenderedField`] descriptions a host UI can draw with whatever widget
//! toolkit it uses. Dispatch is one exhaustive match over the field kind,
//! so adding a kind forces every arm to be handled.

use crate::field::{ChoiceLayout, ChoiceOption, FieldConfig, FieldKind};
use crate::file::{DragEvent, FilePreview, FileSelection};
use crate::state::{FieldPhase, FieldState};
use shopfront_types::form::{FieldValue, FileAttachment, FormValues};
use shopfront_types::state::ActionState;
use std::sync::Arc;

/// Caller-supplied override replacing the built-in dispatch for one field.
pub type RenderFn = Arc<dyn Fn(&FieldState) -> RenderedField + Send + Sync>;

const REQUIRED_MESSAGE: &str = "This field is required";

/// Input flavor of a single-line control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Numeric,
    Password,
}

/// The concrete control a field renders as.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Input {
        input: InputType,
        value: Option<String>,
    },
    TextArea {
        rows: u32,
        value: Option<String>,
    },
    Select {
        options: Vec<ChoiceOption>,
        selected: Option<String>,
    },
    OptionGroup {
        options: Vec<ChoiceOption>,
        layout: ChoiceLayout,
        selected: Option<String>,
    },
    DropZone {
        accept: Option<String>,
        multiple: bool,
        drag_active: bool,
        previews: Vec<FilePreview>,
        rejections: Vec<String>,
    },
    /// Participates in submission but draws nothing.
    Hidden,
}

/// One field, fully described for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedField {
    pub name: String,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub disabled: bool,
    pub help_text: Option<String>,
    pub phase: FieldPhase,
    pub control: Control,
    /// Blocking errors from the latest mutation outcome.
    pub errors: Vec<String>,
    /// Inline hint for a required-and-empty field. Presentational only; it
    /// never blocks submission by itself.
    pub required_hint: Option<String>,
}

/// One field's descriptor, runtime state, and (for file fields) selection.
pub struct Field {
    pub config: FieldConfig,
    pub state: FieldState,
    files: Option<FileSelection>,
}

impl Field {
    pub fn new(config: FieldConfig) -> Self {
        let files = match &config.kind {
            FieldKind::File(constraints) => Some(FileSelection::new(constraints.clone())),
            _ => None,
        };
        let state = FieldState::new(config.name.clone());
        Self {
            config,
            state,
            files,
        }
    }

    pub fn with_default(config: FieldConfig, value: FieldValue) -> Self {
        let mut field = Self::new(config);
        // File controls never take a default value.
        if field.files.is_none() {
            field.state.value = value;
        }
        field
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn files(&self) -> Option<&FileSelection> {
        self.files.as_ref()
    }

    pub fn focus(&mut self) {
        self.state.focus();
    }

    /// Apply a new value. Choice fields coerce to their string form and
    /// then fire the configured post-change callback.
    pub fn edit(&mut self, value: impl Into<FieldValue>) {
        let value = value.into();
        match &self.config.kind {
            FieldKind::Choice { on_change, .. } => {
                let text = value.to_text().unwrap_or_default();
                self.state.edit(text.clone());
                if let Some(callback) = on_change {
                    callback(&text);
                }
            }
            FieldKind::ExclusiveChoice { .. } => {
                let text = value.to_text().unwrap_or_default();
                self.state.edit(text);
            }
            _ => self.state.edit(value),
        }
    }

    /// Forward a drag event to the file selection. Ignored when the field
    /// is disabled or not a file field.
    pub fn drag(&mut self, event: DragEvent) {
        if self.config.disabled {
            return;
        }
        if let Some(selection) = &mut self.files {
            selection.drag(event);
        }
    }

    /// Offer candidate files (drop or picker). Ignored when disabled.
    pub fn offer_files(&mut self, candidates: Vec<FileAttachment>) {
        if self.config.disabled {
            return;
        }
        if let Some(selection) = &mut self.files {
            selection.offer(candidates);
            self.state.edit(selection.value());
        }
    }

    pub fn remove_file(&mut self, index: usize) {
        if let Some(selection) = &mut self.files {
            selection.remove(index);
            self.state.edit(selection.value());
        }
    }

    pub fn resolve(&mut self, outcome: &ActionState) {
        self.state.resolve(outcome);
    }

    /// The field's submittable value.
    pub fn value(&self) -> FieldValue {
        match &self.files {
            Some(selection) => selection.value(),
            None => self.state.value.clone(),
        }
    }

    fn is_empty(&self) -> bool {
        match &self.files {
            Some(selection) => selection.is_empty(),
            None => self.state.is_empty(),
        }
    }

    /// Describe this field for display against the latest outcome.
    pub fn render(&self, outcome: &ActionState) -> RenderedField {
        if let Some(custom) = &self.config.custom_render {
            return custom(&self.state);
        }
        let control = self.control();
        let required_hint = (self.config.required && self.is_empty())
            .then(|| REQUIRED_MESSAGE.to_string());
        RenderedField {
            name: self.config.name.clone(),
            label: self.config.label.clone(),
            placeholder: self.config.placeholder.clone(),
            required: self.config.required,
            disabled: self.config.disabled,
            help_text: self.config.help_text.clone(),
            phase: self.state.phase,
            control,
            errors: outcome.errors_for(&self.config.name).to_vec(),
            required_hint,
        }
    }

    fn control(&self) -> Control {
        let text_value = self.state.value.to_text();
        match &self.config.kind {
            FieldKind::Text => Control::Input {
                input: InputType::Text,
                value: text_value,
            },
            FieldKind::Numeric => Control::Input {
                input: InputType::Numeric,
                value: text_value,
            },
            FieldKind::Password => Control::Input {
                input: InputType::Password,
                value: text_value,
            },
            FieldKind::FreeText { rows } => Control::TextArea {
                rows: *rows,
                value: text_value,
            },
            FieldKind::Choice { options, .. } => Control::Select {
                options: options.clone(),
                selected: text_value,
            },
            FieldKind::ExclusiveChoice { options, layout } => Control::OptionGroup {
                options: options.clone(),
                layout: *layout,
                selected: text_value,
            },
            FieldKind::File(constraints) => {
                let selection = self.files.as_ref();
                Control::DropZone {
                    accept: constraints.accept.clone(),
                    multiple: constraints.multiple,
                    drag_active: selection.map(FileSelection::drag_active).unwrap_or(false),
                    previews: selection.map(FileSelection::previews).unwrap_or_default(),
                    rejections: selection
                        .map(|s| s.rejections().to_vec())
                        .unwrap_or_default(),
                }
            }
            FieldKind::Hidden => Control::Hidden,
        }
    }
}

/// A whole form: ordered fields, one submission surface.
pub struct FormModel {
    fields: Vec<Field>,
}

impl FormModel {
    /// Build from descriptors, applying defaults by field name. File fields
    /// ignore defaults and always start empty.
    pub fn new(configs: Vec<FieldConfig>, defaults: &FormValues) -> Self {
        let fields = configs
            .into_iter()
            .map(|config| match defaults.get(&config.name) {
                Some(value) => Field::with_default(config, value.clone()),
                None => Field::new(config),
            })
            .collect();
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name() == name)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Collect every field's value, hidden fields included.
    pub fn submission(&self) -> FormValues {
        self.fields
            .iter()
            .map(|field| (field.name().to_string(), field.value()))
            .collect()
    }

    /// Fold a mutation outcome into every field's phase.
    pub fn resolve(&mut self, outcome: &ActionState) {
        for field in &mut self.fields {
            field.resolve(outcome);
        }
    }

    /// Describe the visible fields. Hidden fields submit but never render.
    pub fn render(&self, outcome: &ActionState) -> Vec<RenderedField> {
        self.fields
            .iter()
            .filter(|field| !matches!(field.config.kind, FieldKind::Hidden))
            .map(|field| field.render(outcome))
            .collect()
    }
}
