//! Schema-driven field rendering engine.
//!
//! A form declares its fields once as [`FieldConfig`]s; the engine keeps
//! per-field runtime state (`Pristine -> Focused -> Edited -> Valid |
//! Invalid`), runs the file selection logic for file fields, and renders
//! every field into a view-agnostic [`RenderedField`] the host UI draws.
//! Validation errors arrive through the latest
//! [`ActionState`](shopfront_types::state::ActionState) and surface next to
//! the field they name.
//!
//! # Example
//!
//! ```ignore
//! let mut form = FormModel::new(product_fields(), &FormValues::new());
//! form.field_mut("name").unwrap().edit("Widget");
//! let submission = form.submission();
//! let outcome = products.create_action(submission, &schema, &options);
//! form.resolve(&outcome);
//! for field in form.render(&outcome) {
//!     // draw field.control, field.errors, field.required_hint
//! }
//! ```

pub mod field;
pub mod file;
pub mod render;
pub mod state;

pub use field::{ChoiceLayout, ChoiceOption, FieldConfig, FieldKind, FileConstraints};
pub use file::{format_size, DragEvent, FilePreview, FileSelection, PreviewKind};
pub use render::{Control, Field, FormModel, InputType, RenderedField};
pub use state::{FieldPhase, FieldState};
