//! Per-field phase machine.
//!
//! Each field moves `Pristine -> Focused -> Edited -> Valid | Invalid`.
//! Input events drive the first three phases; the latest mutation outcome
//! decides the terminal ones. Editing an invalid field puts it back into
//! `Edited`, so stale errors disappear as soon as the user types.

use shopfront_types::form::FieldValue;
use shopfront_types::state::ActionState;

/// Where a field currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPhase {
    #[default]
    Pristine,
    Focused,
    Edited,
    Valid,
    Invalid,
}

/// Runtime state of one field: its current value and phase.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub name: String,
    pub value: FieldValue,
    pub phase: FieldPhase,
}

impl FieldState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FieldValue::Null,
            phase: FieldPhase::Pristine,
        }
    }

    pub fn with_value(name: impl Into<String>, value: FieldValue) -> Self {
        Self {
            name: name.into(),
            value,
            phase: FieldPhase::Pristine,
        }
    }

    /// The field received focus. Only meaningful from `Pristine`.
    pub fn focus(&mut self) {
        if self.phase == FieldPhase::Pristine {
            self.phase = FieldPhase::Focused;
        }
    }

    /// The field's value changed.
    pub fn edit(&mut self, value: impl Into<FieldValue>) {
        self.value = value.into();
        self.phase = FieldPhase::Edited;
    }

    /// Fold the latest mutation outcome into the phase. A field the outcome
    /// names becomes `Invalid`; an edited field it does not name becomes
    /// `Valid`. Untouched fields stay where they are.
    pub fn resolve(&mut self, outcome: &ActionState) {
        if !outcome.errors_for(&self.name).is_empty() {
            self.phase = FieldPhase::Invalid;
        } else if matches!(self.phase, FieldPhase::Edited | FieldPhase::Invalid) {
            self.phase = FieldPhase::Valid;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}
