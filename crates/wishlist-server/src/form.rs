//! Form controller for the `name` and `comment` fields.
//!
//! [`FormController`] tracks, per field, the current value, the value it was
//! last initialized with, whether it has been touched, and its validation
//! error. It also owns the submission lifecycle: while a submission is in
//! flight the form is `submitting` and its fields are disabled.
//!
//! The controller knows nothing about the store. Callers either use the
//! two-step [`begin_submit`](FormController::begin_submit) /
//! [`finish_submit`](FormController::finish_submit) pair, which lets them
//! release their own locks while the submission runs, or the one-call
//! [`submit`](FormController::submit).

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use wishlist_core::WishDraft;

/// The two form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Name,
    Comment,
}

impl FieldName {
    /// All fields in render order.
    pub const ALL: [FieldName; 2] = [FieldName::Name, FieldName::Comment];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::Comment => "comment",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldName::Name => "Name",
            FieldName::Comment => "Comment",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FieldName::Name => "your wish name",
            FieldName::Comment => "any optional comments",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(FieldName::Name),
            "comment" => Ok(FieldName::Comment),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

/// Field-level validator: returns an error message for an invalid value.
pub type Validator = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// State of a single field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    /// Value set by the last `initialize`; `reset` reverts to it.
    pub initial: String,
    pub touched: bool,
    pub error: Option<String>,
}

impl FieldState {
    pub fn dirty(&self) -> bool {
        self.value != self.initial
    }
}

/// Errors from form operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// A submission is in flight; fields and buttons are disabled.
    #[error("form is submitting")]
    Submitting,

    /// Field name not recognized.
    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// One or more validators rejected the current values.
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(Vec<(FieldName, String)>),

    /// The submit handler reported a failure.
    #[error("submission failed: {0}")]
    SubmitFailed(String),
}

/// Values captured when a submission starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub values: WishDraft,
    /// Form generation at submit time; see [`FormController::generation`].
    pub generation: u64,
}

/// Field values, validation metadata and submission lifecycle.
pub struct FormController {
    name: FieldState,
    comment: FieldState,
    validators: HashMap<FieldName, Validator>,
    submitting: bool,
    submit_succeeded: bool,
    submit_error: Option<String>,
    generation: u64,
}

impl FormController {
    /// A form with empty fields and no validators.
    pub fn new() -> Self {
        FormController {
            name: FieldState::default(),
            comment: FieldState::default(),
            validators: HashMap::new(),
            submitting: false,
            submit_succeeded: false,
            submit_error: None,
            generation: 0,
        }
    }

    /// Installs a validator for `field` and revalidates it.
    pub fn with_validator<F>(mut self, field: FieldName, validator: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.validators.insert(field, Box::new(validator));
        self.validate(field);
        self
    }

    // -------------------------------------------------------------------
    // Field state
    // -------------------------------------------------------------------

    pub fn field(&self, field: FieldName) -> &FieldState {
        match field {
            FieldName::Name => &self.name,
            FieldName::Comment => &self.comment,
        }
    }

    fn field_mut(&mut self, field: FieldName) -> &mut FieldState {
        match field {
            FieldName::Name => &mut self.name,
            FieldName::Comment => &mut self.comment,
        }
    }

    /// Current values of both fields.
    pub fn values(&self) -> WishDraft {
        WishDraft::new(self.name.value.clone(), self.comment.value.clone())
    }

    /// The error to display for `field`: only once it has been touched.
    pub fn visible_error(&self, field: FieldName) -> Option<&str> {
        let state = self.field(field);
        if state.touched {
            state.error.as_deref()
        } else {
            None
        }
    }

    /// No field differs from its initialized value.
    pub fn pristine(&self) -> bool {
        FieldName::ALL.iter().all(|f| !self.field(*f).dirty())
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_succeeded(&self) -> bool {
        self.submit_succeeded
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Incremented by every `initialize`.
    ///
    /// A submission that finds a different generation on completion knows the
    /// form was re-targeted while it was in flight.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn submit_enabled(&self) -> bool {
        !self.submitting && !self.pristine()
    }

    pub fn reset_enabled(&self) -> bool {
        !self.submitting && !self.pristine()
    }

    pub fn fields_disabled(&self) -> bool {
        self.submitting
    }

    // -------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------

    /// Sets every field to `values`, clears touched state, marks pristine.
    ///
    /// `submit_succeeded` is left as is so a create can clear the form while
    /// the success indicator stays visible.
    pub fn initialize(&mut self, values: WishDraft) {
        let WishDraft { name, comment } = values;
        for (field, value) in [(FieldName::Name, name), (FieldName::Comment, comment)] {
            let state = self.field_mut(field);
            state.initial = value.clone();
            state.value = value;
            state.touched = false;
            self.validate(field);
        }
        self.generation += 1;
    }

    /// Reverts every field to its last-initialized value.
    pub fn reset(&mut self) {
        for field in FieldName::ALL {
            let state = self.field_mut(field);
            state.value = state.initial.clone();
            state.touched = false;
            self.validate(field);
        }
    }

    pub fn change(&mut self, field: FieldName, value: impl Into<String>) -> Result<(), FormError> {
        if self.submitting {
            return Err(FormError::Submitting);
        }
        self.field_mut(field).value = value.into();
        self.validate(field);
        Ok(())
    }

    /// Marks `field` as touched, e.g. when it loses focus.
    pub fn blur(&mut self, field: FieldName) -> Result<(), FormError> {
        if self.submitting {
            return Err(FormError::Submitting);
        }
        self.field_mut(field).touched = true;
        Ok(())
    }

    /// Starts a submission.
    ///
    /// With validation errors every field is marked touched and the errors
    /// are returned; otherwise the form enters `submitting`.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, FormError> {
        if self.submitting {
            return Err(FormError::Submitting);
        }
        let errors: Vec<(FieldName, String)> = FieldName::ALL
            .iter()
            .filter_map(|f| self.field(*f).error.clone().map(|e| (*f, e)))
            .collect();
        if !errors.is_empty() {
            for field in FieldName::ALL {
                self.field_mut(field).touched = true;
            }
            return Err(FormError::Invalid(errors));
        }

        self.submitting = true;
        self.submit_succeeded = false;
        self.submit_error = None;
        Ok(SubmitTicket {
            values: self.values(),
            generation: self.generation,
        })
    }

    /// Ends the in-flight submission with the handler's outcome.
    pub fn finish_submit(&mut self, outcome: Result<(), String>) {
        self.submitting = false;
        match outcome {
            Ok(()) => {
                self.submit_succeeded = true;
                self.submit_error = None;
            }
            Err(message) => {
                self.submit_succeeded = false;
                self.submit_error = Some(message);
            }
        }
    }

    /// Runs `handler` with the current values, holding `submitting` until
    /// the returned future resolves.
    pub async fn submit<F, Fut>(&mut self, handler: F) -> Result<(), FormError>
    where
        F: FnOnce(WishDraft) -> Fut,
        Fut: Future<Output = Result<(), String>>,
    {
        let ticket = self.begin_submit()?;
        let outcome = handler(ticket.values).await;
        self.finish_submit(outcome.clone());
        outcome.map_err(FormError::SubmitFailed)
    }

    fn validate(&mut self, field: FieldName) {
        let error = self
            .validators
            .get(&field)
            .and_then(|validate| validate(&self.field(field).value));
        self.field_mut(field).error = error;
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("name", &self.name)
            .field("comment", &self.comment)
            .field("validators", &self.validators.len())
            .field("submitting", &self.submitting)
            .field("submit_succeeded", &self.submit_succeeded)
            .field("generation", &self.generation)
            .finish()
    }
}
