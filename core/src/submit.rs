//! Submission gate: validate everything, then hand off or reject.
//!
//! # Design
//! One attempt walks `Idle -> Validating -> Valid -> Submitted` or
//! `Idle -> Validating -> Invalid`, and the gate re-arms to `Idle` before
//! returning. The handler is called at most once per attempt and only with
//! fully transcoded values.

use crate::engine::{ValidationErrors, AGE_REQUIRED, DOB_REQUIRED};
use crate::path::FieldPath;
use crate::types::{FormValues, SubmittedValues};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Idle,
    Validating,
    Valid,
    Invalid,
    Submitted,
}

/// Receives the record of a passing submission.
pub trait SubmitHandler {
    fn submit(&mut self, values: &SubmittedValues);
}

impl<F> SubmitHandler for F
where
    F: FnMut(&SubmittedValues),
{
    fn submit(&mut self, values: &SubmittedValues) {
        self(values)
    }
}

/// Logs the submitted record and does nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSubmitHandler;

impl SubmitHandler for LogSubmitHandler {
    fn submit(&mut self, values: &SubmittedValues) {
        match serde_json::to_string(values) {
            Ok(json) => tracing::info!(record = %json, "form submitted"),
            Err(err) => tracing::warn!(error = %err, "form submitted, record not serializable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted(SubmittedValues),
    Rejected(ValidationErrors),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionGate {
    state: GateState,
    trail: Vec<GateState>,
    submissions: u64,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// States visited by the most recent attempt, ending in `Idle`.
    pub fn trail(&self) -> &[GateState] {
        &self.trail
    }

    /// Number of attempts that reached the handler.
    pub fn submissions(&self) -> u64 {
        self.submissions
    }

    /// Start an attempt. Call `settle` once validation has run.
    pub fn begin(&mut self) {
        self.trail.clear();
        self.transition(GateState::Validating);
    }

    pub fn settle<H>(&mut self, mut errors: ValidationErrors, values: FormValues, handler: &mut H) -> SubmitOutcome
    where
        H: SubmitHandler + ?Sized,
    {
        let outcome = if errors.is_empty() {
            let (age, dob) = (values.age.is_some(), values.dob.is_some());
            match SubmittedValues::from_values(values) {
                Some(submitted) => {
                    self.transition(GateState::Valid);
                    handler.submit(&submitted);
                    self.submissions += 1;
                    self.transition(GateState::Submitted);
                    SubmitOutcome::Submitted(submitted)
                }
                None => {
                    // reachable only with an engine that does not require age and dob
                    if !age {
                        errors.insert(FieldPath::Age, AGE_REQUIRED.to_string());
                    }
                    if !dob {
                        errors.insert(FieldPath::Dob, DOB_REQUIRED.to_string());
                    }
                    self.transition(GateState::Invalid);
                    SubmitOutcome::Rejected(errors)
                }
            }
        } else {
            self.transition(GateState::Invalid);
            SubmitOutcome::Rejected(errors)
        };
        if let SubmitOutcome::Rejected(errors) = &outcome {
            tracing::debug!(failing = errors.len(), "submission rejected");
        }
        self.transition(GateState::Idle);
        outcome
    }

    fn transition(&mut self, next: GateState) {
        tracing::debug!(from = ?self.state, to = ?next, "gate transition");
        self.state = next;
        self.trail.push(next);
    }
}
