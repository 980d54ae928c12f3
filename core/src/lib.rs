//! Validation, list management, and submission for a user profile form.
//!
//! # Overview
//! `ProfileForm` owns the form record: username, email, channel, social
//! handles, two fixed phone slots, a dynamic list of extra phone numbers,
//! age, and date of birth. Each field has a declarative `RuleSet`; a submit
//! runs them all and either hands a fully typed record to a `SubmitHandler`
//! or reports per-field messages.
//!
//! # Design
//! - Default values come from a remote user record. `DefaultsClient` builds
//!   the request and parses the response; the host executes the round-trip
//!   (host-does-IO), so the core stays deterministic.
//! - Raw input is kept as text and transcoded (`age` to a number, `dob` to a
//!   date) during validation and when building the submitted record.
//! - Everything is single-threaded: mutations are discrete calls on the form,
//!   and watchers are notified synchronously.

pub mod config;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod form;
pub mod http;
pub mod list;
pub mod path;
pub mod rules;
pub mod store;
pub mod submit;
pub mod transcode;
pub mod types;

pub use config::FormConfig;
pub use defaults::{DefaultValues, DefaultsClient};
pub use engine::{ValidationEngine, ValidationErrors};
pub use error::{ApiError, FormError};
pub use form::ProfileForm;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::{ListEntry, PhoneList};
pub use path::FieldPath;
pub use rules::{Precedence, Rule, RuleKind, RuleSet};
pub use store::{FieldStore, SubscriptionId, Watch};
pub use submit::{GateState, LogSubmitHandler, SubmissionGate, SubmitHandler, SubmitOutcome};
pub use transcode::Transcode;
pub use types::{FormValues, RemoteDefaults, Social, SubmittedValues};
