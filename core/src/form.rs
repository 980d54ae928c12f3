//! The profile form: owner of the form record and its update entry points.
//!
//! # Design
//! Scalar fields live as raw text in a `FieldStore`; the extra phone numbers
//! live in a `PhoneList`. Every mutation goes through `ProfileForm`, which
//! routes by `FieldPath` and notifies watchers. Validation runs on submit,
//! or on demand through `validate`.

use uuid::Uuid;

use crate::defaults::{DefaultValues, DefaultsClient};
use crate::engine::{ValidationEngine, ValidationErrors};
use crate::error::{ApiError, FormError};
use crate::http::{HttpRequest, HttpResponse};
use crate::list::{ListEntry, PhoneList};
use crate::path::{FieldPath, FIXED_PHONE_SLOTS};
use crate::store::{FieldStore, SubscriptionId, Watch};
use crate::submit::{GateState, SubmissionGate, SubmitHandler, SubmitOutcome};
use crate::transcode::{as_date, as_number};
use crate::types::{FormValues, Social};

#[derive(Debug)]
pub struct ProfileForm {
    store: FieldStore,
    phones: PhoneList,
    engine: ValidationEngine,
    gate: SubmissionGate,
    errors: ValidationErrors,
    banner: Option<String>,
}

impl ProfileForm {
    pub fn new(defaults: DefaultValues) -> Self {
        Self::with_engine(defaults, ValidationEngine::profile())
    }

    pub fn with_engine(defaults: DefaultValues, engine: ValidationEngine) -> Self {
        let mut store = FieldStore::new();
        store.seed(FieldPath::Username, defaults.username);
        store.seed(FieldPath::Email, defaults.email);
        store.seed(FieldPath::Channel, defaults.channel);
        store.seed(FieldPath::Twitter, defaults.twitter);
        store.seed(FieldPath::Facebook, defaults.facebook);
        let [primary, secondary] = defaults.phone_numbers;
        store.seed(FieldPath::PhoneNumber(0), primary);
        store.seed(FieldPath::PhoneNumber(1), secondary);
        store.seed(FieldPath::Age, defaults.age);
        store.seed(FieldPath::Dob, defaults.dob);

        Self {
            store,
            phones: PhoneList::new(defaults.ph_numbers),
            engine,
            gate: SubmissionGate::new(),
            errors: ValidationErrors::default(),
            banner: defaults.fetch_error,
        }
    }

    /// Fetch remote defaults through `execute`, then build the form.
    ///
    /// A failed fetch leaves the static defaults in place and sets `banner`.
    pub fn mount<E>(client: &DefaultsClient, user_id: u32, execute: E) -> Self
    where
        E: FnOnce(HttpRequest) -> Result<HttpResponse, ApiError>,
    {
        let fetched = execute(client.build_fetch_defaults(user_id))
            .and_then(|response| client.parse_fetch_defaults(response));
        Self::new(DefaultValues::resolve(fetched))
    }

    pub fn value(&self, path: &FieldPath) -> Option<&str> {
        match path {
            FieldPath::PhNumber(index) => self.phones.get(*index).map(|e| e.number.as_str()),
            FieldPath::PhoneNumber(slot) if *slot >= FIXED_PHONE_SLOTS => None,
            _ => self.store.value(path),
        }
    }

    pub fn set_value(&mut self, path: FieldPath, raw: impl Into<String>) -> Result<(), FormError> {
        let raw = raw.into();
        match path {
            FieldPath::PhNumber(index) => {
                self.phones.set_number(index, raw.as_str())?;
                self.store.notify(&path, &raw);
            }
            FieldPath::PhoneNumber(slot) if slot >= FIXED_PHONE_SLOTS => {
                return Err(FormError::UnknownField(path.to_string()));
            }
            _ => self.store.set_value(path, raw),
        }
        Ok(())
    }

    /// `set_value` addressed by the textual path, e.g. `phNumbers.1.number`.
    pub fn set_value_at(&mut self, path: &str, raw: impl Into<String>) -> Result<(), FormError> {
        self.set_value(FieldPath::parse(path)?, raw)
    }

    pub fn watch<F>(&mut self, path: FieldPath, listener: F) -> SubscriptionId
    where
        F: FnMut(&FieldPath, &str) + 'static,
    {
        self.store.subscribe(Watch::Field(path), listener)
    }

    /// Observe every change, for inspection tooling.
    pub fn subscribe_all<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&FieldPath, &str) + 'static,
    {
        self.store.subscribe(Watch::All, listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn phones(&self) -> &[ListEntry] {
        self.phones.entries()
    }

    /// Returns the new entry's id for keyed renderers.
    pub fn append_phone(&mut self, number: impl Into<String>) -> Uuid {
        self.phones.append(number)
    }

    /// Remove an extra phone number. The first entry is never removable here.
    pub fn remove_phone(&mut self, index: usize) -> Result<ListEntry, FormError> {
        if index == 0 {
            return Err(FormError::ProtectedEntry(0));
        }
        self.phones.remove(index)
    }

    pub fn can_remove_phone(&self, index: usize) -> bool {
        self.phones.is_removable(index)
    }

    /// Errors from the last validation pass.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(&self, path: &FieldPath) -> Option<&str> {
        self.errors.get(path)
    }

    /// Non-blocking notice about a failed default-values fetch.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn state(&self) -> GateState {
        self.gate.state()
    }

    pub fn gate(&self) -> &SubmissionGate {
        &self.gate
    }

    /// Re-run every rule and store the result.
    pub fn validate(&mut self) -> &ValidationErrors {
        self.errors = self.engine.validate_all(self.raw_values());
        &self.errors
    }

    /// Typed view of the current record.
    pub fn snapshot(&self) -> FormValues {
        let text = |path: FieldPath| self.store.value(&path).unwrap_or_default().to_string();
        FormValues {
            username: text(FieldPath::Username),
            email: text(FieldPath::Email),
            channel: text(FieldPath::Channel),
            social: Social {
                twitter: text(FieldPath::Twitter),
                facebook: text(FieldPath::Facebook),
            },
            phone_numbers: [text(FieldPath::PhoneNumber(0)), text(FieldPath::PhoneNumber(1))],
            ph_numbers: self.phones.entries().to_vec(),
            age: self.store.value(&FieldPath::Age).and_then(as_number),
            dob: self.store.value(&FieldPath::Dob).and_then(as_date),
        }
    }

    pub fn submit<H>(&mut self, handler: &mut H) -> SubmitOutcome
    where
        H: SubmitHandler + ?Sized,
    {
        self.gate.begin();
        let errors = self.engine.validate_all(self.raw_values());
        let values = self.snapshot();
        let outcome = self.gate.settle(errors, values, handler);
        self.errors = match &outcome {
            SubmitOutcome::Submitted(_) => ValidationErrors::default(),
            SubmitOutcome::Rejected(errors) => errors.clone(),
        };
        outcome
    }

    fn raw_values(&self) -> Vec<(FieldPath, &str)> {
        let mut values: Vec<(FieldPath, &str)> = FieldPath::static_paths()
            .into_iter()
            .map(|path| (path, self.store.value(&path).unwrap_or_default()))
            .collect();
        values.extend(
            self.phones
                .entries()
                .iter()
                .enumerate()
                .map(|(index, entry)| (FieldPath::PhNumber(index), entry.number.as_str())),
        );
        values
    }
}
