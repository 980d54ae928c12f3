//! Per-field validation over the whole form.
//!
//! # Design
//! `ValidationEngine` maps each `FieldPath` to its `RuleSet`. Paths with no
//! registered rules are always valid, which covers the social handles, the
//! fixed phone slots, and every dynamic list entry. A pass over the form is a
//! pure function of the current raw values and produces `ValidationErrors`.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::path::FieldPath;
use crate::rules::{Rule, RuleSet};
use crate::transcode::Transcode;

pub const USERNAME_REQUIRED: &str = "Username is required";
pub const EMAIL_INVALID: &str = "Invalid email format";
pub const EMAIL_ADMIN: &str = "Enter a different email address";
pub const EMAIL_BLACKLISTED: &str = "This domain is not supported";
pub const CHANNEL_REQUIRED: &str = "Channel is required";
pub const AGE_REQUIRED: &str = "Age is required";
pub const DOB_REQUIRED: &str = "Date of birth is required";

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const BLACKLISTED_SUFFIX: &str = "baddomain.com";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$")
        .expect("email pattern is a valid regex")
});

/// Messages for every field currently failing a rule, in path order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FieldPath, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, path: &FieldPath) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &str)> {
        self.0.iter().map(|(path, message)| (path, message.as_str()))
    }

    pub(crate) fn insert(&mut self, path: FieldPath, message: String) {
        self.0.insert(path, message);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    rules: HashMap<FieldPath, RuleSet>,
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rule sets of the profile form.
    pub fn profile() -> Self {
        let mut engine = Self::new();
        engine.register(FieldPath::Username, RuleSet::new().with_rule(Rule::required(USERNAME_REQUIRED)));
        engine.register(
            FieldPath::Email,
            RuleSet::new()
                .with_rule(Rule::pattern(EMAIL_PATTERN.clone(), EMAIL_INVALID))
                .with_rule(Rule::custom("notAdmin", |v| v != ADMIN_EMAIL, EMAIL_ADMIN))
                .with_rule(Rule::custom(
                    "notBlackListed",
                    |v| !v.ends_with(BLACKLISTED_SUFFIX),
                    EMAIL_BLACKLISTED,
                )),
        );
        engine.register(FieldPath::Channel, RuleSet::new().with_rule(Rule::required(CHANNEL_REQUIRED)));
        engine.register(
            FieldPath::Age,
            RuleSet::new()
                .with_transcode(Transcode::Number)
                .with_rule(Rule::required(AGE_REQUIRED)),
        );
        engine.register(
            FieldPath::Dob,
            RuleSet::new()
                .with_transcode(Transcode::Date)
                .with_rule(Rule::required(DOB_REQUIRED)),
        );
        engine
    }

    /// Replace the rule set for `path`.
    pub fn register(&mut self, path: FieldPath, rules: RuleSet) {
        self.rules.insert(path, rules);
    }

    pub fn rules_for(&self, path: &FieldPath) -> Option<&RuleSet> {
        self.rules.get(path)
    }

    pub fn validate(&self, path: &FieldPath, raw: &str) -> Option<String> {
        self.rules_for(path).and_then(|rules| rules.check(raw))
    }

    /// Validate every `(path, raw)` pair.
    pub fn validate_all<'a, I>(&self, values: I) -> ValidationErrors
    where
        I: IntoIterator<Item = (FieldPath, &'a str)>,
    {
        let mut errors = ValidationErrors::default();
        for (path, raw) in values {
            if let Some(message) = self.validate(&path, raw) {
                errors.insert(path, message);
            }
        }
        errors
    }
}
