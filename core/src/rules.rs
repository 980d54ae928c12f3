//! Declarative validation rules for a single field.
//!
//! # Design
//! A field carries a `RuleSet`: tagged `Rule` variants plus an optional
//! `Transcode`. Built-in rules (`Required`, `Pattern`) are always evaluated
//! before `Custom` validators, which run in declaration order. Every rule is
//! evaluated; `Precedence` decides which failing message is reported.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::transcode::Transcode;

/// Predicate behind a `Rule::Custom`; returns `true` when the value passes.
pub type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

#[derive(Clone)]
pub enum Rule {
    Required { message: String },
    Pattern { regex: Regex, message: String },
    Custom { name: String, predicate: Predicate, message: String },
}

/// Evaluation tier of a rule. Lower tiers run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RuleKind {
    Required,
    Pattern,
    Custom,
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Rule::Required { message: message.into() }
    }

    pub fn pattern(regex: Regex, message: impl Into<String>) -> Self {
        Rule::Pattern { regex, message: message.into() }
    }

    pub fn custom<F>(name: impl Into<String>, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Rule::Custom {
            name: name.into(),
            predicate: Arc::new(predicate),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Required { .. } => RuleKind::Required,
            Rule::Pattern { .. } => RuleKind::Pattern,
            Rule::Custom { .. } => RuleKind::Custom,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Rule::Required { message } | Rule::Pattern { message, .. } | Rule::Custom { message, .. } => message,
        }
    }

    /// `absent` is the field's emptiness after transcoding. Only `Required`
    /// judges an empty value; the other rules pass on empty input. `Pattern`
    /// and `Custom` see the raw text untrimmed, as it will be submitted.
    fn fails(&self, raw: &str, absent: bool) -> bool {
        match self {
            Rule::Required { .. } => absent,
            Rule::Pattern { regex, .. } => !raw.is_empty() && !regex.is_match(raw),
            Rule::Custom { predicate, .. } => !raw.is_empty() && !predicate(raw),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required { message } => f.debug_struct("Required").field("message", message).finish(),
            Rule::Pattern { regex, message } => f
                .debug_struct("Pattern")
                .field("regex", &regex.as_str())
                .field("message", message)
                .finish(),
            Rule::Custom { name, message, .. } => f
                .debug_struct("Custom")
                .field("name", name)
                .field("message", message)
                .finish(),
        }
    }
}

/// Which message wins when several rules on one field fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precedence {
    /// The failing rule evaluated last is reported.
    #[default]
    LastFailure,
    FirstFailure,
}

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    transcode: Option<Transcode>,
    precedence: Precedence,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule, keeping built-ins ahead of custom validators.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        // stable: custom validators keep declaration order
        self.rules.sort_by_key(Rule::kind);
        self
    }

    pub fn with_transcode(mut self, transcode: Transcode) -> Self {
        self.transcode = Some(transcode);
        self
    }

    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn transcode(&self) -> Option<Transcode> {
        self.transcode
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule against `raw`; `None` means the value is valid.
    pub fn check(&self, raw: &str) -> Option<String> {
        let absent = match self.transcode {
            Some(transcode) => !transcode.is_present(raw),
            None => raw.trim().is_empty(),
        };

        let mut failing = self.rules.iter().filter(|rule| rule.fails(raw, absent));
        let winner = match self.precedence {
            Precedence::LastFailure => failing.last(),
            Precedence::FirstFailure => failing.next(),
        };
        winner.map(|rule| rule.message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits() -> Regex {
        Regex::new(r"^\d+$").unwrap()
    }

    #[test]
    fn required_rejects_blank() {
        let set = RuleSet::new().with_rule(Rule::required("needed"));
        assert_eq!(set.check("").as_deref(), Some("needed"));
        assert_eq!(set.check("   ").as_deref(), Some("needed"));
        assert_eq!(set.check("x"), None);
    }

    #[test]
    fn pattern_matches_untrimmed_text() {
        let set = RuleSet::new()
            .with_rule(Rule::required("needed"))
            .with_rule(Rule::pattern(digits(), "digits only"));
        assert_eq!(set.check("123"), None);
        assert_eq!(set.check(" 123").as_deref(), Some("digits only"));
    }

    #[test]
    fn pattern_and_custom_skip_empty_value() {
        let set = RuleSet::new()
            .with_rule(Rule::pattern(digits(), "digits only"))
            .with_rule(Rule::custom("never", |_| false, "always fails"));
        assert_eq!(set.check(""), None);
    }

    #[test]
    fn built_ins_are_evaluated_before_custom_rules() {
        let set = RuleSet::new()
            .with_rule(Rule::custom("short", |v| v.len() < 3, "too long"))
            .with_rule(Rule::pattern(digits(), "digits only"));
        let kinds: Vec<RuleKind> = set.rules().iter().map(Rule::kind).collect();
        assert_eq!(kinds, vec![RuleKind::Pattern, RuleKind::Custom]);
        // both fail; the custom rule runs last and wins
        assert_eq!(set.check("abcd").as_deref(), Some("too long"));
    }

    #[test]
    fn custom_rules_keep_declaration_order() {
        let set = RuleSet::new()
            .with_rule(Rule::custom("a", |_| false, "first"))
            .with_rule(Rule::custom("b", |_| false, "second"));
        assert_eq!(set.check("x").as_deref(), Some("second"));
    }

    #[test]
    fn first_failure_precedence_reports_earliest_rule() {
        let set = RuleSet::new()
            .with_precedence(Precedence::FirstFailure)
            .with_rule(Rule::custom("a", |_| false, "first"))
            .with_rule(Rule::custom("b", |_| false, "second"));
        assert_eq!(set.check("x").as_deref(), Some("first"));
    }

    #[test]
    fn transcoded_required_uses_converted_value() {
        let set = RuleSet::new()
            .with_transcode(Transcode::Number)
            .with_rule(Rule::required("number needed"));
        assert_eq!(set.check("0"), None);
        assert_eq!(set.check("abc").as_deref(), Some("number needed"));
    }
}
