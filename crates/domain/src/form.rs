use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;
use storerate_core::{AppError, AppResult, FieldErrors};

/// Submitted form values keyed by field name.
pub type FormValues = BTreeMap<String, String>;

/// Rule condition whose default message can be overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleCondition {
    /// Value was empty or absent on a required field.
    Required,
    /// Value length was outside the configured bounds.
    Length,
}

/// One regular-expression check with the message reported when it fails.
#[derive(Debug, Clone)]
pub struct PatternCheck {
    regex: Regex,
    message: String,
}

impl PatternCheck {
    /// Compiles a pattern check. The pattern is searched, not anchored.
    pub fn new(pattern: &str, message: impl Into<String>) -> AppResult<Self> {
        let regex = Regex::new(pattern).map_err(|error| {
            AppError::Internal(format!("invalid field pattern '{pattern}': {error}"))
        })?;

        Ok(Self {
            regex,
            message: message.into(),
        })
    }

    /// Returns whether the value satisfies the pattern.
    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Declarative validation constraint for one form field.
///
/// Checks run in a fixed order (required, blank, length, patterns) and stop
/// at the first failure.
#[derive(Debug, Clone)]
pub struct FieldRule {
    label: String,
    required: bool,
    non_blank: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    patterns: Vec<PatternCheck>,
    custom_messages: BTreeMap<RuleCondition, String>,
}

impl FieldRule {
    /// Creates an optional, unconstrained rule for a field shown as `label`.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            required: false,
            non_blank: false,
            min_length: None,
            max_length: None,
            patterns: Vec::new(),
            custom_messages: BTreeMap::new(),
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Rejects values made only of whitespace with the required message.
    #[must_use]
    pub fn non_blank(mut self) -> Self {
        self.non_blank = true;
        self
    }

    /// Bounds the value length, inclusive on both ends.
    #[must_use]
    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    /// Sets the maximum value length.
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Sets the minimum value length.
    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Appends a pattern check.
    #[must_use]
    pub fn pattern(mut self, check: PatternCheck) -> Self {
        self.patterns.push(check);
        self
    }

    /// Replaces the default message for a condition.
    #[must_use]
    pub fn message(mut self, condition: RuleCondition, message: impl Into<String>) -> Self {
        self.custom_messages.insert(condition, message.into());
        self
    }

    /// Returns the field label used in messages.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns whether the field is required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the first violated check's message, if any.
    ///
    /// Empty optional values pass without further checks.
    #[must_use]
    pub fn check(&self, value: Option<&str>) -> Option<String> {
        let value = value.unwrap_or_default();
        if value.is_empty() {
            return self
                .required
                .then(|| self.message_for(RuleCondition::Required));
        }
        if self.non_blank && value.trim().is_empty() {
            return Some(self.message_for(RuleCondition::Required));
        }

        let length = value.chars().count();
        let too_short = self.min_length.is_some_and(|min| length < min);
        let too_long = self.max_length.is_some_and(|max| length > max);
        if too_short || too_long {
            return Some(self.message_for(RuleCondition::Length));
        }

        self.patterns
            .iter()
            .find(|check| !check.is_match(value))
            .map(|check| check.message().to_owned())
    }

    fn message_for(&self, condition: RuleCondition) -> String {
        if let Some(message) = self.custom_messages.get(&condition) {
            return message.clone();
        }

        let label = self.label.as_str();
        match condition {
            RuleCondition::Required => format!("{label} is required"),
            RuleCondition::Length => match (self.min_length, self.max_length) {
                (Some(min), Some(max)) => format!("{label} must be {min}-{max} characters"),
                (Some(min), None) => format!("{label} must be at least {min} characters"),
                (None, Some(max)) => format!("{label} must be at most {max} characters"),
                (None, None) => format!("{label} has an invalid length"),
            },
        }
    }
}

/// Rule table for one form, keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct FormRules {
    fields: BTreeMap<String, FieldRule>,
}

impl FormRules {
    /// Creates an empty rule table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the rule for a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.insert(name.into(), rule);
        self
    }

    /// Returns the rule for a field.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.get(name)
    }

    /// Returns the names of all ruled fields.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Validates values against every rule in this table.
    #[must_use]
    pub fn validate(&self, values: &FormValues) -> ValidationResult {
        validate(values, self)
    }

    /// Validates a single field, as done while the user edits it.
    #[must_use]
    pub fn validate_field(&self, name: &str, value: Option<&str>) -> Option<String> {
        self.fields.get(name).and_then(|rule| rule.check(value))
    }
}

/// Per-field error messages produced by validation.
///
/// An absent key means the field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult(FieldErrors);

impl ValidationResult {
    /// Returns whether every field passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the error message for a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Returns the number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sets or replaces the error for a field.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Removes the error for a field.
    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    /// Iterates `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// Converts a failing result into [`AppError::InvalidForm`].
    pub fn into_result(self) -> AppResult<()> {
        if self.is_valid() {
            return Ok(());
        }

        Err(AppError::InvalidForm(self.0))
    }
}

/// Validates `values` against `rules`.
///
/// Fields without a rule are ignored. Each ruled field reports at most one
/// message; fields are checked independently of each other.
#[must_use]
pub fn validate(values: &FormValues, rules: &FormRules) -> ValidationResult {
    let errors = rules
        .fields
        .iter()
        .filter_map(|(name, rule)| {
            rule.check(values.get(name).map(String::as_str))
                .map(|message| (name.clone(), message))
        })
        .collect();

    ValidationResult(errors)
}
