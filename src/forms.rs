//! Submitted form data and per-field validation.
//!
//! A form arrives as flat `name -> string` pairs. Entities turn it into a
//! typed value with a [`Validator`], which collects every field error
//! instead of stopping at the first one, so a rejected form can be shown
//! back with all of its problems at once.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const REQUIRED: &str = "This field is required.";
pub const NOT_AN_INTEGER: &str = "Not a valid integer value.";
pub const INVALID_EMAIL: &str = "Invalid email address.";
pub const INVALID_URL: &str = "Invalid URL.";
pub const INVALID_TIME: &str = "Not a valid time value.";
pub const INVALID_DATE: &str = "Not a valid date value.";
pub const INVALID_CHOICE: &str = "Not a valid choice.";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

/// Raw form values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used when pre-populating a form from a record.
    pub fn with(mut self, field: &str, value: impl ToString) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl ToString) {
        self.0.insert(field.to_string(), value.to_string());
    }

    /// Trimmed value, `None` when absent or blank.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Reads typed values out of a [`FormData`], recording an error for each
/// field that fails its rule.
///
/// Failed fields yield `T::default()` so the caller can still build the
/// struct; [`Validator::finish`] discards it when any error was recorded.
pub struct Validator<'a> {
    form: &'a FormData,
    errors: FieldErrors,
}

impl<'a> Validator<'a> {
    pub fn new(form: &'a FormData) -> Self {
        Self {
            form,
            errors: FieldErrors::new(),
        }
    }

    pub fn required_text(&mut self, field: &str) -> String {
        match self.form.get(field) {
            Some(value) => value.to_string(),
            None => {
                self.errors.add(field, REQUIRED);
                String::new()
            }
        }
    }

    pub fn optional_text(&mut self, field: &str) -> Option<String> {
        self.form.get(field).map(str::to_string)
    }

    pub fn integer(&mut self, field: &str) -> i64 {
        let Some(raw) = self.present(field) else {
            return 0;
        };
        match raw.parse::<i64>() {
            Ok(n) => n,
            Err(_) => {
                self.errors.add(field, NOT_AN_INTEGER);
                0
            }
        }
    }

    /// Integer within `range`. `message` overrides the default range text.
    pub fn integer_in(
        &mut self,
        field: &str,
        range: RangeInclusive<i64>,
        message: Option<&str>,
    ) -> i64 {
        if self.form.get(field).is_none() {
            self.errors.add(field, REQUIRED);
            return 0;
        }
        let before = self.errors.contains(field);
        let n = self.integer(field);
        if !before && !self.errors.contains(field) && !range.contains(&n) {
            let text = message.map(str::to_string).unwrap_or_else(|| {
                format!(
                    "Number must be between {} and {}.",
                    range.start(),
                    range.end()
                )
            });
            self.errors.add(field, text);
            return 0;
        }
        n
    }

    pub fn email(&mut self, field: &str) -> String {
        let Some(raw) = self.present(field) else {
            return String::new();
        };
        if EMAIL_RE.is_match(raw) {
            raw.to_string()
        } else {
            self.errors.add(field, INVALID_EMAIL);
            String::new()
        }
    }

    /// Optional http(s) URL; blank is accepted as `None`.
    pub fn optional_url(&mut self, field: &str) -> Option<String> {
        let raw = self.form.get(field)?;
        match url::Url::parse(raw) {
            Ok(parsed)
                if matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some() =>
            {
                Some(raw.to_string())
            }
            _ => {
                self.errors.add(field, INVALID_URL);
                None
            }
        }
    }

    /// `HH:MM`, with `HH:MM:SS` also accepted.
    pub fn time(&mut self, field: &str) -> NaiveTime {
        let Some(raw) = self.present(field) else {
            return NaiveTime::default();
        };
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .unwrap_or_else(|_| {
                self.errors.add(field, INVALID_TIME);
                NaiveTime::default()
            })
    }

    /// `YYYY-MM-DD`.
    pub fn date(&mut self, field: &str) -> NaiveDate {
        let Some(raw) = self.present(field) else {
            return NaiveDate::default();
        };
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap_or_else(|_| {
            self.errors.add(field, INVALID_DATE);
            NaiveDate::default()
        })
    }

    /// One of `choices`, matched exactly.
    pub fn choice(&mut self, field: &str, choices: &[&str]) -> String {
        let Some(raw) = self.present(field) else {
            return String::new();
        };
        if choices.contains(&raw) {
            raw.to_string()
        } else {
            self.errors.add(field, INVALID_CHOICE);
            String::new()
        }
    }

    /// Radio-style `true` / `false`, case-insensitive.
    pub fn boolean(&mut self, field: &str) -> bool {
        let Some(raw) = self.present(field) else {
            return false;
        };
        match raw.to_ascii_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => {
                self.errors.add(field, INVALID_CHOICE);
                false
            }
        }
    }

    /// Returns `value` when every field passed.
    pub fn finish<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }

    fn present(&mut self, field: &str) -> Option<&'a str> {
        let form: &'a FormData = self.form;
        let value = form.get(field);
        if value.is_none() {
            self.errors.add(field, REQUIRED);
        }
        value
    }
}
