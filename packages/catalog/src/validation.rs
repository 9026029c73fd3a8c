//! Declarative per-field validation and sanitization of submitted forms.
//!
//! Each form is described by a static table of [`FieldRules`]: a field name
//! plus an ordered list of [`Rule`]s. Sanitizers rewrite the value in place and
//! always run; after a field's first failed check its later checks are skipped.
//! Every field is always visited, so a single submission reports all of its
//! problems at once.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// A single step in a field's chain.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Strip leading and trailing whitespace.
    Trim,
    /// Replace HTML-significant characters with entities.
    Escape,
    /// Require at least `n` characters.
    MinLength(usize, &'static str),
    /// Allow at most `n` characters.
    MaxLength(usize, &'static str),
    /// ASCII letters and digits only.
    Alphanumeric(&'static str),
    /// Decimal integer, used for references to other records.
    Numeric(&'static str),
    /// ISO-8601 date or timestamp; normalized to `YYYY-MM-DD`.
    IsoDate(&'static str),
    /// Value must be one of the listed strings.
    OneOf(&'static [&'static str], &'static str),
}

/// The rule chain for one form field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    /// Empty input counts as "not provided" and skips the chain.
    pub optional: bool,
    /// The field may repeat; every submitted value runs through the chain.
    pub multiple: bool,
    pub rules: &'static [Rule],
}

impl FieldRules {
    pub const fn required(field: &'static str, rules: &'static [Rule]) -> Self {
        Self {
            field,
            optional: false,
            multiple: false,
            rules,
        }
    }

    pub const fn optional(field: &'static str, rules: &'static [Rule]) -> Self {
        Self {
            field,
            optional: true,
            multiple: false,
            rules,
        }
    }

    pub const fn each(field: &'static str, rules: &'static [Rule]) -> Self {
        Self {
            field,
            optional: true,
            multiple: true,
            rules,
        }
    }
}

/// A field-level validation failure, shown next to the re-rendered form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub value: String,
}

/// Raw `application/x-www-form-urlencoded` pairs, in submission order.
#[derive(Debug, Clone, Default)]
pub struct FormData(Vec<(String, String)>);

impl FormData {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value submitted for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Sanitized values plus every error found.
#[derive(Debug, Clone, Default)]
pub struct Validated {
    values: BTreeMap<&'static str, Vec<String>>,
    errors: Vec<FieldError>,
}

impl Validated {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Sanitized value of a single-valued field, or `""`.
    pub fn value(&self, field: &str) -> &str {
        self.values
            .get(field)
            .and_then(|v| v.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn values(&self, field: &str) -> &[String] {
        self.values.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Date value of an [`Rule::IsoDate`] field; `None` when absent or invalid.
    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.value(field), "%Y-%m-%d").ok()
    }

    /// Integer value of a [`Rule::Numeric`] field.
    pub fn id(&self, field: &str) -> Option<i32> {
        self.value(field).parse().ok()
    }

    pub fn ids(&self, field: &str) -> Vec<i32> {
        self.values(field)
            .iter()
            .filter_map(|v| v.parse().ok())
            .collect()
    }
}

/// Run every field's chain against `form`.
pub fn validate(form: &FormData, table: &[FieldRules]) -> Validated {
    let mut out = Validated::default();

    for entry in table {
        let raw: Vec<&str> = if entry.multiple {
            form.get_all(entry.field)
        } else {
            vec![form.get(entry.field).unwrap_or("")]
        };

        let mut sanitized = Vec::with_capacity(raw.len());
        for input in raw {
            let (value, error) = run_chain(entry, input);
            if let Some(message) = error {
                out.errors.push(FieldError {
                    field: entry.field.to_string(),
                    message: message.to_string(),
                    value: value.clone(),
                });
            }
            sanitized.push(value);
        }
        out.values.insert(entry.field, sanitized);
    }

    out
}

/// Sanitizers always run; after the first failed check, later checks are skipped.
fn run_chain(entry: &FieldRules, input: &str) -> (String, Option<&'static str>) {
    let mut value = input.to_string();
    if entry.optional && value.is_empty() {
        return (value, None);
    }

    let mut error = None;
    for rule in entry.rules {
        let failed = match *rule {
            Rule::Trim => {
                value = value.trim().to_string();
                None
            }
            Rule::Escape => {
                value = escape(&value);
                None
            }
            _ if error.is_some() => None,
            Rule::MinLength(n, msg) => (value.chars().count() < n).then_some(msg),
            Rule::MaxLength(n, msg) => (value.chars().count() > n).then_some(msg),
            Rule::Alphanumeric(msg) => {
                (value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric()))
                    .then_some(msg)
            }
            Rule::Numeric(msg) => value.parse::<i32>().is_err().then_some(msg),
            Rule::IsoDate(msg) => match parse_iso_date(&value) {
                Some(date) => {
                    value = date.format("%Y-%m-%d").to_string();
                    None
                }
                None => Some(msg),
            },
            Rule::OneOf(allowed, msg) => (!allowed.contains(&value.as_str())).then_some(msg),
        };
        error = error.or(failed);
    }

    (value, error)
}

/// Replace characters with special meaning in HTML.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            other => out.push(other),
        }
    }
    out
}

/// Accepts calendar dates and timestamps; keeps only the date part.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|ts| ts.date())
}
