use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(FieldErrors),
    #[error("database error: {0}")]
    Db(String),
}

/// Validation messages keyed by field name.
///
/// Fields are kept sorted so rendered messages come out in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self { Self::default() }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    /// Messages for one field; empty when the field is valid.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: &str, message: &str) -> bool {
        self.get(field).iter().any(|m| m == message)
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Messages prefixed with the humanized field name, e.g. `Name can't be blank`.
    pub fn full_messages(&self) -> Vec<String> {
        self.iter()
            .flat_map(|(field, msgs)| {
                let label = humanize(field);
                msgs.iter().map(move |m| format!("{label} {m}"))
            })
            .collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_messages().join(", "))
    }
}

fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_messages_per_field() {
        let mut errs = FieldErrors::new();
        errs.add("name", "can't be blank");
        errs.add("name", "is too short");
        errs.add("body", "can't be blank");
        assert_eq!(errs.iter().count(), 2);
        assert_eq!(errs.get("name").len(), 2);
        assert!(errs.contains("body", "can't be blank"));
        assert!(errs.get("created_at").is_empty());
    }

    #[test]
    fn full_messages_are_humanized_and_sorted() {
        let mut errs = FieldErrors::new();
        errs.add("name", "can't be blank");
        errs.add("body", "can't be blank");
        errs.add("published_at", "is invalid");
        assert_eq!(
            errs.full_messages(),
            vec!["Body can't be blank", "Name can't be blank", "Published at is invalid"]
        );
        assert_eq!(errs.to_string(), "Body can't be blank, Name can't be blank, Published at is invalid");
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut errs = FieldErrors::new();
        errs.add("name", "can't be blank");
        let json = serde_json::to_value(&errs).unwrap();
        assert_eq!(json, serde_json::json!({"name": ["can't be blank"]}));
    }
}
