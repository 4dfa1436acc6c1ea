use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Per-field validation messages, keyed by the input field name.
///
/// Resolvers collect every problem with a request before rejecting it, so
/// a client can show all messages at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`. A later message for the same field
    /// replaces the earlier one.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_message_replaces_earlier() {
        let mut errors = FieldErrors::new();
        errors.add("name", "Category name must not be empty");
        errors.add("name", "Category name already exists");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name"), Some("Category name already exists"));
    }

    #[test]
    fn test_display_lists_fields_in_order() {
        let mut errors = FieldErrors::new();
        errors.add("title", "required");
        errors.add("body", "required");

        assert_eq!(errors.to_string(), "body: required, title: required");
    }
}
