//! Variable assignment table.

use std::collections::BTreeMap;

use crate::error::{DiagramError, Result};

/// Current value of each input switch, keyed by uppercase variable name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: BTreeMap<char, bool>,
}

impl Assignment {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value, if any.
    pub fn get(&self, name: char) -> Option<bool> {
        self.values.get(&name.to_ascii_uppercase()).copied()
    }

    /// Stored value, recording `false` for a name seen for the first time.
    pub fn get_or_default(&mut self, name: char) -> bool {
        *self.values.entry(name.to_ascii_uppercase()).or_insert(false)
    }

    /// Store a value.
    pub fn set(&mut self, name: char, value: bool) {
        self.values.insert(name.to_ascii_uppercase(), value);
    }

    /// Flip a value (unset counts as `false`) and return the new value.
    pub fn toggle(&mut self, name: char) -> bool {
        let value = self.values.entry(name.to_ascii_uppercase()).or_insert(false);
        *value = !*value;
        *value
    }

    /// Forget every value.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (char, bool)> + '_ {
        self.values.iter().map(|(&name, &value)| (name, value))
    }

    /// Parse a `NAME=VALUE` pair such as `A=1` or `b=false`.
    pub fn parse_pair(text: &str) -> Result<(char, bool)> {
        let invalid = || DiagramError::InvalidAssignment {
            text: text.to_string(),
        };

        let (name, value) = text.split_once('=').ok_or_else(invalid)?;
        let mut chars = name.trim().chars();
        let name = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => c.to_ascii_uppercase(),
            _ => return Err(invalid()),
        };
        let value = match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "on" => true,
            "0" | "false" | "off" => false,
            _ => return Err(invalid()),
        };
        Ok((name, value))
    }
}

impl FromIterator<(char, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (char, bool)>>(iter: I) -> Self {
        let mut assignment = Self::new();
        for (name, value) in iter {
            assignment.set(name, value);
        }
        assignment
    }
}
