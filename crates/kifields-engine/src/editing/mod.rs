//! Ordered editing model over the parsed field list.
//!
//! A [`FieldList`] is built fresh from the notation, mutated in place
//! during an edit session, then serialized and discarded. Every operation
//! is total: out-of-range indices, empty names and duplicate names turn
//! the operation into a no-op rather than an error, so a caller can feed
//! user input straight through and only surface warnings where it wants
//! to.

use crate::models::Field;
use crate::parsing::parse_field_names;
use std::collections::{HashMap, HashSet};

/// Direction for single-step moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// The ordered list of fields being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList {
    fields: Vec<Field>,
}

impl FieldList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `field_names` value into an editable list. Empty or
    /// malformed input yields an empty list, which is a valid starting
    /// state (a fresh eeschema.json has no `field_names` key at all).
    pub fn parse(sexpr: &str) -> Self {
        Self {
            fields: parse_field_names(sexpr),
        }
    }

    pub fn from_fields(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Field names in order, for display and for the order export.
    pub fn names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    /// Swap the entry at `index` with its neighbour. Returns whether a
    /// swap happened; moving the first entry up, the last entry down, or
    /// an out-of-range index is a no-op.
    pub fn move_field(&mut self, index: usize, direction: Direction) -> bool {
        match direction {
            Direction::Up if index > 0 && index < self.fields.len() => {
                self.fields.swap(index - 1, index);
                true
            }
            Direction::Down if index + 1 < self.fields.len() => {
                self.fields.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    /// Append a new entry with no flags. Empty and already-present names
    /// are rejected; returns whether the entry was added so the caller
    /// can tell the user why nothing changed.
    pub fn add(&mut self, name: &str) -> bool {
        if name.is_empty() || self.fields.iter().any(|f| f.name == name) {
            return false;
        }
        self.fields.push(Field::new(name));
        true
    }

    /// Remove the entry at `index`. Out-of-range indices are a no-op;
    /// returns whether an entry was removed.
    pub fn remove(&mut self, index: usize) -> bool {
        if index < self.fields.len() {
            self.fields.remove(index);
            true
        } else {
            false
        }
    }

    /// Rebuild the list in the order given by `names`.
    ///
    /// Names already in the list keep their existing flags at their new
    /// position; names not in the list are added with none. Entries whose
    /// name does not appear in `names` are appended afterwards in their
    /// original relative order. Repeated names in the input are taken
    /// once.
    pub fn reorder_by_names<S: AsRef<str>>(&mut self, names: &[S]) {
        let flags_by_name: HashMap<&str, &str> = self
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.flags.as_str()))
            .collect();

        let mut reordered = Vec::with_capacity(self.fields.len().max(names.len()));
        let mut seen: HashSet<&str> = HashSet::new();
        for name in names {
            let name = name.as_ref();
            if !seen.insert(name) {
                continue;
            }
            let flags = flags_by_name.get(name).copied().unwrap_or("");
            reordered.push(Field::with_flags(name, flags));
        }
        for field in &self.fields {
            if !seen.contains(field.name.as_str()) {
                reordered.push(field.clone());
            }
        }

        self.fields = reordered;
    }

    /// Assemble the full `field_names` value: each entry's text between
    /// the fixed `(templatefields` ... `)` delimiters, nothing in
    /// between.
    pub fn to_sexpr(&self) -> String {
        let mut out = String::from("(templatefields");
        for field in &self.fields {
            out.push_str(&field.to_sexpr());
        }
        out.push(')');
        out
    }
}
