//! Sparse field patches applied by storage backends.
//!
//! A [`SparsePatch`] lists only the fields a partial update explicitly
//! supplied, keyed by their persisted field name. Backends merge it into the
//! stored document; fields not listed are left untouched.

use serde_json::{Map, Value};

/// One `(persisted name, value)` pair in a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchField {
    pub name: &'static str,
    pub value: String,
}

/// Ordered set of field assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparsePatch {
    fields: Vec<PatchField>,
}

impl SparsePatch {
    pub fn new() -> Self {
        SparsePatch { fields: Vec::new() }
    }

    /// Appends `name = value` when `value` is present.
    pub fn push_present(&mut self, name: &'static str, value: Option<&String>) {
        if let Some(value) = value {
            self.fields.push(PatchField {
                name,
                value: value.clone(),
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatchField> {
        self.fields.iter()
    }

    /// Value assigned to `name`, if the patch touches it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Persisted names of every touched field, in patch order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Merges the patch into a JSON document, overwriting only listed fields.
    pub fn apply_to(&self, document: &mut Map<String, Value>) {
        for field in &self.fields {
            document.insert(field.name.to_string(), Value::String(field.value.clone()));
        }
    }
}
