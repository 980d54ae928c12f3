//! Ordered list of extra phone numbers with stable per-entry identity.
//!
//! # Design
//! Each `ListEntry` gets a v4 UUID when it is created and keeps it for the
//! life of the form, so a renderer keyed by `id` never confuses entries after
//! an insertion or removal elsewhere. The list never holds zero entries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FormError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub id: Uuid,
    pub number: String,
}

impl ListEntry {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: number.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PhoneList {
    entries: Vec<ListEntry>,
}

impl PhoneList {
    /// One entry per initial number; an empty input yields a single blank entry.
    pub fn new<I, S>(initial: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries: Vec<ListEntry> = initial.into_iter().map(ListEntry::new).collect();
        if entries.is_empty() {
            entries.push(ListEntry::new(""));
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ListEntry> {
        self.entries.get(index)
    }

    /// Append a new entry. The id is returned so keyed renderers can track it.
    pub fn append(&mut self, number: impl Into<String>) -> Uuid {
        let entry = ListEntry::new(number);
        let id = entry.id;
        self.entries.push(entry);
        tracing::debug!(%id, len = self.entries.len(), "phone entry appended");
        id
    }

    /// Remove the entry at `index`, shifting later entries down.
    ///
    /// Any in-bounds index is accepted, including 0. Removing the only entry
    /// reinstates a fresh blank one.
    pub fn remove(&mut self, index: usize) -> Result<ListEntry, FormError> {
        self.bounds(index)?;
        let removed = self.entries.remove(index);
        if self.entries.is_empty() {
            self.entries.push(ListEntry::new(""));
        }
        tracing::debug!(id = %removed.id, index, len = self.entries.len(), "phone entry removed");
        Ok(removed)
    }

    pub fn set_number(&mut self, index: usize, number: impl Into<String>) -> Result<(), FormError> {
        self.bounds(index)?;
        self.entries[index].number = number.into();
        Ok(())
    }

    /// Whether the UI offers removal for `index`. The first entry is kept.
    pub fn is_removable(&self, index: usize) -> bool {
        index > 0 && index < self.entries.len()
    }

    fn bounds(&self, index: usize) -> Result<(), FormError> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(FormError::IndexOutOfBounds {
                index,
                len: self.entries.len(),
            })
        }
    }
}

impl Default for PhoneList {
    fn default() -> Self {
        Self::new([""])
    }
}
