use uuid::Uuid;

use crate::types::builder::{ParamEntry, ParamPatch, SnapshotParam};
use crate::types::errors::ParamError;

/// Trait defining the parameter row store interface.
pub trait ParamStoreTrait {
    fn add(&mut self, seed: Option<SnapshotParam>) -> String;
    fn remove(&mut self, id: &str) -> Result<(), ParamError>;
    fn remove_at(&mut self, position: usize) -> Result<(), ParamError>;
    fn update(&mut self, id: &str, patch: ParamPatch) -> Result<(), ParamError>;
    fn update_at(&mut self, position: usize, patch: ParamPatch) -> Result<(), ParamError>;
    fn get(&self, id: &str) -> Option<&ParamEntry>;
    fn entries(&self) -> &[ParamEntry];
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
    fn replace_all(&mut self, seeds: Vec<SnapshotParam>);
}

/// In-memory ordered store of parameter rows.
///
/// Row order is the vector order and determines query-string order. Keys need
/// not be unique across rows.
pub struct ParamStore {
    entries: Vec<ParamEntry>,
}

impl ParamStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn find_index(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    fn entry_from_seed(seed: SnapshotParam) -> ParamEntry {
        ParamEntry {
            id: Uuid::new_v4().to_string(),
            key: seed.key,
            value: seed.value,
            encode: seed.encode,
        }
    }

    fn apply_patch(entry: &mut ParamEntry, patch: ParamPatch) {
        if let Some(key) = patch.key {
            entry.key = key;
        }
        if let Some(value) = patch.value {
            entry.value = value;
        }
        if let Some(encode) = patch.encode {
            entry.encode = encode;
        }
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamStoreTrait for ParamStore {
    /// Append a new row, optionally seeded with initial values.
    /// A row added without a seed starts empty with `encode = true`.
    /// Returns the new row's ID.
    fn add(&mut self, seed: Option<SnapshotParam>) -> String {
        let entry = Self::entry_from_seed(seed.unwrap_or_default());
        let id = entry.id.clone();
        self.entries.push(entry);
        id
    }

    /// Remove the row with the given ID. Later rows shift down.
    fn remove(&mut self, id: &str) -> Result<(), ParamError> {
        let idx = self
            .find_index(id)
            .ok_or_else(|| ParamError::NotFound(id.to_string()))?;
        self.entries.remove(idx);
        Ok(())
    }

    /// Remove the row at the given position. Later rows shift down.
    fn remove_at(&mut self, position: usize) -> Result<(), ParamError> {
        if position >= self.entries.len() {
            return Err(ParamError::InvalidIndex(position));
        }
        self.entries.remove(position);
        Ok(())
    }

    /// Apply a partial update to the row with the given ID.
    fn update(&mut self, id: &str, patch: ParamPatch) -> Result<(), ParamError> {
        let idx = self
            .find_index(id)
            .ok_or_else(|| ParamError::NotFound(id.to_string()))?;
        Self::apply_patch(&mut self.entries[idx], patch);
        Ok(())
    }

    /// Apply a partial update to the row at the given position.
    fn update_at(&mut self, position: usize, patch: ParamPatch) -> Result<(), ParamError> {
        if position >= self.entries.len() {
            return Err(ParamError::InvalidIndex(position));
        }
        Self::apply_patch(&mut self.entries[position], patch);
        Ok(())
    }

    fn get(&self, id: &str) -> Option<&ParamEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    fn entries(&self) -> &[ParamEntry] {
        &self.entries
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace all rows with the given seeds, in order.
    /// An empty seed list leaves a single blank row so the form always has
    /// something to edit.
    fn replace_all(&mut self, seeds: Vec<SnapshotParam>) {
        self.entries = seeds.into_iter().map(Self::entry_from_seed).collect();
        if self.entries.is_empty() {
            self.add(None);
        }
    }
}
