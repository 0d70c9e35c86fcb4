//! Integer cells owned by the host program.
//!
//! Nodes never hold a reference to a cell. They keep a [`CellId`] and resolve it against the
//! store handed to them on every call.

use std::collections::BTreeMap;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(u32);

#[derive(Debug, Default, Clone)]
pub struct CellStore {
    names: BTreeMap<String, CellId>,
    cells: Vec<(String, i32)>,
}

impl CellStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cell, or overwrites the value of an existing cell with the same name.
    pub fn insert(&mut self, name: impl Into<String>, initial: i32) -> CellId {
        let name = name.into();
        if let Some(id) = self.names.get(&name).copied() {
            self.cells[id.0 as usize].1 = initial;
            return id;
        }

        let id = CellId(self.cells.len() as u32);
        self.cells.push((name.clone(), initial));
        self.names.insert(name, id);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<CellId> {
        self.names.get(name).copied()
    }

    pub fn get(&self, id: CellId) -> Option<i32> {
        self.cells.get(id.0 as usize).map(|(_, value)| *value)
    }

    /// Writes `value` and returns the previous one, or `None` if `id` belongs to another store.
    pub fn set(&mut self, id: CellId, value: i32) -> Option<i32> {
        let (_, cell) = self.cells.get_mut(id.0 as usize)?;
        Some(std::mem::replace(cell, value))
    }

    pub fn name(&self, id: CellId) -> Option<&str> {
        self.cells.get(id.0 as usize).map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), *value))
    }
}
