// SPDX-License-Identifier: MIT OR Apache-2.0
//! Append-only tables addressed by generation-checked integer handles.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Typed index into a [`HandleTable`].
///
/// The generation ties a handle to the table state it was issued from, so a
/// handle held across [`HandleTable::clear`] is rejected instead of aliasing
/// whatever was created afterwards.
pub struct Handle<T> {
    index: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn new(index: u32, generation: u32) -> Self {
        Self {
            index,
            generation,
            _marker: PhantomData,
        }
    }

    /// Position in the table, as seen by C callers
    pub fn index(self) -> u32 {
        self.index
    }
}

// Manual impls: derives would put bounds on `T`.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}@{})", self.index, self.generation)
    }
}

impl<T> fmt::Display for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

/// Error when resolving a handle
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandleError {
    /// Index past the end of the table
    #[error("no {kind} with handle {index} (table holds {len})")]
    OutOfRange {
        /// Table kind
        kind: &'static str,
        /// Index as given
        index: u32,
        /// Current table length
        len: usize,
    },

    /// Handle issued before the table was last cleared
    #[error("{kind} handle {index} is stale")]
    Stale {
        /// Table kind
        kind: &'static str,
        /// Index as given
        index: u32,
    },

    /// Every index below the C sentinel is taken
    #[error("{kind} table is full")]
    Full {
        /// Table kind
        kind: &'static str,
    },
}

/// Index for the entry after `len` existing ones; `u32::MAX` is never issued
fn next_index(len: usize) -> Option<u32> {
    u32::try_from(len).ok().filter(|index| *index < u32::MAX)
}

/// Growable, append-only collection of owned wrappers
#[derive(Debug)]
pub struct HandleTable<T> {
    kind: &'static str,
    entries: Vec<T>,
    generation: u32,
}

impl<T> HandleTable<T> {
    /// Create an empty table; `kind` names entries in errors and logs
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            generation: 0,
        }
    }

    /// Append a value and return its handle.
    ///
    /// Fails once the table holds `u32::MAX` entries, since the next index
    /// would be the C sentinel.
    pub fn push(&mut self, value: T) -> Result<Handle<T>, HandleError> {
        let index = next_index(self.entries.len()).ok_or(HandleError::Full { kind: self.kind })?;
        self.entries.push(value);
        Ok(Handle::new(index, self.generation))
    }

    fn check(&self, handle: Handle<T>) -> Result<usize, HandleError> {
        if handle.generation != self.generation {
            return Err(HandleError::Stale {
                kind: self.kind,
                index: handle.index,
            });
        }
        let index = handle.index as usize;
        if index >= self.entries.len() {
            return Err(HandleError::OutOfRange {
                kind: self.kind,
                index: handle.index,
                len: self.entries.len(),
            });
        }
        Ok(index)
    }

    /// Get an entry
    pub fn get(&self, handle: Handle<T>) -> Result<&T, HandleError> {
        let index = self.check(handle)?;
        Ok(&self.entries[index])
    }

    /// Get a mutable entry
    pub fn get_mut(&mut self, handle: Handle<T>) -> Result<&mut T, HandleError> {
        let index = self.check(handle)?;
        Ok(&mut self.entries[index])
    }

    /// Turn a raw index from a C caller into a handle of the current generation
    pub fn resolve(&self, index: u32) -> Result<Handle<T>, HandleError> {
        let handle = Handle::new(index, self.generation);
        self.check(handle)?;
        Ok(handle)
    }

    /// Iterate over entries with their handles
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        let generation = self.generation;
        self.entries
            .iter()
            .enumerate()
            .map(move |(i, value)| (Handle::new(i as u32, generation), value))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry and invalidate outstanding handles
    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation = self.generation.wrapping_add(1);
    }
}
