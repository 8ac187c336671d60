//! Lexeme Interner
//!
//! Bijective mapping from token content to small integer ids, so token
//! equality and hashing work on integers instead of strings.
//!
//! Ids are assigned monotonically from 0 and never reused. The interner is
//! an explicit shared service (`Arc<LexemeInterner>`): every tokenizer,
//! detector and preprocessor that needs content receives it at construction.
//!
//! # Concurrency
//!
//! - content → id: `DashMap` (sharded, lock held only for the entry)
//! - id → content: `RwLock<Vec<Arc<str>>>`, appended while the shard entry
//!   is held, so an id is always resolvable once `intern` returns it.

use crate::errors::{Result, SimcheckError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Interned token content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LexemeId(u32);

impl LexemeId {
    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LexemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Thread-safe lexeme interner
pub struct LexemeInterner {
    ids: DashMap<Arc<str>, LexemeId>,
    contents: RwLock<Vec<Arc<str>>>,
}

impl LexemeInterner {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: DashMap::with_capacity(capacity),
            contents: RwLock::new(Vec::with_capacity(capacity)),
        }
    }

    /// Create an interner ready to be shared between tokenizers and detectors
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Intern content, returning its id
    ///
    /// The first call for new content allocates the next id; later calls
    /// (from any thread) return the same id. Fails with `LexemeOverflow`
    /// once the id space is used up.
    pub fn intern(&self, content: &str) -> Result<LexemeId> {
        if let Some(id) = self.ids.get(content) {
            return Ok(*id);
        }

        let key: Arc<str> = Arc::from(content);
        match self.ids.entry(Arc::clone(&key)) {
            Entry::Occupied(entry) => Ok(*entry.get()),
            Entry::Vacant(entry) => {
                let mut contents = self.contents.write();
                let id = next_id(contents.len())?;
                contents.push(key);
                entry.insert(id);
                Ok(id)
            }
        }
    }

    /// Resolve an id back to its content
    pub fn resolve(&self, id: LexemeId) -> Result<Arc<str>> {
        self.contents
            .read()
            .get(id.index())
            .cloned()
            .ok_or(SimcheckError::UnknownLexeme(id.as_u32()))
    }

    /// Look up content without interning it
    pub fn get(&self, content: &str) -> Option<LexemeId> {
        self.ids.get(content).map(|id| *id)
    }

    /// Number of distinct lexemes
    pub fn len(&self) -> usize {
        self.contents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Id for the lexeme stored at position `len`
fn next_id(len: usize) -> Result<LexemeId> {
    u32::try_from(len)
        .map(LexemeId)
        .map_err(|_| SimcheckError::LexemeOverflow(len))
}

impl Default for LexemeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LexemeInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexemeInterner")
            .field("lexemes", &self.len())
            .finish()
    }
}
