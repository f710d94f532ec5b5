//! String interning for identifiers and keywords.
//!
//! Every distinct byte string interned through an [`Interner`] gets one
//! canonical [`Name`] handle. Two handles from the same interner compare
//! equal if and only if their underlying text is equal, so the rest of the
//! front end compares names with a cheap integer comparison instead of
//! byte-by-byte.

use rustc_hash::FxHashMap;

use crate::buf::Buf;

/// Canonical handle for an interned string.
///
/// Handles are only meaningful together with the [`Interner`] that produced
/// them; the interner owns the text for its whole lifetime and never frees
/// entries individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Name(u32);

impl Name {
    /// Index of this name in its interner, in interning order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Deduplicating table of identifier/keyword strings.
///
/// An explicit context object rather than process-wide state: each
/// independent parse owns (or is lent) one `Interner`, and concurrency
/// reduces to not sharing one across threads.
#[derive(Debug, Default)]
pub struct Interner {
    lookup: FxHashMap<String, Name>,
    entries: Buf<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `text`, returning the canonical handle for its content.
    ///
    /// The first interning of a given string stores a copy; every later
    /// interning of equal content returns the same handle.
    pub fn intern(&mut self, text: &str) -> Name {
        if let Some(&name) = self.lookup.get(text) {
            return name;
        }

        let name = Name(self.entries.len() as u32);
        self.entries.push(text.to_string());
        self.lookup.insert(text.to_string(), name);
        name
    }

    /// Canonical text for a previously interned handle.
    ///
    /// # Panics
    ///
    /// Panics if `name` did not come from this interner.
    pub fn resolve(&self, name: Name) -> &str {
        &self.entries[name.index()]
    }

    /// Number of distinct strings interned so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
