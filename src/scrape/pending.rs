// src/scrape/pending.rs
//! Records still waiting for a listing match, keyed by normalized title.
//!
//! The set only shrinks: a key leaves through `take_match` (listing hit) or `drain`
//! (handed to the cascade), never both. When one candidate matches several keys the
//! longest overlap wins, then catalog order. Records carry their catalog position so
//! leftovers can be put back in catalog order. A record replaced by a later one with
//! the same key is kept aside as superseded.

use indexmap::IndexMap;

use crate::catalog::CatalogRecord;
use crate::ident::titles_match;

#[derive(Debug, Default)]
pub struct PendingSet {
    entries: IndexMap<String, (usize, CatalogRecord)>,
    superseded: Vec<(usize, CatalogRecord)>,
}

impl PendingSet {
    /// Seed from catalog order. Returns the set plus the records that cannot take part
    /// in matching (empty key), each with its catalog position. A later record with the
    /// same key replaces the earlier one in place.
    pub fn seed<I>(records: I) -> (Self, Vec<(usize, CatalogRecord)>)
    where
        I: IntoIterator<Item = CatalogRecord>,
    {
        let mut entries = IndexMap::new();
        let mut unkeyed = Vec::new();
        let mut superseded = Vec::new();
        for (pos, record) in records.into_iter().enumerate() {
            let key = record.key();
            if key.is_empty() {
                unkeyed.push((pos, record));
            } else if let Some(earlier) = entries.insert(key, (pos, record)) {
                superseded.push(earlier);
            }
        }
        (Self { entries, superseded }, unkeyed)
    }

    /// Remove and return the best pending record for a normalized candidate name.
    pub fn take_match(&mut self, candidate: &str) -> Option<(String, CatalogRecord)> {
        if candidate.is_empty() {
            return None;
        }
        let mut best: Option<(usize, usize)> = None;
        for (i, key) in self.entries.keys().enumerate() {
            if !titles_match(key, candidate) {
                continue;
            }
            let overlap = key.len().min(candidate.len());
            if best.is_none_or(|(_, b)| overlap > b) {
                best = Some((i, overlap));
            }
        }
        let (index, _) = best?;
        self.entries.shift_remove_index(index).map(|(key, (_, record))| (key, record))
    }

    /// Everything left with its catalog position. The set is empty afterwards.
    pub fn drain(&mut self) -> Vec<(usize, CatalogRecord)> {
        self.entries.drain(..).map(|(_, entry)| entry).collect()
    }

    /// Records dropped at seeding because a later record had the same key.
    pub fn superseded(&self) -> &[(usize, CatalogRecord)] {
        &self.superseded
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
