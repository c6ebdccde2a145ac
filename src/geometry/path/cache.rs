//! Parsed-path cache shared between workers.

use super::{PathCommand, parse};
use crate::common::error::Result;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Parsed path commands keyed by their source text.
///
/// Lookups take a read lock; a miss parses outside any lock and then inserts.
/// Two workers missing on the same key both parse and the later insert
/// overwrites an identical value. Parse errors are not cached.
#[derive(Debug, Default)]
pub struct PathCache {
    entries: RwLock<HashMap<String, Arc<[PathCommand]>>>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, source: &str) -> Option<Arc<[PathCommand]>> {
        self.entries.read().get(source).cloned()
    }

    pub fn get_or_parse(&self, source: &str) -> Result<Arc<[PathCommand]>> {
        if let Some(hit) = self.get(source) {
            return Ok(hit);
        }
        let parsed: Arc<[PathCommand]> = parse(source)?.into();
        self.entries
            .write()
            .insert(source.to_string(), Arc::clone(&parsed));
        Ok(parsed)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
