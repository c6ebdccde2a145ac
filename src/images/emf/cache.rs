//! Tile cache keyed by pattern configuration.

use super::pattern::{PatternConfig, PatternTile, create_tile_from};
use crate::common::error::Result;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Encoded tiles shared between workers for the lifetime of a run.
///
/// Tile creation is deterministic, so two workers racing on the same
/// configuration both encode it and the second insert replaces an identical
/// tile. Entries are never modified after insertion.
#[derive(Debug, Default)]
pub struct TileCache {
    tiles: RwLock<HashMap<PatternConfig, Arc<PatternTile>>>,
}

impl TileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, config: &PatternConfig) -> Option<Arc<PatternTile>> {
        self.tiles.read().get(config).cloned()
    }

    pub fn get_or_create(&self, config: &PatternConfig) -> Result<Arc<PatternTile>> {
        if let Some(hit) = self.get(config) {
            return Ok(hit);
        }
        let tile = Arc::new(create_tile_from(config)?);
        self.tiles.write().insert(*config, Arc::clone(&tile));
        Ok(tile)
    }

    pub fn len(&self) -> usize {
        self.tiles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::emf::pattern::{PatternKind, Rgb};
    use rayon::prelude::*;

    fn config(spacing: u32) -> PatternConfig {
        PatternConfig::new(PatternKind::Crosshatch { spacing }, 16, 16, Rgb::BLACK, Rgb::WHITE)
    }

    #[test]
    fn test_get_or_create() {
        let cache = TileCache::new();
        assert!(cache.get(&config(4)).is_none());
        let a = cache.get_or_create(&config(4)).unwrap();
        let b = cache.get_or_create(&config(4)).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        cache.get_or_create(&config(5)).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_failures_not_cached() {
        let cache = TileCache::new();
        assert!(cache.get_or_create(&config(0)).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_double_insert_identical() {
        let cache = TileCache::new();
        let tiles: Vec<_> = (0..16)
            .into_par_iter()
            .map(|i| cache.get_or_create(&config(2 + i % 2)).unwrap())
            .collect();
        for tile in &tiles {
            let expected = create_tile_from(tile.config()).unwrap();
            assert_eq!(tile.to_bytes(), expected.to_bytes());
        }
        assert_eq!(cache.len(), 2);
    }
}
