use crate::error::{EcorouteError, Result};
use crate::types::RoadMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The whole persisted data set: every stored map, keyed by id.
///
/// `BTreeMap` keeps iteration in ascending id order, which is what makes
/// the orchestrator's "first map evaluated wins ties" rule well-defined.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Model {
    pub version: Option<u32>,
    pub maps: BTreeMap<u32, RoadMap>,
}

/// JSON-file map store. The entire model lives in one file that is read
/// and rewritten whole on every operation; searches take a snapshot via
/// `read_all` and never touch the file afterwards.
pub struct MapStore {
    path: PathBuf,
}

impl MapStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// All stored maps in ascending id order. A missing or empty file
    /// reads as an empty model.
    pub fn read_all(&self) -> Result<Vec<RoadMap>> {
        Ok(self.read_model()?.maps.into_values().collect())
    }

    /// Store a map, assigning segment ids densely 1..N in storage order.
    ///
    /// A map with a known id replaces the stored one; otherwise a map
    /// whose name matches an existing map (case-insensitively) takes over
    /// that map's id, and anything else gets the next free id.
    pub fn save_map(&self, mut map: RoadMap) -> Result<RoadMap> {
        if map.name.trim().is_empty() {
            return Err(EcorouteError::Storage(
                "map name is required".to_string(),
            ));
        }

        for (i, segment) in map.segments.iter_mut().enumerate() {
            segment.id = i as u32 + 1;
        }

        let mut model = self.read_model()?;

        let id = match map.id {
            Some(id) => id,
            None => model
                .maps
                .values()
                .find(|existing| existing.name.eq_ignore_ascii_case(&map.name))
                .and_then(|existing| existing.id)
                .unwrap_or_else(|| next_id(&model)),
        };
        map.id = Some(id);

        model.maps.insert(id, map.clone());
        self.write_model(&model)?;

        Ok(map)
    }

    /// Remove every map whose name matches, ignoring ASCII case. Removing
    /// an absent name is a no-op.
    pub fn remove_by_name(&self, name: &str) -> Result<()> {
        let mut model = self.read_model()?;
        model
            .maps
            .retain(|_, map| !map.name.eq_ignore_ascii_case(name));
        self.write_model(&model)
    }

    fn read_model(&self) -> Result<Model> {
        if !self.path.exists() {
            return Ok(Model::default());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Model::default());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_model(&self, model: &Model) -> Result<()> {
        let json = serde_json::to_string(model)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

fn next_id(model: &Model) -> u32 {
    model.maps.keys().max().map(|id| id + 1).unwrap_or(1)
}
