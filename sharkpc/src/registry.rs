//! Community Build Registry
//!
//! Pre-assembled builds with a like counter. Total price and the
//! compatibility flag are stored as published and never re-derived from the
//! component list.

use crate::catalog::{Catalog, Component};
use crate::core::SharkPcError;
use serde::{Deserialize, Serialize};

const EMBEDDED_BUILDS: &str = include_str!("../data/builds.json");

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Build {
    pub id: String,
    pub name: String,
    pub author: String,
    pub likes: u64,
    pub components: Vec<Component>,
    pub total_price: u64,
    pub is_compatible: bool,
}

impl Build {
    /// First `n` components and how many are left out.
    pub fn preview(&self, n: usize) -> (&[Component], usize) {
        let shown = n.min(self.components.len());
        (&self.components[..shown], self.components.len() - shown)
    }
}

/// Seed record: components are catalog ids resolved on load.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildSeed {
    pub id: String,
    pub name: String,
    pub author: String,
    pub likes: u64,
    pub components: Vec<String>,
    pub total_price: u64,
    pub is_compatible: bool,
}

impl BuildSeed {
    fn resolve(self, catalog: &Catalog) -> Result<Build, SharkPcError> {
        let components = self
            .components
            .iter()
            .map(|id| {
                catalog
                    .get(id)
                    .cloned()
                    .ok_or_else(|| SharkPcError::UnknownBuildComponent {
                        build: self.id.clone(),
                        component: id.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Build {
            id: self.id,
            name: self.name,
            author: self.author,
            likes: self.likes,
            components,
            total_price: self.total_price,
            is_compatible: self.is_compatible,
        })
    }
}

/// Builds kept in descending like order. Re-sorting is stable, so ties keep
/// the order they had after the previous sort.
#[derive(Debug, Clone, Default)]
pub struct BuildRegistry {
    builds: Vec<Build>,
}

impl BuildRegistry {
    pub fn new(builds: Vec<Build>) -> Self {
        let mut registry = Self { builds };
        registry.resort();
        registry
    }

    pub fn from_seeds(seeds: Vec<BuildSeed>, catalog: &Catalog) -> Result<Self, SharkPcError> {
        let builds = seeds
            .into_iter()
            .map(|seed| seed.resolve(catalog))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(builds))
    }

    /// Seed builds shipped with the crate, resolved against `catalog`.
    pub fn builtin(catalog: &Catalog) -> Result<Self, SharkPcError> {
        let seeds: Vec<BuildSeed> = serde_json::from_str(EMBEDDED_BUILDS)
            .map_err(|e| SharkPcError::Parse(format!("embedded builds: {}", e)))?;
        Self::from_seeds(seeds, catalog)
    }

    /// All builds, most liked first.
    pub fn list(&self) -> &[Build] {
        &self.builds
    }

    pub fn get(&self, build_id: &str) -> Option<&Build> {
        self.builds.iter().find(|b| b.id == build_id)
    }

    /// Add one like. Returns the new count, or `None` for an unknown id.
    /// Repeated likes are not de-duplicated.
    pub fn like(&mut self, build_id: &str) -> Option<u64> {
        let build = self.builds.iter_mut().find(|b| b.id == build_id)?;
        build.likes = build.likes.saturating_add(1);
        let likes = build.likes;
        tracing::info!("Build {} now has {} likes", build_id, likes);
        self.resort();
        Some(likes)
    }

    pub fn len(&self) -> usize {
        self.builds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }

    fn resort(&mut self) {
        self.builds.sort_by(|a, b| b.likes.cmp(&a.likes));
    }
}
