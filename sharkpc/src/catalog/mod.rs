//! Component Catalog
//!
//! Static lookup of purchasable parts. The catalog is immutable once built;
//! the selection and the build registry hold clones of its entries.
//!
//! # Usage
//!
//! ```rust
//! use sharkpc::catalog::{Catalog, CatalogQuery, ComponentType, SortKey};
//!
//! let catalog = Catalog::builtin();
//! let gpus = catalog.query(&CatalogQuery {
//!     component_type: Some(ComponentType::Gpu),
//!     sort: Some(SortKey::Price),
//!     ..Default::default()
//! });
//! assert_eq!(gpus[0].id, "gpu2");
//! ```

pub mod builtin;
pub mod schema;

pub use builtin::{builtin_components, load_components_from_file};
pub use schema::{Component, ComponentType, UnknownComponentType};

use crate::core::SharkPcError;
use std::collections::HashSet;
use std::path::Path;

/// Ordering offered by the component picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Cheapest first.
    Price,
    Name,
}

/// Filter for [`Catalog::query`]. Empty query returns the whole catalog in
/// catalog order.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub component_type: Option<ComponentType>,
    /// Case-insensitive substring of the component name.
    pub text: Option<String>,
    pub sort: Option<SortKey>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    components: Vec<Component>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn from_components(components: Vec<Component>) -> Result<Self, SharkPcError> {
        let mut seen = HashSet::new();
        for component in &components {
            if !seen.insert(component.id.as_str()) {
                return Err(SharkPcError::DuplicateComponent(component.id.clone()));
            }
        }
        Ok(Self { components })
    }

    /// The catalog compiled into the crate.
    pub fn builtin() -> Self {
        Self {
            components: builtin_components(),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, SharkPcError> {
        Self::from_components(load_components_from_file(path)?)
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn by_type(&self, component_type: ComponentType) -> impl Iterator<Item = &Component> {
        self.components
            .iter()
            .filter(move |c| c.component_type == component_type)
    }

    pub fn query(&self, query: &CatalogQuery) -> Vec<&Component> {
        let needle = query.text.as_ref().map(|t| t.trim().to_lowercase());
        let mut matches: Vec<&Component> = self
            .components
            .iter()
            .filter(|c| query.component_type.map_or(true, |t| c.component_type == t))
            .filter(|c| match needle {
                Some(ref n) if !n.is_empty() => c.name.to_lowercase().contains(n.as_str()),
                _ => true,
            })
            .collect();

        match query.sort {
            Some(SortKey::Price) => matches.sort_by_key(|c| c.price),
            Some(SortKey::Name) => matches.sort_by(|a, b| a.name.cmp(&b.name)),
            None => {}
        }
        matches
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
