//! Build selection state: the user's in-progress build.

use crate::catalog::{Component, ComponentType};
use serde::Serialize;

/// At most one component per [`ComponentType`], in the order they were added.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Selection {
    components: Vec<Component>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `component`, replacing any selected component of the same type.
    /// The new component goes to the end. Returns the replaced component.
    pub fn add(&mut self, component: Component) -> Option<Component> {
        let replaced = self
            .components
            .iter()
            .position(|c| c.component_type == component.component_type)
            .map(|index| self.components.remove(index));
        self.components.push(component);
        replaced
    }

    /// Remove the component with `component_id`. Unknown ids are ignored.
    pub fn remove(&mut self, component_id: &str) -> Option<Component> {
        let index = self.components.iter().position(|c| c.id == component_id)?;
        Some(self.components.remove(index))
    }

    pub fn get(&self, component_type: ComponentType) -> Option<&Component> {
        self.components
            .iter()
            .find(|c| c.component_type == component_type)
    }

    pub fn contains(&self, component_id: &str) -> bool {
        self.components.iter().any(|c| c.id == component_id)
    }

    pub fn total_price(&self) -> u64 {
        self.components.iter().map(|c| c.price).sum()
    }

    pub fn components(&self) -> &[Component] {
        &self.components
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

impl FromIterator<Component> for Selection {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for component in iter {
            selection.add(component);
        }
        selection
    }
}
