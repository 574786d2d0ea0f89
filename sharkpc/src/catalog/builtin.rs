//! Built-in and external component data
//!
//! The default catalog is compiled into the binary from `data/components.json`.
//! A replacement catalog can be loaded from any JSON file with the same shape
//! (an array of components).

use crate::catalog::schema::Component;
use crate::core::SharkPcError;
use std::path::Path;

const EMBEDDED_COMPONENTS: &str = include_str!("../../data/components.json");

/// Components shipped with the crate.
pub fn builtin_components() -> Vec<Component> {
    match serde_json::from_str::<Vec<Component>>(EMBEDDED_COMPONENTS) {
        Ok(components) => components,
        Err(e) => {
            tracing::warn!("Failed to parse embedded component catalog: {}", e);
            Vec::new()
        }
    }
}

/// Load a component list from a JSON file.
pub fn load_components_from_file(path: &Path) -> Result<Vec<Component>, SharkPcError> {
    let content = std::fs::read_to_string(path)?;
    let components: Vec<Component> = serde_json::from_str(&content)
        .map_err(|e| SharkPcError::Parse(format!("{}: {}", path.display(), e)))?;
    tracing::info!(
        "Loaded {} components from {}",
        components.len(),
        path.display()
    );
    Ok(components)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::schema::ComponentType;

    #[test]
    fn test_embedded_catalog_parses() {
        let components = builtin_components();
        assert_eq!(components.len(), 10);
        assert!(components
            .iter()
            .any(|c| c.id == "psu1" && c.component_type == ComponentType::Psu && c.power == Some(750)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_components_from_file(Path::new("/nonexistent/components.json"))
            .unwrap_err();
        assert!(matches!(err, SharkPcError::Io(_)));
    }
}
