//! Marketplaces the configurator can hand a build over to.
//!
//! Search is not wired to any marketplace API yet: [`SearchRequest`] describes
//! what would be looked up and nothing is sent over the network.

use crate::selection::Selection;
use serde::{Deserialize, Serialize};

const EMBEDDED_MARKETPLACES: &str = include_str!("../data/marketplaces.json");

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Marketplace {
    pub id: String,
    pub name: String,
    /// Badge colour tag.
    pub color: String,
}

pub fn builtin_marketplaces() -> Vec<Marketplace> {
    match serde_json::from_str::<Vec<Marketplace>>(EMBEDDED_MARKETPLACES) {
        Ok(marketplaces) => marketplaces,
        Err(e) => {
            tracing::warn!("Failed to parse embedded marketplaces: {}", e);
            Vec::new()
        }
    }
}

pub fn find_marketplace<'a>(marketplaces: &'a [Marketplace], id: &str) -> Option<&'a Marketplace> {
    marketplaces.iter().find(|m| m.id == id)
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchRequest {
    pub marketplace: Marketplace,
    /// One query per selected component, in selection order.
    pub queries: Vec<String>,
}

impl SearchRequest {
    pub fn new(marketplace: &Marketplace, selection: &Selection) -> Self {
        Self {
            marketplace: marketplace.clone(),
            queries: selection.iter().map(|c| c.name.clone()).collect(),
        }
    }

    pub fn label(&self) -> String {
        format!("Find PC on {}", self.marketplace.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_builtin_marketplaces() {
        let marketplaces = builtin_marketplaces();
        let ids: Vec<_> = marketplaces.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["ozon", "wildberries", "yandex", "dns"]);
        assert_eq!(find_marketplace(&marketplaces, "dns").unwrap().name, "DNS");
        assert!(find_marketplace(&marketplaces, "ebay").is_none());
    }

    #[test]
    fn test_search_request() {
        let catalog = Catalog::builtin();
        let selection: Selection = ["gpu1", "cpu1"]
            .iter()
            .filter_map(|id| catalog.get(id).cloned())
            .collect();
        let marketplaces = builtin_marketplaces();
        let request = SearchRequest::new(&marketplaces[0], &selection);

        assert_eq!(request.queries, vec!["RTX 4070 Super", "Intel Core i7-13700K"]);
        assert_eq!(request.label(), "Find PC on Ozon");
    }
}
