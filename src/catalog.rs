use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Purchasable item in the static catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Item {
    pub id: String,
    pub name: String,
    /// Price in off-chain credit base units
    pub price: u64,
}

/// Read-only item catalog. The catalog itself is static data maintained
/// outside this service; the ledger only consults it for purchase prices.
#[derive(Debug, Default)]
pub(crate) struct ItemCatalog {
    items: Vec<Item>,
}

impl ItemCatalog {
    pub(crate) fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Load from a JSON file: an array of `{ id, name, price }` objects
    pub(crate) fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read item catalog from {}", path.display()))?;
        let items: Vec<Item> =
            serde_json::from_str(&raw).context("Failed to parse item catalog JSON")?;
        info!(count = items.len(), path = %path.display(), "Loaded item catalog");
        Ok(Self::new(items))
    }

    /// Built-in demo catalog used when no catalog file is configured
    pub(crate) fn builtin() -> Self {
        Self::new(vec![
            Item {
                id: "starter-blade".to_string(),
                name: "Starter Blade".to_string(),
                price: 200,
            },
            Item {
                id: "scout-drone".to_string(),
                name: "Scout Drone".to_string(),
                price: 350,
            },
            Item {
                id: "shield-booster".to_string(),
                name: "Shield Booster".to_string(),
                price: 500,
            },
        ])
    }

    pub(crate) fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub(crate) fn items(&self) -> &[Item] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        let catalog = ItemCatalog::builtin();
        assert_eq!(catalog.get("starter-blade").unwrap().price, 200);
        assert!(catalog.get("no-such-item").is_none());
    }

    #[test]
    fn test_from_json() {
        let items: Vec<Item> =
            serde_json::from_str(r#"[{"id": "x", "name": "X", "price": 10}]"#).unwrap();
        let catalog = ItemCatalog::new(items);
        assert_eq!(catalog.items().len(), 1);
        assert_eq!(catalog.get("x").unwrap().name, "X");
    }
}
