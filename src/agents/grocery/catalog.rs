//! Grocery catalog and recipe bundles.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// On-disk layouts accepted for the catalog file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Bare(Vec<CatalogItem>),
    Full {
        #[serde(default)]
        items: Vec<CatalogItem>,
        #[serde(default)]
        recipes: BTreeMap<String, Vec<String>>,
    },
}

impl Default for CatalogFile {
    fn default() -> Self {
        CatalogFile::Bare(Vec::new())
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub items: Vec<CatalogItem>,
    /// Recipe name -> catalog item names
    pub recipes: BTreeMap<String, Vec<String>>,
}

impl Catalog {
    /// Load the catalog file; a missing file yields an empty catalog.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(store::load_or_default::<CatalogFile>(path, "Catalog")?.into())
    }

    pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(serde_json::from_value::<CatalogFile>(value)?.into())
    }

    /// Case-insensitive lookup, falling back to a naive singular ("eggs" -> "egg").
    pub fn find(&self, name: &str) -> Option<&CatalogItem> {
        let wanted = normalize(name);
        let exact = self.items.iter().find(|i| normalize(&i.name) == wanted);
        exact.or_else(|| {
            let singular = wanted.strip_suffix("es").into_iter().chain(wanted.strip_suffix('s'));
            singular
                .filter(|s| !s.is_empty())
                .find_map(|s| self.items.iter().find(|i| normalize(&i.name) == s))
        })
    }

    /// Items in a category (case-insensitive), or all items
    pub fn in_category(&self, category: Option<&str>) -> Vec<&CatalogItem> {
        match category.map(normalize) {
            Some(wanted) => self
                .items
                .iter()
                .filter(|i| i.category.as_deref().map(normalize).as_deref() == Some(wanted.as_str()))
                .collect(),
            None => self.items.iter().collect(),
        }
    }

    pub fn recipe(&self, name: &str) -> Option<&Vec<String>> {
        let wanted = normalize(name);
        self.recipes
            .iter()
            .find(|(recipe, _)| normalize(recipe) == wanted)
            .map(|(_, items)| items)
    }
}

impl From<CatalogFile> for Catalog {
    fn from(file: CatalogFile) -> Self {
        match file {
            CatalogFile::Bare(items) => Catalog {
                items,
                recipes: BTreeMap::new(),
            },
            CatalogFile::Full { items, recipes } => Catalog { items, recipes },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Catalog {
        Catalog::from_value(json!({
            "items": [
                {"name": "Bread", "price": 40.0, "category": "Bakery"},
                {"name": "Peanut Butter", "price": 180.0, "category": "Pantry"},
                {"name": "Egg", "price": 7.5, "category": "Dairy", "unit": "piece"},
                {"name": "Tomato", "price": 30.0, "category": "Produce", "unit": "kg"}
            ],
            "recipes": {"Peanut Butter Sandwich": ["bread", "peanut butter", "jam"]}
        }))
        .unwrap()
    }

    #[test]
    fn test_find_case_insensitive() {
        assert_eq!(catalog().find("  bread ").unwrap().price, 40.0);
        assert!(catalog().find("caviar").is_none());
    }

    #[test]
    fn test_find_plural() {
        assert_eq!(catalog().find("eggs").unwrap().name, "Egg");
        assert_eq!(catalog().find("tomatoes").unwrap().name, "Tomato");
    }

    #[test]
    fn test_in_category() {
        let catalog = catalog();
        let dairy = catalog.in_category(Some("dairy"));
        assert_eq!(dairy.len(), 1);
        assert_eq!(dairy[0].name, "Egg");
        assert_eq!(catalog.in_category(None).len(), 4);
    }

    #[test]
    fn test_recipe_lookup() {
        let catalog = catalog();
        let items = catalog.recipe("peanut butter sandwich").unwrap();
        assert_eq!(items.len(), 3);
        assert!(catalog.recipe("pizza").is_none());
    }

    #[test]
    fn test_bare_layout_and_missing_file() {
        let catalog = Catalog::from_value(json!([{"name": "Milk", "price": 28}])).unwrap();
        assert_eq!(catalog.items[0].price, 28.0);
        assert!(catalog.recipes.is_empty());

        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Catalog::load(&dir.path().join("catalog.json")).unwrap(), Catalog::default());
    }
}
