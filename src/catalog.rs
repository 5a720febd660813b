use std::collections::HashMap;

use crate::error::{RankError, Result};
use crate::items::Item;

/// Registry of all known loot, ungated rewards included. Item names are
/// globally unique; registration order is kept so iteration is deterministic.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<String, Item>,
    order: Vec<String>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, item: Item) -> Result<()> {
        if self.items.contains_key(&item.name) {
            return Err(RankError::DuplicateItem(item.name));
        }
        self.order.push(item.name.clone());
        self.items.insert(item.name.clone(), item);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Item> {
        self.items
            .get(name)
            .ok_or_else(|| RankError::UnknownItem(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Items in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.order.iter().map(|name| &self.items[name])
    }
}
