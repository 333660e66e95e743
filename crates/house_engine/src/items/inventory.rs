//! Player inventory

/// Insertion-ordered item identifiers; duplicates allowed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<String>,
}

impl Inventory {
    /// Empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item
    pub fn add(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// Remove the first instance of `item`, returning whether one was held
    pub fn remove(&mut self, item: &str) -> bool {
        match self.items.iter().position(|held| held == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether at least one instance of `item` is held
    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|held| held == item)
    }

    /// Items in pickup order
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of held items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is held
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_takes_first_duplicate() {
        let mut inventory = Inventory::new();
        inventory.add("ball");
        inventory.add("key");
        inventory.add("ball");

        assert!(inventory.remove("ball"));
        assert_eq!(inventory.items(), ["key", "ball"]);
        assert!(!inventory.remove("torus"));
        assert_eq!(inventory.len(), 2);
    }
}
