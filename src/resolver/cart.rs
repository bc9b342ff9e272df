//! The operator's explicit tool selection

/// Ordered set of selected tool ids
///
/// Keeps insertion order so the resolved loadout is stable across runs. The cart is
/// never dependency-closed itself; see [`super::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    ids: Vec<String>,
}

impl Cart {
    /// Build a cart from ids, dropping repeats
    #[cfg(test)]
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cart = Self::default();
        for id in ids {
            cart.insert(id);
        }
        cart
    }

    /// Add an id; returns false if it was already selected
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove an id; returns false if it was not selected
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}
