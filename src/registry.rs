//! Tag registry — the project's ordered list of known tags.

use bevy::prelude::*;

/// Known tags, in registration order.
///
/// The registry is advisory: entities may carry tags that are not
/// registered. It feeds the [`TagPicker`](crate::TagPicker) and is usually
/// seeded from the constants generated by `bevy-tagging-build`.
#[derive(Resource, Clone, Debug, Default, PartialEq, Eq)]
pub struct TagRegistry {
    tags: Vec<String>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a tag list, skipping empty and repeated entries.
    pub fn from_tags<S: AsRef<str>>(tags: &[S]) -> Self {
        let mut registry = Self::new();
        for tag in tags {
            registry.register(tag.as_ref());
        }
        registry
    }

    /// Append a tag. Returns `false` if it is empty or already known.
    pub fn register(&mut self, tag: &str) -> bool {
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.tags.push(tag.to_owned());
        true
    }

    /// Remove a tag. Returns `true` if it was known.
    pub fn unregister(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    #[inline]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Position of `tag` in registration order.
    #[inline]
    pub fn index_of(&self, tag: &str) -> Option<usize> {
        self.tags.iter().position(|t| t == tag)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.tags.iter().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_registration_order() {
        let registry = TagRegistry::from_tags(&["Zeta", "Alpha", "", "Zeta"]);
        let tags: Vec<_> = registry.iter().collect();
        assert_eq!(tags, ["Zeta", "Alpha"]);
    }

    #[test]
    fn register_and_unregister() {
        let mut registry = TagRegistry::new();

        assert!(registry.register("A"));
        assert!(!registry.register("A"));
        assert_eq!(registry.index_of("A"), Some(0));

        assert!(registry.unregister("A"));
        assert!(!registry.unregister("A"));
        assert!(registry.is_empty());
    }
}
