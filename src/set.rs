//! Tag set — exact-match string membership with batch add/remove.

use std::collections::HashSet;

use crate::facet::Taggable;

/// An unordered set of unique tags.
///
/// All batch operations fail closed: an empty tag list returns `false`
/// and leaves the set untouched. Empty strings are never stored.
///
/// # Example
///
/// ```
/// use bevy_tagging::TagSet;
///
/// let mut set = TagSet::new();
/// assert!(set.add(&["Player", "Hero"]));
/// assert!(!set.add(&["Player"])); // nothing new
/// assert!(set.contains_all(&["Player", "Hero"]));
/// assert!(!set.contains_all::<&str>(&[]));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: HashSet<String>,
}

impl TagSet {
    /// Create an empty tag set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` iff `tags` is non-empty and every tag is a member.
    pub fn contains_all<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        !tags.is_empty() && tags.iter().all(|t| self.contains(t.as_ref()))
    }

    /// Insert every tag. Returns `true` iff at least one was newly inserted.
    pub fn add<S: AsRef<str>>(&mut self, tags: &[S]) -> bool {
        let mut changed = false;
        for tag in tags {
            let tag = tag.as_ref();
            if !tag.is_empty() && !self.tags.contains(tag) {
                self.tags.insert(tag.to_owned());
                changed = true;
            }
        }
        changed
    }

    /// Remove every tag. Returns `true` iff at least one was present.
    pub fn remove<S: AsRef<str>>(&mut self, tags: &[S]) -> bool {
        let mut changed = false;
        for tag in tags {
            changed |= self.tags.remove(tag.as_ref());
        }
        changed
    }

    /// Single-tag membership check.
    #[inline]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Iterate over all tags in arbitrary order.
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

    #[inline]
    pub fn clear(&mut self) {
        self.tags.clear();
    }
}

impl Taggable for TagSet {
    fn is_tagged(&self, tags: &[&str]) -> bool {
        self.contains_all(tags)
    }

    fn add_tags(&mut self, tags: &[&str]) -> bool {
        self.add(tags)
    }

    fn remove_tags(&mut self, tags: &[&str]) -> bool {
        self.remove(tags)
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for TagSet {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        self.tags
            .extend(iter.into_iter().map(Into::into).filter(|t| !t.is_empty()));
    }
}
