//! `Tags` — the default taggable component.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{facet::Taggable, set::TagSet};

/// Default tag holder, attachable to any entity.
///
/// Keeps two views in step: an ordered list (what an inspector shows and what
/// gets serialized) and a [`TagSet`] for membership checks. Every mutation
/// through [`Taggable`] updates both before returning.
///
/// Building from a list de-duplicates it by sorting and collapsing adjacent
/// equals, logging a warning for each duplicate dropped. The same happens on
/// deserialization.
///
/// ```
/// use bevy_tagging::{Taggable, Tags};
///
/// let mut tags = Tags::new(["Enemy", "Boss", "Enemy"]);
/// assert_eq!(tags.list(), ["Boss", "Enemy"]);
///
/// assert!(tags.add_one("Flying"));
/// assert!(tags.is_tagged(&["Enemy", "Flying"]));
/// ```
#[derive(Component, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Tags {
    list: Vec<String>,
    set: TagSet,
}

impl Tags {
    /// Build from a pre-populated list.
    pub fn new<S: Into<String>>(list: impl IntoIterator<Item = S>) -> Self {
        let mut list: Vec<String> = list.into_iter().map(Into::into).collect();
        list.retain(|tag| {
            if tag.is_empty() {
                tracing::warn!("dropping empty tag from tag list");
            }
            !tag.is_empty()
        });
        list.sort();
        list.dedup_by(|dup, kept| {
            let is_dup = dup == kept;
            if is_dup {
                tracing::warn!(tag = %dup, "removing duplicate tag from tag list");
            }
            is_dup
        });

        let set = list.iter().cloned().collect();
        Self { list, set }
    }

    /// Builder method: add a tag and return self.
    pub fn with(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.add_one(&tag);
        self
    }

    /// Add a single tag. Returns `true` if it was new.
    pub fn add_one(&mut self, tag: &str) -> bool {
        self.add_tags(&[tag])
    }

    /// Remove a single tag. Returns `true` if it was present.
    pub fn remove_one(&mut self, tag: &str) -> bool {
        self.remove_tags(&[tag])
    }

    /// Remove every tag.
    pub fn clear(&mut self) {
        self.list.clear();
        self.set.clear();
    }

    /// Tags in display order.
    #[inline]
    pub fn list(&self) -> &[String] {
        &self.list
    }

    #[inline]
    pub fn set(&self) -> &TagSet {
        &self.set
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl Taggable for Tags {
    fn is_tagged(&self, tags: &[&str]) -> bool {
        self.set.contains_all(tags)
    }

    fn add_tags(&mut self, tags: &[&str]) -> bool {
        let mut changed = false;
        for &tag in tags {
            if self.set.add(&[tag]) {
                self.list.push(tag.to_owned());
                changed = true;
            }
        }
        changed
    }

    fn remove_tags(&mut self, tags: &[&str]) -> bool {
        let mut changed = false;
        for &tag in tags {
            if self.set.remove(&[tag]) {
                self.list.retain(|t| t != tag);
                changed = true;
            }
        }
        changed
    }
}

impl From<Vec<String>> for Tags {
    fn from(list: Vec<String>) -> Self {
        Self::new(list)
    }
}

impl From<Tags> for Vec<String> {
    fn from(tags: Tags) -> Self {
        tags.list
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}
