//! The tag facet — the capability every taggable value exposes.

/// Query, add and remove string tags.
///
/// Implementations follow the [`TagSet`](crate::TagSet) contract: an empty
/// tag list always yields `false` without mutating anything, `add_tags`
/// reports whether at least one tag was new, and `remove_tags` whether at
/// least one tag was present.
///
/// The trait is object safe so a resolver can hand out `&mut dyn Taggable`
/// for whatever backs a target. Plain structs usually get it through
/// `#[derive(Taggable)]`:
///
/// ```
/// use bevy_tagging::{TagSet, Taggable};
///
/// #[derive(Default, Taggable)]
/// struct Crate {
///     label: String,
///     tags: TagSet,
/// }
///
/// let mut item = Crate::default();
/// assert!(item.add_tags(&["Loot"]));
/// assert!(item.is_tagged(&["Loot"]));
/// ```
pub trait Taggable {
    /// `true` iff `tags` is non-empty and every tag is present.
    fn is_tagged(&self, tags: &[&str]) -> bool;

    /// Returns `true` iff at least one tag was newly added.
    fn add_tags(&mut self, tags: &[&str]) -> bool;

    /// Returns `true` iff at least one tag was present and removed.
    fn remove_tags(&mut self, tags: &[&str]) -> bool;
}
