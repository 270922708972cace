//! Dispatch resolver — turns a target of any supported shape into a facet.
//!
//! Targets come in a fixed set of shapes, checked in priority order:
//!
//! 1. [`TagTarget::None`] — absent target, always `false`.
//! 2. [`TagTarget::Facet`] — a value that already implements [`Taggable`].
//! 3. [`TagTarget::Node`] — a scene node; its attached facet is looked up.
//! 4. [`TagTarget::Behavior`] — a behavior entity; resolved through its owner node.
//! 5. [`TagTarget::Opaque`] — anything else, always `false`.
//!
//! The scene graph is injected through [`SceneAccess`], implemented for
//! Bevy's [`World`] in [`scene`](crate::scene). Nothing here returns an error: a target that cannot be
//! resolved is an ordinary `false`.
//!
//! ## Attach policy
//!
//! Adding tags to a node without a facet attaches a default [`Tags`](crate::Tags)
//! component first. Queries and removals never attach. This asymmetry is
//! observable (a failed query leaves the node untouched) and is controlled
//! by [`AttachPolicy`].

use bevy::prelude::*;

use crate::{facet::Taggable, scene::SceneAccess};

// =============================================================================
// Targets
// =============================================================================

/// A tag operation target.
pub enum TagTarget<'a> {
    /// No target.
    None,
    /// A value implementing the facet directly.
    Facet(&'a mut dyn Taggable),
    /// A scene node.
    Node(Entity),
    /// A behavior attached to a scene node.
    Behavior(Entity),
    /// A value with no tag capability.
    Opaque,
}

impl<'a> From<&'a mut dyn Taggable> for TagTarget<'a> {
    fn from(facet: &'a mut dyn Taggable) -> Self {
        Self::Facet(facet)
    }
}

impl From<Entity> for TagTarget<'_> {
    fn from(node: Entity) -> Self {
        Self::Node(node)
    }
}

impl From<Option<Entity>> for TagTarget<'_> {
    fn from(node: Option<Entity>) -> Self {
        node.map_or(Self::None, Self::Node)
    }
}

impl std::fmt::Debug for TagTarget<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Facet(_) => f.write_str("Facet(..)"),
            Self::Node(e) => f.debug_tuple("Node").field(e).finish(),
            Self::Behavior(e) => f.debug_tuple("Behavior").field(e).finish(),
            Self::Opaque => f.write_str("Opaque"),
        }
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// When the resolver may attach a default facet to a node that has none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AttachPolicy {
    /// Attach on `add_tags` only. Queries and removals never attach.
    #[default]
    OnAdd,
    /// Never attach; nodes without a facet always yield `false`.
    Never,
}

/// Resolves targets and forwards tag operations to their facet.
///
/// ```
/// use bevy::prelude::*;
/// use bevy_tagging::{TagResolver, TagTarget, Tags};
///
/// let mut world = World::new();
/// let node = world.spawn_empty().id();
/// let resolver = TagResolver::default();
///
/// // Queries never attach anything.
/// assert!(!resolver.is_tagged(&world, TagTarget::Node(node), &["Enemy"]));
/// assert!(world.get::<Tags>(node).is_none());
///
/// // Adding attaches a `Tags` component on demand.
/// assert!(resolver.add_tags(&mut world, TagTarget::Node(node), &["Enemy"]));
/// assert!(resolver.is_tagged(&world, TagTarget::Node(node), &["Enemy"]));
/// ```
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TagResolver {
    policy: AttachPolicy,
}

impl TagResolver {
    pub const fn new(policy: AttachPolicy) -> Self {
        Self { policy }
    }

    #[inline]
    pub fn policy(&self) -> AttachPolicy {
        self.policy
    }

    /// `true` iff the target resolves to a facet carrying every tag.
    pub fn is_tagged<S: SceneAccess + ?Sized>(
        &self,
        scene: &S,
        target: TagTarget<'_>,
        tags: &[&str],
    ) -> bool {
        if tags.is_empty() {
            return false;
        }
        let node = match target {
            TagTarget::None | TagTarget::Opaque => return false,
            TagTarget::Facet(facet) => return facet.is_tagged(tags),
            TagTarget::Node(node) => node,
            TagTarget::Behavior(behavior) => match owner_node(scene, behavior) {
                Some(node) => node,
                None => return false,
            },
        };
        match scene.facet(node) {
            Some(facet) => facet.is_tagged(tags),
            None => {
                tracing::trace!(?node, "no tag facet on node");
                false
            }
        }
    }

    /// Add tags, attaching a default facet to a bare node per the policy.
    ///
    /// Returns `true` iff at least one tag was newly added.
    pub fn add_tags<S: SceneAccess + ?Sized>(
        &self,
        scene: &mut S,
        target: TagTarget<'_>,
        tags: &[&str],
    ) -> bool {
        if tags.is_empty() {
            return false;
        }
        let node = match self.node_of(scene, target) {
            Ok(node) => node,
            Err(facet) => return facet.is_some_and(|f| f.add_tags(tags)),
        };
        if scene.facet(node).is_none() && self.policy == AttachPolicy::OnAdd {
            return scene
                .attach_default(node)
                .is_some_and(|facet| facet.add_tags(tags));
        }
        match scene.facet_mut(node) {
            Some(facet) => facet.add_tags(tags),
            None => {
                tracing::trace!(?node, "no tag facet on node");
                false
            }
        }
    }

    /// Remove tags. Never attaches a facet.
    ///
    /// Returns `true` iff at least one tag was present and removed.
    pub fn remove_tags<S: SceneAccess + ?Sized>(
        &self,
        scene: &mut S,
        target: TagTarget<'_>,
        tags: &[&str],
    ) -> bool {
        if tags.is_empty() {
            return false;
        }
        let node = match self.node_of(scene, target) {
            Ok(node) => node,
            Err(facet) => return facet.is_some_and(|f| f.remove_tags(tags)),
        };
        match scene.facet_mut(node) {
            Some(facet) => facet.remove_tags(tags),
            None => {
                tracing::trace!(?node, "no tag facet on node");
                false
            }
        }
    }

    /// Resolve a mutable target to its scene node, or short-circuit with the
    /// directly-taggable value (`Some`) or nothing (`None`).
    fn node_of<'a, S: SceneAccess + ?Sized>(
        &self,
        scene: &S,
        target: TagTarget<'a>,
    ) -> Result<Entity, Option<&'a mut dyn Taggable>> {
        match target {
            TagTarget::None | TagTarget::Opaque => Err(None),
            TagTarget::Facet(facet) => Err(Some(facet)),
            TagTarget::Node(node) => Ok(node),
            TagTarget::Behavior(behavior) => owner_node(scene, behavior).ok_or(None),
        }
    }
}

/// The node a behavior is attached to, tracing the miss.
fn owner_node<S: SceneAccess + ?Sized>(scene: &S, behavior: Entity) -> Option<Entity> {
    let owner = scene.owner_of(behavior);
    if owner.is_none() {
        tracing::trace!(?behavior, "behavior is not attached to a node");
    }
    owner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BehaviorOf, TagSet, Tags};

    const NONE: &[&str] = &[];

    fn setup() -> (World, Entity) {
        let mut world = World::new();
        let node = world.spawn_empty().id();
        (world, node)
    }

    #[test]
    fn absent_target_is_false() {
        let (mut world, _) = setup();
        let r = TagResolver::default();

        assert!(!r.is_tagged(&world, TagTarget::None, &["A"]));
        assert!(!r.add_tags(&mut world, TagTarget::None, &["A"]));
        assert!(!r.remove_tags(&mut world, TagTarget::None, &["A"]));
    }

    #[test]
    fn opaque_target_is_always_false() {
        let (mut world, _) = setup();
        let r = TagResolver::default();

        assert!(!r.add_tags(&mut world, TagTarget::Opaque, &["A"]));
        assert!(!r.is_tagged(&world, TagTarget::Opaque, &["A"]));
        assert!(!r.remove_tags(&mut world, TagTarget::Opaque, &["A"]));
    }

    #[test]
    fn empty_tags_never_attach() {
        let (mut world, node) = setup();
        let r = TagResolver::default();

        assert!(!r.add_tags(&mut world, TagTarget::Node(node), NONE));
        assert!(world.get::<Tags>(node).is_none());
        assert!(!r.is_tagged(&world, TagTarget::Node(node), NONE));
    }

    #[test]
    fn facet_target_is_used_directly() {
        let (mut world, _) = setup();
        let r = TagResolver::default();
        let mut set = TagSet::new();

        assert!(r.add_tags(&mut world, TagTarget::Facet(&mut set), &["A"]));
        assert!(r.is_tagged(&world, TagTarget::Facet(&mut set), &["A"]));
        assert!(r.remove_tags(&mut world, TagTarget::Facet(&mut set), &["A"]));
        assert!(set.is_empty());
    }

    #[test]
    fn add_attaches_but_query_and_remove_do_not() {
        let (mut world, node) = setup();
        let r = TagResolver::default();

        assert!(!r.is_tagged(&world, TagTarget::Node(node), &["A"]));
        assert!(!r.remove_tags(&mut world, TagTarget::Node(node), &["A"]));
        assert!(world.get::<Tags>(node).is_none());

        assert!(r.add_tags(&mut world, TagTarget::Node(node), &["A"]));
        assert!(world.get::<Tags>(node).is_some());
    }

    #[test]
    fn never_policy_does_not_attach() {
        let (mut world, node) = setup();
        let r = TagResolver::new(AttachPolicy::Never);

        assert!(!r.add_tags(&mut world, TagTarget::Node(node), &["A"]));
        assert!(world.get::<Tags>(node).is_none());

        world.entity_mut(node).insert(Tags::default());
        assert!(r.add_tags(&mut world, TagTarget::Node(node), &["A"]));
    }

    #[test]
    fn despawned_node_is_false() {
        let (mut world, node) = setup();
        let r = TagResolver::default();
        world.despawn(node);

        assert!(!r.add_tags(&mut world, TagTarget::Node(node), &["A"]));
    }

    #[test]
    fn behavior_resolves_through_owner() {
        let (mut world, node) = setup();
        let behavior = world.spawn(BehaviorOf(node)).id();
        let r = TagResolver::default();

        assert!(r.add_tags(&mut world, TagTarget::Behavior(behavior), &["A"]));
        assert!(world.get::<Tags>(behavior).is_none());
        assert!(r.is_tagged(&world, TagTarget::Node(node), &["A"]));
        assert!(r.remove_tags(&mut world, TagTarget::Behavior(behavior), &["A"]));
        assert!(!r.is_tagged(&world, TagTarget::Node(node), &["A"]));
    }

    #[test]
    fn unowned_behavior_is_false() {
        let (mut world, loose) = setup();
        let r = TagResolver::default();

        assert!(!r.add_tags(&mut world, TagTarget::Behavior(loose), &["A"]));
        assert!(world.get::<Tags>(loose).is_none());
    }

    #[test]
    fn optional_entity_converts() {
        assert!(matches!(TagTarget::from(None::<Entity>), TagTarget::None));
        let (_, node) = setup();
        assert!(matches!(TagTarget::from(Some(node)), TagTarget::Node(n) if n == node));
    }
}
