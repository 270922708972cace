//! Scene graph access — how the resolver finds facets on Bevy entities.
//!
//! A node's facet is any component implementing [`Taggable`] whose type has
//! been registered in the [`TagFacets`] resource. [`Tags`] is registered by
//! default; a world without the resource behaves as if only `Tags` were
//! registered.

use std::any::TypeId;

use bevy::ecs::component::Mutable;
use bevy::prelude::*;

use crate::{component::Tags, facet::Taggable};

// =============================================================================
// SceneAccess
// =============================================================================

/// Scene graph accessors required by the resolver.
pub trait SceneAccess {
    /// The facet attached to `node`, if any.
    fn facet(&self, node: Entity) -> Option<&dyn Taggable>;

    /// Mutable access to the facet attached to `node`, if any.
    fn facet_mut(&mut self, node: Entity) -> Option<&mut dyn Taggable>;

    /// Attach a default [`Tags`] facet to `node` and return it.
    ///
    /// Returns `None` if `node` does not exist.
    fn attach_default(&mut self, node: Entity) -> Option<&mut dyn Taggable>;

    /// The scene node `behavior` is attached to.
    fn owner_of(&self, behavior: Entity) -> Option<Entity>;
}

/// Links a behavior entity to the scene node it is attached to.
///
/// Tag operations on the behavior are redirected to the node.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BehaviorOf(pub Entity);

// =============================================================================
// Facet registry
// =============================================================================

/// Type-erased accessors for one facet component type.
#[derive(Clone, Copy)]
struct FacetAccessor {
    type_id: TypeId,
    type_name: &'static str,
    get: fn(&World, Entity) -> Option<&dyn Taggable>,
    get_mut: fn(&mut World, Entity) -> Option<&mut dyn Taggable>,
}

impl FacetAccessor {
    fn of<C: Component<Mutability = Mutable> + Taggable>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            type_name: std::any::type_name::<C>(),
            get: get_facet::<C>,
            get_mut: get_facet_mut::<C>,
        }
    }
}

fn get_facet<C: Component + Taggable>(world: &World, node: Entity) -> Option<&dyn Taggable> {
    world.get::<C>(node).map(|facet| facet as &dyn Taggable)
}

fn get_facet_mut<C: Component<Mutability = Mutable> + Taggable>(
    world: &mut World,
    node: Entity,
) -> Option<&mut dyn Taggable> {
    world
        .get_mut::<C>(node)
        .map(|facet| facet.into_inner() as &mut dyn Taggable)
}

/// Component types the [`World`] adapter treats as facets.
///
/// Lookup tries types in registration order and uses the first one present
/// on the node. [`Tags`] is always registered first.
///
/// ```
/// use bevy::prelude::*;
/// use bevy_tagging::{TagFacets, TagSet, Taggable};
///
/// #[derive(Component, Default, Taggable)]
/// struct Labels {
///     tags: TagSet,
/// }
///
/// let mut world = World::new();
/// world.init_resource::<TagFacets>();
/// world.resource_mut::<TagFacets>().register::<Labels>();
/// ```
#[derive(Resource, Clone)]
pub struct TagFacets {
    accessors: Vec<FacetAccessor>,
}

impl Default for TagFacets {
    fn default() -> Self {
        Self {
            accessors: vec![FacetAccessor::of::<Tags>()],
        }
    }
}

impl TagFacets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component type as a facet.
    ///
    /// Returns `false` if it was already registered.
    pub fn register<C: Component<Mutability = Mutable> + Taggable>(&mut self) -> bool {
        if self.contains::<C>() {
            return false;
        }
        self.accessors.push(FacetAccessor::of::<C>());
        true
    }

    #[inline]
    pub fn contains<C: Component>(&self) -> bool {
        let type_id = TypeId::of::<C>();
        self.accessors.iter().any(|a| a.type_id == type_id)
    }

    /// Registered type names, in lookup order.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.accessors.iter().map(|a| a.type_name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }

    /// First registered accessor whose component is present on `node`.
    fn accessor_for(&self, world: &World, node: Entity) -> Option<FacetAccessor> {
        self.accessors
            .iter()
            .find(|a| (a.get)(world, node).is_some())
            .copied()
    }
}

impl std::fmt::Debug for TagFacets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.type_names()).finish()
    }
}

// =============================================================================
// World adapter
// =============================================================================

fn accessor_for(world: &World, node: Entity) -> Option<FacetAccessor> {
    match world.get_resource::<TagFacets>() {
        Some(facets) => facets.accessor_for(world, node),
        None => TagFacets::default().accessor_for(world, node),
    }
}

impl SceneAccess for World {
    fn facet(&self, node: Entity) -> Option<&dyn Taggable> {
        let accessor = accessor_for(self, node)?;
        (accessor.get)(self, node)
    }

    fn facet_mut(&mut self, node: Entity) -> Option<&mut dyn Taggable> {
        let accessor = accessor_for(self, node)?;
        (accessor.get_mut)(self, node)
    }

    fn attach_default(&mut self, node: Entity) -> Option<&mut dyn Taggable> {
        self.get_entity_mut(node).ok()?.insert(Tags::default());
        tracing::debug!(?node, "attached default Tags component");
        self.get_mut::<Tags>(node)
            .map(|tags| tags.into_inner() as &mut dyn Taggable)
    }

    fn owner_of(&self, behavior: Entity) -> Option<Entity> {
        self.get::<BehaviorOf>(behavior).map(|owner| owner.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TagSet;

    #[derive(Component, Default)]
    struct Labels {
        tags: TagSet,
    }

    impl Taggable for Labels {
        fn is_tagged(&self, tags: &[&str]) -> bool {
            self.tags.is_tagged(tags)
        }

        fn add_tags(&mut self, tags: &[&str]) -> bool {
            self.tags.add_tags(tags)
        }

        fn remove_tags(&mut self, tags: &[&str]) -> bool {
            self.tags.remove_tags(tags)
        }
    }

    fn labelled(world: &mut World, tag: &str) -> Entity {
        let mut labels = Labels::default();
        labels.add_tags(&[tag]);
        world.spawn(labels).id()
    }

    #[test]
    fn tags_is_registered_by_default() {
        let facets = TagFacets::default();

        assert!(facets.contains::<Tags>());
        assert!(!facets.contains::<Labels>());
        assert_eq!(facets.len(), 1);
    }

    #[test]
    fn register_is_idempotent() {
        let mut facets = TagFacets::new();

        assert!(facets.register::<Labels>());
        assert!(!facets.register::<Labels>());
        assert!(!facets.register::<Tags>());
        assert_eq!(facets.len(), 2);
    }

    #[test]
    fn unregistered_component_is_invisible() {
        let mut world = World::new();
        let node = labelled(&mut world, "Boss");

        assert!(world.facet(node).is_none());
        assert!(world.facet_mut(node).is_none());
    }

    #[test]
    fn registered_component_is_found() {
        let mut world = World::new();
        world.init_resource::<TagFacets>();
        world.resource_mut::<TagFacets>().register::<Labels>();
        let node = labelled(&mut world, "Boss");

        assert!(world.facet(node).is_some_and(|f| f.is_tagged(&["Boss"])));
        assert!(world.facet_mut(node).is_some_and(|f| f.add_tags(&["Elite"])));
        assert!(world.get::<Labels>(node).unwrap().tags.contains("Elite"));
    }

    #[test]
    fn tags_wins_when_both_are_present() {
        let mut world = World::new();
        world.init_resource::<TagFacets>();
        world.resource_mut::<TagFacets>().register::<Labels>();
        let node = labelled(&mut world, "Boss");
        world.entity_mut(node).insert(Tags::new(["Minion"]));

        assert!(world.facet(node).is_some_and(|f| f.is_tagged(&["Minion"])));
    }

    #[test]
    fn attach_on_missing_entity_is_none() {
        let mut world = World::new();
        let node = world.spawn_empty().id();
        world.despawn(node);

        assert!(world.attach_default(node).is_none());
    }
}
