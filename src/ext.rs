//! Method-call sugar over [`TagResolver`], enabled by the `ext` feature.
//!
//! ```
//! use bevy::prelude::*;
//! use bevy_tagging::prelude::*;
//!
//! let mut world = World::new();
//! let mut player = world.spawn_empty();
//!
//! assert!(player.add_tags(&["Player", "Hero"]));
//! assert!(player.is_tagged(&["Player"]));
//! assert!(player.remove_tag("Hero"));
//! ```

use bevy::ecs::world::EntityWorldMut;
use bevy::prelude::*;

use crate::resolver::{TagResolver, TagTarget};

/// Tag operations on an entity being edited through [`EntityWorldMut`].
///
/// The entity is treated as a scene node, so `add_tags` attaches a
/// [`Tags`](crate::Tags) component when none is present and the world's
/// [`TagResolver`] allows it.
pub trait EntityTagExt {
    fn is_tagged(&self, tags: &[&str]) -> bool;
    fn add_tags(&mut self, tags: &[&str]) -> bool;
    fn remove_tags(&mut self, tags: &[&str]) -> bool;

    fn add_tag(&mut self, tag: &str) -> bool {
        self.add_tags(&[tag])
    }

    fn remove_tag(&mut self, tag: &str) -> bool {
        self.remove_tags(&[tag])
    }
}

impl EntityTagExt for EntityWorldMut<'_> {
    fn is_tagged(&self, tags: &[&str]) -> bool {
        let world = self.world();
        resolver(world).is_tagged(world, TagTarget::Node(self.id()), tags)
    }

    fn add_tags(&mut self, tags: &[&str]) -> bool {
        let node = self.id();
        self.world_scope(|world| {
            resolver(world).add_tags(world, TagTarget::Node(node), tags)
        })
    }

    fn remove_tags(&mut self, tags: &[&str]) -> bool {
        let node = self.id();
        self.world_scope(|world| {
            resolver(world).remove_tags(world, TagTarget::Node(node), tags)
        })
    }
}

/// Tag operations on any target, resolved against this world.
///
/// Uses the [`TagResolver`] resource when one is inserted (see
/// [`TaggingPlugin`](crate::TaggingPlugin)), the default resolver otherwise.
pub trait WorldTagExt {
    fn is_tagged<'a>(&self, target: impl Into<TagTarget<'a>>, tags: &[&str]) -> bool;
    fn add_tags<'a>(&mut self, target: impl Into<TagTarget<'a>>, tags: &[&str]) -> bool;
    fn remove_tags<'a>(&mut self, target: impl Into<TagTarget<'a>>, tags: &[&str]) -> bool;
}

impl WorldTagExt for World {
    fn is_tagged<'a>(&self, target: impl Into<TagTarget<'a>>, tags: &[&str]) -> bool {
        resolver(self).is_tagged(self, target.into(), tags)
    }

    fn add_tags<'a>(&mut self, target: impl Into<TagTarget<'a>>, tags: &[&str]) -> bool {
        resolver(self).add_tags(self, target.into(), tags)
    }

    fn remove_tags<'a>(&mut self, target: impl Into<TagTarget<'a>>, tags: &[&str]) -> bool {
        resolver(self).remove_tags(self, target.into(), tags)
    }
}

fn resolver(world: &World) -> TagResolver {
    world.get_resource::<TagResolver>().copied().unwrap_or_default()
}
