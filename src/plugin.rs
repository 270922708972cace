//! Bevy plugin wiring the registry, facet types and resolver into an `App`.

use bevy::ecs::component::Mutable;
use bevy::prelude::*;

use crate::{
    facet::Taggable,
    registry::TagRegistry,
    resolver::{AttachPolicy, TagResolver},
    scene::TagFacets,
};

// =============================================================================
// Plugin
// =============================================================================

/// Bevy plugin for the tagging system.
///
/// Use the builder pattern to configure:
///
/// ```ignore
/// mod tags {
///     include!(concat!(env!("OUT_DIR"), "/tags.rs"));
/// }
///
/// App::new()
///     .add_plugins(
///         TaggingPlugin::from_registry(tags::tags::ALL)
///             .register_facet::<Labels>()
///             .attach_policy(AttachPolicy::Never)
///     )
/// ```
#[derive(Default)]
pub struct TaggingPlugin {
    registry: &'static [&'static str],
    facets: TagFacets,
    policy: AttachPolicy,
}

impl TaggingPlugin {
    /// Create a plugin with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a plugin seeded with a known tag list (usually the generated `ALL`).
    pub fn from_registry(tags: &'static [&'static str]) -> Self {
        Self {
            registry: tags,
            ..Self::default()
        }
    }

    /// Let nodes carry `C` as their facet instead of `Tags`.
    ///
    /// `Tags` stays registered and is checked first.
    pub fn register_facet<C: Component<Mutability = Mutable> + Taggable>(mut self) -> Self {
        self.facets.register::<C>();
        self
    }

    /// Set when the resolver may attach a default `Tags` component.
    ///
    /// Default: [`AttachPolicy::OnAdd`]
    pub fn attach_policy(mut self, policy: AttachPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Plugin for TaggingPlugin {
    fn build(&self, app: &mut App) {
        let registry = TagRegistry::from_tags(self.registry);
        tracing::debug!(
            tags = registry.len(),
            facets = ?self.facets,
            policy = ?self.policy,
            "tagging plugin ready"
        );

        app.insert_resource(registry);
        app.insert_resource(self.facets.clone());
        app.insert_resource(TagResolver::new(self.policy));
    }
}

// =============================================================================
// Tests
// =============================================================================
