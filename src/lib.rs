//! # String tags for Bevy (bevy-tagging)
//!
//! Attach arbitrary string labels to entities and plain objects, and query,
//! add or remove them through one interface regardless of what the target is.
//!
//! ## Design
//!
//! - [`TagSet`] — exact-match string set with batch operations that fail
//!   closed on an empty tag list.
//! - [`Taggable`] — the facet trait every taggable value exposes.
//! - [`Tags`] — the default facet, a Bevy component keeping an ordered
//!   display list and a set in step.
//! - [`TagResolver`] — resolves a [`TagTarget`] (facet, scene node, behavior,
//!   or opaque) to a facet, attaching [`Tags`] lazily on add.
//! - [`TagFacets`] — the component types a node may carry as its facet.
//!
//! ```
//! use bevy::prelude::*;
//! use bevy_tagging::prelude::*;
//!
//! let mut world = World::new();
//! let node = world.spawn_empty().id();
//!
//! assert!(!world.is_tagged(node, &["Enemy"]));
//! assert!(world.add_tags(node, &["Enemy", "Boss"]));
//! assert!(world.is_tagged(node, &["Enemy", "Boss"]));
//! ```
//!
//! Tag name constants are generated at build time by `bevy-tagging-build`.

pub mod component;
#[cfg(feature = "ext")]
pub mod ext;
pub mod facet;
pub mod picker;
pub mod plugin;
pub mod registry;
pub mod resolver;
pub mod scene;
pub mod set;

pub use bevy_tagging_macro::Taggable;
pub use component::Tags;
#[cfg(feature = "ext")]
pub use ext::{EntityTagExt, WorldTagExt};
pub use facet::Taggable;
pub use picker::{PickerAction, PickerEntry, TagPicker};
pub use plugin::TaggingPlugin;
pub use registry::TagRegistry;
pub use resolver::{AttachPolicy, TagResolver, TagTarget};
pub use scene::{BehaviorOf, SceneAccess, TagFacets};
pub use set::TagSet;

pub mod prelude {
    #[cfg(feature = "ext")]
    pub use crate::ext::{EntityTagExt, WorldTagExt};
    pub use crate::{
        AttachPolicy, BehaviorOf, TagFacets, TagRegistry, TagResolver, TagSet, TagTarget,
        Taggable, TaggingPlugin, Tags,
    };
}
