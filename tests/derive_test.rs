use bevy::prelude::*;
use bevy_tagging::{
    BehaviorOf, TagResolver, TagSet, TagTarget, Taggable, TaggingPlugin, Tags, WorldTagExt,
};

#[derive(Default, Taggable)]
struct Pickup {
    name: String,
    tags: TagSet,
}

#[derive(Default, Taggable)]
struct Marked {
    #[tags]
    labels: Tags,
    backup: TagSet,
}

#[derive(Component, Default, Taggable)]
struct Labels {
    tags: TagSet,
}

#[derive(Default, Taggable)]
struct Wrapper(u32, TagSet);

#[derive(Default, Taggable)]
struct Generic<T> {
    #[allow(dead_code)]
    payload: T,
    tags: TagSet,
}

#[test]
fn delegates_to_tag_set_field() {
    let mut pickup = Pickup {
        name: "Medkit".into(),
        ..Default::default()
    };

    assert!(pickup.add_tags(&["Loot", "Heal"]));
    assert!(pickup.is_tagged(&["Heal"]));
    assert!(pickup.tags.contains("Loot"));
    assert_eq!(pickup.name, "Medkit");
}

#[test]
fn marked_field_wins_over_type_match() {
    let mut marked = Marked::default();

    assert!(marked.add_tags(&["A"]));
    assert_eq!(marked.labels.list(), ["A"]);
    assert!(marked.backup.is_empty());
}

#[test]
fn tuple_structs_and_generics() {
    let mut wrapper = Wrapper::default();
    assert!(wrapper.add_tags(&["A"]));
    assert!(wrapper.1.contains("A"));
    assert_eq!(wrapper.0, 0);

    let mut generic = Generic::<String>::default();
    assert!(generic.add_tags(&["B"]));
    assert!(generic.remove_tags(&["B"]));
    assert!(generic.tags.is_empty());
}

#[test]
fn derived_value_is_a_facet_target() {
    let mut world = World::new();
    let resolver = TagResolver::default();
    let mut pickup = Pickup::default();

    assert!(resolver.add_tags(&mut world, TagTarget::Facet(&mut pickup), &["Loot"]));
    assert!(resolver.is_tagged(&world, TagTarget::Facet(&mut pickup), &["Loot"]));
    assert!(!resolver.is_tagged(&world, TagTarget::Facet(&mut pickup), &[]));
}

#[test]
fn registered_component_is_a_node_facet() {
    let mut app = App::new();
    app.add_plugins(TaggingPlugin::new().register_facet::<Labels>());
    let world = app.world_mut();

    let mut labels = Labels::default();
    labels.add_tags(&["Boss"]);
    let node = world.spawn(labels).id();
    let behavior = world.spawn(BehaviorOf(node)).id();

    assert!(world.is_tagged(node, &["Boss"]));
    assert!(world.is_tagged(TagTarget::Behavior(behavior), &["Boss"]));

    assert!(world.add_tags(TagTarget::Behavior(behavior), &["Elite"]));
    assert!(world.get::<Labels>(node).unwrap().tags.contains("Elite"));
    assert!(world.get::<Tags>(node).is_none());

    assert!(world.remove_tags(node, &["Boss"]));
    assert!(!world.is_tagged(node, &["Boss"]));
}
