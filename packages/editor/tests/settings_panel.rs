//! Settings panel behaviour seen from outside the crate

use sitecraft_common::{NodeId, PropValue, Props};
use sitecraft_components::ComponentRegistry;
use sitecraft_editor::{settings_view_for, ManualClock, MutationError, TreeStore};
use std::sync::Arc;

fn tree() -> (TreeStore, ManualClock) {
    let clock = ManualClock::new();
    let registry = Arc::new(ComponentRegistry::builtin().unwrap());
    let tree = TreeStore::with_clock(registry, "panel", Box::new(clock.clone()));
    (tree, clock)
}

fn prop(tree: &TreeStore, id: &NodeId, name: &str) -> PropValue {
    tree.node(id).unwrap().props.get(name).cloned().unwrap_or(PropValue::Null)
}

#[test]
fn test_field_edits_touch_only_their_prop() {
    let (mut tree, _) = tree();
    let button = tree.create_node("Button", Props::new()).unwrap();
    let before = tree.node(&button).unwrap().props.clone();

    tree.select(Some(&button)).unwrap();
    let view = settings_view_for(&tree, &button).unwrap();
    view.editor(&mut tree, "paddingX").unwrap().set_raw("20").unwrap();

    let after = &tree.node(&button).unwrap().props;
    for (name, value) in before.iter() {
        if name == "paddingX" {
            assert_eq!(after.get(name), Some(&PropValue::int(20)));
        } else {
            assert_eq!(after.get(name), Some(value), "{} changed", name);
        }
    }
}

#[test]
fn test_editing_one_node_leaves_another_alone() {
    let (mut tree, _) = tree();
    let first = tree.create_node("Button", Props::new()).unwrap();
    let second = tree.create_node("Button", Props::new()).unwrap();

    let view = settings_view_for(&tree, &first).unwrap();
    view.editor(&mut tree, "text").unwrap().set_raw("Buy").unwrap();

    assert_eq!(prop(&tree, &first, "text"), PropValue::text("Buy"));
    assert_eq!(prop(&tree, &second, "text"), PropValue::text("Click Me"));
}

#[test]
fn test_action_fields_hidden_without_button_text() {
    let (mut tree, _) = tree();
    let navbar = tree.create_node("Navbar", Props::new()).unwrap();

    let shown = settings_view_for(&tree, &navbar).unwrap();
    assert!(shown.field("actionButtonLink").unwrap().visible);

    tree.update_prop(&navbar, "actionButtonText", PropValue::text(""), None)
        .unwrap();
    let hidden = settings_view_for(&tree, &navbar).unwrap();
    for prop in [
        "actionButtonLink",
        "actionButtonSize",
        "actionButtonBackground",
        "actionButtonColor",
    ] {
        assert!(!hidden.field(prop).unwrap().visible, "{} visible", prop);
    }
    assert!(hidden.field("actionButtonText").unwrap().visible);
}

#[test]
fn test_logo_fields_follow_logo_type() {
    let (mut tree, _) = tree();
    let navbar = tree.create_node("Navbar", Props::new()).unwrap();

    let view = settings_view_for(&tree, &navbar).unwrap();
    assert!(view.field("logoText").unwrap().visible);
    assert!(!view.field("logoImageUrl").unwrap().visible);

    view.editor(&mut tree, "logoType").unwrap().set_raw("image").unwrap();

    let view = settings_view_for(&tree, &navbar).unwrap();
    assert!(!view.field("logoText").unwrap().visible);
    assert!(view.field("logoImageUrl").unwrap().visible);
    assert!(view.field("logoWidth").unwrap().visible);
}

#[test]
fn test_menu_items_are_per_node() {
    let (mut tree, _) = tree();
    let first = tree.create_node("Navbar", Props::new()).unwrap();
    let second = tree.create_node("Navbar", Props::new()).unwrap();

    let view = settings_view_for(&tree, &first).unwrap();
    {
        let mut menu = view.editor(&mut tree, "menuItems").unwrap();
        menu.push_item().unwrap();
        menu.set_item_field(2, "text", "Blog").unwrap();
        menu.commit();
    }

    let items = tree.node(&first).unwrap().props.list("menuItems").to_vec();
    assert_eq!(items.len(), 3);
    let added = items[2].as_record().unwrap();
    assert_eq!(added.get("id"), Some(&PropValue::text("3")));
    assert_eq!(added.get("text"), Some(&PropValue::text("Blog")));
    assert_eq!(added.get("href"), Some(&PropValue::text("#")));

    view.editor(&mut tree, "menuItems").unwrap().remove_item(0).unwrap();
    assert_eq!(tree.node(&first).unwrap().props.list("menuItems").len(), 2);
    assert_eq!(tree.node(&second).unwrap().props.list("menuItems").len(), 2);
}

#[test]
fn test_unknown_setting_is_rejected() {
    let (mut tree, _) = tree();
    let spacer = tree.create_node("Spacer", Props::new()).unwrap();
    let view = settings_view_for(&tree, &spacer).unwrap();

    let err = view.editor(&mut tree, "color").err().unwrap();
    assert_eq!(
        err,
        MutationError::UnknownSetting {
            type_name: "Spacer".to_string(),
            prop: "color".to_string(),
        }
    );
}

#[test]
fn test_field_shows_pending_value_before_commit() {
    let (mut tree, clock) = tree();
    let text = tree.create_node("Text", Props::new()).unwrap();
    let view = settings_view_for(&tree, &text).unwrap();

    let mut editor = view.editor(&mut tree, "text").unwrap();
    editor.set_raw("typing").unwrap();
    assert_eq!(editor.value(), PropValue::text("typing"));
    assert!(editor.commit());
    drop(editor);

    assert_eq!(prop(&tree, &text, "text"), PropValue::text("typing"));
    clock.advance_ms(1000);
    assert_eq!(tree.tick(), 0);
}
