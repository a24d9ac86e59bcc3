//! Structural and temporal guarantees of the tree store
//!
//! - Rejected attach/move leaves the serialized tree unchanged
//! - Moves into one's own subtree are refused
//! - Debounced writes coalesce and are flushed before serializing
//! - Deletion removes whole subtrees and their pending writes
//! - Default props are never shared between nodes

use sitecraft_common::{NodeId, PropValue, Props};
use sitecraft_components::ComponentRegistry;
use sitecraft_editor::{
    serialize, AdmissionError, ManualClock, MutationError, TreeStore,
};
use std::sync::Arc;
use std::time::Duration;

const TEXT_WINDOW: Option<Duration> = Some(Duration::from_millis(500));

fn tree() -> (TreeStore, ManualClock) {
    let clock = ManualClock::new();
    let registry = Arc::new(ComponentRegistry::builtin().unwrap());
    let tree = TreeStore::with_clock(registry, "properties", Box::new(clock.clone()));
    (tree, clock)
}

fn add(tree: &mut TreeStore, parent: &NodeId, type_name: &str) -> NodeId {
    let id = tree.create_node(type_name, Props::new()).unwrap();
    tree.attach_child(parent, &id, None).unwrap();
    id
}

fn text_of(tree: &TreeStore, id: &NodeId) -> String {
    tree.node(id).unwrap().props.str_or("text", "").to_string()
}

#[test]
fn test_button_under_accordion_is_rejected() {
    let (mut tree, _) = tree();
    let root = tree.create_node("Container", Props::new()).unwrap();
    tree.set_root(&root).unwrap();
    let accordion = add(&mut tree, &root, "Accordion");
    add(&mut tree, &accordion, "AccordionItem");

    let before = serialize(&mut tree).unwrap().to_json().unwrap();

    let button = tree.create_node("Button", Props::new()).unwrap();
    let err = tree.attach_child(&accordion, &button, None).unwrap_err();
    assert_eq!(
        err,
        MutationError::Admission(AdmissionError::Rejected {
            parent_type: "Accordion".to_string(),
            child_type: "Button".to_string(),
            rule: "only AccordionItem".to_string(),
        })
    );

    assert_eq!(serialize(&mut tree).unwrap().to_json().unwrap(), before);
}

#[test]
fn test_move_into_rejecting_parent_leaves_tree_unchanged() {
    let (mut tree, _) = tree();
    let root = tree.create_node("Container", Props::new()).unwrap();
    tree.set_root(&root).unwrap();
    let accordion = add(&mut tree, &root, "Accordion");
    let text = add(&mut tree, &root, "Text");

    let before = serialize(&mut tree).unwrap();
    assert!(matches!(
        tree.move_node(&text, &accordion, 0),
        Err(MutationError::Admission(_))
    ));
    assert_eq!(serialize(&mut tree).unwrap(), before);
    assert_eq!(tree.parent_of(&text), Some(&root));
}

#[test]
fn test_move_under_own_descendant_is_a_cycle() {
    let (mut tree, _) = tree();
    let root = tree.create_node("Container", Props::new()).unwrap();
    tree.set_root(&root).unwrap();
    let a = add(&mut tree, &root, "Container");
    let b = add(&mut tree, &a, "Section");
    let c = add(&mut tree, &b, "Grid");

    let before = serialize(&mut tree).unwrap();

    for target in [&b, &c, &a] {
        let err = tree.move_node(&a, target, 0).unwrap_err();
        assert!(
            matches!(err, MutationError::CycleDetected { .. }),
            "moving under {} gave {:?}",
            target,
            err
        );
    }
    assert_eq!(serialize(&mut tree).unwrap(), before);
}

#[test]
fn test_rapid_updates_coalesce_to_last_value() {
    let (mut tree, clock) = tree();
    let id = tree.create_node("Text", Props::new()).unwrap();

    for value in ["a", "ab", "abc"] {
        tree.update_prop(&id, "text", value.into(), TEXT_WINDOW).unwrap();
        clock.advance_ms(100);
    }
    assert_eq!(text_of(&tree, &id), "Hi there");
    assert_eq!(tree.pending_writes(), 1);

    clock.advance_ms(400);
    assert_eq!(tree.tick(), 1);
    assert_eq!(text_of(&tree, &id), "abc");
    assert_eq!(tree.pending_writes(), 0);
}

#[test]
fn test_window_not_elapsed_until_deadline() {
    let (mut tree, clock) = tree();
    let id = tree.create_node("Text", Props::new()).unwrap();

    tree.update_prop(&id, "text", "draft".into(), TEXT_WINDOW).unwrap();
    clock.advance_ms(499);
    assert_eq!(tree.tick(), 0);
    assert_eq!(tree.next_deadline(), Some(Duration::from_millis(1)));

    clock.advance_ms(1);
    assert_eq!(tree.tick(), 1);
    assert_eq!(tree.next_deadline(), None);
}

#[test]
fn test_serialize_flushes_pending_write() {
    let (mut tree, _) = tree();
    let root = tree.create_node("Column", Props::new()).unwrap();
    tree.set_root(&root).unwrap();
    let text = add(&mut tree, &root, "Text");

    tree.update_prop(&text, "text", "first".into(), TEXT_WINDOW).unwrap();
    tree.update_prop(&text, "text", "final".into(), TEXT_WINDOW).unwrap();

    let doc = serialize(&mut tree).unwrap();
    assert_eq!(
        doc.node(&text).unwrap().props.get("text"),
        Some(&PropValue::text("final"))
    );
}

#[test]
fn test_delete_cascade_removes_subtree() {
    let (mut tree, _) = tree();
    let root = tree.create_node("Container", Props::new()).unwrap();
    tree.set_root(&root).unwrap();
    let section = add(&mut tree, &root, "Section");
    let heading = add(&mut tree, &section, "Heading");
    let paragraph = add(&mut tree, &section, "Paragraph");
    let keep = add(&mut tree, &root, "Spacer");

    let removed = tree.delete_node(&section).unwrap();
    assert_eq!(removed.len(), 3);

    let json = serialize(&mut tree).unwrap().to_json().unwrap();
    for gone in [&section, &heading, &paragraph] {
        assert!(!tree.contains(gone));
        assert!(!json.contains(gone.as_str()), "{} still serialized", gone);
    }
    assert!(json.contains(keep.as_str()));
}

#[test]
fn test_delete_cancels_pending_writes() {
    let (mut tree, clock) = tree();
    let root = tree.create_node("Container", Props::new()).unwrap();
    tree.set_root(&root).unwrap();
    let text = add(&mut tree, &root, "Text");

    tree.update_prop(&text, "text", "orphan".into(), TEXT_WINDOW).unwrap();
    tree.delete_node(&text).unwrap();
    assert_eq!(tree.pending_writes(), 0);

    clock.advance_ms(1000);
    assert_eq!(tree.tick(), 0);
}

#[test]
fn test_default_list_is_not_shared() {
    let (mut tree, _) = tree();
    let first = tree.create_node("Navbar", Props::new()).unwrap();
    let second = tree.create_node("Navbar", Props::new()).unwrap();

    let mut items = tree.node(&first).unwrap().props.list("menuItems").to_vec();
    items.push(PropValue::record([("text", PropValue::text("Blog"))]));
    tree.update_prop(&first, "menuItems", PropValue::List(items), None)
        .unwrap();

    assert_eq!(tree.node(&first).unwrap().props.list("menuItems").len(), 3);
    assert_eq!(tree.node(&second).unwrap().props.list("menuItems").len(), 2);

    let registry = ComponentRegistry::builtin().unwrap();
    let defaults = registry.instantiate_defaults("Navbar").unwrap();
    assert_eq!(defaults.list("menuItems").len(), 2);
}
