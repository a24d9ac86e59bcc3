//! Integration tests for the editor crate: edit, serialize, render

use sitecraft_common::{NodeId, Props, SerializedDocument, VNode};
use sitecraft_components::{ComponentDefinition, ComponentRegistry};
use sitecraft_editor::{EditSession, ManualClock, Mutation, MutationOutcome};
use std::sync::Arc;

fn render_column(_: &Props, children: Vec<VNode>) -> VNode {
    VNode::element("div").with_children(children)
}

fn render_text(props: &Props, _: Vec<VNode>) -> VNode {
    VNode::element("p").with_child(VNode::text(props.str_or("text", "")))
}

fn minimal_registry() -> Arc<ComponentRegistry> {
    let mut registry = ComponentRegistry::new();
    registry
        .register(ComponentDefinition::container("Column", render_column))
        .unwrap();
    registry
        .register(ComponentDefinition::leaf("Text", render_text).prop("text", ""))
        .unwrap();
    Arc::new(registry)
}

fn create(session: &mut EditSession, type_name: &str, props: Props) -> NodeId {
    match session
        .apply(Mutation::CreateNode {
            id: None,
            type_name: type_name.to_string(),
            props,
        })
        .unwrap()
        .outcome
    {
        MutationOutcome::Created(id) => id,
        other => panic!("Expected Created, got {:?}", other),
    }
}

#[test]
fn test_column_with_two_texts_renders_in_order() {
    let registry = minimal_registry();
    let mut session = EditSession::new("scenario", Arc::clone(&registry));

    let column = create(&mut session, "Column", Props::new());
    session
        .apply(Mutation::SetRoot {
            node_id: column.clone(),
        })
        .unwrap();
    for text in ["A", "B"] {
        let id = create(&mut session, "Text", Props::new().with("text", text));
        session
            .apply(Mutation::AttachChild {
                parent_id: column.clone(),
                child_id: id,
                index: None,
            })
            .unwrap();
    }

    let doc = session.serialize().unwrap();
    let html = sitecraft_renderer::render(&doc, &registry).unwrap();

    let a = html.find('A').unwrap();
    let b = html.find('B').unwrap();
    assert!(a < b, "{}", html);
    assert!(!html.contains("Drop"));
    assert_eq!(html, "<div><p>A</p><p>B</p></div>");
}

#[test]
fn test_render_is_stable_across_calls() {
    let registry = Arc::new(ComponentRegistry::builtin().unwrap());
    let mut session = EditSession::new("stable", Arc::clone(&registry));

    let root = create(&mut session, "Section", Props::new());
    session
        .apply(Mutation::SetRoot {
            node_id: root.clone(),
        })
        .unwrap();
    for type_name in ["Heading", "Paragraph", "Navbar", "Button"] {
        let id = create(&mut session, type_name, Props::new());
        session
            .apply(Mutation::AttachChild {
                parent_id: root.clone(),
                child_id: id,
                index: None,
            })
            .unwrap();
    }

    let doc = session.serialize().unwrap();
    let first = sitecraft_renderer::render(&doc, &registry).unwrap();
    let second = sitecraft_renderer::render(&doc, &registry).unwrap();
    assert_eq!(first, second);

    // Crossing a JSON boundary changes nothing
    let reloaded = SerializedDocument::from_json(&doc.to_json().unwrap()).unwrap();
    assert_eq!(sitecraft_renderer::render(&reloaded, &registry).unwrap(), first);

    for artifact in ["cursor: move", "dashed", "onclick", "data-editor", "Drop"] {
        assert!(!first.contains(artifact), "found {:?}", artifact);
    }
}

#[test]
fn test_reopened_session_continues_editing() -> anyhow::Result<()> {
    let registry = Arc::new(ComponentRegistry::builtin()?);
    let mut session = EditSession::new("first", Arc::clone(&registry));

    let root = create(&mut session, "Container", Props::new());
    session.apply(Mutation::SetRoot {
        node_id: root.clone(),
    })?;
    let doc = session.serialize()?;

    let mut reopened = EditSession::open("second", Arc::clone(&registry), &doc)?;
    let text = create(&mut reopened, "Text", Props::new());
    reopened.apply(Mutation::AttachChild {
        parent_id: root.clone(),
        child_id: text.clone(),
        index: None,
    })?;

    let saved = reopened.serialize()?;
    assert_eq!(saved.node(&root).map(|n| n.children.clone()), Some(vec![text]));
    Ok(())
}

#[test]
fn test_replayed_mutations_from_json() {
    let registry = Arc::new(ComponentRegistry::builtin().unwrap());
    let json = r#"[
        {"CreateNode": {"id": "root", "typeName": "Column"}},
        {"SetRoot": {"nodeId": "root"}},
        {"CreateNode": {"id": "title", "typeName": "Heading", "props": {"text": "Hello"}}},
        {"AttachChild": {"parentId": "root", "childId": "title"}},
        {"UpdateProp": {"nodeId": "title", "prop": "level", "value": 1, "debounceMs": 300}}
    ]"#;
    let mutations: Vec<Mutation> = serde_json::from_str(json).unwrap();

    let mut session = EditSession::with_clock("replay", registry, Box::new(ManualClock::new()));
    assert_eq!(session.apply_all(mutations).unwrap(), 5);

    let doc = session.serialize().unwrap();
    let title = doc.node(&NodeId::from("title")).unwrap();
    assert_eq!(title.props.i64_or("level", 0), 1);
    assert_eq!(title.props.str_or("text", ""), "Hello");
}
