use serde::{Deserialize, Serialize};

/// Virtual DOM node produced by component render behaviours
///
/// Attributes and styles keep insertion order so the emitted markup is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        styles: Vec<(String, String)>,
        children: Vec<VNode>,
    },

    /// Text node (escaped on output)
    Text { content: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: Vec::new(),
            styles: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            upsert(attributes, key.into(), value.into());
        }
        self
    }

    /// Empty values are dropped, mirroring how an unset inline style is
    /// simply absent.
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            return self;
        }
        if let VNode::Element { ref mut styles, .. } = self {
            upsert(styles, key.into(), value);
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            VNode::Text { .. } => None,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => lookup(attributes, key),
            VNode::Text { .. } => None,
        }
    }

    pub fn style(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { styles, .. } => lookup(styles, key),
            VNode::Text { .. } => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            VNode::Text { .. } => &[],
        }
    }
}

fn upsert(pairs: &mut Vec<(String, String)>, key: String, value: String) {
    match pairs.iter_mut().find(|(k, _)| *k == key) {
        Some(pair) => pair.1 = value,
        None => pairs.push((key, value)),
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_insertion_order() {
        let node = VNode::element("div")
            .with_style("display", "flex")
            .with_style("gap", "4px")
            .with_style("display", "grid");

        match node {
            VNode::Element { styles, .. } => assert_eq!(
                styles,
                vec![
                    ("display".to_string(), "grid".to_string()),
                    ("gap".to_string(), "4px".to_string())
                ]
            ),
            _ => panic!("Expected element"),
        }
    }

    #[test]
    fn test_empty_style_is_skipped() {
        let node = VNode::element("div").with_style("top", "");
        assert_eq!(node.style("top"), None);
    }
}
