use serde::{Deserialize, Serialize};
use sitecraft_common::{DocumentError, NodeId, SerializedDocument, VNode};
use sitecraft_components::ComponentRegistry;
use thiserror::Error;

/// Errors that can occur while rendering a document
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Node {node} has unknown type {type_name}")]
    UnknownType { node: NodeId, type_name: String },

    #[error("Invalid document: {0}")]
    Document(#[from] DocumentError),
}

/// Wrap the fragment in a complete HTML page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageShell {
    pub title: String,
}

/// Options for HTML output
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    pub page: Option<PageShell>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: "  ".to_string(),
            page: None,
        }
    }
}

impl RenderOptions {
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }

    pub fn with_page(mut self, title: impl Into<String>) -> Self {
        self.page = Some(PageShell {
            title: title.into(),
        });
        self
    }
}

struct Context<'o> {
    options: &'o RenderOptions,
    depth: usize,
    buffer: String,
}

impl<'o> Context<'o> {
    fn new(options: &'o RenderOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Render a document to a compact HTML fragment
pub fn render(doc: &SerializedDocument, registry: &ComponentRegistry) -> Result<String, RenderError> {
    render_with_options(doc, registry, &RenderOptions::default())
}

pub fn render_with_options(
    doc: &SerializedDocument,
    registry: &ComponentRegistry,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    let tree = build_vnode(doc, registry)?;
    let mut ctx = Context::new(options);

    match &options.page {
        Some(shell) => {
            ctx.add_line("<!DOCTYPE html>");
            ctx.add_line("<html>");
            ctx.indent();
            ctx.add_line("<head>");
            ctx.indent();
            ctx.add_line("<meta charset=\"UTF-8\">");
            ctx.add_line(
                "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">",
            );
            ctx.add_line(&format!("<title>{}</title>", escape_html(&shell.title)));
            ctx.dedent();
            ctx.add_line("</head>");
            ctx.add_line("<body>");
            ctx.indent();
            compile_vnode(&tree, &mut ctx);
            ctx.dedent();
            ctx.add_line("</body>");
            ctx.dedent();
            ctx.add_line("</html>");
        }
        None => compile_vnode(&tree, &mut ctx),
    }

    Ok(ctx.get_output())
}

/// Resolve every reachable node against the registry, bottom-up.
///
/// The document is validated first, which rejects cycles and any branch
/// nested past `MAX_DEPTH`, so the recursion here and in `compile_vnode`
/// stays shallow.
pub fn build_vnode(doc: &SerializedDocument, registry: &ComponentRegistry) -> Result<VNode, RenderError> {
    doc.validate()?;
    tracing::debug!(root = %doc.root, nodes = doc.nodes.len(), "Rendering document");
    build_node(doc, registry, &doc.root)
}

fn build_node(
    doc: &SerializedDocument,
    registry: &ComponentRegistry,
    id: &NodeId,
) -> Result<VNode, RenderError> {
    let node = doc
        .node(id)
        .ok_or_else(|| DocumentError::MissingNode(id.clone()))?;
    let definition = registry
        .get(&node.type_name)
        .ok_or_else(|| RenderError::UnknownType {
            node: id.clone(),
            type_name: node.type_name.clone(),
        })?;

    let children = node
        .children
        .iter()
        .map(|child| build_node(doc, registry, child))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(definition.render_with(&node.props, children))
}

/// Serialize an already-built virtual DOM tree
pub fn render_vnode(node: &VNode, options: &RenderOptions) -> String {
    let mut ctx = Context::new(options);
    compile_vnode(node, &mut ctx);
    ctx.get_output()
}

fn compile_vnode(node: &VNode, ctx: &mut Context<'_>) {
    match node {
        VNode::Text { content } => ctx.add_line(&escape_html(content)),
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
        } => compile_element(tag, attributes, styles, children, ctx),
    }
}

fn compile_element(
    tag: &str,
    attributes: &[(String, String)],
    styles: &[(String, String)],
    children: &[VNode],
    ctx: &mut Context<'_>,
) {
    if ctx.options.pretty {
        ctx.add_indent();
    }
    ctx.add(&open_tag(tag, attributes, styles));

    if is_self_closing(tag) {
        ctx.newline();
        return;
    }

    // Text-only content stays on the tag's line
    if !has_element_children(children) {
        for child in children {
            if let VNode::Text { content } = child {
                ctx.add(&escape_html(content));
            }
        }
        ctx.add(&format!("</{}>", tag));
        ctx.newline();
        return;
    }

    ctx.newline();
    ctx.indent();
    for child in children {
        compile_vnode(child, ctx);
    }
    ctx.dedent();
    ctx.add_line(&format!("</{}>", tag));
}

fn open_tag(tag: &str, attributes: &[(String, String)], styles: &[(String, String)]) -> String {
    let mut out = format!("<{}", tag);

    for (name, value) in attributes {
        out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
    }

    if !styles.is_empty() {
        let declarations = styles
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect::<Vec<_>>()
            .join("; ");
        out.push_str(&format!(" style=\"{}\"", escape_html(&declarations)));
    }

    if is_self_closing(tag) {
        out.push_str(" />");
    } else {
        out.push('>');
    }
    out
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn has_element_children(children: &[VNode]) -> bool {
    children
        .iter()
        .any(|child| !matches!(child, VNode::Text { .. }))
}
