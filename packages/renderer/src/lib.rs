//! # Sitecraft Renderer
//!
//! Turns a saved page into static HTML. The renderer only sees a
//! [`SerializedDocument`](sitecraft_common::SerializedDocument) and a
//! component registry; it never touches a live editing session.
//!
//! ```rust,ignore
//! let doc = SerializedDocument::from_json(&json)?;
//! let registry = ComponentRegistry::builtin()?;
//! let html = sitecraft_renderer::render(&doc, &registry)?;
//! ```

mod compiler;

pub use compiler::{
    build_vnode, render, render_vnode, render_with_options, PageShell, RenderError,
    RenderOptions,
};
