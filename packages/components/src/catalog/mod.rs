//! Built-in components.
//!
//! Render functions here describe only the published page. Editor
//! affordances (selection outlines, drop-here placeholders, drag cursors,
//! click handlers) have no place in this output.

mod accordion;
mod content;
mod layout;
mod navbar;

use crate::definition::ComponentDefinition;
use crate::registry::{ComponentRegistry, RegistryError};

/// Debounce window of settings-panel inputs
pub const SETTINGS_DEBOUNCE_MS: u64 = 300;

/// Debounce window of rich text editing
pub const TEXT_DEBOUNCE_MS: u64 = 500;

pub(crate) const ALIGNMENT_OPTIONS: &[(&str, &str)] =
    &[("left", "Left"), ("center", "Center"), ("right", "Right")];

pub(crate) const TEXT_ALIGN_OPTIONS: &[(&str, &str)] = &[
    ("left", "Left"),
    ("center", "Center"),
    ("right", "Right"),
    ("justify", "Justify"),
];

pub(crate) const GRID_ALIGN_OPTIONS: &[(&str, &str)] = &[
    ("start", "Start"),
    ("center", "Center"),
    ("end", "End"),
    ("stretch", "Stretch"),
];

pub(crate) const FONT_WEIGHT_OPTIONS: &[(&str, &str)] = &[
    ("300", "Light (300)"),
    ("400", "Normal (400)"),
    ("500", "Medium (500)"),
    ("600", "Semi-Bold (600)"),
    ("700", "Bold (700)"),
];

pub fn definitions() -> Vec<ComponentDefinition> {
    vec![
        layout::container(),
        layout::column(),
        layout::section(),
        layout::grid(),
        layout::bg_image(),
        layout::spacer(),
        content::button(),
        content::text(),
        content::heading(),
        content::paragraph(),
        content::image(),
        content::link(),
        navbar::navbar(),
        accordion::accordion(),
        accordion::accordion_item(),
    ]
}

pub fn register_all(registry: &mut ComponentRegistry) -> Result<(), RegistryError> {
    for definition in definitions() {
        registry.register(definition)?;
    }
    Ok(())
}

/// `left | center | right` to a flex `justify-content` value
pub(crate) fn flex_justify(alignment: &str) -> &'static str {
    match alignment {
        "center" => "center",
        "right" => "flex-end",
        _ => "flex-start",
    }
}

pub(crate) fn grid_template(columns: i64) -> String {
    format!("repeat({}, minmax(0, 1fr))", columns.max(1))
}

const URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// A user supplied URL that is safe to publish, or `None`.
///
/// Relative references pass through. Absolute ones must use one of
/// `URL_SCHEMES`; anything else (`javascript:`, `data:` and the like) is
/// refused.
pub(crate) fn safe_url(raw: &str) -> Option<&str> {
    let url = raw.trim();
    match url.find(|c: char| matches!(c, ':' | '/' | '?' | '#')) {
        Some(end) if url[end..].starts_with(':') => {
            let scheme = &url[..end];
            URL_SCHEMES
                .iter()
                .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
                .then_some(url)
        }
        _ => Some(url),
    }
}

/// A link target for `href`, falling back to `#` when empty or unsafe
pub(crate) fn link_href(raw: &str) -> &str {
    match safe_url(raw) {
        Some(url) if !url.is_empty() => url,
        _ => "#",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecraft_common::VNode;

    #[test]
    fn test_every_settings_field_has_a_default() {
        for def in definitions() {
            for field in &def.settings {
                assert!(
                    def.default_props.contains(&field.prop),
                    "{}.{} has no default",
                    def.type_name,
                    field.prop
                );
            }
        }
    }

    #[test]
    fn test_safe_url_allows_web_and_relative_urls() {
        for url in [
            "https://example.com/a?b=c",
            "HTTP://example.com",
            "mailto:shop@example.com",
            "tel:+15550100",
            "/about",
            "#section",
            "?page=2",
            "../up",
            "images/logo.png",
            "search?q=a:b",
        ] {
            assert_eq!(safe_url(url), Some(url), "{}", url);
        }
        assert_eq!(safe_url("  /padded "), Some("/padded"));
    }

    #[test]
    fn test_safe_url_refuses_script_schemes() {
        for url in [
            "javascript:alert(1)",
            "  JavaScript:alert(1)",
            "java\tscript:alert(1)",
            "vbscript:msgbox(1)",
            "data:text/html;base64,PHNjcmlwdD4=",
        ] {
            assert_eq!(safe_url(url), None, "{}", url);
        }
    }

    #[test]
    fn test_link_href_fallback() {
        assert_eq!(link_href(""), "#");
        assert_eq!(link_href("javascript:alert(1)"), "#");
        assert_eq!(link_href("/shop"), "/shop");
    }

    #[test]
    fn test_empty_containers_render_no_placeholder() {
        for def in definitions().into_iter().filter(|d| d.can_contain_children) {
            let node = def.render_with(&def.default_props, vec![]);
            let text = collect_text(&node);
            assert!(!text.contains("Drop"), "{} rendered placeholder {:?}", def.type_name, text);
        }
    }

    #[test]
    fn test_no_editor_cursor_in_output() {
        for def in definitions() {
            let node = def.render_with(&def.default_props, vec![]);
            assert!(!has_style_value(&node, "move"), "{} leaks drag cursor", def.type_name);
        }
    }

    fn collect_text(node: &VNode) -> String {
        match node {
            VNode::Text { content } => content.clone(),
            VNode::Element { children, .. } => children.iter().map(collect_text).collect(),
        }
    }

    fn has_style_value(node: &VNode, needle: &str) -> bool {
        match node {
            VNode::Text { .. } => false,
            VNode::Element { styles, children, .. } => {
                styles.iter().any(|(_, v)| v == needle)
                    || children.iter().any(|c| has_style_value(c, needle))
            }
        }
    }
}
