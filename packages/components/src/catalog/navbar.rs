//! Site navigation bar: logo, menu links and an optional call-to-action.
//!
//! The navbar is a self-contained block. Its menu lives in the `menuItems`
//! list prop rather than in child nodes.

use super::{link_href, safe_url, ALIGNMENT_OPTIONS, FONT_WEIGHT_OPTIONS, SETTINGS_DEBOUNCE_MS};
use crate::definition::ComponentDefinition;
use crate::settings::{Condition, SettingsField};
use sitecraft_common::{PropValue, Props, Record, VNode};

const LAYOUT: &str = "Layout & Style";
const LOGO: &str = "Logo";
const MENU: &str = "Menu Items";
const ACTION: &str = "Action Button";

fn menu_item(id: &str, text: &str, href: &str) -> PropValue {
    PropValue::record([
        ("id", PropValue::text(id)),
        ("text", PropValue::text(text)),
        ("href", PropValue::text(href)),
    ])
}

pub fn navbar() -> ComponentDefinition {
    let debounce = SETTINGS_DEBOUNCE_MS;
    let has_action = || Condition::not_empty("actionButtonText");

    let new_item: Record = [
        ("text".to_string(), PropValue::text("New Link")),
        ("href".to_string(), PropValue::text("#")),
    ]
    .into_iter()
    .collect();

    ComponentDefinition::leaf("Navbar", render_navbar)
        .display_name("Navbar")
        .prop("background", "var(--navbar-bg, #1F2937)")
        .prop("paddingX", 4)
        .prop("paddingY", 1)
        .prop("sticky", false)
        .prop("containerWidth", "contained")
        .prop("maxWidth", 1280)
        .prop("borderBottomColor", "var(--navbar-border-color, #374151)")
        .prop("borderBottomWidth", 1)
        .prop("height", "auto")
        .prop("logoType", "text")
        .prop(
            "logoImageUrl",
            "https://via.placeholder.com/120x40/ffffff/9ca3af?text=Logo",
        )
        .prop("logoText", "SiteLogo")
        .prop("logoLink", "/")
        .prop("logoWidth", 120)
        .prop("logoTextSize", 1.25)
        .prop("logoTextColor", "var(--navbar-logo-color, #E5E7EB)")
        .prop(
            "menuItems",
            vec![menu_item("1", "Home", "/"), menu_item("2", "About", "/about")],
        )
        .prop("menuAlignment", "left")
        .prop("linkColor", "var(--navbar-link-color, #D1D5DB)")
        .prop("linkHoverColor", "var(--navbar-link-hover-color, #FFFFFF)")
        .prop("linkFontSize", 0.875)
        .prop("linkFontWeight", "500")
        .prop("actionButtonText", "Get Started")
        .prop("actionButtonLink", "#")
        .prop("actionButtonBackground", "var(--button-primary-bg, #6D28D9)")
        .prop("actionButtonColor", "var(--button-primary-color, #FFFFFF)")
        .prop("actionButtonSize", "medium")
        .fields([
            SettingsField::text("background", "Background")
                .debounced(debounce)
                .in_group(LAYOUT),
            SettingsField::decimal("paddingX", "Padding X (rem)", 4.0)
                .min(0.0)
                .step(0.1)
                .debounced(debounce)
                .in_group(LAYOUT),
            SettingsField::decimal("paddingY", "Padding Y (rem)", 1.0)
                .min(0.0)
                .step(0.1)
                .debounced(debounce)
                .in_group(LAYOUT),
            SettingsField::text("height", "Height (px, auto)")
                .debounced(debounce)
                .in_group(LAYOUT),
            SettingsField::select(
                "containerWidth",
                "Content Width",
                &[("contained", "Contained"), ("full", "Full Width")],
            )
            .debounced(debounce)
            .in_group(LAYOUT),
            SettingsField::integer("maxWidth", "Max Width (px)", 1280.0)
                .min(300.0)
                .debounced(debounce)
                .in_group(LAYOUT)
                .visible_when(Condition::equals("containerWidth", "contained")),
            SettingsField::integer("borderBottomWidth", "Border Bottom Width (px)", 0.0)
                .min(0.0)
                .debounced(debounce)
                .in_group(LAYOUT),
            SettingsField::text("borderBottomColor", "Border Bottom Color")
                .debounced(debounce)
                .in_group(LAYOUT),
            SettingsField::toggle("sticky", "Sticky Navbar")
                .debounced(debounce)
                .in_group(LAYOUT),
            SettingsField::select("logoType", "Logo Type", &[("text", "Text"), ("image", "Image")])
                .in_group(LOGO),
            SettingsField::text("logoImageUrl", "Logo Image URL")
                .in_group(LOGO)
                .visible_when(Condition::equals("logoType", "image")),
            SettingsField::integer("logoWidth", "Logo Width (px)", 10.0)
                .min(10.0)
                .debounced(debounce)
                .in_group(LOGO)
                .visible_when(Condition::equals("logoType", "image")),
            SettingsField::text("logoText", "Logo Text")
                .in_group(LOGO)
                .visible_when(Condition::equals("logoType", "text")),
            SettingsField::text("logoTextColor", "Logo Text Color").in_group(LOGO),
            SettingsField::decimal("logoTextSize", "Logo Text Size (rem)", 1.0)
                .min(0.5)
                .step(0.1)
                .debounced(debounce)
                .in_group(LOGO),
            SettingsField::text("logoLink", "Logo Link URL").in_group(LOGO),
            SettingsField::select("menuAlignment", "Menu Alignment", ALIGNMENT_OPTIONS)
                .debounced(debounce)
                .in_group(MENU),
            SettingsField::list(
                "menuItems",
                "Menu Items",
                &[("text", "Text"), ("href", "URL")],
                new_item,
            )
            .debounced(debounce)
            .in_group(MENU),
            SettingsField::text("linkColor", "Link Color").in_group(MENU),
            SettingsField::text("linkHoverColor", "Link Hover Color").in_group(MENU),
            SettingsField::decimal("linkFontSize", "Link Font Size (rem)", 0.75)
                .min(0.5)
                .step(0.05)
                .debounced(debounce)
                .in_group(MENU),
            SettingsField::select("linkFontWeight", "Link Font Weight", FONT_WEIGHT_OPTIONS)
                .in_group(MENU),
            SettingsField::text("actionButtonText", "Button Text (Optional)").in_group(ACTION),
            SettingsField::text("actionButtonLink", "Button Link URL")
                .in_group(ACTION)
                .visible_when(has_action()),
            SettingsField::select(
                "actionButtonSize",
                "Button Size",
                &[("small", "Small"), ("medium", "Medium"), ("large", "Large")],
            )
            .in_group(ACTION)
            .visible_when(has_action()),
            SettingsField::text("actionButtonBackground", "Button Background")
                .in_group(ACTION)
                .visible_when(has_action()),
            SettingsField::text("actionButtonColor", "Button Text Color")
                .in_group(ACTION)
                .visible_when(has_action()),
        ])
}

/// CSS variable padding/font values of the action button per size
fn button_metrics(size: &str) -> (String, String, String) {
    let (size, x, y, font) = match size {
        "small" => ("small", "0.75rem", "0.375rem", "0.875rem"),
        "large" => ("large", "1.25rem", "0.625rem", "1.125rem"),
        _ => ("medium", "1rem", "0.5rem", "1rem"),
    };
    (
        format!("var(--button-padding-x-{}, {})", size, x),
        format!("var(--button-padding-y-{}, {})", size, y),
        format!("var(--button-font-size-{}, {})", size, font),
    )
}

fn render_navbar(props: &Props, _children: Vec<VNode>) -> VNode {
    let sticky = props.bool_or("sticky", false);
    let menu_alignment = props.str_or("menuAlignment", "left");

    let mut nav = VNode::element("nav")
        .with_style("padding-top", props.dimension("paddingY", "rem"))
        .with_style("padding-bottom", props.dimension("paddingY", "rem"))
        .with_style("background-color", props.css("background"))
        .with_style("width", "100%")
        .with_style("position", if sticky { "sticky" } else { "relative" });
    if sticky {
        nav = nav.with_style("top", "0").with_style("z-index", "50");
    }
    nav = nav
        .with_style(
            "border-bottom",
            format!(
                "{} solid {}",
                props.dimension("borderBottomWidth", "px"),
                props.css("borderBottomColor")
            ),
        )
        .with_style("box-sizing", "border-box");

    let min_height = match props.get("height") {
        Some(PropValue::Number(n)) => format!("{}px", n),
        _ => "40px".to_string(),
    };
    let mut container = VNode::element("div")
        .with_style("width", "100%")
        .with_style("height", props.dimension("height", "px"))
        .with_style("min-height", min_height)
        .with_style("padding-left", props.dimension("paddingX", "rem"))
        .with_style("padding-right", props.dimension("paddingX", "rem"))
        .with_style("display", "flex")
        .with_style("align-items", "center")
        .with_style("gap", "1.5rem")
        .with_style("justify-content", "space-between");
    if props.str_or("containerWidth", "contained") == "contained" {
        container = container
            .with_style("max-width", props.dimension("maxWidth", "px"))
            .with_style("margin-left", "auto")
            .with_style("margin-right", "auto");
    }

    container = container
        .with_child(render_logo(props))
        .with_child(render_menu(props, menu_alignment));

    let action_text = props.str_or("actionButtonText", "");
    if !action_text.is_empty() {
        let (pad_x, pad_y, font_size) = button_metrics(props.str_or("actionButtonSize", "medium"));
        let button = VNode::element("a")
            .with_attr("href", link_href(props.str_or("actionButtonLink", "")))
            .with_style("display", "inline-block")
            .with_style("padding-top", pad_y.as_str())
            .with_style("padding-bottom", pad_y.as_str())
            .with_style("padding-left", pad_x.as_str())
            .with_style("padding-right", pad_x.as_str())
            .with_style("background-color", props.css("actionButtonBackground"))
            .with_style("color", props.css("actionButtonColor"))
            .with_style("border-radius", "var(--button-border-radius, 6px)")
            .with_style("font-size", font_size)
            .with_style("font-weight", "500")
            .with_style("text-decoration", "none")
            .with_style("text-align", "center")
            .with_style("flex-shrink", "0")
            .with_style("white-space", "nowrap")
            .with_child(VNode::text(action_text));

        let mut wrapper = VNode::element("div");
        if menu_alignment == "center" {
            wrapper = wrapper.with_style("margin-left", "auto");
        }
        container = container.with_child(wrapper.with_child(button));
    }

    nav.with_child(container)
}

fn render_logo(props: &Props) -> VNode {
    let logo_text = props.str_or("logoText", "");
    let mark = if props.str_or("logoType", "text") == "image" {
        VNode::element("img")
            .with_attr("src", safe_url(props.str_or("logoImageUrl", "")).unwrap_or(""))
            .with_attr("alt", non_empty_or(logo_text, "Logo"))
            .with_style("display", "block")
            .with_style("height", "auto")
            .with_style("width", props.dimension("logoWidth", "px"))
    } else {
        VNode::element("span")
            .with_style("font-size", props.dimension("logoTextSize", "rem"))
            .with_style("font-weight", "600")
            .with_style("color", props.css("logoTextColor"))
            .with_style("text-decoration", "none")
            .with_style("white-space", "nowrap")
            .with_child(VNode::text(logo_text))
    };

    VNode::element("div").with_style("flex-shrink", "0").with_child(
        VNode::element("a")
            .with_attr("href", link_href(props.str_or("logoLink", "")))
            .with_style("text-decoration", "none")
            .with_child(mark),
    )
}

fn render_menu(props: &Props, alignment: &str) -> VNode {
    let links = props
        .list("menuItems")
        .iter()
        .filter_map(PropValue::as_record)
        .map(|item| {
            let field = |key: &str| item.get(key).and_then(PropValue::as_str).unwrap_or("");
            VNode::element("a")
                .with_attr("href", link_href(field("href")))
                .with_style("font-size", props.dimension("linkFontSize", "rem"))
                .with_style("color", props.css("linkColor"))
                .with_style("text-decoration", "none")
                .with_style("transition", "color 0.15s ease-in-out")
                .with_style("font-weight", props.css("linkFontWeight"))
                .with_child(VNode::text(field("text")))
        })
        .collect();

    VNode::element("div")
        .with_style("display", "flex")
        .with_style("gap", "1.25rem")
        .with_style("flex-wrap", "wrap")
        .with_style("align-items", "center")
        .with_style(
            "margin-left",
            if matches!(alignment, "center" | "right") { "auto" } else { "1.5rem" },
        )
        .with_style(
            "margin-right",
            if alignment == "center" { "auto" } else { "1.5rem" },
        )
        .with_children(links)
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
