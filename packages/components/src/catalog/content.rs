use super::{
    flex_justify, link_href, safe_url, ALIGNMENT_OPTIONS, FONT_WEIGHT_OPTIONS,
    SETTINGS_DEBOUNCE_MS, TEXT_ALIGN_OPTIONS, TEXT_DEBOUNCE_MS,
};
use crate::definition::ComponentDefinition;
use crate::settings::{SelectOption, SettingsField};
use sitecraft_common::{PropValue, Props, VNode};

pub fn button() -> ComponentDefinition {
    ComponentDefinition::leaf("Button", render_button)
        .prop("text", "Click Me")
        .prop("alignment", "left")
        .prop("background", "#6D28D9")
        .prop("color", "#ffffff")
        .prop("paddingX", 15)
        .prop("paddingY", 10)
        .prop("margin", 5)
        .fields([
            SettingsField::text("text", "Button Text"),
            SettingsField::select("alignment", "Alignment", ALIGNMENT_OPTIONS),
            SettingsField::color("background", "Background Color"),
            SettingsField::color("color", "Text Color"),
            SettingsField::integer("paddingX", "Padding X (px)", 0.0),
            SettingsField::integer("paddingY", "Padding Y (px)", 0.0),
            SettingsField::integer("margin", "Margin (px)", 0.0),
        ])
}

fn render_button(props: &Props, _children: Vec<VNode>) -> VNode {
    let button = VNode::element("button")
        .with_attr("type", "button")
        .with_style(
            "padding",
            format!(
                "{} {}",
                props.dimension("paddingY", "px"),
                props.dimension("paddingX", "px")
            ),
        )
        .with_style("background-color", props.css("background"))
        .with_style("color", props.css("color"))
        .with_style("border", "none")
        .with_style("border-radius", "5px")
        .with_style("font-size", "14px")
        .with_style("display", "block")
        .with_child(VNode::text(props.str_or("text", "")));

    VNode::element("div")
        .with_style("display", "flex")
        .with_style("justify-content", flex_justify(props.str_or("alignment", "left")))
        .with_style("margin", props.dimension("margin", "px"))
        .with_child(button)
}

pub fn text() -> ComponentDefinition {
    ComponentDefinition::leaf("Text", render_text)
        .prop("text", "Hi there")
        .prop("textAlign", "left")
        .prop("fontSize", 16)
        .prop("fontWeight", "400")
        .prop("color", "#E5E7EB")
        .prop("margin", 5)
        .fields([
            SettingsField::multiline("text", "Text Content").debounced(TEXT_DEBOUNCE_MS),
            SettingsField::select("textAlign", "Text Align", TEXT_ALIGN_OPTIONS),
            SettingsField::integer("fontSize", "Font Size (px)", 16.0).min(1.0),
            SettingsField::select(
                "fontWeight",
                "Font Weight",
                &[
                    ("400", "Normal"),
                    ("500", "Medium"),
                    ("600", "Semi-Bold"),
                    ("700", "Bold"),
                ],
            ),
            SettingsField::color("color", "Text Color"),
            SettingsField::integer("margin", "Margin (px)", 0.0),
        ])
}

fn render_text(props: &Props, _children: Vec<VNode>) -> VNode {
    VNode::element("div")
        .with_style("text-align", props.css("textAlign"))
        .with_style("font-size", props.dimension("fontSize", "px"))
        .with_style("font-weight", props.css("fontWeight"))
        .with_style("color", props.css("color"))
        .with_style("margin", props.dimension("margin", "px"))
        .with_child(VNode::text(props.str_or("text", "")))
}

pub fn heading() -> ComponentDefinition {
    let levels = (1..=6)
        .map(|n| SelectOption {
            value: PropValue::int(n),
            label: format!("H{}", n),
        })
        .collect();

    // An unset weight derives from the level
    let weights = std::iter::once(SelectOption {
        value: PropValue::Null,
        label: "Default for Level".to_string(),
    })
    .chain(
        FONT_WEIGHT_OPTIONS
            .iter()
            .chain(&[("800", "Extra-Bold (800)"), ("900", "Black (900)")])
            .map(|(value, label)| SelectOption {
                value: PropValue::text(*value),
                label: label.to_string(),
            }),
    )
    .collect();

    ComponentDefinition::leaf("Heading", render_heading)
        .display_name("Heading")
        .prop("text", "Type Your Heading")
        .prop("level", 2)
        .prop("textAlign", "left")
        .prop("color", "#F3F4F6")
        .prop("fontWeight", PropValue::Null)
        .prop("marginTop", 10)
        .prop("marginBottom", 5)
        .fields([
            SettingsField::text("text", "Text").debounced(TEXT_DEBOUNCE_MS),
            SettingsField::select_values("level", "Level", levels),
            SettingsField::select("textAlign", "Text Align", TEXT_ALIGN_OPTIONS),
            SettingsField::select_values("fontWeight", "Font Weight", weights),
            SettingsField::color("color", "Color"),
            SettingsField::integer("marginTop", "Margin Top (px)", 0.0).min(0.0),
            SettingsField::integer("marginBottom", "Margin Bottom (px)", 0.0).min(0.0),
        ])
}

/// Weight implied by the heading level when none is set
fn level_weight(level: i64) -> &'static str {
    match level {
        1 => "700",
        2 | 3 => "600",
        _ => "500",
    }
}

fn render_heading(props: &Props, _children: Vec<VNode>) -> VNode {
    let level = props.i64_or("level", 2).clamp(1, 6);
    let weight = match props.str_or("fontWeight", "") {
        "" => level_weight(level).to_string(),
        explicit => explicit.to_string(),
    };

    VNode::element(format!("h{}", level))
        .with_style("text-align", props.css("textAlign"))
        .with_style("color", props.css("color"))
        .with_style("margin-top", props.dimension("marginTop", "px"))
        .with_style("margin-bottom", props.dimension("marginBottom", "px"))
        .with_style("font-weight", weight)
        .with_child(VNode::text(props.str_or("text", "")))
}

pub fn paragraph() -> ComponentDefinition {
    ComponentDefinition::leaf("Paragraph", render_paragraph)
        .display_name("Paragraph")
        .prop(
            "text",
            "This is a paragraph. Start typing or edit properties in the settings panel.",
        )
        .prop("textAlign", "left")
        .prop("textSize", "md")
        .prop("fontWeight", "400")
        .prop("color", "var(--text-color-base, #D1D5DB)")
        .prop("lineHeight", 1.6)
        .prop("marginTop", 0)
        .prop("marginBottom", 10)
        .fields([
            SettingsField::multiline("text", "Text Content").debounced(TEXT_DEBOUNCE_MS),
            SettingsField::select(
                "textSize",
                "Text Size",
                &[
                    ("xs", "X-Small (xs)"),
                    ("sm", "Small (sm)"),
                    ("md", "Medium (md)"),
                    ("lg", "Large (lg)"),
                    ("xl", "X-Large (xl)"),
                    ("2xl", "2X-Large (2xl)"),
                ],
            ),
            SettingsField::select("textAlign", "Text Align", TEXT_ALIGN_OPTIONS),
            SettingsField::select("fontWeight", "Font Weight", &FONT_WEIGHT_OPTIONS[..4]),
            SettingsField::color("color", "Color"),
            SettingsField::decimal("lineHeight", "Line Height", 1.6).min(0.5).step(0.1),
            SettingsField::integer("marginTop", "Margin Top (px)", 0.0).min(0.0),
            SettingsField::integer("marginBottom", "Margin Bottom (px)", 0.0).min(0.0),
        ])
}

fn text_size(size: &str) -> String {
    let (size, fallback) = match size {
        "xs" => ("xs", "0.75rem"),
        "sm" => ("sm", "0.875rem"),
        "lg" => ("lg", "1.125rem"),
        "xl" => ("xl", "1.25rem"),
        "2xl" => ("2xl", "1.5rem"),
        _ => ("md", "1rem"),
    };
    format!("var(--text-{}-size, {})", size, fallback)
}

fn render_paragraph(props: &Props, _children: Vec<VNode>) -> VNode {
    VNode::element("p")
        .with_style("text-align", props.css("textAlign"))
        .with_style("font-size", text_size(props.str_or("textSize", "md")))
        .with_style("font-weight", props.css("fontWeight"))
        .with_style("color", props.css("color"))
        .with_style("line-height", props.css("lineHeight"))
        .with_style("margin-top", props.dimension("marginTop", "px"))
        .with_style("margin-bottom", props.dimension("marginBottom", "px"))
        .with_child(VNode::text(props.str_or("text", "")))
}

pub fn image() -> ComponentDefinition {
    ComponentDefinition::leaf("Image", render_image)
        .prop("src", "https://placehold.co/200x200")
        .prop("alt", "Placeholder Image")
        .prop("width", "50%")
        .prop("height", "auto")
        .prop("objectFit", "cover")
        .prop("alignment", "left")
        .prop("margin", 5)
        .fields([
            SettingsField::text("src", "Image URL").debounced(SETTINGS_DEBOUNCE_MS),
            SettingsField::text("alt", "Alt Text").debounced(SETTINGS_DEBOUNCE_MS),
            SettingsField::text("width", "Width (px, %)").debounced(SETTINGS_DEBOUNCE_MS),
            SettingsField::text("height", "Height (px, %, auto)").debounced(SETTINGS_DEBOUNCE_MS),
            SettingsField::select(
                "objectFit",
                "Object Fit",
                &[
                    ("cover", "Cover"),
                    ("contain", "Contain"),
                    ("fill", "Fill"),
                    ("none", "None"),
                    ("scale-down", "Scale Down"),
                ],
            ),
            SettingsField::select("alignment", "Alignment", ALIGNMENT_OPTIONS),
            SettingsField::integer("margin", "Margin (px)", 0.0),
        ])
}

fn render_image(props: &Props, _children: Vec<VNode>) -> VNode {
    let img = VNode::element("img")
        .with_attr("src", safe_url(props.str_or("src", "")).unwrap_or(""))
        .with_attr("alt", props.str_or("alt", ""))
        .with_style("display", "block")
        .with_style("width", "100%")
        .with_style("height", "100%")
        .with_style("object-fit", props.css("objectFit"));

    VNode::element("div")
        .with_style("display", "flex")
        .with_style("justify-content", flex_justify(props.str_or("alignment", "left")))
        .with_style("width", props.dimension("width", "px"))
        .with_style("height", props.dimension("height", "px"))
        .with_style("margin", props.dimension("margin", "px"))
        .with_child(img)
}

pub fn link() -> ComponentDefinition {
    ComponentDefinition::leaf("Link", render_link)
        .prop("text", "Learn More")
        .prop("href", "#")
        .prop("target", "_self")
        .prop("color", "#93C5FD")
        .prop("fontWeight", "400")
        .prop("fontSize", 16)
        .prop("underline", "hover")
        .prop("alignment", "left")
        .prop("marginTop", 5)
        .prop("marginBottom", 5)
        .prop("marginLeft", 0)
        .prop("marginRight", 0)
        .fields([
            SettingsField::text("text", "Link Text").debounced(SETTINGS_DEBOUNCE_MS),
            SettingsField::text("href", "URL (href)").debounced(SETTINGS_DEBOUNCE_MS),
            SettingsField::select(
                "target",
                "Open In",
                &[("_self", "Same Tab"), ("_blank", "New Tab (_blank)")],
            ),
            SettingsField::select("fontWeight", "Font Weight", FONT_WEIGHT_OPTIONS),
            SettingsField::select(
                "underline",
                "Underline",
                &[("always", "Always"), ("hover", "On Hover"), ("none", "None")],
            ),
            SettingsField::select("alignment", "Alignment", ALIGNMENT_OPTIONS),
            SettingsField::color("color", "Color"),
            SettingsField::integer("fontSize", "Font Size (px)", 16.0).min(1.0),
            SettingsField::integer("marginTop", "Top", 0.0).in_group("Margin (px)"),
            SettingsField::integer("marginBottom", "Bottom", 0.0).in_group("Margin (px)"),
            SettingsField::integer("marginLeft", "Left", 0.0).in_group("Margin (px)"),
            SettingsField::integer("marginRight", "Right", 0.0).in_group("Margin (px)"),
        ])
}

fn render_link(props: &Props, _children: Vec<VNode>) -> VNode {
    let alignment = props.str_or("alignment", "left");
    let underline = props.str_or("underline", "hover");

    let margin_left = match alignment {
        "center" | "right" => "auto".to_string(),
        _ => props.dimension("marginLeft", "px"),
    };
    let margin_right = match alignment {
        "center" | "left" => "auto".to_string(),
        _ => props.dimension("marginRight", "px"),
    };

    let anchor = VNode::element("a")
        .with_attr("href", link_href(props.str_or("href", "#")))
        .with_attr("target", props.str_or("target", "_self"))
        .with_style("color", props.css("color"))
        .with_style("font-size", props.dimension("fontSize", "px"))
        .with_style("font-weight", props.css("fontWeight"))
        .with_style(
            "text-decoration",
            if underline == "always" { "underline" } else { "none" },
        )
        .with_style("display", "inline")
        .with_child(VNode::text(props.str_or("text", "")));

    let mut wrapper = VNode::element("div");
    if underline == "hover" {
        wrapper = wrapper.with_attr("class", "hover:underline");
    }

    wrapper
        .with_style("display", "block")
        .with_style("width", "max-content")
        .with_style("margin-top", props.dimension("marginTop", "px"))
        .with_style("margin-bottom", props.dimension("marginBottom", "px"))
        .with_style("margin-left", margin_left)
        .with_style("margin-right", margin_right)
        .with_child(anchor)
}
