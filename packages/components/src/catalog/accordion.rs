use super::SETTINGS_DEBOUNCE_MS;
use crate::definition::ComponentDefinition;
use crate::settings::SettingsField;
use sitecraft_common::{Props, VNode};

const ITEM_BORDER: &str = "1px solid var(--accordion-item-border-color, #4A5568)";

pub fn accordion() -> ComponentDefinition {
    ComponentDefinition::container("Accordion", render_accordion)
        .display_name("Accordion")
        .admit_only(&["AccordionItem"])
        .prop("gap", 2)
        .prop("marginTop", 10)
        .prop("marginBottom", 10)
        .fields([
            SettingsField::integer("gap", "Gap Between Items (px)", 0.0).min(0.0),
            SettingsField::integer("marginTop", "Margin Top (px)", 0.0),
            SettingsField::integer("marginBottom", "Margin Bottom (px)", 0.0),
        ])
}

fn render_accordion(props: &Props, children: Vec<VNode>) -> VNode {
    VNode::element("div")
        .with_style("display", "flex")
        .with_style("flex-direction", "column")
        .with_style("gap", props.dimension("gap", "px"))
        .with_style("margin-top", props.dimension("marginTop", "px"))
        .with_style("margin-bottom", props.dimension("marginBottom", "px"))
        .with_style("width", "100%")
        .with_style("padding", "5px")
        .with_style("box-sizing", "border-box")
        .with_children(children)
}

pub fn accordion_item() -> ComponentDefinition {
    let debounce = SETTINGS_DEBOUNCE_MS;
    let padding = |prop: &str, label: &str, fallback: f64| {
        SettingsField::integer(prop, label, fallback)
            .min(0.0)
            .debounced(debounce)
            .in_group("Padding (px)")
    };

    ComponentDefinition::container("AccordionItem", render_accordion_item)
        .display_name("Accordion Item")
        .prop("title", "Accordion Title")
        .prop("titleBackground", "var(--accordion-item-title-bg, #2D3748)")
        .prop("titleColor", "var(--accordion-item-title-color, #E2E8F0)")
        .prop("titleSize", "medium")
        .prop("titlePaddingX", 16)
        .prop("titlePaddingXMd", 18)
        .prop("titlePaddingXLg", 20)
        .prop("titlePaddingY", 10)
        .prop("titlePaddingYMd", 12)
        .prop("titlePaddingYLg", 14)
        .prop("contentBackground", "var(--accordion-item-content-bg, #1A202C)")
        .prop("contentPadding", 15)
        .prop("contentPaddingMd", 18)
        .prop("contentPaddingLg", 20)
        .fields([
            SettingsField::text("title", "Title").debounced(debounce),
            SettingsField::text("titleBackground", "Title Background").debounced(debounce),
            SettingsField::text("titleColor", "Title Color").debounced(debounce),
            SettingsField::select(
                "titleSize",
                "Title Size",
                &[("small", "Small"), ("medium", "Medium"), ("large", "Large")],
            )
            .debounced(debounce),
            SettingsField::text("contentBackground", "Content Background").debounced(debounce),
            padding("titlePaddingX", "Title X", 16.0),
            padding("titlePaddingXMd", "Title X (md)", 18.0),
            padding("titlePaddingXLg", "Title X (lg)", 20.0),
            padding("titlePaddingY", "Title Y", 10.0),
            padding("titlePaddingYMd", "Title Y (md)", 12.0),
            padding("titlePaddingYLg", "Title Y (lg)", 14.0),
            padding("contentPadding", "Content", 15.0),
            padding("contentPaddingMd", "Content (md)", 18.0),
            padding("contentPaddingLg", "Content (lg)", 20.0),
        ])
}

fn title_size(size: &str) -> String {
    let (size, fallback) = match size {
        "small" => ("small", "0.875rem"),
        "large" => ("large", "1.125rem"),
        _ => ("medium", "1rem"),
    };
    format!("var(--accordion-title-{}-size, {})", size, fallback)
}

/// A collapsed `<details>` element; the browser toggles it without script.
fn render_accordion_item(props: &Props, children: Vec<VNode>) -> VNode {
    let summary = VNode::element("summary")
        .with_style("display", "flex")
        .with_style("justify-content", "space-between")
        .with_style("align-items", "center")
        .with_style("padding-top", props.dimension("titlePaddingY", "px"))
        .with_style("padding-bottom", props.dimension("titlePaddingY", "px"))
        .with_style("padding-left", props.dimension("titlePaddingX", "px"))
        .with_style("padding-right", props.dimension("titlePaddingX", "px"))
        .with_style("background", props.css("titleBackground"))
        .with_style("color", props.css("titleColor"))
        .with_style("cursor", "pointer")
        .with_style("font-weight", "500")
        .with_style("font-size", title_size(props.str_or("titleSize", "medium")))
        .with_style("line-height", "1.5")
        .with_child(
            VNode::element("span")
                .with_style("margin-right", "8px")
                .with_child(VNode::text(props.str_or("title", ""))),
        );

    let content = VNode::element("div")
        .with_style("padding", props.dimension("contentPadding", "px"))
        .with_style("border-top", ITEM_BORDER)
        .with_style("background", props.css("contentBackground"))
        .with_children(children);

    VNode::element("details")
        .with_attr("data-title-pad-x-md", props.css("titlePaddingXMd"))
        .with_attr("data-title-pad-x-lg", props.css("titlePaddingXLg"))
        .with_attr("data-title-pad-y-md", props.css("titlePaddingYMd"))
        .with_attr("data-title-pad-y-lg", props.css("titlePaddingYLg"))
        .with_attr("data-content-pad-md", props.css("contentPaddingMd"))
        .with_attr("data-content-pad-lg", props.css("contentPaddingLg"))
        .with_style("border", ITEM_BORDER)
        .with_style("border-radius", "6px")
        .with_style("overflow", "hidden")
        .with_style("background", props.css("contentBackground"))
        .with_child(summary)
        .with_child(content)
}
