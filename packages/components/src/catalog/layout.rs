use super::{grid_template, safe_url, GRID_ALIGN_OPTIONS, SETTINGS_DEBOUNCE_MS};
use crate::definition::ComponentDefinition;
use crate::settings::SettingsField;
use sitecraft_common::{Props, VNode};

pub fn container() -> ComponentDefinition {
    ComponentDefinition::container("Container", render_container)
        .display_name("Container")
        .prop("background", "transparent")
        .prop("padding", 10)
        .prop("margin", 0)
        .prop("flexDirection", "col")
        .prop("justifyContent", "start")
        .prop("alignItems", "start")
        .prop("gap", 0)
        .fields([
            SettingsField::color("background", "Background Color"),
            SettingsField::integer("padding", "Padding (px)", 0.0),
            SettingsField::integer("margin", "Margin (px)", 0.0),
            SettingsField::integer("gap", "Gap (px)", 0.0),
            SettingsField::select("flexDirection", "Direction", &[("col", "Column"), ("row", "Row")]),
            SettingsField::select(
                "justifyContent",
                "Justify Content",
                &[
                    ("start", "Start"),
                    ("center", "Center"),
                    ("end", "End"),
                    ("between", "Space Between"),
                    ("around", "Space Around"),
                    ("evenly", "Space Evenly"),
                ],
            ),
            SettingsField::select(
                "alignItems",
                "Align Items",
                &[
                    ("start", "Start"),
                    ("center", "Center"),
                    ("end", "End"),
                    ("stretch", "Stretch"),
                    ("baseline", "Baseline"),
                ],
            ),
        ])
}

fn render_container(props: &Props, children: Vec<VNode>) -> VNode {
    let direction = match props.str_or("flexDirection", "col") {
        "row" => "row",
        _ => "column",
    };
    let justify = match props.str_or("justifyContent", "start") {
        "center" => "center",
        "end" => "flex-end",
        "between" => "space-between",
        "around" => "space-around",
        "evenly" => "space-evenly",
        _ => "flex-start",
    };
    let align = match props.str_or("alignItems", "start") {
        "center" => "center",
        "end" => "flex-end",
        "stretch" => "stretch",
        "baseline" => "baseline",
        _ => "flex-start",
    };

    VNode::element("div")
        .with_style("display", "flex")
        .with_style("flex-direction", direction)
        .with_style("justify-content", justify)
        .with_style("align-items", align)
        .with_style("gap", props.dimension("gap", "px"))
        .with_style("padding", props.dimension("padding", "px"))
        .with_style("margin", props.dimension("margin", "px"))
        .with_style("background", props.css("background"))
        .with_children(children)
}

pub fn column() -> ComponentDefinition {
    let debounce = SETTINGS_DEBOUNCE_MS;

    ComponentDefinition::container("Column", render_column)
        .prop("columnCount", 2)
        .prop("gap", 15)
        .prop("minHeight", 100)
        .prop("width", "100%")
        .prop("showEditorBorder", true)
        .prop("marginTop", 0)
        .prop("marginBottom", 2)
        .prop("marginLeft", 0)
        .prop("marginRight", 0)
        .prop("alignItems", "center")
        .prop("justifyItems", "stretch")
        .fields([
            SettingsField::integer("columnCount", "Columns", 1.0)
                .min(1.0)
                .max(12.0)
                .step(1.0)
                .debounced(debounce),
            SettingsField::integer("gap", "Gap (px)", 0.0).min(0.0).debounced(debounce),
            SettingsField::text("minHeight", "Min Height (px, vh, auto)").debounced(debounce),
            SettingsField::text("width", "Width (px, %)").debounced(debounce),
            SettingsField::select("alignItems", "Align Items (Vertical)", GRID_ALIGN_OPTIONS)
                .debounced(debounce),
            SettingsField::select("justifyItems", "Justify Items (Horizontal)", GRID_ALIGN_OPTIONS)
                .debounced(debounce),
            SettingsField::decimal("marginTop", "Top", 0.0)
                .min(0.0)
                .step(0.1)
                .debounced(debounce)
                .in_group("Margin (rem)"),
            SettingsField::decimal("marginBottom", "Bottom", 0.0)
                .min(0.0)
                .step(0.1)
                .debounced(debounce)
                .in_group("Margin (rem)"),
            SettingsField::decimal("marginLeft", "Left", 0.0)
                .min(0.0)
                .step(0.1)
                .debounced(debounce)
                .in_group("Margin (rem)"),
            SettingsField::decimal("marginRight", "Right", 0.0)
                .min(0.0)
                .step(0.1)
                .debounced(debounce)
                .in_group("Margin (rem)"),
            SettingsField::toggle("showEditorBorder", "Show Editor Border Aid").debounced(debounce),
        ])
}

// `showEditorBorder` only affects the editing canvas.
fn render_column(props: &Props, children: Vec<VNode>) -> VNode {
    VNode::element("div")
        .with_style("display", "grid")
        .with_style("grid-template-columns", grid_template(props.i64_or("columnCount", 2)))
        .with_style("gap", props.dimension("gap", "px"))
        .with_style("width", props.dimension("width", "px"))
        .with_style("min-height", props.dimension("minHeight", "px"))
        .with_style("margin-top", props.dimension("marginTop", "rem"))
        .with_style("margin-bottom", props.dimension("marginBottom", "rem"))
        .with_style("margin-left", props.dimension("marginLeft", "rem"))
        .with_style("margin-right", props.dimension("marginRight", "rem"))
        .with_style("align-items", props.css("alignItems"))
        .with_style("justify-items", props.css("justifyItems"))
        .with_style("position", "relative")
        .with_style("box-sizing", "border-box")
        .with_children(children)
}

pub fn section() -> ComponentDefinition {
    ComponentDefinition::container("Section", render_section)
        .prop("background", "transparent")
        .prop("paddingTop", 20)
        .prop("paddingBottom", 20)
        .prop("paddingLeft", 0)
        .prop("paddingRight", 0)
        .prop("marginTop", 0)
        .prop("marginBottom", 0)
        .fields([
            SettingsField::color("background", "Background Color"),
            SettingsField::integer("paddingTop", "Padding Top (px)", 0.0).min(0.0),
            SettingsField::integer("paddingBottom", "Padding Bottom (px)", 0.0).min(0.0),
            SettingsField::integer("paddingLeft", "Padding Left (px)", 0.0).min(0.0),
            SettingsField::integer("paddingRight", "Padding Right (px)", 0.0).min(0.0),
            SettingsField::integer("marginTop", "Margin Top (px)", 0.0),
            SettingsField::integer("marginBottom", "Margin Bottom (px)", 0.0),
        ])
}

fn render_section(props: &Props, children: Vec<VNode>) -> VNode {
    VNode::element("section")
        .with_style("background", props.css("background"))
        .with_style("padding-top", props.dimension("paddingTop", "px"))
        .with_style("padding-bottom", props.dimension("paddingBottom", "px"))
        .with_style("padding-left", props.dimension("paddingLeft", "px"))
        .with_style("padding-right", props.dimension("paddingRight", "px"))
        .with_style("margin-top", props.dimension("marginTop", "px"))
        .with_style("margin-bottom", props.dimension("marginBottom", "px"))
        .with_style("width", "100%")
        .with_style("min-height", "40px")
        .with_style("position", "relative")
        .with_style("box-sizing", "border-box")
        .with_children(children)
}

pub fn grid() -> ComponentDefinition {
    ComponentDefinition::container("Grid", render_grid)
        .prop("columnCount", 3)
        .prop("gap", 15)
        .prop("padding", 10)
        .prop("marginTop", 0)
        .prop("marginBottom", 0)
        .prop("background", "transparent")
        .fields([
            SettingsField::integer("columnCount", "Columns", 1.0).min(1.0).max(12.0),
            SettingsField::integer("gap", "Gap (px)", 0.0).min(0.0),
            SettingsField::integer("padding", "Padding (px)", 0.0).min(0.0),
            SettingsField::color("background", "Background Color"),
            SettingsField::integer("marginTop", "Margin Top (px)", 0.0),
            SettingsField::integer("marginBottom", "Margin Bottom (px)", 0.0),
        ])
}

fn render_grid(props: &Props, children: Vec<VNode>) -> VNode {
    VNode::element("div")
        .with_style("display", "grid")
        .with_style("grid-template-columns", grid_template(props.i64_or("columnCount", 3)))
        .with_style("gap", props.dimension("gap", "px"))
        .with_style("padding", props.dimension("padding", "px"))
        .with_style("margin-top", props.dimension("marginTop", "px"))
        .with_style("margin-bottom", props.dimension("marginBottom", "px"))
        .with_style("background", props.css("background"))
        .with_style("width", "100%")
        .with_style("min-height", "60px")
        .with_style("position", "relative")
        .with_style("box-sizing", "border-box")
        .with_children(children)
}

pub fn bg_image() -> ComponentDefinition {
    let debounce = SETTINGS_DEBOUNCE_MS;
    let spacing = |prop: &str, label: &str, group: &str| {
        SettingsField::decimal(prop, label, 0.0)
            .min(0.0)
            .step(0.1)
            .debounced(debounce)
            .in_group(group)
    };

    ComponentDefinition::container("BgImage", render_bg_image)
        .display_name("Background Image")
        .prop(
            "bgImage",
            "https://img.freepik.com/free-photo/black-friday-elements-assortment_23-2149074076.jpg?w=1380",
        )
        .prop("backgroundSize", "cover")
        .prop("backgroundPosition", "center center")
        .prop("minHeight", "100vh")
        .prop("width", "100%")
        .prop("marginTop", 0)
        .prop("marginBottom", 0)
        .prop("marginLeft", 0)
        .prop("marginRight", 0)
        .prop("paddingTop", 0)
        .prop("paddingBottom", 0)
        .prop("paddingLeft", 0)
        .prop("paddingRight", 0)
        .fields([
            SettingsField::text("bgImage", "Background Image URL").debounced(debounce),
            SettingsField::select(
                "backgroundSize",
                "Background Size",
                &[("cover", "Cover"), ("contain", "Contain"), ("auto", "Auto")],
            )
            .debounced(debounce),
            SettingsField::text("backgroundPosition", "Background Position").debounced(debounce),
            SettingsField::text("minHeight", "Min Height (px, vh, %)").debounced(debounce),
            SettingsField::text("width", "Width (px, %)").debounced(debounce),
            spacing("paddingTop", "Top", "Padding (rem)"),
            spacing("paddingBottom", "Bottom", "Padding (rem)"),
            spacing("paddingLeft", "Left", "Padding (rem)"),
            spacing("paddingRight", "Right", "Padding (rem)"),
            spacing("marginTop", "Top", "Margin (rem)"),
            spacing("marginBottom", "Bottom", "Margin (rem)"),
            spacing("marginLeft", "Left", "Margin (rem)"),
            spacing("marginRight", "Right", "Margin (rem)"),
        ])
}

fn render_bg_image(props: &Props, children: Vec<VNode>) -> VNode {
    let background = match safe_url(props.str_or("bgImage", "")) {
        Some(image) if !image.is_empty() => format!("url(\"{}\")", css_string(image)),
        _ => "none".to_string(),
    };

    VNode::element("div")
        .with_style("background-image", background)
        .with_style("background-size", props.css("backgroundSize"))
        .with_style("background-position", props.css("backgroundPosition"))
        .with_style("background-repeat", "no-repeat")
        .with_style("width", props.dimension("width", "px"))
        .with_style("min-height", props.dimension("minHeight", "px"))
        .with_style("margin-top", props.dimension("marginTop", "rem"))
        .with_style("margin-bottom", props.dimension("marginBottom", "rem"))
        .with_style("margin-left", props.dimension("marginLeft", "rem"))
        .with_style("margin-right", props.dimension("marginRight", "rem"))
        .with_style("padding-top", props.dimension("paddingTop", "rem"))
        .with_style("padding-bottom", props.dimension("paddingBottom", "rem"))
        .with_style("padding-left", props.dimension("paddingLeft", "rem"))
        .with_style("padding-right", props.dimension("paddingRight", "rem"))
        .with_style("box-sizing", "border-box")
        .with_style("position", "relative")
        .with_children(children)
}

pub fn spacer() -> ComponentDefinition {
    ComponentDefinition::leaf("Spacer", render_spacer)
        .prop("height", 20)
        .field(SettingsField::integer("height", "Height (px)", 1.0).min(1.0))
}

fn render_spacer(props: &Props, _children: Vec<VNode>) -> VNode {
    VNode::element("div")
        .with_style("height", props.dimension("height", "px"))
        .with_style("width", "100%")
}

/// Escape a value for a double quoted CSS string
fn css_string(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_control())
        .flat_map(|c| match c {
            '"' | '\\' => vec!['\\', c],
            _ => vec![c],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_clamps_column_count() {
        let def = column();
        let node = def.render_with(&Props::new().with("columnCount", 0), vec![]);
        assert_eq!(node.style("grid-template-columns"), Some("repeat(1, minmax(0, 1fr))"));
    }

    #[test]
    fn test_column_has_no_editor_border() {
        let def = column();
        let node = def.render_with(&def.default_props, vec![]);
        assert_eq!(node.style("border"), None);
        assert_eq!(node.attr("data-editor-component-name"), None);
    }

    #[test]
    fn test_bg_image_without_url() {
        let def = bg_image();
        let node = def.render_with(&Props::new().with("bgImage", ""), vec![]);
        assert_eq!(node.style("background-image"), Some("none"));
        assert_eq!(node.style("min-height"), Some("100vh"));
    }

    #[test]
    fn test_bg_image_url_is_quoted_and_checked() {
        let def = bg_image();

        let node = def.render_with(&Props::new().with("bgImage", "/img/hero.jpg"), vec![]);
        assert_eq!(node.style("background-image"), Some("url(\"/img/hero.jpg\")"));

        let node = def.render_with(&Props::new().with("bgImage", "a.jpg\"); color: red"), vec![]);
        assert_eq!(node.style("background-image"), Some("url(\"a.jpg\\\"); color: red\")"));

        let node = def.render_with(&Props::new().with("bgImage", "javascript:alert(1)"), vec![]);
        assert_eq!(node.style("background-image"), Some("none"));
    }

    #[test]
    fn test_container_maps_flex_values() {
        let def = container();
        let props = Props::new()
            .with("flexDirection", "row")
            .with("justifyContent", "between");
        let node = def.render_with(&props, vec![]);

        assert_eq!(node.style("flex-direction"), Some("row"));
        assert_eq!(node.style("justify-content"), Some("space-between"));
        assert_eq!(node.style("padding"), Some("10px"));
    }
}
