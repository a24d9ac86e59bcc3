use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitecraft_components::{ComponentDefinition, ComponentRegistry, Palette};

#[derive(Debug, Args)]
pub struct ComponentsArgs {
    /// Print the palette as JSON instead
    #[arg(long)]
    pub json: bool,
}

pub fn components(args: ComponentsArgs) -> Result<()> {
    let registry = ComponentRegistry::builtin()?;
    let palette = Palette::builtin();
    palette.check(&registry)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&palette)?);
        return Ok(());
    }

    for category in palette.categories() {
        println!("{}", category.name.bright_blue().bold());
        for tool in &category.tools {
            let definition = registry.resolve(&tool.type_name)?;
            println!("  {}", describe(definition));
        }
        println!();
    }
    println!("{} component types registered", registry.len());
    Ok(())
}

fn describe(definition: &ComponentDefinition) -> String {
    let kind = if definition.can_contain_children {
        format!("container, admits {}", definition.admission.describe())
    } else {
        "leaf".to_string()
    };
    format!(
        "{:<14} {} ({}, {} settings)",
        definition.type_name,
        definition.label().dimmed(),
        kind,
        definition.settings.len()
    )
}
