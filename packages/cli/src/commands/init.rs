use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitecraft_common::{NodeId, Props, SerializedDocument};
use sitecraft_components::ComponentRegistry;
use sitecraft_editor::{EditSession, Mutation};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Pages directory
    #[arg(short, long, default_value = "pages")]
    pub pages_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Sitecraft project...".bright_blue().bold());

    let pages_dir = PathBuf::from(cwd).join(&args.pages_dir);
    if !pages_dir.exists() {
        fs::create_dir_all(&pages_dir)?;
        println!("  {} Created {}/", "✓".green(), args.pages_dir);
    }

    let sample = pages_dir.join("home.json");
    if !sample.exists() {
        fs::write(&sample, sample_page()?.to_json_pretty()?)?;
        println!("  {} Created {}/home.json", "✓".green(), args.pages_dir);
    }

    let config = Config {
        pages_dir: args.pages_dir.clone(),
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/home.json", args.pages_dir);
    println!("  2. Run: sitecraft render");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}

/// A starter landing page built through the same mutations the editor uses
pub fn sample_page() -> Result<SerializedDocument> {
    let registry = Arc::new(ComponentRegistry::builtin()?);
    let mut session = EditSession::new("init", registry);

    let mut mutations = vec![
        Mutation::CreateNode {
            id: Some(NodeId::from("page")),
            type_name: "Container".to_string(),
            props: Props::new().with("flexDirection", "col"),
        },
        Mutation::SetRoot {
            node_id: NodeId::from("page"),
        },
    ];

    let blocks = [
        ("nav", "Navbar", Props::new()),
        (
            "hero",
            "Heading",
            Props::new().with("text", "Welcome to my store").with("level", 1),
        ),
        (
            "intro",
            "Paragraph",
            Props::new().with("text", "Everything you need, delivered."),
        ),
        ("cta", "Button", Props::new().with("text", "Shop Now")),
    ];
    for (id, type_name, props) in blocks {
        mutations.push(Mutation::CreateNode {
            id: Some(NodeId::from(id)),
            type_name: type_name.to_string(),
            props,
        });
        mutations.push(Mutation::AttachChild {
            parent_id: NodeId::from("page"),
            child_id: NodeId::from(id),
            index: None,
        });
    }

    session.apply_all(mutations)?;
    Ok(session.serialize()?)
}
