use crate::commands::render::write_output;
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use sitecraft_common::SerializedDocument;
use sitecraft_components::ComponentRegistry;
use sitecraft_editor::{EditSession, Mutation};
use sitecraft_renderer::render_with_options;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// JSON array of editor mutations to replay
    pub mutations: String,

    /// Where to write the document (defaults to <pagesDir>/<name>.json)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Also render the page to the output directory
    #[arg(long)]
    pub render: bool,
}

pub fn build(args: BuildArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = PathBuf::from(cwd).join(&args.mutations);
    let name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("Invalid mutations file: {}", input.display()))?
        .to_string();

    let registry = Arc::new(ComponentRegistry::builtin()?);
    let doc = replay(&input, Arc::clone(&registry))?;

    let doc_path = match &args.output {
        Some(output) => PathBuf::from(cwd).join(output),
        None => config.get_pages_dir(cwd).join(format!("{}.json", name)),
    };
    write_output(&doc_path, &doc.to_json_pretty()?)?;
    println!("  {} {} → {}", "✓".green(), args.mutations, doc_path.display());

    if args.render {
        let mut options = if config.pretty {
            sitecraft_renderer::RenderOptions::pretty()
        } else {
            sitecraft_renderer::RenderOptions::default()
        };
        if let Some(title) = &config.page_title {
            options = options.with_page(title.clone());
        }
        let html = render_with_options(&doc, &registry, &options)?;
        let html_path = config.get_out_dir(cwd).join(format!("{}.html", name));
        write_output(&html_path, &html)?;
        println!("  {} {} → {}", "✓".green(), name, html_path.display());
    }

    Ok(())
}

/// Apply every mutation in the file to a fresh session and serialize it
pub fn replay(path: &Path, registry: Arc<ComponentRegistry>) -> Result<SerializedDocument> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let mutations: Vec<Mutation> = serde_json::from_str(&json)
        .with_context(|| format!("Invalid mutation list in {}", path.display()))?;

    let mut session = EditSession::new("build", registry);
    for (index, mutation) in mutations.into_iter().enumerate() {
        session
            .apply(mutation)
            .map_err(|e| anyhow!("Mutation #{} failed: {}", index + 1, e))?;
    }

    tracing::debug!(version = session.version(), "Mutations replayed");
    Ok(session.serialize()?)
}
