use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use sitecraft_common::SerializedDocument;
use sitecraft_components::ComponentRegistry;
use sitecraft_renderer::{render_with_options, RenderOptions};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Page document or directory of documents (defaults to the pages dir)
    pub path: Option<String>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Pretty print HTML
    #[arg(long)]
    pub pretty: bool,

    /// Wrap output in a full HTML page with this title
    #[arg(long)]
    pub title: Option<String>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

impl RenderArgs {
    fn options(&self, config: &Config) -> RenderOptions {
        let mut options = if self.pretty || config.pretty {
            RenderOptions::pretty()
        } else {
            RenderOptions::default()
        };
        if let Some(title) = self.title.as_ref().or(config.page_title.as_ref()) {
            options = options.with_page(title.clone());
        }
        options
    }
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = match &args.path {
        Some(path) => PathBuf::from(cwd).join(path),
        None => config.get_pages_dir(cwd),
    };
    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };

    let (base, pages) = if input.is_file() {
        let base = input.parent().map(Path::to_path_buf).unwrap_or_default();
        (base, vec![input.clone()])
    } else if input.is_dir() {
        (input.clone(), find_page_files(&input))
    } else {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    };

    if pages.is_empty() {
        println!("{}", "⚠️  No page documents found".yellow());
        return Ok(());
    }

    let registry = ComponentRegistry::builtin()?;
    let options = args.options(&config);

    if !args.stdout {
        println!("{}", "🔨 Rendering pages...".bright_blue().bold());
        println!("Found {} pages", pages.len());
    }

    let mut success_count = 0;
    let mut error_count = 0;

    for page in &pages {
        let relative_path = page.strip_prefix(&base).unwrap_or(page);
        let result = render_page(page, &registry, &options).and_then(|html| {
            if args.stdout {
                println!("{}", html);
                Ok("stdout".to_string())
            } else {
                let output_file = out_dir.join(relative_path).with_extension("html");
                write_output(&output_file, &html)?;
                Ok(output_file.display().to_string())
            }
        });

        match result {
            Ok(destination) => {
                success_count += 1;
                if !args.stdout {
                    println!(
                        "  {} {} → {}",
                        "✓".green(),
                        relative_path.display(),
                        destination
                    );
                }
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    if !args.stdout {
        println!();
        if error_count == 0 {
            println!("{} Rendered {} pages successfully", "✅".green(), success_count);
        } else {
            println!(
                "{} Rendered {} pages, {} errors",
                "⚠️".yellow(),
                success_count,
                error_count
            );
        }
    }

    if error_count > 0 {
        return Err(anyhow!("{} of {} pages failed to render", error_count, pages.len()));
    }
    Ok(())
}

pub fn render_page(path: &Path, registry: &ComponentRegistry, options: &RenderOptions) -> Result<String> {
    let json = fs::read_to_string(path)?;
    let doc = SerializedDocument::from_json(&json)?;
    tracing::debug!(page = %path.display(), nodes = doc.nodes.len(), "Rendering page");
    Ok(render_with_options(&doc, registry, options)?)
}

pub fn write_output(output_file: &Path, html: &str) -> Result<()> {
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output_file, html)?;
    Ok(())
}

fn find_page_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    files.sort();
    files
}
