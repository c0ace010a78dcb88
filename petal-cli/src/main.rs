//! Petal CLI
//!
//! Loads a page, prints its tree, text or display list, and optionally saves
//! a headless screenshot.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use petal_browser::{
    LoadedDocument, Renderer, SystemFontProvider, Viewport, load_document, parse_html_string,
};
use petal_html::{print_tree, text_content};
use petal_layout::{FontCache, FontMetrics, LayoutConfig};

/// What to print after loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Dump {
    /// Indented document tree
    Tree,
    /// Text with tags stripped
    Text,
    /// Words visible in the viewport with their positions
    DisplayList,
    /// Full display list as JSON
    Json,
    /// Print nothing
    None,
}

/// Petal: parse a page and lay out its words
#[derive(Parser, Debug)]
#[command(name = "petal")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the document tree of a page
    petal https://example.org/

    # Show where every visible word lands
    petal --dump display-list ./index.html

    # Parse inline markup
    petal --html '<p>Hello <b>world</b></p>'

    # Screenshot the second screenful
    petal -S out.png --scroll 1 https://example.org/
"#)]
struct Cli {
    /// Path to an HTML file or a URL (http, https, file, data)
    #[arg(value_name = "FILE|URL")]
    target: Option<String>,

    /// Parse HTML string directly instead of a file or URL
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// What to print
    #[arg(short, long, value_enum, default_value = "tree")]
    dump: Dump,

    /// Render the viewport and save it to the specified file (PNG format)
    #[arg(short = 'S', long, value_name = "FILE")]
    screenshot: Option<PathBuf>,

    /// Viewport width
    #[arg(long, default_value = "800")]
    width: u32,

    /// Viewport height
    #[arg(long, default_value = "600")]
    height: u32,

    /// Number of scroll steps to move down before printing or rendering
    #[arg(long, default_value = "0")]
    scroll: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[allow(clippy::cast_precision_loss)]
    let config = LayoutConfig::with_size(cli.width as f32, cli.height as f32);
    let fonts = FontCache::new(SystemFontProvider::load());

    let doc = load_doc(&cli, &fonts, &config)?;

    let mut viewport = Viewport::new(&config);
    for _ in 0..cli.scroll {
        viewport.scroll_down();
    }

    print_issues(&doc);

    match cli.dump {
        Dump::Tree => print_tree(&doc.dom, doc.dom.root()),
        Dump::Text => println!("{}", text_content(&doc.dom)),
        Dump::DisplayList => print_display_list(&doc, &viewport, &fonts),
        Dump::Json => {
            let json = serde_json::to_string_pretty(&doc.display_list)
                .context("failed to serialize display list")?;
            println!("{json}");
        }
        Dump::None => {}
    }

    if let Some(ref output_path) = cli.screenshot {
        take_screenshot(&doc, &viewport, &fonts, output_path, &cli)?;
        println!("Screenshot saved to: {}", output_path.display());
    }

    Ok(())
}

/// Load document from CLI arguments
fn load_doc(
    cli: &Cli,
    fonts: &FontCache<SystemFontProvider>,
    config: &LayoutConfig,
) -> Result<LoadedDocument> {
    if let Some(ref html_string) = cli.html {
        Ok(parse_html_string(html_string, fonts, config))
    } else if let Some(ref target) = cli.target {
        load_document(target, fonts, config).with_context(|| format!("could not load {target}"))
    } else {
        anyhow::bail!("nothing to load: pass a file path, a URL, or --html")
    }
}

fn print_issues(doc: &LoadedDocument) {
    for issue in &doc.parse_issues {
        eprintln!("{} {issue}", "parse:".yellow().bold());
    }
}

fn print_display_list(
    doc: &LoadedDocument,
    viewport: &Viewport,
    fonts: &FontCache<SystemFontProvider>,
) {
    let visible = viewport.visible(&doc.display_list, fonts);
    for item in &visible {
        println!(
            "{:>8.2} {:>8.2}  {:<24} {}",
            item.x,
            viewport.to_screen(item.y),
            item.text,
            format!("{}px {} {}", item.font.size, item.font.weight, item.font.slant).dimmed(),
        );
    }

    let height = doc
        .display_list
        .content_height(|key| fonts.get(key).linespace());
    eprintln!(
        "{}",
        format!(
            "{} of {} words visible, content height {height:.2}px",
            visible.len(),
            doc.display_list.len()
        )
        .dimmed()
    );
}

/// Render the viewport of the page to a PNG
fn take_screenshot(
    doc: &LoadedDocument,
    viewport: &Viewport,
    fonts: &FontCache<SystemFontProvider>,
    output_path: &Path,
    cli: &Cli,
) -> Result<()> {
    if !fonts.provider().has_fonts() {
        anyhow::bail!("no system fonts found; cannot render a screenshot");
    }

    let mut renderer = Renderer::new(cli.width, cli.height);
    renderer.render(&doc.display_list, viewport, fonts);
    renderer.save(output_path)
}
