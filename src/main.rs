use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reink::dom::Tree;
use reink::rewrite::{classify, rewrite_element, rewrite_markup};

#[derive(Parser)]
#[command(name = "reink")]
#[command(about = "Recolor inline SVG artwork to stay legible on dynamic host backgrounds")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recolor an SVG file against a background color
    Recolor {
        /// Input SVG file
        input: PathBuf,

        /// Background color white artwork should become
        #[arg(short, long, default_value = "#202020")]
        background: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rewrite as opaque text instead of parsing into a tree
        #[arg(long)]
        markup: bool,
    },
    /// Report how a color value classifies
    Check {
        /// Color value, e.g. "#fff" or "rgb(0,0,0)"
        value: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reink=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recolor {
            input,
            background,
            output,
            markup,
        } => run_recolor(&input, &background, output.as_deref(), markup),
        Commands::Check { value } => {
            run_check(&value);
            Ok(())
        }
    }
}

/// Recolor a single SVG file (one-shot, no host involved)
fn run_recolor(
    input: &std::path::Path,
    background: &str,
    output: Option<&std::path::Path>,
    markup: bool,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let recolored = if markup {
        rewrite_markup(&content, background)
    } else {
        let tree = Tree::parse(&content)
            .with_context(|| format!("Failed to parse {}", input.display()))?;
        rewrite_element(&tree.root(), background);
        tree.serialize()
    };

    match output {
        Some(path) => {
            std::fs::write(path, &recolored)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Recolored {} ({} bytes)", path.display(), recolored.len());
        }
        None => println!("{recolored}"),
    }

    Ok(())
}

/// Print the classification of a color value
fn run_check(value: &str) {
    let class = if classify::is_white(value) {
        "white"
    } else if classify::is_black(value) {
        "black"
    } else {
        "neither"
    };
    println!("{value}: {class}");
}
