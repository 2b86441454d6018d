//! Akitree command line game.
//!
//! Loads the tree file (starting fresh if it does not exist), runs the
//! interactive menu on stdin/stdout and optionally saves the tree on exit.
//!
//! ```bash
//! RUST_LOG=akitree=debug akitree characters.tree --save-on-exit
//! ```

use akitree::console::Console;
use akitree::format::{FormatStyle, read_file, write_file};
use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn,akitree=info";

/// Guess-the-character game that learns new characters
#[derive(Parser, Debug)]
#[command(name = "akitree", version)]
#[command(about = "Guess-the-character game backed by a learning decision tree")]
struct Cli {
    /// Tree file to load; a missing file starts with the default tree
    tree_file: PathBuf,

    /// Write the tree back to TREE_FILE when the menu exits
    #[arg(long)]
    save_on_exit: bool,

    /// Save trees with one node per line instead of a single line
    #[arg(long)]
    indent: bool,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let style = if cli.indent {
        FormatStyle::Indented
    } else {
        FormatStyle::Compact
    };

    let mut tree = read_file(&cli.tree_file)
        .with_context(|| format!("Could not load tree from {}", cli.tree_file.display()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(&mut tree, stdin.lock(), stdout.lock())
        .with_style(style)
        .run()
        .context("Console I/O failed")?;

    if cli.save_on_exit {
        write_file(&tree, &cli.tree_file, style)
            .with_context(|| format!("Could not save tree to {}", cli.tree_file.display()))?;
    }

    Ok(())
}
