use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use general_tree::outline::{self, DEFAULT_INDENT};
use general_tree::{GeneralTree, IterationType};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "general-tree", about = "Inspect n-ary trees written as indented outlines")]
struct Cli {
    /// Spaces per outline level.
    #[arg(long, global = true, default_value_t = DEFAULT_INDENT)]
    indent: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print node values in traversal order, one per line.
    Traverse {
        /// Outline file (`-` for stdin).
        file: PathBuf,
        /// Traversal order.
        #[arg(long, value_enum, default_value_t = Order::Preorder)]
        order: Order,
    },
    /// Print node count, root fan-out and height.
    Stats {
        /// Outline file (`-` for stdin).
        file: PathBuf,
    },
    /// Deep-copy the tree and verify the copy compares equal.
    CopyCheck {
        /// Outline file (`-` for stdin).
        file: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Order {
    Preorder,
    Postorder,
}

impl From<Order> for IterationType {
    fn from(order: Order) -> Self {
        match order {
            Order::Preorder => IterationType::Preorder,
            Order::Postorder => IterationType::Postorder,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Traverse { file, order } => run_traverse(&file, cli.indent, order.into())?,
        Commands::Stats { file } => run_stats(&file, cli.indent)?,
        Commands::CopyCheck { file } => run_copy_check(&file, cli.indent)?,
    }

    Ok(())
}

fn run_traverse(path: &Path, indent: usize, order: IterationType) -> Result<()> {
    let tree = load_outline(path, indent)?;
    for value in tree.iter(order) {
        println!("{value}");
    }
    Ok(())
}

fn run_stats(path: &Path, indent: usize) -> Result<()> {
    let tree = load_outline(path, indent)?;
    let root = tree.root();

    println!("nodes\t{}", tree.len());
    println!("root_children\t{}", root.children_count()?);
    println!("descendants\t{}", root.descendants_count()?);
    println!("height\t{}", tree.height().unwrap_or(0));
    println!(
        "leaves\t{}",
        root.subtree_breadth_first().iter().filter(|node| node.is_leaf()).count()
    );
    Ok(())
}

fn run_copy_check(path: &Path, indent: usize) -> Result<()> {
    let tree = load_outline(path, indent)?;
    let copy = tree.clone();

    if copy != tree {
        bail!("deep copy of {} differs from the original", path.display());
    }

    let preorder: Vec<&String> = copy.iter(IterationType::Preorder).collect();
    let postorder: Vec<&String> = copy.iter(IterationType::Postorder).collect();
    println!("equal\ttrue");
    println!("preorder\t{}", join(&preorder));
    println!("postorder\t{}", join(&postorder));
    Ok(())
}

fn join(values: &[&String]) -> String {
    values.iter().map(|value| value.as_str()).collect::<Vec<_>>().join(" ")
}

fn load_outline(path: &Path, indent: usize) -> Result<GeneralTree<String>> {
    let text = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read outline from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read outline from {}", path.display()))?
    };

    let tree = outline::parse(&text, indent)
        .with_context(|| format!("failed to parse outline {}", path.display()))?;
    tracing::info!(nodes = tree.len(), "loaded outline");
    Ok(tree)
}
