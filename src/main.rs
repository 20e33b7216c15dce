use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use minutes_converter::logging;
use minutes_converter::types::{PrettifyReport, RenameReport, SanitizeReport};
use minutes_converter::{Config, Pipeline};

#[derive(Parser)]
#[command(name = "minutes_converter")]
#[command(about = "Turns Steering Group minutes into dated markdown posts")]
#[command(version = "0.1.0")]
struct Cli {
    /// Config file (defaults to <DIR>/minutes.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run rename, prettify and sanitize in order
    Run {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Rename minutes pairs to YYYY-MM-DD-Steering-Group-minutes.*
    Rename {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Pretty print every HTML file in place
    Prettify {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Add front matter, drop boilerplate and splice in the HTML table
    Sanitize {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

impl Commands {
    fn dir(&self) -> &Path {
        match self {
            Commands::Run { dir }
            | Commands::Rename { dir }
            | Commands::Prettify { dir }
            | Commands::Sanitize { dir } => dir.as_path(),
        }
    }
}

fn print_rename(report: &RenameReport) {
    for renamed in &report.renamed {
        println!("📝 {}", renamed.from.display());
        println!("   -> {}", renamed.to.display());
        if let Some((_, to)) = &renamed.markup {
            println!("   -> {}", to.display());
        }
    }
    if !report.skipped.is_empty() {
        println!("⚠️  Left unrenamed:");
        for path in &report.skipped {
            println!("   - {}", path.display());
        }
    }
}

fn print_prettify(report: &PrettifyReport) {
    println!(
        "🧹 Normalized {} markup file(s), {} already clean",
        report.rewritten.len(),
        report.unchanged.len()
    );
}

fn print_sanitize(report: &SanitizeReport) {
    println!("✅ Sanitized {} post(s)", report.sanitized.len());
    if !report.without_date_line.is_empty() {
        println!("⚠️  No Date line (front matter only):");
        for path in &report.without_date_line {
            println!("   - {}", path.display());
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Run {
        dir: PathBuf::from("."),
    });
    let dir = command.dir().to_path_buf();

    let config = Config::load(cli.config.as_deref(), &dir)
        .with_context(|| format!("loading configuration for {}", dir.display()))?;
    let _log_guard = logging::init_logging(config.log_dir.as_deref());

    match command {
        Commands::Run { .. } => {
            println!("🚀 Converting minutes in {}...", dir.display());
            let result = Pipeline::run(&dir, &config)?;
            print_rename(&result.rename);
            print_prettify(&result.prettify);
            print_sanitize(&result.sanitize);
        }
        Commands::Rename { .. } => print_rename(&Pipeline::rename(&dir, &config)?),
        Commands::Prettify { .. } => print_prettify(&Pipeline::prettify(&dir, &config)?),
        Commands::Sanitize { .. } => print_sanitize(&Pipeline::sanitize(&dir, &config)?),
    }
    Ok(())
}
