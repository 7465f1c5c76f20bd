use clap::{Parser, Subcommand, ValueEnum};
use miette::Result;
use ordo_eval::{Evaluator, ResolvedBlock};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ordo")]
#[command(author, version, about = "Evaluate sequenced constant blocks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate constant files and print their resolved bindings
    Eval {
        /// Constant files to evaluate
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Validate constant files without printing bindings
    Check {
        /// Constant files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the parsed syntax tree of a constant file
    Dump {
        /// Constant file to dump
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// `name = value` lines, blocks separated by blank lines
    Text,
    /// One JSON object per block, bindings in declaration order
    Json,
}

/// Initialize logging with a default filter.
///
/// Use the `RUST_LOG` environment variable to override the default.
/// Logs go to stderr so machine-readable output stays clean.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let evaluator = Evaluator::new();

    match cli.command {
        Commands::Eval { files, format } => {
            for file in &files {
                let blocks = evaluator.eval_file(file)?;
                info!("resolved {} block(s) from {}", blocks.len(), file.display());
                match format {
                    Format::Text => print_text(&blocks),
                    Format::Json => print_json(&blocks)?,
                }
            }
        }

        Commands::Check { files } => {
            for file in &files {
                match evaluator.eval_file(file) {
                    Ok(_) => println!("{}: OK", file.display()),
                    Err(err) => {
                        eprintln!("{}: error", file.display());
                        return Err(err);
                    }
                }
            }
        }

        Commands::Dump { file } => {
            let blocks = evaluator.parse_file(&file)?;
            println!("{blocks:#?}");
        }
    }

    Ok(())
}

fn print_text(blocks: &[ResolvedBlock]) {
    for (index, block) in blocks.iter().enumerate() {
        if index > 0 {
            println!();
        }
        for (name, binding) in block.iter() {
            println!("{name} = {}", binding.value);
        }
    }
}

fn print_json(blocks: &[ResolvedBlock]) -> Result<()> {
    let encode = |err| miette::miette!("failed to encode JSON: {}", err);

    let mut rendered = Vec::with_capacity(blocks.len());
    for block in blocks {
        let mut object = serde_json::Map::new();
        for (name, binding) in block.iter() {
            let value = serde_json::to_value(binding.value).map_err(encode)?;
            object.insert(name.to_string(), value);
        }
        rendered.push(serde_json::Value::Object(object));
    }

    let output = serde_json::to_string_pretty(&rendered).map_err(encode)?;
    println!("{output}");
    Ok(())
}
