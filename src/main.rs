use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "charon", version, about = "Parse class sources into concrete parse trees")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a source file and print its parse tree
    Parse {
        /// Source file path
        file: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Tree)]
        format: Format,
    },
    /// Print the token sequence of a source file, one `kind value` per line
    Tokens {
        /// Source file path
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Indented outline
    Tree,
    /// JSON document
    Json,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .init();
}

fn read_or_exit(file: &Path) -> String {
    match charon::read_source(file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn fail(source: &str, err: &charon::CompileError) -> ! {
    charon::diagnostics::render_error(source, err);
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Parse { file, format } => {
            let source = read_or_exit(&file);
            let tree = match charon::parse_source(&source) {
                Ok(tree) => tree,
                Err(err) => fail(&source, &err),
            };
            match format {
                Format::Tree => print!("{tree}"),
                Format::Json => match serde_json::to_string_pretty(&tree) {
                    Ok(json) => println!("{json}"),
                    Err(err) => {
                        eprintln!("error: could not serialize parse tree: {err}");
                        std::process::exit(1);
                    }
                },
            }
        }
        Commands::Tokens { file } => {
            let source = read_or_exit(&file);
            let tokens = match charon::lex(&source) {
                Ok(tokens) => tokens,
                Err(err) => fail(&source, &err),
            };
            for tok in &tokens {
                println!("{} {}", tok.kind, tok.value);
            }
        }
    }
}
