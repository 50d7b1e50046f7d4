use anyhow::{Context, bail};
use clap::{ArgAction, Parser, ValueEnum};
use serde_json::json;
use std::path::PathBuf;
use texmax_fmt::{TreeOptions, print_tree, to_latex};
use texmax_syntax::{Source, Token, TokenKind, tokenize};

#[derive(Parser)]
#[command(name = "texmax")]
#[command(about = "Tokenize and parse LaTeX math expressions", long_about = None)]
#[command(after_help = "Examples:\n  texmax '\\frac{a^2}{b}'\n  texmax -f input.tex")]
struct Cli {
    /// Expression to parse; several arguments are joined with spaces
    #[arg(value_name = "EXPRESSION", required_unless_present = "file")]
    expression: Vec<String>,

    /// Read the input from a file instead of the arguments
    #[arg(short, long, value_name = "FILE", conflicts_with = "expression")]
    file: Option<PathBuf>,

    /// Only show tokenization results
    #[arg(short, long)]
    tokens: bool,

    /// How to print the parsed tree
    #[arg(long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Leave positions out of the tree dump
    #[arg(long)]
    no_positions: bool,

    /// More log output (repeatable); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Tree,
    Latex,
    Json,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn print_tokens(tokens: &[Token]) {
    println!("Tokens:");
    for (i, token) in tokens.iter().enumerate() {
        if token.kind == TokenKind::Eof {
            println!("{i}: {} at {}", token.kind, token.pos);
        } else {
            println!("{i}: {} {:?} at {}", token.kind, token.value, token.pos);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let json = cli.format == Format::Json;

    let mut source = match &cli.file {
        Some(path) => {
            let source = Source::from_file(path)
                .with_context(|| format!("cannot read input file '{}'", path.display()))?;
            if !json {
                println!("Reading from file: {}\n", path.display());
            }
            source
        }
        None => {
            let input = cli.expression.join(" ");
            if !json {
                println!("Input: {input}\n");
            }
            Source::new(input)
        }
    };

    let tokens = tokenize(&mut source);
    if let Some(err) = source.err() {
        bail!("failed to read input: {err}");
    }
    log::info!("tokenized input into {} tokens", tokens.len());

    if cli.tokens {
        if json {
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        } else {
            print_tokens(&tokens);
        }
        return Ok(());
    }

    if !json {
        print_tokens(&tokens);
    }

    let result = texmax_syntax::Parser::new(tokens).parse();

    match cli.format {
        Format::Json => {
            let output = json!({
                "errors": result.errors,
                "root": result.root,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Tree | Format::Latex => {
            if !result.errors.is_empty() {
                println!("\nParser errors:");
                for (i, err) in result.errors.iter().enumerate() {
                    println!("{i}: {err}");
                }
            }

            if cli.format == Format::Latex {
                println!("\nLaTeX:\n{}", to_latex(&result.root));
            } else {
                let options = TreeOptions {
                    positions: !cli.no_positions,
                };
                print!("\nAST:\n{}", print_tree(&result.root, options));
            }
        }
    }

    Ok(())
}
