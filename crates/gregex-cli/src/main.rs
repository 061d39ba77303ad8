use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use gregex_core::{
    analyze, check, compare, parse_expression, tokenize, MatchRecord, OperatorKind, TreeStyle,
    Vocabulary,
};

/// gregex - uncertainty operators over glycan linear code
///
/// Find the spans of a linear code expression that the ligand (`...`),
/// continuation (`_`) or possible branch point (`|`) operator can stand for.
#[derive(Parser)]
#[command(name = "gregex", version, about, long_about = None)]
struct Cli {
    /// JSON vocabulary file (defaults to the built-in linear code)
    #[arg(long, global = true, value_name = "FILE")]
    vocabulary: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every span an operator could stand for
    Analyze {
        /// Linear code expression
        lce: String,
        /// Operator: `...`, `_`, `|` or ligand, continuation, branch
        #[arg(short, long)]
        operator: OperatorKind,
        /// Include left and right context
        #[arg(short = 'c', long)]
        with_context: bool,
        /// Candidate substitution to check against every match
        #[arg(short, long)]
        substitution: Option<String>,
        /// Print a header row
        #[arg(short = 'n', long)]
        names: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a substitution can replace the operator in an expression
    Check {
        /// Linear code expression containing at most one operator
        lce: String,
        /// Candidate substitution (empty when omitted)
        substitution: Option<String>,
    },

    /// Parse an expression into its branch structure
    Tree {
        /// Linear code expression
        lce: String,
        /// stem-and-subtrees, func-and-args or s-exp
        #[arg(long, default_value = "stem-and-subtrees")]
        style: TreeStyle,
        /// Keep parentheses around leaf arguments in s-expressions
        #[arg(long)]
        keep_leaf_parens: bool,
    },

    /// Compare the matches of two operators
    Compare {
        /// Linear code expression
        lce: String,
        /// First operator
        #[arg(short = 'a', long)]
        op_a: OperatorKind,
        /// Second operator
        #[arg(short = 'b', long)]
        op_b: OperatorKind,
        /// Include left and right context
        #[arg(short = 'c', long)]
        with_context: bool,
        /// Report each match text once, with the context that sorts first
        #[arg(long)]
        match_only_identity: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Split an expression into tokens
    Tokenize {
        /// Linear code expression
        lce: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            2
        }
    };

    process::exit(exit_code);
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Only the commands that tokenize read the vocabulary
fn load_vocabulary(path: Option<&PathBuf>) -> gregex_core::Result<Vocabulary> {
    match path {
        Some(path) => Vocabulary::load(path),
        None => {
            tracing::debug!("using built-in linear code vocabulary");
            Ok(Vocabulary::linear_code())
        }
    }
}

fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let vocabulary = || load_vocabulary(cli.vocabulary.as_ref());

    match cli.command {
        Commands::Analyze {
            lce,
            operator,
            with_context,
            substitution,
            names,
            json,
        } => {
            let records = analyze(
                &lce,
                operator,
                substitution.as_deref(),
                with_context,
                &vocabulary()?,
            )?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                if names {
                    let headers = MatchRecord::headers(with_context, substitution.is_some());
                    println!("{}", headers.join("\t"));
                }
                for record in &records {
                    println!("{}", record.columns().join("\t"));
                }
            }
            Ok(0)
        }

        Commands::Check { lce, substitution } => {
            let valid = check(&lce, substitution.as_deref())?;
            println!("{}", valid);
            Ok(if valid { 0 } else { 1 })
        }

        Commands::Tree {
            lce,
            style,
            keep_leaf_parens,
        } => {
            let tree = parse_expression(&lce, &vocabulary()?)?;
            println!("{}", tree.render(style, !keep_leaf_parens)?);
            Ok(0)
        }

        Commands::Compare {
            lce,
            op_a,
            op_b,
            with_context,
            match_only_identity,
            json,
        } => {
            let comparison = compare(
                op_a,
                op_b,
                &lce,
                with_context,
                !match_only_identity,
                &vocabulary()?,
            )?;
            if json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                print_section("both", &comparison.both);
                print_section("just_a", &comparison.just_a);
                print_section("just_b", &comparison.just_b);
                print_section("neither", &comparison.neither);
            }
            Ok(0)
        }

        Commands::Tokenize { lce, json } => {
            let tokens = tokenize(&lce, &vocabulary()?)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tokens)?);
            } else {
                for token in &tokens {
                    println!("{}", token);
                }
            }
            Ok(0)
        }

        Commands::Version => {
            println!("gregex {}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
    }
}

fn print_section(name: &str, records: &BTreeSet<MatchRecord>) {
    println!("{} ({})", name.bold(), records.len());
    for record in records {
        println!("\t{}", record.columns().join("\t"));
    }
}
