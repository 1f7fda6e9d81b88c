//! envlens CLI
//!
//! Entry point for the `envlens` command-line tool.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use envlens::reporter;
use envlens::resolver::{self, Options, ResolveError, Resolution};

#[derive(Parser)]
#[command(name = "envlens")]
#[command(about = "Explains what environment variables actually resolve to and why", version)]
#[command(long_about = "envlens explains what environment variables actually resolve to and why.

It traces precedence across:
  - .env files
  - .env.local overrides
  - .env.example templates
  - compose env_file references
  - compose inline environment blocks

Use it to understand silent misconfigurations before they cause problems.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory and explain how its environment resolves
    Scan {
        /// Directory to scan (default: current directory)
        path: Option<PathBuf>,

        /// Output JSON instead of text
        #[arg(long, conflicts_with = "markdown")]
        json: bool,

        /// Output markdown instead of text
        #[arg(long)]
        markdown: bool,

        /// Only show variables visible to this compose service
        #[arg(long, short = 's')]
        service: Option<String>,

        /// Fail if any variable is referenced but never defined
        #[arg(long)]
        strict: bool,

        /// Merge the OS environment as a highest-precedence layer
        #[arg(long = "include-env")]
        include_env: bool,

        /// Compare against another directory's resolution
        #[arg(long)]
        compare: Option<PathBuf>,

        /// Write the effective environment to a file as NAME=value lines
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Scan {
            path,
            json,
            markdown,
            service,
            strict,
            include_env,
            compare,
            output,
        } => {
            let base = path.unwrap_or_else(|| PathBuf::from("."));
            let opts = Options {
                include_os_env: include_env,
                service,
                strict,
            };
            run_scan(&base, &opts, json, markdown, compare.as_deref(), output.as_deref())
        }
    };

    process::exit(exit_code);
}

fn run_scan(
    base: &std::path::Path,
    opts: &Options,
    json: bool,
    markdown: bool,
    compare_with: Option<&std::path::Path>,
    output: Option<&std::path::Path>,
) -> i32 {
    let (resolution, strict_failure) = match resolver::resolve_with_options(base, opts) {
        Ok(resolution) => (resolution, None),
        Err(err @ ResolveError::UndefinedVariables { .. }) => {
            let message = err.to_string();
            match err {
                ResolveError::UndefinedVariables { resolution, .. } => {
                    (*resolution, Some(message))
                }
            }
        }
    };

    if let Some(other) = compare_with {
        // Comparison reuses the same options minus strict mode, so a broken
        // target environment still produces a diff.
        let other_opts = Options {
            strict: false,
            ..opts.clone()
        };
        match resolver::resolve_with_options(other, &other_opts) {
            Ok(other_resolution) => {
                let result = resolver::compare(&resolution, &other_resolution);
                print!(
                    "{}",
                    reporter::format_compare(
                        &base.display().to_string(),
                        &other.display().to_string(),
                        &result,
                    )
                );
            }
            Err(err) => {
                eprintln!("error resolving {}: {err}", other.display());
                return 1;
            }
        }
    } else if let Err(code) = render(&resolution, json, markdown) {
        return code;
    }

    if let Some(path) = output {
        if let Err(err) = fs::write(path, reporter::format_effective(&resolution)) {
            eprintln!("error writing {}: {err}", path.display());
            return 1;
        }
    }

    match strict_failure {
        Some(message) => {
            eprintln!("{message}");
            1
        }
        None => 0,
    }
}

fn render(resolution: &Resolution, json: bool, markdown: bool) -> Result<(), i32> {
    if json {
        match reporter::format_json(resolution) {
            Ok(out) => println!("{out}"),
            Err(err) => {
                eprintln!("error rendering JSON: {err}");
                return Err(1);
            }
        }
    } else if markdown {
        print!("{}", reporter::format_markdown(resolution));
    } else {
        print!("{}", reporter::format_text(resolution));
    }
    Ok(())
}
