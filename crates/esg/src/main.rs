//! `esg` — batch front end for the esgrove parser.
//!
//! Reads a file listing one script path per line, parses each script and
//! reports the outcome.  With `--dump` the concrete syntax tree of every
//! successfully parsed file is printed as an indented outline.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;

use clap::Parser as _;
use esgrove_core::error::ParseError;
use esgrove_core::parser::{ParseOptions, Parser};
use thiserror::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Stack for the parsing thread; deep nesting recurses through many frames.
const PARSE_STACK_SIZE: usize = 256 * 1024 * 1024;

#[derive(clap::Parser, Debug)]
#[command(name = "esg")]
#[command(about = "Parse a list of ECMAScript script files")]
struct Cli {
    /// File listing one script path per line
    paths_file: PathBuf,

    /// Print the syntax tree of every parsed file
    #[arg(long)]
    dump: bool,

    /// Maximum grammar nesting before a file is rejected
    #[arg(long, default_value_t = ParseOptions::default().max_depth)]
    max_depth: u32,

    /// Keep parsing the remaining files after a failure
    #[arg(long)]
    keep_going: bool,

    /// Disable the packrat memo table
    #[arg(long)]
    no_memo: bool,
}

impl Cli {
    fn options(&self) -> ParseOptions {
        ParseOptions {
            max_depth: self.max_depth,
            memoize: !self.no_memo,
        }
    }
}

/// Why a single file could not be parsed.
#[derive(Debug, Error)]
enum FileError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("{} is not valid UTF-8", path.display())]
    Decode { path: PathBuf },

    #[error("{}: {source}", path.display())]
    Parse { path: PathBuf, source: ParseError },
}

/// Paths listed in `text`: right-trimmed, blank lines skipped.
fn listed_paths(text: &str) -> Vec<PathBuf> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Parse one file; returns the outline when `dump` is set.
fn parse_file(path: &Path, options: ParseOptions, dump: bool) -> Result<Option<String>, FileError> {
    let bytes = fs::read(path).map_err(|source| FileError::Read {
        path: path.to_owned(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| FileError::Decode {
        path: path.to_owned(),
    })?;
    let source: Box<[u16]> = text.encode_utf16().collect();
    debug!(path = %path.display(), units = source.len(), "parsing");

    let mut parser = Parser::new(source).with_options(options);
    let root = parser.parse_script().map_err(|source| FileError::Parse {
        path: path.to_owned(),
        source,
    })?;
    info!(path = %path.display(), nodes = root.len_subtree(), "parsed");
    Ok(dump.then(|| root.to_string()))
}

/// Parse every listed file; returns the number of failures.
fn run(cli: &Cli, paths: &[PathBuf]) -> usize {
    let options = cli.options();
    let mut failures = 0;
    let mut stdout = io::stdout().lock();
    for path in paths {
        match parse_file(path, options, cli.dump) {
            Ok(Some(outline)) => {
                if let Err(err) = write!(stdout, "{outline}") {
                    error!("writing outline: {err}");
                    return failures + 1;
                }
            }
            Ok(None) => {}
            Err(err) => {
                error!("{err}");
                failures += 1;
                if !cli.keep_going {
                    break;
                }
            }
        }
    }
    failures
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "esg=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let listing = match fs::read_to_string(&cli.paths_file) {
        Ok(listing) => listing,
        Err(err) => {
            error!("cannot read {}: {err}", cli.paths_file.display());
            return ExitCode::FAILURE;
        }
    };
    let paths = listed_paths(&listing);

    let worker = thread::Builder::new()
        .name("esg-parse".into())
        .stack_size(PARSE_STACK_SIZE)
        .spawn(move || run(&cli, &paths));
    let failures = match worker.map(|handle| handle.join()) {
        Ok(Ok(failures)) => failures,
        Ok(Err(_)) => {
            error!("parser thread panicked");
            return ExitCode::FAILURE;
        }
        Err(err) => {
            error!("cannot start parser thread: {err}");
            return ExitCode::FAILURE;
        }
    };

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        error!("{failures} file(s) failed");
        ExitCode::FAILURE
    }
}
