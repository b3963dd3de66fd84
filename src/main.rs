use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use derivative_audit::report;
use derivative_audit::state::library::{self, Library, LibraryError};

const USAGE: &str = "\
derivative-audit: diagnostics for a cached media-archive query response

USAGE:
    derivative-audit [counts|match] [OPTIONS]

COMMANDS:
    counts          Count display images, thumbnails and documents (default)
    match           Show which thumbnail each document of one item matches

OPTIONS:
    --dump PATH     Query dump to read (default: $DERIVATIVE_AUDIT_DUMP or the user cache dir)
    --item N        Item index for `match` (default: 0)
    --limit N       Documents listed by `match` (default: 3)
    --all           List every document in `match`
    -h, --help      Print this help
";

const DEFAULT_MATCH_LIMIT: usize = 3;

/// Which diagnostic to run
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Counts,
    Match { item: usize, limit: Option<usize> },
}

#[derive(Debug)]
struct Options {
    command: Command,
    dump: PathBuf,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Args(#[from] pico_args::Error),

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    /// The command must come first; anything left after flag parsing is an error
    #[error("unexpected arguments: {0:?}")]
    UnexpectedArguments(Vec<OsString>),

    #[error(transparent)]
    Library(#[from] LibraryError),

    #[error("item {index} is out of range ({len} items loaded)")]
    NoSuchItem { index: usize, len: usize },

    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

fn main() -> ExitCode {
    setup_tracing();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    match parse_options(args).and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn parse_options(mut args: pico_args::Arguments) -> Result<Options, CliError> {
    let subcommand = args.subcommand()?;
    let dump: Option<PathBuf> = args.opt_value_from_str("--dump")?;

    let command = match subcommand.as_deref() {
        None | Some("counts") => Command::Counts,
        Some("match") => {
            let item = args.opt_value_from_str("--item")?.unwrap_or(0);
            let limit = if args.contains("--all") {
                None
            } else {
                Some(
                    args.opt_value_from_str("--limit")?
                        .unwrap_or(DEFAULT_MATCH_LIMIT),
                )
            };
            Command::Match { item, limit }
        }
        Some(other) => return Err(CliError::UnknownCommand(other.to_string())),
    };

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(CliError::UnexpectedArguments(rest));
    }

    Ok(Options {
        command,
        dump: dump.unwrap_or_else(library::default_dump_path),
    })
}

fn run(options: Options) -> Result<(), CliError> {
    debug!(?options, "starting");

    let library = Library::open(&options.dump)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match options.command {
        Command::Counts => report::write_counts(&mut out, &library)?,
        Command::Match { item, limit } => {
            let media = library.item(item).ok_or(CliError::NoSuchItem {
                index: item,
                len: library.len(),
            })?;
            report::write_matches(&mut out, media, limit)?;
        }
    }

    out.flush()?;
    Ok(())
}
