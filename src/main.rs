mod bootstrap;
mod config_file;
mod diagnostics;
mod error;
#[cfg(test)]
mod fixtures;
mod lookup;
mod probe;
mod prompt;
mod reference;
mod store;
mod types;
mod viewer;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::bootstrap::{Bootstrapper, Defaults, Outcome};
use crate::lookup::LookupType;
use crate::probe::{HttpProbe, Probe};
use crate::prompt::{Prompter, TerminalPrompter};

/// Configuration file used when `--config` is not given.
const DEFAULT_CONFIG: &str = "srcdoc.toml";

/// Environment variable holding the log filter.
const LOG_ENV: &str = "SRCDOC_LOG";

#[derive(Parser)]
#[command(name = "srcdoc", version, about = "Open the Javadoc or source of a Java class")]
struct Cli {
    /// Fully-qualified class name, e.g. `java.util.List`
    class: String,
    /// Configuration file holding the references
    #[arg(long, env = "SRCDOC_CONFIG", default_value = DEFAULT_CONFIG)]
    config: PathBuf,
    /// Reference to use instead of `java` (or the first one defined)
    #[arg(long, value_name = "REFERENCE")]
    lookup: Option<String>,
    /// Open without checking that the file exists or the page answers 200
    #[arg(long)]
    nocheck: bool,
    /// Show the source code instead of the Javadoc
    #[arg(short, long)]
    source: bool,
    /// Timeout in seconds for HTTP reachability checks
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
    /// Program used to open the result instead of the system default
    #[arg(long, value_name = "APP")]
    viewer: Option<String>,
}

/// Log to stderr, filtered by `SRCDOC_LOG` (warnings only by default).
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_err| return EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
    return;
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    return match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(e.exit_code())
        },
    };
}

/// Make sure a reference exists, resolve the class, check it, and open it.
/// A configuration that could not be saved is reported after the lookup.
///
/// # Errors
///
/// Returns configuration, lookup, existence-check, and viewer errors.
fn open_class<P, R>(cli: &Cli, prompter: &mut P, probe: &R, defaults: Defaults) -> Result<(), error::Error>
where
    P: Prompter + ?Sized,
    R: Probe + ?Sized,
{
    let bootstrap = Bootstrapper::new(prompter, probe, defaults).ensure(&cli.config)?;

    let unsaved = match bootstrap.outcome {
        Outcome::Created { name } => {
            eprintln!("Saved reference `{name}` to {}", cli.config.display());
            None
        },
        Outcome::Existing => None,
        Outcome::Unsaved { error, name } => {
            eprintln!("Using reference `{name}` for this run only; it was not saved");
            Some(error)
        },
    };

    let lookup = if cli.source { LookupType::Source } else { LookupType::Doc };
    let (name, reference) = bootstrap.store.resolve(cli.lookup.as_deref())?;
    tracing::debug!(
        reference = name,
        source = reference.source_base(),
        doc = reference.doc_base(),
        "resolved reference"
    );

    let locator = reference.get_for(&cli.class, lookup)?;
    tracing::debug!(%locator, scheme = ?locator.scheme(), "resolved {lookup}");

    if !cli.nocheck {
        viewer::ensure_exists(&cli.class, &locator, probe)?;
    }
    viewer::open(&locator, cli.viewer.as_deref())?;

    return unsaved.map_or(Ok(()), Err);
}

/// Run against the terminal and the network.
///
/// # Errors
///
/// See [`open_class`].
fn run(cli: &Cli) -> Result<(), error::Error> {
    let probe = HttpProbe::new(cli.timeout.map(Duration::from_secs));
    return open_class(cli, &mut TerminalPrompter, &probe, Defaults::from_env());
}
