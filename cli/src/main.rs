//! qubit - interactive checker for qubit amplitude expressions.
//!
//! # Architecture
//!
//! ```text
//! main() -> Args::parse -> load_whitelist -> Session::run(stdin, stdout)
//!                                                 |
//!                                                 v
//!                                   Validator (per field) + History
//! ```
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `warn`), so stdout is a
//! clean transcript that can be piped or diffed.

mod session;

use std::env;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use qubit_config::QubitConfig;
use qubit_core::{Validator, Whitelist};

use session::{HELP, Session};

const USAGE: &str = "\
usage: qubit [--config <path>]

Reads commands from stdin, one per line. Type `help` for the command list.

options:
  --config <path>  load the whitelist from this file instead of ~/.qubit/config.toml
  -h, --help       print this text";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal()),
        )
        .with(env_filter)
        .init();
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    help: bool,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "--config" => {
                    let path = args.next().context("--config needs a path")?;
                    parsed.config = Some(PathBuf::from(path));
                }
                other => match other.strip_prefix("--config=") {
                    Some(path) if !path.is_empty() => parsed.config = Some(PathBuf::from(path)),
                    _ => bail!("unknown argument: {other}\n\n{USAGE}"),
                },
            }
        }
        Ok(parsed)
    }
}

/// An explicit `--config` must exist and parse. The default location is
/// optional, and a broken file there only costs a warning.
fn load_whitelist(explicit: Option<&Path>) -> Result<Whitelist> {
    if let Some(path) = explicit {
        let config = QubitConfig::load_from(path)
            .with_context(|| format!("loading {}", path.display()))?
            .with_context(|| format!("config file {} does not exist", path.display()))?;
        return Ok(config.whitelist());
    }

    let config = QubitConfig::load().ok().flatten();
    Ok(config.map_or_else(Whitelist::default, |config| config.whitelist()))
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse(env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let whitelist = load_whitelist(args.config.as_deref())?;
    tracing::debug!(
        functions = whitelist.functions().count(),
        symbols = whitelist.symbols().count(),
        "whitelist ready"
    );

    if io::stdin().is_terminal() {
        eprintln!("{HELP}");
    }

    let mut session = Session::new(Validator::new(whitelist));
    session.run(io::stdin().lock(), io::stdout().lock())
}
