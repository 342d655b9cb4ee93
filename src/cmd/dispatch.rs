/*!
`dispatch.rs`

Matches the positional arguments against the recognized patterns and
prints the selected payload.

Patterns:
  - (no arguments)        : the current weather reading
  - `<keyword>` (exactly) : the function specification
  - anything else         : nothing; exit status 0

Keyword defaults per mode: `specification` (delegate, spaced), `spec` (compact).

Output strategies (see `Mode`):
  - spaced / compact : serialize in-process, print with a trailing newline
  - delegate         : run `<delegate> <file>` and forward the child's stdout,
                       stderr and exit status unchanged

Settings precedence: command-line flag > profile file > default.

Unmatched arguments are a silent no-op. No variant of this tool ever
defined a message for them, so none is invented here.
*/

use anyhow::{Context, Result};
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cmd::format::{Separators, to_json_string};
use crate::cmd::mode::Mode;
use crate::cmd::profile::{Profile, load_profile};
use crate::cmd::shared::{DEFAULT_DELEGATE, parse_command, run_captured};
use crate::weather::{current_weather, current_weather_specification};
use crate::{log_debug, log_trace};

/// Backing file for the weather reading (delegate mode).
pub const WEATHER_FILE: &str = "current_weather.json";
/// Backing file for the function specification (delegate mode).
pub const SPECIFICATION_FILE: &str = "current_weather_specification.json";

/* -------------------------------------------------------------------------- */
/* Argument Struct                                                            */
/* -------------------------------------------------------------------------- */

/// Dispatcher arguments (flattened into the top-level CLI).
#[derive(Args, Debug, Default)]
pub struct DispatchArgs {
    /// Arguments to match: none for the weather reading, the keyword for the specification
    #[arg(value_name = "ARGS", allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Output strategy [default: spaced]
    #[arg(short = 'm', long, value_enum)]
    pub mode: Option<Mode>,

    /// Override the keyword that selects the specification
    #[arg(long, value_name = "WORD")]
    pub keyword: Option<String>,

    /// Weather file printed in delegate mode
    #[arg(long = "weather-file", value_name = "PATH")]
    pub weather_file: Option<PathBuf>,

    /// Specification file printed in delegate mode
    #[arg(long = "specification-file", value_name = "PATH")]
    pub specification_file: Option<PathBuf>,

    /// Command used to print a file in delegate mode (default: "cat")
    #[arg(long = "delegate", value_name = "COMMAND")]
    pub delegate: Option<String>,

    /// Profile file (YAML or JSON) with default settings
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/* -------------------------------------------------------------------------- */
/* Dispatcher                                                                 */
/* -------------------------------------------------------------------------- */

/// What a given argument list asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    Weather,
    Specification,
    Unmatched,
}

/// Fully resolved dispatcher settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatcher {
    pub mode: Mode,
    pub keyword: String,
    pub weather_file: PathBuf,
    pub specification_file: PathBuf,
    pub delegate: String,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

impl Dispatcher {
    /// Defaults for `mode`.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            keyword: mode.keyword().to_string(),
            weather_file: PathBuf::from(WEATHER_FILE),
            specification_file: PathBuf::from(SPECIFICATION_FILE),
            delegate: DEFAULT_DELEGATE.to_string(),
        }
    }

    /// Merge flags over profile entries over defaults.
    pub fn resolve(args: &DispatchArgs, profile: Profile) -> Self {
        let mode = args.mode.or(profile.mode).unwrap_or_default();
        let defaults = Self::new(mode);
        Self {
            mode,
            keyword: args
                .keyword
                .clone()
                .or(profile.keyword)
                .unwrap_or(defaults.keyword),
            weather_file: args
                .weather_file
                .clone()
                .or(profile.weather_file)
                .unwrap_or(defaults.weather_file),
            specification_file: args
                .specification_file
                .clone()
                .or(profile.specification_file)
                .unwrap_or(defaults.specification_file),
            delegate: args
                .delegate
                .clone()
                .or(profile.delegate)
                .unwrap_or(defaults.delegate),
        }
    }

    pub fn classify(&self, args: &[String]) -> Invocation {
        match args {
            [] => Invocation::Weather,
            [only] if *only == self.keyword => Invocation::Specification,
            _ => Invocation::Unmatched,
        }
    }

    /// Handle one invocation. Returns the process exit code.
    pub fn run<O, E>(&self, args: &[String], out: &mut O, err: &mut E) -> Result<i32>
    where
        O: Write + ?Sized,
        E: Write + ?Sized,
    {
        let invocation = self.classify(args);
        log_debug!("mode={} keyword={:?} invocation={:?}", self.mode, self.keyword, invocation);

        if invocation == Invocation::Unmatched {
            log_debug!("no pattern matched {:?}; nothing to print", args);
            return Ok(0);
        }

        match self.mode.separators() {
            Some(separators) => {
                self.print_in_process(invocation, separators, out)?;
                Ok(0)
            }
            None => self.print_delegated(invocation, out, err),
        }
    }

    fn print_in_process<O>(&self, invocation: Invocation, separators: Separators, out: &mut O) -> Result<()>
    where
        O: Write + ?Sized,
    {
        let rendered = match invocation {
            Invocation::Specification => to_json_string(&current_weather_specification(), separators)?,
            _ => to_json_string(&current_weather(), separators)?,
        };
        log_trace!("rendered {} bytes with separators {}", rendered.len(), separators);
        writeln!(out, "{rendered}").context("failed to write to stdout")?;
        out.flush().context("failed to flush stdout")?;
        Ok(())
    }

    fn print_delegated<O, E>(&self, invocation: Invocation, out: &mut O, err: &mut E) -> Result<i32>
    where
        O: Write + ?Sized,
        E: Write + ?Sized,
    {
        let path = match invocation {
            Invocation::Specification => &self.specification_file,
            _ => &self.weather_file,
        };
        let command = parse_command(&self.delegate)
            .with_context(|| format!("Invalid delegate command '{}'", self.delegate))?;
        log_trace!("delegating to `{}` (from {:?}) for {}", command, command.original, path.display());

        let captured = run_captured(&command, path.as_os_str())?;
        log_debug!(
            "delegate exited with {} after {} ms ({} bytes out, {} bytes err)",
            captured.code,
            captured.elapsed_ms,
            captured.stdout.len(),
            captured.stderr.len()
        );

        out.write_all(&captured.stdout).context("failed to write to stdout")?;
        out.flush().context("failed to flush stdout")?;
        err.write_all(&captured.stderr).context("failed to write to stderr")?;
        err.flush().context("failed to flush stderr")?;
        Ok(captured.code)
    }
}

/* -------------------------------------------------------------------------- */
/* Public Entry Point                                                         */
/* -------------------------------------------------------------------------- */

/// Resolve settings, run the dispatcher against the real stdout / stderr and
/// return the exit code.
pub fn execute_dispatch(args: DispatchArgs) -> Result<i32> {
    let profile = match &args.config {
        Some(path) => load_profile(path)?,
        None => Profile::default(),
    };
    let dispatcher = Dispatcher::resolve(&args, profile);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();
    dispatcher.run(&args.args, &mut out, &mut err)
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                      */
/* -------------------------------------------------------------------------- */
