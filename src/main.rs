use clap::Parser;

mod cmd;
mod utils;
mod weather;

use cmd::DispatchArgs;

/// Current Weather - a static function provider.
///
/// Invocation:
///   current-weather                  print the current weather reading
///   current-weather specification    print the function specification
///   current-weather <anything else>  print nothing, exit 0
///
/// Modes (-m / --mode):
///   spaced    in-process JSON, ", " and ": " separators (default)
///   compact   in-process JSON, "," and ":" separators; keyword is `spec`
///   delegate  print current_weather.json / current_weather_specification.json
///             through an external command (default `cat`), forwarding its
///             output and exit status
///
/// Global flags:
///   -v / -vv        Increase verbosity (logs go to stderr)
///   -q / --quiet    Errors only
///   -c / --config   Profile file (YAML or JSON); flags override its entries
///
/// Examples:
///   current-weather
///   current-weather --mode compact spec
///   current-weather --mode delegate specification
///   current-weather --config weather.yaml
#[derive(Parser, Debug)]
#[command(
    name = "current-weather",
    version,
    about = "Print a static weather reading or its function specification as JSON"
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(flatten)]
    dispatch: DispatchArgs,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    match cmd::execute_dispatch(cli.dispatch) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            log_error!("{e:#}");
            std::process::exit(1);
        }
    }
}
