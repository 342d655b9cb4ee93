/*!
shared.rs - external command helpers for the delegate mode.

Focus:
  - parse_command: shell-style split of the delegate command line
  - run_captured(_async): spawn the command with one extra argument and
    capture stdout / stderr / exit status
  - exit_code: map a child's `ExitStatus` to our own exit code

The child's output is returned untouched; the dispatcher forwards it.
*/

use anyhow::{Context, Result, bail};
use shell_words::split as shell_split;
use std::ffi::OsStr;
use std::fmt;
use std::process::{ExitStatus, Stdio};
use std::time::Instant;

/// Default "print file contents" command.
pub const DEFAULT_DELEGATE: &str = "cat";

/* ---- Data Structures ---- */

/// A parsed delegate command line: program plus leading arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub original: String,
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.program)
        } else {
            write!(f, "{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Everything the child produced.
#[derive(Debug)]
pub struct Captured {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// Exit code to report as our own.
    pub code: i32,
    /// Elapsed time (milliseconds) for spawn + wait
    pub elapsed_ms: u128,
}

/* ---- Parsing ---- */

/// Split a delegate command line with shell-style rules.
///
/// - "cat" -> program `cat`, no args
/// - "head -c 4096" -> program `head`, args `["-c", "4096"]`
/// - "'/opt/my tools/cat'" -> program `/opt/my tools/cat`
pub fn parse_command(raw: &str) -> Result<CommandSpec> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("Delegate command is empty");
    }
    let parts =
        shell_split(trimmed).context("Failed to parse delegate command (shell splitting)")?;
    let Some((program, args)) = parts.split_first() else {
        bail!("No tokens produced when parsing delegate command");
    };
    if program.is_empty() {
        bail!("Empty program name in delegate command");
    }
    Ok(CommandSpec {
        original: raw.to_string(),
        program: program.clone(),
        args: args.to_vec(),
    })
}

/* ---- Execution ---- */

/// Synchronous convenience wrapper:
///   - Creates a temporary current-thread Tokio runtime
///   - Spawns `spec` with `extra` appended as the final argument
///   - Waits for it and captures its output
pub fn run_captured(spec: &CommandSpec, extra: &OsStr) -> Result<Captured> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;
    rt.block_on(run_captured_async(spec, extra))
}

/// Async variant of [`run_captured`].
pub async fn run_captured_async(spec: &CommandSpec, extra: &OsStr) -> Result<Captured> {
    use tokio::process::Command;

    let started = Instant::now();

    let output = Command::new(&spec.program)
        .args(&spec.args)
        .arg(extra)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .with_context(|| format!("Failed to spawn delegate command: {}", spec.program))?;

    Ok(Captured {
        stdout: output.stdout,
        stderr: output.stderr,
        code: exit_code(output.status),
        elapsed_ms: started.elapsed().as_millis(),
    })
}

/// Child exit status as a process exit code. A signal-terminated child on
/// unix maps to `128 + signal`, like a shell would report it.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

/* ---- Tests (basic) ---- */
#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_simple() {
        let spec = parse_command("cat").unwrap();
        assert_eq!(spec.program, "cat");
        assert!(spec.args.is_empty());
        assert_eq!(spec.to_string(), "cat");
    }

    #[test]
    fn parse_with_args() {
        let spec = parse_command("  head -c 4096 ").unwrap();
        assert_eq!(spec.program, "head");
        assert_eq!(spec.args, vec!["-c".to_string(), "4096".to_string()]);
        assert_eq!(spec.to_string(), "head -c 4096");
    }

    #[test]
    fn parse_quoted_program() {
        let spec = parse_command("'/opt/my tools/cat' -u").unwrap();
        assert_eq!(spec.program, "/opt/my tools/cat");
        assert_eq!(spec.args, vec!["-u".to_string()]);
    }

    #[test]
    fn empty_command_rejected() {
        assert!(parse_command("   ").is_err());
        assert!(parse_command("''").is_err());
    }

    #[test]
    fn unbalanced_quotes_rejected() {
        let err = parse_command("cat 'oops").unwrap_err();
        assert!(err.to_string().contains("shell splitting"));
    }

    #[cfg(unix)]
    #[test]
    fn run_captures_file_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"{\"a\": 1}").unwrap();
        let spec = parse_command(DEFAULT_DELEGATE).unwrap();
        let captured = run_captured(&spec, file.path().as_os_str()).unwrap();
        assert_eq!(captured.code, 0);
        assert_eq!(captured.stdout, b"{\"a\": 1}".to_vec());
        assert!(captured.stderr.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn run_reports_child_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let spec = parse_command(DEFAULT_DELEGATE).unwrap();
        let captured = run_captured(&spec, missing.as_os_str()).unwrap();
        assert_ne!(captured.code, 0);
        assert!(captured.stdout.is_empty());
        assert!(!captured.stderr.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_forwarded_unchanged() {
        let spec = parse_command("sh -c 'echo partial; echo oops >&2; exit 3'").unwrap();
        let captured = run_captured(&spec, OsStr::new("x")).unwrap();
        assert_eq!(captured.code, 3);
        assert_eq!(captured.stdout, b"partial\n".to_vec());
        assert_eq!(captured.stderr, b"oops\n".to_vec());
    }

    #[cfg(unix)]
    #[test]
    fn signal_termination_maps_to_128_plus_signal() {
        let spec = parse_command("sh -c 'kill -TERM $$'").unwrap();
        let captured = run_captured(&spec, OsStr::new("x")).unwrap();
        assert_eq!(captured.code, 128 + 15);
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let spec = parse_command("definitely-not-a-real-program-3f9a").unwrap();
        let err = run_captured(&spec, OsStr::new("x")).unwrap_err();
        assert!(err.to_string().contains("Failed to spawn delegate command"));
    }
}
