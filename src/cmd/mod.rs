/*!
Command layer for `current-weather`.

Layout:
  src/cmd/
    mod.rs       (this file: module declarations + re-exports)
    mode.rs      (Mode enum + helpers)
    dispatch.rs  (DispatchArgs + Dispatcher + execute_dispatch)
    format.rs    (JSON rendering with spaced / compact separators)
    profile.rs   (optional YAML / JSON configuration file)
    shared.rs    (delegate command parsing + child process execution)

Conventions:
  - The public entry point `execute_dispatch` returns `anyhow::Result<i32>`
    carrying the process exit code.
  - Argument structs derive `clap::Args` and are flattened into `Cli`.
*/

pub mod dispatch;
pub mod format;
pub mod mode;
pub mod profile;
pub mod shared;

pub use dispatch::{DispatchArgs, execute_dispatch};
