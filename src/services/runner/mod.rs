mod dry_run;
mod process;
mod session;
mod r#trait;

#[cfg(test)]
pub(crate) mod recording;

pub use self::dry_run::DryRunRunner;
pub use self::process::ProcessRunner;
pub(crate) use self::process::{exit_code, spawn_error};
pub(crate) use self::session::tool_command;
pub use self::session::SudoSession;
pub use self::r#trait::{create_tool_runner, ToolRunner};
