//! Command dispatch: bridges CLI args -> core components -> output formatting.

pub mod diagnostics;
pub mod lldp;
pub mod logs;
pub mod params;

use ucam_core::Camera;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a camera-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, camera: &Camera, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Params(args) => params::handle(camera, args, global).await,
        Command::Logs(args) => logs::handle(camera, args, global).await,
        Command::Diagnostics(args) => diagnostics::handle(camera, args, global).await,
        Command::Lldp(args) => lldp::handle(camera, args, global).await,
        // Completions are handled before dispatch
        Command::Completions(_) => unreachable!(),
    }
}
