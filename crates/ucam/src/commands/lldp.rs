//! LLDP command handlers.

use ucam_core::{Camera, LldpNeighbor, LldpStatus};

use crate::cli::{GlobalOpts, LldpArgs, LldpCommand};
use crate::error::CliError;
use crate::output::{self, yes_no};

pub async fn handle(camera: &Camera, args: LldpArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let lldp = camera.lldp();

    let out = match args.command {
        LldpCommand::Status => {
            let status = lldp.status().await?;
            output::render(global.output, &status, render_status)?
        }
        LldpCommand::Neighbors => {
            let neighbors = lldp.neighbors().await?;
            if neighbors.is_empty() && !global.quiet {
                eprintln!("No LLDP neighbours seen on {}", camera.endpoint().identity());
            }
            output::render(global.output, &neighbors, |list| {
                list.iter().map(neighbor_line).collect::<Vec<_>>().join("\n")
            })?
        }
    };

    output::print_output(&out, global.quiet);
    Ok(())
}

fn render_status(status: &LldpStatus) -> String {
    output::detail(&[
        ("Enabled", yes_no(status.enabled)),
        ("Transmit interval", format!("{}s", status.transmit_interval)),
        ("Hold multiplier", status.hold_multiplier.to_string()),
        ("Chassis ID", status.chassis_id.clone()),
        ("Port ID", status.port_id.clone()),
        ("System name", status.system_name.clone()),
        ("Description", status.system_description.clone()),
    ])
}

/// `system  port  chassis  mgmt-address`, with `-` for blanks.
fn neighbor_line(neighbor: &LldpNeighbor) -> String {
    let or_dash = |s: &str| if s.is_empty() { "-".to_owned() } else { s.to_owned() };
    [
        or_dash(&neighbor.system_name),
        or_dash(&neighbor.port_id),
        or_dash(&neighbor.chassis_id),
        or_dash(&neighbor.management_address),
    ]
    .join("  ")
}
