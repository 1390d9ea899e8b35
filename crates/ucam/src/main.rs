mod cli;
mod commands;
mod error;
mod output;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ucam_api::{Credentials, DeviceEndpoint, Scheme, TlsMode, TransportConfig};
use ucam_core::Camera;

use crate::cli::{Cli, Command, GlobalOpts, SchemeArg};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Shell completions never touch a camera
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "ucam", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let camera = build_camera(&cli.global)?;

            tracing::debug!(
                camera = %camera.endpoint().identity(),
                command = ?cmd,
                "dispatching command"
            );
            commands::dispatch(cmd, &camera, &cli.global).await
        }
    }
}

/// Build the camera dispatcher from global flags.
fn build_camera(global: &GlobalOpts) -> Result<Camera, CliError> {
    let host = global
        .host
        .as_deref()
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| CliError::Validation {
            field: "--host".into(),
            reason: "a camera address is required".into(),
        })?;

    let password = global.password.clone().ok_or_else(|| CliError::NoCredentials {
        username: global.username.clone(),
    })?;

    let scheme = match global.scheme {
        SchemeArg::Http => Scheme::Http,
        SchemeArg::Https => Scheme::Https,
    };
    let port = global.port.unwrap_or(match scheme {
        Scheme::Http => 80,
        Scheme::Https => 443,
    });

    let mut endpoint = DeviceEndpoint::new(
        host.trim(),
        port,
        Credentials::new(global.username.clone(), password),
    )
    .with_scheme(scheme);
    if let Some(ref name) = global.name {
        endpoint = endpoint.with_name(name.clone());
    }
    if let (Some(user), Some(pass)) = (&global.admin_username, &global.admin_password) {
        endpoint = endpoint.with_admin_credentials(Credentials::new(user.clone(), pass.clone()));
    }

    let mut transport = TransportConfig::with_timeout(Duration::from_secs(global.timeout));
    transport.tls = match (&global.ca_cert, global.verify_tls) {
        (Some(path), _) => TlsMode::CustomCa(path.clone()),
        (None, true) => TlsMode::System,
        (None, false) => TlsMode::DangerAcceptInvalid,
    };
    Ok(Camera::new(endpoint, &transport)?)
}
