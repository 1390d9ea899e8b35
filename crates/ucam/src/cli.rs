//! Clap derive structures for the `ucam` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. This file
//! only depends on `clap` and `clap_complete` so `build.rs` can include it
//! to render man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ucam -- diagnostics for AXIS cameras over VAPIX
#[derive(Debug, Parser)]
#[command(
    name = "ucam",
    version,
    about = "Inspect AXIS camera configuration, logs and stream health",
    long_about = "Talks directly to a camera's VAPIX HTTP surface.\n\n\
        Requests answer Digest (or Basic) challenges with the primary\n\
        credentials, or with the admin credentials for VAPIX endpoints\n\
        when they are given.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Camera address (IP or hostname)
    #[arg(long, short = 'H', global = true)]
    pub host: Option<String>,

    /// HTTP port (default: 80 for http, 443 for https)
    #[arg(long, short = 'P', global = true)]
    pub port: Option<u16>,

    /// URL scheme
    #[arg(long, value_enum, default_value = "http", global = true)]
    pub scheme: SchemeArg,

    /// Display name used in reports (defaults to the address)
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Primary (viewer/ONVIF) username
    #[arg(long, short = 'u', default_value = "root", global = true)]
    pub username: String,

    /// Primary password
    #[arg(long, short = 'p', global = true)]
    pub password: Option<String>,

    /// Admin username for VAPIX endpoints
    #[arg(long, global = true, requires = "admin_password")]
    pub admin_username: Option<String>,

    /// Admin password for VAPIX endpoints
    #[arg(long, global = true, requires = "admin_username")]
    pub admin_password: Option<String>,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value = "plain", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    pub timeout: u64,

    /// Verify the camera certificate against this PEM CA bundle
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "verify_tls")]
    pub ca_cert: Option<PathBuf>,

    /// Verify the camera certificate against the system trust store
    /// (self-signed certificates are accepted by default)
    #[arg(long, global = true)]
    pub verify_tls: bool,
}

// ── Shared Enums ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one record per line (default)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SchemeArg {
    Http,
    Https,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogCategoryArg {
    /// syslog, messages, kern.log
    System,
    /// access.log, httpd/access
    Access,
    /// audit.log, audit/audit
    Audit,
    /// System, access and audit, in that order
    All,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SeverityArg {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the device parameter tree
    #[command(alias = "p")]
    Params(ParamsArgs),

    /// Retrieve and filter device logs
    #[command(alias = "l")]
    Logs(LogsArgs),

    /// Collect RTSP, RTP, stream profile and network diagnostics
    #[command(alias = "diag")]
    Diagnostics(DiagnosticsArgs),

    /// Show LLDP status and link neighbours
    Lldp(LldpArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Params ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ParamsArgs {
    #[command(subcommand)]
    pub command: ParamsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ParamsCommand {
    /// List top-level parameter groups
    Groups,

    /// Look up a value or sub-tree by dotted path (e.g. root.Network.RTSP.Port)
    Get {
        /// Full dotted path, starting with `root`
        path: String,
    },

    /// List every parameter whose path contains TEXT (case-sensitive)
    Search {
        /// Substring to match against full parameter paths
        text: String,
    },

    /// Print every parameter as `path = value`
    Flatten,

    /// Fetch a single group (e.g. Network.RTSP) without the full tree
    Group {
        /// Group path, dotted or slash-separated
        group: String,
    },

    /// Show product identity from the Brand group
    Info,
}

// ── Logs ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LogsArgs {
    #[command(subcommand)]
    pub command: LogsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LogsCommand {
    /// Show parsed log entries
    Show {
        /// Log category to read
        #[arg(long, short = 'c', value_enum, default_value = "system")]
        category: LogCategoryArg,

        /// Keep only the first N entries (after level filtering)
        #[arg(long, short = 'n')]
        lines: Option<usize>,

        /// Minimum severity to keep
        #[arg(long, short = 'l', value_enum)]
        level: Option<SeverityArg>,
    },

    /// List files in the server report archive
    Files,
}

// ── Diagnostics ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DiagnosticsArgs {
    /// Also include image, stream cache and QoS parameter groups
    #[arg(long)]
    pub extra: bool,
}

// ── LLDP ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LldpArgs {
    #[command(subcommand)]
    pub command: LldpCommand,
}

#[derive(Debug, Subcommand)]
pub enum LldpCommand {
    /// Local LLDP agent status
    Status,
    /// Devices seen on the camera's link
    Neighbors,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
