use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use sdkup_core::{PlatformFamily, QualityTier, SetupError};

mod flows;
mod global_json;
mod render;
mod telemetry;

use flows::{run_env_command, run_install_command, run_resolve_command};
use render::{current_output_style, OutputStyle};
use telemetry::{init_tracing, LogFormat};

#[derive(Parser, Debug)]
#[command(name = "sdkup", version)]
#[command(about = "Resolve and install .NET SDKs across platforms", long_about = None)]
struct Cli {
    /// Log resolution and installer activity at info level.
    #[arg(long, global = true)]
    verbose: bool,
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
    #[arg(long, global = true, value_enum, env = "SDKUP_OUTPUT")]
    output: Option<OutputStyle>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Install one or more SDKs and print the environment to activate them.
    Install(InstallArgs),
    /// Show how a version would be resolved without installing it.
    Resolve {
        version: String,
        #[arg(long, value_parser = parse_quality)]
        quality: Option<QualityTier>,
        #[arg(long)]
        architecture: Option<String>,
        /// Spell installer flags for another platform.
        #[arg(long, value_parser = parse_platform)]
        platform: Option<PlatformFamily>,
        #[arg(long)]
        releases_index_url: Option<String>,
    },
    /// Print the environment exports for the install directory.
    Env {
        #[arg(long = "architecture")]
        architectures: Vec<String>,
        #[arg(long, value_enum, default_value_t = CliShell::Posix)]
        shell: CliShell,
    },
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct InstallArgs {
    /// Versions to install (A.B.C, A.B, A.B.x, A, A.x, A.B.Cxx); `VERSION@ARCH`
    /// pins the architecture of a single entry.
    versions: Vec<String>,
    #[arg(long, value_parser = parse_quality)]
    quality: Option<QualityTier>,
    #[arg(long)]
    architecture: Option<String>,
    /// Read the SDK version from this global.json.
    #[arg(long)]
    global_json_file: Option<PathBuf>,
    /// Path to install-dotnet.sh / install-dotnet.ps1.
    #[arg(long)]
    install_script: Option<PathBuf>,
    #[arg(long)]
    releases_index_url: Option<String>,
    #[arg(long, value_enum, default_value_t = CliShell::Posix)]
    shell: CliShell,
    /// Print the planned installer invocations without running them.
    #[arg(long)]
    dry_run: bool,
    /// Print the run report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
enum CliShell {
    #[default]
    Posix,
    Powershell,
}

fn parse_quality(value: &str) -> Result<QualityTier, SetupError> {
    value.parse()
}

fn parse_platform(value: &str) -> Result<PlatformFamily, String> {
    value.parse()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format, cli.verbose);
    let style = current_output_style(cli.output);

    match cli.command {
        Commands::Install(args) => run_install_command(&args, style)?,
        Commands::Resolve {
            version,
            quality,
            architecture,
            platform,
            releases_index_url,
        } => run_resolve_command(
            &version,
            quality,
            architecture.as_deref(),
            platform,
            releases_index_url.as_deref(),
            style,
        )?,
        Commands::Env {
            architectures,
            shell,
        } => run_env_command(&architectures, shell)?,
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "sdkup", &mut io::stdout());
        }
    }

    Ok(())
}
