// crates/podium-cli/src/main.rs
// ============================================================================
// Module: Podium CLI Entry Point
// Description: Command dispatcher for the Podium MCP server and utilities.
// Purpose: Start the server and expose tool/config documentation commands.
// Dependencies: clap, podium-config, podium-contract, podium-mcp, tokio.
// ============================================================================

//! ## Overview
//! The Podium CLI starts the MCP server over stdio or HTTP and renders the
//! tool and configuration documentation that ships with the binary. Security
//! posture: CLI inputs are untrusted; configuration is validated before the
//! server starts.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use podium_config::PodiumConfig;
use podium_config::config_docs_markdown;
use podium_config::config_toml_example;
use podium_contract::tool_contracts;
use podium_contract::tooling_markdown;
use podium_mcp::McpServer;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "podium", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Podium MCP server.
    Serve(ServeCommand),
    /// Print the MCP tool contracts.
    Tools(ToolsCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Configuration for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to podium.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Configuration for the `tools` command.
#[derive(Args, Debug)]
struct ToolsCommand {
    /// Output format for the tool contracts.
    #[arg(long, value_enum, default_value_t = ToolsFormat::Markdown)]
    format: ToolsFormat,
}

/// Output formats for tool contract listings.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum ToolsFormat {
    /// Markdown reference with per-tool sections.
    Markdown,
    /// Pretty-printed JSON contract array.
    Json,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a Podium configuration file.
    Validate(ConfigValidateCommand),
    /// Print markdown documentation for every podium.toml key.
    Schema,
    /// Print an example podium.toml.
    Example,
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to podium.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a rendered message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a rendered message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        write_stdout_line(&version_line())
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Tools(command) => command_tools(&command),
        Commands::Config {
            command,
        } => command_config(&command),
    }
}

/// Renders the version line for `--version`.
fn version_line() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("podium {version}")
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let config = PodiumConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load configuration: {err}")))?;
    let server = tokio::task::spawn_blocking(move || McpServer::from_config(config))
        .await
        .map_err(|err| {
            CliError::new(format!("failed to initialize server: init join failed: {err}"))
        })?
        .map_err(|err| CliError::new(format!("failed to initialize server: {err}")))?;
    server.serve().await.map_err(|err| CliError::new(format!("server error: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Tools Command
// ============================================================================

/// Executes the `tools` command.
fn command_tools(command: &ToolsCommand) -> CliResult<ExitCode> {
    let rendered = render_tools(command.format)?;
    write_stdout_bytes(rendered.as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Renders the tool contracts in the requested format.
fn render_tools(format: ToolsFormat) -> CliResult<String> {
    let contracts = tool_contracts();
    match format {
        ToolsFormat::Markdown => Ok(tooling_markdown(&contracts)),
        ToolsFormat::Json => {
            let mut rendered = serde_json::to_string_pretty(&contracts)
                .map_err(|err| CliError::new(format!("failed to render tool contracts: {err}")))?;
            rendered.push('\n');
            Ok(rendered)
        }
    }
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: &ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(command),
        ConfigCommand::Schema => command_config_schema(),
        ConfigCommand::Example => command_config_example(),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = PodiumConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load configuration: {err}")))?;
    write_stdout_line("configuration OK")
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Prints the podium.toml key documentation.
fn command_config_schema() -> CliResult<ExitCode> {
    write_stdout_bytes(config_docs_markdown().as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Prints the example podium.toml.
fn command_config_example() -> CliResult<ExitCode> {
    write_stdout_bytes(config_toml_example().as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream failure message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
