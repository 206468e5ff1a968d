use anyhow::Context;
use sysinfo::System;

use setup_wizard::{SetupApi, SetupBackend, StepRegistry};

const LOG_TARGET_STARTUP: &str = "setup_wizard::startup";

/// Initialize tracing with file rotation
///
/// Logs are written to:
/// - macOS: ~/Library/Application Support/SetupWizard/logs/
/// - Windows: %APPDATA%/SetupWizard/logs/
/// - Linux: ~/.config/SetupWizard/logs/
///
/// Log rotation:
/// - Daily rotation (new file each day)
/// - Files named: setup-wizard.YYYY-MM-DD.log
///
/// Log output:
/// - Debug builds: Console + File
/// - Release builds: File only
fn initialize_tracing() {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Get log directory in user config folder
    let log_dir = dirs::config_dir()
        .map(|dir| dir.join("SetupWizard").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));

    // Create log directory if it doesn't exist
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    // Create file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "setup-wizard.log");

    // Configure filter (info level by default)
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // Create file layer
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    // In debug builds, also log to console
    #[cfg(debug_assertions)]
    {
        let console_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer)
            .init();
    }

    // In release builds, only log to file
    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();
    }

    tracing::info!("Log directory: {}", log_dir.display());
}

fn log_runtime_environment() {
    let mut system = System::new_all();
    system.refresh_all();

    let version = env!("CARGO_PKG_VERSION");
    let os_name = System::long_os_version()
        .or_else(System::name)
        .unwrap_or_else(|| "Unknown OS".to_string());
    let kernel = System::kernel_version().unwrap_or_else(|| "Unknown Kernel".to_string());
    let architecture = std::env::consts::ARCH;

    tracing::info!(target: LOG_TARGET_STARTUP, "Starting setup-wizard-probe v{} on ({})", version, architecture);
    tracing::info!(target: LOG_TARGET_STARTUP, "Operating System: {} (kernel {})", os_name, kernel);
    tracing::debug!(
        target: LOG_TARGET_STARTUP,
        "Memory: {} MB total",
        system.total_memory() / 1024 / 1024
    );
}

fn main() {
    initialize_tracing();
    log_runtime_environment();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: setup-wizard-probe <base-url> [--raw]");
        eprintln!("Example: setup-wizard-probe http://localhost:5000");
        std::process::exit(2);
    }

    let raw = args.iter().any(|arg| arg == "--raw");

    if let Err(err) = run(&args[1], raw) {
        eprintln!("✗ {err:#}");
        std::process::exit(1);
    }
}

/// Fetch the step descriptor from the given instance and report what the
/// wizard session would look like.
fn run(base_url: &str, raw: bool) -> anyhow::Result<()> {
    let api = SetupApi::new(base_url);
    println!("Probing setup endpoint: {}", api.endpoint());

    let descriptor = api
        .fetch_descriptor()
        .context("fetching the step descriptor failed")?;
    println!("✓ Step descriptor fetched ({} steps)", descriptor.len());

    if raw {
        let pretty = serde_json::to_string_pretty(&descriptor)
            .context("rendering the descriptor failed")?;
        println!("{pretty}");
        return Ok(());
    }

    let mut registry = StepRegistry::new();
    registry.load(&descriptor);

    for (id, entry) in descriptor.iter() {
        let state = if registry.is_active(id) {
            "active "
        } else {
            "skipped"
        };
        match entry {
            Some(entry) => println!(
                "  {}  {} (required={}, ignored={})",
                state, id, entry.required, entry.ignored
            ),
            None => println!("  {}  {} (null entry)", state, id),
        }
    }

    if registry.is_empty() {
        println!("\nNo active steps, a wizard session would not have anything to run.");
    } else {
        let active: Vec<&str> = registry.active_steps().iter().map(String::as_str).collect();
        println!("\nActive steps: {}", active.join(", "));
    }

    Ok(())
}
