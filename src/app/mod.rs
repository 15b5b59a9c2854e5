pub mod config;
pub mod logging;

pub use config::{Config, ConfigError, LogLevel};
pub use logging::setup_logging;

use clap::Parser;
use std::process;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::collector::LineCollector;
use crate::forwarder::Forwarder;
use crate::sender::UdpSender;

pub struct App {
    forwarder: Forwarder,
}

impl App {
    pub async fn from_args<I, T>(args: I) -> Result<Self, Box<dyn std::error::Error + Send + Sync>>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Config::from_args(args)?;
        Self::from_config(config).await
    }

    pub async fn from_config(
        config: Config,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        // Load config file if specified
        let final_config = if let Some(config_file) = &config.config_file {
            eprintln!("Loading configuration from file: {}", config_file.display());
            Config::from_file(config_file)?
        } else {
            config
        };

        setup_logging(&final_config)?;

        info!("Starting hub-syslog-forwarder v{}", env!("CARGO_PKG_VERSION"));
        info!(
            "Configuration: server={}:{}, facility={}, dialect={:?}",
            final_config.server, final_config.port, final_config.facility, final_config.dialect
        );

        let sender = UdpSender::connect(&final_config.server, final_config.port).await?;
        let mut forwarder = Forwarder::new(final_config, sender);
        forwarder.initialize();

        Ok(Self { forwarder })
    }

    /// Runs the forwarding loop over stdin until EOF or Ctrl+C.
    pub async fn run(mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let collector = LineCollector::new(tokio::io::stdin());
        let collect_task = tokio::spawn(async move {
            if let Err(e) = collector.run(tx).await {
                error!("Collector error: {e}");
            }
        });

        info!("hub-syslog-forwarder is running. Press Ctrl+C to stop.");

        loop {
            tokio::select! {
                line = rx.recv() => match line {
                    Some(line) => {
                        if let Err(e) = self.forwarder.handle(&line).await {
                            warn!("Dropped message: {e}");
                        }
                    }
                    None => break, // inbound stream ended
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        collect_task.abort();
        self.forwarder.disconnect();
        info!("hub-syslog-forwarder stopped.");
        Ok(())
    }
}

pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Main entry point for the application
pub async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args: Vec<String> = std::env::args().collect();

    // Handle version flag specially
    if args.len() > 1 && (args[1] == "--version" || args[1] == "-V") {
        println!("hub-syslog-forwarder {}", get_version());
        return Ok(());
    }

    // Handle help flag
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        Config::parse_from(["hub-syslog-forwarder", "--help"]);
        return Ok(());
    }

    match App::from_args(args).await {
        Ok(app) => {
            if let Err(e) = app.run().await {
                error!("Application error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Configuration error: {}", e);
            process::exit(1);
        }
    }

    Ok(())
}
