use clap::Parser;
use gmp_audit::cli::dispatcher::Dispatcher;
use gmp_audit::cli::main_types::Cli;
use gmp_audit::storage::config::{Config, load_config};
use gmp_audit::utils::logging::Logger;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let logger = Logger::new(cli.verbose, cli.quiet);

    // Load Config
    let config_path = Config::resolve_path(cli.config.clone());
    let config = if cli.access_token.is_some() && !config_path.exists() {
        logger.verbose("No configuration file, using defaults");
        Config::default()
    } else {
        load_config(&config_path, &logger)
    };

    let dispatcher = Dispatcher::new(config, logger);

    if let Err(e) = dispatcher.dispatch(&cli).await {
        eprintln!("{} Error: {}", e.severity().emoji(), e);
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }
}
