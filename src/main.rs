use anyhow::Result;
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use questvox::app::{run_announce_command, run_say_command};
use questvox::cli::{Cli, Commands};
use questvox::config::Config;
use questvox::diagnostics::check_dependencies;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let config = load_config(cli.config.as_deref())?;
            if let Err(e) = run_announce_command(
                config,
                cli.reader,
                cli.language,
                cli.tld,
                cli.quiet,
                cli.verbose,
            )
            .await
            {
                eprintln!("{}", format!("Error: {}", e).red());
                std::process::exit(1);
            }
        }
        Some(Commands::Say { text }) => {
            let mut config = load_config(cli.config.as_deref())?;
            questvox::app::apply_overrides(&mut config, cli.reader, cli.language, cli.tld);
            if let Err(e) = run_say_command(config, &text).await {
                eprintln!("{}", format!("Error: {}", e).red());
                std::process::exit(1);
            }
        }
        Some(Commands::Check) => {
            let mut config = load_config(cli.config.as_deref())?;
            questvox::app::apply_overrides(&mut config, cli.reader, cli.language, cli.tld);
            check_dependencies(&config);
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "questvox", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/questvox/config.toml)
/// 3. Built-in defaults with environment variable overrides
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path)?
    } else {
        let default_path = Config::default_path();
        Config::load_or_default(&default_path)
    };

    // Apply environment variable overrides
    Ok(config.with_env_overrides())
}
