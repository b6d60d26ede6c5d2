//! Configuration view and validation commands: `hireboard config`.

use anyhow::Result;

use super::super::ConfigCommands;
use hireboard::board_config::{Backend, BoardConfig, HireboardToml};

pub fn cmd_config(config: &BoardConfig, command: Option<ConfigCommands>) -> Result<()> {
    let config_path = config.config_path();

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Hireboard Configuration");
            println!("=======================");
            println!();

            match &config.source {
                Some(source) => println!("Config file: {}", source.display()),
                None => {
                    println!("No hireboard.toml found at {}", config_path.display());
                    println!("Using default configuration.");
                }
            }
            println!();

            let toml = &config.toml;
            println!("[store]");
            println!("  backend = \"{}\"", toml.store.backend);
            println!("  db_path = \"{}\"", toml.store.db_path.display());
            if let Some(url) = &toml.store.rest.url {
                println!("  rest.url = \"{}\"", url);
            }
            println!("  rest.api_key_env = \"{}\"", toml.store.rest.api_key_env);
            println!();

            println!("[board]");
            println!("  headers = {:?}", toml.board.headers);
            println!();

            println!("[interviews]");
            println!("  upcoming_limit = {}", toml.interviews.upcoming_limit);
            println!();

            println!("[server]");
            println!("  port = {}", toml.server.port);
            println!();

            if let Some(dir) = &toml.logging.dir {
                println!("[logging]");
                println!("  dir = \"{}\"", dir.display());
                println!();
            }

            println!("Effective values (with env/CLI overrides):");
            println!("  backend = \"{}\"", config.backend());
            match config.backend() {
                Backend::Sqlite => println!("  db_path = \"{}\"", config.db_path().display()),
                Backend::Rest => println!(
                    "  rest.url = \"{}\"",
                    config.rest_url().unwrap_or_else(|| "(unset)".to_string())
                ),
            }
            println!();

            if config.source.is_none() {
                println!("Run 'hireboard config init' to create a hireboard.toml file.");
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if config.source.is_none() {
                println!("No hireboard.toml found. Using defaults (valid).");
                return Ok(());
            }

            let warnings = config.validate();
            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("hireboard.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            if !config.config_dir.exists() {
                std::fs::create_dir_all(&config.config_dir)?;
            }

            let toml = HireboardToml::default();
            toml.save(&config_path)?;

            println!("Created hireboard.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [store] backend, db_path, rest.url");
            println!("  - [board] headers written back as candidate status");
            println!("  - [interviews] upcoming_limit");
            println!();
        }
    }

    Ok(())
}
