use anyhow::Result;
use clap::{CommandFactory, Parser};
use lectern::app::{NotesOptions, run_notes_command};
use lectern::cli::{Cli, Commands, ConfigAction, ModelsAction};
use lectern::config::Config;
use lectern::diagnostics::check_environment;
use lectern::models::catalog::{get_model, list_models, resolve_name};
use lectern::models::download::{download_model, format_model_info, is_model_installed};
use owo_colors::OwoColorize;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let Some(audio) = cli.audio else {
                // No audio file and no subcommand: print usage
                Cli::command().print_help()?;
                std::process::exit(2);
            };

            let config = load_config(cli.config.as_deref())?;
            let options = NotesOptions {
                model: cli.model,
                language: cli.language,
                output: cli.output,
                questions: cli.questions,
                quiet: cli.quiet,
                verbosity: cli.verbose,
                no_download: cli.no_download,
            };

            if let Err(e) = run_notes_command(config, &audio, options).await {
                eprintln!("{}", format!("Error: {}", e).red());
                std::process::exit(1);
            }
        }
        Some(Commands::Models { action }) => {
            handle_models_command(action, cli.config.as_deref()).await?;
        }
        Some(Commands::Check) => {
            let config = load_config(cli.config.as_deref())?;
            check_environment(&config);
        }
        Some(Commands::Config { action }) => {
            handle_config_command(action, cli.config.as_deref())?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "lectern",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/lectern/config.toml)
/// 3. Built-in defaults with environment variable overrides
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        if !path.exists() {
            return Err(lectern::LecternError::ConfigFileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        Config::load(path)?
    } else {
        Config::load_or_default(&Config::default_path())?
    };

    Ok(config.with_env_overrides())
}

/// Handle model management commands.
async fn handle_models_command(
    action: ModelsAction,
    custom_path: Option<&std::path::Path>,
) -> Result<()> {
    match action {
        ModelsAction::List => {
            println!("Available models:");
            for model in list_models() {
                println!("  {}", format_model_info(model));
            }
        }
        ModelsAction::Install { name } => {
            let path = download_model(&name, true).await?;
            println!("Model '{}' installed successfully", name);
            println!("Location: {}", path.display());
        }
        ModelsAction::Use { name } => {
            let resolved = resolve_name(&name);
            if resolved != name {
                println!("Resolved '{name}' to '{resolved}'");
            }
            if get_model(resolved).is_none() {
                eprintln!("Unknown model: '{name}'");
                eprintln!("Run `lectern models list` to see available models.");
                std::process::exit(1);
            }

            let config_path = custom_path
                .map(std::path::PathBuf::from)
                .unwrap_or_else(Config::default_path);
            Config::update_model(&config_path, resolved)?;
            println!("Default model set to '{resolved}'");

            if !is_model_installed(resolved) {
                println!(
                    "Note: model not yet downloaded. Run `lectern models install {resolved}` or it will download on first use."
                );
            }
        }
    }
    Ok(())
}

/// Handle configuration commands.
fn handle_config_command(
    action: ConfigAction,
    custom_path: Option<&std::path::Path>,
) -> Result<()> {
    let config_path = custom_path
        .map(std::path::PathBuf::from)
        .unwrap_or_else(Config::default_path);

    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_or_default(&config_path)?.with_env_overrides();
            match config.get_value_by_path(&key) {
                Ok(value) => println!("{}", value),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            Config::set_value_by_path(&config_path, &key, &value)?;
            println!("Set {} = {}", key, value);
        }
        ConfigAction::List => {
            let config = Config::load_or_default(&config_path)?.with_env_overrides();
            print!("{}", config.to_display_toml()?);
        }
        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
    }
    Ok(())
}
