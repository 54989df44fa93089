#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatError;
use crate::domain::models::ModelDescriptor;
use crate::domain::models::Persona;
use crate::domain::services::actions::help_text;
use crate::domain::services::actions::model_options;
use crate::domain::services::actions::persona_options;
use crate::domain::services::ChatController;
use crate::domain::services::Exports;
use crate::domain::services::TurnOutcome;
use crate::infrastructure::backends::BackendManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!(
        "Created default config file at {}",
        config_file_path.display()
    );
    return Ok(());
}

async fn print_models(matches: &ArgMatches, subcmd_matches: &ArgMatches) -> Result<()> {
    Config::load(build(), vec![matches, subcmd_matches]).await?;

    let backend = BackendManager::get()?;
    let mut installed = vec![];
    if let Err(err) = backend.health_check().await {
        println!(
            "{}\n",
            Paint::yellow(format!(
                "Ollama isn't reachable at {}, installed models are unknown. {err}",
                Config::get(ConfigKey::OllamaURL)
            ))
        );
    } else {
        installed = backend.list_models().await?;
    }

    println!("{}", model_options(&installed));
    return Ok(());
}

async fn ask(text: &str) -> Result<()> {
    let mut controller = ChatController::from_config()?;

    match controller.submit(text).await {
        TurnOutcome::Completed(message) => {
            println!("{}", message.content());
        }
        TurnOutcome::Failed { message, .. } => {
            bail!(message.content().to_string());
        }
        TurnOutcome::Rejected => {
            bail!(ChatError::Validation);
        }
    }

    return Ok(());
}

async fn print_exports_list() -> Result<()> {
    let exports = Exports::default();
    let files = exports.list().await?;

    if files.is_empty() {
        println!(
            "There are no exports in {} yet. Run /export during a chat to create one.",
            exports.export_dir.display()
        );
    } else {
        let lines = files
            .iter()
            .map(|file| {
                return format!("- {}", file.display());
            })
            .collect::<Vec<String>>();
        println!("{}", lines.join("\n"));
    }

    return Ok(());
}

fn subcommand_ask() -> Command {
    return Command::new("ask")
        .about("Sends a single message with the configured model and persona, then prints the reply.")
        .arg(
            clap::Arg::new("text")
                .help("Message to send.")
                .num_args(1..)
                .required(true),
        );
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Parley")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Parley with environment variable RUST_LOG=parley")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn arg_backend_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::BackendHealthCheckTimeout.to_string())
        .long(ConfigKey::BackendHealthCheckTimeout.to_string())
        .env("PARLEY_BACKEND_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before timing out when doing a healthcheck against Ollama. [default: {}]",
            Config::default(ConfigKey::BackendHealthCheckTimeout)
        ))
        .global(true);
}

fn arg_request_timeout() -> Arg {
    return Arg::new(ConfigKey::RequestTimeout.to_string())
        .long(ConfigKey::RequestTimeout.to_string())
        .env("PARLEY_REQUEST_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds for Ollama to finish generating a reply. [default: {}]",
            Config::default(ConfigKey::RequestTimeout)
        ))
        .global(true);
}

fn arg_model() -> Arg {
    return Arg::new(ConfigKey::Model.to_string())
        .short('m')
        .long(ConfigKey::Model.to_string())
        .env("PARLEY_MODEL")
        .num_args(1)
        .help(format!(
            "The initial model to chat with. [default: {}]",
            Config::default(ConfigKey::Model)
        ))
        .value_parser(PossibleValuesParser::new(ModelDescriptor::ids()))
        .global(true);
}

fn arg_persona() -> Arg {
    return Arg::new(ConfigKey::Persona.to_string())
        .short('p')
        .long(ConfigKey::Persona.to_string())
        .env("PARLEY_PERSONA")
        .num_args(1)
        .help(format!(
            "The initial persona, used as the system prompt. [default: {}]",
            Config::default(ConfigKey::Persona)
        ))
        .value_parser(PossibleValuesParser::new(Persona::names()))
        .global(true);
}

fn arg_temperature() -> Arg {
    return Arg::new(ConfigKey::Temperature.to_string())
        .long(ConfigKey::Temperature.to_string())
        .env("PARLEY_TEMPERATURE")
        .num_args(1)
        .help(format!(
            "Sampling temperature between 0.0 and 1.0, out of range values are clamped. [default: {}]",
            Config::default(ConfigKey::Temperature)
        ))
        .global(true);
}

fn arg_max_tokens() -> Arg {
    return Arg::new(ConfigKey::MaxTokens.to_string())
        .long(ConfigKey::MaxTokens.to_string())
        .env("PARLEY_MAX_TOKENS")
        .num_args(1)
        .help(format!(
            "Maximum tokens to generate per reply between 50 and 500, out of range values are clamped. [default: {}]",
            Config::default(ConfigKey::MaxTokens)
        ))
        .global(true);
}

fn arg_ollama_url() -> Arg {
    return Arg::new(ConfigKey::OllamaURL.to_string())
        .long(ConfigKey::OllamaURL.to_string())
        .env("PARLEY_OLLAMA_URL")
        .num_args(1)
        .help(format!(
            "Ollama API URL. [default: {}]",
            Config::default(ConfigKey::OllamaURL)
        ))
        .global(true);
}

fn arg_export_dir() -> Arg {
    return Arg::new(ConfigKey::ExportDir.to_string())
        .long(ConfigKey::ExportDir.to_string())
        .env("PARLEY_EXPORT_DIR")
        .num_args(1)
        .help(format!(
            "Directory chat exports are written to. [default: {}]",
            Config::default(ConfigKey::ExportDir)
        ))
        .global(true);
}

fn arg_config_file() -> Arg {
    return Arg::new(ConfigKey::ConfigFile.to_string())
        .short('c')
        .long(ConfigKey::ConfigFile.to_string())
        .env("PARLEY_CONFIG_FILE")
        .num_args(1)
        .help(format!(
            "Path to configuration file [default: {}]",
            Config::default(ConfigKey::ConfigFile)
        ))
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:")
                || line.starts_with("QUICK PROMPTS:")
                || line.starts_with("HOTKEYS:")
            {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("parley")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_ask())
        .subcommand(Command::new("chat").about("Start a new chat session."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(
            Command::new("exports")
                .about("Manage chat exports.")
                .arg_required_else_help(true)
                .subcommand(Command::new("dir").about("Print the export directory path."))
                .subcommand(Command::new("list").about("List all chat exports in the export directory.")),
        )
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .subcommand(
            Command::new("models")
                .about("Lists the configured models and whether Ollama has them installed."),
        )
        .subcommand(Command::new("personas").about("Lists the personas and their system prompts."))
        .arg(arg_config_file())
        .arg(arg_model())
        .arg(arg_persona())
        .arg(arg_temperature())
        .arg(arg_max_tokens())
        .arg(arg_ollama_url())
        .arg(arg_backend_health_check_timeout())
        .arg(arg_request_timeout())
        .arg(arg_export_dir());
}

/// Returns true when the chat UI should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = dirs::cache_dir()
                        .unwrap_or_else(|| return path::PathBuf::from("."))
                        .join("parley/debug.log");
                    println!("{}", log_path.display());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("ask", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            let text = subcmd_matches
                .get_many::<String>("text")
                .map(|values| {
                    return values.cloned().collect::<Vec<String>>().join(" ");
                })
                .unwrap_or_default();
            ask(&text).await?;
            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("exports", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            match subcmd_matches.subcommand() {
                Some(("dir", _)) => {
                    println!("{}", Exports::default().export_dir.display());
                }
                Some(("list", _)) => {
                    print_exports_list().await?;
                }
                _ => (),
            }
            return Ok(false);
        }
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        Some(("models", subcmd_matches)) => {
            print_models(&matches, subcmd_matches).await?;
            return Ok(false);
        }
        Some(("personas", _)) => {
            println!("{}", persona_options());
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
