#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::GenerationSettings;
use crate::domain::models::ModelDescriptor;
use crate::domain::models::Persona;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    BackendHealthCheckTimeout,
    ConfigFile,
    ExportDir,
    MaxTokens,
    Model,
    OllamaURL,
    Persona,
    RequestTimeout,
    Temperature,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let config_path = dirs::config_dir()
            .unwrap_or_else(|| return path::PathBuf::from("."))
            .join("parley/config.toml");
        let export_dir = dirs::download_dir().unwrap_or_else(|| return path::PathBuf::from("."));
        let defaults = GenerationSettings::default();

        let res = match key {
            ConfigKey::BackendHealthCheckTimeout => "1000".to_string(),
            ConfigKey::ExportDir => export_dir.to_string_lossy().to_string(),
            ConfigKey::MaxTokens => defaults.max_tokens.to_string(),
            ConfigKey::Model => ModelDescriptor::default().id.to_string(),
            ConfigKey::OllamaURL => "http://localhost:11434".to_string(),
            ConfigKey::Persona => Persona::default().name.to_string(),
            ConfigKey::RequestTimeout => "120000".to_string(),
            ConfigKey::Temperature => defaults.temperature.to_string(),

            // Special
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
        };

        return res;
    }

    /// Resolves config in order of defaults, config file, then environment
    /// variables and CLI flags. Sampling settings are clamped to their ranges.
    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            Config::load_toml(&cmd, &toml_str)?;
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        Config::clamp_generation_settings()?;

        tracing::debug!(
            model = Config::get(ConfigKey::Model),
            persona = Config::get(ConfigKey::Persona),
            temperature = Config::get(ConfigKey::Temperature),
            max_tokens = Config::get(ConfigKey::MaxTokens),
            ollama_url = Config::get(ConfigKey::OllamaURL),
            export_dir = Config::get(ConfigKey::ExportDir),
            "config"
        );

        return Ok(());
    }

    fn load_toml(cmd: &Command, toml_str: &str) -> Result<()> {
        let doc = toml_str.parse::<toml_edit::Document>()?;

        for key in ConfigKey::iter() {
            if let Some(val) = doc.get(&key.to_string()) {
                // Use clap value parsers to do validation.
                let mut possible_values = vec![];
                if let Some(arg) = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                {
                    possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name().to_string())
                        .collect::<Vec<String>>();
                }

                if let Some(val_int) = val.as_integer() {
                    Config::set(key, &val_int.to_string());
                } else if let Some(val_float) = val.as_float() {
                    Config::set(key, &val_float.to_string());
                } else if let Some(val_str) = val.as_str() {
                    if val_str.is_empty() {
                        continue;
                    }
                    if !possible_values.is_empty() && !possible_values.contains(&val_str.to_string())
                    {
                        bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                    }
                    Config::set(key, val_str);
                }
            }
        }

        return Ok(());
    }

    fn clamp_generation_settings() -> Result<()> {
        let temperature_str = Config::get(ConfigKey::Temperature);
        let max_tokens_str = Config::get(ConfigKey::MaxTokens);

        let temperature = match temperature_str.parse::<f32>() {
            Ok(val) => val,
            Err(_) => bail!(format!("Temperature must be a number, got '{temperature_str}'")),
        };
        let max_tokens = match max_tokens_str.parse::<i64>() {
            Ok(val) => val,
            Err(_) => bail!(format!("Max tokens must be a whole number, got '{max_tokens_str}'")),
        };

        let settings = GenerationSettings::clamped(temperature, max_tokens);
        Config::set(ConfigKey::Temperature, &settings.temperature.to_string());
        Config::set(ConfigKey::MaxTokens, &settings.max_tokens.to_string());

        return Ok(());
    }

    pub fn generation_settings() -> Result<GenerationSettings> {
        let temperature = Config::get(ConfigKey::Temperature).parse::<f32>()?;
        let max_tokens = Config::get(ConfigKey::MaxTokens).parse::<u32>()?;

        return Ok(GenerationSettings::new(temperature, max_tokens));
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|e| return e.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name().to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<f64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = {}", toml_edit::Value::from(val.as_str()));
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
