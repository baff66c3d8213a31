//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager, LOCAL_CONFIG_NAME};
use crate::error::{RestashError, RestashResult};
use console::style;
use tokio::fs;

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config) -> RestashResult<()> {
    let manager = ConfigManager::new();

    match args.action {
        None | Some(ConfigAction::Show) => show_config(config),
        Some(ConfigAction::Path) => show_path(&manager),
        Some(ConfigAction::Init { force }) => init_config(&manager, force).await?,
        Some(ConfigAction::Set { key, value, local }) => {
            if local {
                set_local_value(&key, &value).await?
            } else {
                set_value(&manager, config, &key, &value).await?
            }
        }
    }

    Ok(())
}

fn show_config(config: &Config) {
    let toml =
        toml::to_string_pretty(config).unwrap_or_else(|_| "Error serializing config".to_string());
    println!("{}", toml);
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> RestashResult<()> {
    let path = manager.path();

    if path.exists() && !force {
        println!(
            "{} Config already exists at {} (use --force to overwrite)",
            style("!").yellow(),
            path.display()
        );
        return Ok(());
    }

    let config = Config::default();
    manager.save(&config).await?;

    println!(
        "{} Configuration initialized at {}",
        style("✓").green(),
        path.display()
    );

    Ok(())
}

async fn set_value(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> RestashResult<()> {
    let mut config = config.clone();

    // Parse dot-separated key path
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["cache", "prefix"] => config.cache.prefix = value.to_string(),
        ["cache", "scope"] => config.cache.scope = Some(value.to_string()),
        ["cache", "key_files"] => {
            config.cache.key_files = split_list(value).into_iter().map(Into::into).collect();
        }
        ["cache", "paths"] => config.cache.paths = split_list(value),
        ["cache", "upload_chunk_size"] => {
            config.cache.upload_chunk_size = Some(parse_u64(value)?)
        }

        ["backend", "program"] => config.backend.program = Some(value.to_string()),
        ["backend", "args"] => config.backend.args = split_list(value),

        ["deploy", "program"] => config.deploy.program = value.to_string(),
        ["deploy", "build"] => config.deploy.build = parse_bool(value)?,
        ["deploy", "auto_deploy"] => config.deploy.auto_deploy = parse_bool(value)?,

        ["notify", "webhook_url"] => config.notify.webhook_url = Some(value.to_string()),

        _ => {
            println!("{} Unknown config key: {}", style("✗").red(), key);
            println!("Valid keys:");
            print_valid_keys();
            return Ok(());
        }
    }

    manager.save(&config).await?;
    println!("{} Set {} = {}", style("✓").green(), key, value);

    Ok(())
}

async fn set_local_value(key: &str, value: &str) -> RestashResult<()> {
    let cwd =
        std::env::current_dir().map_err(|e| RestashError::io("getting current directory", e))?;
    let local_path = cwd.join(LOCAL_CONFIG_NAME);

    // Validate the key before touching the file
    validate_config_key(key)?;

    // Load existing local config or start with an empty TOML table
    let mut doc: toml::Value = if local_path.exists() {
        let content = fs::read_to_string(&local_path)
            .await
            .map_err(|e| RestashError::io(format!("reading {}", local_path.display()), e))?;
        content
            .parse()
            .map_err(|e: toml::de::Error| RestashError::ConfigInvalid {
                path: local_path.clone(),
                reason: e.to_string(),
            })?
    } else {
        toml::Value::Table(toml::map::Map::new())
    };

    // Set the key in the TOML tree
    set_toml_value(&mut doc, key, value)?;

    // Write back only the keys the user has explicitly set
    let content = toml::to_string_pretty(&doc)?;
    fs::write(&local_path, content)
        .await
        .map_err(|e| RestashError::io(format!("writing {}", local_path.display()), e))?;

    println!(
        "{} Set {} = {} in {}",
        style("✓").green(),
        key,
        value,
        local_path.display()
    );

    Ok(())
}

/// Validate that a config key is one we recognise.
fn validate_config_key(key: &str) -> RestashResult<()> {
    let parts: Vec<&str> = key.split('.').collect();
    match parts.as_slice() {
        ["cache", "prefix" | "scope" | "key_files" | "paths" | "upload_chunk_size"]
        | ["backend", "program" | "args"]
        | ["deploy", "program" | "build" | "auto_deploy"]
        | ["notify", "webhook_url"] => Ok(()),
        _ => Err(RestashError::User(format!("Unknown config key: {}", key))),
    }
}

/// Set a dot-separated key in a TOML value tree, creating intermediate tables as needed.
fn set_toml_value(doc: &mut toml::Value, key: &str, value: &str) -> RestashResult<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let mut current = doc;

    // Navigate/create intermediate tables
    for &part in &parts[..parts.len() - 1] {
        current = current
            .as_table_mut()
            .ok_or_else(|| RestashError::User(format!("Expected table at key: {}", part)))?
            .entry(part)
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    let leaf = parts.last().unwrap();
    let table = current
        .as_table_mut()
        .ok_or_else(|| RestashError::User(format!("Expected table for key: {}", key)))?;

    // Keys that store as arrays
    let is_list_key =
        key.ends_with("key_files") || key.ends_with("paths") || key.ends_with("args");

    let toml_value = if is_list_key {
        let items: Vec<toml::Value> = split_list(value)
            .into_iter()
            .map(toml::Value::String)
            .collect();
        toml::Value::Array(items)
    } else if value == "true" || value == "false" {
        toml::Value::Boolean(value.parse().unwrap())
    } else if let Ok(n) = value.parse::<i64>() {
        toml::Value::Integer(n)
    } else {
        toml::Value::String(value.to_string())
    };

    table.insert((*leaf).to_string(), toml_value);
    Ok(())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_bool(value: &str) -> RestashResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(RestashError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn parse_u64(value: &str) -> RestashResult<u64> {
    match value.parse() {
        Ok(0) | Err(_) => Err(RestashError::User(format!(
            "Invalid size: {}. Use a positive byte count",
            value
        ))),
        Ok(n) => Ok(n),
    }
}

fn print_valid_keys() {
    let keys = [
        "cache.prefix",
        "cache.scope",
        "cache.key_files",
        "cache.paths",
        "cache.upload_chunk_size",
        "backend.program",
        "backend.args",
        "deploy.program",
        "deploy.build",
        "deploy.auto_deploy",
        "notify.webhook_url",
    ];

    for key in keys {
        eprintln!("  {}", key);
    }
}
