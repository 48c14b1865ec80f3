//! Thin command handlers for the non-interactive subcommands. Each one calls
//! a store operation and prints; the engineering lives in `store` and `exec`.

use crate::config::{Config, Context};
use crate::store::{ActivationStatus, ContextStore};
use anyhow::{bail, Context as _, Result};
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Print all contexts as an aligned table, marking the active one.
pub fn list(store: &ContextStore) {
    let contexts = store.list();
    if contexts.is_empty() {
        println!("No contexts configured");
        return;
    }

    let name_width = contexts
        .iter()
        .map(|ctx| ctx.name.len())
        .chain(std::iter::once("NAME".len()))
        .max()
        .unwrap_or(4)
        + 1;
    let label_width = contexts
        .iter()
        .map(|ctx| ctx.label.len())
        .chain(std::iter::once("LABEL".len()))
        .max()
        .unwrap_or(5);

    println!(
        " {:<name_width$}  {:<label_width$}  {:<10}  DESCRIPTION",
        "NAME", "LABEL", "LAST RUN"
    );
    for context in &contexts {
        let marker = if context.name == store.current_name() {
            "*"
        } else {
            " "
        };
        let last_run = match &context.last_result {
            Some(result) if result.success => "✓ Success",
            Some(_) => "✗ Failed",
            None => "Never",
        };
        println!(
            "{marker}{:<name_width$}  {:<label_width$}  {last_run:<10}  {}",
            context.name, context.label, context.description
        );
    }
}

/// Print the active context and its last execution summary.
pub fn current(store: &ContextStore) {
    let Some(context) = store.current() else {
        println!("No context is currently active");
        return;
    };

    println!("Current context: {}", context.name);
    println!("Label: {}", context.label);
    if !context.description.is_empty() {
        println!("Description: {}", context.description);
    }
    match &context.last_result {
        Some(result) => {
            println!(
                "Last execution: {}",
                result.timestamp.format("%Y-%m-%d %H:%M:%S")
            );
            let status = if result.success { "✓ Success" } else { "✗ Failed" };
            println!("Status: {status} (Exit Code: {})", result.exit_code);
        }
        None => println!("Status: Never executed"),
    }
}

/// Switch the active context, reporting a failed activation command without
/// letting it block the switch.
pub fn switch(store: &mut ContextStore, name: &str) -> Result<()> {
    match store.switch(name)? {
        ActivationStatus::NoCommand | ActivationStatus::Exited(0) => {}
        ActivationStatus::Exited(code) => {
            eprintln!("Warning: activation command exited with code {code}");
        }
        ActivationStatus::LaunchFailed(message) => {
            eprintln!("Warning: activation command failed to start: {message}");
        }
    }
    println!("Switched to context: {name}");
    Ok(())
}

/// Run a job, record its result, and print the report.
pub fn run(store: &mut ContextStore, name: &str) -> Result<()> {
    let label = store
        .get(name)
        .map(|ctx| ctx.label.clone())
        .unwrap_or_else(|| name.to_string());
    println!("Executing job: {label}");

    let result = store.execute_job(name)?;

    println!("\nJob execution completed:");
    println!("Exit Code: {}", result.exit_code);
    let status = if result.success { "✓ Success" } else { "✗ Failed" };
    println!("Status: {status}");
    println!("\n{}", result.output);
    Ok(())
}

/// Add (or overwrite) a context assembled from CLI flags.
pub fn add(
    store: &mut ContextStore,
    name: String,
    label: String,
    description: Option<String>,
    command: Option<String>,
    vars: Vec<String>,
) -> Result<()> {
    let mut context = Context::new(name.clone(), label);
    if let Some(description) = description {
        context.description = description;
    }
    if let Some(command) = command {
        context.commands.insert("run".to_string(), command);
    }
    context.variables = parse_vars(&vars)?;

    store.add(context)?;
    println!("Added context: {name}");
    Ok(())
}

pub fn remove(store: &mut ContextStore, name: &str) -> Result<()> {
    store.remove(name)?;
    println!("Removed context: {name}");
    Ok(())
}

/// Write a sample configuration, prompting before overwriting an existing
/// file unless `force` is set.
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        print!(
            "Configuration file already exists at: {}\nDo you want to overwrite it? (y/N): ",
            path.display()
        );
        io::stdout().flush().context("Failed to flush prompt")?;

        let mut response = String::new();
        io::stdin()
            .lock()
            .read_line(&mut response)
            .context("Failed to read response")?;
        if !matches!(response.trim(), "y" | "Y") {
            println!("Initialization cancelled.");
            return Ok(());
        }
    }

    let config = sample_config();
    config.save_to(path)?;

    println!("Configuration initialized at: {}", path.display());
    println!("Example contexts created:");
    for context in config.contexts.values() {
        println!("  - {}: {}", context.name, context.label);
    }
    println!("\nRun 'deckhand list' to see all contexts.");
    println!("Run 'deckhand tui' to use the interactive interface.");
    Ok(())
}

/// Parse repeated `KEY=VALUE` flags into a variable map.
fn parse_vars(vars: &[String]) -> Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    for var in vars {
        let Some((key, value)) = var.split_once('=') else {
            bail!("Invalid variable '{var}': expected KEY=VALUE");
        };
        if key.is_empty() {
            bail!("Invalid variable '{var}': empty key");
        }
        map.insert(key.to_string(), value.to_string());
    }
    Ok(map)
}

/// The example deck written by `deckhand init`.
pub fn sample_config() -> Config {
    let mut config = Config::default();

    let mut docker = Context::new("docker", "Docker Services");
    docker.description = "Start/stop Docker containers".to_string();
    docker.commands.insert(
        "run".to_string(),
        "docker-compose up -d && echo 'Docker services started'".to_string(),
    );
    docker
        .variables
        .insert("COMPOSE_FILE".to_string(), "docker-compose.yml".to_string());
    docker
        .variables
        .insert("PROJECT_NAME".to_string(), "myapp".to_string());

    let mut vpn = Context::new("vpn", "VPN Connection");
    vpn.description = "Connect to company VPN".to_string();
    vpn.commands.insert(
        "run".to_string(),
        "echo 'Connecting to VPN: ${VPN_SERVER}' && ping -c 1 ${VPN_SERVER}".to_string(),
    );
    vpn.variables
        .insert("VPN_SERVER".to_string(), "vpn.company.com".to_string());
    vpn.variables.insert(
        "VPN_CONFIG".to_string(),
        "~/.config/vpn/company.conf".to_string(),
    );

    let mut database = Context::new("database", "Database Tunnel");
    database.description = "SSH tunnel to database server".to_string();
    database.commands.insert(
        "run".to_string(),
        "echo 'Setting up SSH tunnel to ${DB_HOST}:${DB_PORT}' && nc -z ${DB_HOST} ${DB_PORT}"
            .to_string(),
    );
    database
        .variables
        .insert("DB_HOST".to_string(), "database.company.com".to_string());
    database
        .variables
        .insert("DB_PORT".to_string(), "5432".to_string());
    database
        .variables
        .insert("LOCAL_PORT".to_string(), "5433".to_string());

    let mut monitoring = Context::new("monitoring", "System Monitoring");
    monitoring.description = "Enable system monitoring tools".to_string();
    monitoring.commands.insert(
        "run".to_string(),
        "echo 'Monitoring enabled: CPU, Memory, Disk' && uptime".to_string(),
    );
    monitoring
        .variables
        .insert("MONITOR_INTERVAL".to_string(), "5".to_string());
    monitoring
        .variables
        .insert("LOG_PATH".to_string(), "/var/log/monitoring".to_string());

    let mut proxy = Context::new("proxy", "HTTP Proxy");
    proxy.description = "Route traffic through proxy server".to_string();
    proxy.commands.insert(
        "run".to_string(),
        "echo 'Proxy configured: ${PROXY_URL}'".to_string(),
    );
    proxy.variables.insert(
        "PROXY_URL".to_string(),
        "http://proxy.company.com:8080".to_string(),
    );
    proxy
        .variables
        .insert("NO_PROXY".to_string(), "localhost,127.0.0.1,.local".to_string());

    for context in [docker, vpn, database, monitoring, proxy] {
        config.contexts.insert(context.name.clone(), context);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vars() {
        let vars = vec!["HOST=db.local".to_string(), "PORT=5432".to_string()];
        let map = parse_vars(&vars).expect("parse");
        assert_eq!(map.get("HOST").map(String::as_str), Some("db.local"));
        assert_eq!(map.get("PORT").map(String::as_str), Some("5432"));
    }

    #[test]
    fn test_parse_vars_value_may_contain_equals() {
        let vars = vec!["FLAGS=--opt=1".to_string()];
        let map = parse_vars(&vars).expect("parse");
        assert_eq!(map.get("FLAGS").map(String::as_str), Some("--opt=1"));
    }

    #[test]
    fn test_parse_vars_rejects_malformed() {
        assert!(parse_vars(&["NOEQUALS".to_string()]).is_err());
        assert!(parse_vars(&["=value".to_string()]).is_err());
    }

    #[test]
    fn test_sample_config_shape() {
        let config = sample_config();
        assert_eq!(config.contexts.len(), 5);
        assert!(config.current_context.is_empty());
        // Every sample context is runnable.
        for context in config.contexts.values() {
            assert!(context.commands.contains_key("run"));
        }
    }
}
