//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{config_file_in, Context};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init {
            force,
            catalog_path,
        } => init_config(force, catalog_path.as_deref(), ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let search = &ctx.config.search;
    ctx.output.info("");
    ctx.output.info("[search]");
    ctx.output.kv("min_query_len", &search.min_query_len.to_string());
    ctx.output.kv("max_suggestions", &search.max_suggestions.to_string());
    ctx.output
        .kv("similarity_threshold", &search.similarity_threshold.to_string());
    ctx.output.kv("debounce_ms", &search.debounce_ms.to_string());

    ctx.output.info("");
    ctx.output.info("[catalog]");
    match ctx.catalog_path() {
        Some(path) => ctx.output.kv("path", &path.display().to_string()),
        None => ctx.output.kv("path", "(built-in)"),
    }

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    ctx.output.kv("format", &ctx.config.logging.format);

    Ok(())
}

async fn init_config(force: bool, catalog: Option<&str>, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("jewel.toml");

    if let Some(existing) = config_file_in(&ctx.cwd) {
        if !force {
            if ctx.output.is_json() {
                bail!(
                    "Config file already exists: {}. Use --force to overwrite.",
                    existing.display()
                );
            }

            let confirmed = Confirm::new()
                .with_prompt(format!("{} exists. Overwrite jewel.toml?", existing.display()))
                .default(false)
                .interact()?;

            if !confirmed {
                ctx.output.info("Init cancelled.");
                return Ok(());
            }
        }
    }

    let content = generate_default_config(catalog);
    fs::write(&config_path, content)?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (mut errors, warnings) = ctx.config.check();

    if let Some(path) = ctx.catalog_path() {
        if !path.exists() {
            errors.push(format!("catalog file not found: {}", path.display()));
        }
    }

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
