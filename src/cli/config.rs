//! Config command handlers: `config show`, `config init` and `config schema`.

use crate::config::{
    generate_example_config, generate_json_schema, load_or_default, Validatable,
};
use crate::pipeline::{exit_codes, write_output, OutputTarget};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// File name written by `config init`
pub const CONFIG_INIT_FILE: &str = ".ipport.yaml";

/// Print the effective configuration as YAML, followed by any validation
/// problems. Exits with `ERROR` when the configuration would be rejected.
pub fn run_config_show(explicit: Option<&Path>) -> Result<i32> {
    let (config, loaded_from) = load_or_default(explicit);
    match &loaded_from {
        Some(path) => eprintln!("# Loaded from: {}", path.display()),
        None => eprintln!("# No config file found; showing defaults"),
    }
    let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
    print!("{yaml}");

    let errors = config.validate();
    if errors.is_empty() {
        return Ok(exit_codes::SUCCESS);
    }
    eprintln!("# {} validation problem(s):", errors.len());
    for error in &errors {
        eprintln!("#   {error}");
    }
    Ok(exit_codes::ERROR)
}

/// Write an example config file into `dir`, refusing to overwrite.
pub fn run_config_init(dir: &Path) -> Result<PathBuf> {
    let target = dir.join(CONFIG_INIT_FILE);
    if target.exists() {
        bail!(
            "{} already exists. Remove it first to re-initialize.",
            target.display()
        );
    }
    std::fs::write(&target, generate_example_config())
        .with_context(|| format!("failed to write {}", target.display()))?;
    Ok(target)
}

/// Emit the JSON Schema for the config file format.
pub fn run_config_schema(output: Option<PathBuf>) -> Result<i32> {
    write_output(&generate_json_schema(), &OutputTarget::from_option(output), true)?;
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_file;

    #[test]
    fn test_config_init_writes_loadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = run_config_init(dir.path()).unwrap();
        assert!(path.ends_with(CONFIG_INIT_FILE));

        let config = load_config_file(&path).unwrap();
        assert!(config.is_valid());
        assert_eq!(config.profiles.len(), 6);

        let again = run_config_init(dir.path());
        assert!(again.unwrap_err().to_string().contains("already exists"));
    }

    #[test]
    fn test_config_schema_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("schema.json");
        assert_eq!(run_config_schema(Some(out.clone())).unwrap(), exit_codes::SUCCESS);
        let schema: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert!(schema["properties"]["profiles"].is_object());
    }
}
