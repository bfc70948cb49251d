use epistula::Configuration;
use miette::{IntoDiagnostic, WrapErr};
use std::path::Path;
use tokio::fs;

pub async fn load(path: Option<&Path>) -> miette::Result<Configuration> {
    let Some(path) = path else {
        return Ok(Configuration::default());
    };

    let content = fs::read_to_string(path)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read configuration from {}", path.display()))?;

    toml::from_str(&content)
        .into_diagnostic()
        .wrap_err("Malformed configuration")
}
