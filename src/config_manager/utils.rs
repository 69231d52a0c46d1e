use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use tracing::warn;

/// Read a configuration file, tolerating a byte order mark, and substitute
/// `${VAR_NAME}` placeholders from the environment.
///
/// Placeholders whose variable is unset become empty values.
pub fn read_config_text(path: &Path) -> Result<String> {
    if !path.exists() {
        anyhow::bail!("Configuration file not found: {}", path.display());
    }

    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    let content = decode_text(&bytes);

    Ok(substitute_env_vars(&content, |name| std::env::var(name).ok()))
}

/// Decode file bytes: honour a UTF-8/UTF-16 BOM, otherwise assume UTF-8
pub fn decode_text(bytes: &[u8]) -> String {
    let (encoding, bom_len) =
        encoding_rs::Encoding::for_bom(bytes).unwrap_or((encoding_rs::UTF_8, 0));
    let (cow, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
    if had_errors {
        warn!("Configuration file contains invalid {} sequences", encoding.name());
    }
    cow.into_owned()
}

/// Replace `${VAR_NAME}` with the value returned by `lookup`, or with nothing
/// when the variable is unset
pub fn substitute_env_vars<F>(content: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let pattern = Regex::new(r"\$\{(\w+)\}").expect("placeholder pattern is valid");
    pattern
        .replace_all(content, |caps: &Captures| {
            let name = &caps[1];
            lookup(name).unwrap_or_else(|| {
                warn!("Environment variable {} is not set; using an empty value", name);
                String::new()
            })
        })
        .into_owned()
}
