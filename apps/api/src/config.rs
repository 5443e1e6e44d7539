use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::artifact::generator::{DEFAULT_DOCUMENT_LANG, DEFAULT_DOCUMENT_TITLE};
use crate::interaction::labels::DEFAULT_LABEL_HIDE_THRESHOLD;

pub const DEFAULT_EXPORT_FILENAME: &str = "notion-avant-apres.html";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on a single image upload (raw bytes, before base64).
    pub max_upload_bytes: usize,
    /// Directory the server-side export sink writes to. Unset disables it.
    pub export_dir: Option<PathBuf>,
    pub export_filename: String,
    pub artifact_lang: String,
    pub artifact_title: String,
    pub label_hide_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            export_dir: None,
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            artifact_lang: DEFAULT_DOCUMENT_LANG.to_string(),
            artifact_title: DEFAULT_DOCUMENT_TITLE.to_string(),
            label_hide_threshold: DEFAULT_LABEL_HIDE_THRESHOLD,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            export_dir: lookup("EXPORT_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            export_filename: lookup("EXPORT_FILENAME").unwrap_or(defaults.export_filename),
            artifact_lang: lookup("ARTIFACT_LANG").unwrap_or(defaults.artifact_lang),
            artifact_title: lookup("ARTIFACT_TITLE").unwrap_or(defaults.artifact_title),
            label_hide_threshold: percentage(parse_or(
                &lookup,
                "LABEL_HIDE_THRESHOLD",
                defaults.label_hide_threshold,
            )?)
            .context("LABEL_HIDE_THRESHOLD is out of range")?,
        })
    }
}

/// The threshold is written into generated scripts as a numeric literal, so only finite
/// percentages are accepted.
fn percentage(value: f64) -> Result<f64> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        anyhow::bail!("expected a finite percentage in [0, 100], got {value}");
    }
    Ok(value)
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}
