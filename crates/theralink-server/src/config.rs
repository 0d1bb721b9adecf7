use std::net::SocketAddr;
use std::time::Duration;

use theralink_bedrock::generator::GenerationSettings;

/// Where patient records are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Process memory; everything is lost on restart.
    Memory,
    /// One JSON object per patient in an S3 bucket.
    S3,
}

impl std::str::FromStr for StoreKind {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreKind::Memory),
            "s3" => Ok(StoreKind::S3),
            other => Err(eyre::eyre!(
                "unknown store kind {other:?} (expected \"memory\" or \"s3\")"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub store: StoreKind,
    pub bucket: String,
    pub region: String,
    pub generation: GenerationSettings,
}

impl ServerConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from a variable lookup. Unset variables take their
    /// defaults; set but malformed ones are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let defaults = GenerationSettings::default();

        let bind = parse_or(&lookup, "THERALINK_BIND", SocketAddr::from(([127, 0, 0, 1], 8080)))?;
        let store = parse_or(&lookup, "THERALINK_STORE", StoreKind::Memory)?;
        let bucket = lookup("THERALINK_BUCKET").unwrap_or_else(|| "theralink".to_string());
        let region = lookup("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string());

        let generation = GenerationSettings {
            model_id: lookup("THERALINK_MODEL_ID").unwrap_or(defaults.model_id),
            temperature: parse_or(&lookup, "THERALINK_TEMPERATURE", defaults.temperature)?,
            max_tokens: parse_or(&lookup, "THERALINK_MAX_TOKENS", defaults.max_tokens)?,
            timeout: Duration::from_secs(parse_or(
                &lookup,
                "THERALINK_SUMMARY_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )?),
        };
        generation
            .validate()
            .map_err(|e| eyre::eyre!("invalid summary settings: {e}"))?;

        if store == StoreKind::S3 && bucket.trim().is_empty() {
            return Err(eyre::eyre!("THERALINK_BUCKET must be set when THERALINK_STORE=s3"));
        }

        Ok(Self {
            bind,
            store,
            bucket,
            region,
            generation,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> eyre::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| eyre::eyre!("invalid {key}={raw:?}: {e}")),
        None => Ok(default),
    }
}
