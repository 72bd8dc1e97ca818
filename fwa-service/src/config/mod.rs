use crate::services::providers::openai::{OpenAiConfig, OPENAI_API_BASE};
use crate::services::providers::GenerationParams;
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_MAX_TOKENS: u32 = 500;
const DEFAULT_TEMPERATURE: f32 = 0.3;
const DEFAULT_ASSETS_DIR: &str = "fwa-service/static";

#[derive(Clone)]
pub struct FwaConfig {
    pub common: core_config::Config,
    pub openai: OpenAiSettings,
    pub assets: AssetConfig,
}

#[derive(Clone)]
pub struct OpenAiSettings {
    /// Credential for the completion API. Optional at startup: a missing key
    /// only fails analysis requests.
    pub api_key: Option<Secret<String>>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Directory holding `index.html` and the browser files served under `/src`.
    pub dir: PathBuf,
}

impl AssetConfig {
    pub fn index_file(&self) -> PathBuf {
        self.dir.join("index.html")
    }
}

impl OpenAiSettings {
    /// Provider configuration, or `None` when no credential is set.
    pub fn provider_config(&self) -> Option<OpenAiConfig> {
        self.api_key.as_ref().map(|key| OpenAiConfig {
            api_key: key.clone(),
            base_url: self.base_url.clone(),
        })
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

impl FwaConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build the service configuration from a variable lookup.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = lookup("ENVIRONMENT").unwrap_or_else(|| "dev".to_string()) == "prod";
        let get = |key: &str, default: Option<&str>| get_env(&lookup, key, default, is_prod);

        Ok(FwaConfig {
            common,
            openai: OpenAiSettings {
                api_key: lookup("OPENAI_API_KEY")
                    .filter(|key| !key.trim().is_empty())
                    .map(Secret::new),
                base_url: get("OPENAI_BASE_URL", Some(OPENAI_API_BASE))?,
                model: get("OPENAI_MODEL", Some(DEFAULT_MODEL))?,
                max_tokens: parse_env(
                    "OPENAI_MAX_TOKENS",
                    &get("OPENAI_MAX_TOKENS", Some(&DEFAULT_MAX_TOKENS.to_string()))?,
                )?,
                temperature: parse_env(
                    "OPENAI_TEMPERATURE",
                    &get("OPENAI_TEMPERATURE", Some(&DEFAULT_TEMPERATURE.to_string()))?,
                )?,
            },
            assets: AssetConfig {
                dir: PathBuf::from(get("FWA_ASSETS_DIR", Some(DEFAULT_ASSETS_DIR))?),
            },
        })
    }
}

fn get_env<F>(
    lookup: &F,
    key: &str,
    default: Option<&str>,
    is_prod: bool,
) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => Ok(val),
        None => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn parse_env<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<FwaConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FwaConfig::from_lookup(core_config::Config::default(), |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_outside_production() {
        let config = load(&[]).unwrap();

        assert!(config.openai.api_key.is_none());
        assert!(config.openai.provider_config().is_none());
        assert_eq!(config.openai.base_url, OPENAI_API_BASE);
        assert_eq!(config.openai.generation_params(), GenerationParams::default());
        assert_eq!(
            config.assets.index_file(),
            PathBuf::from("fwa-service/static/index.html")
        );
    }

    #[test]
    fn credential_is_picked_up() {
        let config = load(&[("OPENAI_API_KEY", "sk-live")]).unwrap();
        let provider = config.openai.provider_config().expect("key is set");
        assert_eq!(provider.api_key.expose_secret(), "sk-live");
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        let config = load(&[("OPENAI_API_KEY", "   ")]).unwrap();
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn production_requires_explicit_settings_but_not_the_key() {
        let err = load(&[("ENVIRONMENT", "prod")])
            .err()
            .expect("prod without settings should fail");
        assert!(err.to_string().contains("OPENAI_BASE_URL"));

        let config = load(&[
            ("ENVIRONMENT", "prod"),
            ("OPENAI_BASE_URL", "https://llm.internal/v1"),
            ("OPENAI_MODEL", "gpt-4o-mini"),
            ("OPENAI_MAX_TOKENS", "800"),
            ("OPENAI_TEMPERATURE", "0.1"),
            ("FWA_ASSETS_DIR", "/srv/fwa"),
        ])
        .unwrap();
        assert!(config.openai.api_key.is_none());
        assert_eq!(config.openai.model, "gpt-4o-mini");
        assert_eq!(config.openai.max_tokens, 800);
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = load(&[("OPENAI_MAX_TOKENS", "lots")])
            .err()
            .expect("non-numeric max tokens should fail");
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("OPENAI_MAX_TOKENS"));
    }
}
