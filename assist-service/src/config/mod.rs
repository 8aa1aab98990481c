use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct AssistConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub models: ModelConfig,
    pub google: GoogleConfig,
    pub provider: ProviderKind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model for text-only actions (e.g., gemini-2.0-flash)
    pub text_model: String,
    /// Model for actions that attach a document to the request
    pub document_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub api_key: String,
}

/// Which text provider backs the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    Mock,
}

impl AssistConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let provider = match get_env("ASSIST_PROVIDER", Some("gemini"), is_prod)?.as_str() {
            "mock" => ProviderKind::Mock,
            _ => ProviderKind::Gemini,
        };

        Ok(AssistConfig {
            common,
            models: ModelConfig {
                text_model: get_env("ASSIST_TEXT_MODEL", Some("gemini-2.0-flash"), is_prod)?,
                document_model: get_env(
                    "ASSIST_DOCUMENT_MODEL",
                    Some("gemini-2.0-flash"),
                    is_prod,
                )?,
            },
            google: GoogleConfig {
                api_key: get_env("GOOGLE_API_KEY", None, is_prod)?,
            },
            provider,
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
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
