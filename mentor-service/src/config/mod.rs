use crate::error::AppError;
use crate::services::providers::gemini::GEMINI_API_BASE;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone)]
pub struct MentorConfig {
    pub common: CommonConfig,
    pub google: GoogleConfig,
    pub models: ModelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommonConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: String,
    pub api_base: String,
    /// Swap in the mock text provider (tests, offline development).
    pub use_mock: bool,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model used for mentor generations (e.g. gemini-2.5-pro).
    pub text_model: String,
}

impl CommonConfig {
    fn load() -> Result<Self, AppError> {
        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl MentorConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let common = CommonConfig::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(MentorConfig {
            common,
            google: GoogleConfig {
                api_key: get_env("GOOGLE_API_KEY", None, is_prod)?,
                api_base: get_env("GOOGLE_API_BASE", Some(GEMINI_API_BASE), is_prod)?,
                use_mock: get_env("GENAI_USE_MOCK", Some("false"), is_prod)?
                    .parse()
                    .unwrap_or(false),
            },
            models: ModelConfig {
                text_model: get_env("GENAI_TEXT_MODEL", Some("gemini-2.5-pro"), is_prod)?,
            },
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
