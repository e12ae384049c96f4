use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default Gemini REST endpoint.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default text model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Upstream calls fail fast rather than holding the request open.
pub const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub scholarships: ScholarshipSettings,
    pub security: SecuritySettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// May be empty; the upstream rejects the first call in that case.
    pub api_key: Secret<String>,
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct ScholarshipSettings {
    /// JSON dataset on disk. The bundled dataset is used when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct SecuritySettings {
    pub allowed_origins: Vec<String>,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: Secret::new(String::new()),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_GEMINI_TIMEOUT_SECS),
        }
    }
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            gemini: GeminiSettings::default(),
            scholarships: ScholarshipSettings::default(),
            security: SecuritySettings::default(),
        }
    }
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("VITE_GEMINI_API_KEY"))
            .unwrap_or_default();

        let timeout_secs = get_env(
            "GEMINI_TIMEOUT_SECS",
            Some(&DEFAULT_GEMINI_TIMEOUT_SECS.to_string()),
        )?
        .parse()
        .unwrap_or(DEFAULT_GEMINI_TIMEOUT_SECS);

        Ok(RelayConfig {
            common,
            gemini: GeminiSettings {
                api_key: Secret::new(api_key),
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE))?,
                model: get_env("GEMINI_MODEL", Some(DEFAULT_GEMINI_MODEL))?,
                timeout: Duration::from_secs(timeout_secs),
            },
            scholarships: ScholarshipSettings {
                path: env::var("SCHOLARSHIPS_PATH")
                    .ok()
                    .filter(|p| !p.trim().is_empty())
                    .map(PathBuf::from),
            },
            security: SecuritySettings {
                allowed_origins: parse_origins(&get_env("CORS_ALLOWED_ORIGINS", Some("*"))?),
            },
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn origins_are_split_and_trimmed() {
        assert_eq!(
            parse_origins("http://a.test, http://b.test ,,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn defaults_point_at_gemini_flash() {
        let config = RelayConfig::default();
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.gemini.timeout, Duration::from_secs(15));
        assert!(config.gemini.api_key.expose_secret().is_empty());
        assert!(config.scholarships.path.is_none());
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let settings = GeminiSettings {
            api_key: Secret::new("super-secret".to_string()),
            ..GeminiSettings::default()
        };
        assert!(!format!("{:?}", settings).contains("super-secret"));
    }
}
