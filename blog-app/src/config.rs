use blog_errors::AppError;

const DEFAULT_BASE_URL: &str = "http://localhost:4000";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub access_token_secret: String,
    pub refresh_token_secret: String,
    pub base_url: String,
    pub upload_dir: String,
    pub bind_addr: String,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::Internal(format!("{key} must be set")))
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            access_token_secret: required("ACCESS_TOKEN_SECRET")?,
            refresh_token_secret: required("REFRESH_TOKEN_SECRET")?,
            base_url: lookup("BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            upload_dir: lookup("UPLOAD_DIR").unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string()),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            run_migrations: lookup("RUN_MIGRATIONS").is_some(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("ACCESS_TOKEN_SECRET", "a"),
            ("REFRESH_TOKEN_SECRET", "r"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:4000");
        assert_eq!(config.upload_dir, "uploads");
        assert_eq!(config.bind_addr, "0.0.0.0:4000");
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_missing_secret_is_named() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("ACCESS_TOKEN_SECRET", "a"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("REFRESH_TOKEN_SECRET"));
    }
}
