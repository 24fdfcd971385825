use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Api {
    pub base_url: String,
    pub wallet_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub token_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api: Api,
    pub auth: Auth,
}

impl Settings {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_nested_sections() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("carteira.toml");
        fs::write(
            &path,
            "[api]\nbase_url = \"http://localhost:9000\"\nwallet_id = 7\n\n[auth]\ntoken_path = \"/tmp/token\"\n",
        )
        .expect("write config");

        let settings = Settings::load(path.to_str().expect("utf-8 path")).expect("load settings");
        assert_eq!(settings.api.base_url, "http://localhost:9000");
        assert_eq!(settings.api.wallet_id, 7);
        assert_eq!(settings.auth.token_path.as_deref(), Some("/tmp/token"));
    }

    #[test]
    fn token_path_is_optional() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("carteira.toml");
        fs::write(
            &path,
            "[api]\nbase_url = \"http://localhost:9000\"\nwallet_id = 1\n\n[auth]\n",
        )
        .expect("write config");

        let settings = Settings::load(path.to_str().expect("utf-8 path")).expect("load settings");
        assert!(settings.auth.token_path.is_none());
    }
}
