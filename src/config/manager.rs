use config::ConfigError;
use tracing::debug;

use crate::config::loader::{ConfigLoader, Environment};
use crate::config::types::{ApplicationConfig, ConfigOverrides};
use crate::config::validation::Validator;

/// ApplicationConfig 加載方法實現
impl ApplicationConfig {
    /// 從環境變數指定的環境加載配置
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let env = Environment::from_env();
        debug!("從環境加載配置: {:?}", env);
        Self::load(env)
    }

    /// 從指定環境加載配置
    pub fn load(env: Environment) -> Result<Self, ConfigError> {
        let config_source = ConfigLoader::load(env)?;

        // 使用 serde 反序列化配置
        let app_config: ApplicationConfig = config_source.try_deserialize()?;

        app_config
            .validate()
            .map_err(|err| ConfigError::Message(format!("配置驗證失敗: {}", err)))?;
        debug!("配置驗證通過");

        Ok(app_config)
    }

    /// 套用命令列覆寫並重新驗證
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(folder) = overrides.data_folder {
            self.data.folder = folder;
        }
        if let Some(policy) = overrides.missing_price_policy {
            self.valuation.missing_price_policy = policy;
        }
        if let Some(level) = overrides.log_level {
            self.log.level = level;
        } else if overrides.verbose {
            self.log.level = "debug".to_string();
        }
        self.log.level = self.log.level.to_lowercase();

        self.validate()
            .map_err(|err| ConfigError::Message(format!("配置驗證失敗: {}", err)))?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::MissingPricePolicy;
    use serial_test::serial;
    use std::env;
    use std::fs;

    fn clear_env() {
        for key in [
            "PORTFOLIO_ENV",
            "CONFIG_DIR",
            "PORTFOLIO__DATA__FOLDER",
            "PORTFOLIO__LOG__LEVEL",
            "PORTFOLIO__DATA__DATE_FORMATS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_development_configuration() {
        clear_env();

        let config = ApplicationConfig::load_from_env().expect("無法加載開發配置");

        assert_eq!(config.data.folder, "data");
        assert_eq!(config.data.delimiter, ";");
        assert_eq!(config.log.level, "info");
        assert_eq!(config.valuation.missing_price_policy, MissingPricePolicy::Zero);
    }

    #[test]
    #[serial]
    fn test_missing_config_dir_uses_defaults() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        env::set_var("CONFIG_DIR", dir.path());

        let config = ApplicationConfig::load(Environment::Production).unwrap();
        assert_eq!(config.data.quotes_file, "Quotes.csv");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_environment_variables_override_file() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("production.toml"),
            "[data]\nfolder = \"from-file\"\n\n[valuation]\nmissing_price_policy = \"fail\"\n",
        )
        .unwrap();
        env::set_var("CONFIG_DIR", dir.path());
        env::set_var("PORTFOLIO__DATA__FOLDER", "from-env");
        env::set_var("PORTFOLIO__DATA__DATE_FORMATS", "%d.%m.%Y,%Y%m%d");

        let config = ApplicationConfig::load(Environment::Production).unwrap();
        assert_eq!(config.data.folder, "from-env");
        assert_eq!(config.data.date_formats, vec!["%d.%m.%Y", "%Y%m%d"]);
        assert_eq!(config.valuation.missing_price_policy, MissingPricePolicy::Fail);

        clear_env();
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = ApplicationConfig::default()
            .with_overrides(ConfigOverrides {
                data_folder: Some("elsewhere".to_string()),
                missing_price_policy: Some(MissingPricePolicy::Fail),
                log_level: Some("WARN".to_string()),
                verbose: true,
            })
            .unwrap();

        assert_eq!(config.data.folder, "elsewhere");
        assert_eq!(config.valuation.missing_price_policy, MissingPricePolicy::Fail);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_verbose_raises_log_level() {
        let config = ApplicationConfig::default()
            .with_overrides(ConfigOverrides {
                verbose: true,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let result = ApplicationConfig::default().with_overrides(ConfigOverrides {
            log_level: Some("loud".to_string()),
            ..Default::default()
        });
        assert!(result.is_err());

        let result = ApplicationConfig::default().with_overrides(ConfigOverrides {
            data_folder: Some("  ".to_string()),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_invalid_configuration_is_rejected() {
        clear_env();
        env::set_var("PORTFOLIO__LOG__LEVEL", "loud");

        assert!(ApplicationConfig::load(Environment::Development).is_err());

        clear_env();
    }
}
