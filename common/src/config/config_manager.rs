use serde::Deserialize;
use std::sync::{Arc, Mutex};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

pub struct ConfigManager<TConfig, TConfigContentProvider = FileContentConfigProvider, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<TConfig>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider: FileContentConfigProvider::new(file_path.to_string()),
            config_serializer: YamlConfigSerializer::new(),
        }
    }
}

impl<TConfig, TConfigContentProvider, TConfigSerializer>
    ConfigManager<TConfig, TConfigContentProvider, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self.config.lock().unwrap();

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let config_data_result = self.config_content_provider.get_config_content()?;
        if let Some(config_data) = config_data_result {
            let config: TConfig = self.config_serializer.deserialize(&config_data)?;

            config
                .validate()
                .map_err(|e| format!("Config validation error: {}", e))?;

            *current = Some(config.clone());
            return Ok(config);
        }

        Ok(TConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Default, Deserialize)]
    struct TestConfig {
        #[serde(default)]
        port: u16,
    }

    impl Validate for TestConfig {
        fn validate(&self) -> Result<(), String> {
            if self.port == 1 {
                return Err("Port 1 is reserved".to_string());
            }
            Ok(())
        }
    }

    struct StaticContentProvider {
        content: Option<String>,
    }

    impl ConfigContentProvider for StaticContentProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            Ok(self.content.clone())
        }
    }

    fn manager_with(content: Option<&str>) -> ConfigManager<TestConfig, StaticContentProvider> {
        ConfigManager {
            config: Arc::new(Mutex::new(None)),
            config_content_provider: StaticContentProvider {
                content: content.map(String::from),
            },
            config_serializer: YamlConfigSerializer::new(),
        }
    }

    #[test]
    fn test_missing_content_falls_back_to_default() {
        let manager = manager_with(None);
        let config = manager.get_config().unwrap();
        assert_eq!(config.port, 0);
    }

    #[test]
    fn test_content_is_deserialized_and_cached() {
        let manager = manager_with(Some("port: 8080"));
        assert_eq!(manager.get_config().unwrap().port, 8080);
        assert_eq!(manager.get_config().unwrap().port, 8080);
    }

    #[test]
    fn test_validation_failure_is_reported() {
        let manager = manager_with(Some("port: 1"));
        assert!(manager.get_config().is_err());
    }

    #[test]
    fn test_malformed_content_is_an_error() {
        let manager = manager_with(Some("port: [not a number"));
        assert!(manager.get_config().is_err());
    }
}
