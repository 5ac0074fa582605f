use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::info;

use crate::error::{PerceptionError, PerceptionResult};
use crate::lens::{LensCalibration, LensRegistry, DEFAULT_LENS};
use crate::perception::{DimensionPolicy, PerceptionEngine};

/// Engine configuration, stored as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Lens used when a request names none
    pub default_lens: String,
    pub dimension_policy: DimensionPolicy,
    /// Extra calibrations (JSON or YAML list) registered on top of the built-ins
    pub calibration_file: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_lens: DEFAULT_LENS.to_string(),
            dimension_policy: DimensionPolicy::Clamp,
            calibration_file: None,
        }
    }
}

impl EngineConfig {
    /// Check what can be checked without touching the calibration file.
    ///
    /// Without a calibration file the default lens must be a built-in one;
    /// with one, resolution is deferred to [`EngineConfig::build_engine`].
    pub fn validate(&self) -> PerceptionResult<()> {
        if self.default_lens.trim().is_empty() {
            return Err(PerceptionError::Config("default lens is empty".to_string()));
        }
        if self.calibration_file.is_none()
            && !LensCalibration::builtin().iter().any(|lens| lens.id == self.default_lens)
        {
            return Err(PerceptionError::Config(format!(
                "default lens '{}' is not built in and no calibration file is set",
                self.default_lens
            )));
        }
        Ok(())
    }

    /// Relative calibration paths are taken relative to `base`.
    fn anchor(mut self, base: &Path) -> Self {
        if let Some(path) = self.calibration_file.take() {
            self.calibration_file = Some(if path.is_relative() { base.join(path) } else { path });
        }
        self
    }

    /// Build a registry and engine from this configuration.
    pub async fn build_engine(&self) -> PerceptionResult<PerceptionEngine> {
        let registry = LensRegistry::with_builtin_lenses();
        if let Some(path) = &self.calibration_file {
            registry.load_from_file(path).await?;
        }

        let registry = registry.with_default(&self.default_lens).map_err(|_| {
            PerceptionError::Config(format!("default lens '{}' is not registered", self.default_lens))
        })?;

        info!("Perception engine ready: {} lenses, default '{}'", registry.len(), registry.default_id());
        Ok(PerceptionEngine::new(Arc::new(registry)).with_policy(self.dimension_policy))
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load and validate the configuration, writing the defaults first if the
    /// file does not exist yet.
    pub async fn load(&self) -> PerceptionResult<EngineConfig> {
        if !self.path.exists() {
            let default = EngineConfig::default();
            self.save(&default).await?;
            info!("Wrote default engine config to {:?}", self.path);
            return Ok(default);
        }

        let content = fs::read_to_string(&self.path).await?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        let base = self.path.parent().unwrap_or_else(|| Path::new("."));
        let config = config.anchor(base);
        config.validate()?;
        Ok(config)
    }

    pub async fn save(&self, config: &EngineConfig) -> PerceptionResult<()> {
        config.validate()?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perception::RawDimensions;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_config_save_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let manager = ConfigManager::new(temp_file.path().to_path_buf());

        let config = EngineConfig {
            default_lens: "academic".to_string(),
            dimension_policy: DimensionPolicy::Strict,
            calibration_file: Some(PathBuf::from("lenses.yaml")),
        };

        manager.save(&config).await.unwrap();
        let loaded = manager.load().await.unwrap();

        assert_eq!(loaded.default_lens, "academic");
        assert_eq!(loaded.dimension_policy, DimensionPolicy::Strict);
        let dir = temp_file.path().parent().unwrap();
        assert_eq!(loaded.calibration_file, Some(dir.join("lenses.yaml")));
    }

    #[tokio::test]
    async fn test_config_load_rejects_unknown_builtin_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("engine.json");
        tokio::fs::write(&path, r#"{"default_lens": "missing"}"#).await.unwrap();

        let result = ConfigManager::new(path).load().await;
        assert!(matches!(result, Err(PerceptionError::Config(_))));
    }

    #[tokio::test]
    async fn test_config_load_defers_default_to_calibration_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("engine.json");
        let lens_path = temp_dir.path().join("field.json");
        let lenses = vec![LensCalibration::new("field", "Field survey", [0.4, 0.2, 0.2, 0.2], 0.3, 0.7)];
        tokio::fs::write(&lens_path, serde_json::to_string(&lenses).unwrap()).await.unwrap();
        tokio::fs::write(&path, r#"{"default_lens": "field", "calibration_file": "field.json"}"#)
            .await
            .unwrap();

        let config = ConfigManager::new(path).load().await.unwrap();
        assert_eq!(config.calibration_file, Some(lens_path));
        let engine = config.build_engine().await.unwrap();
        assert_eq!(engine.registry().default_id(), "field");
    }

    #[tokio::test]
    async fn test_config_save_rejects_empty_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("engine.json");
        let config = EngineConfig {
            default_lens: "  ".to_string(),
            ..Default::default()
        };
        assert!(ConfigManager::new(path.clone()).save(&config).await.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_config_load_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nonexistent_config.json");
        let manager = ConfigManager::new(path.clone());

        let loaded = manager.load().await.unwrap();
        assert_eq!(loaded, EngineConfig::default());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_build_engine_with_custom_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let lens_path = temp_dir.path().join("lenses.yaml");
        let lenses = vec![LensCalibration::new("field", "Field survey", [0.4, 0.2, 0.2, 0.2], 0.3, 0.7)];
        tokio::fs::write(&lens_path, serde_yaml::to_string(&lenses).unwrap()).await.unwrap();

        let config = EngineConfig {
            default_lens: "field".to_string(),
            dimension_policy: DimensionPolicy::Clamp,
            calibration_file: Some(lens_path),
        };
        let engine = config.build_engine().await.unwrap();
        assert_eq!(engine.registry().default_id(), "field");
        assert!(engine.registry().contains("balanced"));

        let report = engine.perceive(&RawDimensions::neutral(), None).unwrap();
        assert_eq!(report.lens_id, "field");
    }

    #[tokio::test]
    async fn test_build_engine_rejects_unknown_default() {
        let config = EngineConfig {
            default_lens: "missing".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.build_engine().await, Err(PerceptionError::Config(_))));
    }
}
