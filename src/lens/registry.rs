//! Lens Registry
//!
//! Named store of calibrations. Reads are concurrent, registration is
//! serialized, and the same id registered twice keeps the last write.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info};

use super::{LensCalibration, DEFAULT_LENS};
use crate::error::{PerceptionError, PerceptionResult};

pub struct LensRegistry {
    lenses: RwLock<HashMap<String, Arc<LensCalibration>>>,
    default_id: String,
}

impl LensRegistry {
    /// Create a registry holding only `default`, which also becomes the default lens.
    pub fn new(default: LensCalibration) -> Self {
        let default_id = default.id.clone();
        let mut lenses = HashMap::new();
        lenses.insert(default_id.clone(), Arc::new(default));
        Self {
            lenses: RwLock::new(lenses),
            default_id,
        }
    }

    /// Registry seeded with the built-in lens set, defaulting to `balanced`.
    pub fn with_builtin_lenses() -> Self {
        let lenses = LensCalibration::builtin()
            .into_iter()
            .map(|lens| (lens.id.clone(), Arc::new(lens)))
            .collect();
        Self {
            lenses: RwLock::new(lenses),
            default_id: DEFAULT_LENS.to_string(),
        }
    }

    /// Make an already registered lens the default.
    pub fn with_default(mut self, id: &str) -> PerceptionResult<Self> {
        if !self.contains(id) {
            return Err(PerceptionError::UnknownLens(id.to_string()));
        }
        self.default_id = id.to_string();
        Ok(self)
    }

    /// Store or overwrite a calibration under its id.
    ///
    /// Rejects calibrations with invalid weights; the registry is left untouched.
    pub fn register(&self, calibration: LensCalibration) -> PerceptionResult<()> {
        calibration.validate()?;
        let id = calibration.id.clone();
        let mut lenses = self.lenses.write().unwrap_or_else(PoisonError::into_inner);
        if lenses.insert(id.clone(), Arc::new(calibration)).is_some() {
            debug!("Lens '{}' overwritten", id);
        } else {
            debug!("Lens '{}' registered", id);
        }
        Ok(())
    }

    /// Resolve a lens by id, or the default lens when no id is given.
    ///
    /// An explicit id that is not registered is an error; it never falls
    /// back to the default.
    pub fn resolve(&self, id: Option<&str>) -> PerceptionResult<Arc<LensCalibration>> {
        let id = id.unwrap_or(&self.default_id);
        let lenses = self.lenses.read().unwrap_or_else(PoisonError::into_inner);
        lenses
            .get(id)
            .cloned()
            .ok_or_else(|| PerceptionError::UnknownLens(id.to_string()))
    }

    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lenses.read().unwrap_or_else(PoisonError::into_inner).contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let lenses = self.lenses.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<String> = lenses.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.lenses.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load calibrations from a JSON or YAML file holding a list of lenses.
    ///
    /// A missing file registers nothing. The file is registered whole or not
    /// at all: a parse failure or one invalid lens leaves the registry as it
    /// was. Returns the number of lenses registered.
    pub async fn load_from_file(&self, path: impl AsRef<Path>) -> PerceptionResult<usize> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(0);
        }

        let content = tokio::fs::read_to_string(path).await?;
        let calibrations: Vec<LensCalibration> = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };

        for calibration in &calibrations {
            calibration.validate()?;
        }

        let count = calibrations.len();
        for calibration in calibrations {
            self.register(calibration)?;
        }
        info!("Loaded {} lens calibrations from {:?}", count, path);
        Ok(count)
    }
}

impl Default for LensRegistry {
    fn default() -> Self {
        Self::with_builtin_lenses()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn custom(id: &str, km: f64) -> LensCalibration {
        LensCalibration::new(id, "custom", [0.25; 4], km, 0.8)
    }

    #[test]
    fn test_resolve_default_when_absent() {
        let registry = LensRegistry::default();
        let lens = registry.resolve(None).unwrap();
        assert_eq!(lens.id, DEFAULT_LENS);
    }

    #[test]
    fn test_unknown_lens_does_not_fall_back() {
        let registry = LensRegistry::default();
        match registry.resolve(Some("does-not-exist")) {
            Err(PerceptionError::UnknownLens(id)) => assert_eq!(id, "does-not-exist"),
            other => panic!("expected unknown lens, got {:?}", other),
        }
    }

    #[test]
    fn test_register_overwrites() {
        let registry = LensRegistry::new(custom("only", 0.2));
        registry.register(custom("only", 0.5)).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve(Some("only")).unwrap().saturation_constant, 0.5);
    }

    #[test]
    fn test_ids_sorted() {
        let registry = LensRegistry::with_builtin_lenses();
        let ids = registry.ids();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), LensCalibration::builtin().len());
    }

    #[test]
    fn test_concurrent_reads_and_writes() {
        let registry = Arc::new(LensRegistry::default());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    let registered = registry.register(custom(&format!("lens_{}", i % 2), 0.1 + i as f64 * 0.01));
                    registered.is_ok() && registry.resolve(None).is_ok()
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert!(registry.contains("lens_0"));
        assert!(registry.contains("lens_1"));
    }

    #[tokio::test]
    async fn test_load_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let lenses = vec![custom("from_json", 0.3)];
        write!(file, "{}", serde_json::to_string(&lenses).unwrap()).unwrap();

        let registry = LensRegistry::default();
        let count = registry.load_from_file(file.path()).await.unwrap();
        assert_eq!(count, 1);
        assert!(registry.contains("from_json"));
    }

    #[test]
    fn test_builtin_default_is_balanced() {
        let registry = LensRegistry::with_builtin_lenses();
        assert_eq!(registry.default_id(), DEFAULT_LENS);
        assert_eq!(registry.len(), LensCalibration::builtin().len());
    }

    #[test]
    fn test_register_rejects_invalid_weights() {
        let registry = LensRegistry::default();
        let before = registry.len();
        let bad = LensCalibration::new("bad_weights", "", [f64::NAN, -3.0, 0.0, 0.0], 0.2, 0.8);
        assert!(matches!(registry.register(bad), Err(PerceptionError::InvalidWeights { .. })));
        assert!(!registry.contains("bad_weights"));
        assert_eq!(registry.len(), before);
    }

    #[tokio::test]
    async fn test_load_malformed_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "[{{\"id\": \"half\", \"weights\": [0.25").unwrap();

        let registry = LensRegistry::default();
        let before = registry.len();
        let result = registry.load_from_file(file.path()).await;
        assert!(matches!(result, Err(PerceptionError::Json(_))));
        assert_eq!(registry.len(), before);
    }

    #[tokio::test]
    async fn test_load_malformed_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(file, "- id: missing_fields\n  weights: not-a-list\n").unwrap();

        let registry = LensRegistry::default();
        let before = registry.len();
        let result = registry.load_from_file(file.path()).await;
        assert!(matches!(result, Err(PerceptionError::Yaml(_))));
        assert!(!registry.contains("missing_fields"));
        assert_eq!(registry.len(), before);
    }

    #[tokio::test]
    async fn test_load_is_all_or_nothing() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let lenses = vec![custom("good", 0.3), LensCalibration::new("bad", "", [-1.0, 0.0, 0.0, 0.0], 0.2, 0.8)];
        write!(file, "{}", serde_json::to_string(&lenses).unwrap()).unwrap();

        let registry = LensRegistry::default();
        let result = registry.load_from_file(file.path()).await;
        assert!(matches!(result, Err(PerceptionError::InvalidWeights { .. })));
        assert!(!registry.contains("good"));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let registry = LensRegistry::default();
        let count = registry.load_from_file(dir.path().join("none.yaml")).await.unwrap();
        assert_eq!(count, 0);
    }
}
