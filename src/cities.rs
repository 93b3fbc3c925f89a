//! Mapping from city keys to the trip files that back them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{BikeshareError, Result};

/// Maps city keys to CSV file names, resolved against a data directory.
///
/// Can be loaded from a plain JSON object on disk:
/// ```json
/// {
///   "chicago": "chicago.csv",
///   "new york city": "new_york_city.csv"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CityRegistry {
    data_dir: PathBuf,
    entries: BTreeMap<String, String>,
}

impl CityRegistry {
    /// The three cities shipped with the dataset.
    pub fn builtin(data_dir: impl Into<PathBuf>) -> Self {
        let entries = [
            ("chicago", "chicago.csv"),
            ("new york city", "new_york_city.csv"),
            ("washington", "washington.csv"),
        ]
        .into_iter()
        .map(|(city, file)| (city.to_string(), file.to_string()))
        .collect();

        Self {
            data_dir: data_dir.into(),
            entries,
        }
    }

    /// Loads the mapping from a JSON file at `path`. City keys are normalized
    /// the same way lookups are.
    pub fn load(path: impl AsRef<Path>, data_dir: impl Into<PathBuf>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let raw: BTreeMap<String, String> = serde_json::from_str(&content)?;
        let entries = raw
            .into_iter()
            .map(|(city, file)| (normalize(&city), file))
            .collect();

        Ok(Self {
            data_dir: data_dir.into(),
            entries,
        })
    }

    /// Canonical key for `city`: trimmed and lower-cased.
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::Validation`] if the city is not registered.
    pub fn resolve(&self, city: &str) -> Result<&str> {
        let key = normalize(city);
        self.entries
            .get_key_value(&key)
            .map(|(k, _)| k.as_str())
            .ok_or_else(|| {
                let known: Vec<&str> = self.cities().collect();
                BikeshareError::validation("city", city, &known)
            })
    }

    /// Full path of the trip file for `city`.
    pub fn source_path(&self, city: &str) -> Result<PathBuf> {
        let key = self.resolve(city)?;
        Ok(self.data_dir.join(&self.entries[key]))
    }

    /// Registered city keys in alphabetical order.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn normalize(city: &str) -> String {
    city.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_resolves_case_insensitively() {
        let registry = CityRegistry::builtin("data");
        assert_eq!(registry.resolve("  New York City ").unwrap(), "new york city");
        assert_eq!(
            registry.source_path("CHICAGO").unwrap(),
            PathBuf::from("data").join("chicago.csv")
        );
    }

    #[test]
    fn test_unknown_city_is_validation_error() {
        let registry = CityRegistry::builtin(".");
        let err = registry.resolve("boston").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("chicago, new york city, washington"));
    }

    #[test]
    fn test_load_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Portland": "pdx.csv"}}"#).unwrap();

        let registry = CityRegistry::load(file.path(), "/srv/trips").unwrap();
        assert_eq!(registry.cities().collect::<Vec<_>>(), vec!["portland"]);
        assert_eq!(
            registry.source_path("portland").unwrap(),
            PathBuf::from("/srv/trips/pdx.csv")
        );
        assert!(registry.resolve("chicago").is_err());
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2]").unwrap();
        let err = CityRegistry::load(file.path(), ".").unwrap_err();
        assert!(matches!(err, BikeshareError::Json(_)));
    }
}
