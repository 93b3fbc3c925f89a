//! Loads a city's trip file through the [`CityRegistry`].

use std::fs::File;

use tracing::info;

use crate::cities::CityRegistry;
use crate::error::Result;
use crate::parser::{LoadOutcome, LoadPolicy, parse_trips};

/// Record loader configured with a city mapping and an error policy.
#[derive(Debug, Clone)]
pub struct TripLoader {
    registry: CityRegistry,
    policy: LoadPolicy,
}

impl TripLoader {
    pub fn new(registry: CityRegistry) -> Self {
        Self {
            registry,
            policy: LoadPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn registry(&self) -> &CityRegistry {
        &self.registry
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    /// Opens and parses the trip file registered for `city`.
    #[tracing::instrument(skip(self), fields(policy = ?self.policy))]
    pub fn load(&self, city: &str) -> Result<LoadOutcome> {
        let key = self.registry.resolve(city)?;
        let path = self.registry.source_path(key)?;
        info!(city = key, path = %path.display(), "Loading trip data");

        let file = File::open(&path)?;
        let outcome = parse_trips(key, file, self.policy)?;

        info!(
            city = key,
            records = outcome.collection.len(),
            rejected = outcome.rejected.len(),
            "Trip data loaded"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BikeshareError;
    use std::fs;

    const HEADER: &str = "Start Time,Start Station,End Station,Trip Duration,User Type\n";

    fn data_dir(washington: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("washington.csv"), washington).unwrap();
        dir
    }

    #[test]
    fn test_load_registered_city() {
        let dir = data_dir(&format!("{HEADER}2017-02-01 10:00:00,A,B,300,Customer\n"));
        let loader = TripLoader::new(CityRegistry::builtin(dir.path()));

        let outcome = loader.load("Washington").unwrap();
        assert_eq!(outcome.collection.city(), "washington");
        assert_eq!(outcome.collection.len(), 1);
    }

    #[test]
    fn test_load_unknown_city() {
        let dir = data_dir(HEADER);
        let loader = TripLoader::new(CityRegistry::builtin(dir.path()));
        assert!(loader.load("atlantis").unwrap_err().is_validation());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = data_dir(HEADER);
        let loader = TripLoader::new(CityRegistry::builtin(dir.path()));
        assert!(matches!(
            loader.load("chicago").unwrap_err(),
            BikeshareError::Io(_)
        ));
    }

    #[test]
    fn test_policy_is_applied() {
        let dir = data_dir(&format!(
            "{HEADER}2017-02-01 10:00:00,A,B,300,Customer\nbroken,A,B,300,Customer\n"
        ));
        let strict = TripLoader::new(CityRegistry::builtin(dir.path()));
        assert!(strict.load("washington").is_err());

        let lenient = strict.with_policy(LoadPolicy::Collect);
        let outcome = lenient.load("washington").unwrap();
        assert_eq!(outcome.collection.len(), 1);
        assert_eq!(outcome.rejected.len(), 1);
    }
}
