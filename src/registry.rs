use crate::config::errors::ConfigurationError;
use crate::types::AircraftRecord;

/// Authoritative, insertion-ordered set of simulated aircraft.
#[derive(Debug, Default)]
pub struct AircraftRegistry {
    records: Vec<AircraftRecord>,
}

impl AircraftRegistry {
    /// Builds the registry from seed records.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateId`] if two records share an `id`.
    pub fn initialize(seed: Vec<AircraftRecord>) -> Result<Self, ConfigurationError> {
        let mut seen = std::collections::HashSet::with_capacity(seed.len());
        for record in &seed {
            if !seen.insert(record.id()) {
                return Err(ConfigurationError::DuplicateId(record.id().to_string()));
            }
        }
        log::debug!("Registry initialized with {} aircraft", seed.len());
        Ok(AircraftRegistry { records: seed })
    }

    /// Visits every record in insertion order.
    pub fn for_each<F>(&mut self, visit: F)
    where
        F: FnMut(&mut AircraftRecord),
    {
        self.records.iter_mut().for_each(visit);
    }

    pub fn iter(&self) -> impl Iterator<Item = &AircraftRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&AircraftRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
