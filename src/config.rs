use crate::types::{AircraftRecord, Heading, LatLon};

#[derive(serde::Deserialize, Debug)]
#[serde(default)]
pub struct ApplicationConfig {
    pub map: MapConfig,
    pub simulation: SimulationConfig,
    pub aircraft: Vec<AircraftSeed>,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        ApplicationConfig {
            map: MapConfig::default(),
            simulation: SimulationConfig::default(),
            aircraft: default_aircraft(),
        }
    }
}

impl ApplicationConfig {
    pub fn construct_from_path(
        path: &std::path::PathBuf,
    ) -> Result<ApplicationConfig, errors::ConfigurationError> {
        let string =
            std::fs::read_to_string(path).map_err(|error| errors::ConfigurationError::Io {
                source: error,
                path: path.clone(),
            })?;

        toml::from_str(&string).map_err(|error| errors::ConfigurationError::Parse {
            source: error,
            path: path.clone(),
        })
    }

    /// Converts the seed table into validated aircraft records.
    pub fn seed_records(&self) -> Result<Vec<AircraftRecord>, errors::ConfigurationError> {
        self.aircraft.iter().map(AircraftSeed::to_record).collect()
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MapConfig {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom: u8,
    pub max_zoom: u8,
    pub tile_url_template: String,
    pub attribution: String,
}

impl MapConfig {
    #[must_use]
    pub fn center(&self) -> LatLon {
        LatLon::new(self.center_latitude, self.center_longitude)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            center_latitude: -8.76,
            center_longitude: -63.90,
            zoom: 5,
            max_zoom: 18,
            tile_url_template: String::from("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png"),
            attribution: String::from("© OpenStreetMap contributors"),
        }
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_interval_ms: u64,
}

impl SimulationConfig {
    #[must_use]
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            tick_interval_ms: 3000,
        }
    }
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
pub struct AircraftSeed {
    pub id: String,
    pub callsign: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: u32,
    pub speed_kmh: f64,
    pub heading: f64,
}

impl AircraftSeed {
    pub fn to_record(&self) -> Result<AircraftRecord, errors::ConfigurationError> {
        let heading =
            Heading::new(self.heading).map_err(|error| errors::ConfigurationError::InvalidHeading {
                id: self.id.clone(),
                source: error,
            })?;
        if !self.speed_kmh.is_finite() || self.speed_kmh < 0.0 {
            return Err(errors::ConfigurationError::InvalidSpeed {
                id: self.id.clone(),
                speed_kmh: self.speed_kmh,
            });
        }
        let position = LatLon::new(self.latitude, self.longitude);
        if !position.is_finite() {
            return Err(errors::ConfigurationError::InvalidPosition {
                id: self.id.clone(),
            });
        }

        Ok(AircraftRecord::new(
            self.id.clone(),
            self.callsign.clone().unwrap_or_else(|| self.id.clone()),
            position,
            self.altitude,
            self.speed_kmh,
            heading,
        ))
    }
}

fn seed(
    id: &str,
    latitude: f64,
    longitude: f64,
    altitude: u32,
    speed_kmh: f64,
    heading: f64,
) -> AircraftSeed {
    AircraftSeed {
        id: id.to_string(),
        callsign: None,
        latitude,
        longitude,
        altitude,
        speed_kmh,
        heading,
    }
}

fn default_aircraft() -> Vec<AircraftSeed> {
    vec![
        seed("TAM456", -10.0, -60.0, 35_000, 850.0, 10.0),
        seed("GLO101", -15.0, -55.0, 38_000, 780.0, 300.0),
        seed("AZU789", -5.0, -65.0, 30_000, 750.0, 180.0),
    ]
}

pub mod errors {
    use crate::types::HeadingError;

    #[derive(Debug, thiserror::Error)]
    pub enum ConfigurationError {
        #[error("Failed to read config file '{}': {source}", path.display())]
        Io {
            source: std::io::Error,
            path: std::path::PathBuf,
        },
        #[error("Failed to parse config file '{}': {source}", path.display())]
        Parse {
            source: toml::de::Error,
            path: std::path::PathBuf,
        },
        #[error("Aircraft id '{0}' appears more than once")]
        DuplicateId(String),
        #[error("Aircraft '{id}' has an invalid heading: {source}")]
        InvalidHeading { id: String, source: HeadingError },
        #[error("Aircraft '{id}' has an invalid speed {speed_kmh} km/h")]
        InvalidSpeed { id: String, speed_kmh: f64 },
        #[error("Aircraft '{id}' has a non-finite position")]
        InvalidPosition { id: String },
    }
}

#[cfg(test)]
mod tests {
    use super::errors::ConfigurationError;
    use super::{AircraftSeed, ApplicationConfig};

    #[test]
    fn when_config_is_empty_then_demo_defaults_are_used() {
        let config: ApplicationConfig = toml::from_str("").expect("empty config should parse");

        assert_eq!(config.map.zoom, 5);
        assert_eq!(config.map.max_zoom, 18);
        assert_eq!(config.simulation.tick_interval_ms, 3000);
        let ids: Vec<&str> = config.aircraft.iter().map(|seed| seed.id.as_str()).collect();
        assert_eq!(ids, vec!["TAM456", "GLO101", "AZU789"]);
    }

    #[test]
    fn when_default_constructed_then_it_matches_an_empty_file() {
        let parsed: ApplicationConfig = toml::from_str("").unwrap();
        let constructed = ApplicationConfig::default();

        assert_eq!(parsed.aircraft, constructed.aircraft);
        assert_eq!(parsed.map.tile_url_template, constructed.map.tile_url_template);
        assert!(constructed.seed_records().is_ok());
    }

    #[test]
    fn when_config_lists_aircraft_then_they_replace_defaults() {
        let config: ApplicationConfig = toml::from_str(
            r#"
            [map]
            zoom = 7

            [simulation]
            tick_interval_ms = 500

            [[aircraft]]
            id = "A1"
            callsign = "ALPHA1"
            latitude = 0.0
            longitude = 0.0
            altitude = 10000
            speed_kmh = 3600.0
            heading = 0.0
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.map.zoom, 7);
        assert_eq!(config.map.center_latitude, -8.76);
        assert_eq!(config.simulation.tick_interval().as_millis(), 500);
        let records = config.seed_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].callsign, "ALPHA1");
        assert_eq!(records[0].visual_handle(), None);
    }

    #[test]
    fn when_callsign_missing_then_id_is_used() {
        let seed = AircraftSeed {
            id: String::from("GLO101"),
            callsign: None,
            latitude: -15.0,
            longitude: -55.0,
            altitude: 38_000,
            speed_kmh: 780.0,
            heading: 300.0,
        };

        assert_eq!(seed.to_record().unwrap().callsign, "GLO101");
    }

    #[test]
    fn when_seed_values_are_invalid_then_conversion_fails() {
        let valid = AircraftSeed {
            id: String::from("X"),
            callsign: None,
            latitude: 0.0,
            longitude: 0.0,
            altitude: 0,
            speed_kmh: 100.0,
            heading: 0.0,
        };

        let bad_heading = AircraftSeed {
            heading: 360.0,
            ..valid.clone()
        };
        let bad_speed = AircraftSeed {
            speed_kmh: -1.0,
            ..valid.clone()
        };
        let bad_position = AircraftSeed {
            latitude: f64::INFINITY,
            ..valid
        };

        assert!(matches!(
            bad_heading.to_record(),
            Err(ConfigurationError::InvalidHeading { .. })
        ));
        assert!(matches!(
            bad_speed.to_record(),
            Err(ConfigurationError::InvalidSpeed { .. })
        ));
        assert!(matches!(
            bad_position.to_record(),
            Err(ConfigurationError::InvalidPosition { .. })
        ));
    }

    #[test]
    fn when_config_file_is_missing_then_io_error_names_path() {
        let path = std::path::PathBuf::from("/nonexistent/flightsim.toml");

        let error = ApplicationConfig::construct_from_path(&path).unwrap_err();

        assert!(matches!(error, ConfigurationError::Io { .. }));
        assert!(error.to_string().contains("/nonexistent/flightsim.toml"));
    }
}
