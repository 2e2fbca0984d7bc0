use crate::render::MarkerHandle;

/// A geographic position in degrees.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLon {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        LatLon {
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl std::fmt::Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// Course over ground in degrees, 0 = north, increasing clockwise.
#[derive(Debug, PartialEq, Clone, Copy, PartialOrd)]
pub struct Heading(f64);

impl Heading {
    pub const FULL_CIRCLE: f64 = 360.0;

    pub fn new(degrees: f64) -> Result<Self, HeadingError> {
        if !degrees.is_finite() {
            return Err(HeadingError::NotFinite);
        }
        if (0.0..Self::FULL_CIRCLE).contains(&degrees) {
            Ok(Heading(degrees))
        } else {
            Err(HeadingError::OutOfRange(degrees))
        }
    }

    /// Wraps any finite angle into `[0, 360)`.
    pub fn normalized(degrees: f64) -> Result<Self, HeadingError> {
        if !degrees.is_finite() {
            return Err(HeadingError::NotFinite);
        }
        let wrapped = degrees.rem_euclid(Self::FULL_CIRCLE);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if wrapped >= Self::FULL_CIRCLE {
            Ok(Heading(0.0))
        } else {
            Ok(Heading(wrapped))
        }
    }

    #[must_use]
    pub fn degrees(&self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn to_radians(&self) -> f64 {
        self.0.to_radians()
    }
}

impl std::fmt::Display for Heading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.0)
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum HeadingError {
    #[error("Heading is not a finite number")]
    NotFinite,
    #[error("Heading {0} is outside [0, 360)")]
    OutOfRange(f64),
}

/// One simulated flight.
///
/// `id` is fixed at construction. The marker handle belongs to this record
/// alone: clones start without one and get their own marker on first render.
#[derive(Debug, PartialEq)]
pub struct AircraftRecord {
    id: String,
    pub callsign: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: u32,
    pub speed_kmh: f64,
    pub heading: Heading,
    visual: Option<MarkerHandle>,
}

impl AircraftRecord {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        callsign: impl Into<String>,
        position: LatLon,
        altitude: u32,
        speed_kmh: f64,
        heading: Heading,
    ) -> Self {
        AircraftRecord {
            id: id.into(),
            callsign: callsign.into(),
            latitude: position.latitude,
            longitude: position.longitude,
            altitude,
            speed_kmh,
            heading,
            visual: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn position(&self) -> LatLon {
        LatLon::new(self.latitude, self.longitude)
    }

    #[must_use]
    pub fn visual_handle(&self) -> Option<MarkerHandle> {
        self.visual
    }

    // Only render reconciliation attaches a visual, and only once.
    pub(crate) fn attach_visual(&mut self, handle: MarkerHandle) {
        debug_assert!(self.visual.is_none(), "visual handle attached twice");
        self.visual = Some(handle);
    }
}

impl Clone for AircraftRecord {
    fn clone(&self) -> Self {
        AircraftRecord {
            id: self.id.clone(),
            callsign: self.callsign.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
            speed_kmh: self.speed_kmh,
            heading: self.heading,
            visual: None,
        }
    }
}
