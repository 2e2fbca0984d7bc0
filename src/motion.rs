use crate::types::AircraftRecord;

const SECONDS_PER_HOUR: f64 = 3600.0;
// Scales km/h down to a rough per-tick displacement in degrees. Not true arc.
const DEGREE_SCALE: f64 = 60.0;

/// Approximate angular displacement covered in one tick.
#[must_use]
pub fn distance_per_tick(speed_kmh: f64) -> f64 {
    speed_kmh / SECONDS_PER_HOUR / DEGREE_SCALE
}

/// Advances the aircraft one tick along its heading (flat-earth dead-reckoning).
///
/// Position is not clamped to geographic bounds.
pub fn advance(aircraft: &mut AircraftRecord) {
    let distance = distance_per_tick(aircraft.speed_kmh);
    let angle = aircraft.heading.to_radians();

    aircraft.latitude += distance * angle.cos();
    aircraft.longitude += distance * angle.sin();
}

#[cfg(test)]
mod tests {
    use super::{advance, distance_per_tick};
    use crate::types::{AircraftRecord, Heading, LatLon};

    const TOLERANCE: f64 = 1e-5;

    fn create_aircraft(latitude: f64, longitude: f64, speed_kmh: f64, heading: f64) -> AircraftRecord {
        AircraftRecord::new(
            "A1",
            "A1",
            LatLon::new(latitude, longitude),
            35_000,
            speed_kmh,
            Heading::new(heading).unwrap(),
        )
    }

    #[test]
    fn when_heading_north_then_only_latitude_increases() {
        let mut aircraft = create_aircraft(0.0, 0.0, 3600.0, 0.0);

        advance(&mut aircraft);

        assert!((aircraft.latitude - 1.0 / 60.0).abs() < TOLERANCE);
        assert!((aircraft.latitude - 0.016_667).abs() < TOLERANCE);
        assert!(aircraft.longitude.abs() < 1e-12);
    }

    #[test]
    fn when_heading_east_then_only_longitude_increases() {
        let mut aircraft = create_aircraft(0.0, 0.0, 3600.0, 90.0);

        advance(&mut aircraft);

        assert!(aircraft.latitude.abs() < 1e-12);
        assert!((aircraft.longitude - 1.0 / 60.0).abs() < TOLERANCE);
    }

    #[test]
    fn when_advancing_tam456_then_position_matches_reference_values() {
        let mut aircraft = create_aircraft(-10.0, -60.0, 850.0, 10.0);

        advance(&mut aircraft);

        assert!((distance_per_tick(850.0) - 0.003_935).abs() < 1e-6);
        assert!((aircraft.latitude - -9.996_13).abs() < TOLERANCE);
        assert!((aircraft.longitude - -59.999_32).abs() < TOLERANCE);
    }

    #[test]
    fn when_advancing_n_times_then_displacement_accumulates_linearly() {
        let mut aircraft = create_aircraft(-15.0, -55.0, 780.0, 300.0);
        let mut single = aircraft.clone();
        advance(&mut single);
        let step_latitude = single.latitude - aircraft.latitude;
        let step_longitude = single.longitude - aircraft.longitude;

        let n = 1000;
        for _ in 0..n {
            advance(&mut aircraft);
        }

        assert!((aircraft.latitude - (-15.0 + f64::from(n) * step_latitude)).abs() < 1e-9);
        assert!((aircraft.longitude - (-55.0 + f64::from(n) * step_longitude)).abs() < 1e-9);
    }

    #[test]
    fn when_advancing_then_constant_attributes_are_untouched() {
        let mut aircraft = create_aircraft(-5.0, -65.0, 750.0, 180.0);

        advance(&mut aircraft);

        assert_eq!(aircraft.altitude, 35_000);
        assert_eq!(aircraft.speed_kmh, 750.0);
        assert_eq!(aircraft.heading.degrees(), 180.0);
        assert!(aircraft.latitude < -5.0);
    }

    #[test]
    fn when_speed_is_zero_then_aircraft_stays_put() {
        let mut aircraft = create_aircraft(12.5, 40.0, 0.0, 45.0);

        advance(&mut aircraft);

        assert_eq!(aircraft.position(), LatLon::new(12.5, 40.0));
    }
}
