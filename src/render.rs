pub mod popup;
pub mod scene;
pub mod terminal;

use crate::types::{AircraftRecord, LatLon};

/// Opaque reference to a map created by a [`MapRenderer`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct MapHandle(pub(crate) usize);

/// Opaque reference to a marker and its popup.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct MarkerHandle(pub(crate) usize);

impl std::fmt::Display for MarkerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

/// Styling for a marker glyph.
#[derive(Debug, PartialEq, Clone)]
pub struct IconSpec {
    pub class_name: String,
    pub glyph: String,
    pub size: [u32; 2],
    pub anchor: [u32; 2],
}

impl IconSpec {
    #[must_use]
    pub fn airplane() -> Self {
        IconSpec {
            class_name: String::from("airplane-icon"),
            glyph: String::from("✈"),
            size: [24, 24],
            anchor: [12, 12],
        }
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid coordinates {0}")]
    InvalidCoordinates(LatLon),
    #[error("Unknown map handle {0:?}")]
    UnknownMap(MapHandle),
    #[error("Unknown marker {0}")]
    UnknownMarker(MarkerHandle),
    #[error("Map backend failure: {0}")]
    Backend(String),
}

/// The mapping library the simulation draws into.
pub trait MapRenderer {
    fn create_map(&mut self, center: LatLon, zoom: u8) -> Result<MapHandle, RenderError>;

    fn add_tile_layer(
        &mut self,
        map: MapHandle,
        url_template: &str,
        attribution: &str,
        max_zoom: u8,
    ) -> Result<(), RenderError>;

    fn create_marker(
        &mut self,
        map: MapHandle,
        position: LatLon,
        icon: &IconSpec,
    ) -> Result<MarkerHandle, RenderError>;

    fn bind_popup(&mut self, marker: MarkerHandle, html: &str) -> Result<(), RenderError>;

    fn set_marker_position(
        &mut self,
        marker: MarkerHandle,
        position: LatLon,
    ) -> Result<(), RenderError>;

    fn set_popup_content(&mut self, marker: MarkerHandle, html: &str) -> Result<(), RenderError>;
}

/// Brings the collaborator's marker for `aircraft` in line with its current state.
///
/// The first call creates the marker and binds a popup; every later call moves
/// the existing marker and rewrites its popup in place, so a popup the user
/// opened stays open.
///
/// # Errors
///
/// Propagates the collaborator's [`RenderError`]. A marker that was created
/// before a failing popup bind is still kept on the record.
pub fn reconcile<R: MapRenderer + ?Sized>(
    renderer: &mut R,
    map: MapHandle,
    icon: &IconSpec,
    aircraft: &mut AircraftRecord,
) -> Result<(), RenderError> {
    let position = aircraft.position();
    let content = popup::popup_html(aircraft);

    match aircraft.visual_handle() {
        None => {
            let marker = renderer.create_marker(map, position, icon)?;
            aircraft.attach_visual(marker);
            log::debug!("Created {marker} for {0}", aircraft.id());
            renderer.bind_popup(marker, &content)
        }
        Some(marker) => {
            renderer.set_marker_position(marker, position)?;
            renderer.set_popup_content(marker, &content)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::mock::RecordingRenderer;
    use super::{IconSpec, MapRenderer, MarkerHandle, reconcile};
    use crate::types::{AircraftRecord, Heading, LatLon};

    fn create_aircraft() -> AircraftRecord {
        AircraftRecord::new(
            "GLO101",
            "GLO101",
            LatLon::new(-15.0, -55.0),
            38_000,
            780.0,
            Heading::new(300.0).unwrap(),
        )
    }

    #[test]
    fn when_reconciling_new_aircraft_then_marker_is_created_with_popup() {
        let mut renderer = RecordingRenderer::default();
        let map = renderer.create_map(LatLon::new(0.0, 0.0), 5).unwrap();
        let mut aircraft = create_aircraft();

        reconcile(&mut renderer, map, &IconSpec::airplane(), &mut aircraft).unwrap();

        assert_eq!(aircraft.visual_handle(), Some(MarkerHandle(0)));
        assert_eq!(renderer.markers_created, vec![LatLon::new(-15.0, -55.0)]);
        assert_eq!(renderer.popups_bound.len(), 1);
        assert!(renderer.popups_bound[0].1.contains("GLO101"));
        assert!(renderer.positions_set.is_empty());
    }

    #[test]
    fn when_reconciling_known_aircraft_then_marker_is_moved_not_recreated() {
        let mut renderer = RecordingRenderer::default();
        let map = renderer.create_map(LatLon::new(0.0, 0.0), 5).unwrap();
        let mut aircraft = create_aircraft();

        reconcile(&mut renderer, map, &IconSpec::airplane(), &mut aircraft).unwrap();
        aircraft.latitude += 1.0;
        reconcile(&mut renderer, map, &IconSpec::airplane(), &mut aircraft).unwrap();

        assert_eq!(renderer.markers_created.len(), 1);
        assert_eq!(
            renderer.positions_set,
            vec![(MarkerHandle(0), LatLon::new(-14.0, -55.0))]
        );
        assert_eq!(renderer.popups_updated.len(), 1);
        assert_eq!(aircraft.visual_handle(), Some(MarkerHandle(0)));
    }

    #[test]
    fn when_create_fails_then_no_handle_is_stored() {
        let mut renderer = RecordingRenderer {
            fail_create: true,
            ..RecordingRenderer::default()
        };
        let map = renderer.create_map(LatLon::new(0.0, 0.0), 5).unwrap();
        let mut aircraft = create_aircraft();

        assert!(reconcile(&mut renderer, map, &IconSpec::airplane(), &mut aircraft).is_err());
        assert_eq!(aircraft.visual_handle(), None);
    }

    #[test]
    fn when_popup_bind_fails_then_marker_is_still_kept() {
        let mut renderer = RecordingRenderer {
            fail_bind: true,
            ..RecordingRenderer::default()
        };
        let map = renderer.create_map(LatLon::new(0.0, 0.0), 5).unwrap();
        let mut aircraft = create_aircraft();

        assert!(reconcile(&mut renderer, map, &IconSpec::airplane(), &mut aircraft).is_err());
        assert_eq!(aircraft.visual_handle(), Some(MarkerHandle(0)));

        renderer.fail_bind = false;
        reconcile(&mut renderer, map, &IconSpec::airplane(), &mut aircraft).unwrap();
        assert_eq!(renderer.markers_created.len(), 1);
        assert_eq!(renderer.popups_updated.len(), 1);
    }
}
