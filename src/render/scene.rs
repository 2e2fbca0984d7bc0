use super::{IconSpec, MapHandle, MapRenderer, MarkerHandle, RenderError};
use crate::types::LatLon;

const MAX_LATITUDE: f64 = 90.0;

#[derive(Debug, PartialEq, Clone)]
pub struct MapView {
    pub center: LatLon,
    pub zoom: u8,
    pub tile_layer: Option<TileLayer>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Marker {
    pub map: MapHandle,
    pub position: LatLon,
    pub icon: IconSpec,
    pub popup_html: Option<String>,
    pub popup_open: bool,
}

/// In-memory map state: every map and marker created through [`MapRenderer`].
///
/// Surfaces (terminal log, GUI window) read this to draw.
#[derive(Debug, Default)]
pub struct MapScene {
    maps: Vec<MapView>,
    markers: Vec<Marker>,
}

impl MapScene {
    #[must_use]
    pub fn new() -> Self {
        MapScene::default()
    }

    #[must_use]
    pub fn map(&self, handle: MapHandle) -> Option<&MapView> {
        self.maps.get(handle.0)
    }

    #[must_use]
    pub fn marker(&self, handle: MarkerHandle) -> Option<&Marker> {
        self.markers.get(handle.0)
    }

    pub fn markers(&self) -> impl Iterator<Item = (MarkerHandle, &Marker)> {
        self.markers
            .iter()
            .enumerate()
            .map(|(index, marker)| (MarkerHandle(index), marker))
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Opens or closes a marker's popup, as a click on the marker would.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownMarker`] if the handle was not issued by this scene.
    pub fn toggle_popup(&mut self, handle: MarkerHandle) -> Result<bool, RenderError> {
        let marker = self.marker_mut(handle)?;
        marker.popup_open = !marker.popup_open;
        Ok(marker.popup_open)
    }

    fn marker_mut(&mut self, handle: MarkerHandle) -> Result<&mut Marker, RenderError> {
        self.markers
            .get_mut(handle.0)
            .ok_or(RenderError::UnknownMarker(handle))
    }
}

fn validate(position: LatLon) -> Result<LatLon, RenderError> {
    if position.is_finite() && position.latitude.abs() <= MAX_LATITUDE {
        Ok(position)
    } else {
        Err(RenderError::InvalidCoordinates(position))
    }
}

impl MapRenderer for MapScene {
    fn create_map(&mut self, center: LatLon, zoom: u8) -> Result<MapHandle, RenderError> {
        let center = validate(center)?;
        self.maps.push(MapView {
            center,
            zoom,
            tile_layer: None,
        });
        Ok(MapHandle(self.maps.len() - 1))
    }

    fn add_tile_layer(
        &mut self,
        map: MapHandle,
        url_template: &str,
        attribution: &str,
        max_zoom: u8,
    ) -> Result<(), RenderError> {
        let view = self.maps.get_mut(map.0).ok_or(RenderError::UnknownMap(map))?;
        view.zoom = view.zoom.min(max_zoom);
        view.tile_layer = Some(TileLayer {
            url_template: url_template.to_string(),
            attribution: attribution.to_string(),
            max_zoom,
        });
        Ok(())
    }

    fn create_marker(
        &mut self,
        map: MapHandle,
        position: LatLon,
        icon: &IconSpec,
    ) -> Result<MarkerHandle, RenderError> {
        if self.maps.get(map.0).is_none() {
            return Err(RenderError::UnknownMap(map));
        }
        let position = validate(position)?;
        self.markers.push(Marker {
            map,
            position,
            icon: icon.clone(),
            popup_html: None,
            popup_open: false,
        });
        Ok(MarkerHandle(self.markers.len() - 1))
    }

    fn bind_popup(&mut self, marker: MarkerHandle, html: &str) -> Result<(), RenderError> {
        self.marker_mut(marker)?.popup_html = Some(html.to_string());
        Ok(())
    }

    fn set_marker_position(
        &mut self,
        marker: MarkerHandle,
        position: LatLon,
    ) -> Result<(), RenderError> {
        let position = validate(position)?;
        self.marker_mut(marker)?.position = position;
        Ok(())
    }

    // Binds the popup if an earlier bind never landed. Open state is untouched.
    fn set_popup_content(&mut self, marker: MarkerHandle, html: &str) -> Result<(), RenderError> {
        self.marker_mut(marker)?.popup_html = Some(html.to_string());
        Ok(())
    }
}
