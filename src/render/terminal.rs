use super::popup::html_to_lines;
use super::scene::MapScene;
use super::{IconSpec, MapHandle, MapRenderer, MarkerHandle, RenderError};
use crate::types::LatLon;

/// Headless map: keeps a [`MapScene`] and logs every change made to it.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    scene: MapScene,
}

impl TerminalRenderer {
    #[must_use]
    pub fn new() -> Self {
        TerminalRenderer::default()
    }

    #[must_use]
    pub fn scene(&self) -> &MapScene {
        &self.scene
    }
}

impl MapRenderer for TerminalRenderer {
    fn create_map(&mut self, center: LatLon, zoom: u8) -> Result<MapHandle, RenderError> {
        let map = self.scene.create_map(center, zoom)?;
        log::info!("Map centred on {center} at zoom {zoom}");
        Ok(map)
    }

    fn add_tile_layer(
        &mut self,
        map: MapHandle,
        url_template: &str,
        attribution: &str,
        max_zoom: u8,
    ) -> Result<(), RenderError> {
        self.scene
            .add_tile_layer(map, url_template, attribution, max_zoom)?;
        log::info!("Tiles from {url_template} up to zoom {max_zoom} ({attribution})");
        Ok(())
    }

    fn create_marker(
        &mut self,
        map: MapHandle,
        position: LatLon,
        icon: &IconSpec,
    ) -> Result<MarkerHandle, RenderError> {
        let marker = self.scene.create_marker(map, position, icon)?;
        log::info!("{0} {marker} placed at {position}", icon.glyph);
        Ok(marker)
    }

    fn bind_popup(&mut self, marker: MarkerHandle, html: &str) -> Result<(), RenderError> {
        self.scene.bind_popup(marker, html)?;
        log::info!("{marker}: {0}", html_to_lines(html).join(" | "));
        Ok(())
    }

    fn set_marker_position(
        &mut self,
        marker: MarkerHandle,
        position: LatLon,
    ) -> Result<(), RenderError> {
        self.scene.set_marker_position(marker, position)?;
        log::info!("{marker} moved to {position}");
        Ok(())
    }

    fn set_popup_content(&mut self, marker: MarkerHandle, html: &str) -> Result<(), RenderError> {
        self.scene.set_popup_content(marker, html)?;
        log::debug!("{marker}: {0}", html_to_lines(html).join(" | "));
        Ok(())
    }
}
