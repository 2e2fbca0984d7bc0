mod constants;

use crate::config::ApplicationConfig;
use crate::registry::AircraftRegistry;
use crate::render::MarkerHandle;
use crate::render::popup::html_to_lines;
use crate::render::scene::MapScene;
use crate::scheduler::{Cadence, CadencePoll};
use crate::simulation::Simulation;
use crate::types::LatLon;
use constants::{
    AIRCRAFT_REFERENCE_SHAPE, ATTRIBUTION_FONT_SIZE, DEFAULT_MAX_ZOOM, MARKER_HIT_RADIUS,
    POPUP_FONT_SIZE, POPUP_OFFSET, POPUP_PADDING,
};
use eframe::{egui, epaint};

/// Opens the map window. Ticks are driven by the window's frame loop.
///
/// # Errors
///
/// Fails if the map cannot be set up or the window cannot be opened.
pub fn run(registry: AircraftRegistry, config: &ApplicationConfig) -> anyhow::Result<()> {
    if !config.map.tile_url_template.contains("openstreetmap.org") {
        log::warn!(
            "Only OpenStreetMap tiles are supported in the window; ignoring {0}",
            config.map.tile_url_template
        );
    }

    let simulation = Simulation::new(registry, MapScene::new(), &config.map)?;
    let tick_interval = config.simulation.tick_interval();

    eframe::run_native(
        "flightsim",
        eframe::NativeOptions::default(),
        Box::new(move |creation_context| {
            Ok(Box::new(RadarApp::new(
                creation_context.egui_ctx.clone(),
                simulation,
                tick_interval,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Map window failed: {e}"))
}

pub struct RadarApp {
    simulation: Simulation<MapScene>,
    cadence: Cadence,
    max_zoom: u8,
    tiles: walkers::HttpTiles,
    map_memory: walkers::MapMemory,
    click_sender: crossbeam_channel::Sender<MarkerHandle>,
    click_receiver: crossbeam_channel::Receiver<MarkerHandle>,
}

impl RadarApp {
    #[must_use]
    pub fn new(
        egui_ctx: egui::Context,
        simulation: Simulation<MapScene>,
        tick_interval: std::time::Duration,
    ) -> Self {
        let mut map_memory = walkers::MapMemory::default();
        let mut max_zoom = DEFAULT_MAX_ZOOM;
        if let Some(view) = simulation.renderer().map(simulation.map()) {
            if let Some(layer) = &view.tile_layer {
                max_zoom = layer.max_zoom;
            }
            let _ = map_memory.set_zoom(f64::from(view.zoom.min(max_zoom)));
        }
        let (click_sender, click_receiver) = crossbeam_channel::unbounded();

        Self {
            simulation,
            cadence: Cadence::new(tick_interval),
            max_zoom,
            tiles: walkers::HttpTiles::new(walkers::sources::OpenStreetMap, egui_ctx),
            map_memory,
            click_sender,
            click_receiver,
        }
    }

    // Ticks when the interval has elapsed; returns the time until the next tick.
    fn tick_if_due(&mut self) -> std::time::Duration {
        match self.cadence.poll(std::time::Instant::now()) {
            CadencePoll::Wait(remaining) => remaining,
            CadencePoll::TickNow => {
                let report = self.simulation.tick();
                log::debug!("Frame tick {0} rendered {1}", report.tick, report.rendered);
                self.cadence.interval()
            }
        }
    }

    fn marker_views(&self) -> Vec<MarkerView> {
        self.simulation
            .renderer()
            .markers()
            .map(|(handle, marker)| MarkerView {
                handle,
                position: marker.position,
                popup_lines: if marker.popup_open {
                    marker
                        .popup_html
                        .as_deref()
                        .map(html_to_lines)
                        .unwrap_or_default()
                } else {
                    Vec::new()
                },
            })
            .collect()
    }
}

impl eframe::App for RadarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let until_next_tick = self.tick_if_due();
        ctx.request_repaint_after(until_next_tick);

        if self.map_memory.zoom() > f64::from(self.max_zoom) {
            let _ = self.map_memory.set_zoom(f64::from(self.max_zoom));
        }

        let markers = self.marker_views();
        let view = self.simulation.renderer().map(self.simulation.map()).cloned();
        let center = view
            .as_ref()
            .map_or(LatLon::new(0.0, 0.0), |view| view.center);
        let attribution = view
            .and_then(|view| view.tile_layer)
            .map(|layer| layer.attribution)
            .unwrap_or_default();

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let my_position = walkers::lat_lon(center.latitude, center.longitude);

                let mut map =
                    walkers::Map::new(Some(&mut self.tiles), &mut self.map_memory, my_position);

                let aircraft_plugin = AircraftPlugin::new(markers, self.click_sender.clone());

                map = map
                    .zoom_with_ctrl(false)
                    .drag_pan_buttons(
                        egui::DragPanButtons::PRIMARY | egui::DragPanButtons::SECONDARY,
                    )
                    .with_plugin(aircraft_plugin);

                map.show(ui, |_ui, _response, _projector, _map_memory| {});

                let corner = ui.max_rect().right_bottom() - egui::vec2(4.0, 4.0);
                ui.painter().text(
                    corner,
                    egui::Align2::RIGHT_BOTTOM,
                    &attribution,
                    egui::FontId::proportional(ATTRIBUTION_FONT_SIZE),
                    egui::Color32::DARK_GRAY,
                );
            });

        let clicked: Vec<MarkerHandle> = self.click_receiver.try_iter().collect();
        for handle in clicked {
            if let Err(err) = self.simulation.renderer_mut().toggle_popup(handle) {
                log::warn!("Cannot toggle popup: {err}");
            }
        }
    }
}

struct MarkerView {
    handle: MarkerHandle,
    position: LatLon,
    popup_lines: Vec<String>,
}

pub struct AircraftPlugin {
    markers: Vec<MarkerView>,
    click_sender: crossbeam_channel::Sender<MarkerHandle>,
}

impl AircraftPlugin {
    fn new(markers: Vec<MarkerView>, click_sender: crossbeam_channel::Sender<MarkerHandle>) -> Self {
        AircraftPlugin {
            markers,
            click_sender,
        }
    }
}

impl walkers::Plugin for AircraftPlugin {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &walkers::Projector,
        _map_memory: &walkers::MapMemory,
    ) {
        let projected: Vec<(&MarkerView, egui::Pos2)> = self
            .markers
            .iter()
            .map(|marker| {
                (
                    marker,
                    projector
                        .project(walkers::lat_lon(
                            marker.position.latitude,
                            marker.position.longitude,
                        ))
                        .to_pos2(),
                )
            })
            .collect();

        for (marker, point) in &projected {
            // don't draw if the marker is off-screen
            if !ui.max_rect().contains(*point) {
                continue;
            }
            let aircraft_shape = apply_shape_on_point(*point, &AIRCRAFT_REFERENCE_SHAPE);
            ui.painter().add(egui::Shape::convex_polygon(
                aircraft_shape,
                egui::Color32::BLACK,
                egui::epaint::PathStroke::new(1.0, epaint::Color32::BLACK),
            ));

            if !marker.popup_lines.is_empty() {
                draw_popup(ui, *point, &marker.popup_lines.join("\n"));
            }
        }

        if response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let nearest = projected
                    .iter()
                    .map(|(marker, point)| (marker.handle, point.distance(pointer)))
                    .filter(|(_, distance)| *distance <= MARKER_HIT_RADIUS)
                    .min_by(|a, b| a.1.total_cmp(&b.1));
                if let Some((handle, _)) = nearest {
                    let _ = self.click_sender.send(handle);
                }
            }
        }
    }
}

fn draw_popup(ui: &egui::Ui, anchor: egui::Pos2, text: &str) {
    let painter = ui.painter();
    let galley = painter.layout_no_wrap(
        text.to_string(),
        egui::FontId::proportional(POPUP_FONT_SIZE),
        egui::Color32::BLACK,
    );
    let size = galley.size() + egui::vec2(2.0 * POPUP_PADDING, 2.0 * POPUP_PADDING);
    let top_left = anchor - egui::vec2(size.x / 2.0, size.y + POPUP_OFFSET);
    let frame = egui::Rect::from_min_size(top_left, size);

    painter.rect_filled(frame, 4.0, egui::Color32::WHITE);
    painter.galley(
        top_left + egui::vec2(POPUP_PADDING, POPUP_PADDING),
        galley,
        egui::Color32::BLACK,
    );
}

fn apply_shape_on_point(center_point: egui::Pos2, raw_shape: &[egui::Pos2]) -> Vec<egui::Pos2> {
    raw_shape
        .iter()
        .map(|&shape_point| center_point + shape_point.to_vec2())
        .collect::<Vec<egui::Pos2>>()
}
