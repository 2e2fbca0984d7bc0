use eframe::egui;

pub const AIRCRAFT_REFERENCE_SHAPE: [egui::Pos2; 4] = [
    egui::pos2(0.0, -10.0), // Nose
    egui::pos2(7.0, 8.0),   // Right Wing tip
    egui::pos2(0.0, 2.0),   // Tail center indentation
    egui::pos2(-7.0, 8.0),  // Left Wing tip
];

// Clicks within this many points of a marker toggle its popup.
pub const MARKER_HIT_RADIUS: f32 = 12.0;

pub const POPUP_FONT_SIZE: f32 = 13.0;
pub const POPUP_PADDING: f32 = 6.0;
pub const POPUP_OFFSET: f32 = 14.0;
pub const ATTRIBUTION_FONT_SIZE: f32 = 11.0;

// Used only if the map has no tile layer.
pub const DEFAULT_MAX_ZOOM: u8 = 18;
