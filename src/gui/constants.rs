//! GUI-specific constants for layout, colors and choice lists

use egui;

/// Editor window dimensions
pub const WINDOW_WIDTH: f32 = 720.0;
pub const WINDOW_HEIGHT: f32 = 860.0;
pub const WINDOW_MIN_WIDTH: f32 = 560.0;
pub const WINDOW_MIN_HEIGHT: f32 = 600.0;

/// Layout spacing
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;
pub const LABEL_WIDTH: f32 = 190.0;
pub const FIELD_WIDTH: f32 = 380.0;

/// Status colors
pub const STATUS_RUNNING: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);
pub const STATUS_PAUSED: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);
pub const STATUS_PENDING: egui::Color32 = egui::Color32::from_rgb(200, 200, 0);

/// Marker and hint colors
pub const MODIFIED_COLOR: egui::Color32 = egui::Color32::from_rgb(230, 80, 60);
pub const WARNING_COLOR: egui::Color32 = egui::Color32::from_rgb(230, 160, 0);
pub const INFO_COLOR: egui::Color32 = egui::Color32::from_rgb(90, 160, 230);

/// Choice lists for combo boxes
pub const BROWSERS: [&str; 5] = ["chrome", "edge", "firefox", "safari", "brave"];
pub const SELECT_ORDERS: [&str; 4] = ["from top to bottom", "from bottom to top", "center", "random"];
pub const OCR_IMAGE_SOURCES: [&str; 2] = ["canvas", "NonBrowser"];
