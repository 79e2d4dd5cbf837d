//! egui settings editor

pub mod components;
pub mod constants;
pub mod manager;

pub use manager::run_gui;
