pub mod accounts;
pub mod advanced;
pub mod preferences;
pub mod runtime;
pub mod widgets;
