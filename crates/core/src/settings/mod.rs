pub mod settings_model;
mod settings_service;

pub use settings_model::*;
