//! Configuration loaded from `.secura.toml`.

pub mod settings;

pub use settings::Settings;
