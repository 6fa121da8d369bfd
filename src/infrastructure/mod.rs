// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod headless_engine;
pub mod http_source;
pub mod influx_source;
