// Application layer - Chart lifecycle and use cases
pub mod chart_engine;
pub mod chart_lifecycle;
pub mod series_source;
pub mod signal_chart;
