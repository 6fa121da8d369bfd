// Domain layer - Chart and series models
pub mod chart_options;
pub mod export;
pub mod series;
pub mod zoom;
