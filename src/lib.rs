pub mod aggregate;
pub mod context;
pub mod dataset;
pub mod export;
pub mod handlers;
pub mod map_figure;
pub mod state;
