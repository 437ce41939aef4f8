pub mod ai;
pub mod api;
pub mod public;
