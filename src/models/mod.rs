pub mod profile;
pub mod section;
pub mod settings;
pub mod state;
pub mod template;
pub mod update;
