pub mod browser;
pub mod error;
pub mod format;
pub mod models;
pub mod overlay;
pub mod route;
pub mod view;
