pub mod banner;
pub mod header;
pub mod map_view;
pub mod nav_controls;
pub mod route_controls;
pub mod sidebar;
pub mod status_screens;
