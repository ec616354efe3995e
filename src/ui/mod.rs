pub mod app;
pub mod dialogs;
pub mod icon;
pub mod player_window;
pub mod theme;
pub mod ticker;
pub mod video_surface;
