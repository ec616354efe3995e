use eframe::egui;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_WINDOW_SIZE;

pub const GEOMETRY_KEY: &str = "geometry";
pub const WINDOW_STATE_KEY: &str = "windowState";

/// The two blobs round-tripped through eframe's persistent storage. The
/// storage never looks inside them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowLayoutState {
    pub geometry: Vec<u8>,
    pub window_state: Vec<u8>,
}

impl WindowLayoutState {
    /// Absent keys read as empty blobs.
    pub fn load(storage: &dyn eframe::Storage) -> Self {
        Self {
            geometry: eframe::get_value(storage, GEOMETRY_KEY).unwrap_or_default(),
            window_state: eframe::get_value(storage, WINDOW_STATE_KEY).unwrap_or_default(),
        }
    }

    pub fn save(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, GEOMETRY_KEY, &self.geometry);
        eframe::set_value(storage, WINDOW_STATE_KEY, &self.window_state);
    }

    pub fn encode(geometry: &WindowGeometry, state: &WindowState) -> Self {
        Self {
            geometry: encode_blob(geometry),
            window_state: encode_blob(state),
        }
    }

    pub fn geometry(&self) -> Option<WindowGeometry> {
        decode_blob(&self.geometry, GEOMETRY_KEY)
    }

    pub fn window_state(&self) -> Option<WindowState> {
        decode_blob(&self.window_state, WINDOW_STATE_KEY)
    }

    /// Viewport commands that put a freshly opened window back where this
    /// layout left it. Without a usable geometry the window gets the default size.
    pub fn restore_commands(&self) -> Vec<egui::ViewportCommand> {
        let mut commands = Vec::new();
        match self.geometry() {
            Some(geometry) => {
                debug!(
                    "Restoring window geometry {}x{}",
                    geometry.width, geometry.height
                );
                commands.push(egui::ViewportCommand::InnerSize(egui::vec2(
                    geometry.width,
                    geometry.height,
                )));
                if let (Some(x), Some(y)) = (geometry.x, geometry.y) {
                    commands.push(egui::ViewportCommand::OuterPosition(egui::pos2(x, y)));
                }
            }
            None => commands.push(egui::ViewportCommand::InnerSize(DEFAULT_WINDOW_SIZE.into())),
        }
        if let Some(state) = self.window_state() {
            commands.push(egui::ViewportCommand::Maximized(state.maximized));
            commands.push(egui::ViewportCommand::Fullscreen(state.fullscreen));
        }
        commands
    }
}

/// Outer position and inner size, in logical points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: f32,
    pub height: f32,
}

impl WindowGeometry {
    fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 1.0 && self.height >= 1.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    pub maximized: bool,
    pub fullscreen: bool,
}

fn encode_blob<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_default()
}

fn decode_blob<T>(blob: &[u8], key: &str) -> Option<T>
where
    T: for<'de> Deserialize<'de> + Usable,
{
    if blob.is_empty() {
        debug!("No saved {key}");
        return None;
    }
    match serde_json::from_slice::<T>(blob) {
        Ok(value) if value.usable() => Some(value),
        Ok(_) => {
            warn!("Discarding unusable saved {key}");
            None
        }
        Err(e) => {
            warn!("Discarding unreadable saved {key}: {e}");
            None
        }
    }
}

trait Usable {
    fn usable(&self) -> bool;
}

impl Usable for WindowGeometry {
    fn usable(&self) -> bool {
        self.is_usable()
    }
}

impl Usable for WindowState {
    fn usable(&self) -> bool {
        true
    }
}

/// In-memory `eframe::Storage` for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStorage(std::collections::HashMap<String, String>);

#[cfg(test)]
impl eframe::Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.0.insert(key.to_string(), value);
    }

    fn flush(&mut self) {}
}
