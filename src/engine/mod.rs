pub mod gst_engine;

pub use gst_engine::GstPlaybackEngine;

/// The operations the player window drives.
///
/// Commands are fire-and-forget; queries report whatever the engine says
/// right now.
pub trait PlaybackEngine {
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    /// Seek to `fraction` of the total duration (0.0..=1.0).
    fn seek_fraction(&mut self, fraction: f64);

    fn is_playing(&self) -> bool;
    /// Playback position as a fraction of the duration, 0.0 when unknown.
    fn position_fraction(&self) -> f64;
    fn elapsed_millis(&self) -> u64;
}
