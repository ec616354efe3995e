use eframe::egui;
use log::{debug, trace};

use crate::config::CONTROL_STRIP_HEIGHT;
use crate::engine::PlaybackEngine;

pub const SLIDER_MAX: u8 = 100;

/// Toolkit-independent part of the player window: the slider and label it
/// shows, and the surface rectangle the video is drawn into.
///
/// Slider and label only ever change from a poll, so
/// they always reflect the last thing the engine reported.
pub struct PlayerWindow<E: PlaybackEngine> {
    engine: E,
    slider_value: u8,
    time_label: String,
    surface_rect: egui::Rect,
}

impl<E: PlaybackEngine> PlayerWindow<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            slider_value: 0,
            time_label: format_time(0),
            surface_rect: egui::Rect::NOTHING,
        }
    }

    pub fn slider_value(&self) -> u8 {
        self.slider_value
    }

    pub fn time_label(&self) -> &str {
        &self.time_label
    }

    pub fn surface_rect(&self) -> egui::Rect {
        self.surface_rect
    }

    pub fn play(&mut self) {
        debug!("Play");
        self.engine.play();
    }

    pub fn pause(&mut self) {
        debug!("Pause");
        self.engine.pause();
    }

    pub fn stop(&mut self) {
        debug!("Stop");
        self.engine.stop();
    }

    #[cfg(test)]
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// User let go of the slider at `value`. Only the engine moves; the
    /// slider keeps its polled value until the next tick.
    pub fn on_slider_released(&mut self, value: u8) {
        let value = value.min(SLIDER_MAX);
        let fraction = f64::from(value) / f64::from(SLIDER_MAX);
        debug!("Seek to {fraction:.2}");
        self.engine.seek_fraction(fraction);
    }

    /// Periodic poll. Does nothing unless the engine reports playing;
    /// returns whether slider and label were refreshed.
    pub fn on_tick(&mut self) -> bool {
        if !self.engine.is_playing() {
            return false;
        }
        let fraction = self.engine.position_fraction().clamp(0.0, 1.0);
        self.slider_value = (fraction * f64::from(SLIDER_MAX)).round() as u8;
        self.time_label = format_time(self.engine.elapsed_millis() / 1000);
        trace!("Tick: slider={} time={}", self.slider_value, self.time_label);
        true
    }

    /// Re-lay the surface for a window of `window_size`. Returns whether it moved.
    pub fn on_resize(&mut self, window_size: egui::Vec2) -> bool {
        let rect = surface_rect_for(window_size);
        if rect == self.surface_rect {
            return false;
        }
        debug!("Video surface resized to {}x{}", rect.width(), rect.height());
        self.surface_rect = rect;
        true
    }
}

/// `HH:MM:SS`, hours not wrapped at 24.
pub fn format_time(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Whole window width, everything above the control strip.
pub fn surface_rect_for(window_size: egui::Vec2) -> egui::Rect {
    let height = (window_size.y - CONTROL_STRIP_HEIGHT).max(0.0);
    egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(window_size.x.max(0.0), height))
}

/// Largest rect with `aspect` (width / height) centered in `bounds`.
pub fn letterbox(bounds: egui::Rect, aspect: f32) -> egui::Rect {
    if bounds.height() <= 0.0 || bounds.width() <= 0.0 || !aspect.is_finite() || aspect <= 0.0 {
        return bounds;
    }
    let size = if bounds.width() / bounds.height() > aspect {
        egui::vec2(bounds.height() * aspect, bounds.height())
    } else {
        egui::vec2(bounds.width(), bounds.width() / aspect)
    };
    egui::Rect::from_center_size(bounds.center(), size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Play,
        Pause,
        Stop,
        Seek(f64),
    }

    #[derive(Default)]
    struct FakeEngine {
        calls: Vec<Call>,
        playing: bool,
        fraction: f64,
        millis: u64,
    }

    impl PlaybackEngine for FakeEngine {
        fn play(&mut self) {
            self.calls.push(Call::Play);
        }

        fn pause(&mut self) {
            self.calls.push(Call::Pause);
        }

        fn stop(&mut self) {
            self.calls.push(Call::Stop);
        }

        fn seek_fraction(&mut self, fraction: f64) {
            self.calls.push(Call::Seek(fraction));
        }

        fn is_playing(&self) -> bool {
            self.playing
        }

        fn position_fraction(&self) -> f64 {
            self.fraction
        }

        fn elapsed_millis(&self) -> u64 {
            self.millis
        }
    }

    #[test]
    fn format_time_pads_and_does_not_wrap_hours() {
        assert_eq!(format_time(0), "00:00:00");
        assert_eq!(format_time(59), "00:00:59");
        assert_eq!(format_time(3661), "01:01:01");
        assert_eq!(format_time(86_400), "24:00:00");
        assert_eq!(format_time(360_000), "100:00:00");
    }

    #[test]
    fn slider_release_seeks_to_value_over_100() {
        let mut window = PlayerWindow::new(FakeEngine::default());
        for value in 0..=100u8 {
            window.on_slider_released(value);
            assert_eq!(window.slider_value(), 0);
        }
        let expected: Vec<Call> = (0..=100u8)
            .map(|v| Call::Seek(f64::from(v) / 100.0))
            .collect();
        assert_eq!(window.engine.calls, expected);
    }

    #[test]
    fn tick_while_not_playing_changes_nothing() {
        let mut window = PlayerWindow::new(FakeEngine {
            playing: true,
            fraction: 0.25,
            millis: 61_000,
            ..Default::default()
        });
        assert!(window.on_tick());
        assert_eq!(window.slider_value(), 25);
        assert_eq!(window.time_label(), "00:01:01");

        window.engine.playing = false;
        window.engine.fraction = 0.9;
        window.engine.millis = 999_000;
        assert!(!window.on_tick());
        assert_eq!(window.slider_value(), 25);
        assert_eq!(window.time_label(), "00:01:01");
    }

    #[test]
    fn tick_while_playing_reflects_engine() {
        let mut window = PlayerWindow::new(FakeEngine {
            playing: true,
            fraction: 0.5,
            millis: 5000,
            ..Default::default()
        });
        assert_eq!(window.time_label(), "00:00:00");
        window.on_tick();
        assert_eq!(window.slider_value(), 50);
        assert_eq!(window.time_label(), "00:00:05");
    }

    #[test]
    fn tick_rounds_fraction() {
        let mut window = PlayerWindow::new(FakeEngine {
            playing: true,
            fraction: 0.996,
            millis: 1999,
            ..Default::default()
        });
        window.on_tick();
        assert_eq!(window.slider_value(), 100);
        assert_eq!(window.time_label(), "00:00:01");
    }

    #[test]
    fn buttons_forward_to_engine() {
        let mut window = PlayerWindow::new(FakeEngine::default());
        window.play();
        window.pause();
        window.stop();
        assert_eq!(window.engine.calls, vec![Call::Play, Call::Pause, Call::Stop]);
    }

    #[test]
    fn surface_fills_window_above_control_strip() {
        let mut window = PlayerWindow::new(FakeEngine::default());
        assert!(window.on_resize(egui::vec2(800.0, 600.0)));
        assert_eq!(
            window.surface_rect(),
            egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 500.0))
        );
        assert!(!window.on_resize(egui::vec2(800.0, 600.0)));

        window.on_resize(egui::vec2(300.0, 80.0));
        assert_eq!(window.surface_rect().height(), 0.0);
    }

    #[test]
    fn letterbox_keeps_aspect() {
        let bounds = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 500.0));
        let fitted = letterbox(bounds, 2.0);
        assert_eq!(fitted.width(), 800.0);
        assert_eq!(fitted.height(), 400.0);
        assert_eq!(fitted.center(), bounds.center());

        let tall = letterbox(bounds, 1.0);
        assert_eq!(tall.size(), egui::vec2(500.0, 500.0));
    }
}
