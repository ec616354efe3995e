use std::time::Instant;

use eframe::egui;

use crate::config::{CONTROL_STRIP_HEIGHT, DEFAULT_WINDOW_SIZE, TICK_INTERVAL};
use crate::engine::PlaybackEngine;
use crate::types::layout::{WindowGeometry, WindowLayoutState, WindowState};
use crate::ui::player_window::{PlayerWindow, SLIDER_MAX};
use crate::ui::theme::apply_theme;
use crate::ui::ticker::Ticker;
use crate::ui::video_surface::VideoSurface;

pub struct PlayerApp<E: PlaybackEngine> {
    window: PlayerWindow<E>,
    surface: VideoSurface,
    ticker: Ticker,
    geometry: WindowGeometry,
    window_state: WindowState,
    /// Slider position chosen by the user, shown while dragging and after
    /// release until the next poll replaces it.
    slider_held: Option<u8>,
}

impl<E: PlaybackEngine> PlayerApp<E> {
    /// `layout` is what was restored from storage; it seeds the geometry
    /// written back on save until the viewport reports its own.
    pub fn new(window: PlayerWindow<E>, surface: VideoSurface, layout: &WindowLayoutState) -> Self {
        Self {
            window,
            surface,
            ticker: Ticker::new(TICK_INTERVAL, Instant::now()),
            geometry: layout.geometry().unwrap_or_else(default_geometry),
            window_state: layout.window_state().unwrap_or_default(),
            slider_held: None,
        }
    }

    /// Hook up to the running egui context and put the window back where
    /// `layout` left it.
    pub fn attach(&self, ctx: &egui::Context, layout: &WindowLayoutState) {
        apply_theme(ctx);
        self.surface.attach(ctx);
        for command in layout.restore_commands() {
            ctx.send_viewport_cmd(command);
        }
    }

    pub fn layout(&self) -> WindowLayoutState {
        WindowLayoutState::encode(&self.geometry, &self.window_state)
    }

    fn slider_position(&self) -> u8 {
        self.slider_held.unwrap_or(self.window.slider_value())
    }

    fn release_slider(&mut self, value: u8) {
        self.slider_held = Some(value);
        self.window.on_slider_released(value);
    }

    fn tick(&mut self) {
        if self.window.on_tick() {
            self.slider_held = None;
        }
    }

    fn capture_layout(&mut self, ctx: &egui::Context) {
        ctx.input(|i| {
            let viewport = i.viewport();
            let maximized = viewport.maximized.unwrap_or(false);
            let fullscreen = viewport.fullscreen.unwrap_or(false);
            self.window_state = WindowState {
                maximized,
                fullscreen,
            };
            // keep the restored (normal) geometry while maximized or fullscreen
            if maximized || fullscreen {
                return;
            }
            if let Some(inner) = viewport.inner_rect {
                let outer = viewport.outer_rect;
                self.geometry = WindowGeometry {
                    x: outer.map(|r| r.min.x),
                    y: outer.map(|r| r.min.y),
                    width: inner.width(),
                    height: inner.height(),
                };
            }
        });
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                if ui.button("Play").clicked() {
                    self.window.play();
                }
                if ui.button("Pause").clicked() {
                    self.window.pause();
                }
                if ui.button("Stop").clicked() {
                    self.window.stop();
                }
            });

            ui.horizontal(|ui| {
                ui.label(self.window.time_label());
                ui.add_space(20.0);

                let mut value = self.slider_position();
                ui.spacing_mut().slider_width = ui.available_width();
                let response =
                    ui.add(egui::Slider::new(&mut value, 0..=SLIDER_MAX).show_value(false));

                if response.dragged() {
                    self.slider_held = Some(value);
                }
                if response.drag_stopped() || (response.changed() && !response.dragged()) {
                    self.release_slider(value);
                }
            });
        });
    }
}

impl<E: PlaybackEngine> eframe::App for PlayerApp<E> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        if self.ticker.poll(now) {
            self.tick();
        }

        self.window.on_resize(ctx.screen_rect().size());
        self.surface.update_texture(ctx);
        self.capture_layout(ctx);

        egui::TopBottomPanel::bottom("controls")
            .exact_height(CONTROL_STRIP_HEIGHT)
            .show(ctx, |ui| self.controls(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                self.surface.show(ui, self.window.surface_rect());
            });

        ctx.request_repaint_after(self.ticker.until_next(now));
    }

    /// Called periodically and once more at shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.layout().save(storage);
    }
}

fn default_geometry() -> WindowGeometry {
    WindowGeometry {
        x: None,
        y: None,
        width: DEFAULT_WINDOW_SIZE[0],
        height: DEFAULT_WINDOW_SIZE[1],
    }
}

/// Initial viewport. Saved geometry is applied after creation through
/// [`PlayerApp::attach`], once eframe's storage is open.
pub fn viewport_for(title: &str) -> egui::ViewportBuilder {
    egui::ViewportBuilder::default()
        .with_title(title)
        .with_resizable(true)
        .with_inner_size(DEFAULT_WINDOW_SIZE)
}
