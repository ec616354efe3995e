use eframe::egui;

use crate::renderer::frame_slot::{FrameSlot, VideoFrame, VideoSurfaceHandleProvider};
use crate::ui::player_window::letterbox;

/// Widget the engine renders into: frames land in a shared slot and are
/// uploaded to an egui texture on the UI thread.
pub struct VideoSurface {
    slot: FrameSlot,
    texture: Option<egui::TextureHandle>,
    aspect: Option<f32>,
}

impl VideoSurface {
    pub fn new() -> Self {
        Self {
            slot: FrameSlot::new(),
            texture: None,
            aspect: None,
        }
    }

    /// Wake the UI whenever the engine publishes a frame.
    pub fn attach(&self, ctx: &egui::Context) {
        let ctx = ctx.clone();
        self.slot.set_repaint_hook(move || ctx.request_repaint());
    }

    /// Upload the newest frame, if one arrived since the last call.
    pub fn update_texture(&mut self, ctx: &egui::Context) {
        let Some(frame) = self.slot.take_fresh() else {
            return;
        };
        self.aspect = frame.aspect_ratio();
        let image = color_image(&frame);
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ctx.load_texture("video_surface", image, egui::TextureOptions::LINEAR));
            }
        }
    }

    /// Paint the surface into `rect`: black fill, frame letterboxed on top.
    pub fn show(&self, ui: &mut egui::Ui, rect: egui::Rect) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::BLACK);
        if let (Some(texture), Some(aspect)) = (&self.texture, self.aspect) {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), letterbox(rect, aspect), uv, egui::Color32::WHITE);
        }
    }
}

impl Default for VideoSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoSurfaceHandleProvider for VideoSurface {
    fn render_target(&self) -> FrameSlot {
        self.slot.clone()
    }
}

fn color_image(frame: &VideoFrame) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [frame.width as usize, frame.height as usize],
        &frame.data,
    )
}
