//! GStreamer-backed playback session: one `playbin` bound to one media file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_pbutils as gst_pbutils;
use gstreamer_video as gst_video;
use log::{debug, error, info, warn};

use crate::engine::PlaybackEngine;
use crate::error::EngineInitError;
use crate::renderer::frame_slot::{FrameSlot, VideoFrame, VideoSurfaceHandleProvider};

const DISCOVER_TIMEOUT_SECS: u64 = 5;

pub struct GstPlaybackEngine {
    playbin: gst::Element,
    uri: String,
    eos: Arc<AtomicBool>,
}

impl GstPlaybackEngine {
    /// Open `path` and bind the player's video output to `surface`.
    pub fn new(
        path: &Path,
        surface: &impl VideoSurfaceHandleProvider,
    ) -> Result<Self, EngineInitError> {
        let uri = media_uri(path)?;

        gst::init().map_err(EngineInitError::Init)?;
        discover(&uri)?;

        let playbin = gst::ElementFactory::make("playbin")
            .name("player")
            .property("uri", &uri)
            .build()
            .map_err(|_| EngineInitError::MissingElement("playbin"))?;

        let sink = frame_sink(surface.render_target());
        playbin.set_property("video-sink", &sink);

        let eos = Arc::new(AtomicBool::new(false));
        if let Some(bus) = playbin.bus() {
            let eos = eos.clone();
            bus.set_sync_handler(move |_bus, msg| {
                log_bus_message(msg, &eos);
                gst::BusSyncReply::Drop
            });
        }

        playbin.set_state(gst::State::Ready)?;
        info!("Opened {uri}");

        Ok(Self { playbin, uri, eos })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    fn set_state(&self, state: gst::State) {
        if let Err(e) = self.playbin.set_state(state) {
            warn!("Failed to set player to {state:?}: {e}");
        }
    }
}

impl PlaybackEngine for GstPlaybackEngine {
    fn play(&mut self) {
        if self.eos.swap(false, Ordering::SeqCst) {
            // restart from the top after end-of-stream
            self.set_state(gst::State::Ready);
        }
        self.set_state(gst::State::Playing);
    }

    fn pause(&mut self) {
        self.set_state(gst::State::Paused);
    }

    fn stop(&mut self) {
        self.eos.store(false, Ordering::SeqCst);
        self.set_state(gst::State::Ready);
    }

    fn seek_fraction(&mut self, fraction: f64) {
        let Some(duration) = self.playbin.query_duration::<gst::ClockTime>() else {
            debug!("Seek to {fraction:.2} ignored, duration unknown");
            return;
        };
        let target = gst::ClockTime::from_nseconds((duration.nseconds() as f64 * fraction) as u64);
        match self
            .playbin
            .seek_simple(gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT, target)
        {
            Ok(()) => self.eos.store(false, Ordering::SeqCst),
            Err(e) => warn!("Seek to {target} failed: {e}"),
        }
    }

    fn is_playing(&self) -> bool {
        !self.eos.load(Ordering::SeqCst) && self.playbin.current_state() == gst::State::Playing
    }

    fn position_fraction(&self) -> f64 {
        let position = self.playbin.query_position::<gst::ClockTime>();
        let duration = self.playbin.query_duration::<gst::ClockTime>();
        match (position, duration) {
            (Some(pos), Some(dur)) if dur.nseconds() > 0 => {
                pos.nseconds() as f64 / dur.nseconds() as f64
            }
            _ => 0.0,
        }
    }

    fn elapsed_millis(&self) -> u64 {
        self.playbin
            .query_position::<gst::ClockTime>()
            .map(|p| p.mseconds())
            .unwrap_or(0)
    }
}

impl Drop for GstPlaybackEngine {
    fn drop(&mut self) {
        self.set_state(gst::State::Null);
    }
}

fn media_uri(path: &Path) -> Result<String, EngineInitError> {
    let absolute: PathBuf =
        std::fs::canonicalize(path).map_err(|source| EngineInitError::MediaNotFound {
            path: path.to_path_buf(),
            source,
        })?;
    gst::glib::filename_to_uri(&absolute, None)
        .map(|uri| uri.to_string())
        .map_err(|source| EngineInitError::InvalidUri {
            path: absolute,
            source,
        })
}

/// Probe the resource before building the player so unreadable files fail
/// construction instead of the first `play()`.
fn discover(uri: &str) -> Result<(), EngineInitError> {
    let open_error = |reason: String| EngineInitError::MediaOpen {
        uri: uri.to_string(),
        reason,
    };
    let discoverer =
        gst_pbutils::Discoverer::new(gst::ClockTime::from_seconds(DISCOVER_TIMEOUT_SECS))
            .map_err(|e| open_error(e.to_string()))?;
    let info = discoverer
        .discover_uri(uri)
        .map_err(|e| open_error(e.to_string()))?;

    let video = info.video_streams().len();
    let audio = info.audio_streams().len();
    if video == 0 && audio == 0 {
        return Err(open_error("no audio or video streams".to_string()));
    }
    debug!(
        "Discovered {uri}: {video} video / {audio} audio streams, duration {:?}",
        info.duration()
    );
    Ok(())
}

/// RGBA appsink that publishes every decoded frame into `slot`.
fn frame_sink(slot: FrameSlot) -> gst_app::AppSink {
    let sink = gst_app::AppSink::builder()
        .caps(
            &gst_video::VideoCapsBuilder::new()
                .format(gst_video::VideoFormat::Rgba)
                .build(),
        )
        .max_buffers(1)
        .drop(true)
        .build();

    let preroll_slot = slot.clone();
    sink.set_callbacks(
        gst_app::AppSinkCallbacks::builder()
            .new_sample(move |sink| {
                let sample = sink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
                publish_sample(&sample, &slot);
                Ok(gst::FlowSuccess::Ok)
            })
            .new_preroll(move |sink| {
                let sample = sink.pull_preroll().map_err(|_| gst::FlowError::Eos)?;
                publish_sample(&sample, &preroll_slot);
                Ok(gst::FlowSuccess::Ok)
            })
            .build(),
    );
    sink
}

fn publish_sample(sample: &gst::Sample, slot: &FrameSlot) {
    let (Some(buffer), Some(caps)) = (sample.buffer(), sample.caps()) else {
        return;
    };
    let Ok(info) = gst_video::VideoInfo::from_caps(caps) else {
        warn!("Sample without video caps");
        return;
    };
    let Ok(map) = buffer.map_readable() else {
        return;
    };
    let stride = info.stride()[0].max(0) as usize;
    match VideoFrame::from_strided(map.as_slice(), info.width(), info.height(), stride) {
        Some(frame) => slot.publish(frame),
        None => warn!(
            "Short frame buffer: {} bytes for {}x{}",
            map.size(),
            info.width(),
            info.height()
        ),
    }
}

fn log_bus_message(msg: &gst::Message, eos: &AtomicBool) {
    use gst::MessageView;

    match msg.view() {
        MessageView::Eos(..) => {
            info!("End of stream");
            eos.store(true, Ordering::SeqCst);
        }
        MessageView::Error(err) => {
            error!(
                "Player error from {:?}: {} ({:?})",
                err.src().map(|s| s.path_string()),
                err.error(),
                err.debug()
            );
        }
        MessageView::Warning(w) => {
            warn!("Player warning: {} ({:?})", w.error(), w.debug());
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullSurface(FrameSlot);

    impl VideoSurfaceHandleProvider for NullSurface {
        fn render_target(&self) -> FrameSlot {
            self.0.clone()
        }
    }

    #[test]
    fn missing_media_fails_construction() {
        let surface = NullSurface(FrameSlot::new());
        let result = GstPlaybackEngine::new(Path::new("/nonexistent/reelview/clip.mp4"), &surface);
        assert!(matches!(result, Err(EngineInitError::MediaNotFound { .. })));
    }

    #[test]
    fn non_media_file_fails_construction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"this is not a video\x00\x01\x02").unwrap();

        let surface = NullSurface(FrameSlot::new());
        let result = GstPlaybackEngine::new(&path, &surface);
        assert!(matches!(result, Err(EngineInitError::MediaOpen { .. })));
    }

    #[test]
    fn media_uri_is_absolute_file_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"").unwrap();

        let uri = media_uri(&path).unwrap();
        assert!(uri.starts_with("file://"));
        assert!(uri.ends_with("clip.mp4"));
    }
}
