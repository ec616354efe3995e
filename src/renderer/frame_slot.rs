use std::sync::{Arc, Mutex};

/// One decoded RGBA frame.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl VideoFrame {
    /// Copy tightly packed RGBA rows out of a strided plane.
    pub fn from_strided(plane: &[u8], width: u32, height: u32, stride: usize) -> Option<Self> {
        let row_len = width as usize * 4;
        if stride < row_len || plane.len() < stride * (height as usize).saturating_sub(1) + row_len {
            return None;
        }
        let mut data = Vec::with_capacity(row_len * height as usize);
        for row in plane.chunks(stride).take(height as usize) {
            data.extend_from_slice(&row[..row_len]);
        }
        Some(Self {
            data,
            width,
            height,
        })
    }

    pub fn aspect_ratio(&self) -> Option<f32> {
        (self.height > 0).then(|| self.width as f32 / self.height as f32)
    }
}

type RepaintHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct SlotInner {
    frame: Option<VideoFrame>,
    repaint: Option<RepaintHook>,
}

/// Latest-frame mailbox between the engine's streaming thread and the UI.
///
/// The engine overwrites the frame; the UI takes it at most once per publish.
#[derive(Clone, Default)]
pub struct FrameSlot {
    inner: Arc<Mutex<SlotInner>>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called after every publish so the UI loop wakes up.
    pub fn set_repaint_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.repaint = Some(Arc::new(hook));
        }
    }

    pub fn publish(&self, frame: VideoFrame) {
        let hook = match self.inner.lock() {
            Ok(mut inner) => {
                inner.frame = Some(frame);
                inner.repaint.clone()
            }
            Err(_) => return,
        };
        // outside the lock: the hook may re-enter the UI
        if let Some(hook) = hook {
            hook();
        }
    }

    /// The frame published since the last call, if any.
    pub fn take_fresh(&self) -> Option<VideoFrame> {
        self.inner.lock().ok()?.frame.take()
    }
}

/// Capability handed to the engine so it can find where to render without
/// knowing the GUI toolkit.
pub trait VideoSurfaceHandleProvider {
    fn render_target(&self) -> FrameSlot;
}
