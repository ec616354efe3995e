use std::path::PathBuf;

use gstreamer as gst;
use thiserror::Error;

/// Failures while opening the media engine or binding the media resource.
#[derive(Debug, Error)]
pub enum EngineInitError {
    #[error("cannot open media file {}: {source}", path.display())]
    MediaNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot convert {} to a media URI: {source}", path.display())]
    InvalidUri {
        path: PathBuf,
        #[source]
        source: gst::glib::Error,
    },
    #[error("failed to initialize GStreamer: {0}")]
    Init(#[source] gst::glib::Error),
    #[error("GStreamer element '{0}' is not available")]
    MissingElement(&'static str),
    #[error("cannot open media {uri}: {reason}")]
    MediaOpen { uri: String, reason: String },
    #[error("player refused to change state: {0}")]
    StateChange(#[from] gst::StateChangeError),
}

/// Process-level failures. Both end in a dialog and exit status 1.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Usage(String),
    #[error("{0:#}")]
    Initialization(#[from] anyhow::Error),
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        1
    }

    pub fn title(&self) -> &'static str {
        "Error"
    }
}
