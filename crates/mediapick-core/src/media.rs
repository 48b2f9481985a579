use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Broad kind of a picked media item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    /// Classify by file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<MediaKind> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "webp" | "tif" | "tiff" | "heic"
            | "heif" => Some(MediaKind::Image),
            "mp4" | "mov" | "m4v" | "3gp" | "webm" | "mkv" => Some(MediaKind::Video),
            "mp3" | "m4a" | "aac" | "wav" | "ogg" | "flac" | "opus" => Some(MediaKind::Audio),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::Audio => write!(f, "audio"),
        }
    }
}

/// What a finished picker session hands back to its caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaResult {
    pub locator: PathBuf,
    pub width: u32,
    pub height: u32,
    pub kind: MediaKind,
    /// Only set for time-based media.
    pub duration_ms: Option<u64>,
}

impl MediaResult {
    pub fn image(locator: PathBuf, width: u32, height: u32) -> Self {
        Self {
            locator,
            width,
            height,
            kind: MediaKind::Image,
            duration_ms: None,
        }
    }
}
