//! EXIF orientation handling for decoded photos.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{In, Tag};
use image::DynamicImage;
use tracing::debug;

use crate::error::{MediaPickError, Result};

/// The eight EXIF orientations, named by the transform that uprights the
/// stored pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Identity,
    FlipH,
    Rotate180,
    FlipV,
    Transpose,
    Rotate90,
    Transverse,
    Rotate270,
}

impl Orientation {
    /// Map an EXIF orientation tag value (1-8).
    pub fn from_exif(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::Identity),
            2 => Some(Self::FlipH),
            3 => Some(Self::Rotate180),
            4 => Some(Self::FlipV),
            5 => Some(Self::Transpose),
            6 => Some(Self::Rotate90),
            7 => Some(Self::Transverse),
            8 => Some(Self::Rotate270),
            _ => None,
        }
    }

    /// True when uprighting exchanges width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }

    pub fn apply(self, image: DynamicImage) -> DynamicImage {
        match self {
            Self::Identity => image,
            Self::FlipH => image.fliph(),
            Self::Rotate180 => image.rotate180(),
            Self::FlipV => image.flipv(),
            Self::Transpose => image.rotate90().fliph(),
            Self::Rotate90 => image.rotate90(),
            Self::Transverse => image.rotate270().fliph(),
            Self::Rotate270 => image.rotate270(),
        }
    }
}

/// Read the orientation tag of the file at `path`.
///
/// Files without EXIF data, or in containers EXIF cannot live in, are
/// upright.
pub fn read_orientation(path: &Path) -> Result<Orientation> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let exif = match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) | Err(exif::Error::InvalidFormat(_)) => {
            return Ok(Orientation::Identity);
        }
        Err(e) => return Err(MediaPickError::Exif(e.to_string())),
    };

    let orientation = exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .and_then(Orientation::from_exif)
        .unwrap_or_default();
    debug!(?orientation, path = %path.display(), "EXIF orientation");
    Ok(orientation)
}
