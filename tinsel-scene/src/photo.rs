//! This module handles photo ingestion. Photos are decoded off the animation loop and then handed
//! to the scene through its inbox.

use crate::{SceneCommand, SceneHandle};
use image::{Rgba, RgbaImage};
use std::{fmt, io, path::PathBuf, thread};
use thiserror::Error;
use tinsel_particles::PhotoImage;
use tracing::{debug, instrument, warn};

/// The side length of the placeholder photo in pixels.
const PLACEHOLDER_SIZE: u32 = 512;

/// The width of the gold border on the placeholder photo.
const PLACEHOLDER_BORDER: u32 = 24;

/// The height of the gold band across the middle of the placeholder photo.
const PLACEHOLDER_BAND: u32 = 60;

/// An error that can be returned when decoding a photo.
#[derive(Debug, Error)]
pub enum PhotoError {
    /// The photo file couldn't be read.
    #[error("Failed to read photo: {0}")]
    Io(#[from] io::Error),

    /// The bytes weren't a supported image.
    #[error("Failed to decode photo: {0}")]
    Decode(#[from] image::ImageError),
}

/// A photo to be added to the scene, in whatever form it arrived in.
#[derive(Clone, PartialEq)]
pub enum PhotoPayload {
    /// The encoded bytes of an image file in any format the `image` crate understands.
    Encoded(Vec<u8>),

    /// A path to an image file, from a file picker or drag and drop.
    File(PathBuf),

    /// An image that has already been decoded.
    Decoded(RgbaImage),
}

impl fmt::Debug for PhotoPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoded(bytes) => write!(f, "Encoded({} bytes)", bytes.len()),
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Decoded(image) => write!(f, "Decoded({}x{})", image.width(), image.height()),
        }
    }
}

/// Decode the payload into an image ready for the scene.
pub fn decode_payload(payload: PhotoPayload) -> Result<PhotoImage, PhotoError> {
    let image = match payload {
        PhotoPayload::Encoded(bytes) => image::load_from_memory(&bytes)?.into_rgba8(),
        PhotoPayload::File(path) => {
            let bytes = std::fs::read(path)?;
            image::load_from_memory(&bytes)?.into_rgba8()
        }
        PhotoPayload::Decoded(image) => image,
    };

    Ok(PhotoImage::new(image))
}

/// A dark panel with a gold border and a gold band across the middle, used as the first photo so
/// that focus mode always has something to show.
pub fn placeholder_photo() -> RgbaImage {
    const DARK: Rgba<u8> = Rgba([0x11, 0x11, 0x11, 0xff]);
    const GOLD: Rgba<u8> = Rgba([0xd4, 0xaf, 0x37, 0xff]);

    let band_start = (PLACEHOLDER_SIZE - PLACEHOLDER_BAND) / 2;
    let band = band_start..band_start + PLACEHOLDER_BAND;
    let inner = PLACEHOLDER_BORDER..PLACEHOLDER_SIZE - PLACEHOLDER_BORDER;

    RgbaImage::from_fn(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, |x, y| {
        let in_border = !inner.contains(&x) || !inner.contains(&y);
        let in_band = band.contains(&y) && inner.contains(&x);

        if in_border || in_band {
            GOLD
        } else {
            DARK
        }
    })
}

impl SceneHandle {
    /// Decode the photo on a background thread and then append it to the scene on the next tick.
    ///
    /// Failures are logged and otherwise ignored. The returned handle can be joined to wait for
    /// the decode to finish. An already decoded image is queued immediately and gets no thread.
    #[instrument(skip(self))]
    pub fn add_photo_to_scene(&self, payload: PhotoPayload) -> Option<thread::JoinHandle<()>> {
        if let PhotoPayload::Decoded(image) = payload {
            self.send(SceneCommand::AppendPhoto(PhotoImage::new(image)));
            return None;
        }

        let handle = self.clone();

        let spawned = thread::Builder::new()
            .name("photo-decode".to_string())
            .spawn(move || match decode_payload(payload) {
                Ok(photo) => {
                    debug!(?photo, "Decoded photo");
                    handle.send(SceneCommand::AppendPhoto(photo));
                }
                Err(error) => warn!(%error, "Failed to add photo to scene"),
            });

        match spawned {
            Ok(join_handle) => Some(join_handle),
            Err(error) => {
                warn!(%error, "Failed to spawn photo decode thread");
                None
            }
        }
    }
}
