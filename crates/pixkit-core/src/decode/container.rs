//! Per-container probing and frame decoding through the `image` codecs.

use std::io::Cursor;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageDecoder, ImageReader, RgbaImage};

use crate::config::EngineConfig;
use crate::error::ImageError;
use crate::format::FormatId;

/// Natural geometry of every frame in a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTable {
    frames: Vec<(u32, u32)>,
}

impl FrameTable {
    pub fn len(&self) -> u32 {
        self.frames.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Geometry of frame `index`, or `InvalidIndex`.
    pub fn get(&self, index: i64) -> Result<(u32, u32), ImageError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.frames.get(i).copied())
            .ok_or(ImageError::InvalidIndex {
                index,
                frame_count: self.len(),
            })
    }
}

/// Read frame count and geometry without keeping decoded pixels.
///
/// Every frame is decoded once after the pixel cap is checked, so a
/// container that probes successfully also decodes. Every GIF frame reports
/// the full canvas size.
///
/// # Errors
///
/// - `ImageError::Codec` or `ImageError::Io` if the container is corrupt or
///   truncated
/// - `ImageError::ResourceLimit` if a frame exceeds the configured pixel cap
pub fn probe(bytes: &[u8], format: FormatId, config: &EngineConfig) -> Result<FrameTable, ImageError> {
    let frames = match format {
        FormatId::Gif => {
            let decoder = GifDecoder::new(Cursor::new(bytes))?;
            let (width, height) = decoder.dimensions();
            config.check_pixels(width, height)?;

            let mut count = 0usize;
            for frame in decoder.into_frames() {
                frame?;
                count += 1;
            }
            if count == 0 {
                return Err(ImageError::Codec("GIF contains no frames".to_string()));
            }
            vec![(width, height); count]
        }
        FormatId::Jpeg | FormatId::Png | FormatId::Bmp => {
            let (width, height) =
                ImageReader::with_format(Cursor::new(bytes), format.image_format()).into_dimensions()?;
            config.check_pixels(width, height)?;
            decode_frame(bytes, format, 0)?;
            vec![(width, height)]
        }
    };

    if frames.iter().any(|&(w, h)| w == 0 || h == 0) {
        return Err(ImageError::Codec("frame has zero area".to_string()));
    }

    log::debug!(
        "probed {} container: {} frame(s), first {}x{}",
        format.mime_type(),
        frames.len(),
        frames[0].0,
        frames[0].1
    );

    Ok(FrameTable { frames })
}

/// Decode frame `index` to 8-bit RGBA at natural size.
pub fn decode_frame(bytes: &[u8], format: FormatId, index: usize) -> Result<RgbaImage, ImageError> {
    match format {
        FormatId::Gif => {
            let decoder = GifDecoder::new(Cursor::new(bytes))?;
            let frame = decoder
                .into_frames()
                .nth(index)
                .ok_or_else(|| ImageError::Codec(format!("GIF frame {} missing", index)))??;
            Ok(frame.into_buffer())
        }
        FormatId::Jpeg | FormatId::Png | FormatId::Bmp => {
            let img = image::load_from_memory_with_format(bytes, format.image_format())?;
            Ok(img.into_rgba8())
        }
    }
}
