//! `ImageSource`: an encoded container that can be inspected and decoded.
//!
//! A source is either built from a complete byte stream (buffer, reader,
//! path, descriptor) and is immediately ready, or created incrementally and
//! fed with [`ImageSource::update_data`] until the final chunk seals it.
//!
//! ```text
//! Accumulating --update_data(is_final)--> Ready --release--> Released
//!       \______________________release__________________________/
//! ```

mod incremental;

use std::io::Read;
use std::path::Path;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::decode::{self, DecodeOptions, FrameTable};
use crate::encode::Packable;
use crate::error::ImageError;
use crate::format::{self, FormatId};
use crate::metadata::MetadataStore;
use crate::pixel::PixelMap;
use crate::types::ImageInfo;

use incremental::IncrementalAssembler;

/// Options for [`ImageSource::image_property`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyOptions {
    /// Frame the property is requested for; must exist.
    pub index: i32,
    /// Returned when the tag is absent.
    pub default_value: Option<String>,
}

/// A sealed, probed container.
#[derive(Debug)]
struct Container {
    bytes: Vec<u8>,
    format: FormatId,
    frames: FrameTable,
    metadata: MetadataStore,
}

impl Container {
    /// Identify and probe without taking ownership of the bytes.
    fn inspect(
        bytes: &[u8],
        config: &EngineConfig,
    ) -> Result<(FormatId, FrameTable, MetadataStore), ImageError> {
        let format = format::detect(bytes)?;
        let frames = decode::probe(bytes, format, config)?;
        let metadata = MetadataStore::from_container(bytes, format);

        log::info!(
            "opened {} source: {} bytes, {} frame(s), {} properties",
            format.mime_type(),
            bytes.len(),
            frames.len(),
            metadata.len()
        );
        Ok((format, frames, metadata))
    }

    fn parse(bytes: Vec<u8>, config: &EngineConfig) -> Result<Self, ImageError> {
        let (format, frames, metadata) = Self::inspect(&bytes, config)?;
        Ok(Self {
            bytes,
            format,
            frames,
            metadata,
        })
    }
}

#[derive(Debug)]
enum State {
    Accumulating(IncrementalAssembler),
    Ready(Container),
    Released,
}

/// Encoded image input.
#[derive(Debug)]
pub struct ImageSource {
    state: State,
    config: EngineConfig,
}

impl ImageSource {
    /// Open a complete in-memory container.
    ///
    /// # Errors
    ///
    /// - `ImageError::EmptyInput` for an empty slice
    /// - `ImageError::UnsupportedFormat` for an unrecognized signature
    /// - `ImageError::Codec` or `ImageError::Io` if the container is corrupt
    ///   or truncated
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        Self::from_bytes_with_config(bytes, EngineConfig::default())
    }

    pub fn from_bytes_with_config(bytes: &[u8], config: EngineConfig) -> Result<Self, ImageError> {
        Self::from_vec(bytes.to_vec(), config)
    }

    fn from_vec(bytes: Vec<u8>, config: EngineConfig) -> Result<Self, ImageError> {
        let container = Container::parse(bytes, &config)?;
        Ok(Self {
            state: State::Ready(container),
            config,
        })
    }

    /// Read a container to its end from `reader`. The reader is not closed.
    pub fn from_handle<R: Read>(mut reader: R) -> Result<Self, ImageError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| ImageError::Io(e.to_string()))?;
        Self::from_vec(bytes, EngineConfig::default())
    }

    /// Read a container from a file path. The extension is ignored.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| ImageError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_vec(bytes, EngineConfig::default())
    }

    /// Read a container from a caller-owned file descriptor.
    ///
    /// The descriptor is duplicated and read from its current offset; the
    /// caller's descriptor is never closed.
    #[cfg(unix)]
    pub fn from_fd(fd: std::os::unix::io::RawFd) -> Result<Self, ImageError> {
        use std::os::unix::io::BorrowedFd;

        if fd < 0 {
            return Err(ImageError::InvalidHandle(format!("negative descriptor {}", fd)));
        }
        // SAFETY: the descriptor is only used to make an owned duplicate; a
        // closed descriptor makes the duplication fail with EBADF.
        let borrowed = unsafe { BorrowedFd::borrow_raw(fd) };
        let owned = borrowed
            .try_clone_to_owned()
            .map_err(|e| ImageError::InvalidHandle(format!("descriptor {}: {}", fd, e)))?;
        Self::from_handle(std::fs::File::from(owned))
    }

    /// Start an empty source to be fed with [`update_data`](Self::update_data).
    ///
    /// `seed` only sizes the accumulator; its contents are not image data.
    pub fn create_incremental(seed: &[u8]) -> Self {
        Self::create_incremental_with_config(seed, EngineConfig::default())
    }

    pub fn create_incremental_with_config(seed: &[u8], config: EngineConfig) -> Self {
        Self {
            state: State::Accumulating(IncrementalAssembler::with_capacity(seed.len())),
            config,
        }
    }

    /// Append `chunk[offset..offset + length]`; `is_final` seals the stream.
    ///
    /// Returns `true` once the bytes are appended. When sealing fails to
    /// parse the container the error is returned and the source stays
    /// accumulating, so more data can be appended and sealing retried.
    ///
    /// # Errors
    ///
    /// - `ImageError::InvalidState` if the source is already sealed
    /// - `ImageError::Released` after `release`
    /// - `ImageError::OutOfRange` if the window leaves `chunk`
    /// - any container error from sealing
    pub fn update_data(
        &mut self,
        chunk: &[u8],
        is_final: bool,
        offset: u32,
        length: u32,
    ) -> Result<bool, ImageError> {
        let assembler = match &mut self.state {
            State::Accumulating(assembler) => assembler,
            State::Ready(_) => return Err(ImageError::InvalidState("source is already sealed")),
            State::Released => return Err(ImageError::Released),
        };

        assembler.append(chunk, offset, length)?;
        if !is_final {
            return Ok(true);
        }

        let (format, frames, metadata) = match Container::inspect(assembler.bytes(), &self.config) {
            Ok(parts) => parts,
            Err(e) => {
                log::warn!(
                    "sealing incremental {} source after {} bytes failed: {}",
                    assembler
                        .detected()
                        .map_or("unidentified", FormatId::mime_type),
                    assembler.len(),
                    e
                );
                return Err(e);
            }
        };

        let bytes = std::mem::take(assembler).into_bytes();
        self.state = State::Ready(Container {
            bytes,
            format,
            frames,
            metadata,
        });
        Ok(true)
    }

    fn container(&self) -> Result<&Container, ImageError> {
        match &self.state {
            State::Ready(container) => Ok(container),
            State::Accumulating(_) => Err(ImageError::InvalidState(
                "source is still accumulating data",
            )),
            State::Released => Err(ImageError::Released),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    pub fn is_released(&self) -> bool {
        matches!(self.state, State::Released)
    }

    /// Detected container format.
    pub fn format(&self) -> Result<FormatId, ImageError> {
        Ok(self.container()?.format)
    }

    pub fn frame_count(&self) -> Result<u32, ImageError> {
        Ok(self.container()?.frames.len())
    }

    /// Natural, unrotated geometry of frame `index`.
    pub fn image_info(&self, index: i32) -> Result<ImageInfo, ImageError> {
        let (width, height) = self.container()?.frames.get(index as i64)?;
        Ok(ImageInfo::new(width, height))
    }

    /// Look up an EXIF property by tag name, e.g. `"BitsPerSample"`.
    ///
    /// # Errors
    ///
    /// - `ImageError::InvalidIndex` if `opts.index` addresses no frame
    /// - `ImageError::PropertyNotFound` if the tag is absent and no default
    ///   was given
    pub fn image_property(
        &self,
        tag: &str,
        opts: Option<&PropertyOptions>,
    ) -> Result<String, ImageError> {
        let container = self.container()?;
        let index = opts.map_or(0, |o| o.index);
        container.frames.get(index as i64)?;
        let fallback = opts.and_then(|o| o.default_value.as_deref());
        container.metadata.get(tag, fallback)
    }

    /// Decode a frame into a new pixel map. `None` is the default decode.
    pub fn create_pixel_map(&self, opts: Option<&DecodeOptions>) -> Result<PixelMap, ImageError> {
        let container = self.container()?;
        let default_opts = DecodeOptions::default();
        let opts = opts.unwrap_or(&default_opts);
        decode::create_pixel_map(
            &container.bytes,
            container.format,
            &container.frames,
            opts,
            &self.config,
        )
    }

    /// Decodable MIME types.
    pub fn supported_formats() -> Vec<&'static str> {
        format::supported_decode_mime_types()
    }

    /// Drop the bytes and metadata. Idempotent.
    pub fn release(&mut self) {
        if !self.is_released() {
            self.state = State::Released;
            log::debug!("released image source");
        }
    }
}

impl Packable for ImageSource {
    fn packing_image(&self) -> Result<RgbaImage, ImageError> {
        let container = self.container()?;
        decode::decode_frame(&container.bytes, container.format, 0)
    }
}
