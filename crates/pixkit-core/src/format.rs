//! Container format identification by magic bytes.
//!
//! The supported lists are process-wide constants. Detection never looks at
//! file names; a JPEG stored as `photo.123` is still a JPEG.

use image::ImageFormat;

use crate::error::ImageError;

/// Container formats the engine can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatId {
    Jpeg,
    Png,
    Bmp,
    Gif,
}

/// Decodable formats, in capability-report order.
const DECODE_FORMATS: [FormatId; 4] = [FormatId::Jpeg, FormatId::Png, FormatId::Bmp, FormatId::Gif];

/// Encodable formats, in capability-report order.
const ENCODE_FORMATS: [FormatId; 2] = [FormatId::Jpeg, FormatId::Png];

impl FormatId {
    /// MIME type for this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            FormatId::Jpeg => "image/jpeg",
            FormatId::Png => "image/png",
            FormatId::Bmp => "image/bmp",
            FormatId::Gif => "image/gif",
        }
    }

    /// Look up a format by exact MIME type.
    pub fn from_mime_type(mime: &str) -> Option<FormatId> {
        DECODE_FORMATS
            .iter()
            .copied()
            .find(|format| format.mime_type() == mime)
    }

    /// The image crate's codec identifier.
    pub(crate) fn image_format(self) -> ImageFormat {
        match self {
            FormatId::Jpeg => ImageFormat::Jpeg,
            FormatId::Png => ImageFormat::Png,
            FormatId::Bmp => ImageFormat::Bmp,
            FormatId::Gif => ImageFormat::Gif,
        }
    }
}

/// Identify the container format from its leading bytes.
///
/// # Errors
///
/// - `ImageError::EmptyInput` for an empty slice
/// - `ImageError::UnsupportedFormat` for any signature other than JPEG, PNG,
///   BMP or GIF (TIFF included)
pub fn detect(bytes: &[u8]) -> Result<FormatId, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::EmptyInput);
    }

    let guessed = image::guess_format(bytes)
        .map_err(|_| ImageError::UnsupportedFormat("unrecognized signature".to_string()))?;

    match guessed {
        ImageFormat::Jpeg => Ok(FormatId::Jpeg),
        ImageFormat::Png => Ok(FormatId::Png),
        ImageFormat::Bmp => Ok(FormatId::Bmp),
        ImageFormat::Gif => Ok(FormatId::Gif),
        other => Err(ImageError::UnsupportedFormat(format!("{:?}", other))),
    }
}

/// Decodable formats.
pub fn supported_decode_formats() -> &'static [FormatId] {
    &DECODE_FORMATS
}

/// Decodable MIME types.
pub fn supported_decode_mime_types() -> Vec<&'static str> {
    DECODE_FORMATS.iter().map(|f| f.mime_type()).collect()
}

/// Encodable MIME types.
pub fn supported_encode_formats() -> Vec<&'static str> {
    ENCODE_FORMATS.iter().map(|f| f.mime_type()).collect()
}

/// Resolve an encode target from its MIME type.
pub(crate) fn encode_format(mime: &str) -> Option<FormatId> {
    FormatId::from_mime_type(mime).filter(|format| ENCODE_FORMATS.contains(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn test_detect_supported_containers() {
        assert_eq!(detect(&test_support::jpeg(4, 4)).unwrap(), FormatId::Jpeg);
        assert_eq!(detect(&test_support::png(4, 4)).unwrap(), FormatId::Png);
        assert_eq!(detect(&test_support::bmp(4, 4)).unwrap(), FormatId::Bmp);
        assert_eq!(detect(&test_support::gif(4, 4, 1)).unwrap(), FormatId::Gif);
    }

    #[test]
    fn test_detect_rejects_tiff() {
        assert!(matches!(
            detect(test_support::TIFF_HEADER),
            Err(ImageError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_detect_rejects_garbage_and_empty() {
        assert!(matches!(
            detect(&[0x00, 0x01, 0x02, 0x03]),
            Err(ImageError::UnsupportedFormat(_))
        ));
        assert_eq!(detect(&[]), Err(ImageError::EmptyInput));
    }

    #[test]
    fn test_supported_lists_non_empty() {
        assert_eq!(supported_decode_formats().len(), 4);
        assert_eq!(
            supported_decode_mime_types(),
            vec!["image/jpeg", "image/png", "image/bmp", "image/gif"]
        );
        assert_eq!(supported_encode_formats(), vec!["image/jpeg", "image/png"]);
    }

    #[test]
    fn test_mime_lookup() {
        assert_eq!(FormatId::from_mime_type("image/gif"), Some(FormatId::Gif));
        assert_eq!(FormatId::from_mime_type("image/jpg"), None);
        assert_eq!(encode_format("image/png"), Some(FormatId::Png));
        assert_eq!(encode_format("image/gif"), None);
    }
}
