//! EXIF property lookup for a decoded container.

use std::io::Cursor;

use exif::{Field, In, Reader, Value};

use crate::error::ImageError;
use crate::format::FormatId;

/// Tag name to rendered value, in file order.
///
/// Only primary-image fields are kept (IFD0 plus its Exif and GPS
/// sub-directories); thumbnail fields are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataStore {
    entries: Vec<(String, String)>,
}

impl MetadataStore {
    /// Parse EXIF out of a container.
    ///
    /// Never fails: a container without EXIF, or with a block that cannot be
    /// parsed, yields an empty store.
    pub fn from_container(bytes: &[u8], format: FormatId) -> Self {
        if !matches!(format, FormatId::Jpeg | FormatId::Png) {
            return Self::default();
        }

        let mut cursor = Cursor::new(bytes);
        let exif = match Reader::new().read_from_container(&mut cursor) {
            Ok(exif) => exif,
            Err(exif::Error::NotFound(_)) => {
                log::debug!("no EXIF block in {} container", format.mime_type());
                return Self::default();
            }
            Err(e) => {
                log::warn!("ignoring unreadable EXIF block: {}", e);
                return Self::default();
            }
        };

        let mut store = Self::default();
        for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
            let tag = field.tag.to_string();
            if store.entries.iter().any(|(name, _)| *name == tag) {
                continue;
            }
            // A present tag never reads back as an empty string
            let value = render_value(field);
            if value.trim().is_empty() {
                log::debug!("skipping empty EXIF field {}", tag);
                continue;
            }
            store.entries.push((tag, value));
        }

        log::debug!("loaded {} EXIF properties", store.entries.len());
        store
    }

    /// Look up a property by tag name.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::PropertyNotFound` when the tag is absent and no
    /// `fallback` was supplied.
    pub fn get(&self, tag: &str, fallback: Option<&str>) -> Result<String, ImageError> {
        self.entries
            .iter()
            .find(|(name, _)| name == tag)
            .map(|(_, value)| value.clone())
            .or_else(|| fallback.map(str::to_string))
            .ok_or_else(|| ImageError::PropertyNotFound(tag.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_value(field: &Field) -> String {
    match &field.value {
        Value::Ascii(parts) => parts
            .iter()
            .map(|part| String::from_utf8_lossy(part).trim_end_matches('\0').to_string())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Byte(v) => join(v),
        Value::Short(v) => join(v),
        Value::Long(v) => join(v),
        Value::SByte(v) => join(v),
        Value::SShort(v) => join(v),
        Value::SLong(v) => join(v),
        Value::Float(v) => join(v),
        Value::Double(v) => join(v),
        Value::Rational(v) => v
            .iter()
            .map(|r| format!("{}/{}", r.num, r.denom))
            .collect::<Vec<_>>()
            .join(", "),
        Value::SRational(v) => v
            .iter()
            .map(|r| format!("{}/{}", r.num, r.denom))
            .collect::<Vec<_>>()
            .join(", "),
        _ => field.display_value().to_string(),
    }
}
