//! Byte accumulator for sources that arrive in chunks.

use crate::error::ImageError;
use crate::format::{self, FormatId};

/// Collects chunks until the caller marks the stream complete.
#[derive(Debug, Default)]
pub(crate) struct IncrementalAssembler {
    bytes: Vec<u8>,
    detected: Option<FormatId>,
}

impl IncrementalAssembler {
    /// `capacity_hint` only pre-sizes the accumulator.
    pub(crate) fn with_capacity(capacity_hint: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity_hint),
            detected: None,
        }
    }

    /// Append `chunk[offset..offset + length]`.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::OutOfRange` if the window leaves `chunk`; nothing
    /// is appended in that case.
    pub(crate) fn append(&mut self, chunk: &[u8], offset: u32, length: u32) -> Result<(), ImageError> {
        let start = offset as usize;
        let end = start
            .checked_add(length as usize)
            .filter(|end| *end <= chunk.len())
            .ok_or_else(|| {
                ImageError::OutOfRange(format!(
                    "chunk window {}+{} exceeds chunk of {} bytes",
                    offset,
                    length,
                    chunk.len()
                ))
            })?;

        self.bytes.extend_from_slice(&chunk[start..end]);

        if self.detected.is_none() {
            if let Ok(format) = format::detect(&self.bytes) {
                log::debug!(
                    "identified {} after {} bytes",
                    format.mime_type(),
                    self.bytes.len()
                );
                self.detected = Some(format);
            }
        }
        Ok(())
    }

    /// Format identified so far, if any.
    pub(crate) fn detected(&self) -> Option<FormatId> {
        self.detected
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn test_append_window() {
        let mut asm = IncrementalAssembler::with_capacity(1);
        asm.append(&[1, 2, 3, 4, 5], 1, 3).unwrap();
        asm.append(&[9], 0, 0).unwrap();
        assert_eq!(asm.bytes(), &[2, 3, 4]);
    }

    #[test]
    fn test_append_out_of_range_appends_nothing() {
        let mut asm = IncrementalAssembler::default();
        assert!(matches!(
            asm.append(&[1, 2, 3], 2, 2),
            Err(ImageError::OutOfRange(_))
        ));
        assert!(matches!(
            asm.append(&[1, 2, 3], u32::MAX, u32::MAX),
            Err(ImageError::OutOfRange(_))
        ));
        assert_eq!(asm.len(), 0);
    }

    #[test]
    fn test_opportunistic_detection() {
        let png = test_support::png(4, 4);
        let mut asm = IncrementalAssembler::default();
        asm.append(&png, 0, 4).unwrap();
        assert_eq!(asm.detected(), None);
        asm.append(&png, 4, 16).unwrap();
        assert_eq!(asm.detected(), Some(FormatId::Png));
        assert_eq!(asm.into_bytes(), png[..20].to_vec());
    }
}
