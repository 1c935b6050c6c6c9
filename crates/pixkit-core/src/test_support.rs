//! Container fixtures generated at test time.

use std::io::Cursor;

use image::codecs::gif::GifEncoder;
use image::{DynamicImage, Frame, ImageFormat, RgbaImage};

/// Little-endian TIFF header followed by an empty IFD.
pub(crate) const TIFF_HEADER: &[u8] = &[
    0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Opaque RGBA gradient; `seed` shifts the blue channel so frames differ.
pub(crate) fn gradient(width: u32, height: u32, seed: u8) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([
            ((x * 255) / width.max(1)) as u8,
            ((y * 255) / height.max(1)) as u8,
            seed,
            255,
        ])
    })
}

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, format)
        .expect("fixture encoding failed");
    cursor.into_inner()
}

pub(crate) fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let rgb = DynamicImage::ImageRgba8(gradient(width, height, 64)).to_rgb8();
    encode(DynamicImage::ImageRgb8(rgb), ImageFormat::Jpeg)
}

pub(crate) fn png(width: u32, height: u32) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgba8(gradient(width, height, 64)),
        ImageFormat::Png,
    )
}

pub(crate) fn bmp(width: u32, height: u32) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgba8(gradient(width, height, 64)),
        ImageFormat::Bmp,
    )
}

/// GIF with `frames` frames of the same canvas size.
pub(crate) fn gif(width: u32, height: u32, frames: u8) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut out);
        for i in 0..frames {
            let frame = Frame::new(gradient(width, height, i.wrapping_mul(80)));
            encoder.encode_frame(frame).expect("fixture gif frame");
        }
    }
    out
}

// ----------------------------------------------------------------------------
// EXIF
// ----------------------------------------------------------------------------

pub(crate) const EXIF_DATE_TIME_ORIGINAL: &str = "2021:06:01 08:30:00";

struct Entry {
    tag: u16,
    kind: u16,
    count: u32,
    data: Vec<u8>,
}

fn short(tag: u16, value: u16) -> Entry {
    Entry {
        tag,
        kind: 3,
        count: 1,
        data: value.to_le_bytes().to_vec(),
    }
}

fn long(tag: u16, value: u32) -> Entry {
    Entry {
        tag,
        kind: 4,
        count: 1,
        data: value.to_le_bytes().to_vec(),
    }
}

fn ascii(tag: u16, text: &str) -> Entry {
    let mut data = text.as_bytes().to_vec();
    data.push(0);
    Entry {
        tag,
        kind: 2,
        count: data.len() as u32,
        data,
    }
}

fn rational(tag: u16, values: &[(u32, u32)]) -> Entry {
    let mut data = Vec::new();
    for (num, den) in values {
        data.extend_from_slice(&num.to_le_bytes());
        data.extend_from_slice(&den.to_le_bytes());
    }
    Entry {
        tag,
        kind: 5,
        count: values.len() as u32,
        data,
    }
}

fn padded(len: usize) -> usize {
    (len + 1) & !1
}

fn ifd_len(entries: &[Entry]) -> usize {
    let out_of_line: usize = entries
        .iter()
        .filter(|e| e.data.len() > 4)
        .map(|e| padded(e.data.len()))
        .sum();
    2 + 12 * entries.len() + 4 + out_of_line
}

/// Append one IFD (directory plus out-of-line values) at `out.len()`.
fn write_ifd(out: &mut Vec<u8>, entries: &[Entry]) {
    let start = out.len();
    let mut data_offset = start + 2 + 12 * entries.len() + 4;
    let mut data_area = Vec::new();

    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for entry in entries {
        out.extend_from_slice(&entry.tag.to_le_bytes());
        out.extend_from_slice(&entry.kind.to_le_bytes());
        out.extend_from_slice(&entry.count.to_le_bytes());
        if entry.data.len() <= 4 {
            let mut inline = entry.data.clone();
            inline.resize(4, 0);
            out.extend_from_slice(&inline);
        } else {
            out.extend_from_slice(&(data_offset as u32).to_le_bytes());
            let mut value = entry.data.clone();
            value.resize(padded(value.len()), 0);
            data_offset += value.len();
            data_area.extend_from_slice(&value);
        }
    }
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&data_area);
}

/// TIFF block with primary, Exif and GPS directories.
fn exif_tiff(width: u32, height: u32) -> Vec<u8> {
    let exif_entries = vec![ascii(0x9003, EXIF_DATE_TIME_ORIGINAL)];
    let gps_entries = vec![
        ascii(0x0001, "N"),
        rational(0x0002, &[(31, 1), (12, 1), (3000, 100)]),
        ascii(0x0003, "E"),
        rational(0x0004, &[(121, 1), (28, 1), (1500, 100)]),
    ];

    // Artist is present but holds only its NUL terminator
    let mut primary = vec![
        long(0x0100, width),
        long(0x0101, height),
        short(0x0102, 8),
        short(0x0112, 1),
        ascii(0x013B, ""),
        long(0x8769, 0),
        long(0x8825, 0),
    ];
    let exif_offset = 8 + ifd_len(&primary);
    let gps_offset = exif_offset + ifd_len(&exif_entries);
    primary[5] = long(0x8769, exif_offset as u32);
    primary[6] = long(0x8825, gps_offset as u32);

    let mut out = vec![0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00];
    write_ifd(&mut out, &primary);
    write_ifd(&mut out, &exif_entries);
    write_ifd(&mut out, &gps_entries);
    out
}

/// JPEG carrying an APP1 Exif segment right after SOI.
pub(crate) fn jpeg_with_exif(width: u32, height: u32) -> Vec<u8> {
    let plain = jpeg(width, height);
    let tiff = exif_tiff(width, height);
    let segment_len = (2 + 6 + tiff.len()) as u16;

    let mut out = Vec::with_capacity(plain.len() + tiff.len() + 10);
    out.extend_from_slice(&plain[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&plain[2..]);
    out
}
