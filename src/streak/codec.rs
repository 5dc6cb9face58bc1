//! Binary layout of streak-camera image files
//!
//! The layout is positional; nothing in the file describes its own sizes:
//!
//! | Block | Size | Content |
//! |-------|------|---------|
//! | header | 64 bytes | opaque device header |
//! | metadata | 4 lines | `\n`-terminated UTF-8 configuration strings |
//! | intensity | 600 x 1024 bytes | `u16` little-endian, row-major (time, wavelength) |
//! | wavelength | 4 x 1024 bytes | `f32` little-endian, first 640 used |
//! | time | 4 x 1024 bytes | `f32` little-endian, first 480 used |
//!
//! Short blocks decode into short arrays; the only structural check is the
//! shape invariant enforced by [`StreakRecord`].

use std::borrow::Cow;
use std::io::{self, BufRead, Read, Write};

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use log::{debug, warn};

use super::{StreakError, StreakRecord};

/// Size of the opaque device header in bytes
pub const HEADER_LEN: usize = 64;
/// Number of metadata lines following the header
pub const METADATA_LINES: usize = 4;
/// Sector size of the fixed blocks
pub const SECTOR_SIZE: usize = 1024;
/// Intensity block size in bytes
pub const INTENSITY_BLOCK_LEN: usize = SECTOR_SIZE * 600;
/// Wavelength and time block size in bytes
pub const AXIS_BLOCK_LEN: usize = SECTOR_SIZE * 4;
/// Number of wavelength samples per time row
pub const WAVELENGTH_RESOLUTION: usize = 640;
/// Number of time rows
pub const TIME_RESOLUTION: usize = 480;

/// Header written for records that were not decoded from a file
pub const DEFAULT_HEADER: [u8; HEADER_LEN] = [
    0x49, 0x4d, 0xcd, 0x01, 0x80, 0x02, 0xe0, 0x01, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Decode a streak record from a buffered byte stream
pub fn decode<R: BufRead>(reader: &mut R) -> Result<StreakRecord, StreakError> {
    let header = read_block(reader, HEADER_LEN, "header")?;

    let mut metadata = Vec::with_capacity(METADATA_LINES);
    for _ in 0..METADATA_LINES {
        let mut line = Vec::new();
        reader.read_until(b'\n', &mut line)?;
        metadata.push(decode_line(&line));
    }

    let intensity = read_block(reader, INTENSITY_BLOCK_LEN, "intensity")?
        .chunks_exact(2)
        .map(|chunk| u32::from(LittleEndian::read_u16(chunk)))
        .collect::<Vec<u32>>();
    let wavelength = f32_values(
        &read_block(reader, AXIS_BLOCK_LEN, "wavelength")?,
        WAVELENGTH_RESOLUTION,
    );
    let time = f32_values(&read_block(reader, AXIS_BLOCK_LEN, "time")?, TIME_RESOLUTION);

    debug!(
        "Decoded streak record: {} time x {} wavelength, {} intensity values",
        time.len(),
        wavelength.len(),
        intensity.len()
    );

    StreakRecord::from_decoded(header, metadata, time, wavelength, intensity)
}

/// Encode a record into the binary layout
pub fn encode(record: &StreakRecord) -> Vec<u8> {
    let capacity = record.header().len()
        + record.metadata().iter().map(String::len).sum::<usize>()
        + METADATA_LINES
        + INTENSITY_BLOCK_LEN
        + 2 * AXIS_BLOCK_LEN;
    let mut buffer = Vec::with_capacity(capacity);
    // Writing into a Vec cannot fail
    let _ = write(record, &mut buffer);
    buffer
}

/// Stream a record in the binary layout to any writer.
///
/// Fewer than four metadata lines are padded with blank lines. Intensities are narrowed to `u16`; values above 65535 wrap.
/// Axis blocks shorter than 4096 bytes are zero-padded, longer ones are
/// written whole.
pub fn write<W: Write>(record: &StreakRecord, writer: &mut W) -> io::Result<()> {
    writer.write_all(record.header())?;
    for line in record.metadata() {
        writer.write_all(line.as_bytes())?;
    }
    for _ in record.metadata().len()..METADATA_LINES {
        writer.write_all(b"\n")?;
    }
    for &value in record.intensity() {
        writer.write_u16::<LittleEndian>(value as u16)?;
    }
    write_axis_block(writer, record.wavelength())?;
    write_axis_block(writer, record.time())?;
    Ok(())
}

fn write_axis_block<W: Write>(writer: &mut W, values: &[f32]) -> io::Result<()> {
    for &value in values {
        writer.write_f32::<LittleEndian>(value)?;
    }
    let written = values.len() * 4;
    if written < AXIS_BLOCK_LEN {
        writer.write_all(&vec![0u8; AXIS_BLOCK_LEN - written])?;
    }
    Ok(())
}

/// Read up to `len` bytes; a short read is logged, not rejected
fn read_block<R: Read>(reader: &mut R, len: usize, name: &str) -> io::Result<Vec<u8>> {
    let mut block = Vec::with_capacity(len);
    reader.by_ref().take(len as u64).read_to_end(&mut block)?;
    if block.len() < len {
        warn!(
            "Truncated {} block: read {} of {} bytes",
            name,
            block.len(),
            len
        );
    }
    Ok(block)
}

fn f32_values(bytes: &[u8], keep: usize) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .take(keep)
        .map(LittleEndian::read_f32)
        .collect()
}

fn decode_line(bytes: &[u8]) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(line) => line.to_string(),
        Cow::Owned(line) => {
            warn!("Metadata line is not valid UTF-8; invalid bytes replaced");
            line
        }
    }
}
