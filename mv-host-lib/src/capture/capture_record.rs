use log::debug;
use serde::Serialize;

use super::window_reader::WindowReader;
use crate::{Error, Result};

pub const CAPTURE_MAGIC: u32 = 0x711AD917;
pub const CAPTURE_WINDOW_SIZE: usize = 640;

/// Absolute offsets of the two calibration windows, in decode order.
pub const CALIBRATION_OFFSETS: [u64; 2] = [0x1FF800, 0x1FFC00];

// magic, cap_idx, image_idx, img_checksum, img_timestamp, entry count
const HEADER_SIZE: usize = 4 * 5 + 1;
// index + 6 floats
const ENTRY_SIZE: usize = 4 + 4 * 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationEntry {
    pub index: u32,
    pub values: [f32; 6],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptureRecord {
    pub magic: u32,
    pub cap_idx: u32,
    pub image_idx: u32,
    pub img_checksum: u32,
    pub img_timestamp: u32,
    pub entries: Vec<CalibrationEntry>,
}

impl CaptureRecord {
    /// Parses one capture window. `offset` is only used for error reporting.
    pub fn parse(window: &[u8], offset: u64) -> Result<Self> {
        let mut reader = WindowReader::new(window);
        let overrun = |at: usize| Error::WindowOverrun { offset, at };

        let magic = reader.read_u32().ok_or_else(|| overrun(reader.consumed()))?;
        if magic != CAPTURE_MAGIC {
            return Err(Error::BadMagic {
                offset,
                found: magic,
            });
        }
        let cap_idx = reader.read_u32().ok_or_else(|| overrun(reader.consumed()))?;
        let image_idx = reader.read_u32().ok_or_else(|| overrun(reader.consumed()))?;
        let img_checksum = reader.read_u32().ok_or_else(|| overrun(reader.consumed()))?;
        let img_timestamp = reader.read_u32().ok_or_else(|| overrun(reader.consumed()))?;

        let count = reader.read_u8().ok_or_else(|| overrun(reader.consumed()))?;
        if HEADER_SIZE + count as usize * ENTRY_SIZE > CAPTURE_WINDOW_SIZE {
            return Err(Error::EntriesOverrunWindow { offset, count });
        }

        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let index = reader.read_u32().ok_or_else(|| overrun(reader.consumed()))?;
            let mut values = [0f32; 6];
            for value in values.iter_mut() {
                *value = reader.read_f32().ok_or_else(|| overrun(reader.consumed()))?;
            }
            entries.push(CalibrationEntry { index, values });
        }

        let consumed = reader.consumed();
        let padding = reader.read_rest();
        debug!(
            "capture window {:#X}: {} entries, {} bytes used, {} bytes padding",
            offset,
            entries.len(),
            consumed,
            padding.len()
        );

        Ok(Self {
            magic,
            cap_idx,
            image_idx,
            img_checksum,
            img_timestamp,
            entries,
        })
    }
}

/// Both calibration windows of one capture file, in file order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calibration {
    pub records: [CaptureRecord; 2],
}
