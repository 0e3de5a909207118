use std::{io::SeekFrom, path::Path};

use log::debug;
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncSeekExt},
};

use super::capture_record::{
    Calibration, CaptureRecord, CALIBRATION_OFFSETS, CAPTURE_WINDOW_SIZE,
};
use crate::{Error, Result};

/// Decodes the capture window starting at `offset` of an already opened file.
pub async fn decode_capture_window(file: &mut File, offset: u64) -> Result<CaptureRecord> {
    let file_len = file.metadata().await?.len();
    let window_end = offset.checked_add(CAPTURE_WINDOW_SIZE as u64);
    if window_end.map_or(true, |end| file_len < end) {
        return Err(Error::ShortCapture { offset, file_len });
    }

    file.seek(SeekFrom::Start(offset)).await?;
    let mut window = [0u8; CAPTURE_WINDOW_SIZE];
    file.read_exact(&mut window).await?;

    CaptureRecord::parse(&window, offset)
}

/// Opens `path`, decodes a single window and closes the file again.
pub async fn decode_capture_file<P: AsRef<Path>>(path: P, offset: u64) -> Result<CaptureRecord> {
    let mut file = File::open(path).await?;
    decode_capture_window(&mut file, offset).await
}

/// Reads both calibration windows through one file handle.
pub async fn decode_calibration<P: AsRef<Path>>(path: P) -> Result<Calibration> {
    let path = path.as_ref();
    debug!("decoding calibration from {:?}", path);
    let mut file = File::open(path).await?;
    let first = decode_capture_window(&mut file, CALIBRATION_OFFSETS[0]).await?;
    let second = decode_capture_window(&mut file, CALIBRATION_OFFSETS[1]).await?;
    Ok(Calibration {
        records: [first, second],
    })
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::capture::CAPTURE_MAGIC;

    const CAPTURE_FILE_SIZE: usize = 0x200000;

    fn header_window(cap_idx: u32, entries: &[(u32, [f32; 6])]) -> Vec<u8> {
        let mut window = Vec::with_capacity(CAPTURE_WINDOW_SIZE);
        for field in [CAPTURE_MAGIC, cap_idx, 2, 3, 4] {
            window.extend_from_slice(&field.to_be_bytes());
        }
        window.push(entries.len() as u8);
        for (index, values) in entries {
            window.extend_from_slice(&index.to_be_bytes());
            for value in values {
                window.extend_from_slice(&value.to_be_bytes());
            }
        }
        window.resize(CAPTURE_WINDOW_SIZE, 0);
        window
    }

    fn capture_file(windows: &[(usize, Vec<u8>)], size: usize) -> NamedTempFile {
        let mut content = vec![0u8; size];
        for (offset, window) in windows {
            content[*offset..(*offset + window.len())].copy_from_slice(window);
        }
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&content).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn decode_window_drops_padding() {
        let values = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        let file = capture_file(
            &[(0x1FF800, header_window(1, &[(0, values)]))],
            CAPTURE_FILE_SIZE,
        );

        let record = decode_capture_file(file.path(), 0x1FF800).await.unwrap();
        assert_eq!(
            record,
            CaptureRecord {
                magic: 0x711AD917,
                cap_idx: 1,
                image_idx: 2,
                img_checksum: 3,
                img_timestamp: 4,
                entries: vec![crate::CalibrationEntry { index: 0, values }],
            }
        );
    }

    #[tokio::test]
    async fn calibration_reads_both_windows_in_order() {
        let file = capture_file(
            &[
                (0x1FF800, header_window(10, &[(1, [1.0; 6])])),
                (0x1FFC00, header_window(20, &[(2, [2.0; 6]), (3, [3.0; 6])])),
            ],
            CAPTURE_FILE_SIZE,
        );

        let calibration = decode_calibration(file.path()).await.unwrap();
        let [first, second] = calibration.records;
        assert_eq!(first.cap_idx, 10);
        assert_eq!(first.entries.len(), 1);
        assert_eq!(second.cap_idx, 20);
        assert_eq!(second.entries.len(), 2);
        assert_eq!(second.entries[1].values, [3.0; 6]);
    }

    #[tokio::test]
    async fn window_ending_exactly_at_eof() {
        let file = capture_file(&[(0, header_window(5, &[]))], CAPTURE_WINDOW_SIZE);
        let record = decode_capture_file(file.path(), 0).await.unwrap();
        assert_eq!(record.cap_idx, 5);
    }

    #[tokio::test]
    async fn short_file_is_an_io_failure() {
        let file = capture_file(&[(0x1FF800, header_window(1, &[]))], 0x1FFC00 + 100);
        let result = decode_calibration(file.path()).await;
        assert!(matches!(
            result,
            Err(Error::ShortCapture {
                offset: 0x1FFC00,
                file_len: 0x1FFC64
            })
        ));
    }

    #[tokio::test]
    async fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = decode_calibration(dir.path().join("missing.bin")).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn blank_window_has_bad_magic() {
        let file = capture_file(&[], CAPTURE_FILE_SIZE);
        let result = decode_capture_file(file.path(), 0x1FF800).await;
        assert!(matches!(
            result,
            Err(Error::BadMagic {
                offset: 0x1FF800,
                found: 0
            })
        ));
    }
}
