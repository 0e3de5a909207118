mod capture_record;
mod decode_capture;
mod window_reader;

pub use capture_record::{
    Calibration, CalibrationEntry, CaptureRecord, CALIBRATION_OFFSETS, CAPTURE_MAGIC,
    CAPTURE_WINDOW_SIZE,
};
pub use decode_capture::{decode_calibration, decode_capture_file, decode_capture_window};
