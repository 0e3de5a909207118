use crate::description::DescriptionError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("capture file is {file_len} bytes, window at {offset:#X} needs 640")]
    ShortCapture { offset: u64, file_len: u64 },

    #[error("bad magic {found:#010X} in capture window at {offset:#X}")]
    BadMagic { offset: u64, found: u32 },

    #[error("read past the end of the capture window at {offset:#X} (byte {at})")]
    WindowOverrun { offset: u64, at: usize },

    #[error("{count} calibration entries overrun the capture window at {offset:#X}")]
    EntriesOverrunWindow { offset: u64, count: u8 },

    #[error("failed to load test description for {test_case}: {source}")]
    DescriptionLoad {
        test_case: String,
        #[source]
        source: DescriptionError,
    },

    #[error("non-numeric operand in error computation (expected: {expected}, actual: {actual})")]
    NonNumericOperand { expected: f64, actual: f64 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset header list is missing column {0:?}")]
    MissingColumn(&'static str),
}
