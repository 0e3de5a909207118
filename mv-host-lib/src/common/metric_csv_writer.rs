use std::{fs::File, io::Write, path::Path};

use crate::{evaluation::MetricRecord, Result};

pub const METRIC_CSV_TITLES: [&str; 6] =
    ["test_name", "version", "axis", "portion", "metric", "value"];

pub struct MetricCSVWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl MetricCSVWriter<File> {
    pub fn new<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        Self::from_writer(File::create(file_path)?)
    }
}

impl<W: Write> MetricCSVWriter<W> {
    pub fn from_writer(writer: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer.write_record(METRIC_CSV_TITLES)?;
        Ok(Self { writer })
    }

    pub fn write(&mut self, record: &MetricRecord) -> Result<()> {
        self.writer.write_record([
            record.test_name.clone(),
            record.version.clone(),
            record.axis.to_string(),
            record.portion.to_string(),
            record.metric.to_string(),
            format!("{}", record.value),
        ])?;
        Ok(())
    }

    pub fn write_all<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a MetricRecord>,
    ) -> Result<()> {
        for record in records {
            self.write(record)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|error| crate::Error::Io(error.into_error()))
    }
}
