use std::ffi::OsStr;
use std::fs::File;
use std::path::Path;

use crate::model::IVModel;
use crate::Measurements;
use crate::Result;

/// One row of the exported table: a reading and the fitted current at its voltage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub v: f64,
    pub i: f64,
    pub i_fit: f64,
}

trait CsvWriter {
    fn write_row(&mut self, row: &ExportRecord) -> Result<()>;
    fn close(self: Box<Self>) -> Result<()>;
}

impl<W: std::io::Write> CsvWriter for csv::Writer<libflate::gzip::Encoder<W>> {
    fn write_row(&mut self, row: &ExportRecord) -> Result<()> {
        self.serialize(row)?;
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.into_inner()
            .map_err(|_| failure::err_msg("Error writing the file"))?
            .finish()
            .into_result()?;
        Ok(())
    }
}

impl CsvWriter for csv::Writer<File> {
    fn write_row(&mut self, row: &ExportRecord) -> Result<()> {
        self.serialize(row)?;
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.into_inner()
            .map_err(|_| failure::err_msg("Error writing the file"))?;
        Ok(())
    }
}

fn is_gz(path: &Path) -> bool {
    path.extension().and_then(OsStr::to_str) == Some("gz")
}

fn csv_writer_from_path(path: &Path) -> Result<Box<dyn CsvWriter>> {
    let mut out_builder = csv::WriterBuilder::new();
    out_builder.delimiter(b'\t');
    Ok(if is_gz(path) {
        Box::new(out_builder.from_writer(libflate::gzip::Encoder::new(File::create(path)?)?))
    } else {
        Box::new(out_builder.from_path(path)?)
    })
}

pub fn records(measurements: &Measurements, model: &dyn IVModel) -> Vec<ExportRecord> {
    measurements
        .iter()
        .map(|(v, i)| ExportRecord {
            v,
            i,
            i_fit: model.evaluate(v),
        })
        .collect()
}

/// Writes `v`, `i`, `i_fit` as a tab-separated table, gzipped if `path` ends in `.gz`.
pub fn save_as_csv(measurements: &Measurements, model: &dyn IVModel, path: &Path) -> Result<()> {
    let mut out = csv_writer_from_path(path)?;
    for record in records(measurements, model) {
        out.write_row(&record)?;
    }
    out.close()?;
    Ok(())
}
