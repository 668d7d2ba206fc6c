use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::{info, warn};

use crate::row::{Column, ColumnOrder, Row};

/// Placeholder for quantities an event does not provide
pub const MISSING: &str = "nan";

/// Writes accepted events as a tab-separated table
///
/// The header with the column names is written together with the
/// first row. Without a sink, all rows are silently discarded.
pub struct TableWriter<W: Write> {
    sink: Option<W>,
    columns: Vec<Column>,
    header_written: bool,
    rows: usize,
}

impl TableWriter<BufWriter<File>> {
    /// Create the output file
    ///
    /// If the file cannot be created a warning is emitted and the
    /// returned writer discards everything.
    pub fn create(path: &Path, order: ColumnOrder) -> Self {
        match File::create(path) {
            Ok(file) => {
                info!("Writing event table to {path:?}");
                Self::new(Some(BufWriter::new(file)), order)
            }
            Err(err) => {
                warn!("Could not open {path:?}: {err}");
                Self::new(None, order)
            }
        }
    }
}

impl<W: Write> TableWriter<W> {
    pub fn new(sink: Option<W>, order: ColumnOrder) -> Self {
        Self {
            sink,
            columns: order.columns(),
            header_written: false,
            rows: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.sink.is_some()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn write(&mut self, row: &Row) -> io::Result<()> {
        let Some(sink) = self.sink.as_mut() else {
            return Ok(())
        };
        if !self.header_written {
            write_line(&mut *sink, self.columns.iter().map(|c| c.to_string()))?;
            self.header_written = true;
        }
        let values = self.columns.iter().map(|&c| match row.get(c) {
            Some(val) => val.to_string(),
            None => MISSING.to_owned(),
        });
        write_line(&mut *sink, values)?;
        self.rows += 1;
        Ok(())
    }

    /// Flush and hand back the sink
    pub fn finish(mut self) -> io::Result<Option<W>> {
        if let Some(sink) = self.sink.as_mut() {
            sink.flush()?;
        }
        Ok(self.sink)
    }
}

fn write_line(
    mut out: impl Write,
    fields: impl IntoIterator<Item = String>
) -> io::Result<()> {
    let mut fields = fields.into_iter();
    if let Some(first) = fields.next() {
        out.write_all(first.as_bytes())?;
    }
    for field in fields {
        out.write_all(b"\t")?;
        out.write_all(field.as_bytes())?;
    }
    out.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    fn row(jet1_pt: f64, polar: Option<f64>) -> Row {
        Row {
            polar,
            jprod_r: polar.map(|p| p / 2.),
            jet1_pt,
            jet2_pt: 60.,
            jet_angle: 175.,
            jet1_ang: 1.5,
            aj: 0.25,
            weight: 1.,
        }
    }

    fn written(writer: TableWriter<Vec<u8>>) -> String {
        let out = writer.finish().unwrap().unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn header_with_first_row() {
        let mut writer = TableWriter::new(Some(Vec::new()), ColumnOrder::Declared);
        writer.write(&row(100., Some(0.5))).unwrap();
        writer.write(&row(90., None)).unwrap();
        assert_eq!(writer.rows(), 2);
        assert_eq!(
            written(writer),
            "Polar\tJProdR\tJet1_pT\tJet2_pT\tJetAngle\tJet1_Ang\tAj\tWeight\n\
             0.5\t0.25\t100\t60\t175\t1.5\t0.25\t1\n\
             nan\tnan\t90\t60\t175\t1.5\t0.25\t1\n"
        );
    }

    #[test]
    fn alphabetical_columns() {
        let mut writer = TableWriter::new(Some(Vec::new()), ColumnOrder::Alphabetical);
        writer.write(&row(100., Some(0.5))).unwrap();
        assert_eq!(
            written(writer),
            "Aj\tJProdR\tJet1_Ang\tJet1_pT\tJet2_pT\tJetAngle\tPolar\tWeight\n\
             0.25\t0.25\t1.5\t100\t60\t175\t0.5\t1\n"
        );
    }

    #[test]
    fn nothing_without_rows() {
        let writer = TableWriter::new(Some(Vec::new()), ColumnOrder::Declared);
        assert!(written(writer).is_empty());
    }

    #[test]
    fn without_sink() {
        let mut writer: TableWriter<Vec<u8>> = TableWriter::new(None, ColumnOrder::Declared);
        assert!(!writer.is_open());
        writer.write(&row(100., None)).unwrap();
        assert_eq!(writer.rows(), 0);
        assert!(writer.finish().unwrap().is_none());
    }

    #[test]
    fn to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.dat");
        let mut writer = TableWriter::create(&path, ColumnOrder::Declared);
        assert!(writer.is_open());
        writer.write(&row(100., None)).unwrap();
        writer.finish().unwrap();

        let mut content = String::new();
        File::open(&path).unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn unwritable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("table.dat");
        let mut writer = TableWriter::create(&path, ColumnOrder::Declared);
        assert!(!writer.is_open());
        writer.write(&row(100., None)).unwrap();
        assert!(!path.exists());
    }
}
