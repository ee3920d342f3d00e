//! Reading and writing headerless delimited text tables.
use crate::error::Error;
use crate::io::fileset::is_gzipped;
use crate::table::Table;
use flate2::read::GzDecoder;
use log::debug;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delimiter {
    Space,
    Tab,
}

impl Delimiter {
    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Space => b' ',
            Delimiter::Tab => b'\t',
        }
    }
}

fn open(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })
}

/// Reads a whole table into memory.
///
/// Files ending in `.gz` are decompressed on the fly.
/// Every row needs the same number of fields.
pub fn read_table(path: &Path, delimiter: Delimiter) -> Result<Table, Error> {
    let file = open(path)?;
    let reader: Box<dyn Read> = if is_gzipped(path) {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    let table = read_from(reader, delimiter)?;
    if table.is_empty() {
        return Err(Error::EmptyInput(path.to_path_buf()));
    }
    debug!(
        "Read {} rows x {} cols from {:?}",
        table.num_rows(),
        table.num_cols(),
        path
    );
    Ok(table)
}

pub fn read_from<R: Read>(reader: R, delimiter: Delimiter) -> Result<Table, Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(false)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in rdr.records() {
        rows.push(record?.iter().map(str::to_owned).collect());
    }
    Table::from_rows(rows)
}

/// Writes a table without header or index, replacing any existing file.
pub fn write_table(path: &Path, table: &Table, delimiter: Delimiter) -> Result<(), Error> {
    let file = File::create(path)?;
    write_to(BufWriter::new(file), table, delimiter)?;
    debug!(
        "Wrote {} rows x {} cols to {:?}",
        table.num_rows(),
        table.num_cols(),
        path
    );
    Ok(())
}

pub fn write_to<W: io::Write>(writer: W, table: &Table, delimiter: Delimiter) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(false)
        .from_writer(writer);
    for row in table.rows() {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
