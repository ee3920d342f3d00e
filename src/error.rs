use crate::io::fileset::FileKind;
use exitcode::ExitCode;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("File not found: {0:?}")]
    FileNotFound(PathBuf),
    #[error("Issue with file access: {0}")]
    Io(#[from] io::Error),
    #[error("No data in {0:?}")]
    EmptyInput(PathBuf),
    #[error("Malformed delimited text: {0}")]
    Csv(#[from] csv::Error),
    #[error("Row {row} has {found} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Column {column} is out of range for a table with {num_columns} columns (columns are 0 indexed)")]
    ColumnOutOfRange { column: usize, num_columns: usize },
    #[error("Expected at least {required} columns, found {found}")]
    TooFewColumns { required: usize, found: usize },
    #[error("No integer individual ID found in row {row}: {value:?}")]
    MissingIndividualId { row: usize, value: String },
    #[error("Allele block has an odd number of columns ({0}), alleles have to come in pairs")]
    OddAlleleColumns(usize),
    #[error("Tables have different row counts: {left} vs {right}")]
    RowCountMismatch { left: usize, right: usize },
    #[error("MAP file lists {num_map_rows} SNPs, but the PED file holds {num_snps} allele pairs")]
    SnpCountMismatch { num_map_rows: usize, num_snps: usize },
    #[error("Failed to deserialize recode policy: {0}")]
    Policy(#[from] serde_json::Error),
}

/// Pipeline step an error was raised in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Read(FileKind),
    ReadPolicy,
    AddPrefix,
    RecodePhenotype,
    Split,
    CombineAlleles,
    MergeMap,
    Write(FileKind),
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Stage::Read(kind) => write!(f, "reading {} file", kind),
            Stage::ReadPolicy => write!(f, "reading recode policy"),
            Stage::AddPrefix => write!(f, "adding prefix"),
            Stage::RecodePhenotype => write!(f, "recoding phenotype status"),
            Stage::Split => write!(f, "splitting PED into family and allele blocks"),
            Stage::CombineAlleles => write!(f, "combining allele columns"),
            Stage::MergeMap => write!(f, "merging MAP with transposed alleles"),
            Stage::Write(kind) => write!(f, "writing {} file", kind),
        }
    }
}

/// An [`Error`] tagged with the [`Stage`] it occurred in.
#[derive(thiserror::Error, Debug)]
#[error("An error occurred while {stage}: {source}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: Error,
}

impl StageError {
    pub fn new(stage: Stage, source: Error) -> Self {
        Self { stage, source }
    }

    /// Process exit status following the sysexits convention.
    pub fn exit_code(&self) -> ExitCode {
        match (&self.stage, &self.source) {
            (_, Error::FileNotFound(_)) => exitcode::NOINPUT,
            (Stage::ReadPolicy, _) => exitcode::CONFIG,
            (Stage::Write(_), _) => exitcode::IOERR,
            (_, Error::Io(_)) => exitcode::IOERR,
            _ => exitcode::DATAERR,
        }
    }
}

pub trait ResultExt<T> {
    fn stage(self, stage: Stage) -> Result<T, StageError>;
}

impl<T, E: Into<Error>> ResultExt<T> for Result<T, E> {
    fn stage(self, stage: Stage) -> Result<T, StageError> {
        self.map_err(|e| StageError::new(stage, e.into()))
    }
}
