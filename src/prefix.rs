use crate::error::{Error, ResultExt, Stage, StageError};
use crate::io::delimited::{read_table, write_table};
use crate::io::fileset::FileKind;
use crate::phenotype::{recode_phenotypes, RecodePolicy};
use crate::table::Table;
use log::info;
use std::path::PathBuf;

pub const DEFAULT_PREFIX: &str = "INCH_";

/// Prepends `prefix` to every cell of `column`.
pub fn add_prefix(table: &mut Table, prefix: &str, column: usize) -> Result<(), Error> {
    table.check_column(column)?;
    for row in table.rows_mut() {
        row[column].insert_str(0, prefix);
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixRecodeCfg {
    pub prefix: String,
    /// column the prefix is added to
    pub column: usize,
    /// column the numeric individual ID is extracted from
    pub id_column: usize,
}

impl Default for PrefixRecodeCfg {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_owned(),
            column: 0,
            id_column: 0,
        }
    }
}

/// Read, prefix, recode and write one .ped or .tfam file.
pub struct PrefixRecodeJob<'a, P: RecodePolicy> {
    kind: FileKind,
    input: PathBuf,
    output: PathBuf,
    cfg: PrefixRecodeCfg,
    policy: &'a P,
}

impl<'a, P: RecodePolicy> PrefixRecodeJob<'a, P> {
    pub fn new(
        kind: FileKind,
        input: PathBuf,
        output: PathBuf,
        cfg: PrefixRecodeCfg,
        policy: &'a P,
    ) -> Self {
        Self {
            kind,
            input,
            output,
            cfg,
            policy,
        }
    }

    pub fn output(&self) -> &PathBuf {
        &self.output
    }

    pub fn run(&self) -> Result<(), StageError> {
        let delimiter = self.kind.delimiter();

        info!("Reading {} file: {:?}", self.kind, self.input);
        let mut table = read_table(&self.input, delimiter).stage(Stage::Read(self.kind))?;

        // the prefix goes on before recoding, IDs are still found behind it
        info!(
            "Adding prefix {:?} to column {}",
            self.cfg.prefix, self.cfg.column
        );
        add_prefix(&mut table, &self.cfg.prefix, self.cfg.column).stage(Stage::AddPrefix)?;

        recode_phenotypes(&mut table, self.cfg.id_column, self.policy)
            .stage(Stage::RecodePhenotype)?;

        info!("Writing {} file: {:?}", self.kind, self.output);
        write_table(&self.output, &table, delimiter).stage(Stage::Write(self.kind))?;
        Ok(())
    }
}
