use crate::error::Error;
use crate::table::Table;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use strum_macros::EnumString;

/// Column holding the phenotype value in .ped and .fam / .tfam files.
pub const PHENOTYPE_COLUMN: usize = 5;

/// Case / control status as coded by PLINK.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, EnumString)]
pub enum PhenotypeStatus {
    #[strum(serialize = "1")]
    Unaffected,
    #[strum(serialize = "2")]
    Affected,
}

impl PhenotypeStatus {
    pub fn code(&self) -> u8 {
        match self {
            PhenotypeStatus::Unaffected => 1,
            PhenotypeStatus::Affected => 2,
        }
    }
}

impl Display for PhenotypeStatus {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Decides the phenotype status of an individual from its numeric ID.
/// `None` leaves the current value untouched.
pub trait RecodePolicy {
    fn status_for(&self, id: u64) -> Option<PhenotypeStatus>;
}

/// Even IDs get one status, odd IDs the other. IDs in `skip` are left alone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParityPolicy {
    pub even: PhenotypeStatus,
    pub odd: PhenotypeStatus,
    pub skip: Vec<u64>,
}

impl Default for ParityPolicy {
    fn default() -> Self {
        Self {
            even: PhenotypeStatus::Affected,
            odd: PhenotypeStatus::Unaffected,
            skip: vec![27],
        }
    }
}

impl ParityPolicy {
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

impl RecodePolicy for ParityPolicy {
    fn status_for(&self, id: u64) -> Option<PhenotypeStatus> {
        if self.skip.contains(&id) {
            None
        } else if id % 2 == 0 {
            Some(self.even)
        } else {
            Some(self.odd)
        }
    }
}

/// First run of ASCII digits in `value`, e.g. `7` for `INCH_FAM7b12`.
pub fn extract_individual_id(value: &str) -> Option<u64> {
    let start = value.find(|c: char| c.is_ascii_digit())?;
    let digits = &value[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RecodeSummary {
    pub affected: usize,
    pub unaffected: usize,
    pub unchanged: usize,
}

/// Sets the phenotype column of every row from the ID found in `id_column`.
///
/// All IDs are resolved before any cell is written, so on error the table is untouched.
pub fn recode_phenotypes<P: RecodePolicy>(
    table: &mut Table,
    id_column: usize,
    policy: &P,
) -> Result<RecodeSummary, Error> {
    table.check_column(id_column)?;
    table.check_column(PHENOTYPE_COLUMN)?;

    let statuses = table
        .rows()
        .iter()
        .enumerate()
        .map(|(row, r)| {
            extract_individual_id(&r[id_column])
                .map(|id| policy.status_for(id))
                .ok_or_else(|| Error::MissingIndividualId {
                    row,
                    value: r[id_column].clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut summary = RecodeSummary::default();
    let mut num_flipped = 0;
    for (row, status) in table.rows_mut().zip(statuses) {
        match status {
            Some(s) => {
                if row[PHENOTYPE_COLUMN].parse::<PhenotypeStatus>().ok() != Some(s) {
                    num_flipped += 1;
                }
                row[PHENOTYPE_COLUMN] = s.to_string();
                match s {
                    PhenotypeStatus::Affected => summary.affected += 1,
                    PhenotypeStatus::Unaffected => summary.unaffected += 1,
                }
            }
            None => {
                warn!("Skipping phenotype recode for individual {:?}", row[id_column]);
                summary.unchanged += 1;
            }
        }
    }
    info!(
        "Recoded phenotypes: {} affected, {} unaffected, {} unchanged ({} values changed)",
        summary.affected, summary.unaffected, summary.unchanged, num_flipped
    );
    Ok(summary)
}
