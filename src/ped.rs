//! PED + MAP to TPED + TFAM conversion.
//!
//! A .ped row is
//! `FID IID father mother sex phenotype a1 a2 a1 a2 ...`,
//! two allele columns per SNP, in the order the SNPs are listed in the .map.
//! A .tped row is the .map row of a SNP followed by one `"a1 a2"` genotype per individual.
use crate::error::{Error, ResultExt, Stage, StageError};
use crate::io::delimited::{read_table, write_table};
use crate::io::fileset::{FileKind, PlinkTextFileset};
use crate::table::Table;
use log::{debug, info};
use std::path::PathBuf;

/// Number of leading family / individual columns in a .ped file.
pub const FAMILY_BLOCK_WIDTH: usize = 6;

/// Splits a PED table into the family block (columns 0-5) and the allele block.
pub fn split_pedigree(ped: &Table) -> Result<(Table, Table), Error> {
    if ped.num_cols() < FAMILY_BLOCK_WIDTH {
        return Err(Error::TooFewColumns {
            required: FAMILY_BLOCK_WIDTH,
            found: ped.num_cols(),
        });
    }
    let fam = ped.select_columns(0..FAMILY_BLOCK_WIDTH)?;
    let alleles = ped.select_columns(FAMILY_BLOCK_WIDTH..ped.num_cols())?;
    Ok((fam, alleles))
}

/// Joins allele columns `2k` and `2k + 1` into a single `"a1 a2"` column.
pub fn combine_allele_pairs(alleles: &Table) -> Result<Table, Error> {
    if alleles.num_cols() % 2 != 0 {
        return Err(Error::OddAlleleColumns(alleles.num_cols()));
    }
    let rows = alleles
        .rows()
        .iter()
        .map(|r| {
            r.chunks_exact(2)
                .map(|pair| format!("{} {}", pair[0], pair[1]))
                .collect()
        })
        .collect();
    Table::from_rows(rows)
}

/// Appends the genotypes of each SNP to its .map row.
///
/// Rows are matched by position only, so both tables have to list the SNPs
/// in the same order.
pub fn merge_map(map: &Table, genotypes_by_snp: &Table) -> Result<Table, Error> {
    if map.num_rows() != genotypes_by_snp.num_rows() {
        return Err(Error::SnpCountMismatch {
            num_map_rows: map.num_rows(),
            num_snps: genotypes_by_snp.num_rows(),
        });
    }
    map.hcat(genotypes_by_snp)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransposeOutput {
    pub tfam: PathBuf,
    pub tped: PathBuf,
}

pub struct PedMapTransposer {
    ped: PathBuf,
    map: PathBuf,
}

impl PedMapTransposer {
    pub fn new(ped: PathBuf, map: PathBuf) -> Self {
        Self { ped, map }
    }

    /// Writes `<stem>.tfam` and `<stem>.tped` next to the .ped file.
    pub fn run(&self) -> Result<TransposeOutput, StageError> {
        info!("Reading PED file: {:?}", self.ped);
        let ped =
            read_table(&self.ped, FileKind::Ped.delimiter()).stage(Stage::Read(FileKind::Ped))?;
        info!("Reading MAP file: {:?}", self.map);
        let map =
            read_table(&self.map, FileKind::Map.delimiter()).stage(Stage::Read(FileKind::Map))?;

        let (fam, alleles) = split_pedigree(&ped).stage(Stage::Split)?;
        debug!(
            "{} individuals, {} allele columns",
            fam.num_rows(),
            alleles.num_cols()
        );

        // both outputs are built before anything is written
        let genotypes = combine_allele_pairs(&alleles).stage(Stage::CombineAlleles)?;
        let genotypes_by_snp = genotypes.transpose();
        let tped = merge_map(&map, &genotypes_by_snp).stage(Stage::MergeMap)?;

        let fileset = PlinkTextFileset::new(&self.ped);
        let output = TransposeOutput {
            tfam: fileset.tfam(),
            tped: fileset.tped(),
        };

        info!("Writing TFAM file: {:?}", output.tfam);
        write_table(&output.tfam, &fam, FileKind::Tfam.delimiter())
            .stage(Stage::Write(FileKind::Tfam))?;

        info!(
            "Writing TPED file with {} SNPs: {:?}",
            tped.num_rows(),
            output.tped
        );
        write_table(&output.tped, &tped, FileKind::Tped.delimiter())
            .stage(Stage::Write(FileKind::Tped))?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::{combine_allele_pairs, merge_map, split_pedigree, PedMapTransposer};
    use crate::error::{Error, Stage};
    use crate::table::table;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn split_at_family_block() {
        let ped = table(&[
            &["FAM1", "IND1", "0", "0", "1", "0", "A", "A", "C", "T"],
            &["FAM1", "IND2", "0", "0", "2", "0", "A", "G", "C", "C"],
        ]);
        let (fam, alleles) = split_pedigree(&ped).unwrap();
        assert_eq!(fam.num_cols(), 6);
        assert_eq!(alleles.num_cols(), 4);
        assert_eq!(fam.rows()[1], vec!["FAM1", "IND2", "0", "0", "2", "0"]);
        assert_eq!(alleles.rows()[1], vec!["A", "G", "C", "C"]);
        assert_eq!(fam.hcat(&alleles).unwrap(), ped);
    }

    #[test]
    fn split_without_alleles() {
        let ped = table(&[&["FAM1", "IND1", "0", "0", "1", "0"]]);
        let (fam, alleles) = split_pedigree(&ped).unwrap();
        assert_eq!(fam, ped);
        assert_eq!(alleles.num_rows(), 1);
        assert_eq!(alleles.num_cols(), 0);
    }

    #[test]
    fn split_too_narrow() {
        let ped = table(&[&["FAM1", "IND1", "0"]]);
        assert!(matches!(
            split_pedigree(&ped),
            Err(Error::TooFewColumns {
                required: 6,
                found: 3
            })
        ));
    }

    #[test]
    fn combine_pairs() {
        let alleles = table(&[&["A", "A", "C", "T"], &["A", "G", "C", "C"]]);
        let combined = combine_allele_pairs(&alleles).unwrap();
        assert_eq!(combined, table(&[&["A A", "C T"], &["A G", "C C"]]));
    }

    #[test]
    fn combine_odd_columns_fails() {
        let alleles = table(&[&["A", "A", "C"]]);
        assert!(matches!(
            combine_allele_pairs(&alleles),
            Err(Error::OddAlleleColumns(3))
        ));
    }

    #[test]
    fn merge_checks_snp_count() {
        let map = table(&[&["1", "snp1", "0", "100"]]);
        let genotypes = table(&[&["A A"], &["C T"]]);
        assert!(matches!(
            merge_map(&map, &genotypes),
            Err(Error::SnpCountMismatch {
                num_map_rows: 1,
                num_snps: 2
            })
        ));
    }

    #[test]
    fn merge_by_position() {
        let map = table(&[&["1", "snp1", "0", "100"], &["1", "snp2", "0", "200"]]);
        let genotypes = table(&[&["A A", "A G"], &["C T", "C C"]]);
        assert_eq!(
            merge_map(&map, &genotypes).unwrap(),
            table(&[
                &["1", "snp1", "0", "100", "A A", "A G"],
                &["1", "snp2", "0", "200", "C T", "C C"],
            ])
        );
    }

    #[test]
    fn transposer_writes_tfam_and_tped() {
        let dir = tempdir().unwrap();
        let ped = dir.path().join("cohort.ped");
        let map = dir.path().join("cohort.map");
        fs::write(
            &ped,
            "FAM1 IND1 0 0 1 0 A A C T\nFAM1 IND2 0 0 2 0 A G C C\n",
        )
        .unwrap();
        fs::write(&map, "1\tsnp1\t0\t100\n1\tsnp2\t0\t200\n").unwrap();

        let out = PedMapTransposer::new(ped, map).run().unwrap();
        assert_eq!(out.tfam, dir.path().join("cohort.tfam"));
        assert_eq!(out.tped, dir.path().join("cohort.tped"));
        assert_eq!(
            fs::read_to_string(&out.tfam).unwrap(),
            "FAM1\tIND1\t0\t0\t1\t0\nFAM1\tIND2\t0\t0\t2\t0\n"
        );
        assert_eq!(
            fs::read_to_string(&out.tped).unwrap(),
            "1\tsnp1\t0\t100\tA A\tA G\n1\tsnp2\t0\t200\tC T\tC C\n"
        );
    }

    #[test]
    fn transposer_odd_alleles_write_nothing() {
        let dir = tempdir().unwrap();
        let ped = dir.path().join("cohort.ped");
        let map = dir.path().join("cohort.map");
        fs::write(&ped, "FAM1 IND2 0 0 1 0 A A C\n").unwrap();
        fs::write(&map, "1\tsnp1\t0\t100\n").unwrap();

        let err = PedMapTransposer::new(ped, map).run().unwrap_err();
        assert_eq!(err.stage, Stage::CombineAlleles);
        assert!(!dir.path().join("cohort.tfam").exists());
        assert!(!dir.path().join("cohort.tped").exists());
    }

    #[test]
    fn transposer_rejects_short_map() {
        let dir = tempdir().unwrap();
        let ped = dir.path().join("cohort.ped");
        let map = dir.path().join("cohort.map");
        fs::write(&ped, "FAM1 IND2 0 0 1 0 A A C T\n").unwrap();
        fs::write(&map, "1\tsnp1\t0\t100\n").unwrap();

        let err = PedMapTransposer::new(ped, map).run().unwrap_err();
        assert_eq!(err.stage, Stage::MergeMap);
        assert!(matches!(err.source, Error::SnpCountMismatch { .. }));
        assert_eq!(err.exit_code(), exitcode::DATAERR);
        assert!(!dir.path().join("cohort.tfam").exists());
        assert!(!dir.path().join("cohort.tped").exists());
    }
}
