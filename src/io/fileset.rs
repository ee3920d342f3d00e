use crate::io::delimited::Delimiter;
use std::path::{Path, PathBuf};
use strum_macros::Display;

const GZ_EXTENSION: &str = "gz";

/// The PLINK text formats handled here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum FileKind {
    #[strum(serialize = "PED")]
    Ped,
    #[strum(serialize = "MAP")]
    Map,
    #[strum(serialize = "TFAM")]
    Tfam,
    #[strum(serialize = "TPED")]
    Tped,
}

impl FileKind {
    /// Field separator PLINK tools conventionally use for this format.
    pub fn delimiter(&self) -> Delimiter {
        match self {
            FileKind::Ped => Delimiter::Space,
            FileKind::Map | FileKind::Tfam | FileKind::Tped => Delimiter::Tab,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Ped => "ped",
            FileKind::Map => "map",
            FileKind::Tfam => "tfam",
            FileKind::Tped => "tped",
        }
    }
}

pub fn is_gzipped(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == GZ_EXTENSION)
}

/// Output paths derived from an input file.
///
/// All outputs land next to the input and share its stem.
/// A trailing `.gz` is ignored, so `cohort.ped.gz` has the stem `cohort`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlinkTextFileset {
    dir: PathBuf,
    plain: PathBuf,
    stem: String,
}

impl PlinkTextFileset {
    pub fn new(input: &Path) -> Self {
        let plain = if is_gzipped(input) {
            input.with_extension("")
        } else {
            input.to_path_buf()
        };
        let stem = plain
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = input.parent().map(Path::to_path_buf).unwrap_or_default();
        Self { dir, plain, stem }
    }

    /// The input path without a `.gz` suffix.
    pub fn plain(&self) -> &Path {
        &self.plain
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn with_kind(&self, kind: FileKind) -> PathBuf {
        self.dir.join(format!("{}.{}", self.stem, kind.extension()))
    }

    pub fn tfam(&self) -> PathBuf {
        self.with_kind(FileKind::Tfam)
    }

    pub fn tped(&self) -> PathBuf {
        self.with_kind(FileKind::Tped)
    }

    /// `<stem>_modified.tfam`
    pub fn modified_tfam(&self) -> PathBuf {
        self.dir.join(format!(
            "{}_modified.{}",
            self.stem,
            FileKind::Tfam.extension()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{is_gzipped, FileKind, PlinkTextFileset};
    use crate::io::delimited::Delimiter;
    use std::path::{Path, PathBuf};

    #[test]
    fn outputs_share_dir_and_stem() {
        let fs = PlinkTextFileset::new(Path::new("data/run1/cohort.ped"));
        assert_eq!(fs.stem(), "cohort");
        assert_eq!(fs.tfam(), PathBuf::from("data/run1/cohort.tfam"));
        assert_eq!(fs.tped(), PathBuf::from("data/run1/cohort.tped"));
        assert_eq!(fs.plain(), Path::new("data/run1/cohort.ped"));
    }

    #[test]
    fn modified_tfam_name() {
        let fs = PlinkTextFileset::new(Path::new("/tmp/x/cohort.tfam"));
        assert_eq!(
            fs.modified_tfam(),
            PathBuf::from("/tmp/x/cohort_modified.tfam")
        );
    }

    #[test]
    fn bare_file_name_stays_relative() {
        let fs = PlinkTextFileset::new(Path::new("cohort.ped"));
        assert_eq!(fs.tfam(), PathBuf::from("cohort.tfam"));
    }

    #[test]
    fn gz_suffix_is_stripped() {
        let p = Path::new("in/cohort.ped.gz");
        assert!(is_gzipped(p));
        let fs = PlinkTextFileset::new(p);
        assert_eq!(fs.stem(), "cohort");
        assert_eq!(fs.plain(), Path::new("in/cohort.ped"));
        assert_eq!(fs.tped(), PathBuf::from("in/cohort.tped"));
    }

    #[test]
    fn dotted_stems_keep_inner_dots() {
        let fs = PlinkTextFileset::new(Path::new("a.b.ped"));
        assert_eq!(fs.stem(), "a.b");
    }

    #[test]
    fn kinds() {
        assert_eq!(FileKind::Ped.to_string(), "PED");
        assert_eq!(FileKind::Ped.delimiter(), Delimiter::Space);
        assert_eq!(FileKind::Map.delimiter(), Delimiter::Tab);
    }
}
