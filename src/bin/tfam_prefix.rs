use clap::Parser;
use log::info;
use plink_reformat::error::{ResultExt, Stage, StageError};
use plink_reformat::io::fileset::{FileKind, PlinkTextFileset};
use plink_reformat::phenotype::ParityPolicy;
use plink_reformat::prefix::{PrefixRecodeCfg, PrefixRecodeJob};
use std::path::PathBuf;

/// Adds a prefix to a column of a .tfam file and sets the phenotype status
/// to affected (2) for even and unaffected (1) for odd individual IDs, skipping ID 27.
/// The result is written to <stem>_modified.tfam next to the input.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// the .tfam file to be modified (tab delimited)
    #[clap(short, long, value_parser)]
    tfam: PathBuf,

    /// prefix to add to the values of the chosen column
    #[clap(short, long, value_parser, default_value = "INCH_")]
    prefix: String,

    /// column (0 indexed) to add the prefix to
    #[clap(short, long, value_parser, default_value_t = 0)]
    col: usize,

    /// column (0 indexed) holding the numeric individual ID
    #[clap(long, value_parser, default_value_t = 0)]
    id_col: usize,

    /// json file with a custom phenotype recode policy
    #[clap(long, value_parser)]
    policy: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), StageError> {
    let policy = match &args.policy {
        Some(path) => {
            info!("Loading recode policy from: {:?}", path);
            ParityPolicy::from_file(path).stage(Stage::ReadPolicy)?
        }
        None => ParityPolicy::default(),
    };
    let output = PlinkTextFileset::new(&args.tfam).modified_tfam();
    let cfg = PrefixRecodeCfg {
        prefix: args.prefix,
        column: args.col,
        id_column: args.id_col,
    };
    PrefixRecodeJob::new(FileKind::Tfam, args.tfam, output, cfg, &policy).run()
}

fn main() {
    simple_logger::init_with_level(log::Level::Info).unwrap();
    match run(Args::parse()) {
        Ok(()) => info!("Finished! The modified .tfam file has been written."),
        Err(e) => {
            println!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}
