use clap::Parser;
use log::info;
use plink_reformat::ped::PedMapTransposer;
use std::path::PathBuf;

/// Transposes a plink .ped / .map pair to .tped / .tfam.
/// Outputs are written next to the .ped file and share its stem.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// the .ped file to be transformed (space delimited)
    #[clap(short, long, value_parser)]
    ped: PathBuf,

    /// the matching .map file (tab delimited), SNPs in .ped column order
    #[clap(short, long, value_parser)]
    map: PathBuf,
}

fn main() {
    simple_logger::init_with_level(log::Level::Info).unwrap();
    let args = Args::parse();
    match PedMapTransposer::new(args.ped, args.map).run() {
        Ok(out) => info!("All done! Wrote {:?} and {:?}", out.tfam, out.tped),
        Err(e) => {
            println!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn both_inputs_required() {
        assert!(Args::try_parse_from(["ped-to-tped", "-p", "a.ped"]).is_err());
        let args = Args::try_parse_from(["ped-to-tped", "-p", "a.ped", "-m", "a.map"]).unwrap();
        assert_eq!(args.map.to_str(), Some("a.map"));
    }
}
