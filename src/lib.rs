pub mod error;
pub mod io;
pub mod ped;
pub mod phenotype;
pub mod prefix;
pub mod table;
