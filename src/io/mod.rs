pub mod delimited;
pub mod fileset;
