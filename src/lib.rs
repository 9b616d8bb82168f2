//! # modis_meta
//!
//! `modis_meta` is a crate that reads the ECS inventory metadata (`CoreMetadata.0`) stored as a
//! global attribute in MODIS HDF4 granules and summarises it: the four footprint corners, their
//! extent and center, the orbit number, day/night flag, time range, equator crossing and the
//! product and sensor descriptions.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use modis_meta::parse_meta;
//!
//! let meta = parse_meta(Path::new("data/MYD021KM.A2013220.2105.061.hdf")).unwrap();
//! println!("orbit {} centered at {},{}", meta.orbit, meta.corners.lon_0, meta.corners.lat_0);
//! println!("{}", meta.laea_proj4());
//! ```
//!
//! ## Usage
//! ### rust api
//! The metadata text can also be handled without touching a file:
//!
//! - `parse`: turns the GROUP/OBJECT attribute text into a nested `Tree`.
//! - `extract`: pulls the granule summary (`GranuleMeta`) out of a parsed tree.
//! - `render`: writes a `Tree` back out as attribute text.
//!
//! GDAL's HDF4 driver flattens the ECS metadata of many HDF-EOS granules into separate items, in
//! which case `CoreMetadata.0` cannot be read through GDAL. Dump the attribute text to a file
//! (e.g. with pyhdf) and use `parse_meta_text`, or `--text` on the command line.
//!
//! ### Command line
//! the clap framework provides the command line interface.
//!```zsh
//! cargo run --release -- MYD021KM.A2013220.2105.061.hdf
//!```
//! prints the summary as json. Run with `-h` for the other options and set `RUST_LOG=debug`
//! to follow the parser.
//!
//! ## Installation
//! gdal must be installed with its HDF4 driver enabled.
//! build using
//!```zsh
//! cargo build --release
//! cargo install --path .
//! ```
//!
use std::path::Path;

pub mod error;
pub mod extract;
pub mod literal;
pub mod parser;
pub mod reader;
pub mod render;
pub mod value;

pub use error::{MetaError, MetaResult};
pub use extract::{extract, Corners, GranuleMeta};
pub use parser::parse;
pub use reader::{read_attribute, read_text, CORE_METADATA};
pub use render::render;
pub use value::{Tree, Value};

/// reads the `CoreMetadata.0` attribute of an HDF4 granule through GDAL and summarises it
pub fn parse_meta(path: &Path) -> MetaResult<GranuleMeta> {
    let text = read_attribute(path, CORE_METADATA)?;
    extract(&parse(&text)?)
}

/// summarises metadata text previously dumped from a granule to `path`
pub fn parse_meta_text(path: &Path) -> MetaResult<GranuleMeta> {
    extract(&parse(&read_text(path)?)?)
}
