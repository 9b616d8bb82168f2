use std::path::PathBuf;

use clap::ValueEnum;
use modis_meta::CORE_METADATA;

#[derive(Debug, clap::Parser)]
#[clap(author, version, about)]
pub struct MetaCliArgs {
    /// the hdf4 granule to read, e.g. a MODIS level1b file, or a text dump with --text
    pub file: PathBuf,

    /// treat FILE as the metadata text itself, dumped from a granule, instead of opening it with gdal
    #[clap(long)]
    pub text: bool,

    /// the global attribute holding the metadata text
    #[clap(short, long, default_value = CORE_METADATA)]
    pub attribute: String,

    /// how to print the result
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// print the whole parsed metadata tree instead of the granule summary
    #[clap(short, long)]
    pub tree: bool,

    /// also print a proj4 string for an equal area projection centered on the granule
    #[clap(short, long)]
    pub proj: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// pretty printed json
    Json,
    /// rust debug formatting
    Debug,
}
