//! Sources of the core metadata text.
//!
//! GDAL opens the granule and returns a named global metadata item. GDAL's HDF4 driver
//! translates the ECS `coremetadata` attributes of HDF-EOS granules into separate flattened
//! items, so on most MODIS files `CoreMetadata.0` is not available that way; for those the
//! attribute text is dumped to a file (e.g. with pyhdf) and read with [`read_text`].

use std::fs;
use std::path::Path;

use gdal::{Dataset, Metadata};
use tracing::info;

use crate::error::{MetaError, MetaResult};

/// global attribute holding the ECS inventory metadata of a MODIS granule
pub const CORE_METADATA: &str = "CoreMetadata.0";

/// returns the text of global metadata item `attribute` of the file at `path`,
/// with trailing whitespace and NUL padding removed
pub fn read_attribute(path: &Path, attribute: &str) -> MetaResult<String> {
    let ds = Dataset::open(path)?;
    let text = ds
        .metadata_item(attribute, "")
        .ok_or_else(|| MetaError::MissingAttribute {
            file: path.to_path_buf(),
            attribute: attribute.to_string(),
        })?;
    info!(file = %path.display(), attribute, bytes = text.len(), "read metadata attribute");
    Ok(strip_padding(&text).to_string())
}

/// returns the metadata text stored in a plain text dump at `path`, padding removed
pub fn read_text(path: &Path) -> MetaResult<String> {
    let text = fs::read_to_string(path)?;
    info!(file = %path.display(), bytes = text.len(), "read metadata text");
    Ok(strip_padding(&text).to_string())
}

fn strip_padding(text: &str) -> &str {
    text.trim_end_matches([' ', '\t', '\r', '\n', '\0'])
}
