//! Pulls the granule summary out of a parsed `INVENTORYMETADATA` tree.

use ndarray::Array1;
use serde::{Serialize, Serializer};

use crate::error::{MetaError, MetaResult};
use crate::value::{lookup, lookup_group, Tree, Value};

/// radius in meters of the sphere the course maps are drawn on
pub const EARTH_RADIUS: f64 = 6_371_228.0;

const INVENTORY: &str = "INVENTORYMETADATA";
const HORIZONTAL: [&str; 3] = [
    INVENTORY,
    "SPATIALDOMAINCONTAINER",
    "HORIZONTALSPATIALDOMAINCONTAINER",
];
const ORBIT: [&str; 3] = [
    INVENTORY,
    "ORBITCALCULATEDSPATIALDOMAIN",
    "ORBITCALCULATEDSPATIALDOMAINCONTAINER",
];
const GRANULE: [&str; 2] = [INVENTORY, "ECSDATAGRANULE"];
const RANGE: [&str; 2] = [INVENTORY, "RANGEDATETIME"];
const COLLECTION: [&str; 2] = [INVENTORY, "COLLECTIONDESCRIPTIONCLASS"];
const SENSOR: [&str; 3] = [
    INVENTORY,
    "ASSOCIATEDPLATFORMINSTRUMENTSENSOR",
    "ASSOCIATEDPLATFORMINSTRUMENTSENSORCONTAINER",
];

/// Four granule corners with their extent and center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Corners {
    #[serde(serialize_with = "as_seq")]
    pub lon_list: Array1<f64>,
    #[serde(serialize_with = "as_seq")]
    pub lat_list: Array1<f64>,
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
    /// midpoint of min_lon and max_lon
    pub lon_0: f64,
    /// midpoint of min_lat and max_lat
    pub lat_0: f64,
}

impl Corners {
    /// lon_list and lat_list must be non-empty and of equal length
    pub(crate) fn new(lon_list: Array1<f64>, lat_list: Array1<f64>) -> Self {
        let (min_lon, max_lon) = extent(&lon_list);
        let (min_lat, max_lat) = extent(&lat_list);
        Corners {
            lon_list,
            lat_list,
            min_lon,
            max_lon,
            min_lat,
            max_lat,
            lon_0: (max_lon + min_lon) / 2.,
            lat_0: (max_lat + min_lat) / 2.,
        }
    }

    /// corners of a west/east/north/south rectangle, counter-clockwise from lower right
    pub fn from_rectangle(west: f64, east: f64, north: f64, south: f64) -> Self {
        Corners::new(
            Array1::from(vec![east, west, west, east]),
            Array1::from(vec![south, south, north, north]),
        )
    }
}

fn as_seq<S: Serializer>(values: &Array1<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter())
}

fn extent(values: &Array1<f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    })
}

/// Summary of one granule as read from its core metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GranuleMeta {
    pub orbit: i64,
    pub daynight: String,
    pub filename: String,
    pub startdate: String,
    pub stopdate: String,
    pub starttime: String,
    pub stoptime: String,
    pub equatordate: String,
    pub equatortime: String,
    #[serde(rename = "nasaProductionDate")]
    pub nasa_production_date: String,
    pub short_name: String,
    /// the whole COLLECTIONDESCRIPTIONCLASS group
    #[serde(rename = "type")]
    pub product_type: Tree,
    /// the whole ASSOCIATEDPLATFORMINSTRUMENTSENSORCONTAINER group
    pub sensor: Tree,
    #[serde(flatten)]
    pub corners: Corners,
}

impl GranuleMeta {
    /// true for level 2 products, whose footprint is a bounding rectangle
    pub fn is_level2(&self) -> bool {
        self.short_name.contains("L2")
    }

    /// proj4 definition of a Lambert azimuthal equal area projection centered on the granule,
    /// on a sphere of radius [`EARTH_RADIUS`]
    pub fn laea_proj4(&self) -> String {
        format!(
            "+proj=laea +lat_0={} +lon_0={} +R={} +units=m +no_defs",
            self.corners.lat_0, self.corners.lon_0, EARTH_RADIUS
        )
    }
}

/// Builds a [`GranuleMeta`] from a tree produced by [`crate::parse`].
///
/// Every field is read from a fixed path; the first absent key fails the whole
/// extraction with [`MetaError::MissingField`].
pub fn extract(tree: &Tree) -> MetaResult<GranuleMeta> {
    let short_name = text_value(tree, &COLLECTION, "SHORTNAME")?;
    let corners = if short_name.contains("L2") {
        rectangle_corners(tree)?
    } else {
        ring_corners(tree)?
    };

    let orbit_path = path(&ORBIT, "ORBITNUMBER");
    let orbit = lookup(tree, &orbit_path)?
        .as_i64()
        .ok_or_else(|| MetaError::FieldType {
            path: orbit_path.join("/"),
            expected: "an integer",
        })?;

    Ok(GranuleMeta {
        orbit,
        daynight: text_value(tree, &GRANULE, "DAYNIGHTFLAG")?,
        filename: text_value(tree, &GRANULE, "LOCALGRANULEID")?,
        stopdate: text_value(tree, &RANGE, "RANGEENDINGDATE")?,
        startdate: text_value(tree, &RANGE, "RANGEBEGINNINGDATE")?,
        starttime: text_value(tree, &RANGE, "RANGEBEGINNINGTIME")?,
        stoptime: text_value(tree, &RANGE, "RANGEENDINGTIME")?,
        equatortime: text_value(tree, &ORBIT, "EQUATORCROSSINGTIME")?,
        equatordate: text_value(tree, &ORBIT, "EQUATORCROSSINGDATE")?,
        nasa_production_date: text_value(tree, &GRANULE, "PRODUCTIONDATETIME")?,
        short_name,
        product_type: lookup_group(tree, &COLLECTION)?.clone(),
        sensor: lookup_group(tree, &SENSOR)?.clone(),
        corners,
    })
}

/// `<section>/<field>/VALUE`
fn path<'a>(section: &[&'a str], field: &'a str) -> Vec<&'a str> {
    let mut full = section.to_vec();
    full.push(field);
    full.push("VALUE");
    full
}

fn text_value(tree: &Tree, section: &[&str], field: &str) -> MetaResult<String> {
    let full = path(section, field);
    lookup(tree, &full)?
        .to_text()
        .ok_or_else(|| MetaError::FieldType {
            path: full.join("/"),
            expected: "a scalar",
        })
}

fn number_value(tree: &Tree, section: &[&str], field: &str) -> MetaResult<f64> {
    let full = path(section, field);
    lookup(tree, &full)?
        .as_f64()
        .ok_or_else(|| MetaError::FieldType {
            path: full.join("/"),
            expected: "a number",
        })
}

fn number_list(tree: &Tree, section: &[&str], field: &str) -> MetaResult<Array1<f64>> {
    let full = path(section, field);
    let wrong_type = || MetaError::FieldType {
        path: full.join("/"),
        expected: "a non-empty list of numbers",
    };
    let items = match lookup(tree, &full)? {
        Value::List(items) if !items.is_empty() => items,
        _ => return Err(wrong_type()),
    };
    items
        .iter()
        .map(|item| item.as_f64().ok_or_else(wrong_type))
        .collect::<MetaResult<Vec<f64>>>()
        .map(Array1::from)
}

fn rectangle_corners(tree: &Tree) -> MetaResult<Corners> {
    let mut section = HORIZONTAL.to_vec();
    section.push("BOUNDINGRECTANGLE");
    Ok(Corners::from_rectangle(
        number_value(tree, &section, "WESTBOUNDINGCOORDINATE")?,
        number_value(tree, &section, "EASTBOUNDINGCOORDINATE")?,
        number_value(tree, &section, "NORTHBOUNDINGCOORDINATE")?,
        number_value(tree, &section, "SOUTHBOUNDINGCOORDINATE")?,
    ))
}

fn ring_corners(tree: &Tree) -> MetaResult<Corners> {
    let mut section = HORIZONTAL.to_vec();
    section.extend(["GPOLYGON", "GPOLYGONCONTAINER", "GRINGPOINT"]);
    let lons = number_list(tree, &section, "GRINGPOINTLONGITUDE")?;
    let lats = number_list(tree, &section, "GRINGPOINTLATITUDE")?;
    if lons.len() != lats.len() {
        return Err(MetaError::FieldType {
            path: path(&section, "GRINGPOINTLATITUDE").join("/"),
            expected: "a list as long as GRINGPOINTLONGITUDE",
        });
    }
    Ok(Corners::new(lons, lats))
}
