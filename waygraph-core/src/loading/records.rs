use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use crate::{Error, NodeId};

/// Row of `nodes.csv`: `id,lat,lon`.
#[derive(Debug, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

/// Row of `edges.csv`: `from_id,to_id,length_m,max_speed_kmh`. An empty
/// speed field means the limit is unknown.
#[derive(Debug, Deserialize)]
pub struct EdgeRecord {
    pub from_id: NodeId,
    pub to_id: NodeId,
    pub length_m: f64,
    pub max_speed_kmh: Option<f64>,
}

/// Deserialize every row of a headered CSV file. A malformed row is an
/// ingestion bug and aborts the load rather than being dropped silently.
pub(crate) fn deserialize_csv_file<T>(path: &Path) -> Result<Vec<T>, Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file = File::open(path)?;
    let mut records = Vec::new();
    for row in csv::Reader::from_reader(file).deserialize() {
        records.push(row?);
    }
    Ok(records)
}
