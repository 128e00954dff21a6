use thiserror::Error;

use crate::NodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Spatial index has not been built")]
    IndexNotBuilt,
    #[error("Node {0} is referenced by a route but missing from the graph")]
    MissingNode(NodeId),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Snapshot error: {0}")]
    SnapshotError(#[from] serde_json::Error),
}
