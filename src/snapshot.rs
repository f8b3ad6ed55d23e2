//! Persisted index artifact.
//!
//! A snapshot bundles the corpus store and the built index into one binary
//! blob so startup can skip re-ingestion and index building. The format
//! round-trips exactly: a loaded snapshot ranks every query identically to
//! the engine it was captured from.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::corpus::CorpusStore;
use crate::error::{CorpsmanError, Result};
use crate::index::InvertedIndex;

/// A serializable capture of a built engine's read-only state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    store: CorpusStore,
    index: InvertedIndex,
}

impl Snapshot {
    /// Bundle a store and its index.
    pub fn new(store: CorpusStore, index: InvertedIndex) -> Self {
        Snapshot { store, index }
    }

    /// Decompose into the store and index.
    pub fn into_parts(self) -> (CorpusStore, InvertedIndex) {
        (self.store, self.index)
    }

    /// Serialize to a writer.
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        bincode::serialize_into(writer, self)
            .map_err(|e| CorpsmanError::serialization(e.to_string()))
    }

    /// Deserialize from a reader.
    pub fn load<R: Read>(reader: R) -> Result<Snapshot> {
        bincode::deserialize_from(reader).map_err(|e| CorpsmanError::serialization(e.to_string()))
    }

    /// Serialize to a file path.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.save(BufWriter::new(file))
    }

    /// Deserialize from a file path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Snapshot> {
        let file = File::open(path)?;
        Self::load(BufReader::new(file))
    }
}
