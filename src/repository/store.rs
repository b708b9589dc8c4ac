use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

use crate::repository::VisitGraph;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the visit graph lives between sessions.
pub trait VisitStore: Send {
    fn load(&self) -> Result<VisitGraph, StoreError>;
    fn save(&mut self, graph: &VisitGraph) -> Result<(), StoreError>;
}

/// Keeps the graph for the lifetime of the process only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    graph: VisitGraph,
}

impl MemoryStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn graph(&self) -> &VisitGraph {
        &self.graph
    }
}

impl VisitStore for MemoryStore {
    fn load(&self) -> Result<VisitGraph, StoreError> {
        Ok(self.graph.clone())
    }

    fn save(&mut self, graph: &VisitGraph) -> Result<(), StoreError> {
        self.graph = graph.clone();
        Ok(())
    }
}

/// Stores the graph as a json file. A missing file reads as an empty graph.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VisitStore for JsonFileStore {
    fn load(&self) -> Result<VisitGraph, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No visit graph at {}, starting empty", self.path.display());
                return Ok(VisitGraph::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn save(&mut self, graph: &VisitGraph) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        // Readers must never observe a partially written file
        let tmp = self.path.with_extension("json.tmp");
        let mut writer = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer(&mut writer, graph)?;
        writer.flush()?;
        drop(writer);
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
