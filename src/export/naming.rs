// src/export/naming.rs

use std::path::{Path, PathBuf};

/// Decides where the artifact for table `index` is written.
pub trait ArtifactNaming {
    fn artifact_path(&self, index: usize) -> PathBuf;
}

/// `<dir>/<prefix><index>.<extension>`, e.g. `Downloads/Data0.csv`.
#[derive(Debug, Clone)]
pub struct SequentialNaming {
    pub dir: PathBuf,
    pub prefix: String,
    pub extension: String,
}

impl SequentialNaming {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            extension: "csv".to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactNaming for SequentialNaming {
    fn artifact_path(&self, index: usize) -> PathBuf {
        self.dir
            .join(format!("{}{}.{}", self.prefix, index, self.extension))
    }
}

impl<F> ArtifactNaming for F
where
    F: Fn(usize) -> PathBuf,
{
    fn artifact_path(&self, index: usize) -> PathBuf {
        self(index)
    }
}
