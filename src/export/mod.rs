// src/export/mod.rs
//! Normalization of extracted tables and their emission as CSV artifacts.

pub mod csv;
pub mod naming;
pub mod normalize;

pub use self::csv::{to_csv_string, write_csv};
pub use naming::{ArtifactNaming, SequentialNaming};
pub use normalize::{normalize, RaggedPolicy};

use std::{fs, io::Write, path::PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::extract::TabularRecordSet;

/// Write every record set to the path chosen by `naming`, keyed by the
/// set's table index.
///
/// All tables are first written to temp files next to their destinations;
/// only once every write has succeeded are they renamed into place. A
/// failure while writing leaves no artifact behind.
#[instrument(level = "info", skip_all, fields(tables = sets.len()))]
pub fn export_all<N: ArtifactNaming + ?Sized>(
    sets: &[TabularRecordSet],
    naming: &N,
) -> Result<Vec<PathBuf>> {
    let mut staged = Vec::with_capacity(sets.len());

    for set in sets {
        let path = naming.artifact_path(set.index);
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        write_csv(set, tmp.as_file_mut())?;
        tmp.as_file_mut().flush()?;
        staged.push((set, tmp, path));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (set, tmp, path) in staged {
        tmp.persist(&path).map_err(|e| e.error)?;
        debug!(
            table = set.index,
            rows = set.num_rows(),
            path = %path.display(),
            "wrote artifact"
        );
        written.push(path);
    }

    info!(count = written.len(), "artifacts written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample(index: usize) -> TabularRecordSet {
        TabularRecordSet {
            index,
            headers: vec!["A".into(), "B".into()],
            rows: vec![vec![Some("1".into()), None]],
        }
    }

    #[test]
    fn test_export_all_writes_named_files() {
        let tmp = tempdir().unwrap();
        let naming = SequentialNaming::new(tmp.path().join("Downloads"), "Data");
        let written = export_all(&[sample(0), sample(2)], &naming).unwrap();

        assert_eq!(
            written,
            vec![naming.artifact_path(0), naming.artifact_path(2)]
        );
        let body = fs::read_to_string(&written[1]).unwrap();
        assert_eq!(body, ",A,B\n0,1,\n");
    }

    #[test]
    fn test_rerun_overwrites_byte_identically() {
        let tmp = tempdir().unwrap();
        let naming = SequentialNaming::new(tmp.path(), "Data");

        let first = export_all(&[sample(0)], &naming).unwrap();
        let before = fs::read(&first[0]).unwrap();
        let second = export_all(&[sample(0)], &naming).unwrap();
        let after = fs::read(&second[0]).unwrap();

        assert_eq!(before, after);
        let entries = fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(entries, 1, "temp files must not be left behind");
    }

    #[test]
    fn test_write_failure_commits_nothing() {
        let tmp = tempdir().unwrap();
        // a plain file where table 1's directory should go
        let blocker = tmp.path().join("blocked");
        fs::write(&blocker, b"").unwrap();

        let root = tmp.path().to_path_buf();
        let naming = move |i: usize| match i {
            0 => root.join("Data0.csv"),
            _ => root.join("blocked").join(format!("Data{}.csv", i)),
        };

        assert!(export_all(&[sample(0), sample(1)], &naming).is_err());
        assert!(!tmp.path().join("Data0.csv").exists());
        let entries = fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(entries, 1, "only the blocking file may remain");
    }
}
