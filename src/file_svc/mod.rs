pub mod error;

use std::path::{Path, PathBuf};

use glob::glob;

use crate::collections::PathTree;

use self::error::*;

///
/// A file discovered under the source root: its absolute path, and its
/// path relative to the root, which is mirrored at the destination
///
#[derive(Clone, Debug, PartialEq)]
pub struct SourceFile {
    pub abs_path: PathBuf,
    pub rel_path: PathBuf,
}

///
/// Finds every file under `source_root` matching at least one of the
/// given glob patterns. A file matched by several patterns is returned
/// once.
///
pub fn get_source_files(source_root: &Path, patterns: &[String]) -> Result<Vec<SourceFile>> {
    let mut seen = PathTree::new();
    let mut files = Vec::new();

    for ptn in patterns {
        let full_ptn = source_root.join(ptn);
        let full_ptn = full_ptn.to_str()
            .ok_or_else(|| Error::NonUnicodePath(full_ptn.clone()))?;

        for abs_path in glob(full_ptn)? {
            let abs_path = abs_path?;
            if abs_path.is_dir() {
                continue;
            }
            // The glob is rooted at source_root, so the prefix always strips
            let rel_path = abs_path.strip_prefix(source_root)
                .unwrap_or(&abs_path).to_path_buf();
            if seen.insert(&rel_path, ()).is_none() {
                files.push(SourceFile { abs_path, rel_path });
            }
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::get_source_files;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_finds_matching_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "hr_20240115_3310/MR0001", "scan");
        write(dir.path(), "hr_20240115_3310/sub/SR0001", "report");
        write(dir.path(), "hr_20240115_3310/notes.txt", "not a scan");

        let mut files = get_source_files(dir.path(), &["**/[MS]R*".to_string()]).unwrap();
        files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));

        let rels: Vec<_> = files.iter().map(|f| f.rel_path.to_str().unwrap()).collect();
        assert_eq!(rels, vec!["hr_20240115_3310/MR0001", "hr_20240115_3310/sub/SR0001"]);
        assert!(files.iter().all(|f| f.abs_path.starts_with(dir.path())));
    }

    #[test]
    fn test_overlapping_patterns_yield_files_once() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "scan/MR0001.dcm", "scan");

        let files = get_source_files(
            dir.path(),
            &["**/*.dcm".to_string(), "**/[MS]R*".to_string()],
        ).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].rel_path, Path::new("scan/MR0001.dcm"));
    }

    #[test]
    fn test_empty_source_yields_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let files = get_source_files(dir.path(), &["**/[MS]R*".to_string()]).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(get_source_files(dir.path(), &["***".to_string()]).is_err());
    }
}
