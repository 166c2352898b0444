//! Persistence for trees - load/save JSON documents.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Result, TaxTreeError};
use crate::tree::Tree;

impl Tree {
    /// Parse a tree from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the tree as compact JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load a tree from a JSON file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use taxtree::Tree;
    /// let tree = Tree::load("sample.taxburst.json").unwrap();
    /// println!("Nodes: {}", tree.node_count());
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| io_error(path, e))?;
        let reader = BufReader::new(file);
        let tree = serde_json::from_reader(reader)?;

        Ok(tree)
    }

    /// Save the tree to a JSON file, creating the parent directory if needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
            }
        }

        let file = File::create(path).map_err(|e| io_error(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(|e| io_error(path, e))?;

        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> TaxTreeError {
    TaxTreeError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Node;

    #[test]
    fn test_json_string_round_trip() {
        let tree = Tree::from(Node::with_children(
            "Bacteria",
            "superkingdom",
            3.0,
            vec![Node::leaf("Firmicutes", "phylum", 3.0)],
        ));
        let json = tree.to_json_string().unwrap();
        assert_eq!(Tree::from_json_str(&json).unwrap(), tree);
    }

    #[test]
    fn test_parse_error_is_json_error() {
        assert!(matches!(
            Tree::from_json_str("[{\"name\": \"x\"}]"),
            Err(TaxTreeError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        match Tree::load("does/not/exist.json").unwrap_err() {
            TaxTreeError::Io { path, .. } => assert!(path.ends_with("exist.json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
