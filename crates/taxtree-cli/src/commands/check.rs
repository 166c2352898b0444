//! Check command - validate the structure of tree files.

use std::path::PathBuf;

use colored::Colorize;
use taxtree::check_structure;

use super::load_tree;

/// Outcome of validating one file.
struct CheckResult {
    file: PathBuf,
    nodes: Option<usize>,
    error: Option<String>,
}

impl CheckResult {
    fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

fn check_file(file: PathBuf) -> CheckResult {
    let outcome = load_tree(&file).and_then(|tree| {
        check_structure(&tree)?;
        Ok(tree.node_count())
    });

    match outcome {
        Ok(nodes) => CheckResult {
            file,
            nodes: Some(nodes),
            error: None,
        },
        Err(e) => {
            tracing::debug!(file = %file.display(), error = %e, "validation failed");
            CheckResult {
                file,
                nodes: None,
                error: Some(e.to_string()),
            }
        }
    }
}

pub fn run(trees: Vec<PathBuf>, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let results: Vec<CheckResult> = trees.into_iter().map(check_file).collect();
    let failed = results.iter().filter(|r| !r.is_valid()).count();

    if json_output {
        let entries: Vec<serde_json::Value> = results
            .iter()
            .map(|r| {
                serde_json::json!({
                    "file": r.file.display().to_string(),
                    "valid": r.is_valid(),
                    "nodes": r.nodes,
                    "error": r.error,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for result in &results {
            match (&result.nodes, &result.error) {
                (Some(nodes), None) => println!(
                    "{} {} ({} nodes)",
                    "ok".green().bold(),
                    result.file.display(),
                    nodes
                ),
                (_, Some(error)) => println!(
                    "{} {}: {}",
                    "FAILED".red().bold(),
                    result.file.display(),
                    error
                ),
                (None, None) => {}
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} trees failed validation", failed, results.len()).into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_check_valid_and_invalid() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        std::fs::write(&good, r#"{"name": "Bacteria", "count": 3}"#).unwrap();
        std::fs::write(
            &bad,
            r#"[{"name": "x", "count": 1}, {"name": "x", "count": 2}]"#,
        )
        .unwrap();

        let ok = check_file(good.clone());
        assert!(ok.is_valid());
        assert_eq!(ok.nodes, Some(1));

        let failed = check_file(bad.clone());
        assert!(!failed.is_valid());
        assert!(failed.error.unwrap().contains("x"));

        assert!(run(vec![good.clone()], false).is_ok());
        assert!(run(vec![good, bad], true).is_err());
    }

    #[test]
    fn test_unreadable_file_is_reported() {
        let result = check_file(PathBuf::from("no/such/tree.json"));
        assert!(!result.is_valid());
        assert!(result.nodes.is_none());
    }
}
