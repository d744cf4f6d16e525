use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::record::AssessmentRecord;

pub const OUTPUT_DIR: &str = "data/assessments_raw";

const FILENAME_FALLBACK: &str = "unknown_assessment";

/// Strip characters that are illegal in filenames on common filesystems.
pub fn sanitize_filename(name: &str) -> String {
    let clean: String = name
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .collect();
    let clean = clean.trim();
    if clean.is_empty() {
        FILENAME_FALLBACK.to_string()
    } else {
        clean.to_string()
    }
}

/// Write one record as pretty JSON under `dir`, keyed by its sanitized name.
/// Re-running over an unchanged page overwrites the same path with the same
/// bytes.
pub fn save_record(dir: &Path, record: &AssessmentRecord) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output dir {}", dir.display()))?;

    let path = dir.join(format!("{}.json", sanitize_filename(&record.name)));
    let json = serde_json::to_string_pretty(record)?;
    fs::write(&path, json)
        .with_context(|| format!("failed to write {}", path.display()))?;

    debug!("saved {}", path.display());
    Ok(path)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Support;

    fn record(name: &str) -> AssessmentRecord {
        AssessmentRecord {
            url: "https://www.shl.com/products/product-catalog/view/x/".into(),
            name: name.into(),
            description: "d".into(),
            job_levels: vec![],
            languages: vec![],
            duration: Some(11),
            test_type: vec!["Simulations".into()],
            remote_support: Support::Yes,
            adaptive_support: Support::No,
        }
    }

    #[test]
    fn sanitize_strips_illegal_characters() {
        assert_eq!(sanitize_filename("C/C++ Skills: v2?"), "CC++ Skills v2");
        assert_eq!(sanitize_filename("  ok name  "), "ok name");
    }

    #[test]
    fn sanitize_falls_back_when_empty() {
        assert_eq!(sanitize_filename(""), "unknown_assessment");
        assert_eq!(sanitize_filename("<>:?"), "unknown_assessment");
    }

    #[test]
    fn save_writes_and_rereads_identically() {
        let dir = tempfile::tempdir().unwrap();
        let rec = record("Java 8");
        let path = save_record(dir.path(), &rec).unwrap();
        assert!(path.ends_with("Java 8.json"));

        let back: AssessmentRecord =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn save_overwrites_on_name_collision() {
        let dir = tempfile::tempdir().unwrap();
        let mut rec = record("Same Name");
        save_record(dir.path(), &rec).unwrap();
        rec.duration = Some(30);
        let path = save_record(dir.path(), &rec).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let back: AssessmentRecord =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.duration, Some(30));
    }
}
