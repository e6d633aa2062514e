//! Loading the risk register from disk.

use crate::error::{CliError, Result};
use risklens_domain::Risk;
use serde::Deserialize;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Accepted file shapes: a bare array, or an object with a `risks` array.
#[derive(Deserialize)]
#[serde(untagged)]
enum RegisterFile {
    Bare(Vec<Risk>),
    Wrapped { risks: Vec<Risk> },
}

/// Read records from a JSON file, or from stdin when the path is `-`.
pub fn load_records(path: &Path) -> Result<Vec<Risk>> {
    let json = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(path)?
    };

    let records = parse_records(&json)?;
    tracing::debug!(count = records.len(), path = %path.display(), "register loaded");
    Ok(records)
}

/// Parse records from JSON text.
pub fn parse_records(json: &str) -> Result<Vec<Risk>> {
    let records = match serde_json::from_str::<RegisterFile>(json) {
        Ok(RegisterFile::Bare(records)) | Ok(RegisterFile::Wrapped { risks: records }) => records,
        // Re-parse as a bare array so the error points at the offending record
        Err(_) => serde_json::from_str::<Vec<Risk>>(json)?,
    };

    let mut seen = std::collections::HashSet::new();
    for risk in &records {
        if !seen.insert(risk.id()) {
            return Err(CliError::InvalidInput(format!("duplicate record id '{}'", risk.id())));
        }
    }

    Ok(records)
}

/// Find a record by id.
pub fn find_record<'a>(records: &'a [Risk], id: &str) -> Result<&'a Risk> {
    records
        .iter()
        .find(|r| r.id().as_str() == id)
        .ok_or_else(|| CliError::NotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const REGISTER: &str = r#"[
        {"id": "r1", "type": "risk", "title": "Flood at Rayong plant", "businessUnit": "Operations",
         "likelihood": 3, "impact": 5},
        {"id": "r2", "type": "issue", "title": "ERP outage", "businessUnit": "IT",
         "likelihood": 4, "impact": 4, "score": 16, "financialImpact": 250000}
    ]"#;

    #[test]
    fn test_bare_array() {
        let records = parse_records(REGISTER).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].score(), 16);
    }

    #[test]
    fn test_wrapped_object() {
        let json = format!(r#"{{"risks": {}}}"#, REGISTER);
        assert_eq!(parse_records(&json).unwrap().len(), 2);
    }

    #[test]
    fn test_score_mismatch_is_an_error() {
        let json = r#"[{"id": "x", "title": "t", "businessUnit": "HR",
                        "likelihood": 2, "impact": 2, "score": 5}]"#;
        assert!(matches!(parse_records(json), Err(CliError::Serialization(_))));
    }

    #[test]
    fn test_duplicate_ids() {
        let json = r#"[
            {"id": "x", "title": "a", "businessUnit": "HR", "likelihood": 1, "impact": 1},
            {"id": "x", "title": "b", "businessUnit": "HR", "likelihood": 1, "impact": 1}
        ]"#;
        assert!(matches!(parse_records(json), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_load_from_file() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), REGISTER).unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(find_record(&records, "r1").unwrap().title(), "Flood at Rayong plant");
        assert!(matches!(find_record(&records, "nope"), Err(CliError::NotFound(_))));
    }
}
