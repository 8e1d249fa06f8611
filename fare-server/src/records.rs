//! Loading loosely-shaped reference records.
//!
//! Depot and rate-card tables arrive as JSON arrays maintained by another
//! system. Individual records may be missing fields or carry the wrong
//! types; the loaders here keep going past bad records and report them, so
//! one malformed row does not take the whole table down.

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Errors reading a record file as a whole.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON array
    #[error("failed to parse {path}: {message}")]
    Json { path: String, message: String },
}

/// A record that was skipped during loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Position of the record in the source array.
    pub index: usize,
    /// Why it was rejected.
    pub reason: String,
}

impl fmt::Display for RejectedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record {}: {}", self.index, self.reason)
    }
}

/// Read a file holding a JSON array of records.
pub fn read_json_array(path: impl AsRef<Path>) -> Result<Vec<Value>, SourceError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let contents = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: display.clone(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|e| SourceError::Json {
        path: display,
        message: e.to_string(),
    })
}

/// Deserialize each record into `R`, then convert it with `convert`.
///
/// Returns the converted values in source order along with every record
/// that failed either step.
pub fn convert_records<R, T, E, F>(
    records: Vec<Value>,
    mut convert: F,
) -> (Vec<T>, Vec<RejectedRecord>)
where
    R: DeserializeOwned,
    E: fmt::Display,
    F: FnMut(R) -> Result<T, E>,
{
    let mut accepted = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for (index, value) in records.into_iter().enumerate() {
        let raw: R = match serde_json::from_value(value) {
            Ok(raw) => raw,
            Err(e) => {
                rejected.push(RejectedRecord {
                    index,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match convert(raw) {
            Ok(item) => accepted.push(item),
            Err(e) => rejected.push(RejectedRecord {
                index,
                reason: e.to_string(),
            }),
        }
    }

    (accepted, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use tempfile::tempdir;

    #[derive(Deserialize)]
    struct Raw {
        n: i64,
    }

    fn positive(raw: Raw) -> Result<u32, String> {
        u32::try_from(raw.n)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| format!("{} is not positive", raw.n))
    }

    #[test]
    fn converts_and_reports() {
        let records = vec![json!({"n": 3}), json!({"n": -1}), json!({"m": 2}), json!({"n": 7})];
        let (accepted, rejected) = convert_records(records, positive);

        assert_eq!(accepted, vec![3, 7]);
        assert_eq!(rejected.len(), 2);
        assert_eq!(rejected[0].index, 1);
        assert_eq!(rejected[0].reason, "-1 is not positive");
        assert_eq!(rejected[1].index, 2);
        assert!(rejected[1].reason.contains("missing field"));
    }

    #[test]
    fn reads_array_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, r#"[{"n": 1}, {"n": 2}]"#).unwrap();

        let records = read_json_array(&path).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_json_array("/nonexistent/records.json").unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn non_array_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, r#"{"n": 1}"#).unwrap();

        let err = read_json_array(&path).unwrap_err();
        assert!(matches!(err, SourceError::Json { .. }));
    }
}
