//! Document listing records and the alias-coalescing boundary.
//!
//! The backend schema changed over time, so listing rows arrive with the
//! same logical attribute under different field names. All coalescing
//! lives here, in [`normalize`], so the rest of the client only ever sees
//! the canonical [`DocumentRecord`] shape.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A listing row exactly as the backend sent it. One optional field per
/// historical alias; at most one alias per attribute is expected per row.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawDocumentRecord {
    pub filename: Option<String>,
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
    #[serde(rename = "isKetamineRelevant")]
    pub is_ketamine_relevant: Option<bool>,
    pub relevant: Option<bool>,
    #[serde(rename = "uploadDate")]
    pub upload_date_legacy: Option<String>,
    pub created_at: Option<String>,
    pub upload_date: Option<String>,
}

/// Canonical, backend-owned metadata for one ingested document.
///
/// The client holds a disposable cached copy, replaced wholesale on every
/// successful listing refresh.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    pub filename: String,
    pub relevant: bool,
    pub uploaded_at: DateTime<Utc>,
}

/// Coalesce a raw listing row into the canonical record, first present
/// alias winning for each attribute.
///
/// Rows without a recognizable filename or upload date are dropped (with a
/// warning at the call site) rather than invented.
pub fn normalize(raw: RawDocumentRecord) -> Option<DocumentRecord> {
    let filename = raw.filename.or(raw.file_name)?;
    let relevant = raw.is_ketamine_relevant.or(raw.relevant).unwrap_or(false);
    let uploaded_at = raw
        .upload_date_legacy
        .or(raw.created_at)
        .or(raw.upload_date)
        .and_then(|s| parse_date(&s))?;

    Some(DocumentRecord {
        filename,
        relevant,
        uploaded_at,
    })
}

/// Parse the upload date in the formats the backend has emitted: RFC 3339,
/// a naive datetime, or a bare date.
fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_from_json(json: &str) -> RawDocumentRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_canonical_fields_parse() {
        let raw = raw_from_json(
            r#"{"filename": "a.txt", "relevant": true, "upload_date": "2024-01-01"}"#,
        );
        let record = normalize(raw).unwrap();
        assert_eq!(record.filename, "a.txt");
        assert!(record.relevant);
        assert_eq!(record.uploaded_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_aliased_fields_normalize_identically() {
        let legacy = raw_from_json(
            r#"{"fileName": "a.txt", "relevant": true, "created_at": "2024-01-01"}"#,
        );
        let current = raw_from_json(
            r#"{"filename": "a.txt", "isKetamineRelevant": true, "uploadDate": "2024-01-01"}"#,
        );
        assert_eq!(normalize(legacy).unwrap(), normalize(current).unwrap());
    }

    #[test]
    fn test_first_present_date_alias_wins() {
        let raw = raw_from_json(
            r#"{"filename": "a.txt", "uploadDate": "2023-05-05", "created_at": "2024-01-01"}"#,
        );
        let record = normalize(raw).unwrap();
        assert_eq!(record.uploaded_at.to_rfc3339(), "2023-05-05T00:00:00+00:00");
    }

    #[test]
    fn test_relevance_defaults_to_false_when_absent() {
        let raw = raw_from_json(r#"{"filename": "a.txt", "upload_date": "2024-01-01"}"#);
        assert!(!normalize(raw).unwrap().relevant);
    }

    #[test]
    fn test_missing_filename_drops_record() {
        let raw = raw_from_json(r#"{"relevant": true, "upload_date": "2024-01-01"}"#);
        assert!(normalize(raw).is_none());
    }

    #[test]
    fn test_missing_date_drops_record() {
        let raw = raw_from_json(r#"{"filename": "a.txt", "relevant": true}"#);
        assert!(normalize(raw).is_none());
    }

    #[test]
    fn test_unparseable_date_drops_record() {
        let raw = raw_from_json(
            r#"{"filename": "a.txt", "relevant": true, "upload_date": "yesterday"}"#,
        );
        assert!(normalize(raw).is_none());
    }

    #[test]
    fn test_rfc3339_and_naive_datetime_accepted() {
        let rfc = raw_from_json(
            r#"{"filename": "a.txt", "upload_date": "2024-06-01T12:30:00+02:00"}"#,
        );
        assert_eq!(
            normalize(rfc).unwrap().uploaded_at.to_rfc3339(),
            "2024-06-01T10:30:00+00:00"
        );

        let naive = raw_from_json(
            r#"{"filename": "a.txt", "created_at": "2024-06-01T12:30:00"}"#,
        );
        assert_eq!(
            normalize(naive).unwrap().uploaded_at.to_rfc3339(),
            "2024-06-01T12:30:00+00:00"
        );
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let raw = raw_from_json(
            r#"{"filename": "a.txt", "upload_date": "2024-01-01", "id": 7, "status": "ready"}"#,
        );
        assert!(normalize(raw).is_some());
    }
}
