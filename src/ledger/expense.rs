use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// Format used both when stamping a record and when reading its date back.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of the month bucket keys produced by the monthly summary.
pub const MONTH_FORMAT: &str = "%Y-%m";

/// A single recorded expense as stored in the ledger file.
///
/// `date` is kept as the raw string written to disk so a hand-edited file
/// still loads; it is only parsed when a month bucket is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
}

impl ExpenseRecord {
    pub fn new(
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
        recorded_at: NaiveDateTime,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            description: description.into(),
            date: recorded_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Parses the stored date back into a timestamp.
    pub fn timestamp(&self) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.date, TIMESTAMP_FORMAT).map_err(|source| {
            LedgerError::Timestamp {
                value: self.date.clone(),
                source,
            }
        })
    }

    /// Year-month bucket (`YYYY-MM`) the record falls into.
    pub fn month_key(&self) -> Result<String> {
        Ok(self.timestamp()?.format(MONTH_FORMAT).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn new_record_stamps_date_with_second_precision() {
        let record = ExpenseRecord::new(12.5, "Food", "Lunch", at(2024, 3, 15, 10, 0, 7));
        assert_eq!(record.date, "2024-03-15 10:00:07");
        assert_eq!(record.timestamp().unwrap(), at(2024, 3, 15, 10, 0, 7));
    }

    #[test]
    fn month_key_truncates_to_year_month() {
        let record = ExpenseRecord::new(1.0, "Food", "", at(2024, 3, 15, 10, 0, 0));
        assert_eq!(record.month_key().unwrap(), "2024-03");
    }

    #[test]
    fn malformed_date_reports_the_offending_value() {
        let record = ExpenseRecord {
            amount: 1.0,
            category: "Food".into(),
            description: String::new(),
            date: "15/03/2024".into(),
        };
        let err = record.month_key().expect_err("date should not parse");
        assert!(matches!(err, LedgerError::Timestamp { ref value, .. } if value == "15/03/2024"));
    }

    #[test]
    fn missing_description_deserializes_as_empty() {
        let json = r#"{"amount": 3.0, "category": "Misc", "date": "2024-01-01 00:00:00"}"#;
        let record: ExpenseRecord = serde_json::from_str(json).unwrap();
        assert!(record.description.is_empty());
    }
}
