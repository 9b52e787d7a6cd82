use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::date_token;
use crate::error::ParseError;

/// A single project milestone as supplied by the data layer.
///
/// Dates are kept as the "DD Mon YYYY" tokens the data arrives in and are
/// parsed on every layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: Uuid,
    /// Project the milestone belongs to; items sharing it form one timeline.
    #[serde(rename = "project")]
    pub group_key: String,
    pub label: String,
    pub start_date: String,
    pub end_date: String,
    /// Display-only status text, not interpreted by the layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl TimelineItem {
    pub fn new(
        group_key: impl Into<String>,
        label: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_key: group_key.into(),
            label: label.into(),
            start_date: date_token::format(start),
            end_date: date_token::format(end),
            status: None,
        }
    }

    pub fn start(&self) -> Result<NaiveDate, ParseError> {
        date_token::parse(&self.start_date)
    }

    pub fn end(&self) -> Result<NaiveDate, ParseError> {
        date_token::parse(&self.end_date)
    }

    /// Both dates, or the first parse failure.
    pub fn span(&self) -> Result<(NaiveDate, NaiveDate), ParseError> {
        Ok((self.start()?, self.end()?))
    }

    /// A copy with new dates, keeping id, project and label.
    pub fn with_dates(&self, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: date_token::format(start),
            end_date: date_token::format(end),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_uses_project_key_and_ignores_extras() {
        let json = r#"{
            "id": "5f0c6f5e-5b8e-4a4b-9d59-0d8a3c0e6b11",
            "project": "Backbone Ring A",
            "label": "Trenching",
            "start_date": "10 Mar 2025",
            "end_date": "15 Mar 2025",
            "pic": "ignored decorative field"
        }"#;
        let item: TimelineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.group_key, "Backbone Ring A");
        assert_eq!(item.status, None);
        assert_eq!(
            item.span().unwrap(),
            (
                NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
            )
        );

        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["project"], "Backbone Ring A");
        assert!(out.get("status").is_none());
    }

    #[test]
    fn test_with_dates_keeps_identity() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        let item = TimelineItem::new("P", "Splicing", d(1), d(4));
        let moved = item.with_dates(d(5), d(9));
        assert_eq!(moved.id, item.id);
        assert_eq!(moved.label, "Splicing");
        assert_eq!(moved.start_date, "05 Mar 2025");
        assert_eq!(moved.end_date, "09 Mar 2025");
    }

    #[test]
    fn test_bad_end_date_surfaces_error() {
        let mut item = TimelineItem::new(
            "P",
            "Survey",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        );
        item.end_date = "02 Xyz 2025".to_string();
        assert!(item.start().is_ok());
        assert!(matches!(item.span(), Err(ParseError::UnknownMonth { .. })));
    }
}
