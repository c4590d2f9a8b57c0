use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Full quotation body used by both create and replace. A client `id` is
/// read so it can be reported, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMarketInput {
    #[serde(default, skip_serializing)]
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub open_value: f64,
    pub close_value: f64,
    pub volume: i64,
    pub company_id: i64,
}

/// Body of the price-update placeholder route.
pub const PRICE_UPDATE_NOTICE: &str =
    "Price updates are not computed by this service; replace a quotation with PUT /api/stockMarkets/{id}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_body_with_optional_id() {
        let input: StockMarketInput = serde_json::from_str(
            r#"{"id": 999, "date": "2024-05-01", "openValue": 1.5, "closeValue": 2.0, "volume": 10, "companyId": 4}"#,
        )
        .unwrap();
        assert_eq!(input.id, Some(999));
        assert_eq!(input.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(input.company_id, 4);

        let without_id: StockMarketInput = serde_json::from_str(
            r#"{"date": "2024-05-01", "openValue": 1.5, "closeValue": 2.0, "volume": 10, "companyId": 4}"#,
        )
        .unwrap();
        assert_eq!(without_id.id, None);
    }

    #[test]
    fn missing_fields_are_rejected() {
        let res = serde_json::from_str::<StockMarketInput>(r#"{"date": "2024-05-01", "openValue": 1.5}"#);
        assert!(res.is_err());
    }
}
