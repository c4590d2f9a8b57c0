use serde::{Deserialize, Serialize};
use thiserror::Error;

use models::company;

/// Create input. A client-supplied `id` is accepted on the wire and ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCompany {
    #[serde(default, skip_serializing)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Partial update input; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Field writes a patch resolves to against the current row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyChanges {
    /// Trimmed new name, only when it differs from the stored one.
    pub rename: Option<String>,
    pub sector: Option<String>,
    pub country: Option<String>,
}

impl CompanyPatch {
    pub fn resolve(&self, current: &company::Model) -> CompanyChanges {
        let rename = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty() && *n != current.name)
            .map(str::to_string);
        CompanyChanges {
            rename,
            sector: self.sector.as_deref().map(|s| s.trim().to_string()),
            country: self.country.as_deref().map(|c| c.trim().to_string()),
        }
    }
}

impl CompanyChanges {
    pub fn is_empty(&self) -> bool {
        self.rename.is_none() && self.sector.is_none() && self.country.is_none()
    }

    /// Write the resolved fields onto a row.
    pub fn apply(self, mut row: company::Model) -> company::Model {
        if let Some(name) = self.rename { row.name = name; }
        if let Some(sector) = self.sector { row.sector = Some(sector); }
        if let Some(country) = self.country { row.country = Some(country); }
        row
    }
}

/// Why a textual company id was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCompanyId {
    #[error("Invalid company ID")]
    Missing,
    #[error("Invalid company ID")]
    Sentinel,
    #[error("Company ID must be a number")]
    NotANumber,
}

/// Parse a path id. Empty text and the JavaScript placeholders `undefined` /
/// `null` (any case) are rejected before integer parsing.
pub fn parse_company_id(raw: &str) -> Result<i64, InvalidCompanyId> {
    if raw.is_empty() {
        return Err(InvalidCompanyId::Missing);
    }
    if raw.eq_ignore_ascii_case("undefined") || raw.eq_ignore_ascii_case("null") {
        return Err(InvalidCompanyId::Sentinel);
    }
    raw.parse::<i64>().map_err(|_| InvalidCompanyId::NotANumber)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> company::Model {
        company::Model { id: 1, name: "Acme".into(), sector: Some("Tech".into()), country: Some("US".into()) }
    }

    #[test]
    fn sentinel_and_garbage_ids_are_rejected() {
        assert_eq!(parse_company_id(""), Err(InvalidCompanyId::Missing));
        assert_eq!(parse_company_id("undefined"), Err(InvalidCompanyId::Sentinel));
        assert_eq!(parse_company_id("UNDEFINED"), Err(InvalidCompanyId::Sentinel));
        assert_eq!(parse_company_id("Null"), Err(InvalidCompanyId::Sentinel));
        assert_eq!(parse_company_id("abc"), Err(InvalidCompanyId::NotANumber));
        assert_eq!(parse_company_id(" 5"), Err(InvalidCompanyId::NotANumber));
        assert_eq!(parse_company_id("1.5"), Err(InvalidCompanyId::NotANumber));
    }

    #[test]
    fn numeric_ids_parse() {
        assert_eq!(parse_company_id("42"), Ok(42));
        assert_eq!(parse_company_id("-3"), Ok(-3));
    }

    #[test]
    fn sector_only_patch_touches_only_sector() {
        let patch = CompanyPatch { sector: Some("  Energy ".into()), ..Default::default() };
        let changes = patch.resolve(&acme());
        assert_eq!(changes, CompanyChanges { rename: None, sector: Some("Energy".into()), country: None });

        let row = changes.apply(acme());
        assert_eq!(row.name, "Acme");
        assert_eq!(row.sector.as_deref(), Some("Energy"));
        assert_eq!(row.country.as_deref(), Some("US"));
    }

    #[test]
    fn blank_or_unchanged_names_do_not_rename() {
        let blank = CompanyPatch { name: Some("   ".into()), ..Default::default() };
        assert_eq!(blank.resolve(&acme()).rename, None);

        let same = CompanyPatch { name: Some(" Acme ".into()), ..Default::default() };
        assert_eq!(same.resolve(&acme()).rename, None);

        let other = CompanyPatch { name: Some(" Globex ".into()), ..Default::default() };
        assert_eq!(other.resolve(&acme()).rename.as_deref(), Some("Globex"));
    }

    #[test]
    fn create_input_ignores_unknown_fields_and_accepts_id() {
        let input: NewCompany = serde_json::from_str(r#"{"id": 9, "name": "Acme", "extra": true}"#).unwrap();
        assert_eq!(input.id, Some(9));
        assert_eq!(input.name.as_deref(), Some("Acme"));
        assert!(input.sector.is_none());
    }
}
