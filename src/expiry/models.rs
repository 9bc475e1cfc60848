use super::config;
use super::error::ExpiryError;
use super::resolver::parse_reference_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryType {
    Monthly,
    Weekly,
}

/// Which expiries a query asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryKind {
    Monthly,
    Weekly,
    Both,
}

impl ExpiryKind {
    pub fn includes_monthly(self) -> bool {
        matches!(self, ExpiryKind::Monthly | ExpiryKind::Both)
    }

    pub fn includes_weekly(self) -> bool {
        matches!(self, ExpiryKind::Weekly | ExpiryKind::Both)
    }
}

impl FromStr for ExpiryKind {
    type Err = ExpiryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(ExpiryKind::Monthly),
            "weekly" => Ok(ExpiryKind::Weekly),
            "both" => Ok(ExpiryKind::Both),
            _ => Err(ExpiryError::InvalidExpiryKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpiryResult {
    pub expiry_date: NaiveDate,
    pub days_to_expiry: i64,
    pub is_weekly: bool,
    pub expiry_type: ExpiryType,
}

impl ExpiryResult {
    pub fn new(reference: NaiveDate, expiry_date: NaiveDate, expiry_type: ExpiryType) -> Self {
        Self {
            expiry_date,
            days_to_expiry: (expiry_date - reference).num_days().max(0),
            is_weekly: expiry_type == ExpiryType::Weekly,
            expiry_type,
        }
    }
}

/// Raw parameters as they arrive on the query string, JSON body or form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpiryParams {
    pub index: Option<String>,
    pub date: Option<String>,
    pub expiry_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryQuery {
    pub index: String,
    /// Date exactly as supplied by the caller
    pub for_date: String,
    pub reference_date: NaiveDate,
    pub kind: ExpiryKind,
}

impl ExpiryQuery {
    pub fn new(index: &str, date: &str, kind: ExpiryKind) -> Result<Self, ExpiryError> {
        Ok(Self {
            index: index.to_uppercase(),
            for_date: date.to_string(),
            reference_date: parse_reference_date(date)?,
            kind,
        })
    }
}

impl TryFrom<ExpiryParams> for ExpiryQuery {
    type Error = ExpiryError;

    fn try_from(params: ExpiryParams) -> Result<Self, Self::Error> {
        let date = params
            .date
            .filter(|d| !d.is_empty())
            .ok_or(ExpiryError::MissingParameter)?;

        let kind = params
            .expiry_type
            .as_deref()
            .unwrap_or(config::DEFAULT_EXPIRY_KIND)
            .parse()?;

        let index = params.index.unwrap_or_else(|| config::DEFAULT_INDEX.to_string());

        Self::new(&index, &date, kind)
    }
}

/// Resolved expiries for one query
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExpiryResolution {
    pub index: String,
    pub for_date: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_expiry: Option<ExpiryResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_expiry: Option<ExpiryResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub service: &'static str,
}
