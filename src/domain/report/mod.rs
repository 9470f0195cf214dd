//! Operational report downloads
//!
//! Reports are rendered server side; this module only names the report
//! kinds, validates the requested date range and fetches the PDF bytes.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::support::{AppError, AppResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The three report kinds the backend can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Supplement sales: totals, trends, popular products.
    Sales,
    /// Ambient performance: temperature and humidity range compliance.
    Ambient,
    /// Access activity: detailed entry log, granted and denied.
    Access,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [ReportKind::Sales, ReportKind::Ambient, ReportKind::Access];

    /// Stable id used in download filenames.
    pub fn kind_id(&self) -> &'static str {
        match self {
            Self::Sales => "supp_consumption",
            Self::Ambient => "env_performance",
            Self::Access => "access_activity",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Sales => "Consumo de Suplementos",
            Self::Ambient => "Rendimiento Ambiental",
            Self::Access => "Actividad de Accesos",
        }
    }

    fn endpoint(&self) -> &'static str {
        match self {
            Self::Sales => "/api/report/reports/sales",
            Self::Ambient => "/api/report/reports/ambient",
            Self::Access => "/api/report/reports/access",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind_id())
    }
}

/// Inclusive date range a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse the two date-picker values. Both are required before any
    /// request goes out.
    pub fn parse(start: &str, end: &str) -> AppResult<Self> {
        if start.trim().is_empty() || end.trim().is_empty() {
            return Err(AppError::validation("select both a start and an end date"));
        }
        Ok(Self {
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| AppError::validation(format!("{value:?} is not a YYYY-MM-DD date")))
}

/// Fetches rendered PDF reports over the authenticated API client.
pub struct ReportService {
    api: Arc<ApiClient>,
}

impl ReportService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Download one report as raw PDF bytes.
    pub async fn download(&self, kind: ReportKind, range: &ReportRange) -> AppResult<Vec<u8>> {
        if !self.api.session().is_authenticated() {
            return Err(ApiError::NoSession.into());
        }
        let query = [
            ("startDate", range.start.format(DATE_FORMAT).to_string()),
            ("endDate", range.end.format(DATE_FORMAT).to_string()),
        ];
        debug!(kind = kind.kind_id(), "downloading report");
        Ok(self.api.get_bytes(kind.endpoint(), &query).await?)
    }

    /// File name offered for the downloaded PDF.
    pub fn suggested_filename(kind: ReportKind, range: &ReportRange) -> String {
        format!(
            "reporte_{}_{}_a_{}.pdf",
            kind.kind_id(),
            range.start.format(DATE_FORMAT),
            range.end.format(DATE_FORMAT),
        )
    }
}

// ── Tests ──────────────────────────────────────────────────────
