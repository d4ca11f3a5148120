//! disease.sh API integration for historical cumulative counts.

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{CaseKind, CumulativeSeries, Scope};
use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "https://disease.sh/v3/covid-19";
const BASE_URL_ENV: &str = "DISEASE_SH_URL";

/// Cumulative series for one scope, as returned by `/historical/...`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Historical {
    /// Present for country queries only.
    #[serde(default)]
    pub country: Option<String>,
    pub cases: CumulativeSeries,
    pub deaths: CumulativeSeries,
    /// Some scopes stopped reporting recoveries; treat a missing field as empty.
    #[serde(default)]
    pub recovered: CumulativeSeries,
}

impl Historical {
    /// The one mapping the delta builder consumes.
    pub fn series(&self, kind: CaseKind) -> &CumulativeSeries {
        match kind {
            CaseKind::Cases => &self.cases,
            CaseKind::Recovered => &self.recovered,
            CaseKind::Deaths => &self.deaths,
        }
    }
}

/// Country payloads nest the series under `timeline`.
#[derive(Debug, Deserialize)]
struct CountryResponse {
    country: String,
    timeline: Timeline,
}

#[derive(Debug, Deserialize)]
struct Timeline {
    cases: CumulativeSeries,
    deaths: CumulativeSeries,
    #[serde(default)]
    recovered: CumulativeSeries,
}

/// Anything that can supply a historical document.
///
/// The pipeline only talks to this trait so it can be driven without a network.
pub trait HistoricalSource {
    fn fetch(&self, scope: &Scope, last_days: u32) -> Result<Historical, AppError>;
}

pub struct HistoricalClient {
    client: Client,
    base_url: String,
}

impl HistoricalClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from `DISEASE_SH_URL` (optionally set in `.env`).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = match std::env::var(BASE_URL_ENV) {
            Ok(url) if url.trim().is_empty() => {
                return Err(AppError::usage(format!("{BASE_URL_ENV} is set but empty.")));
            }
            Ok(url) => url,
            Err(_) => DEFAULT_BASE_URL.to_string(),
        };
        Ok(Self::new(base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request URL for a scope (query string excluded).
    pub fn endpoint(&self, scope: &Scope) -> String {
        match scope {
            Scope::Global => format!("{}/historical/all", self.base_url),
            Scope::Country(name) => format!("{}/historical/{}", self.base_url, name),
        }
    }
}

impl HistoricalSource for HistoricalClient {
    fn fetch(&self, scope: &Scope, last_days: u32) -> Result<Historical, AppError> {
        if last_days == 0 {
            return Err(AppError::usage("Number of days must be > 0."));
        }

        let url = self.endpoint(scope);
        log::info!("fetching {url} (lastdays={last_days})");

        let resp = self
            .client
            .get(&url)
            .query(&[("lastdays", last_days.to_string())])
            .send()
            .map_err(|e| AppError::data(format!("disease.sh request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::data(format!(
                "disease.sh request for {scope} failed with status {}.",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .map_err(|e| AppError::data(format!("Failed to read disease.sh response: {e}")))?;

        let historical = parse_historical(scope, &body)?;
        log::debug!(
            "received {} case / {} death / {} recovered entries",
            historical.cases.len(),
            historical.deaths.len(),
            historical.recovered.len()
        );
        Ok(historical)
    }
}

/// Decode a `/historical/...` body for the given scope.
pub fn parse_historical(scope: &Scope, body: &str) -> Result<Historical, AppError> {
    let parse_err = |e: serde_json::Error| AppError::data(format!("Failed to parse disease.sh response: {e}"));

    match scope {
        Scope::Global => serde_json::from_str(body).map_err(parse_err),
        Scope::Country(_) => {
            let resp: CountryResponse = serde_json::from_str(body).map_err(parse_err)?;
            Ok(Historical {
                country: Some(resp.country),
                cases: resp.timeline.cases,
                deaths: resp.timeline.deaths,
                recovered: resp.timeline.recovered,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_payload() {
        let body = r#"{
            "cases": {"1/22/20": 557, "1/23/20": 657},
            "deaths": {"1/22/20": 17, "1/23/20": 18},
            "recovered": {"1/22/20": 30, "1/23/20": 32}
        }"#;
        let h = parse_historical(&Scope::Global, body).unwrap();
        assert_eq!(h.country, None);
        assert_eq!(h.series(CaseKind::Cases).get("1/23/20"), Some(657));
        assert_eq!(h.series(CaseKind::Deaths).len(), 2);
        assert_eq!(h.series(CaseKind::Recovered).get("1/22/20"), Some(30));
    }

    #[test]
    fn parses_country_payload_and_missing_recovered() {
        let body = r#"{
            "country": "Italy",
            "province": ["mainland"],
            "timeline": {
                "cases": {"3/1/21": 10, "3/2/21": 12},
                "deaths": {"3/1/21": 1, "3/2/21": 1}
            }
        }"#;
        let h = parse_historical(&Scope::Country("italy".to_string()), body).unwrap();
        assert_eq!(h.country.as_deref(), Some("Italy"));
        assert_eq!(h.cases.len(), 2);
        assert!(h.recovered.is_empty());
    }

    #[test]
    fn malformed_body_is_a_data_error() {
        let err = parse_historical(&Scope::Global, "{\"message\": \"not found\"}").unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_DATA);
    }

    #[test]
    fn endpoint_depends_on_scope() {
        let client = HistoricalClient::new("http://localhost:9000/v3/covid-19/");
        assert_eq!(
            client.endpoint(&Scope::Global),
            "http://localhost:9000/v3/covid-19/historical/all"
        );
        assert_eq!(
            client.endpoint(&Scope::Country("usa".to_string())),
            "http://localhost:9000/v3/covid-19/historical/usa"
        );
    }

    #[test]
    fn zero_days_is_rejected_before_any_request() {
        // Unroutable base: must fail on validation, not on the network.
        let client = HistoricalClient::new("http://127.0.0.1:1");
        let err = client.fetch(&Scope::Global, 0).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_USAGE);
    }
}
