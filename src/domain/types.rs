//! Shared domain types.
//!
//! These types are intentionally small and serializable so they can be:
//!
//! - decoded straight from the disease.sh payload
//! - fed to the delta builder and the chart/plot front-ends
//! - exported to JSON/CSV and reloaded later for plotting

use std::fmt;
use std::marker::PhantomData;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Which upstream field the trend is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CaseKind {
    Cases,
    Recovered,
    Deaths,
}

impl CaseKind {
    pub const ALL: [CaseKind; 3] = [CaseKind::Cases, CaseKind::Recovered, CaseKind::Deaths];

    /// Field name in the disease.sh payload.
    pub fn field_name(self) -> &'static str {
        match self {
            CaseKind::Cases => "cases",
            CaseKind::Recovered => "recovered",
            CaseKind::Deaths => "deaths",
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            CaseKind::Cases => "Cases",
            CaseKind::Recovered => "Recovered",
            CaseKind::Deaths => "Deaths",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Geographic scope of a historical query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    /// Worldwide totals (`/historical/all`).
    #[default]
    Global,
    /// A single country by name or ISO code (`/historical/{country}`).
    Country(String),
}

impl Scope {
    /// Build a scope from an optional, possibly blank, country argument.
    pub fn from_country(country: Option<&str>) -> Self {
        match country.map(str::trim) {
            Some(c) if !c.is_empty() => Scope::Country(c.to_string()),
            _ => Scope::Global,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::Country(name) => write!(f, "{name}"),
        }
    }
}

/// Default fetch window, in days.
pub const DEFAULT_LAST_DAYS: u32 = 120;

/// One trend view as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults) or from TUI settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendRequest {
    pub kind: CaseKind,
    pub scope: Scope,
    /// Size of the fetch window (`lastdays`).
    pub last_days: u32,
}

impl TrendRequest {
    /// Whether serving `other` needs a new upstream document.
    ///
    /// `kind` only selects a field of the same document, so it never does.
    pub fn needs_fetch_for(&self, other: &TrendRequest) -> bool {
        self.scope != other.scope || self.last_days != other.last_days
    }
}

impl Default for TrendRequest {
    fn default() -> Self {
        Self {
            kind: CaseKind::Cases,
            scope: Scope::Global,
            last_days: DEFAULT_LAST_DAYS,
        }
    }
}

/// Ordered mapping of date label -> cumulative count.
///
/// Entries keep the order in which they were received. Nothing here sorts;
/// the upstream is expected to deliver dates in ascending chronological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CumulativeSeries<K = String>(Vec<(K, i64)>);

impl<K> CumulativeSeries<K> {
    pub fn new(entries: Vec<(K, i64)>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[(K, i64)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, i64)> {
        self.0.iter().map(|(k, v)| (k, *v))
    }

    /// Value of the entry with the given key (first match).
    pub fn get<Q>(&self, key: &Q) -> Option<i64>
    where
        K: PartialEq<Q>,
        Q: ?Sized,
    {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }
}

impl<K> Default for CumulativeSeries<K> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<K> FromIterator<(K, i64)> for CumulativeSeries<K> {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<K: Serialize> Serialize for CumulativeSeries<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// Decodes a JSON object in document order (a plain `HashMap` would lose it).
impl<'de, K: Deserialize<'de>> Deserialize<'de> for CumulativeSeries<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SeriesVisitor<K>(PhantomData<K>);

        impl<'de, K: Deserialize<'de>> Visitor<'de> for SeriesVisitor<K> {
            type Value = CumulativeSeries<K>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of date -> cumulative count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<K, i64>()? {
                    entries.push((k, v));
                }
                Ok(CumulativeSeries(entries))
            }
        }

        deserializer.deserialize_map(SeriesVisitor(PhantomData))
    }
}

/// One day's increment: `cumulative[date] - cumulative[previous date]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaPoint<K = String> {
    pub date: K,
    pub delta: i64,
}

/// A dated `{x, y}` point as handed to chart renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: NaiveDate,
    pub y: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_deserializes_in_document_order() {
        let json = r#"{"3/2/21": 30, "1/1/21": 10, "2/1/21": 20}"#;
        let series: CumulativeSeries = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = series.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["3/2/21", "1/1/21", "2/1/21"]);
        assert_eq!(series.get("1/1/21"), Some(10));
    }

    #[test]
    fn series_serializes_back_in_order() {
        let series: CumulativeSeries =
            vec![("b".to_string(), 2), ("a".to_string(), 1)].into_iter().collect();
        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(json, r#"{"b":2,"a":1}"#);
    }

    #[test]
    fn series_rejects_non_numeric_counts() {
        let json = r#"{"1/1/21": "ten"}"#;
        assert!(serde_json::from_str::<CumulativeSeries>(json).is_err());
    }

    #[test]
    fn case_kind_cycles_through_all() {
        assert_eq!(CaseKind::Cases.next(), CaseKind::Recovered);
        assert_eq!(CaseKind::Deaths.next(), CaseKind::Cases);
        assert_eq!(CaseKind::Cases.prev(), CaseKind::Deaths);
        for kind in CaseKind::ALL {
            assert_eq!(kind.next().prev(), kind);
        }
    }

    #[test]
    fn only_scope_and_window_changes_need_a_fetch() {
        let base = TrendRequest::default();
        let deaths = TrendRequest { kind: CaseKind::Deaths, ..base.clone() };
        let wider = TrendRequest { last_days: 30, ..base.clone() };
        let italy = TrendRequest { scope: Scope::Country("italy".to_string()), ..base.clone() };

        assert!(!base.needs_fetch_for(&base));
        assert!(!base.needs_fetch_for(&deaths));
        assert!(base.needs_fetch_for(&wider));
        assert!(base.needs_fetch_for(&italy));
    }

    #[test]
    fn blank_country_means_global() {
        assert_eq!(Scope::from_country(None), Scope::Global);
        assert_eq!(Scope::from_country(Some("  ")), Scope::Global);
        assert_eq!(
            Scope::from_country(Some(" usa ")),
            Scope::Country("usa".to_string())
        );
        assert_eq!(Scope::Global.to_string(), "global");
    }
}
