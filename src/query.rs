use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

use crate::services::{ApiError, ApiResult};

pub const MAX_LIMIT: usize = 1000;

/// List request as the console sends it: reserved `page`, `limit` and
/// `sort` keys plus arbitrary filters. A filter with several values matches
/// any of them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub sort: Option<String>,
    pub filters: BTreeMap<String, Vec<String>>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.entry(key.into()).or_default().push(value.into());
        self
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> ApiResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "page" => params.page = Some(parse_count("page", value)?),
                "limit" => params.limit = Some(parse_count("limit", value)?),
                "sort" => params.sort = Some(value.to_string()),
                _ => {
                    params
                        .filters
                        .entry(key.to_string())
                        .or_default()
                        .push(value.to_string());
                }
            }
        }
        Ok(params)
    }
}

fn parse_count(name: &str, raw: &str) -> ApiResult<usize> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::Validation(format!("invalid {name}: {raw}")))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchMode {
    /// Equality against a scalar, membership against an array field.
    Exact,
    /// Case-insensitive substring.
    Contains,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldFilter {
    pub key: &'static str,
    pub path: &'static str,
    pub mode: MatchMode,
}

impl FieldFilter {
    pub const fn exact(key: &'static str, path: &'static str) -> Self {
        Self {
            key,
            path,
            mode: MatchMode::Exact,
        }
    }

    pub const fn contains(key: &'static str, path: &'static str) -> Self {
        Self {
            key,
            path,
            mode: MatchMode::Contains,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct QuerySpec {
    pub default_limit: usize,
    pub default_sort: Option<&'static str>,
    pub filters: &'static [FieldFilter],
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortKey {
    pub path: String,
    pub descending: bool,
}

impl SortKey {
    /// `created_at` sorts ascending, `-created_at` descending.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (path, descending) = match raw.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (raw, false),
        };
        if path.is_empty() {
            return None;
        }
        Some(Self {
            path: path.to_string(),
            descending,
        })
    }
}

pub fn get_nested_value<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, key| current.as_object()?.get(key))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn matches_filter(record: &Value, filter: &FieldFilter, wanted: &[String]) -> bool {
    let Some(field) = get_nested_value(record, filter.path) else {
        return false;
    };
    match filter.mode {
        MatchMode::Exact => {
            let candidates: Vec<String> = match field {
                Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
                other => scalar_text(other).into_iter().collect(),
            };
            candidates
                .iter()
                .any(|candidate| wanted.iter().any(|value| value == candidate))
        }
        MatchMode::Contains => {
            let Some(text) = field.as_str() else {
                return false;
            };
            let text = text.to_lowercase();
            wanted
                .iter()
                .any(|needle| text.contains(&needle.to_lowercase()))
        }
    }
}

/// Sort position of a single field value. Kinds rank in declaration order
/// so values of different kinds never tie.
enum SortRank<'a> {
    Missing,
    Bool(bool),
    Number(f64),
    Timestamp(DateTime<FixedOffset>),
    Text(&'a str),
    Nested,
}

impl<'a> SortRank<'a> {
    fn of(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::Bool(flag)) => Self::Bool(*flag),
            Some(Value::Number(number)) => Self::Number(number.as_f64().unwrap_or(f64::NAN)),
            Some(Value::String(text)) => match DateTime::parse_from_rfc3339(text) {
                Ok(at) => Self::Timestamp(at),
                Err(_) => Self::Text(text.as_str()),
            },
            Some(Value::Array(_) | Value::Object(_)) => Self::Nested,
        }
    }

    fn kind(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::Timestamp(_) => 3,
            Self::Text(_) => 4,
            Self::Nested => 5,
        }
    }
}

/// Total order used for sorting: null and missing first, then booleans,
/// numbers, timestamps and plain strings, each by its natural order.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let (a, b) = (SortRank::of(a), SortRank::of(b));
    match (&a, &b) {
        (SortRank::Bool(x), SortRank::Bool(y)) => x.cmp(y),
        (SortRank::Number(x), SortRank::Number(y)) => x.total_cmp(y),
        (SortRank::Timestamp(x), SortRank::Timestamp(y)) => x.cmp(y),
        (SortRank::Text(x), SortRank::Text(y)) => x.cmp(y),
        _ => a.kind().cmp(&b.kind()),
    }
}

/// Filter, sort and paginate `records` the way the REST backend would.
pub fn run_query<T>(records: &[T], params: &ListParams, spec: &QuerySpec) -> ApiResult<Page<T>>
where
    T: Serialize + Clone,
{
    let mut rows = records
        .iter()
        .map(|record| -> ApiResult<(Value, &T)> { Ok((serde_json::to_value(record)?, record)) })
        .collect::<ApiResult<Vec<(Value, &T)>>>()?;

    for (key, values) in &params.filters {
        let wanted: Vec<String> = values.iter().filter(|v| !v.is_empty()).cloned().collect();
        if wanted.is_empty() {
            continue;
        }
        match spec.filters.iter().find(|filter| filter.key == key) {
            Some(filter) => rows.retain(|(value, _)| matches_filter(value, filter, &wanted)),
            None => debug!(filter = %key, "ignoring unknown filter"),
        }
    }

    let sort = match &params.sort {
        Some(raw) => SortKey::parse(raw),
        None => spec.default_sort.and_then(SortKey::parse),
    };
    if let Some(key) = sort {
        rows.sort_by(|(a, _), (b, _)| {
            let order = compare_values(
                get_nested_value(a, &key.path),
                get_nested_value(b, &key.path),
            );
            if key.descending { order.reverse() } else { order }
        });
    }

    let page = params.page.unwrap_or(1).max(1);
    let limit = params
        .limit
        .unwrap_or(spec.default_limit)
        .clamp(1, MAX_LIMIT);
    let total = rows.len();
    let data = rows
        .into_iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .map(|(_, record)| record.clone())
        .collect();

    Ok(Page {
        data,
        total,
        page,
        limit,
        total_pages: total.div_ceil(limit),
    })
}
