//! Request descriptors
//!
//! A [`Request`] describes a fetch without performing it: method, path, and the
//! optional filter, sort and cursor that get serialized onto the query string.

use crate::error::Result;
use reqwest::Method;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Something that can write its own fields onto a URL's query string.
///
/// Implementations must omit absent fields entirely.
pub trait ApplyToUrl: fmt::Debug + Send + Sync {
    fn apply_to_url(&self, url: &mut Url);
}

/// Immutable description of an API call
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    filter: Option<Arc<dyn ApplyToUrl>>,
    sort: Option<Sorting>,
    cursor: Option<Cursor>,
}

impl Request {
    /// GET request for a path relative to the API root
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            filter: None,
            sort: None,
            cursor: None,
        }
    }

    pub fn with_filter<F>(mut self, filter: Option<&F>) -> Self
    where
        F: ApplyToUrl + Clone + 'static,
    {
        self.filter = filter.map(|f| Arc::new(f.clone()) as Arc<dyn ApplyToUrl>);
        self
    }

    pub fn with_sort(mut self, sort: Option<&Sorting>) -> Self {
        self.sort = sort.cloned();
        self
    }

    pub fn with_cursor(mut self, cursor: Option<&Cursor>) -> Self {
        self.cursor = cursor.copied();
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Build the absolute URL against `base_url`.
    ///
    /// Filter, sort and cursor are applied in that order on top of whatever query the
    /// path already carries; later keys replace earlier ones.
    pub fn url(&self, base_url: &str) -> Result<Url> {
        let base = base_url.trim_end_matches('/');
        let mut url = if self.path.starts_with('/') {
            Url::parse(&format!("{}{}", base, self.path))?
        } else {
            Url::parse(&format!("{}/{}", base, self.path))?
        };

        if let Some(filter) = &self.filter {
            filter.apply_to_url(&mut url);
        }
        if let Some(sort) = &self.sort {
            sort.apply_to_url(&mut url);
        }
        if let Some(cursor) = &self.cursor {
            cursor.apply_to_url(&mut url);
        }

        Ok(url)
    }
}

/// Collects query parameters, dropping unset ones, then merges them into a URL.
#[derive(Debug, Default)]
pub(crate) struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a string parameter; `None` and empty strings are omitted
    pub fn text(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.0.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Set a numeric parameter; `None` and zero are omitted
    pub fn number(mut self, key: &str, value: Option<u32>) -> Self {
        if let Some(value) = value.filter(|v| *v > 0) {
            self.0.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Set a tri-state flag as `yes`/`no`; `None` is omitted
    pub fn flag(mut self, key: &str, value: Option<bool>) -> Self {
        if let Some(value) = value {
            self.0.push((key.to_string(), yes_no(value).to_string()));
        }
        self
    }

    /// Set a parameter unconditionally
    pub fn always(mut self, key: &str, value: impl ToString) -> Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    /// Replace existing keys of the same name, keep the rest of the query
    pub fn apply(self, url: &mut Url) {
        if self.0.is_empty() {
            return;
        }

        let params = self.0;
        let mut pairs: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| !params.iter().any(|(p, _)| p.as_str() == &**k))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        pairs.extend(params);

        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

pub(crate) fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

/// Sort order: field name plus direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sorting {
    pub order_by: String,
    pub direction: Direction,
}

impl Sorting {
    pub fn new(order_by: impl Into<String>, direction: Direction) -> Self {
        Self {
            order_by: order_by.into(),
            direction,
        }
    }

    pub fn ascending(order_by: impl Into<String>) -> Self {
        Self::new(order_by, Direction::Ascending)
    }

    pub fn descending(order_by: impl Into<String>) -> Self {
        Self::new(order_by, Direction::Descending)
    }
}

impl ApplyToUrl for Sorting {
    fn apply_to_url(&self, url: &mut Url) {
        QueryParams::new()
            .always("orderby", &self.order_by)
            .always("direction", self.direction.as_str())
            .apply(url);
    }
}

/// Which page of a collection to request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub offset: u32,
    pub max: u32,
}

impl Cursor {
    pub fn new(offset: u32, max: u32) -> Self {
        Self { offset, max }
    }

    /// Read `offset` and `max` back from a URL query; both must be present
    pub fn from_url(url: &Url) -> Option<Self> {
        let mut offset = None;
        let mut max = None;

        for (key, value) in url.query_pairs() {
            match &*key {
                "offset" => offset = value.parse().ok(),
                "max" => max = value.parse().ok(),
                _ => {}
            }
        }

        Some(Self {
            offset: offset?,
            max: max?,
        })
    }
}

impl ApplyToUrl for Cursor {
    fn apply_to_url(&self, url: &mut Url) {
        // Both fields are always written, zero included.
        QueryParams::new()
            .always("offset", self.offset)
            .always("max", self.max)
            .apply(url);
    }
}
