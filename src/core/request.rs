use crate::utils::error::Result;
use serde::Serialize;
use std::fmt;
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire token for an enum value rendered into a query string.
///
/// Implementors derive `Ord` following declaration order so that sets render
/// in a stable, declaration-ordered comma list regardless of caller order.
pub trait QueryValue {
    fn as_query(&self) -> &'static str;
}

/// Pagination controls for list endpoints.
///
/// When `include_all` is set, `page` and `page_size` are ignored and the
/// pagination walker iterates the collection to the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationParameters {
    pub include_all: bool,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PaginationParameters {
    pub fn all() -> Self {
        Self {
            include_all: true,
            page: None,
            page_size: None,
        }
    }

    pub fn page(page: u64, page_size: u64) -> Self {
        Self {
            include_all: false,
            page: Some(page),
            page_size: Some(page_size),
        }
    }
}

/// Insertion-ordered query-string assembly.
///
/// Parameters render in the order they were added; adding a key twice
/// replaces the earlier value in place, so identical inputs always produce
/// byte-identical query strings.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    params: Vec<(String, String)>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        if let Some(existing) = self.params.iter_mut().find(|(k, _)| k == key) {
            existing.1 = value;
        } else {
            self.params.push((key.to_string(), value));
        }
        self
    }

    /// Add the parameter only when a value is present.
    pub fn opt_param(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Render an enum set as a comma-separated list in declaration order.
    /// Empty sets are omitted entirely.
    pub fn value_list<T: QueryValue + Copy + Ord>(self, key: &str, values: &[T]) -> Self {
        if values.is_empty() {
            return self;
        }
        let mut sorted = values.to_vec();
        sorted.sort();
        sorted.dedup();
        let joined = sorted
            .iter()
            .map(|v| v.as_query())
            .collect::<Vec<_>>()
            .join(",");
        self.param(key, joined)
    }

    /// Comma-joined numeric id list, omitted when empty.
    pub fn id_list(self, key: &str, ids: &[u64]) -> Self {
        if ids.is_empty() {
            return self;
        }
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.param(key, joined)
    }

    pub fn pagination(self, pagination: &PaginationParameters) -> Self {
        if pagination.include_all {
            self.param("includeAll", "true")
        } else {
            self.opt_param("page", pagination.page)
                .opt_param("pageSize", pagination.page_size)
        }
    }

    pub fn opt_pagination(self, pagination: Option<&PaginationParameters>) -> Self {
        match pagination {
            Some(p) => self.pagination(p),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Append the canonical query string to a path.
    pub fn append_to(&self, path: &str) -> String {
        if self.params.is_empty() {
            return path.to_string();
        }
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish();
        format!("{}?{}", path, encoded)
    }
}

/// A single logical HTTP exchange, immutable once built.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub idempotent: bool,
}

impl RequestDescriptor {
    fn new(method: HttpMethod, path: impl Into<String>, idempotent: bool) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
            idempotent,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path, true)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path, false)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path, false)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path, false)
    }

    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }
}
