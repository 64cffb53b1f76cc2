//! Read query description
//!
//! A [`Query`] names a table, a column projection, equality/inclusion filters,
//! one sort key and an optional row limit. Backends translate it into their
//! own wire format; [`Query::to_query_pairs`] produces the PostgREST form.
//!
//! ## Security
//!
//! Table and column identifiers are validated before a query is built so they
//! can be placed into URLs verbatim. Only ASCII alphanumerics and underscores
//! are allowed.

use std::cmp::Ordering;

use serde_json::Value;

use super::{Row, StorageError};

/// Maximum allowed length for table and column identifiers
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Validate a table or column identifier for safe use in request paths.
pub(crate) fn validate_identifier(name: &str) -> Result<(), StorageError> {
    if name.is_empty() {
        return Err(StorageError::InvalidQuery(
            "Identifier cannot be empty".to_string(),
        ));
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(StorageError::InvalidQuery(format!(
            "Identifier too long (max {} characters)",
            MAX_IDENTIFIER_LENGTH
        )));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(StorageError::InvalidQuery(format!(
            "Identifier '{}' contains invalid characters",
            name
        )));
    }

    Ok(())
}

/// Row filter
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `column = value`
    Eq(String, Value),
    /// `column ∈ (values)`
    In(String, Vec<Value>),
}

impl Filter {
    pub fn column(&self) -> &str {
        match self {
            Filter::Eq(column, _) | Filter::In(column, _) => column,
        }
    }

    /// Evaluate the filter against a row. Missing columns never match.
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Filter::Eq(column, expected) => row.get(column).is_some_and(|v| v == expected),
            Filter::In(column, values) => row
                .get(column)
                .is_some_and(|v| values.iter().any(|candidate| candidate == v)),
        }
    }
}

/// Sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    /// Compare two rows on this key. Nulls and missing values sort last in
    /// both directions; the PostgREST encoding asks for `nullslast` to match.
    pub fn compare(&self, a: &Row, b: &Row) -> Ordering {
        let left = a.get(&self.column).filter(|v| !v.is_null());
        let right = b.get(&self.column).filter(|v| !v.is_null());
        match (left, right) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(l), Some(r)) => {
                let ord = compare_values(l, r);
                if self.ascending { ord } else { ord.reverse() }
            }
        }
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(l), Value::Number(r)) => {
            let l = l.as_f64().unwrap_or(0.0);
            let r = r.as_f64().unwrap_or(0.0);
            l.partial_cmp(&r).unwrap_or(Ordering::Equal)
        }
        (Value::String(l), Value::String(r)) => l.cmp(r),
        (Value::Bool(l), Value::Bool(r)) => l.cmp(r),
        _ => Ordering::Equal,
    }
}

/// Read query against one table
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: String,
    pub columns: Vec<String>,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Query {
    /// Start a query selecting every column of `table`
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Restrict the projection to the given columns
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(column.into(), value.into()));
        self
    }

    pub fn is_in<I, V>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.filters.push(Filter::In(
            column.into(),
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Only rows with `is_active = true`
    pub fn active(self) -> Self {
        self.eq("is_active", true)
    }

    pub fn order_by(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.into(),
            ascending,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check every identifier the query carries
    pub fn validate(&self) -> Result<(), StorageError> {
        validate_identifier(&self.table)?;
        for column in &self.columns {
            validate_identifier(column)?;
        }
        for filter in &self.filters {
            validate_identifier(filter.column())?;
        }
        if let Some(order) = &self.order {
            validate_identifier(&order.column)?;
        }
        Ok(())
    }

    /// Apply filters, ordering, limit and projection to an in-memory table,
    /// with the same results [`Query::to_query_pairs`] gets from PostgREST.
    pub fn apply<'a, I>(&self, rows: I) -> Vec<Row>
    where
        I: IntoIterator<Item = &'a Row>,
    {
        let mut matched: Vec<&Row> = rows
            .into_iter()
            .filter(|row| self.filters.iter().all(|f| f.matches(row)))
            .collect();

        if let Some(order) = &self.order {
            // stable sort keeps insertion order for ties
            matched.sort_by(|a, b| order.compare(a, b));
        }

        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }

        matched
            .into_iter()
            .map(|row| {
                if self.columns.is_empty() {
                    row.clone()
                } else {
                    self.columns
                        .iter()
                        .filter_map(|c| row.get(c).map(|v| (c.clone(), v.clone())))
                        .collect()
                }
            })
            .collect()
    }

    /// Encode as PostgREST query-string pairs.
    ///
    /// ```rust
    /// use academy_site::storage::Query;
    ///
    /// let q = Query::table("news").active().order_by("published_date", false).limit(12);
    /// let pairs = q.to_query_pairs();
    /// assert!(pairs.contains(&("is_active".to_string(), "eq.true".to_string())));
    /// assert!(pairs.contains(&("order".to_string(), "published_date.desc.nullslast".to_string())));
    /// ```
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let select = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(",")
        };
        pairs.push(("select".to_string(), select));

        for filter in &self.filters {
            match filter {
                Filter::Eq(column, value) => {
                    pairs.push((column.clone(), format!("eq.{}", literal(value))));
                }
                Filter::In(column, values) => {
                    let list: Vec<String> = values.iter().map(quoted_literal).collect();
                    pairs.push((column.clone(), format!("in.({})", list.join(","))));
                }
            }
        }

        if let Some(order) = &self.order {
            let direction = if order.ascending { "asc" } else { "desc" };
            // Postgres puts nulls first when descending unless told otherwise
            pairs.push((
                "order".to_string(),
                format!("{}.{}.nullslast", order.column, direction),
            ));
        }

        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }

        pairs
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// List members containing PostgREST reserved characters must be quoted.
fn quoted_literal(value: &Value) -> String {
    let raw = literal(value);
    if raw.contains([',', '(', ')', '"', ' ']) {
        format!("\"{}\"", raw.replace('"', "\\\""))
    } else {
        raw
    }
}
