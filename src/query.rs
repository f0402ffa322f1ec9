use serde::Serialize;

/// SQL query builder for constructing parameterized list queries
/// Builds a filtered SELECT plus a matching COUNT query for pagination
///
/// All user-supplied values are bound as text parameters; columns that need a
/// different type carry an explicit cast in the generated SQL.
pub struct SqlQueryBuilder {
    base_query: String,
    count_query: String,
    where_clauses: Vec<String>,
    params: Vec<String>,
    order_clause: Option<String>,
    limit: i64,
    offset: i64,
}

impl SqlQueryBuilder {
    /// Creates a new builder for the given table
    pub fn new(table: &str) -> Self {
        Self {
            base_query: format!("SELECT * FROM {}", table),
            count_query: format!("SELECT COUNT(*) FROM {}", table),
            where_clauses: Vec::new(),
            params: Vec::new(),
            order_clause: None,
            limit: 10,
            offset: 0,
        }
    }

    /// Adds a case-insensitive substring filter (ILIKE) over one or more
    /// text columns, OR-ed together
    pub fn add_search(&mut self, columns: &[&str], term: &str) {
        let param_index = self.params.len() + 1;
        let clause = columns
            .iter()
            .map(|col| format!("{} ILIKE ${}", col, param_index))
            .collect::<Vec<_>>()
            .join(" OR ");
        self.where_clauses.push(format!("({})", clause));
        self.params.push(format!("%{}%", term));
    }

    /// Adds an exact-match filter on a text column (enums, categories)
    pub fn add_eq_text(&mut self, column: &str, value: &str) {
        let param_index = self.params.len() + 1;
        self.where_clauses.push(format!("{} = ${}", column, param_index));
        self.params.push(value.to_string());
    }

    /// Adds an exact-match filter on an integer column (foreign keys)
    pub fn add_eq_int(&mut self, column: &str, value: i32) {
        let param_index = self.params.len() + 1;
        self.where_clauses
            .push(format!("{} = ${}::int4", column, param_index));
        self.params.push(value.to_string());
    }

    /// Adds an exact-match filter on a boolean column
    pub fn add_eq_bool(&mut self, column: &str, value: bool) {
        let param_index = self.params.len() + 1;
        self.where_clauses
            .push(format!("{} = ${}::boolean", column, param_index));
        self.params.push(value.to_string());
    }

    /// Adds an inclusive lower bound on a timestamp column (ISO 8601 input)
    pub fn add_date_from(&mut self, column: &str, value: &str) {
        let param_index = self.params.len() + 1;
        self.where_clauses
            .push(format!("{} >= ${}::timestamptz", column, param_index));
        self.params.push(value.to_string());
    }

    /// Adds an inclusive upper bound on a timestamp column (ISO 8601 input)
    pub fn add_date_to(&mut self, column: &str, value: &str) {
        let param_index = self.params.len() + 1;
        self.where_clauses
            .push(format!("{} <= ${}::timestamptz", column, param_index));
        self.params.push(value.to_string());
    }

    /// Adds a raw WHERE clause with no bound parameter
    /// (e.g. column-to-column comparisons like low-stock checks)
    pub fn add_raw(&mut self, clause: &str) {
        self.where_clauses.push(clause.to_string());
    }

    /// Sets the ORDER BY clause (fixed sort per resource, never user input)
    pub fn set_order(&mut self, order: &str) {
        self.order_clause = Some(order.to_string());
    }

    /// Sets LIMIT/OFFSET pagination
    pub fn set_pagination(&mut self, limit: i64, offset: i64) {
        self.limit = limit.max(0);
        self.offset = offset.max(0);
    }

    /// Builds the final SELECT query string with all parameters
    pub fn build(&self) -> (String, Vec<String>) {
        let mut query = self.base_query.clone();

        if !self.where_clauses.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&self.where_clauses.join(" AND "));
        }

        if let Some(ref order) = self.order_clause {
            query.push_str(" ORDER BY ");
            query.push_str(order);
        }

        // LIMIT and OFFSET are validated integers, appended directly
        query.push_str(&format!(" LIMIT {}", self.limit));
        query.push_str(&format!(" OFFSET {}", self.offset));

        (query, self.params.clone())
    }

    /// Builds the matching COUNT query (same filters, no pagination)
    pub fn build_count(&self) -> (String, Vec<String>) {
        let mut query = self.count_query.clone();

        if !self.where_clauses.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&self.where_clauses.join(" AND "));
        }

        (query, self.params.clone())
    }
}

/// Standard list response envelope: {total, items, limit, offset}
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub total: i64,
    pub items: Vec<T>,
    pub limit: i64,
    pub offset: i64,
}

/// Resolve limit/offset query parameters with per-resource defaults
pub fn pagination_or(limit: Option<i64>, offset: Option<i64>, default_limit: i64) -> (i64, i64) {
    (limit.unwrap_or(default_limit).max(0), offset.unwrap_or(0).max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_query_has_default_pagination() {
        let builder = SqlQueryBuilder::new("customers");
        let (query, params) = builder.build();
        assert_eq!(query, "SELECT * FROM customers LIMIT 10 OFFSET 0");
        assert!(params.is_empty());
    }

    #[test]
    fn test_search_spans_columns_with_single_param() {
        let mut builder = SqlQueryBuilder::new("customers");
        builder.add_search(&["name", "phone", "email"], "ana");
        let (query, params) = builder.build();
        assert!(query.contains("(name ILIKE $1 OR phone ILIKE $1 OR email ILIKE $1)"));
        assert_eq!(params, vec!["%ana%".to_string()]);
    }

    #[test]
    fn test_filters_accumulate_with_and() {
        let mut builder = SqlQueryBuilder::new("repair_orders");
        builder.add_eq_text("status", "pending");
        builder.add_eq_int("customer_id", 3);
        builder.add_date_from("created_at", "2024-01-01T00:00:00Z");
        builder.set_order("created_at DESC");
        builder.set_pagination(20, 40);

        let (query, params) = builder.build();
        assert!(query.contains("status = $1 AND customer_id = $2::int4 AND created_at >= $3::timestamptz"));
        assert!(query.ends_with("ORDER BY created_at DESC LIMIT 20 OFFSET 40"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_count_query_shares_filters_but_not_pagination() {
        let mut builder = SqlQueryBuilder::new("inventory");
        builder.add_eq_text("category", "brakes");
        builder.set_pagination(5, 10);

        let (count_query, params) = builder.build_count();
        assert_eq!(count_query, "SELECT COUNT(*) FROM inventory WHERE category = $1");
        assert_eq!(params, vec!["brakes".to_string()]);
    }

    #[test]
    fn test_raw_clause_binds_no_param() {
        let mut builder = SqlQueryBuilder::new("inventory");
        builder.add_raw("quantity <= low_stock_alert");
        let (query, params) = builder.build();
        assert!(query.contains("WHERE quantity <= low_stock_alert"));
        assert!(params.is_empty());
    }

    #[test]
    fn test_pagination_defaults() {
        assert_eq!(pagination_or(None, None, 10), (10, 0));
        assert_eq!(pagination_or(Some(50), Some(20), 10), (50, 20));
        // Negative values are clamped rather than rejected
        assert_eq!(pagination_or(Some(-5), Some(-1), 10), (0, 0));
    }
}
