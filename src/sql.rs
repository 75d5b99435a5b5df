//! Parameterized SQL for the customers table: identifiers come from
//! allow-lists only, values are always bound.

use crate::error::AppError;
use crate::model::WRITABLE_COLUMNS;
use serde::Deserialize;

pub const COLUMNS: &str = "id, name, phone, email, address, district";

pub const SELECT_BY_ID: &str =
    "SELECT id, name, phone, email, address, district FROM customers WHERE id = ?";

pub const INSERT: &str = "INSERT INTO customers (name, phone, email, address, district) \
     VALUES (?, ?, ?, ?, ?) RETURNING id, name, phone, email, address, district";

/// Full replace: every writable column overwritten, absent fields as NULL.
pub const REPLACE: &str = "UPDATE customers SET name = ?, phone = ?, email = ?, address = ?, district = ? \
     WHERE id = ? RETURNING id, name, phone, email, address, district";

pub const DELETE: &str = "DELETE FROM customers WHERE id = ?";

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 1000;

const SORTABLE: &[&str] = &["id", "name", "email", "phone", "address", "district"];

/// List query parameters as they arrive on the wire.
#[derive(Deserialize, Default, Clone, Debug)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub search: Option<String>,
    pub email: Option<String>,
    pub district: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Option<String>>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Option<String>) {
        self.params.push(v);
    }
}

/// Treat empty query-param strings as absent.
fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

/// WHERE clause shared by the page and count queries: exact filters ANDed,
/// search OR'd across all text columns and ANDed with the filters.
fn where_clause(p: &ListParams, q: &mut QueryBuf) -> String {
    let mut parts = Vec::new();
    if let Some(email) = non_empty(&p.email) {
        q.push_param(Some(email.to_string()));
        parts.push("email = ?".to_string());
    }
    if let Some(district) = non_empty(&p.district) {
        q.push_param(Some(district.to_string()));
        parts.push("district = ?".to_string());
    }
    if let Some(search) = non_empty(&p.search) {
        let pattern = format!("%{}%", search.to_lowercase());
        let mut ors = Vec::new();
        for col in ["name", "email", "phone", "address", "district"] {
            q.push_param(Some(pattern.clone()));
            ors.push(format!("LOWER({}) LIKE ?", col));
        }
        parts.push(format!("({})", ors.join(" OR ")));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", parts.join(" AND "))
    }
}

/// ORDER BY from the allow-lists; anything else is a client error. `id` is
/// appended as a secondary key so page order is deterministic.
fn order_clause(p: &ListParams) -> Result<String, AppError> {
    let sort_by = p.sort_by.as_deref().unwrap_or("id");
    if !SORTABLE.contains(&sort_by) {
        return Err(AppError::Validation(format!(
            "invalid sort field: {}",
            sort_by
        )));
    }
    let order = p.order.as_deref().unwrap_or("asc");
    let direction = match order {
        "asc" => "ASC",
        "desc" => "DESC",
        _ => return Err(AppError::Validation("invalid order (asc|desc)".into())),
    };
    if sort_by == "id" {
        Ok(format!(" ORDER BY id {}", direction))
    } else {
        Ok(format!(" ORDER BY {} {}, id ASC", sort_by, direction))
    }
}

/// SELECT one page of the filtered, sorted result set. Fails before any
/// query runs when sort_by/order fall outside the allow-lists.
pub fn select_page(p: &ListParams) -> Result<QueryBuf, AppError> {
    let order = order_clause(p)?;
    let mut q = QueryBuf::new();
    let where_sql = where_clause(p, &mut q);
    let limit = p.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = p.offset.unwrap_or(0);
    q.sql = format!(
        "SELECT {} FROM customers{}{} LIMIT {} OFFSET {}",
        COLUMNS, where_sql, order, limit, offset
    );
    Ok(q)
}

/// COUNT over the same WHERE clause, pre-pagination.
pub fn select_count(p: &ListParams) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(p, &mut q);
    q.sql = format!("SELECT COUNT(*) FROM customers{}", where_sql);
    q
}

/// UPDATE by id setting only the given columns; unknown columns are skipped.
/// Params hold the column values in order; the caller binds id last.
pub fn update_partial(fields: &[(String, Option<String>)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (col, val) in fields {
        if !WRITABLE_COLUMNS.contains(&col.as_str()) {
            continue;
        }
        q.push_param(val.clone());
        sets.push(format!("{} = ?", col));
    }
    q.sql = format!(
        "UPDATE customers SET {} WHERE id = ? RETURNING {}",
        sets.join(", "),
        COLUMNS
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ListParams {
        ListParams::default()
    }

    #[test]
    fn defaults_to_id_asc_page_of_ten() {
        let q = select_page(&params()).unwrap();
        assert_eq!(
            q.sql,
            format!(
                "SELECT {} FROM customers ORDER BY id ASC LIMIT 10 OFFSET 0",
                COLUMNS
            )
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn filters_and_search_share_one_where_clause() {
        let p = ListParams {
            email: Some("a@b.com".into()),
            district: Some("centro".into()),
            search: Some("Smith".into()),
            ..params()
        };
        let q = select_page(&p).unwrap();
        assert!(q.sql.contains("WHERE email = ? AND district = ? AND (LOWER(name) LIKE ?"));
        // exact filters + one pattern per searched column
        assert_eq!(q.params.len(), 7);
        assert_eq!(q.params[2].as_deref(), Some("%smith%"));

        let c = select_count(&p);
        assert!(c.sql.starts_with("SELECT COUNT(*) FROM customers WHERE "));
        assert_eq!(c.params.len(), 7);
    }

    #[test]
    fn empty_string_params_are_ignored() {
        let p = ListParams {
            email: Some(String::new()),
            search: Some(String::new()),
            ..params()
        };
        let q = select_page(&p).unwrap();
        assert!(!q.sql.contains("WHERE"));
        assert!(q.params.is_empty());
    }

    #[test]
    fn non_id_sort_gets_id_tie_break() {
        let p = ListParams {
            sort_by: Some("email".into()),
            order: Some("desc".into()),
            ..params()
        };
        let q = select_page(&p).unwrap();
        assert!(q.sql.contains(" ORDER BY email DESC, id ASC "));
    }

    #[test]
    fn sort_allow_list_rejects_unknown_field_and_order() {
        let p = ListParams {
            sort_by: Some("bogus".into()),
            ..params()
        };
        assert!(matches!(select_page(&p), Err(AppError::Validation(_))));

        let p = ListParams {
            order: Some("sideways".into()),
            ..params()
        };
        assert!(matches!(select_page(&p), Err(AppError::Validation(_))));
    }

    #[test]
    fn limit_is_capped() {
        let p = ListParams {
            limit: Some(50_000),
            offset: Some(20),
            ..params()
        };
        let q = select_page(&p).unwrap();
        assert!(q.sql.ends_with("LIMIT 1000 OFFSET 20"));
    }

    #[test]
    fn partial_update_skips_unknown_columns() {
        let fields = vec![
            ("phone".to_string(), Some("+12345678".to_string())),
            ("id".to_string(), Some("9".to_string())),
            ("district".to_string(), None),
        ];
        let q = update_partial(&fields);
        assert_eq!(
            q.sql,
            format!(
                "UPDATE customers SET phone = ?, district = ? WHERE id = ? RETURNING {}",
                COLUMNS
            )
        );
        assert_eq!(q.params.len(), 2);
        assert_eq!(q.params[1], None);
    }
}
