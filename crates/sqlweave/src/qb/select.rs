//! SELECT statement builder.

use crate::arg::Arg;
use crate::args;
use crate::buf::SqlBuf;
use crate::clauses::Clauses;
use crate::error::{SqlError, SqlResult};
use crate::expr::{Like, Or, alias, expr, gt};
use crate::placeholder::PlaceholderFormat;
use crate::qb::traits::{Statement, impl_statement};
use crate::sqlizer::{Part, Rendered};
use std::collections::HashMap;

/// Sort direction for [`OrderCond`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One ORDER BY entry referring to a column by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderCond {
    pub column_id: i32,
    pub direction: Direction,
}

impl OrderCond {
    pub fn new(column_id: i32, direction: Direction) -> Self {
        Self {
            column_id,
            direction,
        }
    }
}

/// Pagination appended after ORDER BY. Excludes `limit`/`offset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paginator {
    /// `LIMIT size`, plus `OFFSET size * (page - 1)` past the first page.
    ByPage { page_size: u64, page: u64 },
    /// `<id column> > last_id ... LIMIT limit`. Needs [`SelectBuilder::id_column`].
    ById { limit: u64, last_id: i64 },
}

impl Paginator {
    pub fn by_page(page_size: u64, page: u64) -> Self {
        Self::ByPage { page_size, page }
    }

    pub fn by_id(limit: u64, last_id: i64) -> Self {
        Self::ById { limit, last_id }
    }
}

/// SELECT statement builder.
///
/// Clauses render in a fixed order regardless of the order the setters were
/// called in. Cloning is cheap, so a common base can be forked freely.
#[derive(Clone, Debug, Default)]
pub struct SelectBuilder {
    format: PlaceholderFormat,
    prefixes: Clauses<Part>,
    options: Clauses<String>,
    columns: Clauses<Part>,
    from: Part,
    joins: Clauses<Part>,
    where_parts: Clauses<Part>,
    group_bys: Clauses<Part>,
    having_parts: Clauses<Part>,
    order_bys: Clauses<Part>,
    limit: Option<u64>,
    offset: Option<u64>,
    suffixes: Clauses<Part>,
    id_column: Option<String>,
    paginator: Option<Paginator>,
    /// Build error
    build_error: Option<String>,
}

impl SelectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder format applied when this builder is the outermost statement.
    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    // ==================== Prefix / options ====================

    /// Add SQL before `SELECT`, e.g. a `WITH` clause.
    pub fn prefix<A: Into<Arg>>(self, sql: &str, args: impl IntoIterator<Item = A>) -> Self {
        self.prefix_expr(expr(sql, args))
    }

    pub fn prefix_expr(mut self, e: impl Into<Part>) -> Self {
        self.prefixes.push(e.into());
        self
    }

    /// Prefix `WITH <name> AS (<sub>)`.
    pub fn with(self, name: &str, sub: SelectBuilder) -> Self {
        let cte = sub
            .prefix(&format!("WITH {name} AS ("), args![])
            .suffix(")", args![]);
        self.prefix_expr(cte)
    }

    pub fn distinct(self) -> Self {
        self.options(["DISTINCT"])
    }

    /// Keywords between `SELECT` and the column list.
    pub fn options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        self.options.extend(options.into_iter().map(Into::into));
        self
    }

    // ==================== SELECT columns ====================

    pub fn columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns
            .extend(columns.into_iter().map(|c| Part::from(c.into())));
        self
    }

    /// Add one column: plain text or any fragment (a subquery, CASE, alias...).
    pub fn column(mut self, column: impl Into<Part>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Add a column with bound arguments: `column_sql("IF(n > ?, 1, 0) AS n", args![5])`.
    pub fn column_sql<A: Into<Arg>>(self, sql: &str, args: impl IntoIterator<Item = A>) -> Self {
        self.column(expr(sql, args))
    }

    pub fn remove_columns(mut self) -> Self {
        self.columns.clear();
        self
    }

    // ==================== FROM / JOIN ====================

    pub fn from(mut self, from: impl Into<Part>) -> Self {
        self.from = from.into();
        self
    }

    /// `FROM (<sub>) AS <alias>`
    pub fn from_select(self, sub: SelectBuilder, alias_name: &str) -> Self {
        self.from(alias(sub, alias_name))
    }

    /// Add a JOIN clause with bound arguments.
    pub fn join_clause<A: Into<Arg>>(self, sql: &str, args: impl IntoIterator<Item = A>) -> Self {
        self.join_expr(expr(sql, args))
    }

    pub fn join_expr(mut self, e: impl Into<Part>) -> Self {
        self.joins.push(e.into());
        self
    }

    /// Add `JOIN <join>`.
    pub fn join(self, join: &str) -> Self {
        self.join_expr(format!("JOIN {join}"))
    }

    pub fn left_join(self, join: &str) -> Self {
        self.join_expr(format!("LEFT JOIN {join}"))
    }

    pub fn right_join(self, join: &str) -> Self {
        self.join_expr(format!("RIGHT JOIN {join}"))
    }

    pub fn inner_join(self, join: &str) -> Self {
        self.join_expr(format!("INNER JOIN {join}"))
    }

    pub fn cross_join(self, join: &str) -> Self {
        self.join_expr(format!("CROSS JOIN {join}"))
    }

    pub fn full_join(self, join: &str) -> Self {
        self.join_expr(format!("FULL OUTER JOIN {join}"))
    }

    // ==================== WHERE / GROUP BY / HAVING ====================

    /// Add a WHERE predicate. Multiple predicates are joined with `AND`.
    ///
    /// An empty string adds nothing.
    pub fn where_(mut self, pred: impl Into<Part>) -> Self {
        let part = pred.into();
        if !part.is_empty() {
            self.where_parts.push(part);
        }
        self
    }

    /// Add a WHERE predicate with bound arguments.
    pub fn where_sql<A: Into<Arg>>(self, sql: &str, args: impl IntoIterator<Item = A>) -> Self {
        if sql.is_empty() {
            return self;
        }
        self.where_(expr(sql, args))
    }

    pub fn group_by<S: Into<String>>(mut self, group_bys: impl IntoIterator<Item = S>) -> Self {
        self.group_bys
            .extend(group_bys.into_iter().map(|g| Part::from(g.into())));
        self
    }

    pub fn having(mut self, pred: impl Into<Part>) -> Self {
        let part = pred.into();
        if !part.is_empty() {
            self.having_parts.push(part);
        }
        self
    }

    pub fn having_sql<A: Into<Arg>>(self, sql: &str, args: impl IntoIterator<Item = A>) -> Self {
        if sql.is_empty() {
            return self;
        }
        self.having(expr(sql, args))
    }

    /// `OR` of `<col>::text LIKE %<value>%` over `columns`.
    pub fn search<S: Into<String>>(
        self,
        value: impl std::fmt::Display,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return self;
        }
        let pattern = format!("%{value}%");
        let search = columns.iter().fold(Or::new(), |or, column| {
            or.with(Like::new().with(format!("{column}::text"), pattern.as_str()))
        });
        self.where_(search)
    }

    // ==================== ORDER BY ====================

    pub fn order_by<S: Into<String>>(mut self, order_bys: impl IntoIterator<Item = S>) -> Self {
        self.order_bys
            .extend(order_bys.into_iter().map(|o| Part::from(o.into())));
        self
    }

    /// ORDER BY entry with bound arguments.
    pub fn order_by_clause<A: Into<Arg>>(mut self, sql: &str, args: impl IntoIterator<Item = A>) -> Self {
        self.order_bys.push(expr(sql, args).into());
        self
    }

    /// ORDER BY from column ids, so callers never pass column names around.
    ///
    /// A repeated id keeps its first occurrence. An id missing from `columns`
    /// fails the render.
    pub fn order_by_cond(mut self, columns: &HashMap<i32, String>, conds: &[OrderCond]) -> Self {
        for (i, cond) in conds.iter().enumerate() {
            if conds[..i].iter().any(|c| c.column_id == cond.column_id) {
                continue;
            }
            match columns.get(&cond.column_id) {
                Some(column) => {
                    self.order_bys
                        .push(Part::from(format!("{column} {}", cond.direction.as_str())));
                }
                None => {
                    if self.build_error.is_none() {
                        self.build_error =
                            Some(format!("unknown order by column id: {}", cond.column_id));
                    }
                }
            }
        }
        self
    }

    // ==================== LIMIT / OFFSET / pagination ====================

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn remove_limit(mut self) -> Self {
        self.limit = None;
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn remove_offset(mut self) -> Self {
        self.offset = None;
        self
    }

    /// Column compared against the last seen id by [`Paginator::ById`].
    pub fn id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = Some(column.into());
        self
    }

    pub fn paginate(mut self, paginator: Paginator) -> Self {
        self.paginator = Some(paginator);
        self
    }

    /// `LIMIT limit` plus `column > start_id`. `column` should also be ordered on.
    pub fn paginate_by_id(self, limit: u64, start_id: i64, column: &str) -> Self {
        self.limit(limit).where_(gt(column, start_id))
    }

    /// `LIMIT limit`, plus `OFFSET limit * (page - 1)` past the first page.
    ///
    /// An offset that does not fit in `u64` fails the render.
    pub fn paginate_by_page(mut self, limit: u64, page: u64) -> Self {
        self = self.limit(limit);
        match page_offset(limit, page) {
            Ok(Some(offset)) => self.offset(offset),
            Ok(None) => self,
            Err(err) => {
                if self.build_error.is_none() {
                    self.build_error = Some(err.to_string());
                }
                self
            }
        }
    }

    // ==================== Suffix ====================

    /// Add SQL after everything else, e.g. `FOR UPDATE`.
    pub fn suffix<A: Into<Arg>>(self, sql: &str, args: impl IntoIterator<Item = A>) -> Self {
        self.suffix_expr(expr(sql, args))
    }

    pub fn suffix_expr(mut self, e: impl Into<Part>) -> Self {
        self.suffixes.push(e.into());
        self
    }

    /// Column helpers that qualify names with `table` and alias them with `prefix`.
    pub fn table_alias(self, table: &str, prefix: Option<&str>) -> TableAlias {
        TableAlias {
            builder: self,
            table: table.to_string(),
            prefix: prefix.map(str::to_string),
        }
    }

    pub(crate) fn where_parts(mut self, parts: &[Part]) -> Self {
        self.where_parts.extend(parts.iter().cloned());
        self
    }

    fn build_select(&self) -> SqlResult<Rendered> {
        if let Some(err) = &self.build_error {
            return Err(SqlError::validation(err.clone()));
        }
        if self.columns.is_empty() {
            return Err(SqlError::validation(
                "select statements must have at least one result column",
            ));
        }

        let mut buf = SqlBuf::new();

        if buf.push_list(&self.prefixes, " ")? {
            buf.push(" ");
        }

        buf.push("SELECT ");
        if !self.options.is_empty() {
            buf.push(&self.options.join(" ")).push(" ");
        }
        buf.push_list(&self.columns, ", ")?;

        buf.push_clause(" FROM ", std::slice::from_ref(&self.from), "")?;
        buf.push_clause(" ", &self.joins, " ")?;

        match self.paginator {
            Some(Paginator::ById { last_id, .. }) => {
                let Some(id_column) = &self.id_column else {
                    return Err(SqlError::validation(
                        "id column is required for pagination by id",
                    ));
                };
                let mut where_parts = self.where_parts.to_vec();
                where_parts.push(gt(id_column.as_str(), last_id).into());
                buf.push_clause(" WHERE ", &where_parts, " AND ")?;
            }
            _ => buf.push_clause(" WHERE ", &self.where_parts, " AND ")?,
        }

        buf.push_clause(" GROUP BY ", &self.group_bys, ", ")?;
        buf.push_clause(" HAVING ", &self.having_parts, " AND ")?;
        buf.push_clause(" ORDER BY ", &self.order_bys, ", ")?;

        if let Some(limit) = self.limit {
            if self.paginator.is_some() {
                return Err(SqlError::validation(
                    "limit and paginator cannot be used together",
                ));
            }
            buf.push(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            if self.paginator.is_some() {
                return Err(SqlError::validation(
                    "offset and paginator cannot be used together",
                ));
            }
            buf.push(&format!(" OFFSET {offset}"));
        }

        match self.paginator {
            Some(Paginator::ByPage { page_size, page }) => {
                buf.push(&format!(" LIMIT {page_size}"));
                if let Some(offset) = page_offset(page_size, page)? {
                    buf.push(&format!(" OFFSET {offset}"));
                }
            }
            Some(Paginator::ById { limit, .. }) => {
                buf.push(&format!(" LIMIT {limit}"));
            }
            None => {}
        }

        buf.push_clause(" ", &self.suffixes, " ")?;

        Ok(buf.finish())
    }
}

/// Rows skipped before `page`; `None` on the first page.
fn page_offset(page_size: u64, page: u64) -> SqlResult<Option<u64>> {
    if page <= 1 {
        return Ok(None);
    }
    page_size
        .checked_mul(page - 1)
        .map(Some)
        .ok_or_else(|| SqlError::validation("pagination offset overflows"))
}

impl Statement for SelectBuilder {
    const KIND: &'static str = "select";

    fn format(&self) -> PlaceholderFormat {
        self.format
    }

    fn build_raw(&self) -> SqlResult<Rendered> {
        self.build_select()
    }
}

impl_statement!(SelectBuilder);

/// Column list helpers bound to a table name.
///
/// Without a prefix columns render as `table.col`; with one they render as
/// `table.col AS prefix_col`. An empty table name leaves columns unqualified.
#[derive(Clone, Debug)]
pub struct TableAlias {
    builder: SelectBuilder,
    table: String,
    prefix: Option<String>,
}

impl TableAlias {
    fn prepare<S: Into<String>>(&self, columns: impl IntoIterator<Item = S>) -> Vec<String> {
        columns
            .into_iter()
            .map(|column| {
                let column = column.into();
                let qualified = if self.table.is_empty() {
                    column.clone()
                } else {
                    format!("{}.{column}", self.table)
                };
                match &self.prefix {
                    Some(prefix) => format!("{qualified} AS {prefix}_{column}"),
                    None => qualified,
                }
            })
            .collect()
    }

    pub fn columns<S: Into<String>>(self, columns: impl IntoIterator<Item = S>) -> SelectBuilder {
        let prepared = self.prepare(columns);
        self.builder.columns(prepared)
    }

    pub fn group_by<S: Into<String>>(self, group_bys: impl IntoIterator<Item = S>) -> SelectBuilder {
        let prepared = self.prepare(group_bys);
        self.builder.group_by(prepared)
    }

    pub fn order_by<S: Into<String>>(self, order_bys: impl IntoIterator<Item = S>) -> SelectBuilder {
        let prepared = self.prepare(order_bys);
        self.builder.order_by(prepared)
    }
}
