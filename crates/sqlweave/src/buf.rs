//! Incremental `(sql, args)` writer used by every renderer.

use crate::error::SqlResult;
use crate::placeholder::placeholders;
use crate::sqlizer::{Rendered, Sqlizer, nested_to_sql};
use crate::value::Value;

/// Accumulates raw SQL text and arguments in placeholder order.
#[derive(Debug, Default)]
pub(crate) struct SqlBuf {
    sql: String,
    args: Vec<Value>,
}

impl SqlBuf {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append raw SQL (no parameters).
    pub(crate) fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Append a `?` marker and bind its value.
    pub(crate) fn push_bind(&mut self, value: Value) -> &mut Self {
        self.sql.push('?');
        self.args.push(value);
        self
    }

    /// Bind a value whose marker is already part of the text.
    pub(crate) fn push_arg(&mut self, value: Value) -> &mut Self {
        self.args.push(value);
        self
    }

    /// Append `?,?,...` and bind every value.
    pub(crate) fn push_bind_list(&mut self, values: Vec<Value>) -> &mut Self {
        self.sql.push_str(&placeholders(values.len()));
        self.args.extend(values);
        self
    }

    /// Append already rendered SQL and its arguments.
    pub(crate) fn push_rendered(&mut self, (sql, args): Rendered) -> &mut Self {
        self.sql.push_str(&sql);
        self.args.extend(args);
        self
    }

    /// Append the raw render of a fragment. Returns whether it wrote any SQL.
    pub(crate) fn push_nested(&mut self, s: &dyn Sqlizer) -> SqlResult<bool> {
        let (sql, args) = nested_to_sql(s)?;
        let wrote = !sql.is_empty();
        self.push_rendered((sql, args));
        Ok(wrote)
    }

    /// Append fragments joined by `sep`, skipping the ones that render empty.
    pub(crate) fn push_list<S: Sqlizer>(&mut self, parts: &[S], sep: &str) -> SqlResult<bool> {
        let mut wrote = false;
        for part in parts {
            let (sql, args) = nested_to_sql(part)?;
            if sql.is_empty() {
                continue;
            }
            if wrote {
                self.sql.push_str(sep);
            }
            self.push_rendered((sql, args));
            wrote = true;
        }
        Ok(wrote)
    }

    /// Append `keyword` followed by the joined fragments, if any render.
    pub(crate) fn push_clause<S: Sqlizer>(
        &mut self,
        keyword: &str,
        parts: &[S],
        sep: &str,
    ) -> SqlResult<()> {
        let mut clause = SqlBuf::new();
        if clause.push_list(parts, sep)? {
            self.push(keyword);
            self.append(clause);
        }
        Ok(())
    }

    pub(crate) fn append(&mut self, other: SqlBuf) -> &mut Self {
        self.push_rendered(other.finish())
    }

    pub(crate) fn finish(self) -> Rendered {
        (self.sql, self.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlizer::Part;

    #[test]
    fn list_skips_empty_parts() {
        let parts = vec![Part::from("a"), Part::empty(), Part::from(""), Part::from("b")];
        let mut buf = SqlBuf::new();
        assert!(buf.push_list(&parts, ", ").unwrap());
        assert_eq!(buf.finish().0, "a, b");
    }

    #[test]
    fn clause_keyword_only_when_something_renders() {
        let mut buf = SqlBuf::new();
        buf.push("SELECT 1");
        buf.push_clause(" WHERE ", &[Part::empty()], " AND ").unwrap();
        buf.push_clause(" ORDER BY ", &[Part::from("a")], ", ").unwrap();
        assert_eq!(buf.finish().0, "SELECT 1 ORDER BY a");
    }

    #[test]
    fn bind_list() {
        let mut buf = SqlBuf::new();
        buf.push("id IN (").push_bind_list(vec![Value::I32(1), Value::I32(2)]).push(")");
        let (sql, args) = buf.finish();
        assert_eq!(sql, "id IN (?,?)");
        assert_eq!(args.len(), 2);
    }
}
