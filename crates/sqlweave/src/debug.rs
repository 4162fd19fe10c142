//! Human readable rendering with arguments inlined.
//!
//! Only for logs. The output is never safe to execute.

use crate::sqlizer::{Sqlizer, nested_to_sql};

/// Render `s` with each `?` replaced by its quoted argument.
///
/// Never fails: render errors and placeholder/argument count mismatches come
/// back as bracketed error strings.
pub fn debug_sqlizer(s: &dyn Sqlizer) -> String {
    let (sql, args) = match nested_to_sql(s) {
        Ok(rendered) => rendered,
        Err(err) => return format!("[ToSql error: {err}]"),
    };

    let bytes = sql.as_bytes();
    let mut out = String::with_capacity(sql.len() + args.len() * 4);
    let mut values = args.iter();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'?' {
            i += 1;
            continue;
        }
        out.push_str(&sql[start..i]);
        if bytes.get(i + 1) == Some(&b'?') {
            out.push('?');
            i += 2;
        } else {
            let Some(value) = values.next() else {
                return format!(
                    "[DebugSqlizer error: too many placeholders in {sql:?} for {} args]",
                    args.len()
                );
            };
            out.push('\'');
            out.push_str(&value.to_string().replace('\'', "''"));
            out.push('\'');
            i += 1;
        }
        start = i;
    }
    out.push_str(&sql[start..]);

    if values.next().is_some() {
        return format!(
            "[DebugSqlizer error: not enough placeholders in {sql:?} for {} args]",
            args.len()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{eq, expr};
    use crate::{and, args};
    use crate::placeholder::PlaceholderFormat;
    use crate::qb::select;

    #[test]
    fn inlines_quoted_arguments() {
        let e = and![expr("x = ? AND y = ?", args![1, "two"]), eq("z", "it's")];
        assert_eq!(
            debug_sqlizer(&e),
            "(x = '1' AND y = 'two' AND z = 'it''s')"
        );
    }

    #[test]
    fn escaped_marker_is_literal() {
        assert_eq!(debug_sqlizer(&expr("a ?? ?", args![5])), "a ? '5'");
    }

    #[test]
    fn too_few_args() {
        let out = debug_sqlizer(&expr("x = ? AND y = ?", args![1]));
        assert!(out.starts_with("[DebugSqlizer error: too many placeholders"));
    }

    #[test]
    fn too_many_args() {
        let out = debug_sqlizer(&expr("x = ?", args![1, 2]));
        assert!(out.starts_with("[DebugSqlizer error: not enough placeholders"));
    }

    #[test]
    fn render_errors_are_reported() {
        let out = debug_sqlizer(&select(Vec::<String>::new()));
        assert_eq!(
            out,
            "[ToSql error: select statements must have at least one result column]"
        );
    }

    #[test]
    fn statements_render_through_raw_path() {
        let sb = select(["a"])
            .from("t")
            .where_sql("b = ?", args![7])
            .placeholder_format(PlaceholderFormat::Dollar);
        assert_eq!(debug_sqlizer(&sb), "SELECT a FROM t WHERE b = '7'");
    }
}
