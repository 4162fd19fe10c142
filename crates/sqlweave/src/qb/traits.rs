//! Plumbing shared by the statement builders.

use crate::error::SqlResult;
use crate::placeholder::PlaceholderFormat;
use crate::sqlizer::Rendered;

/// A statement builder: renders raw SQL and owns a placeholder format.
pub(crate) trait Statement {
    /// Statement keyword, used in log events.
    const KIND: &'static str;

    fn format(&self) -> PlaceholderFormat;

    /// Render with `?` markers only.
    fn build_raw(&self) -> SqlResult<Rendered>;
}

/// Apply the placeholder format to a finished raw render.
///
/// This is the only place numbering happens for a statement.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub(crate) fn finalize(
    kind: &'static str,
    format: PlaceholderFormat,
    raw: SqlResult<Rendered>,
) -> SqlResult<Rendered> {
    let (sql, args) = match raw {
        Ok(rendered) => rendered,
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "sqlweave.sql", statement = kind, error = %err, "render failed");
            return Err(err);
        }
    };

    let sql = format.replace_placeholders(&sql);

    #[cfg(feature = "tracing")]
    tracing::trace!(
        target: "sqlweave.sql",
        statement = kind,
        format = ?format,
        param_count = args.len(),
        sql = %sql,
        "rendered statement"
    );

    Ok((sql, args))
}

/// `Sqlizer` + `RawSqlizer` for statement builders, plus `Part` conversion.
macro_rules! impl_statement {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::sqlizer::Sqlizer for $ty {
                fn to_sql(&self) -> $crate::error::SqlResult<$crate::sqlizer::Rendered> {
                    use $crate::qb::traits::Statement;
                    $crate::qb::traits::finalize(
                        <$ty as Statement>::KIND,
                        self.format(),
                        self.build_raw(),
                    )
                }

                fn as_raw(&self) -> Option<&dyn $crate::sqlizer::RawSqlizer> {
                    Some(self)
                }
            }

            impl $crate::sqlizer::RawSqlizer for $ty {
                fn to_sql_raw(&self) -> $crate::error::SqlResult<$crate::sqlizer::Rendered> {
                    $crate::qb::traits::Statement::build_raw(self)
                }
            }

            impl From<$ty> for $crate::sqlizer::Part {
                fn from(v: $ty) -> Self {
                    $crate::sqlizer::Part::new(v)
                }
            }
        )*
    };
}

pub(crate) use impl_statement;
