//! The rendering protocol shared by every fragment and statement.
//!
//! A fragment renders to `(sql, args)`. Fragments that own a placeholder
//! format (statements) also expose a raw render through [`RawSqlizer`]; when
//! one fragment embeds another it goes through [`nested_to_sql`], which uses
//! the raw render whenever it exists, so numbering happens only once, on the
//! outermost statement.

use crate::error::SqlResult;
use crate::expr::Expr;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Rendered SQL text plus its arguments in placeholder order.
pub type Rendered = (String, Vec<Value>);

/// Anything that renders itself to SQL.
pub trait Sqlizer: fmt::Debug + Send + Sync {
    /// Render with the fragment's final placeholder format applied.
    fn to_sql(&self) -> SqlResult<Rendered>;

    /// The unformatted render, for fragments that apply a placeholder format.
    fn as_raw(&self) -> Option<&dyn RawSqlizer> {
        None
    }

    /// The operand of a negation, so that `not(not(x))` yields `x`.
    #[doc(hidden)]
    fn negated(&self) -> Option<Part> {
        None
    }

    /// Render, panicking on error.
    ///
    /// For call sites where the builder is known to be well formed.
    fn must_sql(&self) -> Rendered {
        match self.to_sql() {
            Ok(rendered) => rendered,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Render with `?` markers only, leaving numbering to the enclosing statement.
pub trait RawSqlizer {
    fn to_sql_raw(&self) -> SqlResult<Rendered>;
}

/// Render `s` for embedding into another fragment.
pub fn nested_to_sql(s: &dyn Sqlizer) -> SqlResult<Rendered> {
    match s.as_raw() {
        Some(raw) => raw.to_sql_raw(),
        None => s.to_sql(),
    }
}

/// A type-erased, cheaply clonable fragment.
///
/// Clause lists hold `Part`s. Plain strings convert into a raw SQL part with no
/// arguments, and every fragment type in the crate converts into one.
#[derive(Clone, Default)]
pub struct Part(Option<Arc<dyn Sqlizer>>);

impl Part {
    pub fn new(s: impl Sqlizer + 'static) -> Self {
        Self(Some(Arc::new(s)))
    }

    /// A part that renders to nothing and is skipped in clause lists.
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Debug for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(inner) => inner.fmt(f),
            None => f.write_str("Part(empty)"),
        }
    }
}

impl Sqlizer for Part {
    fn to_sql(&self) -> SqlResult<Rendered> {
        match &self.0 {
            Some(inner) => inner.to_sql(),
            None => Ok((String::new(), Vec::new())),
        }
    }

    fn as_raw(&self) -> Option<&dyn RawSqlizer> {
        Some(self)
    }

    fn negated(&self) -> Option<Part> {
        self.0.as_ref().and_then(|inner| inner.negated())
    }
}

impl RawSqlizer for Part {
    fn to_sql_raw(&self) -> SqlResult<Rendered> {
        match &self.0 {
            Some(inner) => nested_to_sql(inner.as_ref()),
            None => Ok((String::new(), Vec::new())),
        }
    }
}

impl From<&str> for Part {
    fn from(sql: &str) -> Self {
        if sql.is_empty() {
            Part::empty()
        } else {
            Part::new(Expr::raw(sql))
        }
    }
}

impl From<String> for Part {
    fn from(sql: String) -> Self {
        if sql.is_empty() {
            Part::empty()
        } else {
            Part::new(Expr::raw(sql))
        }
    }
}

impl<T: Into<Part>> From<Option<T>> for Part {
    fn from(v: Option<T>) -> Self {
        v.map_or_else(Part::empty, Into::into)
    }
}

/// `From` conversions into [`Part`] and [`Arg`](crate::Arg) for fragment types.
macro_rules! impl_fragment {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for $crate::sqlizer::Part {
                fn from(v: $ty) -> Self {
                    $crate::sqlizer::Part::new(v)
                }
            }

            impl From<$ty> for $crate::arg::Arg {
                fn from(v: $ty) -> Self {
                    $crate::arg::Arg::Fragment($crate::sqlizer::Part::new(v))
                }
            }
        )*
    };
}

pub(crate) use impl_fragment;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::expr::expr;
    use crate::qb::select;
    use crate::placeholder::PlaceholderFormat;

    #[test]
    fn empty_strings_become_empty_parts() {
        assert!(Part::from("").is_empty());
        assert!(!Part::from("a = 1").is_empty());
        assert_eq!(Part::empty().to_sql().unwrap(), (String::new(), vec![]));
    }

    #[test]
    fn nested_prefers_raw_render() {
        let sb = select(["a"])
            .from("t")
            .where_sql("b = ?", args![1])
            .placeholder_format(PlaceholderFormat::Dollar);

        let (formatted, _) = sb.to_sql().unwrap();
        assert_eq!(formatted, "SELECT a FROM t WHERE b = $1");

        let (raw, args) = nested_to_sql(&sb).unwrap();
        assert_eq!(raw, "SELECT a FROM t WHERE b = ?");
        assert_eq!(args, vec![Value::I32(1)]);

        let part = Part::from(sb);
        assert_eq!(nested_to_sql(&part).unwrap().0, "SELECT a FROM t WHERE b = ?");
    }

    #[test]
    fn fragments_without_raw_render_formatted() {
        let e = expr("x = ?", args![1]);
        assert!(e.as_raw().is_none());
        assert_eq!(nested_to_sql(&e).unwrap().0, "x = ?");
    }

    #[test]
    #[should_panic(expected = "select statements must have at least one result column")]
    fn must_sql_panics_on_error() {
        select(Vec::<String>::new()).from("t").must_sql();
    }
}
