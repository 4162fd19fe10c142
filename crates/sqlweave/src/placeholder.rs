//! Placeholder dialects.
//!
//! Fragments always render with the universal `?` marker. A statement applies
//! its [`PlaceholderFormat`] once, to the fully composed text, so numbering is
//! global and left-to-right no matter how deeply fragments were nested.

use crate::error::SqlError;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::str::FromStr;

/// Positional parameter syntax of the target database.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderFormat {
    /// `?` (MySQL, SQLite)
    #[default]
    Question,
    /// `$1, $2, ...` (PostgreSQL)
    Dollar,
    /// `:1, :2, ...` (Oracle)
    Colon,
    /// `@p1, @p2, ...` (SQL Server)
    AtP,
}

impl PlaceholderFormat {
    /// Replace every `?` marker with this dialect's numbered token.
    ///
    /// `??` is an escaped literal and becomes a single `?` without consuming an
    /// index. The replacement never fails and never looks at argument counts.
    pub fn replace_placeholders(self, sql: &str) -> String {
        let bytes = sql.as_bytes();
        let mut out = String::with_capacity(sql.len() + 8);
        let mut index = 0usize;
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
                index += 1;
                self.write_token(&mut out, index);
                i += 1;
            }
            start = i;
        }
        out.push_str(&sql[start..]);
        out
    }

    fn write_token(self, out: &mut String, index: usize) {
        // Writing into a String cannot fail.
        let _ = match self {
            Self::Question => {
                out.push('?');
                Ok(())
            }
            Self::Dollar => write!(out, "${index}"),
            Self::Colon => write!(out, ":{index}"),
            Self::AtP => write!(out, "@p{index}"),
        };
    }
}

impl FromStr for PlaceholderFormat {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "question" | "?" => Ok(Self::Question),
            "dollar" | "$" => Ok(Self::Dollar),
            "colon" | ":" => Ok(Self::Colon),
            "at_p" | "atp" | "@p" => Ok(Self::AtP),
            other => Err(SqlError::InvalidPlaceholderFormat(other.to_string())),
        }
    }
}

/// `count` comma separated markers: `?,?,?`.
pub fn placeholders(count: usize) -> String {
    if count == 0 {
        return String::new();
    }
    let mut out = String::with_capacity(count * 2 - 1);
    out.push('?');
    for _ in 1..count {
        out.push_str(",?");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_keeps_markers() {
        let sql = "x = ? AND y = ?";
        assert_eq!(PlaceholderFormat::Question.replace_placeholders(sql), sql);
    }

    #[test]
    fn dollar_numbers_left_to_right() {
        let sql = "x = ? AND y = ? AND z = ?";
        assert_eq!(
            PlaceholderFormat::Dollar.replace_placeholders(sql),
            "x = $1 AND y = $2 AND z = $3"
        );
    }

    #[test]
    fn colon_and_atp_tokens() {
        let sql = "x = ? AND y = ?";
        assert_eq!(
            PlaceholderFormat::Colon.replace_placeholders(sql),
            "x = :1 AND y = :2"
        );
        assert_eq!(
            PlaceholderFormat::AtP.replace_placeholders(sql),
            "x = @p1 AND y = @p2"
        );
    }

    #[test]
    fn escaped_marker_does_not_consume_index() {
        let sql = "SELECT uuid, \"data\" #> '{tags}' ?? ? AND enabled = ?";
        assert_eq!(
            PlaceholderFormat::Dollar.replace_placeholders(sql),
            "SELECT uuid, \"data\" #> '{tags}' ? $1 AND enabled = $2"
        );
        assert_eq!(
            PlaceholderFormat::Question.replace_placeholders("a ?? b ?"),
            "a ? b ?"
        );
    }

    #[test]
    fn double_digit_indexes() {
        let sql = vec!["?"; 12].join(",");
        let out = PlaceholderFormat::Dollar.replace_placeholders(&sql);
        assert!(out.ends_with("$11,$12"));
    }

    #[test]
    fn multibyte_text_is_preserved() {
        assert_eq!(
            PlaceholderFormat::Dollar.replace_placeholders("名前 = ? AND ü = ?"),
            "名前 = $1 AND ü = $2"
        );
    }

    #[test]
    fn placeholder_list() {
        assert_eq!(placeholders(0), "");
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(3), "?,?,?");
    }

    #[test]
    fn parse_from_config_names() {
        assert_eq!("dollar".parse::<PlaceholderFormat>().unwrap(), PlaceholderFormat::Dollar);
        assert_eq!("@p".parse::<PlaceholderFormat>().unwrap(), PlaceholderFormat::AtP);
        assert!("percent".parse::<PlaceholderFormat>().is_err());

        let f: PlaceholderFormat = serde_json::from_str("\"at_p\"").unwrap();
        assert_eq!(f, PlaceholderFormat::AtP);
    }
}
