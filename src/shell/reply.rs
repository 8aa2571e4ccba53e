//! Shell Replies
//!
//! Text rendering of operation results.

use std::fmt;

/// Result of one executed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Ok,
    Pong,
    /// A string value; empty renders as nil
    Bulk(String),
    Integer(i64),
    Array(Vec<String>),
    /// Pre-rendered JSON document
    Json(String),
}

impl Reply {
    pub fn from_len(len: usize) -> Self {
        Reply::Integer(i64::try_from(len).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => f.write_str("OK"),
            Reply::Pong => f.write_str("PONG"),
            Reply::Bulk(value) => write_bulk(f, value),
            Reply::Integer(n) => write!(f, "(integer) {}", n),
            Reply::Array(items) if items.is_empty() => f.write_str("(empty array)"),
            Reply::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{}) ", i + 1)?;
                    write_bulk(f, item)?;
                }
                Ok(())
            }
            Reply::Json(doc) => f.write_str(doc),
        }
    }
}

fn write_bulk(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    if value.is_empty() {
        f.write_str("(nil)")
    } else {
        write!(f, "{:?}", value)
    }
}
