//! Guard for translator-supplied SQL.
//!
//! The natural-language path executes SQL the language model wrote. Before it
//! reaches the engine, the statement must look like a single read-only SELECT
//! against the permitted table. Violations surface as translation errors: no
//! SQL has run.

use geoquery_core::error::{GeoqueryError, Result};

/// The only table translated queries may read from.
pub const PERMITTED_TABLE: &str = "world_points";

const FORBIDDEN_KEYWORDS: &[&str] = &[
    "insert", "update", "delete", "merge", "drop", "alter", "create", "truncate", "grant",
    "revoke", "copy", "vacuum", "call", "execute", "prepare",
];

/// Check that a translated statement is a single SELECT (or WITH) over the
/// permitted table, with no mutation keywords anywhere in it.
pub fn check_translated_sql(sql: &str, permitted_table: &str) -> Result<()> {
    let statement = sql.trim().trim_end_matches(';').trim();

    if statement.is_empty() {
        return Err(rejected("translated query is empty"));
    }

    if statement.contains(';') {
        return Err(rejected("translated query must be a single statement"));
    }

    let lowered = statement.to_lowercase();
    let tokens: Vec<&str> =
        lowered.split(|c: char| !c.is_alphanumeric() && c != '_').filter(|t| !t.is_empty()).collect();

    match tokens.first() {
        Some(&"select") | Some(&"with") => {}
        _ => return Err(rejected("translated query must start with SELECT or WITH")),
    }

    if let Some(keyword) = tokens.iter().find(|t| FORBIDDEN_KEYWORDS.contains(t)) {
        return Err(rejected(format!("translated query contains forbidden keyword `{}`", keyword)));
    }

    if !tokens.contains(&permitted_table) {
        return Err(rejected(format!(
            "translated query must read from the `{}` table",
            permitted_table
        )));
    }

    Ok(())
}

fn rejected(reason: impl Into<String>) -> GeoqueryError {
    GeoqueryError::Translation { reason: reason.into() }
}
