//! Read-only guardrail for ad-hoc queries
//!
//! A textual prefix check, not a parser: a `SELECT` that calls a
//! side-effecting function still passes. Opening the store read-only
//! (`database.read_only`) is what actually blocks writes.

/// The only statement prefix the guardrail admits
pub const ALLOWED_PREFIX: &str = "SELECT";

/// Whether `query` starts with `SELECT`, ignoring surrounding whitespace and case
pub fn is_read_only_query(query: &str) -> bool {
    query.trim().to_uppercase().starts_with(ALLOWED_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_select_any_case() {
        assert!(is_read_only_query("SELECT * FROM users"));
        assert!(is_read_only_query("select name from users limit 2"));
        assert!(is_read_only_query("SeLeCt 1"));
        assert!(is_read_only_query("  \n\tselect 1  "));
    }

    #[test]
    fn test_rejects_writes() {
        assert!(!is_read_only_query("DELETE FROM users"));
        assert!(!is_read_only_query("insert into users (name) values ('x')"));
        assert!(!is_read_only_query("UPDATE users SET name = 'x'"));
        assert!(!is_read_only_query("DROP TABLE users"));
        assert!(!is_read_only_query("PRAGMA table_info(users)"));
    }

    #[test]
    fn test_rejects_other_reads() {
        // CTEs and EXPLAIN are reads too, but the prefix is strict
        assert!(!is_read_only_query("WITH t AS (SELECT 1) SELECT * FROM t"));
        assert!(!is_read_only_query("EXPLAIN SELECT 1"));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(!is_read_only_query(""));
        assert!(!is_read_only_query("   "));
    }

    #[test]
    fn test_prefix_only() {
        assert!(!is_read_only_query("-- comment\nSELECT 1"));
        // Passes the prefix check; the executor refuses the second statement
        assert!(is_read_only_query("SELECT 1; DELETE FROM users"));
    }
}
