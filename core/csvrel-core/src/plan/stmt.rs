//! Statement builder — shared SQL assembly and identifier hygiene.
//!
//! Every identifier that reaches the backend passes through
//! [`sanitize_ident`]. Builders only produce statement strings; executing
//! them is the registry's and the connections' job.

/// Replace every character outside `[A-Za-z0-9_]` with an underscore.
pub fn sanitize_ident(ident: &str) -> String {
    ident
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// `CREATE TABLE IF NOT EXISTS` with every column as generic text.
///
/// Inference is advisory; typed interpretation is deferred to query time,
/// so nothing is lost by widening storage to text.
pub fn create_table(table: &str, columns: &[String]) -> String {
    let cols: Vec<String> = columns
        .iter()
        .map(|c| format!("{} VARCHAR(255)", sanitize_ident(c)))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        sanitize_ident(table),
        cols.join(", ")
    )
}

/// `CREATE INDEX IF NOT EXISTS idx_<cols> ON <table> (<cols>)`.
pub fn create_index(table: &str, columns: &[&str]) -> String {
    let cols: Vec<String> = columns.iter().map(|c| sanitize_ident(c)).collect();
    format!(
        "CREATE INDEX IF NOT EXISTS idx_{} ON {} ({})",
        cols.join("_"),
        sanitize_ident(table),
        cols.join(", ")
    )
}

/// `CREATE VIEW <name> AS <select>`. The select expression is the caller's.
pub fn create_view(name: &str, select: &str) -> String {
    format!("CREATE VIEW {} AS {}", sanitize_ident(name), select)
}

/// `DROP VIEW IF EXISTS <name>` — never fails when the view is absent.
pub fn drop_view_if_exists(name: &str) -> String {
    format!("DROP VIEW IF EXISTS {}", sanitize_ident(name))
}

/// `SELECT * FROM <name> LIMIT <limit>`.
pub fn select_limit(name: &str, limit: usize) -> String {
    format!("SELECT * FROM {} LIMIT {limit}", sanitize_ident(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_non_identifier_chars() {
        assert_eq!(sanitize_ident("first name"), "first_name");
        assert_eq!(sanitize_ident("a-b.c"), "a_b_c");
        assert_eq!(sanitize_ident("ok_123"), "ok_123");
    }

    #[test]
    fn create_table_is_idempotent_text_typed() {
        let sql = create_table("emp", &["id".to_string(), "full name".to_string()]);
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS emp (id VARCHAR(255), full_name VARCHAR(255))"
        );
    }

    #[test]
    fn create_index_names_follow_columns() {
        assert_eq!(
            create_index("emp", &["department_id", "salary"]),
            "CREATE INDEX IF NOT EXISTS idx_department_id_salary ON emp (department_id, salary)"
        );
    }

    #[test]
    fn view_statements() {
        assert_eq!(
            create_view("v", "SELECT * FROM emp"),
            "CREATE VIEW v AS SELECT * FROM emp"
        );
        assert_eq!(drop_view_if_exists("v"), "DROP VIEW IF EXISTS v");
        assert_eq!(select_limit("v", 5), "SELECT * FROM v LIMIT 5");
    }
}
