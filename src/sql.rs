//! SQL template configuration
//!
//! Variant queries are written against placeholder database and table
//! names; the configured names are substituted before execution.

/// Replace the `databasename` / `tablename` placeholders.
pub fn inject_sql_config(sql: &str, database: &str, table: &str) -> String {
    sql.replace("databasename", database)
        .replace("tablename", table)
}
