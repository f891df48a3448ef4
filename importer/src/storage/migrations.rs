use rusqlite::Connection;

/// Run all storage migrations
pub fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
    // Key/value table standing in for the extension's local storage
    conn.execute(
        "CREATE TABLE IF NOT EXISTS local_storage (
            key VARCHAR PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at BIGINT NOT NULL
        )",
        [],
    )?;

    Ok(())
}
