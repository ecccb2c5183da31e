use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE: &str = "rollbook.sqlite3";

pub fn open_db(data_dir: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(data_dir)?;
    let db_path = data_dir.join(DB_FILE);
    let conn = Connection::open(db_path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS students(
            roll_no TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            age INTEGER NOT NULL,
            course TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS attendance(
            roll_no TEXT PRIMARY KEY,
            date TEXT NOT NULL,
            status TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS complaints(
            roll_no TEXT PRIMARY KEY,
            complaint TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS remarks(
            roll_no TEXT PRIMARY KEY,
            remarks TEXT NOT NULL
        )",
        [],
    )?;

    // The four collections are independent: a student delete does not
    // cascade into attendance, complaints, or remarks.
    Ok(conn)
}
