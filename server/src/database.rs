//! SQLite persistence for project metadata.
//!
//! Opens (or creates) the database, enables WAL mode, runs the schema
//! migration and exposes the two operations the registry needs: a full load
//! and a wholesale replace (used by the CSV import path).

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::projects::ProjectItem;

/// Thread-safe database connection type
pub type DbConnection = Arc<Mutex<Connection>>;

pub fn init_database(
    db_path: &Path,
) -> Result<DbConnection, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(db_path)?;

    // Set WAL mode for better concurrency.
    // pragma_update must be used instead of execute because PRAGMA
    // journal_mode returns a result row.
    conn.pragma_update(None, "journal_mode", "WAL")?;

    let schema_sql = include_str!("../migrations/001_projects_schema.sql");
    conn.execute_batch(schema_sql)?;

    Ok(Arc::new(Mutex::new(conn)))
}

/// All projects, in insertion order
pub fn load_projects(conn: &Connection) -> rusqlite::Result<Vec<ProjectItem>> {
    let mut stmt = conn.prepare(
        "SELECT code, name, sub_text, description, invite, image_alt, notion, github \
         FROM projects ORDER BY id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(ProjectItem {
            code: row.get(0)?,
            name: row.get(1)?,
            sub_text: row.get(2)?,
            description: row.get(3)?,
            invite: row.get(4)?,
            image_alt: row.get(5)?,
            notion: row.get(6)?,
            github: row.get(7)?,
        })
    })?;
    rows.collect()
}

/// Replace the whole project table inside one transaction
pub fn replace_projects(conn: &mut Connection, items: &[ProjectItem]) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM projects", [])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO projects (code, name, sub_text, description, invite, image_alt, notion, github) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for item in items {
            stmt.execute(rusqlite::params![
                item.code,
                item.name,
                item.sub_text,
                item.description,
                item.invite,
                item.image_alt,
                item.notion,
                item.github,
            ])?;
        }
    }
    tx.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn sample(code: &str) -> ProjectItem {
        ProjectItem {
            code: code.to_string(),
            name: format!("Project {}", code),
            sub_text: "sub".to_string(),
            description: "desc".to_string(),
            invite: "https://discord.gg/x".to_string(),
            image_alt: "alt".to_string(),
            notion: "https://notion.so/x".to_string(),
            github: "https://github.com/x".to_string(),
        }
    }

    #[tokio::test]
    async fn test_database_initialization() {
        let temp_file = NamedTempFile::new().unwrap();
        let db = init_database(temp_file.path()).unwrap();

        let conn = db.lock().await;
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"projects".to_string()));
    }

    #[tokio::test]
    async fn test_replace_and_load_round_trip() {
        let temp_file = NamedTempFile::new().unwrap();
        let db = init_database(temp_file.path()).unwrap();
        let mut conn = db.lock().await;

        replace_projects(&mut conn, &[sample("alpha"), sample("beta")]).unwrap();
        let loaded = load_projects(&conn).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].code, "alpha");
        assert_eq!(loaded[1].code, "beta");

        // a second import replaces, not appends
        replace_projects(&mut conn, &[sample("gamma")]).unwrap();
        let loaded = load_projects(&conn).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].code, "gamma");
    }
}
