use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};

/// Tables owned by this application, in creation order
const TABLES: &[(&str, &str)] = &[
    (
        "a001_product_category",
        r#"
        CREATE TABLE a001_product_category (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            parent_id INTEGER,
            description TEXT NOT NULL DEFAULT '',
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    ),
    (
        "a002_media_attachment",
        r#"
        CREATE TABLE a002_media_attachment (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            file_name TEXT NOT NULL,
            thumb_file_name TEXT,
            mime_type TEXT NOT NULL,
            alt_text TEXT NOT NULL DEFAULT '',
            created_at TEXT
        );
        "#,
    ),
    (
        "a003_storefront_page",
        r#"
        CREATE TABLE a003_storefront_page (
            slug TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            content TEXT NOT NULL DEFAULT '',
            updated_at TEXT
        );
        "#,
    ),
    (
        "sys_term_meta",
        r#"
        CREATE TABLE sys_term_meta (
            term_id INTEGER NOT NULL,
            meta_key TEXT NOT NULL,
            meta_value TEXT NOT NULL,
            PRIMARY KEY (term_id, meta_key)
        );
        "#,
    ),
];

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<DatabaseConnection> {
    let db_file = db_path.unwrap_or("target/db/wcs.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    ensure_schema(&conn).await?;
    Ok(conn)
}

/// Single-connection in-memory database with the schema applied
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).sqlx_logging(false);
    let conn = Database::connect(options).await?;
    ensure_schema(&conn).await?;
    Ok(conn)
}

pub async fn ensure_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (table, create_sql) in TABLES {
        let exists = conn
            .query_all(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type='table' AND name = ?;",
                [(*table).into()],
            ))
            .await?;

        if exists.is_empty() {
            tracing::info!("Creating {} table", table);
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                create_sql.to_string(),
            ))
            .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_bootstrap_is_repeatable() {
        let conn = connect_in_memory().await.unwrap();
        ensure_schema(&conn).await.unwrap();

        let rows = conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%';"
                    .to_string(),
            ))
            .await
            .unwrap();
        let mut names: Vec<String> = rows
            .iter()
            .map(|r| r.try_get::<String>("", "name").unwrap())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "a001_product_category",
                "a002_media_attachment",
                "a003_storefront_page",
                "sys_term_meta"
            ]
        );
    }
}
