use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryFilter, Statement};

/// Key-value metadata attached to taxonomy terms
#[async_trait]
pub trait TermMetaStore: Send + Sync {
    async fn get(&self, term_id: i64, key: &str) -> anyhow::Result<Option<String>>;

    /// Inserts or overwrites a single key
    async fn update(&self, term_id: i64, key: &str, value: &str) -> anyhow::Result<()>;

    /// Returns whether a row was removed
    async fn delete(&self, term_id: i64, key: &str) -> anyhow::Result<bool>;

    /// Removes every key of a term; returns the number of removed rows
    async fn delete_all(&self, term_id: i64) -> anyhow::Result<u64>;
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sys_term_meta")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub term_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub meta_key: String,
    pub meta_value: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// sea-orm backed store over the `sys_term_meta` table
#[derive(Clone)]
pub struct SqliteTermMetaStore {
    conn: DatabaseConnection,
}

impl SqliteTermMetaStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl TermMetaStore for SqliteTermMetaStore {
    async fn get(&self, term_id: i64, key: &str) -> anyhow::Result<Option<String>> {
        let row = Entity::find_by_id((term_id, key.to_string()))
            .one(&self.conn)
            .await?;
        Ok(row.map(|m| m.meta_value))
    }

    async fn update(&self, term_id: i64, key: &str, value: &str) -> anyhow::Result<()> {
        let query = r#"
            INSERT INTO sys_term_meta (term_id, meta_key, meta_value)
            VALUES (?, ?, ?)
            ON CONFLICT(term_id, meta_key) DO UPDATE SET
                meta_value = excluded.meta_value
        "#;
        self.conn
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                query,
                vec![term_id.into(), key.into(), value.into()],
            ))
            .await?;
        Ok(())
    }

    async fn delete(&self, term_id: i64, key: &str) -> anyhow::Result<bool> {
        let result = Entity::delete_by_id((term_id, key.to_string()))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_all(&self, term_id: i64) -> anyhow::Result<u64> {
        let result = Entity::delete_many()
            .filter(Column::TermId.eq(term_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected)
    }
}
