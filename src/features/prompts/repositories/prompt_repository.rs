use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::Result;
use crate::features::prompts::models::{NewPrompt, Prompt};

/// Advisory lock key serializing schema setup across processes
const SCHEMA_LOCK_KEY: i64 = 0x7072_6f6d_7074_73;

const CREATE_PROMPTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS prompts (
        id SERIAL PRIMARY KEY,
        user_id TEXT NOT NULL,
        query TEXT NOT NULL,
        casual_response TEXT NOT NULL,
        formal_response TEXT NOT NULL,
        blended_response TEXT NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_USER_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_prompts_user_created
    ON prompts (user_id, created_at DESC)
"#;

/// Durable storage of prompt records
#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Create the backing table if it is missing
    async fn ensure_schema(&self) -> Result<()>;

    /// Persist a record and return its assigned id
    async fn insert(&self, prompt: NewPrompt) -> Result<i32>;

    /// All records of `user_id`, newest first
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Prompt>>;
}

/// PostgreSQL-backed [`PromptStore`]
///
/// Every operation acquires its own pooled connection; the guard hands it
/// back to the pool when dropped, including on early `?` returns.
pub struct PgPromptStore {
    pool: PgPool,
}

impl std::fmt::Debug for PgPromptStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgPromptStore")
            .field("pool", &"<PgPool>")
            .finish()
    }
}

impl PgPromptStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromptStore for PgPromptStore {
    async fn ensure_schema(&self) -> Result<()> {
        // Uncommitted transaction rolls back on drop, releasing the lock
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *tx)
            .await?;
        sqlx::query(CREATE_PROMPTS_TABLE).execute(&mut *tx).await?;
        sqlx::query(CREATE_USER_INDEX).execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn insert(&self, prompt: NewPrompt) -> Result<i32> {
        let mut conn = self.pool.acquire().await?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO prompts (user_id, query, casual_response, formal_response, blended_response)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&prompt.user_id)
        .bind(&prompt.query)
        .bind(&prompt.responses.casual)
        .bind(&prompt.responses.formal)
        .bind(&prompt.responses.blended)
        .fetch_one(&mut *conn)
        .await?;

        Ok(id)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Prompt>> {
        let mut conn = self.pool.acquire().await?;

        let prompts = sqlx::query_as::<_, Prompt>(
            r#"
            SELECT id, user_id, query, casual_response, formal_response, blended_response,
                   created_at::timestamptz AS created_at
            FROM prompts
            WHERE user_id = $1
            ORDER BY prompts.created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(prompts)
    }
}

/// Runs against a real database when `TEST_DATABASE_URL` is set.
/// Each test works in its own throwaway schema.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::prompts::models::GeneratedResponses;
    use chrono::Utc;
    use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

    /// `prompts` exactly as the first deployments created it
    const LEGACY_PROMPTS_TABLE: &str = r#"
        CREATE TABLE prompts (
            id SERIAL PRIMARY KEY,
            user_id TEXT NOT NULL,
            query TEXT NOT NULL,
            casual_response TEXT NOT NULL,
            formal_response TEXT NOT NULL,
            blended_response TEXT NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#;

    struct TestDb {
        store: PgPromptStore,
        admin: PgPool,
        schema: String,
    }

    impl TestDb {
        async fn drop_schema(self) {
            let _ = sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
                .execute(&self.admin)
                .await;
        }
    }

    async fn test_db() -> Option<TestDb> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let options: PgConnectOptions = url.parse().ok()?;
        let admin = PgPool::connect_with(options.clone()).await.ok()?;

        let schema = format!("relay_test_{}", uuid::Uuid::new_v4().simple());
        sqlx::query(&format!("CREATE SCHEMA {}", schema))
            .execute(&admin)
            .await
            .ok()?;

        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect_with(options.options([("search_path", schema.as_str())]))
            .await
            .ok()?;

        Some(TestDb {
            store: PgPromptStore::new(pool),
            admin,
            schema,
        })
    }

    fn new_prompt(user_id: &str, query: &str) -> NewPrompt {
        NewPrompt {
            user_id: user_id.to_string(),
            query: query.to_string(),
            responses: GeneratedResponses {
                casual: format!("casual {}", query),
                formal: format!("formal {}", query),
                blended: format!("blended {}", query),
            },
        }
    }

    #[tokio::test]
    async fn test_insert_then_list_round_trip() {
        let Some(db) = test_db().await else {
            eprintln!("TEST_DATABASE_URL not set, skipping");
            return;
        };
        let store = &db.store;
        store.ensure_schema().await.unwrap();
        // Second call must be a no-op
        store.ensure_schema().await.unwrap();

        let started = Utc::now() - chrono::Duration::seconds(1);

        let first = store.insert(new_prompt("u1", "one")).await.unwrap();
        let second = store.insert(new_prompt("u1", "two")).await.unwrap();
        assert!(second > first);

        let prompts = store.list_by_user("u1").await.unwrap();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0].id, second);
        assert_eq!(prompts[1].id, first);
        assert_eq!(prompts[1].query, "one");
        assert_eq!(prompts[1].casual_response, "casual one");
        assert_eq!(prompts[1].formal_response, "formal one");
        assert_eq!(prompts[1].blended_response, "blended one");
        assert!(prompts.iter().all(|p| p.created_at >= started));

        db.drop_schema().await;
    }

    #[tokio::test]
    async fn test_existing_legacy_table_is_readable() {
        let Some(db) = test_db().await else {
            eprintln!("TEST_DATABASE_URL not set, skipping");
            return;
        };
        sqlx::query(LEGACY_PROMPTS_TABLE)
            .execute(&db.store.pool)
            .await
            .unwrap();

        db.store.ensure_schema().await.unwrap();
        let id = db.store.insert(new_prompt("u1", "hello")).await.unwrap();

        let prompts = db.store.list_by_user("u1").await.unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].id, id);
        assert_eq!(prompts[0].query, "hello");
        let age = Utc::now() - prompts[0].created_at;
        assert!(age.num_minutes().abs() < 5, "unexpected created_at {}", prompts[0].created_at);

        db.drop_schema().await;
    }

    #[tokio::test]
    async fn test_equal_timestamps_list_latest_insert_first() {
        let Some(db) = test_db().await else {
            eprintln!("TEST_DATABASE_URL not set, skipping");
            return;
        };
        let store = &db.store;
        store.ensure_schema().await.unwrap();

        let mut ids = Vec::new();
        for query in ["a", "b", "c"] {
            ids.push(store.insert(new_prompt("u1", query)).await.unwrap());
        }
        sqlx::query("UPDATE prompts SET created_at = TIMESTAMP '2024-01-01 12:00:00'")
            .execute(&store.pool)
            .await
            .unwrap();

        let listed: Vec<i32> = store
            .list_by_user("u1")
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        ids.reverse();
        assert_eq!(listed, ids);

        db.drop_schema().await;
    }

    #[tokio::test]
    async fn test_list_unknown_user_is_empty() {
        let Some(db) = test_db().await else {
            eprintln!("TEST_DATABASE_URL not set, skipping");
            return;
        };
        db.store.ensure_schema().await.unwrap();

        let prompts = db.store.list_by_user("nobody").await.unwrap();
        assert!(prompts.is_empty());

        db.drop_schema().await;
    }

    #[tokio::test]
    async fn test_concurrent_ensure_schema() {
        let Some(db) = test_db().await else {
            eprintln!("TEST_DATABASE_URL not set, skipping");
            return;
        };

        let (a, b) = tokio::join!(db.store.ensure_schema(), db.store.ensure_schema());
        a.unwrap();
        b.unwrap();

        db.drop_schema().await;
    }
}
