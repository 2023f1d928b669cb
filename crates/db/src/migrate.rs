use anyhow::Context;

use book_kernel::Migration;

use crate::Database;

const CREATE_LEDGER: &str = r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
    module     TEXT NOT NULL,
    id         TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (module, id)
)
"#;

impl Database {
    /// Apply every migration not yet recorded in `schema_migrations`.
    ///
    /// Each migration runs in its own transaction together with its ledger
    /// entry. Returns the number of migrations applied by this call.
    pub async fn migrate(&self, migrations: &[(String, Migration)]) -> anyhow::Result<usize> {
        sqlx::query(CREATE_LEDGER)
            .execute(self.pool())
            .await
            .context("failed to create migration ledger")?;

        let mut applied = 0;
        for (module, migration) in migrations {
            let done: Option<i64> =
                sqlx::query_scalar("SELECT 1 FROM schema_migrations WHERE module = ? AND id = ?")
                    .bind(module)
                    .bind(migration.id)
                    .fetch_optional(self.pool())
                    .await
                    .context("failed to read migration ledger")?;
            if done.is_some() {
                tracing::debug!(target: "book-db", %module, id = migration.id, "migration already applied");
                continue;
            }

            let mut tx = self.pool().begin().await?;
            sqlx::raw_sql(migration.up)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("migration '{module}/{}' failed", migration.id))?;
            sqlx::query("INSERT INTO schema_migrations (module, id) VALUES (?, ?)")
                .bind(module)
                .bind(migration.id)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;

            tracing::info!(target: "book-db", %module, id = migration.id, "applied migration");
            applied += 1;
        }

        Ok(applied)
    }
}
