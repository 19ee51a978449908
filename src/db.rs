use anyhow::Result;
use sqlx::MySqlPool;

/// Create the corpus tables if they do not exist / 创建语料表
///
/// Layout matches what the import pipeline writes: one `documents` row per
/// PDF and one `pages` row per OCR'd page with a FULLTEXT index on `text`.
/// Existing tables and data are left untouched.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            id INT AUTO_INCREMENT PRIMARY KEY,
            document_id VARCHAR(100) UNIQUE,
            total_pages INT,
            original_url VARCHAR(2048)
        ) ENGINE=InnoDB
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pages (
            id INT AUTO_INCREMENT PRIMARY KEY,
            document_id INT,
            page_number INT,
            text LONGTEXT,
            FOREIGN KEY (document_id) REFERENCES documents(id),
            FULLTEXT(text)
        ) ENGINE=InnoDB
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database schema checked (documents, pages)");
    Ok(())
}
