//! # Query Set
//!
//! The fixed catalog of statements the inventory engine issues.
//!
//! Every function takes the connection of an open transaction, never the
//! pool, so all statements of one engine call share one transaction.
//!
//! ## Catalog
//! ```text
//! ┌───────────────────────────────┬─────────────────────────────────────────┐
//! │ Statement                     │ Returns                                 │
//! ├───────────────────────────────┼─────────────────────────────────────────┤
//! │ list_stock                    │ every article, ordered by art_id        │
//! │ list_product_availability     │ units buildable per product (text)      │
//! │ product_exists                │ composition row count for the name      │
//! │ product_in_stock              │ count of SHORT articles (0 = sellable)  │
//! │ reserve_product_articles      │ takes the write lock for a sale         │
//! │ decrement_stock_for_product   │ articles updated                        │
//! │ insert_composition            │ ()                                      │
//! │ insert_stock                  │ () (adds to an existing article)        │
//! └───────────────────────────────┴─────────────────────────────────────────┘
//! ```

use sqlx::SqliteConnection;
use warehouse_core::{Article, ProductAvailability, ProductComposition, StockRecord};

use crate::error::DbResult;

/// All articles with their current stock.
pub async fn list_stock(conn: &mut SqliteConnection) -> DbResult<Vec<StockRecord>> {
    let stocks = sqlx::query_as::<_, StockRecord>(
        r#"
        SELECT
            art_id,
            name,
            CAST(stock AS TEXT) AS stock
        FROM articles
        ORDER BY art_id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(stocks)
}

/// One row per product: how many complete units current stock can build.
///
/// An article missing from `articles` counts as zero stock.
pub async fn list_product_availability(
    conn: &mut SqliteConnection,
) -> DbResult<Vec<ProductAvailability>> {
    let rows = sqlx::query_as::<_, ProductAvailability>(
        r#"
        SELECT
            pa.product_name AS name,
            CAST(MIN(COALESCE(a.stock, 0) / pa.amount_of) AS TEXT) AS available_product_no
        FROM product_articles pa
        LEFT JOIN articles a ON a.art_id = pa.art_id
        GROUP BY pa.product_name
        ORDER BY pa.product_name
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows)
}

/// Number of composition rows registered under `product_name`.
pub async fn product_exists(conn: &mut SqliteConnection, product_name: &str) -> DbResult<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM product_articles WHERE product_name = ?1")
            .bind(product_name)
            .fetch_one(&mut *conn)
            .await?;

    Ok(count)
}

/// Number of the product's articles whose stock is below the required
/// amount. Zero means every article can cover one unit; anything else
/// blocks the sale.
pub async fn product_in_stock(conn: &mut SqliteConnection, product_name: &str) -> DbResult<i64> {
    let short: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM product_articles pa
        LEFT JOIN articles a ON a.art_id = pa.art_id
        WHERE pa.product_name = ?1
          AND COALESCE(a.stock, 0) < pa.amount_of
        "#,
    )
    .bind(product_name)
    .fetch_one(&mut *conn)
    .await?;

    Ok(short)
}

/// Takes SQLite's write lock on behalf of a sale.
///
/// Must be the first statement of the sale's transaction. A deferred
/// transaction that reads first cannot later upgrade to a writer once
/// another sale has committed, so the lock is taken up front: concurrent
/// sales then run their check-then-decrement one after another, each
/// seeing the stock the previous one left.
pub async fn reserve_product_articles(
    conn: &mut SqliteConnection,
    product_name: &str,
) -> DbResult<()> {
    sqlx::query(
        r#"
        UPDATE articles
        SET stock = stock
        WHERE art_id IN (
            SELECT art_id FROM product_articles WHERE product_name = ?1
        )
        "#,
    )
    .bind(product_name)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Decrements every article of the product by the amount it consumes.
///
/// Returns the number of articles updated. A decrement below zero fails
/// the `CHECK (stock >= 0)` constraint.
pub async fn decrement_stock_for_product(
    conn: &mut SqliteConnection,
    product_name: &str,
) -> DbResult<u64> {
    let result = sqlx::query(
        r#"
        UPDATE articles
        SET stock = stock - (
            SELECT pa.amount_of
            FROM product_articles pa
            WHERE pa.product_name = ?1 AND pa.art_id = articles.art_id
        )
        WHERE art_id IN (
            SELECT art_id FROM product_articles WHERE product_name = ?1
        )
        "#,
    )
    .bind(product_name)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected())
}

/// Appends one composition row. A repeated (product, article) pair is a
/// unique violation.
pub async fn insert_composition(
    conn: &mut SqliteConnection,
    composition: &ProductComposition,
) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO product_articles (product_name, art_id, amount_of)
        VALUES (?1, ?2, ?3)
        "#,
    )
    .bind(&composition.product_name)
    .bind(&composition.art_id)
    .bind(composition.amount_of)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Inserts an article, or restocks it: an existing article takes the new
/// name and has the quantity added to its stock.
pub async fn insert_stock(conn: &mut SqliteConnection, article: &Article) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO articles (art_id, name, stock)
        VALUES (?1, ?2, ?3)
        ON CONFLICT (art_id) DO UPDATE SET
            name = excluded.name,
            stock = articles.stock + excluded.stock
        "#,
    )
    .bind(&article.art_id)
    .bind(&article.name)
    .bind(article.stock)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn article(art_id: &str, name: &str, stock: i64) -> Article {
        Article {
            art_id: art_id.to_string(),
            name: name.to_string(),
            stock,
        }
    }

    fn composition(product_name: &str, art_id: &str, amount_of: i64) -> ProductComposition {
        ProductComposition {
            product_name: product_name.to_string(),
            art_id: art_id.to_string(),
            amount_of,
        }
    }

    #[tokio::test]
    async fn test_insert_stock_restocks_existing_article() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();

        insert_stock(&mut conn, &article("1", "leg", 12)).await.unwrap();
        insert_stock(&mut conn, &article("1", "table leg", 3)).await.unwrap();

        let stocks = list_stock(&mut conn).await.unwrap();
        assert_eq!(stocks, vec![StockRecord::new("1", "table leg", "15")]);
    }

    #[tokio::test]
    async fn test_restock_past_integer_range_violates_check() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();

        insert_stock(&mut conn, &article("1", "leg", i64::MAX)).await.unwrap();
        let err = insert_stock(&mut conn, &article("1", "leg", i64::MAX))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::DbError::CheckViolation(_)));

        let stocks = list_stock(&mut conn).await.unwrap();
        assert_eq!(stocks, vec![StockRecord::new("1", "leg", i64::MAX.to_string())]);
    }

    #[tokio::test]
    async fn test_availability_is_minimum_across_composition() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();

        insert_stock(&mut conn, &article("1", "leg", 12)).await.unwrap();
        insert_stock(&mut conn, &article("2", "screw", 17)).await.unwrap();
        insert_composition(&mut conn, &composition("Chair", "1", 4)).await.unwrap();
        insert_composition(&mut conn, &composition("Chair", "2", 8)).await.unwrap();
        // Article 9 was never stocked.
        insert_composition(&mut conn, &composition("Lamp", "9", 1)).await.unwrap();

        let rows = list_product_availability(&mut conn).await.unwrap();
        assert_eq!(
            rows,
            vec![
                ProductAvailability::new("Chair", "2"),
                ProductAvailability::new("Lamp", "0"),
            ]
        );
    }

    #[tokio::test]
    async fn test_in_stock_flag_counts_short_articles() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();

        insert_stock(&mut conn, &article("1", "leg", 4)).await.unwrap();
        insert_stock(&mut conn, &article("2", "top", 0)).await.unwrap();
        insert_composition(&mut conn, &composition("Table", "1", 4)).await.unwrap();
        insert_composition(&mut conn, &composition("Table", "2", 1)).await.unwrap();

        assert_eq!(product_exists(&mut conn, "Table").await.unwrap(), 2);
        assert_eq!(product_exists(&mut conn, "Sofa").await.unwrap(), 0);
        assert_eq!(product_in_stock(&mut conn, "Table").await.unwrap(), 1);

        insert_stock(&mut conn, &article("2", "top", 1)).await.unwrap();
        assert_eq!(product_in_stock(&mut conn, "Table").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_decrement_below_zero_violates_check() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();

        insert_stock(&mut conn, &article("1", "leg", 3)).await.unwrap();
        insert_composition(&mut conn, &composition("Chair", "1", 4)).await.unwrap();

        let err = decrement_stock_for_product(&mut conn, "Chair")
            .await
            .unwrap_err();
        assert!(matches!(err, crate::DbError::CheckViolation(_)));
    }

    #[tokio::test]
    async fn test_duplicate_composition_is_unique_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();

        insert_composition(&mut conn, &composition("Chair", "1", 4)).await.unwrap();
        let err = insert_composition(&mut conn, &composition("Chair", "1", 2))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::DbError::UniqueViolation(_)));
    }
}
