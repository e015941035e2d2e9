//! # Inventory Engine
//!
//! The transactional operations over articles, products and stock.
//!
//! ## Sale State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       sell_product("Dining Chair")                      │
//! │                                                                         │
//! │  Started ──BEGIN + reserve write lock──► ExistenceChecked               │
//! │     │                                        │ product_exists == 0      │
//! │     │                                        ├──────────────► ProductNotFound
//! │     │                                        ▼                          │
//! │     │                                    StockChecked                   │
//! │     │                                        │ product_in_stock != 0    │
//! │     │                                        ├──────────────► OutOfStock│
//! │     │                                        ▼                          │
//! │     │                                    Decremented                    │
//! │     │                                        │ COMMIT                   │
//! │     │                                        ▼                          │
//! │     │                                    Committed                      │
//! │     │                                                                   │
//! │     └── any failure at any step ──► RolledBack (first error returned)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Isolation
//! SQLite allows a single writer at a time. A sale takes the write lock
//! with its first statement, so two sales of the same product never both
//! pass the stock check against the same stock: the second waits (up to
//! the pool's busy timeout) and then checks what the first left behind.
//! The `CHECK (stock >= 0)` constraint backs this up.

use async_trait::async_trait;
use sqlx::{Sqlite, SqliteConnection, Transaction};
use tracing::{debug, error, info};
use warehouse_core::{Inventory, ProductAvailability, Products, StockRecord};

use crate::context::RequestContext;
use crate::error::{DbError, InventoryError, InventoryResult};
use crate::pool::Database;
use crate::queries;

// =============================================================================
// Engine Contract
// =============================================================================

/// Operations the caller adapter can invoke, one per request.
///
/// Every operation except `ping` runs in a fresh transaction bounded by the
/// context's deadline. Implementations hold no per-call state.
#[async_trait]
pub trait InventoryEngine: Send + Sync {
    /// Liveness probe. Fails with `Connectivity` when the store is down.
    async fn ping(&self) -> InventoryResult<()>;

    /// All article stock, ordered by article id. Empty store, empty vec.
    async fn get_inventory(&self, ctx: &RequestContext) -> InventoryResult<Vec<StockRecord>>;

    /// Products that can currently be sold, with their available units.
    ///
    /// Products whose availability parses as zero (or doesn't parse) are
    /// left out.
    async fn get_product_stock(
        &self,
        ctx: &RequestContext,
    ) -> InventoryResult<Vec<ProductAvailability>>;

    /// Stores every product's composition, all or nothing. Returns the
    /// number of products (not rows) stored.
    async fn upload_products(&self, ctx: &RequestContext, products: &Products)
        -> InventoryResult<usize>;

    /// Stores every stock record, all or nothing. Returns the number of
    /// records stored.
    async fn upload_inventory(
        &self,
        ctx: &RequestContext,
        inventory: &Inventory,
    ) -> InventoryResult<usize>;

    /// Sells one unit of a product, decrementing each of its articles.
    /// Surrounding whitespace in the name is ignored, as on upload.
    async fn sell_product(&self, ctx: &RequestContext, product_name: &str)
        -> InventoryResult<()>;
}

// =============================================================================
// SQLite Engine
// =============================================================================

/// Stages of a sale, logged as the transaction advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaleStage {
    Started,
    ExistenceChecked,
    StockChecked,
    Decremented,
}

/// [`InventoryEngine`] over the SQLite store.
#[derive(Debug, Clone)]
pub struct SqliteInventory {
    db: Database,
}

impl SqliteInventory {
    pub fn new(db: Database) -> Self {
        SqliteInventory { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    async fn begin(&self, ctx: &RequestContext) -> InventoryResult<Transaction<'static, Sqlite>> {
        self.db.begin().await.map_err(|e| {
            error!(rid = %ctx.request_id(), err = %e, "Transaction begin failed");
            InventoryError::begin(e)
        })
    }

    async fn commit(
        ctx: &RequestContext,
        tx: Transaction<'static, Sqlite>,
        operation: &str,
    ) -> InventoryResult<()> {
        tx.commit().await.map_err(|e| {
            error!(rid = %ctx.request_id(), err = %e, operation, "Transaction commit failed");
            InventoryError::Write(DbError::transaction("commit", e))
        })
    }

    async fn get_inventory_in_tx(&self, ctx: &RequestContext) -> InventoryResult<Vec<StockRecord>> {
        debug!(rid = %ctx.request_id(), "get_inventory: entry");

        let mut tx = self.begin(ctx).await?;
        let result = queries::list_stock(&mut tx).await;
        // Read-only; rollback only releases the snapshot.
        rollback(ctx, tx).await;

        let stocks = result.map_err(|e| {
            error!(rid = %ctx.request_id(), err = %e, "list_stock failed");
            InventoryError::Query(e)
        })?;

        debug!(rid = %ctx.request_id(), count = stocks.len(), "get_inventory: returning stock");
        Ok(stocks)
    }

    async fn get_product_stock_in_tx(
        &self,
        ctx: &RequestContext,
    ) -> InventoryResult<Vec<ProductAvailability>> {
        debug!(rid = %ctx.request_id(), "get_product_stock: entry");

        let mut tx = self.begin(ctx).await?;
        let result = queries::list_product_availability(&mut tx).await;
        rollback(ctx, tx).await;

        let rows = result.map_err(|e| {
            error!(rid = %ctx.request_id(), err = %e, "list_product_availability failed");
            InventoryError::Query(e)
        })?;

        let available: Vec<ProductAvailability> =
            rows.into_iter().filter(|row| row.is_available()).collect();

        debug!(
            rid = %ctx.request_id(),
            count = available.len(),
            "get_product_stock: returning available products"
        );
        Ok(available)
    }

    async fn upload_products_in_tx(
        &self,
        ctx: &RequestContext,
        products: &Products,
    ) -> InventoryResult<usize> {
        debug!(rid = %ctx.request_id(), products = products.len(), "upload_products: entry");

        let mut tx = self.begin(ctx).await?;
        if let Err(e) = insert_products(&mut tx, products).await {
            error!(rid = %ctx.request_id(), err = %e, "upload_products: insert failed, rolling back");
            rollback(ctx, tx).await;
            return Err(InventoryError::Write(e));
        }
        Self::commit(ctx, tx, "upload_products").await?;

        let inserted = products.len();
        info!(rid = %ctx.request_id(), inserted, "Products uploaded");
        Ok(inserted)
    }

    async fn upload_inventory_in_tx(
        &self,
        ctx: &RequestContext,
        inventory: &Inventory,
    ) -> InventoryResult<usize> {
        debug!(rid = %ctx.request_id(), records = inventory.len(), "upload_inventory: entry");

        let mut tx = self.begin(ctx).await?;
        if let Err(e) = insert_inventory(&mut tx, inventory).await {
            error!(rid = %ctx.request_id(), err = %e, "upload_inventory: insert failed, rolling back");
            rollback(ctx, tx).await;
            return Err(InventoryError::Write(e));
        }
        Self::commit(ctx, tx, "upload_inventory").await?;

        let inserted = inventory.len();
        info!(rid = %ctx.request_id(), inserted, "Inventory uploaded");
        Ok(inserted)
    }

    async fn sell_product_in_tx(
        &self,
        ctx: &RequestContext,
        product_name: &str,
    ) -> InventoryResult<()> {
        debug!(rid = %ctx.request_id(), product = product_name, "sell_product: entry");

        let mut tx = self.begin(ctx).await?;
        let mut stage = SaleStage::Started;

        if let Err(err) = sell_steps(&mut tx, product_name, &mut stage).await {
            info!(
                rid = %ctx.request_id(),
                product = product_name,
                failed_after = ?stage,
                err = %err,
                "Sale rolled back"
            );
            rollback(ctx, tx).await;
            return Err(err);
        }

        Self::commit(ctx, tx, "sell_product").await?;

        info!(rid = %ctx.request_id(), product = product_name, "Product sold, inventory updated");
        Ok(())
    }
}

#[async_trait]
impl InventoryEngine for SqliteInventory {
    async fn ping(&self) -> InventoryResult<()> {
        debug!("ping: entry");
        self.db.ping().await.map_err(|e| {
            error!(err = %e, "Ping failed");
            InventoryError::Connectivity(e)
        })
    }

    async fn get_inventory(&self, ctx: &RequestContext) -> InventoryResult<Vec<StockRecord>> {
        ctx.run("get_inventory", self.get_inventory_in_tx(ctx)).await
    }

    async fn get_product_stock(
        &self,
        ctx: &RequestContext,
    ) -> InventoryResult<Vec<ProductAvailability>> {
        ctx.run("get_product_stock", self.get_product_stock_in_tx(ctx))
            .await
    }

    async fn upload_products(
        &self,
        ctx: &RequestContext,
        products: &Products,
    ) -> InventoryResult<usize> {
        ctx.run("upload_products", self.upload_products_in_tx(ctx, products))
            .await
    }

    async fn upload_inventory(
        &self,
        ctx: &RequestContext,
        inventory: &Inventory,
    ) -> InventoryResult<usize> {
        ctx.run("upload_inventory", self.upload_inventory_in_tx(ctx, inventory))
            .await
    }

    async fn sell_product(&self, ctx: &RequestContext, product_name: &str) -> InventoryResult<()> {
        // Upload stores names trimmed, so look them up the same way.
        let product_name = product_name.trim();
        ctx.run("sell_product", self.sell_product_in_tx(ctx, product_name))
            .await
    }
}

// =============================================================================
// Transaction Bodies
// =============================================================================

async fn insert_products(conn: &mut SqliteConnection, products: &Products) -> Result<(), DbError> {
    for product in &products.products {
        for composition in product.compositions()? {
            queries::insert_composition(conn, &composition).await?;
        }
    }
    Ok(())
}

async fn insert_inventory(conn: &mut SqliteConnection, inventory: &Inventory) -> Result<(), DbError> {
    for record in &inventory.inventory {
        let article = record.to_article()?;
        queries::insert_stock(conn, &article).await?;
    }
    Ok(())
}

/// Existence check, stock check and decrement, in that order.
///
/// `stage` is left at the last stage reached, for logging on failure.
async fn sell_steps(
    conn: &mut SqliteConnection,
    product_name: &str,
    stage: &mut SaleStage,
) -> InventoryResult<()> {
    queries::reserve_product_articles(conn, product_name)
        .await
        .map_err(InventoryError::Write)?;

    let exists = queries::product_exists(conn, product_name)
        .await
        .map_err(InventoryError::Query)?;
    if exists == 0 {
        return Err(InventoryError::ProductNotFound {
            product: product_name.to_string(),
        });
    }
    *stage = SaleStage::ExistenceChecked;

    let short_articles = queries::product_in_stock(conn, product_name)
        .await
        .map_err(InventoryError::Query)?;
    if short_articles != 0 {
        return Err(InventoryError::OutOfStock {
            product: product_name.to_string(),
        });
    }
    *stage = SaleStage::StockChecked;

    let updated = queries::decrement_stock_for_product(conn, product_name)
        .await
        .map_err(InventoryError::Write)?;
    *stage = SaleStage::Decremented;

    debug!(product = product_name, articles = updated, "Stock decremented");
    Ok(())
}

/// Rolls back, logging rather than returning a rollback failure so the
/// error that caused it is the one the caller sees.
async fn rollback(ctx: &RequestContext, tx: Transaction<'static, Sqlite>) {
    if let Err(e) = tx.rollback().await {
        error!(rid = %ctx.request_id(), err = %e, "Rollback failed");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
