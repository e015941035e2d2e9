//! # Domain Types
//!
//! Core domain types used throughout the warehouse inventory.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  WIRE (text quantities)              STORE (integer quantities)         │
//! │  ──────────────────────              ──────────────────────────         │
//! │  Inventory                                                              │
//! │  └── StockRecord ──to_article()────► Article                            │
//! │      art_id, name, stock: "12"       art_id, name, stock: 12            │
//! │                                                                         │
//! │  Products                                                               │
//! │  └── Product ──compositions()──────► ProductComposition (one per pair)  │
//! │      name                            product_name, art_id, amount_of    │
//! │      └── ArticleAmount                                                  │
//! │          art_id, amount_of: "4"                                         │
//! │                                                                         │
//! │  READ PROJECTIONS                                                       │
//! │  StockRecord          (article stock as currently persisted)            │
//! │  ProductAvailability  (units of a product buildable from stock)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON Shapes
//! ```json
//! { "inventory": [ { "art_id": "1", "name": "leg", "stock": "12" } ] }
//! { "products": [ { "name": "Dining Chair",
//!                   "contain_articles": [ { "art_id": "1", "amount_of": "4" } ] } ] }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationResult;
use crate::validation::{lenient_count, parse_amount, parse_stock, require};

// =============================================================================
// Article / Stock
// =============================================================================

/// Stock of one article, as uploaded and as read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockRecord {
    /// Article identifier, unique across the warehouse.
    pub art_id: String,

    /// Human-readable article name.
    pub name: String,

    /// Quantity on hand, as decimal text.
    pub stock: String,
}

impl StockRecord {
    pub fn new(art_id: impl Into<String>, name: impl Into<String>, stock: impl ToString) -> Self {
        StockRecord {
            art_id: art_id.into(),
            name: name.into(),
            stock: stock.to_string(),
        }
    }

    /// Parses this record into a storable article.
    pub fn to_article(&self) -> ValidationResult<Article> {
        Ok(Article {
            art_id: require("art_id", &self.art_id)?.to_string(),
            name: self.name.clone(),
            stock: parse_stock(&self.stock)?,
        })
    }
}

/// An article with a parsed, non-negative stock quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub art_id: String,
    pub name: String,
    pub stock: i64,
}

/// Inventory upload payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub inventory: Vec<StockRecord>,
}

impl Inventory {
    pub fn len(&self) -> usize {
        self.inventory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }
}

impl From<Vec<StockRecord>> for Inventory {
    fn from(inventory: Vec<StockRecord>) -> Self {
        Inventory { inventory }
    }
}

// =============================================================================
// Product / Composition
// =============================================================================

/// One article requirement inside a product definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleAmount {
    pub art_id: String,

    /// Units of the article consumed per product, as decimal text.
    pub amount_of: String,
}

impl ArticleAmount {
    pub fn new(art_id: impl Into<String>, amount_of: impl ToString) -> Self {
        ArticleAmount {
            art_id: art_id.into(),
            amount_of: amount_of.to_string(),
        }
    }
}

/// A sellable product and the articles it is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,

    /// Article requirements. Order carries no meaning.
    pub contain_articles: Vec<ArticleAmount>,
}

impl Product {
    pub fn new(name: impl Into<String>, contain_articles: Vec<ArticleAmount>) -> Self {
        Product {
            name: name.into(),
            contain_articles,
        }
    }

    /// Expands the product into one composition row per article.
    pub fn compositions(&self) -> ValidationResult<Vec<ProductComposition>> {
        let product_name = require("name", &self.name)?;
        self.contain_articles
            .iter()
            .map(|contain| {
                Ok(ProductComposition {
                    product_name: product_name.to_string(),
                    art_id: require("art_id", &contain.art_id)?.to_string(),
                    amount_of: parse_amount(&contain.amount_of)?,
                })
            })
            .collect()
    }
}

/// A persisted (product, article, amount) row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductComposition {
    pub product_name: String,
    pub art_id: String,
    pub amount_of: i64,
}

/// Products upload payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Products {
    pub products: Vec<Product>,
}

impl Products {
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl From<Vec<Product>> for Products {
    fn from(products: Vec<Product>) -> Self {
        Products { products }
    }
}

// =============================================================================
// Availability
// =============================================================================

/// How many units of a product can currently be sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductAvailability {
    pub name: String,

    /// Available units, as decimal text.
    pub available_product_no: String,
}

impl ProductAvailability {
    pub fn new(name: impl Into<String>, available_product_no: impl ToString) -> Self {
        ProductAvailability {
            name: name.into(),
            available_product_no: available_product_no.to_string(),
        }
    }

    /// Available units; unparsable text counts as zero.
    pub fn available(&self) -> i64 {
        lenient_count(&self.available_product_no)
    }

    pub fn is_available(&self) -> bool {
        self.available() != 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    #[test]
    fn test_stock_record_to_article() {
        let record = StockRecord::new("1", "leg", "12");
        assert_eq!(
            record.to_article().unwrap(),
            Article {
                art_id: "1".to_string(),
                name: "leg".to_string(),
                stock: 12,
            }
        );

        let blank = StockRecord::new(" ", "leg", "12");
        assert!(matches!(
            blank.to_article(),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_product_compositions() {
        let chair = Product::new(
            "Dining Chair",
            vec![ArticleAmount::new("1", 4), ArticleAmount::new("2", "8")],
        );
        let rows = chair.compositions().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_name, "Dining Chair");
        assert_eq!(rows[0].amount_of, 4);
        assert_eq!(rows[1].art_id, "2");
        assert_eq!(rows[1].amount_of, 8);
    }

    #[test]
    fn test_product_compositions_rejects_bad_amount() {
        let table = Product::new("Table", vec![ArticleAmount::new("1", "four")]);
        assert!(matches!(
            table.compositions(),
            Err(ValidationError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_availability_is_lenient() {
        assert!(ProductAvailability::new("gadget", "4").is_available());
        assert!(!ProductAvailability::new("widget", "0").is_available());
        assert!(!ProductAvailability::new("broken", "n/a").is_available());
    }

    #[test]
    fn test_payload_json_shape() {
        let json = r#"{
            "products": [
                {
                    "name": "Dining Chair",
                    "contain_articles": [
                        { "art_id": "1", "amount_of": "4" },
                        { "art_id": "2", "amount_of": "8" }
                    ]
                }
            ]
        }"#;
        let products: Products = serde_json::from_str(json).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products.products[0].contain_articles[1].amount_of, "8");

        let inventory: Inventory =
            serde_json::from_str(r#"{"inventory":[{"art_id":"1","name":"leg","stock":"12"}]}"#)
                .unwrap();
        assert_eq!(inventory.inventory[0], StockRecord::new("1", "leg", 12));
    }
}
