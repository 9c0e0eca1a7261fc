//! # Inventory Repository
//!
//! Typed access to the four inventory documents on top of any
//! [`KeyValueStore`].
//!
//! ## Load Fallbacks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stored value              products / suppliers    categories   settings│
//! │  ───────────────────────   ────────────────────    ──────────   ────────│
//! │  absent / null             []                      seed or []   default │
//! │  not valid JSON            [] + warn               seed or []   default │
//! │  wrong JSON shape          [] + warn               [] + warn    default │
//! │  one bad element           element skipped + warn  skipped      -       │
//! │  negative stock / price    element skipped + warn  -            -       │
//! │  blank or spaced id        element skipped + warn  -            -       │
//! │  bad company / currency    -                       -            default │
//! │  duplicate category        -                       first wins   -       │
//! │  missing settings field    -                       -            default │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Loading never fails because of what is stored; only an unreachable
//! store produces an error.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::gateway::{KeyValueStore, StorageKey};
use stockroom_core::validation::{
    validate_company_name, validate_currency_code, validate_stored_product,
    validate_stored_supplier, ValidationResult,
};
use stockroom_core::{CategoryList, Product, Settings, Supplier};

// =============================================================================
// Inventory Snapshot
// =============================================================================

/// Everything loaded at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Inventory {
    pub products: Vec<Product>,
    pub suppliers: Vec<Supplier>,
    pub categories: CategoryList,
    pub settings: Settings,
}

// =============================================================================
// Repository
// =============================================================================

/// Reads and writes the inventory documents.
#[derive(Debug, Clone)]
pub struct InventoryRepository<S> {
    store: S,
}

impl<S: KeyValueStore> InventoryRepository<S> {
    pub fn new(store: S) -> Self {
        InventoryRepository { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads a document, treating unparseable text like an absent one.
    async fn load_value(&self, key: StorageKey) -> StoreResult<Option<Value>> {
        match self.store.load(key.as_str()).await {
            Ok(Some(Value::Null)) => Ok(None),
            Ok(value) => Ok(value),
            Err(StoreError::Serialization(e)) => {
                warn!(key = %key, error = %e, "Stored document is not valid JSON, using default");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn save_value<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> StoreResult<()> {
        let value = serde_json::to_value(value)?;
        self.store.save(key.as_str(), &value).await
    }

    /// Loads all four documents.
    ///
    /// With `seed_categories`, an absent category list becomes the default
    /// categories. Nothing is written back until the first mutation.
    pub async fn load_all(&self, seed_categories: bool) -> StoreResult<Inventory> {
        let inventory = Inventory {
            products: self.load_products().await?,
            suppliers: self.load_suppliers().await?,
            categories: self.load_categories(seed_categories).await?,
            settings: self.load_settings().await?,
        };

        info!(
            products = inventory.products.len(),
            suppliers = inventory.suppliers.len(),
            categories = inventory.categories.len(),
            "Inventory loaded"
        );

        Ok(inventory)
    }

    pub async fn load_products(&self) -> StoreResult<Vec<Product>> {
        let value = self.load_value(StorageKey::Products).await?;
        Ok(decode_list(StorageKey::Products, value, validate_stored_product))
    }

    pub async fn load_suppliers(&self) -> StoreResult<Vec<Supplier>> {
        let value = self.load_value(StorageKey::Suppliers).await?;
        Ok(decode_list(StorageKey::Suppliers, value, validate_stored_supplier))
    }

    pub async fn load_categories(&self, seed_if_absent: bool) -> StoreResult<CategoryList> {
        let value = self.load_value(StorageKey::Categories).await?;

        if value.is_none() {
            debug!(seeded = seed_if_absent, "No stored categories");
            return Ok(if seed_if_absent {
                CategoryList::seeded()
            } else {
                CategoryList::new()
            });
        }

        let labels: Vec<String> = decode_list(StorageKey::Categories, value, |_| Ok(()));
        let stored = labels.len();
        let list = CategoryList::from_labels(labels);

        if list.len() != stored {
            warn!(
                dropped = stored - list.len(),
                "Dropped empty or duplicate stored categories"
            );
        }

        Ok(list)
    }

    pub async fn load_settings(&self) -> StoreResult<Settings> {
        let value = self.load_value(StorageKey::Settings).await?;
        Ok(decode_settings(value))
    }

    pub async fn save_products(&self, products: &[Product]) -> StoreResult<()> {
        debug!(count = products.len(), "Saving products");
        self.save_value(StorageKey::Products, products).await
    }

    pub async fn save_suppliers(&self, suppliers: &[Supplier]) -> StoreResult<()> {
        debug!(count = suppliers.len(), "Saving suppliers");
        self.save_value(StorageKey::Suppliers, suppliers).await
    }

    pub async fn save_categories(&self, categories: &CategoryList) -> StoreResult<()> {
        debug!(count = categories.len(), "Saving categories");
        self.save_value(StorageKey::Categories, categories.as_slice()).await
    }

    pub async fn save_settings(&self, settings: &Settings) -> StoreResult<()> {
        debug!("Saving settings");
        self.save_value(StorageKey::Settings, settings).await
    }

    /// Writes all four documents.
    pub async fn save_all(&self, inventory: &Inventory) -> StoreResult<()> {
        self.save_products(&inventory.products).await?;
        self.save_suppliers(&inventory.suppliers).await?;
        self.save_categories(&inventory.categories).await?;
        self.save_settings(&inventory.settings).await
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decodes a JSON array element by element, skipping what doesn't fit.
///
/// An element that decodes but fails `check` is skipped as well, so
/// nothing in memory breaks the entity invariants.
fn decode_list<T, F>(key: StorageKey, value: Option<Value>, check: F) -> Vec<T>
where
    T: DeserializeOwned,
    F: Fn(&T) -> ValidationResult<()>,
{
    let items = match value {
        None => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!(key = %key, kind = json_kind(&other), "Expected an array, using empty list");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(decoded) => match check(&decoded) {
                Ok(()) => Some(decoded),
                Err(e) => {
                    warn!(key = %key, index, error = %e, "Skipping invalid stored record");
                    None
                }
            },
            Err(e) => {
                warn!(key = %key, index, error = %e, "Skipping malformed stored record");
                None
            }
        })
        .collect()
}

fn decode_settings(value: Option<Value>) -> Settings {
    match value {
        None => Settings::default(),
        Some(value @ Value::Object(_)) => match serde_json::from_value::<Settings>(value) {
            Ok(settings) => repair_settings(settings),
            Err(e) => {
                warn!(error = %e, "Malformed stored settings, using defaults");
                Settings::default()
            }
        },
        Some(other) => {
            warn!(kind = json_kind(&other), "Expected settings object, using defaults");
            Settings::default()
        }
    }
}

/// Normalizes stored settings and resets any field that would fail a save.
fn repair_settings(settings: Settings) -> Settings {
    let mut settings = settings.normalized();
    let defaults = Settings::default();

    if let Err(e) = validate_company_name(&settings.company_name) {
        warn!(error = %e, "Invalid stored company name, using default");
        settings.company_name = defaults.company_name;
    }

    if let Err(e) = validate_currency_code(&settings.default_currency) {
        warn!(error = %e, "Invalid stored currency, using default");
        settings.default_currency = defaults.default_currency;
    }

    settings
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::pool::{SqliteStore, StoreConfig};
    use serde_json::json;
    use stockroom_core::DocumentType;

    fn product(id: &str, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            code: format!("P-{}", id),
            category: Some("Food".to_string()),
            price_cents: 250,
            stock,
            expiry: None,
        }
    }

    fn repo() -> (MemoryStore, InventoryRepository<MemoryStore>) {
        let store = MemoryStore::new();
        (store.clone(), InventoryRepository::new(store))
    }

    #[tokio::test]
    async fn test_empty_store_defaults() {
        let (_, repo) = repo();

        let inventory = repo.load_all(true).await.unwrap();
        assert!(inventory.products.is_empty());
        assert!(inventory.suppliers.is_empty());
        assert_eq!(inventory.categories, CategoryList::seeded());
        assert_eq!(inventory.settings, Settings::default());

        let unseeded = repo.load_all(false).await.unwrap();
        assert!(unseeded.categories.is_empty());
    }

    #[tokio::test]
    async fn test_save_all_then_load_all() {
        let (_, repo) = repo();
        let mut categories = CategoryList::seeded();
        categories.add("Toys").unwrap();

        let inventory = Inventory {
            products: vec![product("1", 3), product("2", 0)],
            suppliers: vec![Supplier {
                id: "s1".to_string(),
                legal_name: "Acme Ltda".to_string(),
                trade_name: Some("Acme".to_string()),
                document: "12.345.678/0001-90".to_string(),
                document_type: DocumentType::Company,
                phone: "555".to_string(),
            }],
            categories,
            settings: Settings {
                company_name: "Corner Shop".to_string(),
                auto_backup: true,
                ..Settings::default()
            },
        };

        repo.save_all(&inventory).await.unwrap();
        assert_eq!(repo.load_all(true).await.unwrap(), inventory);
    }

    #[tokio::test]
    async fn test_non_array_collection_falls_back() {
        let (store, repo) = repo();
        store.insert_raw("products", r#"{"id":"1"}"#).unwrap();
        store.insert_raw("suppliers", "42").unwrap();

        assert!(repo.load_products().await.unwrap().is_empty());
        assert!(repo.load_suppliers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_record_is_skipped() {
        let (store, repo) = repo();
        let good = serde_json::to_value(product("1", 5)).unwrap();
        store
            .save("products", &json!([good, { "id": "2", "name": "no price" }]))
            .await
            .unwrap();

        let products = repo.load_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "1");
    }

    #[tokio::test]
    async fn test_records_breaking_invariants_are_skipped() {
        let (store, repo) = repo();
        let good = serde_json::to_value(product("1", 5)).unwrap();
        store
            .save(
                "products",
                &json!([
                    { "id": "2", "name": "A", "code": "A", "priceCents": -500, "stock": -3 },
                    { "id": "3", "name": "B", "code": "B", "priceCents": 100, "stock": -1 },
                    { "id": "", "name": "C", "code": "C", "priceCents": 100, "stock": 1 },
                    good,
                ]),
            )
            .await
            .unwrap();
        store
            .save(
                "suppliers",
                &json!([{
                    "id": " ",
                    "legalName": "X",
                    "document": "1",
                    "documentType": "company",
                    "phone": ""
                }]),
            )
            .await
            .unwrap();

        let products = repo.load_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "1");
        assert!(products.iter().all(|p| p.stock >= 0 && p.price_cents >= 0));
        assert!(repo.load_suppliers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_legacy_ids_are_kept() {
        let (store, repo) = repo();
        store
            .save("products", &json!([serde_json::to_value(product("1", 5)).unwrap()]))
            .await
            .unwrap();

        let products = repo.load_products().await.unwrap();
        assert_eq!(products[0].id, "1");
    }

    #[tokio::test]
    async fn test_invalid_stored_settings_fields_are_repaired() {
        let (store, repo) = repo();
        store
            .save(
                "settings",
                &json!({
                    "companyName": "  Corner Shop ",
                    "lowStockThreshold": 4,
                    "defaultCurrency": "R$",
                    "autoBackup": true
                }),
            )
            .await
            .unwrap();

        let settings = repo.load_settings().await.unwrap();
        assert_eq!(settings.company_name, "Corner Shop");
        assert_eq!(settings.default_currency, "BRL");
        assert_eq!(settings.low_stock_threshold, 4);
        assert!(settings.auto_backup);

        store
            .save("settings", &json!({ "companyName": "", "defaultCurrency": "usd" }))
            .await
            .unwrap();
        let settings = repo.load_settings().await.unwrap();
        assert_eq!(settings.company_name, "My Company");
        assert_eq!(settings.default_currency, "USD");
    }

    #[tokio::test]
    async fn test_invalid_json_text_falls_back() {
        let (store, repo) = repo();
        store.insert_raw("products", "[{").unwrap();
        store.insert_raw("settings", "not json").unwrap();
        store.insert_raw("categories", "[").unwrap();

        let inventory = repo.load_all(true).await.unwrap();
        assert!(inventory.products.is_empty());
        assert_eq!(inventory.settings, Settings::default());
        assert_eq!(inventory.categories, CategoryList::seeded());
    }

    #[tokio::test]
    async fn test_null_document_is_absent() {
        let (store, repo) = repo();
        store.insert_raw("categories", "null").unwrap();
        assert_eq!(repo.load_categories(true).await.unwrap(), CategoryList::seeded());
    }

    #[tokio::test]
    async fn test_duplicate_categories_dropped() {
        let (store, repo) = repo();
        store
            .save("categories", &json!(["Food", "Toys", "Food", 7, "Toys"]))
            .await
            .unwrap();

        let categories = repo.load_categories(true).await.unwrap();
        assert_eq!(categories.as_slice(), &["Food", "Toys"]);
    }

    #[tokio::test]
    async fn test_settings_fallbacks() {
        let (store, repo) = repo();

        store.save("settings", &json!(["not", "an", "object"])).await.unwrap();
        assert_eq!(repo.load_settings().await.unwrap(), Settings::default());

        store.save("settings", &json!({ "lowStockThreshold": "ten" })).await.unwrap();
        assert_eq!(repo.load_settings().await.unwrap(), Settings::default());

        store.save("settings", &json!({ "lowStockThreshold": 3 })).await.unwrap();
        let settings = repo.load_settings().await.unwrap();
        assert_eq!(settings.low_stock_threshold, 3);
        assert_eq!(settings.default_currency, "BRL");
    }

    #[tokio::test]
    async fn test_sqlite_backed_repository() {
        let store = SqliteStore::new(StoreConfig::in_memory()).await.unwrap();
        let repo = InventoryRepository::new(store);

        repo.save_products(&[product("1", 1)]).await.unwrap();
        let products = repo.load_products().await.unwrap();
        assert_eq!(products, vec![product("1", 1)]);

        let keys = repo.store().keys().await.unwrap();
        assert_eq!(keys, vec!["products".to_string()]);
    }
}
