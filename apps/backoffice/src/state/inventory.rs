//! # Inventory State
//!
//! The four collections held in memory and mirrored to the store.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_product(input)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate input ──── ValidationError? ──► Err, nothing changed         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build next collection (clone + change)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  repo.save_products(&next).await ── StoreError? ──► Err, nothing changed│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  self.products = next                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Memory and store never disagree: a collection is only replaced after
//! its document has been written.
//!
//! ## Ownership
//! One task owns the state and mutates it through `&mut self`; there is no
//! lock. Reads go through the accessors and are re-filtered from scratch
//! by the view on every call.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::AppResult;
use stockroom_core::validation::{validate_product, validate_settings, validate_supplier};
use stockroom_core::{
    compute_category_counts, compute_dashboard, CategoryCount, CategoryList, CoreError,
    DashboardSummary, DocumentType, Product, Settings, Supplier,
};
use stockroom_store::{Inventory, InventoryRepository, KeyValueStore};

// =============================================================================
// Inputs
// =============================================================================

/// Product fields as submitted by the product form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub category: Option<String>,
    pub price_cents: i64,
    pub stock: i64,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub expiry: Option<NaiveDate>,
}

impl ProductInput {
    fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: self.name.trim().to_string(),
            code: self.code.trim().to_string(),
            category: non_empty(self.category),
            price_cents: self.price_cents,
            stock: self.stock,
            expiry: self.expiry,
        }
    }
}

/// Supplier fields as submitted by the supplier form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInput {
    pub legal_name: String,
    #[serde(default)]
    pub trade_name: Option<String>,
    pub document: String,
    pub document_type: DocumentType,
    #[serde(default)]
    pub phone: String,
}

impl SupplierInput {
    fn into_supplier(self, id: String) -> Supplier {
        Supplier {
            id,
            legal_name: self.legal_name.trim().to_string(),
            trade_name: non_empty(self.trade_name),
            document: self.document.trim().to_string(),
            document_type: self.document_type,
            phone: self.phone.trim().to_string(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Inventory State
// =============================================================================

/// Owns the inventory collections and the repository they persist through.
#[derive(Debug)]
pub struct InventoryState<S> {
    repo: InventoryRepository<S>,
    products: Vec<Product>,
    suppliers: Vec<Supplier>,
    categories: CategoryList,
    settings: Settings,
}

impl<S: KeyValueStore> InventoryState<S> {
    /// Loads every collection from the store.
    pub async fn load(repo: InventoryRepository<S>, seed_categories: bool) -> AppResult<Self> {
        let inventory = repo.load_all(seed_categories).await?;
        Ok(Self::from_inventory(repo, inventory))
    }

    /// Wraps already-loaded collections.
    pub fn from_inventory(repo: InventoryRepository<S>, inventory: Inventory) -> Self {
        InventoryState {
            repo,
            products: inventory.products,
            suppliers: inventory.suppliers,
            categories: inventory.categories,
            settings: inventory.settings,
        }
    }

    pub fn repository(&self) -> &InventoryRepository<S> {
        &self.repo
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    pub fn categories(&self) -> &CategoryList {
        &self.categories
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Dashboard cards for the current collections and settings.
    pub fn dashboard(&self) -> DashboardSummary {
        compute_dashboard(&self.products, &self.suppliers, &self.settings)
    }

    /// Category chart bars.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        compute_category_counts(&self.products, &self.categories)
    }

    // =========================================================================
    // Products
    // =========================================================================

    pub fn get_product(&self, id: &str) -> AppResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()).into())
    }

    fn product_index(&self, id: &str) -> AppResult<usize> {
        self.products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()).into())
    }

    /// Rejects a category label that isn't in the category list.
    fn check_category(&self, product: &Product) -> AppResult<()> {
        match product.category() {
            Some(label) if !self.categories.contains(label) => {
                Err(CoreError::CategoryNotFound(label.to_string()).into())
            }
            _ => Ok(()),
        }
    }

    /// Appends a new product with a generated id.
    pub async fn create_product(&mut self, input: ProductInput) -> AppResult<Product> {
        let product = input.into_product(Uuid::new_v4().to_string());
        validate_product(&product)?;
        self.check_category(&product)?;

        let mut next = self.products.clone();
        next.push(product.clone());
        self.repo.save_products(&next).await?;
        self.products = next;

        info!(id = %product.id, code = %product.code, "Product created");
        Ok(product)
    }

    /// Replaces a product's fields, keeping its id and position.
    pub async fn update_product(&mut self, id: &str, input: ProductInput) -> AppResult<Product> {
        let index = self.product_index(id)?;
        let product = input.into_product(id.to_string());
        validate_product(&product)?;
        self.check_category(&product)?;

        let mut next = self.products.clone();
        next[index] = product.clone();
        self.repo.save_products(&next).await?;
        self.products = next;

        info!(id = %id, "Product updated");
        Ok(product)
    }

    pub async fn delete_product(&mut self, id: &str) -> AppResult<Product> {
        let index = self.product_index(id)?;

        let mut next = self.products.clone();
        let removed = next.remove(index);
        self.repo.save_products(&next).await?;
        self.products = next;

        info!(id = %id, "Product deleted");
        Ok(removed)
    }

    // =========================================================================
    // Suppliers
    // =========================================================================

    pub fn get_supplier(&self, id: &str) -> AppResult<&Supplier> {
        self.suppliers
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::SupplierNotFound(id.to_string()).into())
    }

    fn supplier_index(&self, id: &str) -> AppResult<usize> {
        self.suppliers
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CoreError::SupplierNotFound(id.to_string()).into())
    }

    pub async fn create_supplier(&mut self, input: SupplierInput) -> AppResult<Supplier> {
        let supplier = input.into_supplier(Uuid::new_v4().to_string());
        validate_supplier(&supplier)?;

        let mut next = self.suppliers.clone();
        next.push(supplier.clone());
        self.repo.save_suppliers(&next).await?;
        self.suppliers = next;

        info!(id = %supplier.id, "Supplier created");
        Ok(supplier)
    }

    pub async fn update_supplier(&mut self, id: &str, input: SupplierInput) -> AppResult<Supplier> {
        let index = self.supplier_index(id)?;
        let supplier = input.into_supplier(id.to_string());
        validate_supplier(&supplier)?;

        let mut next = self.suppliers.clone();
        next[index] = supplier.clone();
        self.repo.save_suppliers(&next).await?;
        self.suppliers = next;

        info!(id = %id, "Supplier updated");
        Ok(supplier)
    }

    pub async fn delete_supplier(&mut self, id: &str) -> AppResult<Supplier> {
        let index = self.supplier_index(id)?;

        let mut next = self.suppliers.clone();
        let removed = next.remove(index);
        self.repo.save_suppliers(&next).await?;
        self.suppliers = next;

        info!(id = %id, "Supplier deleted");
        Ok(removed)
    }

    // =========================================================================
    // Categories
    // =========================================================================

    pub async fn add_category(&mut self, label: &str) -> AppResult<()> {
        let mut next = self.categories.clone();
        next.add(label)?;
        self.repo.save_categories(&next).await?;
        self.categories = next;

        info!(category = %label.trim(), "Category added");
        Ok(())
    }

    /// Removes a category. Products keep the label.
    pub async fn remove_category(&mut self, label: &str) -> AppResult<()> {
        let label = label.trim();
        let mut next = self.categories.clone();
        next.remove(label)?;
        self.repo.save_categories(&next).await?;
        self.categories = next;

        let orphaned = self
            .products
            .iter()
            .filter(|p| p.category() == Some(label))
            .count();
        info!(category = %label, orphaned, "Category removed");
        Ok(())
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Replaces the settings singleton.
    pub async fn save_settings(&mut self, settings: Settings) -> AppResult<&Settings> {
        let settings = settings.normalized();
        validate_settings(&settings)?;

        self.repo.save_settings(&settings).await?;
        debug!(
            threshold = settings.low_stock_threshold,
            currency = %settings.default_currency,
            "Settings saved"
        );
        self.settings = settings;
        Ok(&self.settings)
    }

    /// Flips the auto-backup flag. Only the flag changes, so the other
    /// fields are not re-validated.
    pub async fn set_auto_backup(&mut self, enabled: bool) -> AppResult<&Settings> {
        let settings = Settings {
            auto_backup: enabled,
            ..self.settings.clone()
        };

        self.repo.save_settings(&settings).await?;
        info!(enabled, "Auto backup toggled");
        self.settings = settings;
        Ok(&self.settings)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::AppError;
    use stockroom_core::ValidationError;
    use stockroom_store::{MemoryStore, StorageKey};

    pub(crate) fn product_input(name: &str, category: Option<&str>, stock: i64) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            code: format!("C-{}", name.len()),
            category: category.map(str::to_string),
            price_cents: 1000,
            stock,
            expiry: None,
        }
    }

    pub(crate) fn supplier_input(legal_name: &str, document_type: DocumentType) -> SupplierInput {
        SupplierInput {
            legal_name: legal_name.to_string(),
            trade_name: None,
            document: "12.345.678/0001-90".to_string(),
            document_type,
            phone: "555-0100".to_string(),
        }
    }

    pub(crate) async fn empty_state() -> (MemoryStore, InventoryState<MemoryStore>) {
        let store = MemoryStore::new();
        let state = InventoryState::load(InventoryRepository::new(store.clone()), true)
            .await
            .unwrap();
        (store, state)
    }

    async fn reload(store: &MemoryStore) -> Inventory {
        InventoryRepository::new(store.clone()).load_all(true).await.unwrap()
    }

    #[tokio::test]
    async fn test_load_empty_store() {
        let (store, state) = empty_state().await;
        assert!(state.products().is_empty());
        assert_eq!(state.categories(), &CategoryList::seeded());
        assert_eq!(state.settings(), &Settings::default());
        // Loading alone writes nothing
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_create_product_persists() {
        let (store, mut state) = empty_state().await;

        let created = state
            .create_product(product_input(" Whole Milk ", Some("Food"), 4))
            .await
            .unwrap();

        assert_eq!(created.name, "Whole Milk");
        assert!(Uuid::parse_str(&created.id).is_ok());
        assert_eq!(state.get_product(&created.id).unwrap(), &created);
        assert_eq!(reload(&store).await.products, vec![created]);
    }

    #[tokio::test]
    async fn test_create_product_rejects_unknown_category() {
        let (store, mut state) = empty_state().await;

        let result = state
            .create_product(product_input("Toy Car", Some("Toys"), 1))
            .await;
        assert!(matches!(
            result,
            Err(AppError::Core(CoreError::CategoryNotFound(_)))
        ));
        assert!(state.products().is_empty());
        assert_eq!(store.raw(StorageKey::Products.as_str()).unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_product_validates() {
        let (_, mut state) = empty_state().await;

        let mut input = product_input("Rice", None, -1);
        assert!(matches!(
            state.create_product(input.clone()).await,
            Err(AppError::Core(CoreError::Validation(ValidationError::OutOfRange { .. })))
        ));

        input.stock = 1;
        input.name = "  ".to_string();
        assert!(state.create_product(input).await.is_err());
        assert!(state.products().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_position() {
        let (store, mut state) = empty_state().await;
        let a = state.create_product(product_input("A", None, 1)).await.unwrap();
        let b = state.create_product(product_input("B", None, 1)).await.unwrap();
        let c = state.create_product(product_input("C", None, 1)).await.unwrap();

        let updated = state
            .update_product(&b.id, product_input("B2", Some("Food"), 9))
            .await
            .unwrap();
        assert_eq!(updated.id, b.id);

        let names: Vec<&str> = state.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B2", "C"]);
        assert_eq!(reload(&store).await.products[1].stock, 9);

        let ids: Vec<&str> = state.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec![a.id.as_str(), b.id.as_str(), c.id.as_str()]);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let (_, mut state) = empty_state().await;
        let missing = Uuid::new_v4().to_string();

        assert!(matches!(
            state.update_product(&missing, product_input("A", None, 1)).await,
            Err(AppError::Core(CoreError::ProductNotFound(_)))
        ));
        assert!(matches!(
            state.delete_supplier(&missing).await,
            Err(AppError::Core(CoreError::SupplierNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_delete_product() {
        let (store, mut state) = empty_state().await;
        let a = state.create_product(product_input("A", None, 1)).await.unwrap();
        let b = state.create_product(product_input("B", None, 1)).await.unwrap();

        let removed = state.delete_product(&a.id).await.unwrap();
        assert_eq!(removed, a);
        assert_eq!(state.products(), &[b.clone()]);
        assert_eq!(reload(&store).await.products, vec![b]);
    }

    #[tokio::test]
    async fn test_supplier_lifecycle() {
        let (store, mut state) = empty_state().await;

        let mut input = supplier_input("Acme Comercio Ltda", DocumentType::Company);
        input.trade_name = Some("   ".to_string());
        let created = state.create_supplier(input).await.unwrap();
        assert_eq!(created.trade_name, None);

        let mut input = supplier_input("Acme Comercio Ltda", DocumentType::Company);
        input.trade_name = Some("Acme".to_string());
        state.update_supplier(&created.id, input).await.unwrap();
        assert_eq!(state.get_supplier(&created.id).unwrap().display_name(), "Acme");

        state.delete_supplier(&created.id).await.unwrap();
        assert!(reload(&store).await.suppliers.is_empty());
    }

    #[tokio::test]
    async fn test_categories() {
        let (store, mut state) = empty_state().await;
        state
            .create_product(product_input("Milk", Some("Food"), 1))
            .await
            .unwrap();

        state.add_category(" Toys ").await.unwrap();
        assert!(state.categories().contains("Toys"));
        assert!(state.add_category("Toys").await.is_err());

        state.remove_category("Food").await.unwrap();
        assert!(!state.categories().contains("Food"));
        // The product keeps its label and drops out of the chart
        assert_eq!(state.products()[0].category(), Some("Food"));
        assert!(state.category_counts().iter().all(|c| c.category != "Food"));

        let stored = reload(&store).await.categories;
        assert_eq!(stored.as_slice(), &["Electronics", "Cleaning", "Clothing", "Toys"]);
    }

    #[tokio::test]
    async fn test_settings() {
        let (store, mut state) = empty_state().await;

        let saved = state
            .save_settings(Settings {
                company_name: " Corner Shop ".to_string(),
                low_stock_threshold: 3,
                default_currency: "usd".to_string(),
                auto_backup: false,
            })
            .await
            .unwrap()
            .clone();
        assert_eq!(saved.company_name, "Corner Shop");
        assert_eq!(saved.default_currency, "USD");

        state.set_auto_backup(true).await.unwrap();
        let stored = reload(&store).await.settings;
        assert!(stored.auto_backup);
        assert_eq!(stored.low_stock_threshold, 3);

        let bad = Settings {
            default_currency: "DOLLARS".to_string(),
            ..Settings::default()
        };
        assert!(state.save_settings(bad).await.is_err());
        assert_eq!(state.settings().default_currency, "USD");
    }

    #[tokio::test]
    async fn test_remove_category_trims_label() {
        let (_, mut state) = empty_state().await;
        state.add_category(" Toys ").await.unwrap();
        state.remove_category(" Toys ").await.unwrap();
        assert!(!state.categories().contains("Toys"));
    }

    #[tokio::test]
    async fn test_stored_records_with_short_ids_are_editable() {
        let store = MemoryStore::new();
        store
            .insert_raw(
                StorageKey::Products.as_str(),
                r#"[{"id":"1","name":"Milk","code":"M-1","priceCents":500,"stock":3}]"#,
            )
            .unwrap();
        store
            .insert_raw(
                StorageKey::Suppliers.as_str(),
                r#"[{"id":"s1","legalName":"Acme","document":"123","documentType":"company","phone":""}]"#,
            )
            .unwrap();
        let mut state = InventoryState::load(InventoryRepository::new(store.clone()), true)
            .await
            .unwrap();

        let updated = state
            .update_product("1", product_input("Whole Milk", Some("Food"), 8))
            .await
            .unwrap();
        assert_eq!(updated.id, "1");
        assert_eq!(updated.stock, 8);

        let updated = state
            .update_supplier("s1", supplier_input("Acme Ltda", DocumentType::Company))
            .await
            .unwrap();
        assert_eq!(updated.id, "s1");

        let stored = reload(&store).await;
        assert_eq!(stored.products[0].name, "Whole Milk");
        assert_eq!(stored.suppliers[0].legal_name, "Acme Ltda");
    }

    #[tokio::test]
    async fn test_auto_backup_ignores_untouched_fields() {
        let store = MemoryStore::new();
        let settings = Settings {
            default_currency: "R$".to_string(),
            ..Settings::default()
        };
        let inventory = Inventory {
            settings,
            ..Inventory::default()
        };
        let mut state = InventoryState::from_inventory(InventoryRepository::new(store.clone()), inventory);

        let saved = state.set_auto_backup(true).await.unwrap();
        assert!(saved.auto_backup);
        assert_eq!(saved.default_currency, "R$");
    }

    #[tokio::test]
    async fn test_auto_backup_after_loading_bad_currency() {
        let store = MemoryStore::new();
        store
            .insert_raw(
                StorageKey::Settings.as_str(),
                r#"{"companyName":"Corner Shop","defaultCurrency":"R$"}"#,
            )
            .unwrap();
        let mut state = InventoryState::load(InventoryRepository::new(store.clone()), true)
            .await
            .unwrap();

        let saved = state.set_auto_backup(true).await.unwrap().clone();
        assert!(saved.auto_backup);
        assert_eq!(saved.default_currency, "BRL");
        assert_eq!(reload(&store).await.settings, saved);
    }

    #[tokio::test]
    async fn test_dashboard_follows_threshold() {
        let (_, mut state) = empty_state().await;
        for stock in [0, 3, 10, 11] {
            state
                .create_product(product_input("Item", None, stock))
                .await
                .unwrap();
        }
        assert_eq!(state.dashboard().low_stock_count, 3);

        let settings = Settings {
            low_stock_threshold: 3,
            ..state.settings().clone()
        };
        state.save_settings(settings).await.unwrap();
        assert_eq!(state.dashboard().low_stock_count, 2);
        assert_eq!(state.dashboard().total_stock_value.cents(), 24_000);
    }
}
