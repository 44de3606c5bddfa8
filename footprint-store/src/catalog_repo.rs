use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;
use footprint_catalog::{Product, ProductError};
use footprint_shared::Money;
use tracing::info;

/// Read-only access to the product catalog
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Products in display order
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError>;

    async fn get_product(&self, id: Uuid) -> Result<Option<Product>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid product '{name}': {source}")]
    InvalidProduct {
        name: String,
        #[source]
        source: ProductError,
    },

    #[error("Duplicate product id: {0}")]
    DuplicateId(Uuid),
}

/// Catalog held in memory for the lifetime of the process
pub struct InMemoryProductRepository {
    products: Vec<Product>,
}

impl InMemoryProductRepository {
    pub fn new(products: Vec<Product>) -> Result<Self, RepositoryError> {
        let mut seen = HashSet::new();
        for product in &products {
            product.validate().map_err(|source| RepositoryError::InvalidProduct {
                name: product.name.clone(),
                source,
            })?;
            if !seen.insert(product.id) {
                return Err(RepositoryError::DuplicateId(product.id));
            }
        }
        Ok(Self { products })
    }

    /// Load a JSON array of products
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let products: Vec<Product> = serde_json::from_str(&raw)?;
        info!("Loaded {} products from {}", products.len(), path.display());
        Self::new(products)
    }

    /// Built-in catalog used when no seed file is configured
    pub fn seeded() -> Self {
        Self { products: seed_products() }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.products.clone())
    }

    async fn get_product(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }
}

fn seed_products() -> Vec<Product> {
    let seed = [
        (1, "Classic Oxford", "Formal", "/images/classic-oxford.jpg", 1200, 800),
        (2, "Suede Loafer", "Casual", "/images/suede-loafer.jpg", 1500, 950),
        (3, "Leather Chelsea Boot", "Boots", "/images/chelsea-boot.jpg", 2400, 1650),
        (4, "Canvas Sneaker", "Sports", "/images/canvas-sneaker.jpg", 900, 560),
        (5, "Kolhapuri Sandal", "Ethnic", "/images/kolhapuri.jpg", 700, 420),
        (6, "Monk Strap", "Formal", "/images/monk-strap.jpg", 1800, 1250),
    ];

    seed.into_iter()
        .map(|(n, name, category, image, retail, wholesale)| Product {
            id: Uuid::from_u128(0x5eed_0000_0000_0000_0000_0000_0000_0000 + n),
            name: name.to_string(),
            category: category.to_string(),
            image: image.to_string(),
            retail_price: Money::new(retail),
            wholesale_price: Money::new(wholesale),
        })
        .collect()
}
