//! Catalog repository: read-only lookups over products and categories.
//!
//! The catalog is owned by an external catalog-management process; this
//! repository never writes to it.

use sqlx::SqlitePool;

use loftwood_core::{Category, CategoryId, DisplayPrice, Product, ProductId};

use super::RepositoryError;

/// Raw product row (before image enrichment).
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    title: String,
    price: String,
    description: Option<String>,
    characteristics: Option<String>,
    category_id: Option<i64>,
    category_name: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    slug: String,
    products_count: i64,
}

const PRODUCT_SELECT: &str = r"
    SELECT p.id, p.title, p.price, p.description, p.characteristics,
           p.category_id, c.name AS category_name
    FROM products p
    LEFT JOIN categories c ON p.category_id = c.id
";

/// Repository for catalog database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all products, each enriched with its ordered image list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(PRODUCT_SELECT).fetch_all(self.pool).await?;
        self.enrich(rows).await
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> =
            sqlx::query_as(&format!("{PRODUCT_SELECT} WHERE p.id = ?1"))
                .bind(id.as_i64())
                .fetch_optional(self.pool)
                .await?;

        match row {
            Some(row) => {
                let images = self.images_for(row.id).await?;
                Ok(Some(into_product(row, images)))
            }
            None => Ok(None),
        }
    }

    /// List products in a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> =
            sqlx::query_as(&format!("{PRODUCT_SELECT} WHERE p.category_id = ?1"))
                .bind(category_id.as_i64())
                .fetch_all(self.pool)
                .await?;
        self.enrich(rows).await
    }

    /// Substring search over title and description, case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, RepositoryError> {
        let pattern = format!("%{query}%");
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "{PRODUCT_SELECT} WHERE p.title LIKE ?1 OR p.description LIKE ?1"
        ))
        .bind(&pattern)
        .fetch_all(self.pool)
        .await?;
        self.enrich(rows).await
    }

    /// Whether a product with this id exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM products WHERE id = ?1")
            .bind(id.as_i64())
            .fetch_optional(self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// List all categories with their derived product counts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            r"
            SELECT c.id, c.name, c.slug, COUNT(p.id) AS products_count
            FROM categories c
            LEFT JOIN products p ON c.id = p.category_id
            GROUP BY c.id
            ORDER BY c.id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Category {
                id: CategoryId::new(r.id),
                name: r.name,
                slug: r.slug,
                products_count: r.products_count,
            })
            .collect())
    }

    /// Image URLs for a product, in display order.
    async fn images_for(&self, product_id: i64) -> Result<Vec<String>, RepositoryError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r"
            SELECT image_url FROM product_images
            WHERE product_id = ?1
            ORDER BY sort_order
            ",
        )
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|(url,)| url).collect())
    }

    async fn enrich(&self, rows: Vec<ProductRow>) -> Result<Vec<Product>, RepositoryError> {
        let mut products = Vec::with_capacity(rows.len());
        for row in rows {
            let images = self.images_for(row.id).await?;
            products.push(into_product(row, images));
        }
        Ok(products)
    }
}

fn into_product(row: ProductRow, images: Vec<String>) -> Product {
    Product {
        id: ProductId::new(row.id),
        title: row.title,
        price: DisplayPrice::new(row.price),
        description: row.description,
        characteristics: row.characteristics,
        category_id: row.category_id.map(CategoryId::new),
        category_name: row.category_name,
        images,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    async fn seed_catalog(pool: &SqlitePool) {
        sqlx::raw_sql(
            r"
            INSERT INTO categories (id, name, slug) VALUES (1, 'Sofas', 'sofas'), (2, 'Tables', 'tables');
            INSERT INTO products (id, title, price, description, category_id)
            VALUES (1, 'Oslo Sofa', '45 990 ₽', 'Three-seater fabric sofa', 1),
                   (2, 'Birch Table', '12 990 ₽', 'Solid birch dining table', 2),
                   (3, 'Loft Sofa Bed', '59 990 ₽', 'Corner sofa bed', 1);
            INSERT INTO product_images (product_id, image_url, sort_order)
            VALUES (1, '/img/oslo-2.jpg', 1), (1, '/img/oslo-1.jpg', 0), (2, '/img/birch.jpg', 0);
            ",
        )
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_list_all_with_ordered_images() {
        let pool = memory_pool().await;
        seed_catalog(&pool).await;
        let repo = ProductRepository::new(&pool);

        let products = repo.list_all().await.unwrap();
        assert_eq!(products.len(), 3);

        let oslo = products.iter().find(|p| p.id == ProductId::new(1)).unwrap();
        assert_eq!(oslo.images, vec!["/img/oslo-1.jpg", "/img/oslo-2.jpg"]);
        assert_eq!(oslo.category_name.as_deref(), Some("Sofas"));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let pool = memory_pool().await;
        seed_catalog(&pool).await;
        let repo = ProductRepository::new(&pool);

        let product = repo.find_by_id(ProductId::new(2)).await.unwrap().unwrap();
        assert_eq!(product.title, "Birch Table");
        assert_eq!(product.price.numeric_value(), 12_990);

        assert!(repo.find_by_id(ProductId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let pool = memory_pool().await;
        seed_catalog(&pool).await;
        let repo = ProductRepository::new(&pool);

        let sofas = repo.list_by_category(CategoryId::new(1)).await.unwrap();
        assert_eq!(sofas.len(), 2);

        let empty = repo.list_by_category(CategoryId::new(99)).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_contains() {
        let pool = memory_pool().await;
        seed_catalog(&pool).await;
        let repo = ProductRepository::new(&pool);

        let hits = repo.search("sofa").await.unwrap();
        assert_eq!(hits.len(), 2);

        // Matches description too
        let hits = repo.search("birch").await.unwrap();
        assert_eq!(hits.len(), 1);

        let hits = repo.search("wardrobe").await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_categories_with_counts() {
        let pool = memory_pool().await;
        seed_catalog(&pool).await;
        let repo = ProductRepository::new(&pool);

        let categories = repo.list_categories().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].products_count, 2);
        assert_eq!(categories[1].products_count, 1);
    }

    #[tokio::test]
    async fn test_exists() {
        let pool = memory_pool().await;
        seed_catalog(&pool).await;
        let repo = ProductRepository::new(&pool);

        assert!(repo.exists(ProductId::new(1)).await.unwrap());
        assert!(!repo.exists(ProductId::new(99)).await.unwrap());
    }
}
