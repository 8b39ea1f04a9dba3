//! In-memory cache of the server's product list.
//!
//! The catalog is rebuilt wholesale after every mutating call
//! (refresh-on-write). The only in-place edit is [`Catalog::replace_product`],
//! used when the server echoes back the full updated document.

use crate::products::Product;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

/// Counters shown above the product table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub total: usize,
    pub active: usize,
    pub featured: usize,
}

impl Catalog {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Discards the cached list and takes `products` as the new truth.
    pub fn replace_all(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    /// Swaps in a server-returned copy of one product. Returns `false` when
    /// no cached product has that id.
    pub fn replace_product(&mut self, product: Product) -> bool {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => {
                *slot = product;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn all(&self) -> Vec<&Product> {
        self.products.iter().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Case-insensitive substring match over name, slug, and flavours.
    /// A blank query matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.all();
        }

        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.slug.to_lowercase().contains(&needle)
                    || p.flavours
                        .iter()
                        .any(|f| f.to_lowercase().contains(&needle))
            })
            .collect()
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total: self.products.len(),
            active: self.products.iter().filter(|p| p.is_active).count(),
            featured: self.products.iter().filter(|p| p.is_featured).count(),
        }
    }
}
