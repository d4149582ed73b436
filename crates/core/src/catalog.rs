//! Catalog list transforms.
//!
//! Products are fetched from the hosted catalog backend as flat rows; the
//! storefront narrows them by category/type/shape and orders them for display.
//! Nothing here does I/O.
//!
//! No storefront route serves catalog listings yet; these are the building
//! blocks for the collection and product pages.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartLineInput;
use crate::types::{Price, ProductId};

/// A catalog row as the storefront sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image_ref: String,
    /// Weight in carats.
    pub carat_weight: Decimal,
    pub category: String,
    pub gem_type: String,
    pub shape: String,
    pub created_at: DateTime<Utc>,
}

impl CatalogProduct {
    /// URL slug derived from the product name.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// Build the cart input for an "Add to Cart" action.
    #[must_use]
    pub fn to_cart_input(&self) -> CartLineInput {
        CartLineInput {
            id: self.id.clone(),
            name: self.name.clone(),
            unit_price: self.price,
            image_ref: self.image_ref.clone(),
            weight_label: format!("{} Carats", self.carat_weight.normalize()),
            variant_label: self.shape.clone(),
        }
    }
}

/// Turn a display name into a URL slug.
///
/// Letters and digits (any script) are lower-cased and kept; every other
/// run of characters becomes a single hyphen. Leading and trailing hyphens
/// are dropped.
///
/// ```
/// use gemvault_core::catalog::slugify;
///
/// assert_eq!(slugify("Royal Blue Sapphire (2.1 ct)"), "royal-blue-sapphire-2-1-ct");
/// assert_eq!(slugify("  --Émerald--  "), "émerald");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Category/type/shape filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub category: Option<String>,
    pub gem_type: Option<String>,
    pub shape: Option<String>,
}

impl CatalogFilter {
    /// Whether `product` passes every set field (case-insensitive).
    #[must_use]
    pub fn matches(&self, product: &CatalogProduct) -> bool {
        field_matches(self.category.as_deref(), &product.category)
            && field_matches(self.gem_type.as_deref(), &product.gem_type)
            && field_matches(self.shape.as_deref(), &product.shape)
    }

    /// Products passing the filter, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [CatalogProduct]) -> Vec<&'a CatalogProduct> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

fn field_matches(wanted: Option<&str>, actual: &str) -> bool {
    wanted.is_none_or(|w| w.trim().is_empty() || w.trim().eq_ignore_ascii_case(actual))
}

/// Display order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    NameAsc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "name_asc" => Ok(Self::NameAsc),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}

/// Sort `products` in place. The sort is stable, so ties keep their
/// incoming order.
pub fn sort_products(products: &mut [CatalogProduct], order: SortOrder) {
    products.sort_by(|a, b| compare(a, b, order));
}

fn compare(a: &CatalogProduct, b: &CatalogProduct, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Newest => b.created_at.cmp(&a.created_at),
        SortOrder::PriceAsc => a.price.cmp(&b.price),
        SortOrder::PriceDesc => b.price.cmp(&a.price),
        SortOrder::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn product(id: &str, name: &str, price: i64, shape: &str, day: u32) -> CatalogProduct {
        CatalogProduct {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Price::new(Decimal::new(price, 0)).unwrap(),
            image_ref: format!("{id}.jpg"),
            carat_weight: Decimal::new(214, 2),
            category: "Loose Stones".to_string(),
            gem_type: "Sapphire".to_string(),
            shape: shape.to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap(),
        }
    }

    fn ids(products: &[CatalogProduct]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Padparadscha Sapphire"), "padparadscha-sapphire");
        assert_eq!(slugify("2.14 ct -- Oval!"), "2-14-ct-oval");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("Émerald Côte d'Ivoire"), "émerald-côte-d-ivoire");
        assert_eq!(slugify("ÉMERALD"), "émerald");
    }

    #[test]
    fn test_filter_unset_matches_all() {
        let products = vec![product("1", "A", 1, "Oval", 1), product("2", "B", 1, "Round", 2)];
        assert_eq!(CatalogFilter::default().apply(&products).len(), 2);
    }

    #[test]
    fn test_filter_is_case_insensitive_and_combines() {
        let mut emerald = product("3", "C", 1, "Oval", 3);
        emerald.gem_type = "Emerald".to_string();
        let products = vec![
            product("1", "A", 1, "Oval", 1),
            product("2", "B", 1, "Round", 2),
            emerald,
        ];

        let filter = CatalogFilter {
            shape: Some("oval".to_string()),
            gem_type: Some("SAPPHIRE".to_string()),
            ..CatalogFilter::default()
        };
        let hits: Vec<&str> = filter.apply(&products).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(hits, ["1"]);
    }

    #[test]
    fn test_blank_filter_value_is_wildcard() {
        let products = vec![product("1", "A", 1, "Oval", 1)];
        let filter = CatalogFilter {
            category: Some("  ".to_string()),
            ..CatalogFilter::default()
        };
        assert_eq!(filter.apply(&products).len(), 1);
    }

    #[test]
    fn test_sort_orders() {
        let mut products = vec![
            product("1", "ruby", 300, "Oval", 1),
            product("2", "Amethyst", 100, "Oval", 3),
            product("3", "opal", 200, "Oval", 2),
        ];

        sort_products(&mut products, SortOrder::PriceAsc);
        assert_eq!(ids(&products), ["2", "3", "1"]);

        sort_products(&mut products, SortOrder::PriceDesc);
        assert_eq!(ids(&products), ["1", "3", "2"]);

        sort_products(&mut products, SortOrder::NameAsc);
        assert_eq!(ids(&products), ["2", "3", "1"]);

        sort_products(&mut products, SortOrder::Newest);
        assert_eq!(ids(&products), ["2", "3", "1"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut products = vec![
            product("a", "X", 100, "Oval", 1),
            product("b", "Y", 100, "Oval", 2),
            product("c", "Z", 100, "Oval", 3),
        ];
        sort_products(&mut products, SortOrder::PriceAsc);
        assert_eq!(ids(&products), ["a", "b", "c"]);
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!("price_desc".parse::<SortOrder>().unwrap(), SortOrder::PriceDesc);
        assert!("cheapest".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_to_cart_input() {
        let p = product("7", "Blue Sapphire", 12_500, "Cushion", 1);
        let input = p.to_cart_input();
        assert_eq!(input.id.as_str(), "7");
        assert_eq!(input.weight_label, "2.14 Carats");
        assert_eq!(input.variant_label, "Cushion");
        assert_eq!(p.slug(), "blue-sapphire");
    }
}
