//! Catalogue product rules.
//!
//! The platform catalogue holds the base products merchants customise. This
//! module validates a product submission and derives everything the API
//! stores alongside it: the category slug, the tax-inclusive price and the
//! size × colour variants.

mod colors;
mod variants;

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Money;

pub use colors::color_hex;
pub use variants::{ProductVariant, generate_variants, sku_base_from_name, sku_part, variant_sku};

/// Legacy browser storage key the dashboard used before the catalogue API.
pub const LEGACY_LOCAL_STORAGE_KEY: &str = "shelfmerch_all_products";

/// A product keeps at most this many mockup images.
pub const MAX_MOCKUP_IMAGES: usize = 10;

/// Sizes offered by the dashboard out of the box.
pub const STANDARD_SIZES: &[&str] = &["XS", "S", "M", "L", "XL", "2XL", "3XL"];

/// Colours offered by the dashboard out of the box.
pub const STANDARD_COLORS: &[&str] = &["Black", "White", "Navy", "Gray", "Red", "Blue", "Green"];

/// Why a product submission was rejected.
///
/// The `Display` text is shown to the admin verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Please enter a product name")]
    MissingName,
    #[error("Please select a category")]
    MissingCategory,
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Please enter a valid base price")]
    InvalidPrice,
    #[error("Compare-at price cannot be negative")]
    NegativeCompareAtPrice,
    #[error("Prices must be whole cents and at most 9999999999.99")]
    PriceOutOfRange,
    #[error("Please select at least one size")]
    MissingSizes,
    #[error("Please select at least one color")]
    MissingColors,
    #[error("Duplicate {kind} option: {value}")]
    DuplicateOption {
        /// `size` or `color`.
        kind: &'static str,
        value: String,
    },
    #[error("Please upload at least one mockup image")]
    MissingMockups,
}

/// Catalogue category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "T-Shirts")]
    TShirts,
    #[serde(rename = "Hoodies")]
    Hoodies,
    #[serde(rename = "Sweatshirts")]
    Sweatshirts,
    #[serde(rename = "Tank Tops")]
    TankTops,
    #[serde(rename = "Long Sleeve")]
    LongSleeve,
    #[serde(rename = "Accessories")]
    Accessories,
}

impl Category {
    /// All categories in dashboard order.
    pub const ALL: [Self; 6] = [
        Self::TShirts,
        Self::Hoodies,
        Self::Sweatshirts,
        Self::TankTops,
        Self::LongSleeve,
        Self::Accessories,
    ];

    /// Display name, e.g. `Tank Tops`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TShirts => "T-Shirts",
            Self::Hoodies => "Hoodies",
            Self::Sweatshirts => "Sweatshirts",
            Self::TankTops => "Tank Tops",
            Self::LongSleeve => "Long Sleeve",
            Self::Accessories => "Accessories",
        }
    }

    /// URL slug, e.g. `tank-tops`. Stored as the product's `base_product`.
    #[must_use]
    pub fn slug(self) -> String {
        self.name()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    /// Accepts the display name or the slug, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.is_empty() {
            return Err(CatalogError::MissingCategory);
        }
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted) || c.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CatalogError::UnknownCategory(wanted.to_owned()))
    }
}

/// Tax rule applied to a product's retail price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxRule {
    #[serde(rename = "gst-5")]
    Gst5,
    #[serde(rename = "gst-12")]
    Gst12,
    #[serde(rename = "gst-18")]
    Gst18,
    #[default]
    #[serde(rename = "no-tax")]
    NoTax,
}

impl TaxRule {
    /// All rules in dashboard order.
    pub const ALL: [Self; 4] = [Self::Gst12, Self::Gst18, Self::Gst5, Self::NoTax];

    /// Stable identifier, e.g. `gst-12`.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Gst5 => "gst-5",
            Self::Gst12 => "gst-12",
            Self::Gst18 => "gst-18",
            Self::NoTax => "no-tax",
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gst5 => "5% GST Rate Slab (5%)",
            Self::Gst12 => "12% GST Rate Slab (12%)",
            Self::Gst18 => "18% GST Rate Slab (18%)",
            Self::NoTax => "No Tax (0%)",
        }
    }

    /// Rate in percent.
    #[must_use]
    pub const fn rate_percent(self) -> u32 {
        match self {
            Self::Gst5 => 5,
            Self::Gst12 => 12,
            Self::Gst18 => 18,
            Self::NoTax => 0,
        }
    }

    /// `price × (1 + rate / 100)`, rounded to cents. `None` on overflow.
    #[must_use]
    pub fn price_including_tax(self, price: Money) -> Option<Money> {
        let factor = Decimal::ONE + Decimal::new(i64::from(self.rate_percent()), 2);
        price.checked_times_rate(factor).map(Money::round_to_cents)
    }
}

impl FromStr for TaxRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.id() == s)
            .ok_or_else(|| format!("invalid tax rule: {s}"))
    }
}

/// Front/back print-area templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignAreas {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back: Option<String>,
}

/// A catalogue product as submitted by an admin (API body or seed file).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Display name or slug of a [`Category`].
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub base_price: Option<Money>,
    #[serde(default)]
    pub compare_at_price: Option<Money>,
    #[serde(default)]
    pub tax_rule: Option<TaxRule>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub mockup_urls: Vec<String>,
    #[serde(default)]
    pub designs: DesignAreas,
    /// SKU base; derived from the name when absent.
    #[serde(default)]
    pub sku_prefix: Option<String>,
}

/// A validated product, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub brand: Option<String>,
    pub description: String,
    pub category: Category,
    pub base_product: String,
    pub price: Money,
    pub compare_at_price: Option<Money>,
    pub tax_rule: TaxRule,
    pub price_tax_incl: Money,
    pub mockup_urls: Vec<String>,
    pub designs: DesignAreas,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub variants: Vec<ProductVariant>,
}

impl ProductDraft {
    /// Primary mockup image.
    #[must_use]
    pub fn mockup_url(&self) -> Option<&str> {
        self.mockup_urls.first().map(String::as_str)
    }
}

impl NewProduct {
    /// Validate the submission and derive stored fields.
    ///
    /// Checks run in dashboard order (name, category, price, sizes,
    /// colours, mockups); the first failure is returned. Mockups beyond
    /// [`MAX_MOCKUP_IMAGES`] are dropped.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] encountered.
    pub fn validate(self) -> Result<ProductDraft, CatalogError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(CatalogError::MissingName);
        }

        let category: Category = self
            .category
            .as_deref()
            .ok_or(CatalogError::MissingCategory)?
            .parse()?;

        let price = self
            .base_price
            .filter(|p| *p > Money::ZERO)
            .ok_or(CatalogError::InvalidPrice)?;

        if self.compare_at_price.is_some_and(|p| p.is_negative()) {
            return Err(CatalogError::NegativeCompareAtPrice);
        }

        let storable = |p: &Money| p.is_whole_cents() && p.fits_storage();
        if !storable(&price) || self.compare_at_price.is_some_and(|p| !storable(&p)) {
            return Err(CatalogError::PriceOutOfRange);
        }

        let sizes = clean_options(self.sizes, "size")?;
        if sizes.is_empty() {
            return Err(CatalogError::MissingSizes);
        }

        let colors = clean_options(self.colors, "color")?;
        if colors.is_empty() {
            return Err(CatalogError::MissingColors);
        }

        let mockup_urls: Vec<String> = self
            .mockup_urls
            .into_iter()
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty())
            .take(MAX_MOCKUP_IMAGES)
            .collect();
        if mockup_urls.is_empty() {
            return Err(CatalogError::MissingMockups);
        }

        let sku_base = self
            .sku_prefix
            .as_deref()
            .map(str::trim)
            .filter(|prefix| !prefix.is_empty())
            .map_or_else(|| sku_base_from_name(&name), str::to_owned);
        let variants = generate_variants(&sku_base, &sizes, &colors);

        let tax_rule = self.tax_rule.unwrap_or_default();
        let price_tax_incl = tax_rule
            .price_including_tax(price)
            .filter(Money::fits_storage)
            .ok_or(CatalogError::PriceOutOfRange)?;

        Ok(ProductDraft {
            name,
            brand: non_blank(self.brand),
            description: self.description.trim().to_owned(),
            base_product: category.slug(),
            category,
            price,
            compare_at_price: self.compare_at_price,
            tax_rule,
            price_tax_incl,
            mockup_urls,
            designs: DesignAreas {
                front: non_blank(self.designs.front),
                back: non_blank(self.designs.back),
            },
            sizes,
            colors,
            variants,
        })
    }
}

/// Trim option values, drop blanks and reject duplicates.
fn clean_options(values: Vec<String>, kind: &'static str) -> Result<Vec<String>, CatalogError> {
    let mut cleaned: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if cleaned.iter().any(|existing| existing == value) {
            return Err(CatalogError::DuplicateOption {
                kind,
                value: value.to_owned(),
            });
        }
        cleaned.push(value.to_owned());
    }
    Ok(cleaned)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn money(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    fn valid_product() -> NewProduct {
        NewProduct {
            name: "  Premium Cotton Tee ".to_owned(),
            brand: Some("ShelfMerch".to_owned()),
            description: " Soft ringspun cotton. ".to_owned(),
            category: Some("T-Shirts".to_owned()),
            base_price: Some(money(1999)),
            compare_at_price: Some(money(2499)),
            tax_rule: None,
            sizes: vec!["M".to_owned(), "L".to_owned()],
            colors: vec!["Black".to_owned()],
            mockup_urls: vec!["https://cdn.test/front.png".to_owned()],
            designs: DesignAreas::default(),
            sku_prefix: None,
        }
    }

    #[test]
    fn test_category_slug() {
        assert_eq!(Category::TShirts.slug(), "t-shirts");
        assert_eq!(Category::TankTops.slug(), "tank-tops");
        assert_eq!(Category::LongSleeve.slug(), "long-sleeve");
    }

    #[test]
    fn test_category_parse_name_or_slug() {
        assert_eq!("Tank Tops".parse::<Category>().unwrap(), Category::TankTops);
        assert_eq!("long-sleeve".parse::<Category>().unwrap(), Category::LongSleeve);
        assert_eq!("HOODIES".parse::<Category>().unwrap(), Category::Hoodies);
        assert_eq!(
            "Socks".parse::<Category>(),
            Err(CatalogError::UnknownCategory("Socks".to_owned()))
        );
        assert_eq!(" ".parse::<Category>(), Err(CatalogError::MissingCategory));
    }

    #[test]
    fn test_tax_rule_price_including_tax() {
        assert_eq!(TaxRule::Gst12.price_including_tax(money(1000)), Some(money(1120)));
        assert_eq!(TaxRule::Gst18.price_including_tax(money(1999)), Some(money(2359)));
        assert_eq!(TaxRule::NoTax.price_including_tax(money(1999)), Some(money(1999)));
        assert_eq!(TaxRule::Gst18.price_including_tax(Money::new(Decimal::MAX)), None);
    }

    #[test]
    fn test_tax_rule_serde_ids() {
        assert_eq!(serde_json::to_string(&TaxRule::Gst5).unwrap(), "\"gst-5\"");
        assert_eq!("gst-18".parse::<TaxRule>().unwrap(), TaxRule::Gst18);
        assert!("vat".parse::<TaxRule>().is_err());
    }

    #[test]
    fn test_validate_derives_fields() {
        let draft = valid_product().validate().unwrap();

        assert_eq!(draft.name, "Premium Cotton Tee");
        assert_eq!(draft.description, "Soft ringspun cotton.");
        assert_eq!(draft.base_product, "t-shirts");
        assert_eq!(draft.tax_rule, TaxRule::NoTax);
        assert_eq!(draft.price_tax_incl, money(1999));
        assert_eq!(draft.mockup_url(), Some("https://cdn.test/front.png"));

        let skus: Vec<_> = draft.variants.iter().map(|v| v.sku.as_str()).collect();
        assert_eq!(
            skus,
            ["PREMIUM-COTTON-TEE-M-BLACK", "PREMIUM-COTTON-TEE-L-BLACK"]
        );
    }

    #[test]
    fn test_validate_uses_sku_prefix() {
        let draft = NewProduct {
            sku_prefix: Some("pct".to_owned()),
            ..valid_product()
        }
        .validate()
        .unwrap();
        assert!(draft.variants.iter().all(|v| v.sku.starts_with("PCT-")));
    }

    #[test]
    fn test_validate_error_order() {
        let empty = NewProduct::default();
        assert_eq!(empty.validate(), Err(CatalogError::MissingName));

        let no_category = NewProduct {
            category: None,
            ..valid_product()
        };
        assert_eq!(no_category.validate(), Err(CatalogError::MissingCategory));

        let free = NewProduct {
            base_price: Some(Money::ZERO),
            sizes: Vec::new(),
            ..valid_product()
        };
        assert_eq!(free.validate(), Err(CatalogError::InvalidPrice));

        let no_sizes = NewProduct {
            sizes: vec!["  ".to_owned()],
            colors: Vec::new(),
            ..valid_product()
        };
        assert_eq!(no_sizes.validate(), Err(CatalogError::MissingSizes));

        let no_colors = NewProduct {
            colors: Vec::new(),
            mockup_urls: Vec::new(),
            ..valid_product()
        };
        assert_eq!(no_colors.validate(), Err(CatalogError::MissingColors));

        let no_mockups = NewProduct {
            mockup_urls: Vec::new(),
            ..valid_product()
        };
        assert_eq!(no_mockups.validate(), Err(CatalogError::MissingMockups));
    }

    #[test]
    fn test_validate_rejects_duplicate_sizes() {
        let product = NewProduct {
            sizes: vec!["M".to_owned(), " M ".to_owned()],
            ..valid_product()
        };
        assert_eq!(
            product.validate(),
            Err(CatalogError::DuplicateOption {
                kind: "size",
                value: "M".to_owned()
            })
        );
    }

    #[test]
    fn test_validate_rejects_negative_compare_at() {
        let product = NewProduct {
            compare_at_price: Some(money(-1)),
            ..valid_product()
        };
        assert_eq!(
            product.validate(),
            Err(CatalogError::NegativeCompareAtPrice)
        );
    }

    #[test]
    fn test_validate_rejects_unstorable_prices() {
        for price in [
            Money::new(Decimal::MAX),
            Money::from_cents(1_000_000_000_000),
            Money::new(Decimal::new(19_999, 3)),
        ] {
            let product = NewProduct {
                base_price: Some(price),
                compare_at_price: None,
                ..valid_product()
            };
            assert_eq!(product.validate(), Err(CatalogError::PriceOutOfRange));
        }

        let product = NewProduct {
            compare_at_price: Some(Money::new(Decimal::MAX)),
            ..valid_product()
        };
        assert_eq!(product.validate(), Err(CatalogError::PriceOutOfRange));
    }

    #[test]
    fn test_validate_rejects_tax_inclusive_overflow_of_column() {
        let product = NewProduct {
            base_price: Some(Money::from_cents(Money::MAX_STORED_CENTS)),
            compare_at_price: None,
            tax_rule: Some(TaxRule::Gst18),
            ..valid_product()
        };
        assert_eq!(product.validate(), Err(CatalogError::PriceOutOfRange));

        let untaxed = NewProduct {
            base_price: Some(Money::from_cents(Money::MAX_STORED_CENTS)),
            compare_at_price: None,
            ..valid_product()
        };
        assert!(untaxed.validate().is_ok());
    }

    #[test]
    fn test_validate_caps_mockups() {
        let product = NewProduct {
            mockup_urls: (0..12).map(|i| format!("https://cdn.test/{i}.png")).collect(),
            ..valid_product()
        };
        let draft = product.validate().unwrap();
        assert_eq!(draft.mockup_urls.len(), MAX_MOCKUP_IMAGES);
        assert_eq!(draft.mockup_urls.last().unwrap(), "https://cdn.test/9.png");
    }

    #[test]
    fn test_validate_blank_designs_are_dropped() {
        let product = NewProduct {
            designs: DesignAreas {
                front: Some("https://cdn.test/front-area.png".to_owned()),
                back: Some("   ".to_owned()),
            },
            ..valid_product()
        };
        let draft = product.validate().unwrap();
        assert!(draft.designs.front.is_some());
        assert!(draft.designs.back.is_none());
    }

    #[test]
    fn test_new_product_from_camel_case_json() {
        let product: NewProduct = serde_json::from_value(serde_json::json!({
            "name": "Zip Hoodie",
            "category": "hoodies",
            "basePrice": 39.5,
            "taxRule": "gst-12",
            "sizes": ["S"],
            "colors": ["Navy"],
            "mockupUrls": ["https://cdn.test/hoodie.png"]
        }))
        .unwrap();

        let draft = product.validate().unwrap();
        assert_eq!(draft.category, Category::Hoodies);
        assert_eq!(draft.price_tax_incl, money(4424));
        assert_eq!(draft.variants[0].color_hex.as_deref(), Some("#000080"));
    }
}
