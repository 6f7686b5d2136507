//! Storefront checkout payloads and order totals.
//!
//! A storefront posts the customer's cart together with the shipping form.
//! This module validates that payload, snapshots the cart into order items
//! and computes the order totals. Persisting the order is the API crate's job.
//!
//! # Totals
//!
//! ```text
//! subtotal = Σ price × quantity        (missing price counts as 0)
//! shipping = flat fee if the cart is non-empty, else 0
//! tax      = subtotal × tax rate, rounded to cents (half away from zero)
//! total    = subtotal + shipping + tax
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{Email, EmailError, Money};

/// Why a checkout payload was rejected.
///
/// The `Display` text is returned to the storefront verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    /// `cart` was missing, `null` or an empty list.
    #[error("Cart is empty")]
    EmptyCart,
    /// `shippingInfo` was missing or had a blank `email`/`fullName`.
    #[error("Missing shipping information")]
    MissingShippingInfo,
    /// `shippingInfo.email` is not an email address.
    #[error("Invalid email address")]
    InvalidEmail(#[source] EmailError),
    /// A cart line has a zero quantity, or a price that is negative or
    /// finer than a cent.
    #[error("Invalid cart item at position {position}")]
    InvalidItem {
        /// 1-based position of the offending line.
        position: usize,
    },
    /// An order amount exceeds what an order can store.
    #[error("Order total is too large")]
    TotalTooLarge,
}

/// Body of `POST /api/store-checkout/{subdomain}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Cart lines. `null` and absent are treated like an empty cart.
    #[serde(default)]
    pub cart: Option<Vec<CartItem>>,
    /// The storefront's shipping form.
    #[serde(default)]
    pub shipping_info: Option<ShippingInfo>,
}

/// One line of a storefront cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// The product as the storefront displayed it.
    #[serde(default)]
    pub product: Option<CartProduct>,
    /// Number of units.
    #[serde(default)]
    pub quantity: u32,
    /// Selected size/colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<CartVariant>,
}

/// Product snapshot carried in a cart line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    /// Store product reference; storefronts send either `id` or `_id`.
    #[serde(default, alias = "_id")]
    pub id: Option<ProductRef>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Unit price.
    #[serde(default)]
    pub price: Option<Money>,
    /// Single mockup image.
    #[serde(default)]
    pub mockup_url: Option<String>,
    /// All mockup images, primary first.
    #[serde(default)]
    pub mockup_urls: Option<Vec<String>>,
}

/// Reference to a store product as sent by the client (numeric or opaque).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductRef {
    /// Numeric identifier.
    Number(i64),
    /// Opaque identifier such as `product-1712345678`.
    Key(String),
}

/// Variant selection of a cart line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartVariant {
    /// Selected size, e.g. `M`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Selected colour, e.g. `Black`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Anything else the storefront attached.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Shipping form submitted at checkout.
///
/// Stored verbatim as the order's shipping address, including any fields
/// not modelled here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Customer ticked the newsletter box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_opt_in: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A checkout payload that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCheckout {
    /// Non-empty cart.
    pub items: Vec<CartItem>,
    /// Parsed `shippingInfo.email`.
    pub email: Email,
    /// Trimmed `shippingInfo.fullName`.
    pub full_name: String,
    /// The complete shipping form.
    pub shipping: ShippingInfo,
}

impl ValidatedCheckout {
    /// Whether the customer asked to receive marketing.
    #[must_use]
    pub fn marketing_opt_in(&self) -> bool {
        self.shipping.marketing_opt_in.unwrap_or(false)
    }

    /// Order line snapshots, in cart order.
    #[must_use]
    pub fn order_items(&self) -> Vec<OrderItem> {
        self.items.iter().map(OrderItem::from).collect()
    }
}

impl CheckoutRequest {
    /// Validate the payload.
    ///
    /// Checks run in this order and the first failure is returned:
    /// empty cart, missing shipping fields, malformed email, bad cart lines.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] describing the first problem found.
    pub fn validate(self) -> Result<ValidatedCheckout, CheckoutError> {
        let items = match self.cart {
            Some(items) if !items.is_empty() => items,
            _ => return Err(CheckoutError::EmptyCart),
        };

        let shipping = self
            .shipping_info
            .filter(|info| !info.email.trim().is_empty() && !info.full_name.trim().is_empty())
            .ok_or(CheckoutError::MissingShippingInfo)?;

        let email = Email::parse(&shipping.email).map_err(CheckoutError::InvalidEmail)?;

        if let Some(index) = items.iter().position(|item| !item.is_valid()) {
            return Err(CheckoutError::InvalidItem {
                position: index + 1,
            });
        }

        Ok(ValidatedCheckout {
            items,
            email,
            full_name: shipping.full_name.trim().to_owned(),
            shipping,
        })
    }
}

impl CartItem {
    /// Unit price, with a missing price counting as zero.
    #[must_use]
    pub fn unit_price(&self) -> Money {
        self.product
            .as_ref()
            .and_then(|p| p.price)
            .unwrap_or(Money::ZERO)
    }

    /// `unit_price × quantity`, or `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price().checked_mul(self.quantity)
    }

    fn is_valid(&self) -> bool {
        let price = self.unit_price();
        self.quantity > 0 && !price.is_negative() && price.is_whole_cents()
    }
}

/// Snapshot of a cart line stored on the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_product_id: Option<ProductRef>,
    #[serde(default)]
    pub product_name: Option<String>,
    /// Primary mockup: first of `mockup_urls`, else the single mockup.
    #[serde(default)]
    pub mockup_url: Option<String>,
    #[serde(default)]
    pub mockup_urls: Vec<String>,
    pub quantity: u32,
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<CartVariant>,
}

impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        let product = item.product.clone().unwrap_or_default();
        let mockup_urls = product.mockup_urls.unwrap_or_default();
        let mockup_url = mockup_urls.first().cloned().or(product.mockup_url);

        Self {
            store_product_id: product.id,
            product_name: product.name,
            mockup_url,
            mockup_urls,
            quantity: item.quantity,
            price: product.price,
            variant: item.variant.clone(),
        }
    }
}

/// Computed money fields of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

/// Shipping and tax parameters for checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutPricing {
    /// Charged once per non-empty order.
    pub flat_shipping: Money,
    /// Fraction of the subtotal, e.g. `0.08`.
    pub tax_rate: Decimal,
}

impl CheckoutPricing {
    /// Flat shipping fee used when none is configured.
    pub const DEFAULT_FLAT_SHIPPING_CENTS: i64 = 599;
    /// Tax rate used when none is configured, in hundredths (8%).
    pub const DEFAULT_TAX_RATE_HUNDREDTHS: i64 = 8;

    /// Compute totals for a cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::TotalTooLarge`] when an amount overflows or
    /// the total does not fit an order's `NUMERIC(12, 2)` columns.
    pub fn totals(&self, items: &[CartItem]) -> Result<OrderTotals, CheckoutError> {
        let subtotal = items
            .iter()
            .try_fold(Money::ZERO, |acc, item| acc.checked_add(item.line_total()?))
            .ok_or(CheckoutError::TotalTooLarge)?;
        let shipping = if items.is_empty() {
            Money::ZERO
        } else {
            self.flat_shipping
        };
        let tax = subtotal
            .checked_times_rate(self.tax_rate)
            .ok_or(CheckoutError::TotalTooLarge)?
            .round_to_cents();
        let total = subtotal
            .checked_add(shipping)
            .and_then(|sum| sum.checked_add(tax))
            .filter(Money::fits_storage)
            .ok_or(CheckoutError::TotalTooLarge)?;

        Ok(OrderTotals {
            subtotal,
            shipping,
            tax,
            total,
        })
    }
}

impl Default for CheckoutPricing {
    fn default() -> Self {
        Self {
            flat_shipping: Money::from_cents(Self::DEFAULT_FLAT_SHIPPING_CENTS),
            tax_rate: Decimal::new(Self::DEFAULT_TAX_RATE_HUNDREDTHS, 2),
        }
    }
}
