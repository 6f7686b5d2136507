//! Store order domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shelfmerch_core::checkout::{OrderItem, ShippingInfo};
use shelfmerch_core::{Email, MerchantId, Money, StoreCustomerId, StoreId, StoreOrderId};

/// An order placed through storefront checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreOrder {
    pub id: StoreOrderId,
    pub merchant_id: MerchantId,
    pub store_id: StoreId,
    pub customer_id: StoreCustomerId,
    pub customer_email: Email,
    pub items: Vec<OrderItem>,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
    pub shipping_address: ShippingInfo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
