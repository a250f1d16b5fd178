use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use strum::Display;
use utoipa::{
    PartialSchema, ToSchema,
    openapi::{RefOr, Schema},
};
use validator::Validate;

use crate::error::{StorefrontError, StorefrontResult};

/// A record type persisted in its own collection.
///
/// The collection name is the lower-case model name.
pub trait Collection: Serialize {
    const NAME: &'static str;
}

fn default_true() -> bool {
    true
}

fn default_quantity() -> i64 {
    1
}

fn default_material() -> String {
    "Micro-weave cloth".to_string()
}

fn default_base() -> String {
    "Non-slip rubber".to_string()
}

fn default_thickness_mm() -> f64 {
    4.0
}

fn default_width_cm() -> f64 {
    90.0
}

fn default_height_cm() -> f64 {
    40.0
}

/// Premium desk mousepad (90x40 cm unless stated otherwise)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Mousepad {
    /// Design name
    pub design: String,
    /// Price in USD
    #[validate(range(min = 0.0))]
    pub price: f64,
    /// Short marketing description
    pub description: String,
    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,
    /// Availability
    #[serde(default = "default_true")]
    pub in_stock: bool,
    /// Units available
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock_qty: i64,
    /// Surface material
    #[serde(default = "default_material")]
    pub material: String,
    /// Base material
    #[serde(default = "default_base")]
    pub base: String,
    #[serde(default = "default_thickness_mm")]
    pub thickness_mm: f64,
    #[serde(default = "default_width_cm")]
    pub width_cm: f64,
    #[serde(default = "default_height_cm")]
    pub height_cm: f64,
}

impl Mousepad {
    /// A mousepad with every optional field at its default.
    pub fn new(design: impl Into<String>, price: f64, description: impl Into<String>) -> Self {
        Self {
            design: design.into(),
            price,
            description: description.into(),
            images: Vec::new(),
            in_stock: true,
            stock_qty: 0,
            material: default_material(),
            base: default_base(),
            thickness_mm: default_thickness_mm(),
            width_cm: default_width_cm(),
            height_cm: default_height_cm(),
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    pub fn with_stock_qty(mut self, stock_qty: i64) -> Self {
        self.stock_qty = stock_qty;
        self
    }
}

impl Collection for Mousepad {
    const NAME: &'static str = "mousepad";
}

/// One order line. `mousepad_id` is not checked against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItem {
    /// Referenced mousepad `_id` as a string
    pub mousepad_id: String,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, message = "Quantity must be >= 1"))]
    pub quantity: i64,
    #[validate(range(min = 0.0))]
    pub unit_price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Order {
    pub customer_name: String,
    #[validate(email)]
    pub customer_email: String,
    pub shipping_address: String,
    #[validate(length(min = 1, message = "Order must contain at least one item"), nested)]
    pub items: Vec<OrderItem>,
    /// Declared order total; must match the sum of the lines within 0.01
    #[validate(range(min = 0.0))]
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Order {
    /// Sum of `quantity * unit_price` over every line.
    pub fn computed_total(&self) -> f64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}

impl Collection for Order {
    const NAME: &'static str = "order";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct User {
    /// Full name
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub address: String,
    /// Age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, max = 120))]
    pub age: Option<i32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Collection for User {
    const NAME: &'static str = "user";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Product {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in USD
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub category: String,
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

impl Collection for Product {
    const NAME: &'static str = "product";
}

/// Serialize a record into the field map handed to a [`DocumentStore`](crate::DocumentStore).
pub fn to_fields<T: Collection>(record: &T) -> StorefrontResult<Map<String, Value>> {
    match serde_json::to_value(record)? {
        Value::Object(fields) => Ok(fields),
        other => Err(StorefrontError::Internal(format!(
            "{} record did not serialize to an object: {}",
            T::NAME,
            other
        ))),
    }
}

/// A document as read back from a store.
///
/// The store identifier is always carried as a string and rendered as `_id`
/// alongside the remaining fields:
///
/// ```json
/// { "_id": "665f1c2e9b1e8a3d4c5b6a79", "design": "Nebula Drift", "price": 39.99 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl StoredDocument {
    pub fn new(id: impl Into<String>, mut fields: Map<String, Value>) -> Self {
        fields.remove("_id");
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Decode the fields back into a typed record, ignoring store metadata.
    pub fn decode<T: DeserializeOwned>(&self) -> StorefrontResult<T> {
        Ok(serde_json::from_value(Value::Object(self.fields.clone()))?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusMessage {
    #[schema(example = "Mousepad Store Backend Running")]
    pub message: String,
}

/// Identifier of a newly inserted document
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    #[schema(example = "665f1c2e9b1e8a3d4c5b6a79")]
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MousepadList {
    /// Every stored mousepad, `_id` rendered as a string
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<StoredDocument>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SeedStatus {
    Seeded,
    AlreadySeeded,
}

/// Outcome of seeding the catalog.
///
/// `count` is only present when samples were inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeedResponse {
    pub status: SeedStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl SeedResponse {
    pub fn seeded(count: usize) -> Self {
        Self {
            status: SeedStatus::Seeded,
            count: Some(count),
        }
    }

    pub fn already_seeded() -> Self {
        Self {
            status: SeedStatus::AlreadySeeded,
            count: None,
        }
    }
}

/// Connectivity report served by the diagnostics endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiagnosticsReport {
    #[schema(example = "✅ Running")]
    pub backend: String,
    #[schema(example = "✅ Connected")]
    pub database: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collections: Option<Vec<String>>,
}

/// JSON schema of every declared record type, keyed by collection name.
pub fn collection_schemas() -> BTreeMap<&'static str, RefOr<Schema>> {
    BTreeMap::from([
        (Mousepad::NAME, Mousepad::schema()),
        (Order::NAME, Order::schema()),
        ("order_item", OrderItem::schema()),
        (User::NAME, User::schema()),
        (Product::NAME, Product::schema()),
    ])
}
