use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::serde::arbitrary_precision_option;
use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use catalog_core::{DomainError, DomainResult, Entity, ProductId, Violations};

pub const NAME_REQUIRED: &str = "Name is required";
pub const PRICE_REQUIRED: &str = "Price is required";
pub const PRICE_POSITIVE: &str = "Price must be greater than 0";
pub const STOCK_NON_NEGATIVE: &str = "Stock cannot be negative";

/// Persisted product row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Assigned by the store on first save, never changed afterwards.
    pub id: Option<ProductId>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
}

impl Product {
    pub const ENTITY: &'static str = "Product";

    /// A product that has not been saved yet.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        price: Decimal,
        stock: i32,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
            price,
            stock,
        }
    }

    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Option<&Self::Id> {
        self.id.as_ref()
    }
}

/// Product as exposed in request and response bodies.
///
/// `price` is written digit for digit as a JSON number, never through `f64`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProductView {
    /// Ignored on create, never changed on update.
    #[serde(default)]
    #[schema(value_type = Option<i64>, read_only, example = 1)]
    pub id: Option<ProductId>,

    #[serde(default)]
    #[schema(example = "Wooden chair")]
    pub name: String,

    #[serde(default)]
    #[schema(example = "A comfortable chair")]
    pub description: Option<String>,

    #[serde(default, serialize_with = "arbitrary_precision_option::serialize")]
    #[schema(value_type = Option<f64>, example = 9999)]
    pub price: Option<Decimal>,

    #[serde(default)]
    #[schema(minimum = 0, example = 10)]
    pub stock: i32,
}

/// Decoded shape of a request body.
///
/// Decoding is lenient: missing or `null` fields decode to their empty value
/// so that `validate` can report every violated field at once.
#[derive(Deserialize)]
struct ProductFields {
    #[serde(default)]
    id: Option<ProductId>,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, deserialize_with = "arbitrary_precision_option::deserialize")]
    price: Option<Decimal>,
    #[serde(default, deserialize_with = "null_as_default")]
    stock: i32,
}

impl From<ProductFields> for ProductView {
    fn from(fields: ProductFields) -> Self {
        Self {
            id: fields.id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            stock: fields.stock,
        }
    }
}

/// Only JSON objects decode; the derived impl would also fill fields from an array by position.
impl<'de> Deserialize<'de> for ProductView {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ObjectVisitor;

        impl<'de> Visitor<'de> for ObjectVisitor {
            type Value = ProductView;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a product object")
            }

            fn visit_map<A>(self, map: A) -> Result<ProductView, A::Error>
            where
                A: MapAccess<'de>,
            {
                ProductFields::deserialize(MapAccessDeserializer::new(map)).map(ProductView::from)
            }
        }

        deserializer.deserialize_map(ObjectVisitor)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A view that passed every rule in [`RULES`]. Only [`validate`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProduct {
    pub(crate) id: Option<ProductId>,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) price: Decimal,
    pub(crate) stock: i32,
}

impl ValidProduct {
    pub fn id(&self) -> Option<ProductId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn stock(&self) -> i32 {
        self.stock
    }
}

struct Rule {
    field: &'static str,
    holds: fn(&ProductView) -> bool,
    message: &'static str,
}

/// Field rules in evaluation order. Per field, the first failing rule is reported.
static RULES: [Rule; 4] = [
    Rule {
        field: "name",
        holds: |v| !v.name.trim().is_empty(),
        message: NAME_REQUIRED,
    },
    Rule {
        field: "price",
        holds: |v| v.price.is_some(),
        message: PRICE_REQUIRED,
    },
    Rule {
        field: "price",
        holds: |v| v.price.is_none_or(|p| p > Decimal::ZERO),
        message: PRICE_POSITIVE,
    },
    Rule {
        field: "stock",
        holds: |v| v.stock >= 0,
        message: STOCK_NON_NEGATIVE,
    },
];

/// Check a view against the rule table.
///
/// Every field is checked; the error carries one message per offending field.
pub fn validate(view: &ProductView) -> DomainResult<ValidProduct> {
    let mut violations = Violations::new();
    for rule in RULES.iter().filter(|rule| !(rule.holds)(view)) {
        violations.record(rule.field, rule.message);
    }

    match (violations.is_empty(), view.price) {
        (true, Some(price)) => Ok(ValidProduct {
            id: view.id,
            name: view.name.clone(),
            description: view.description.clone(),
            price,
            stock: view.stock,
        }),
        _ => Err(DomainError::Validation(violations)),
    }
}
