//! Entity <-> view mapping.

use crate::product::{Product, ProductView, ValidProduct};

pub fn to_view(product: &Product) -> ProductView {
    ProductView {
        id: product.id,
        name: product.name.clone(),
        description: product.description.clone(),
        price: Some(product.price),
        stock: product.stock,
    }
}

/// Copies every field, `id` included. Stores ignore `id` when inserting.
pub fn to_entity(input: ValidProduct) -> Product {
    Product {
        id: input.id,
        name: input.name,
        description: input.description,
        price: input.price,
        stock: input.stock,
    }
}

/// Overwrite everything but `id`.
pub fn apply_update(input: ValidProduct, product: &mut Product) {
    product.name = input.name;
    product.description = input.description;
    product.price = input.price;
    product.stock = input.stock;
}

pub fn to_view_list(products: &[Product]) -> Vec<ProductView> {
    products.iter().map(to_view).collect()
}
