//! Product catalog API.
//!
//! Products are the one binary-capable resource: create and update carry a
//! main image plus optional secondary images, so mutations go out as
//! multipart bodies.

use serde_json::Value;
use shopfront_forms::{ChoiceOption, FieldConfig, FileConstraints};
use shopfront_resource::{ActionOptions, ApiResource, ViewCache};
use shopfront_schema::Schema;
use shopfront_transport::HttpTransport;
use shopfront_types::{
    ActionState, ApiEnvelope, ApiError, FormValues, PaginatedResponse, Product,
};
use std::sync::Arc;

/// Views stale after any product mutation.
pub const PRODUCT_VIEWS: [&str; 2] = ["/admin/products", "/products"];

const CATEGORIES: [&str; 6] = [
    "Electronics",
    "Clothing",
    "Books",
    "Home & Garden",
    "Sports",
    "Toys",
];

pub struct ProductsApi {
    resource: ApiResource<Product>,
    views: Arc<ViewCache>,
}

impl ProductsApi {
    pub fn new(transport: Arc<HttpTransport>, views: Arc<ViewCache>) -> Self {
        Self {
            resource: ApiResource::new(transport, "api/v1/products", true),
            views,
        }
    }

    /// One catalog page. Degrades to an empty page on failure.
    pub fn list(&self, page: u32, limit: u32, search: &str) -> PaginatedResponse<Product> {
        self.resource.list_paginated(page, limit, search, false, true)
    }

    /// Every product, unpaginated.
    pub fn all(&self) -> Vec<Product> {
        self.resource.list()
    }

    pub fn get(&self, id: i64) -> Option<Product> {
        self.resource.get(id)
    }

    pub fn by_category(&self, category: &str) -> Vec<Product> {
        self.resource
            .list_sub(&format!("category/{}", urlencoding::encode(category)))
    }

    pub fn search(&self, name: &str) -> Vec<Product> {
        self.resource
            .list_sub(&format!("search?name={}", urlencoding::encode(name)))
    }

    pub fn create(&self, values: FormValues) -> Result<ApiEnvelope<Product>, ApiError> {
        self.resource.create(values)
    }

    pub fn update(&self, id: i64, values: FormValues) -> Result<ApiEnvelope<Product>, ApiError> {
        self.resource
            .update(id, values, shopfront_resource::UpdateMethod::Put)
    }

    pub fn delete(&self, id: i64) -> Result<ApiEnvelope<Value>, ApiError> {
        self.resource.delete(id)
    }

    /// Hold stock for a pending checkout.
    pub fn reserve(&self, id: i64, quantity: u32) -> Result<ApiEnvelope<Value>, ApiError> {
        self.resource
            .post_sub(&format!("{id}/reserve?quantity={quantity}"), ())
    }

    /// Return stock held by an abandoned checkout.
    pub fn release(&self, id: i64, quantity: u32) -> Result<ApiEnvelope<Value>, ApiError> {
        self.resource
            .post_sub(&format!("{id}/release?quantity={quantity}"), ())
    }

    pub fn create_action(&self, submission: FormValues) -> ActionState {
        let options = ActionOptions::invalidating(&self.views, &PRODUCT_VIEWS);
        self.resource
            .create_action(submission, &create_product_schema(), &options)
    }

    pub fn update_action(&self, submission: FormValues) -> ActionState {
        let options = ActionOptions::invalidating(&self.views, &PRODUCT_VIEWS);
        self.resource
            .update_action(submission, &update_product_schema(), &options)
    }

    pub fn delete_action(&self, submission: &FormValues) -> ActionState {
        let options = ActionOptions::invalidating(&self.views, &PRODUCT_VIEWS);
        self.resource.delete_action(submission, &options)
    }
}

pub fn create_product_schema() -> Schema {
    Schema::new()
        .required_text("name", 1, 120)
        .required_text("description", 1, 2000)
        .required_number("price", Some(0.0), None)
        .one_of("category", &CATEGORIES)
        .file("mainImage", true)
        .file("secondaryImages", false)
        .required_integer("stockQuantity", Some(0.0), None)
}

pub fn update_product_schema() -> Schema {
    Schema::new()
        .field("id", true, shopfront_schema::ValueRule::Number {
            min: None,
            max: None,
            integer: true,
        })
        .optional_text("name", 120)
        .optional_text("description", 2000)
        .field("price", false, shopfront_schema::ValueRule::Number {
            min: Some(0.0),
            max: None,
            integer: false,
        })
        .field("stockQuantity", false, shopfront_schema::ValueRule::Number {
            min: Some(0.0),
            max: None,
            integer: true,
        })
        .file("mainImage", false)
        .file("secondaryImages", false)
        .field("rating", false, shopfront_schema::ValueRule::Number {
            min: Some(0.0),
            max: Some(5.0),
            integer: false,
        })
}

fn category_options() -> Vec<ChoiceOption> {
    CATEGORIES
        .iter()
        .map(|c| ChoiceOption::new(*c, *c))
        .collect()
}

pub fn create_product_fields() -> Vec<FieldConfig> {
    vec![
        FieldConfig::text("name", "Product Name")
            .placeholder("Enter product name")
            .required(),
        FieldConfig::free_text("description", "Description", 4)
            .placeholder("Enter product description")
            .required(),
        FieldConfig::numeric("price", "Price ($)")
            .placeholder("0.00")
            .required(),
        FieldConfig::numeric("stockQuantity", "Stock Quantity")
            .placeholder("0")
            .required(),
        FieldConfig::choice("category", "Category", category_options())
            .placeholder("Select category")
            .required(),
        FieldConfig::file(
            "mainImage",
            "Main Product Image",
            FileConstraints::new().accept("image/*"),
        )
        .required(),
        FieldConfig::file(
            "secondaryImages",
            "Secondary Product Images",
            FileConstraints::new().accept("image/*").multiple(true),
        ),
    ]
}

pub fn update_product_fields() -> Vec<FieldConfig> {
    let mut fields = vec![FieldConfig::hidden("id").required()];
    for field in create_product_fields() {
        fields.push(match field.name.as_str() {
            // Every create field turns optional on update.
            "name" | "description" | "price" | "stockQuantity" | "category" | "mainImage" => {
                FieldConfig { required: false, ..field }
            }
            _ => field,
        });
    }
    fields.push(
        FieldConfig::exclusive_choice(
            "active",
            "Active",
            vec![
                ChoiceOption::new("true", "Yes"),
                ChoiceOption::new("false", "No"),
            ],
            shopfront_forms::ChoiceLayout::Horizontal,
        ),
    );
    fields.push(FieldConfig::numeric("rating", "Rating").placeholder("0.0"));
    fields
}

pub fn delete_product_fields() -> Vec<FieldConfig> {
    vec![FieldConfig::hidden("id").required()]
}
