//! Domain models for the inventory backend.

pub mod activity;
pub mod admin;
pub mod category;
pub mod product;

pub use activity::{ActivityAction, ActivityLogEntry};
pub use admin::Admin;
pub use category::{Category, CategoryWithCount, NewCategory};
pub use product::{NewProduct, Product, ProductFilter, ProductUpdate};
