// demos/storefront_app/src/services/mod.rs
pub mod order_mock;
