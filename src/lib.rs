pub mod client;
pub mod error;
pub mod models;
pub mod navigation;
pub mod state;
pub mod validation;
pub mod views;
pub mod web;
