//! Records, documents and errors shared by the store, managers and services.

pub mod bookmark;
pub mod category;
pub mod errors;
pub mod export;
mod lenient;
pub mod settings;
