pub mod account;
pub mod article;
pub mod author;
pub mod error;
pub mod keyword;
pub mod keyword_store;
pub mod product;
