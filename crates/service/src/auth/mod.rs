//! Accounts, sessions and anti-forgery tokens.
//! - `service`: register and login.
//! - `token`: HS256 tokens for sessions and form submissions.
//! - `repository`: persistence abstraction, with SeaORM and mock implementations.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod repo;
pub mod service;
pub mod token;

pub use service::AuthService;
pub use token::{Claims, TokenIssuer};
