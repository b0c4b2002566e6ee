//! Core types and trait definitions for the imenik contacts service.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! validator and the authorizer are pure functions; persistence is reached
//! only through the traits in [`store`].

pub mod birthday;
pub mod contact;
pub mod error;
pub mod policy;
pub mod principal;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
