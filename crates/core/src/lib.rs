//! Domain types shared by the Solace services.
//!
//! - [`error`] -- the closed error taxonomy every service returns.
//! - [`validation`] -- turns `validator` failures into validation errors.
//! - [`types`] -- id and timestamp aliases.

pub mod error;
pub mod types;
pub mod validation;
