//! doccov - documentation coverage for TypeScript/JavaScript modules
//!
//! This crate follows the `export` statements of a module's entry points to
//! the declarations they expose and reports which of them carry a JSDoc block.

pub mod analysis;
pub mod config;
pub mod report;
