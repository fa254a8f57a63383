//! # API Route Modules
//!
//! - `issues`: Issue filing, lookup, filtering, replacement, deletion and
//!   status transitions under `/incidencias`.

pub mod issues;
