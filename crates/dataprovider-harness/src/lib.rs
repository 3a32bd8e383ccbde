//! Harness adapter contracts for `dataprovider`.
//!
//! This crate provides a framework-agnostic interface for executing the
//! invocations produced by expanding a data provider. Adapters decide how a
//! single invocation body runs; the runtime decides which invocations exist.

mod adapter;
mod request;
mod std_harness;

pub use adapter::HarnessAdapter;
pub use request::{InvocationMetadata, InvocationRequest};
pub use std_harness::StdHarness;
