//! Blockfall (workspace facade crate).
//!
//! This package keeps a stable `blockfall::{core,harness,types}` public API
//! while the implementation lives in dedicated crates under `crates/`.

pub use blockfall_core as core;
pub use blockfall_harness as harness;
pub use blockfall_types as types;
