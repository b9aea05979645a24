//! Hash collections used throughout the engine.
//!
//! Fx hashing is fast and deterministic per process, but iteration order is
//! still arbitrary: anything that reaches output is sorted first.

pub use rustc_hash::{FxHashMap, FxHashSet};
