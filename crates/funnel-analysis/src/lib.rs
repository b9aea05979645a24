//! # funnel-analysis
//!
//! Markov-chain attribution engine for staged conversion funnels.
//! Contains the path builder, transition matrix assembly, absorption solver,
//! removal-effect evaluator, and the multi-dimension coordinator.

#![allow(clippy::module_inception)]

pub mod cancellation;
pub mod paths;
pub mod matrix;
pub mod absorption;
pub mod removal;
pub mod coordinator;
