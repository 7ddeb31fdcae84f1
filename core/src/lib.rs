//! FLUXION Core: Network Flow Observatory
//!
//! Computational core for maximum-flow analysis over directed, capacitated
//! networks. Provides the residual-paired flow network representation and
//! the augmenting-path solver operating on it.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;

pub use self::algorithm::max_flow::{FlowMetrics, MaxFlowSolver};
pub use self::data_structures::network::{
    Capacity, EdgeId, Flow, FlowEdge, FlowError, FlowNetwork,
};
