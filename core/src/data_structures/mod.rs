//! FLUXION Data Structure Framework
//! Residual-paired flow network representation
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod network;

pub use self::network::*;
