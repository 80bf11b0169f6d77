//! Building blocks shared between days

pub mod dp_cache;
pub mod grid;
pub mod interval;
pub mod math;
pub mod parsing;
