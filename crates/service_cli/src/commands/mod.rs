//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod bond;
pub mod cashflow;
pub mod option;
pub mod tvm;
