//! CLI command implementations.

pub mod all;
pub mod basics;
pub mod bell;
pub mod common;
pub mod error_correction;
pub mod gate;
pub mod majorana;
pub mod noise;
pub mod train;
pub mod version;
