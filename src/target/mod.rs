//! Remote target access and parameter merging

pub mod client;
pub mod patcher;

pub use client::{HttpTargetApi, TargetApi};
pub use patcher::{apply_parameters, merge_parameters, ApplyReport};
