//! Varsift - threshold-driven filtering for VCF variant streams
//!
//! Varsift compiles per-field threshold expressions (`MQ<30`,
//! `AF1>0.05&<0.95`, `sum(DP4[2],DP4[3])<2`) into a typed plan and runs a
//! VCF record stream through it in a single pass, splitting records into
//! passing and rejected outputs while preserving their order and bytes.

pub mod cli;
pub mod config;
pub mod error;
pub mod filtering;
pub mod vcf;

pub use error::{Result, VarsiftError};
