//! # Domain Models
//!
//! This crate contains pure gateway types with a single dependency (`serde`).
//! Keep it lean: no I/O, no codecs, no negotiation logic. Just data and constants.

pub mod config;
pub mod constants;
