//! Two-step handover of a token mint's authority away from an NTT manager.
//!
//! ```text
//! ntt-mint-authority transfer <NEW_AUTHORITY>   # designate the pending authority
//! ntt-mint-authority claim <NEW_AUTHORITY>      # finalize the handover
//! ```
//!
//! Both commands require the manager to run version 3 or later and to be paused.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod explorer;
pub mod keys;
pub mod protocol;
pub mod reader;
pub mod submitter;
