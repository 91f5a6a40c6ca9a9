//! Client-side view of the NTT manager program: seeds, account layouts and
//! the instructions used to hand mint authority over to a new owner.

pub mod constants;
pub mod error;
pub mod instruction;
pub mod pda;
pub mod state;
pub mod token;
pub mod version;
