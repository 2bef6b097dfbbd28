//! Commands for the txmerkle CLI.

pub mod demo;
pub mod layers;
pub mod prove;
pub mod root;
pub mod verify;
