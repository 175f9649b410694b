//! Core data model types for the simulated mailbox: identities and messages.

pub mod identity;
pub mod mail;
