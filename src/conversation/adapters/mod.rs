//! Adapters implementing the conversation module's ports.

pub mod memory;
