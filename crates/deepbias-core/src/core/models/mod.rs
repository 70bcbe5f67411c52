//! Data records exchanged between the host, the adapter, and the inference engine.

pub mod cell;
pub mod channel;
pub mod selection;
pub mod types;
