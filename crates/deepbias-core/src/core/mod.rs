//! # Core Module
//!
//! Stateless building blocks shared by the adapter engine: the flat-buffer addressing
//! law, unit conversion between host and model conventions, the data records that
//! describe a selection of atoms and the observables produced for it, and file I/O for
//! the atom type list.
//!
//! ## Architecture
//!
//! - **Addressing** ([`index`]) - The single mapping between flat engine buffers and
//!   `(channel, atom, dim)` triples
//! - **Units** ([`units`]) - Host unit systems, model-native constants, and resolved conversion factors
//! - **Data Records** ([`models`]) - Atom selections, type tables, cell input, and output channels
//! - **File I/O** ([`io`]) - Reading the atom type list

pub mod index;
pub mod io;
pub mod models;
pub mod units;
