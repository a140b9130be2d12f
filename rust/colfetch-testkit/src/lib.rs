//! Test fixtures for the extraction engine.
//!
//! - [`registry::MemoryRegistry`]: an in-memory buffer registry holding bound
//!   buffers laid out the way a driver fills them.
//! - [`transport::ScriptedTransport`]: a fake driver that serves encoded values
//!   in chunks, counts calls and injects faults.
//! - [`data_gen`]: seeded random values for property-style tests.

pub mod data_gen;
pub mod registry;
pub mod transport;
