//! Internal machinery backing the built-in TCP transport.
//! These are implementation details and may change between versions.

pub mod http;
pub mod thread_pool;
