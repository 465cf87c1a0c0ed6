//! Useful extensions to the base gale.
//!
//! | Name       | Description                                                   |
//! | ---------- | ------------------------------------------------------------- |
//! | [`Cors`]   | Cross-origin resource sharing headers and preflight handling. |
//! | [`Logger`] | Log handled requests with their response status.              |

pub mod cors;
pub mod logger;

#[doc(inline)]
pub use self::{cors::Cors, logger::Logger};
