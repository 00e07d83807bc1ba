//! Job API client protocol definitions.
//!
//! Clients connect to the remote job-scheduling service and expose the
//! create, get and delete calls the resource lifecycle is built on.

mod response;
mod traits;

pub use response::*;
pub use traits::*;
