//! Library components of the `triage` binary: logging setup and the health
//! pipeline session.

pub mod logging;
pub mod pipeline;
