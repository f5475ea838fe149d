//! Shared plumbing for the marina crates: logging setup and small wire types.

pub mod types;

pub mod utils {
    pub mod logging;
}
