// sdpatch-cli/src/lib.rs
//
// Library surface of the CLI crate, split out so integration tests can
// exercise argument parsing.

pub mod cli;
pub mod logging;
pub mod prompt;
