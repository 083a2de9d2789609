//! Terminal output for the `decode` and `state` subcommands.
pub mod decode;
pub mod state;
