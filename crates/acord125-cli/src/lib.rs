//! Shared implementation of the `inspect-fields` and `fill-acord125`
//! binaries.

pub mod cli;
pub mod fill_cmd;
pub mod inspect_cmd;
pub mod shared;
