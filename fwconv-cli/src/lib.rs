//! Library half of the `fwconv` binary: config file handling and the
//! `fwconv schema` layout view.

pub mod config;
pub mod inspect;
