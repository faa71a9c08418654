#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod archive;
pub mod error;
pub mod foundation;
pub mod unarchiver;
pub mod util;
