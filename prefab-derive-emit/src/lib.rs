#![doc = include_str!("../README.md")]

mod process_struct;

mod derive;
pub use derive::*;
