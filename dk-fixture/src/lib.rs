#![deny(rust_2018_idioms)]
#![deny(clippy::correctness)]
#![deny(clippy::perf)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod encoding;
pub mod error;
pub mod fixture;
pub mod generator;
pub mod random;
pub mod region;
pub mod sink;
pub mod verify;
