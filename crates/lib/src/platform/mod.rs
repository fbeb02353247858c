//! Host platform classification.

mod os;

pub use os::{HostOs, classify_kernel, detect};
