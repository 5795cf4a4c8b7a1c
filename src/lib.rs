#![cfg_attr(all(feature = "no-std", not(test)), no_std)]

#[cfg(feature = "no-std")]
extern crate alloc;

pub mod collections;
#[cfg(all(feature = "harness", not(feature = "no-std")))]
pub mod harness;
