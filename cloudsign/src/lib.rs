#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub use cloudsign_core::*;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::default_context;

#[cfg(feature = "aws")]
pub mod aws;

#[cfg(feature = "chef")]
pub mod chef;
