//! Face detection over a platform-resolved native runtime.
//!
//! The interesting part of this crate is not inference — that is one call
//! into ONNX Runtime — but getting the right runtime build into the
//! process: classify the host OS and CPU, locate the matching shared
//! library inside a packaged archive, verify any previously extracted copy
//! by streaming CRC32, extract it atomically when missing or stale, and
//! dlopen it exactly once before the first native call.
//!
//! Stages fail fast and never retry; a failure anywhere aborts the run.

pub mod archive;
pub mod cache;
pub mod detection;
pub mod imaging;
pub mod loader;
pub mod pipeline;
pub mod platform;
pub mod shared;
