//! Codec engine adapters.
//!
//! Each module is a thin adapter between jpegkit's validated options and an
//! engine crate. Engine state lives only for the duration of one call.

pub(crate) mod jpeg;
