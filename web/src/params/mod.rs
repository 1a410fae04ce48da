//! This module holds typed parameters for various endpoint inputs.
//!
//! Required fields are declared as `Option`s on purpose: presence is checked
//! by the controllers so that a missing or empty field produces the
//! operation's 400 response rather than a deserialization rejection.

pub(crate) mod email;
pub(crate) mod summary;
