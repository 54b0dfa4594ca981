//! Marker traits separating writes from reads
//!
//! Every command and query registered with the mediator implements exactly
//! one of these, so a handler's side-effect class is visible in its type.

/// A request that mutates the store
pub trait Command {}

/// A request that only reads from the store
pub trait Query {}
