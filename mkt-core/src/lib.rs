#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

/// Core domain models for the bidding engine.
///
/// The types in this module are plain data structures with minimal business
/// logic, shared between backends and the HTTP surface. Anything that talks
/// to a store or a network lives behind the traits in [`ports`] instead.
pub mod models;

/// Interface traits for the bidding engine.
///
/// These are the "ports" of the system: repository traits a storage backend
/// implements, and the [`ports::Application`] port through which the hosting
/// application supplies the clock, identifier generation, and the
/// authentication facts consumed from the session-management collaborator.
pub mod ports;
