//! # Repository Module
//!
//! Repository implementations for database access.
//!
//! One repository only: the whole application state is a single record
//! (see [`state::StateRepository`]), so there is nothing resembling a
//! table-per-entity layout here.

pub mod state;
