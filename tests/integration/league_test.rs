//! League workflow integration tests
//!
//! Drives the composed services end to end against the in-memory store.

#![allow(dead_code)]

mod cascade;
mod common;
mod competitions;
mod concurrency;
mod matches;
mod registration;
mod sheets;
