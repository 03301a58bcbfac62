//! Shared test helpers for `profilebox-core` integration tests.

#![allow(dead_code)]

pub mod repositories;
