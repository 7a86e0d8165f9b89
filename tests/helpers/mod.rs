//! Test helpers module
//!
//! Mock HTTP servers for the API and image store, in-memory platform fakes and
//! fixture builders shared by the integration tests.

#![allow(dead_code)]

pub mod api_mock;
pub mod platform_fakes;
pub mod test_data;

pub use api_mock::*;
pub use platform_fakes::*;
pub use test_data::*;
