//! End-to-end tests against a running server and database.
//!
//! Start the server, then run with: cargo test --test integration -- --ignored

mod api_tests;
