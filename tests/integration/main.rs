//! Integration tests

mod api_test;
mod e2e_test;
mod feed_test;
mod support;
