//! Integration tests for chatroute.

pub mod common;
pub mod dispatch_test;
pub mod handlers_test;
pub mod help_test;
pub mod prefix_test;
