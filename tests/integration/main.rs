//! Integration tests for upsmon.

mod util;

mod arg_tests;
mod invalid_config_tests;
