#![allow(dead_code, unused_imports)]

pub use dirhook_test_utils::*;
