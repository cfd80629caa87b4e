pub mod db;
pub mod errors;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
