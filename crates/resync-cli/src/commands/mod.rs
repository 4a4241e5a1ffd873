pub mod check;
pub mod parse_common;
pub mod tokens;
pub mod tree;

#[cfg(test)]
mod tokens_tests;
