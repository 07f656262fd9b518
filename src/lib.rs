// SPDX-License-Identifier: Unlicense
//! Integer arithmetic expressions: `+ - * /` with parentheses and unary
//! `+`/`-`.
//!
//! ```
//! use sapling::driver::{evaluate_str, Outcome};
//!
//! assert_eq!(evaluate_str("4 + (1 + 2) * 3"), Outcome::Value(13));
//! ```
pub mod ast;
pub mod binder;
pub mod bound;
pub mod check;
pub mod diagnostics;
pub mod driver;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod pretty;
pub mod token;
