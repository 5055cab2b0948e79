// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A Unicode regular-expression engine ported from the ICU regex
//! implementation: a pattern compiler producing a compact bytecode, and a
//! backtracking virtual machine executing it against UTF-16 text.
//!
//! ```
//! use icu_regex::{CompileOptions, Pattern};
//!
//! let pattern = Pattern::compile(r"(\w+)@(\w+)\.com", CompileOptions::default()).unwrap();
//! let mut m = pattern.matcher("contact: jane@example.com");
//! assert!(m.find().unwrap());
//! assert_eq!(m.group(1).unwrap().as_deref(), Some("jane"));
//! assert_eq!(m.group(2).unwrap().as_deref(), Some("example"));
//! ```

mod ast;
mod compiler;
mod config;
mod engine;
mod error;
mod flags;
mod literals;
mod matcher;
mod opcode;
mod parser;
mod program;
mod sets;
mod stack;
mod text;

pub use config::{CompileOptions, MatcherOptions};
pub use error::{Error, ParseError};
pub use flags::{
    Flags, CASE_INSENSITIVE, COMMENTS, DOTALL, ERROR_ON_UNKNOWN_ESCAPES, LITERAL, MULTILINE,
    UNIX_LINES, UWORD,
};
pub use matcher::{Matcher, Pattern};
pub use program::{CompiledPattern, SharedPattern};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_level_smoke_test() {
        let _ = env_logger::try_init();
        let pattern = Pattern::compile(r"\d+-\d+", CompileOptions::default()).unwrap();
        let mut m = pattern.matcher("order 2024-07");
        assert!(m.find().unwrap());
        assert_eq!(m.group(0).unwrap().as_deref(), Some("2024-07"));
    }
}
