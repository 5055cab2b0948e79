// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use icu_regex::{CompileOptions, Pattern};

fn pattern(src: &str) -> Pattern {
    Pattern::compile(src, CompileOptions::default()).unwrap()
}

#[test]
fn numbered_groups_index_by_open_paren_order() {
    let p = pattern(r"(a)(b(c))");
    let mut m = p.matcher("abc");
    assert!(m.find().unwrap());
    assert_eq!(m.group(0).unwrap().as_deref(), Some("abc"));
    assert_eq!(m.group(1).unwrap().as_deref(), Some("a"));
    assert_eq!(m.group(2).unwrap().as_deref(), Some("bc"));
    assert_eq!(m.group(3).unwrap().as_deref(), Some("c"));
}

#[test]
fn group_that_did_not_participate_is_none() {
    let p = pattern(r"(a)|(b)");
    let mut m = p.matcher("a");
    assert!(m.find().unwrap());
    assert_eq!(m.group(1).unwrap().as_deref(), Some("a"));
    assert_eq!(m.group(2).unwrap(), None);
}

#[test]
fn named_group_addressable_by_name_and_number() {
    let p = pattern(r"(?<y>\d{4})-(?<mo>\d{2})");
    let mut m = p.matcher("2024-07");
    assert!(m.find().unwrap());
    assert_eq!(m.group_by_name("y").unwrap().as_deref(), Some("2024"));
    assert_eq!(m.group(1).unwrap().as_deref(), Some("2024"));
    assert_eq!(m.group_by_name("mo").unwrap().as_deref(), Some("07"));
}

#[test]
fn start_and_end_report_code_unit_offsets() {
    let p = pattern(r"b+");
    let mut m = p.matcher("aabbbc");
    assert!(m.find().unwrap());
    assert_eq!(m.start(0).unwrap(), Some(2));
    assert_eq!(m.end(0).unwrap(), Some(5));
}

#[test]
fn backreference_must_match_prior_capture_exactly() {
    let p = pattern(r"(\w+) \1");
    let mut m = p.matcher("hello hello");
    assert!(m.find().unwrap());
    let mut no = p.matcher("hello world");
    assert!(!no.find().unwrap());
}

#[test]
fn repeated_group_keeps_last_iteration() {
    let p = pattern(r"(\w)+");
    let mut m = p.matcher("abc");
    assert!(m.find().unwrap());
    assert_eq!(m.group(0).unwrap().as_deref(), Some("abc"));
    assert_eq!(m.group(1).unwrap().as_deref(), Some("c"));
}

#[test]
fn group_count_includes_group_zero() {
    let p = pattern(r"(a)(b)(c)");
    assert_eq!(p.group_count(), 4);
}

#[test]
fn nested_group_count_in_alternation() {
    let p = pattern(r"(a)|(b)|(c)");
    let mut m = p.matcher("b");
    assert!(m.find().unwrap());
    assert_eq!(m.group(1).unwrap(), None);
    assert_eq!(m.group(2).unwrap().as_deref(), Some("b"));
    assert_eq!(m.group(3).unwrap(), None);
}
