// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Integration tests for forward expansion and backward reduction.

use puzzle_search::input::parse_molecule;
use puzzle_search::rewrite::{expand, reduce, ReduceLimits};
use puzzle_search::{Rule, SearchError};
use std::collections::BTreeSet;

const MOLECULE: &str = "\
e => H
e => O
H => HO
H => OH
O => HH

HOHOHO
";

#[test]
fn test_expand_replaces_one_occurrence() {
    let reachable = expand("abcd", &[Rule::new("ab", "cd")]);
    assert_eq!(reachable, BTreeSet::from(["cdcd".to_string()]));
}

#[test]
fn test_expand_parsed_molecule() {
    let input = parse_molecule(MOLECULE).unwrap();
    assert_eq!(input.rules.expand(&input.molecule).len(), 7);
    assert_eq!(input.rules.expand("HOH").len(), 4);
}

#[test]
fn test_reduce_parsed_molecule() {
    let input = parse_molecule(MOLECULE).unwrap();
    assert_eq!(input.rules.reduce(&input.molecule, "e"), Ok(6));
    assert_eq!(input.rules.reduce("HOH", "e"), Ok(3));
}

#[test]
fn test_reduce_with_phrase_rules() {
    // Rules in the style of chemistry grammars: each step strictly grows the
    // string and the bracketing tokens are unambiguous.
    let rules = [
        Rule::new("e", "NAl"),
        Rule::new("Al", "ThF"),
        Rule::new("Th", "ThCa"),
        Rule::new("F", "CaF"),
    ];
    // e -> NAl -> NThF -> NThCaF -> NThCaCaF
    assert_eq!(reduce("NThCaCaF", &rules, "e"), Ok(4));
}

#[test]
fn test_stuck_is_distinct_from_success() {
    let input = parse_molecule(MOLECULE).unwrap();
    match input.rules.reduce("HZ", "e") {
        Err(SearchError::StuckReduction { steps, remaining }) => {
            assert_eq!(steps, 0);
            assert_eq!(remaining, "HZ");
        }
        other => panic!("expected a stuck reduction, got {:?}", other),
    }
}

#[test]
fn test_step_limit() {
    let input = parse_molecule(MOLECULE).unwrap();
    assert_eq!(
        input
            .rules
            .reduce_with_limits("HOHOHO", "e", ReduceLimits { max_steps: 3 }),
        Err(SearchError::StepLimitExceeded { max_steps: 3 })
    );
}
