// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Parsers turning puzzle text into kernel facts.
//!
//! Each parser compiles its own line pattern; nothing is shared between
//! calls. Blank lines are ignored in the line-oriented formats.

use crate::cost::CostTable;
use crate::error::SearchError;
use crate::rewrite::{Rule, RuleSet};
use regex::Regex;
use thiserror::Error;

/// Failure to parse puzzle input.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A line does not match the expected format.
    #[error("line {line}: expected {expected}, found {text:?}")]
    Malformed {
        line: usize,
        expected: &'static str,
        text: String,
    },

    /// A required part of the input is absent.
    #[error("input has no {0}")]
    Missing(&'static str),

    /// The parsed facts leave a needed cost undefined.
    #[error(transparent)]
    Costs(#[from] SearchError),

    /// A line pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

/// Name of the seat added by [`PairwiseFacts::with_self_seat`]. It cannot
/// collide with a parsed name, which is always a word.
pub const SELF_SEAT: &str = "<self>";

/// Entities and the pairwise costs between them.
#[derive(Debug, Clone)]
pub struct PairwiseFacts {
    /// Entities in order of first appearance.
    pub entities: Vec<String>,
    pub costs: CostTable<String>,
}

impl PairwiseFacts {
    fn new() -> Self {
        Self {
            entities: Vec::new(),
            costs: CostTable::new(),
        }
    }

    /// Add a seat for the solver, neutral towards every neighbour.
    pub fn with_self_seat(mut self) -> Self {
        self.costs = self.costs.with_sentinel(SELF_SEAT.to_string());
        self.note(SELF_SEAT);
        self
    }

    fn note(&mut self, entity: &str) {
        if !self.entities.iter().any(|e| e == entity) {
            self.entities.push(entity.to_string());
        }
    }
}

/// Rewrite rules and the molecule they apply to.
#[derive(Debug, Clone)]
pub struct MoleculeInput {
    pub rules: RuleSet,
    pub molecule: String,
}

/// Non-blank lines with their 1-based line numbers.
fn lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn malformed(line: usize, expected: &'static str, text: &str) -> ParseError {
    ParseError::Malformed {
        line,
        expected,
        text: text.to_string(),
    }
}

/// Parse `London to Dublin = 464` lines into a symmetric distance table.
pub fn parse_distances(text: &str) -> Result<PairwiseFacts, ParseError> {
    const EXPECTED: &str = "`<place> to <place> = <distance>`";
    let pattern = Regex::new(r"^(\w+) to (\w+) = (\d+)$")?;

    let mut facts = PairwiseFacts::new();
    for (line, content) in lines(text) {
        let caps = pattern
            .captures(content)
            .ok_or_else(|| malformed(line, EXPECTED, content))?;
        let distance: i64 = caps[3]
            .parse()
            .map_err(|_| malformed(line, EXPECTED, content))?;
        facts.note(&caps[1]);
        facts.note(&caps[2]);
        facts
            .costs
            .insert_symmetric(caps[1].to_string(), caps[2].to_string(), distance);
    }
    if facts.costs.is_empty() {
        return Err(ParseError::Missing("distances"));
    }
    Ok(facts)
}

/// Parse `Alice would gain 54 happiness units by sitting next to Bob.` lines.
///
/// Each guest's feeling about a neighbour is directed; the returned table
/// sums both directions so one lookup per adjacent pair gives the pair's
/// total happiness. Both directions of every mentioned pair must be given.
pub fn parse_seating(text: &str) -> Result<PairwiseFacts, ParseError> {
    const EXPECTED: &str = "`<guest> would gain|lose <n> happiness units by sitting next to <guest>.`";
    let pattern =
        Regex::new(r"^(\w+) would (gain|lose) (\d+) happiness units? by sitting next to (\w+)\.$")?;

    let mut facts = PairwiseFacts::new();
    for (line, content) in lines(text) {
        let caps = pattern
            .captures(content)
            .ok_or_else(|| malformed(line, EXPECTED, content))?;
        let amount: i64 = caps[3]
            .parse()
            .map_err(|_| malformed(line, EXPECTED, content))?;
        let happiness = if &caps[2] == "gain" { amount } else { -amount };
        facts.note(&caps[1]);
        facts.note(&caps[4]);
        facts
            .costs
            .insert(caps[1].to_string(), caps[4].to_string(), happiness);
    }
    if facts.costs.is_empty() {
        return Err(ParseError::Missing("happiness facts"));
    }
    facts.costs = facts.costs.symmetrized_sum()?;
    Ok(facts)
}

/// Parse one non-negative container size per line.
pub fn parse_containers(text: &str) -> Result<Vec<u64>, ParseError> {
    lines(text)
        .map(|(line, content)| {
            content
                .parse()
                .map_err(|_| malformed(line, "a container size", content))
        })
        .collect()
}

/// Parse `H => HO` rule lines, then the molecule after them.
pub fn parse_molecule(text: &str) -> Result<MoleculeInput, ParseError> {
    let pattern = Regex::new(r"^(\w+) => (\w+)$")?;

    let mut rules = RuleSet::default();
    let mut molecule = None;
    for (line, content) in lines(text) {
        if molecule.is_some() {
            return Err(malformed(line, "end of input after the molecule", content));
        }
        match pattern.captures(content) {
            Some(caps) => rules.push(Rule::new(&caps[1], &caps[2])),
            None if content.chars().all(|c| c.is_ascii_alphanumeric()) => {
                molecule = Some(content.to_string());
            }
            None => return Err(malformed(line, "`<from> => <to>` or a molecule", content)),
        }
    }

    let molecule = molecule.ok_or(ParseError::Missing("molecule"))?;
    Ok(MoleculeInput { rules, molecule })
}

/// Parse a single integer threshold.
pub fn parse_threshold(text: &str) -> Result<u64, ParseError> {
    let mut lines = lines(text);
    let (line, content) = lines.next().ok_or(ParseError::Missing("threshold"))?;
    let threshold = content
        .parse()
        .map_err(|_| malformed(line, "a threshold", content))?;
    if let Some((line, extra)) = lines.next() {
        return Err(malformed(line, "end of input after the threshold", extra));
    }
    Ok(threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_distances() {
        let facts = parse_distances("London to Dublin = 464\n\nDublin to Belfast = 141\n").unwrap();
        assert_eq!(facts.entities, vec!["London", "Dublin", "Belfast"]);
        assert_eq!(
            facts.costs.cost(&"Belfast".to_string(), &"Dublin".to_string()),
            Ok(141)
        );
    }

    #[test]
    fn test_parse_distances_rejects_garbage() {
        let err = parse_distances("London to Dublin = 464\nLondon -> Paris\n").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line: 2, .. }));
        assert!(matches!(
            parse_distances("\n"),
            Err(ParseError::Missing("distances"))
        ));
    }

    #[test]
    fn test_parse_seating_sums_directions() {
        let text = "Alice would gain 54 happiness units by sitting next to Bob.\n\
                    Bob would lose 7 happiness units by sitting next to Alice.\n";
        let facts = parse_seating(text).unwrap();
        assert_eq!(facts.entities, vec!["Alice", "Bob"]);
        assert_eq!(
            facts.costs.cost(&"Bob".to_string(), &"Alice".to_string()),
            Ok(47)
        );
    }

    #[test]
    fn test_parse_seating_rejects_one_sided_pair() {
        let text = "Alice would gain 54 happiness units by sitting next to Bob.\n";
        let err = parse_seating(text).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Costs(SearchError::MissingCostEntry { ref from, ref to })
                if from == "Bob" && to == "Alice"
        ));
    }

    #[test]
    fn test_self_seat_is_neutral() {
        let text = "Alice would gain 54 happiness units by sitting next to Bob.\n\
                    Bob would gain 3 happiness units by sitting next to Alice.\n";
        let facts = parse_seating(text).unwrap().with_self_seat();
        assert_eq!(facts.entities, vec!["Alice", "Bob", SELF_SEAT]);
        assert_eq!(
            facts.costs.cost(&SELF_SEAT.to_string(), &"Alice".to_string()),
            Ok(0)
        );
    }

    #[test]
    fn test_parse_containers() {
        assert_eq!(parse_containers("20\n15\n 10 \n").unwrap(), vec![20, 15, 10]);
        assert!(parse_containers("20\n-5\n").is_err());
    }

    #[test]
    fn test_parse_molecule() {
        let input = parse_molecule("H => HO\nH => OH\nO => HH\n\nHOH\n").unwrap();
        assert_eq!(input.rules.len(), 3);
        assert_eq!(input.molecule, "HOH");
    }

    #[test]
    fn test_parse_molecule_requires_molecule() {
        assert!(matches!(
            parse_molecule("H => HO\n"),
            Err(ParseError::Missing("molecule"))
        ));
        assert!(parse_molecule("H => HO\nHOH\nHOH\n").is_err());
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold("  33100000\n").unwrap(), 33_100_000);
        assert!(parse_threshold("").is_err());
        assert!(parse_threshold("12\n13\n").is_err());
    }
}
