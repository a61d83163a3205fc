// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

use puzzle_search::CostTable;

pub const ROUTES: &str = "\
London to Dublin = 464
London to Belfast = 518
Dublin to Belfast = 141
";

pub const SEATING: &str = "\
Alice would gain 54 happiness units by sitting next to Bob.
Alice would lose 79 happiness units by sitting next to Carol.
Alice would lose 2 happiness units by sitting next to David.
Bob would gain 83 happiness units by sitting next to Alice.
Bob would lose 7 happiness units by sitting next to Carol.
Bob would lose 63 happiness units by sitting next to David.
Carol would lose 62 happiness units by sitting next to Alice.
Carol would gain 60 happiness units by sitting next to Bob.
Carol would gain 55 happiness units by sitting next to David.
David would gain 46 happiness units by sitting next to Alice.
David would lose 7 happiness units by sitting next to Bob.
David would gain 41 happiness units by sitting next to Carol.
";

/// Every ordering of `0..n`, by plain recursion.
pub fn permutations(n: usize) -> Vec<Vec<usize>> {
    fn extend(prefix: &mut Vec<usize>, n: usize, out: &mut Vec<Vec<usize>>) {
        if prefix.len() == n {
            out.push(prefix.clone());
            return;
        }
        for e in 0..n {
            if !prefix.contains(&e) {
                prefix.push(e);
                extend(prefix, n, out);
                prefix.pop();
            }
        }
    }
    let mut out = Vec::new();
    extend(&mut Vec::with_capacity(n), n, &mut out);
    out
}

/// Total cost of one ordering of `0..n`.
pub fn ordering_cost(table: &CostTable<usize>, ordering: &[usize], cyclic: bool) -> i64 {
    let mut total: i64 = ordering
        .windows(2)
        .map(|pair| table.cost(&pair[0], &pair[1]).unwrap())
        .sum();
    if cyclic && ordering.len() > 1 {
        total += table.cost(&ordering[ordering.len() - 1], &ordering[0]).unwrap();
    }
    total
}

/// A symmetric table over `0..n` with reproducible pseudo-random costs.
pub fn random_symmetric_table(n: usize, seed: u64) -> CostTable<usize> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) % 201) as i64 - 100
    };
    let mut table = CostTable::new();
    for a in 0..n {
        for b in (a + 1)..n {
            table.insert_symmetric(a, b, next());
        }
    }
    table
}
