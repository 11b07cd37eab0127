//! Fixed-point computation of FIRST and FOLLOW sets (§4.C).

use std::collections::{HashMap, HashSet};

use log::trace;

use crate::grammar::Grammar;
use crate::symbol::Symbol;

pub type SymbolSet = HashSet<Symbol>;
pub type FirstSets = HashMap<Symbol, SymbolSet>;
pub type FollowSets = HashMap<Symbol, SymbolSet>;

impl Grammar {
    /// Computes FIRST(X) for every terminal, Epsilon, EndMarker, and
    /// nonterminal X of the grammar.
    pub fn compute_first_sets(&self) -> FirstSets {
        let mut first: FirstSets = HashMap::new();

        for &terminal in self.terminals() {
            first.insert(terminal, [terminal].into_iter().collect());
        }
        first.insert(Symbol::Epsilon, [Symbol::Epsilon].into_iter().collect());
        first.insert(Symbol::EndMarker, [Symbol::EndMarker].into_iter().collect());
        for &nt in self.non_terminals() {
            first.entry(nt).or_insert_with(HashSet::new);
        }

        let mut pass = 0usize;
        loop {
            pass += 1;
            let mut changed = false;

            for production in self.productions() {
                let additions = first_of_sequence(&production.rhs, &first);
                let entry = first.get_mut(&production.lhs).unwrap();
                for symbol in additions {
                    if entry.insert(symbol) {
                        changed = true;
                    }
                }
            }

            trace!("FIRST fixed point pass {}: changed = {}", pass, changed);
            if !changed {
                break;
            }
        }

        first
    }

    /// Computes FOLLOW(A) for every nonterminal A, given the finalized FIRST
    /// sets.
    pub fn compute_follow_sets(&self, first: &FirstSets) -> FollowSets {
        let mut follow: FollowSets = self
            .non_terminals()
            .iter()
            .map(|&nt| (nt, HashSet::new()))
            .collect();

        follow
            .get_mut(&self.start_symbol())
            .unwrap()
            .insert(Symbol::EndMarker);

        let mut pass = 0usize;
        loop {
            pass += 1;
            let mut changed = false;
            let mut updates: Vec<(Symbol, Symbol)> = Vec::new();

            for production in self.productions() {
                for (i, symbol) in production.rhs.iter().enumerate() {
                    let Symbol::Nonterminal(_) = symbol else {
                        continue;
                    };

                    let beta = &production.rhs[i + 1..];
                    let first_beta = first_of_sequence(beta, first);

                    for s in &first_beta {
                        if !s.is_epsilon() {
                            updates.push((*symbol, *s));
                        }
                    }

                    if first_beta.contains(&Symbol::Epsilon) {
                        for s in follow.get(&production.lhs).unwrap().clone() {
                            updates.push((*symbol, s));
                        }
                    }
                }
            }

            for (nt, terminal) in updates {
                if follow.get_mut(&nt).unwrap().insert(terminal) {
                    changed = true;
                }
            }

            trace!("FOLLOW fixed point pass {}: changed = {}", pass, changed);
            if !changed {
                break;
            }
        }

        follow
    }
}

/// FIRST of a sequence of symbols against a (possibly partial, mid fixed
/// point) FIRST map, per the algorithm of §4.C.
pub fn first_of_sequence(sequence: &[Symbol], first: &FirstSets) -> SymbolSet {
    let mut accumulator = HashSet::new();
    let empty = HashSet::new();

    for symbol in sequence {
        let first_of_symbol = first.get(symbol).unwrap_or(&empty);
        accumulator.extend(first_of_symbol.iter().filter(|s| !s.is_epsilon()).copied());

        if !first_of_symbol.contains(&Symbol::Epsilon) {
            return accumulator;
        }
    }

    accumulator.insert(Symbol::Epsilon);
    accumulator
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar(lines: &[&str]) -> Grammar {
        Grammar::parse(lines.iter().copied()).unwrap()
    }

    #[test]
    fn first_of_terminal_is_itself() {
        let g = grammar(&["1", "S -> a"]);
        let first = g.compute_first_sets();
        assert_eq!(
            *first.get(&Symbol::Terminal('a')).unwrap(),
            [Symbol::Terminal('a')].into_iter().collect()
        );
    }

    #[test]
    fn first_propagates_through_nullable_prefix() {
        let g = grammar(&["2", "S -> AB", "A -> e"]);
        // A can vanish, B has no productions listed so FIRST(B) stays empty,
        // but FIRST(S) must at least contain whatever FIRST(A) contributes
        // (epsilon is stripped) plus propagate through to B.
        let first = g.compute_first_sets();
        assert!(first.get(&Symbol::Nonterminal('A')).unwrap().contains(&Symbol::Epsilon));
    }

    #[test]
    fn follow_of_start_symbol_contains_end_marker() {
        let g = grammar(&["1", "S -> a"]);
        let first = g.compute_first_sets();
        let follow = g.compute_follow_sets(&first);
        assert!(follow
            .get(&Symbol::Nonterminal('S'))
            .unwrap()
            .contains(&Symbol::EndMarker));
    }

    #[test]
    fn follow_never_contains_epsilon() {
        let g = grammar(&["2", "S -> aS e", "S -> b"]);
        let first = g.compute_first_sets();
        let follow = g.compute_follow_sets(&first);
        for set in follow.values() {
            assert!(!set.contains(&Symbol::Epsilon));
        }
    }

    #[test]
    fn classic_epsilon_grammar_first_and_follow() {
        // S -> AaB, A -> bA | e, B -> cB | e
        let g = grammar(&[
            "5",
            "S -> AaB",
            "A -> bA",
            "A -> e",
            "B -> cB",
            "B -> e",
        ]);
        let first = g.compute_first_sets();
        let follow = g.compute_follow_sets(&first);

        let first_s = first.get(&Symbol::Nonterminal('S')).unwrap();
        assert!(first_s.contains(&Symbol::Terminal('a')));
        assert!(first_s.contains(&Symbol::Terminal('b')));
        assert!(!first_s.contains(&Symbol::Epsilon));

        let follow_a = follow.get(&Symbol::Nonterminal('A')).unwrap();
        assert!(follow_a.contains(&Symbol::Terminal('a')));

        let follow_b = follow.get(&Symbol::Nonterminal('B')).unwrap();
        assert!(follow_b.contains(&Symbol::EndMarker));
    }
}
