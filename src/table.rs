//! LL(1) predictive table construction (§4.D).

use std::collections::HashMap;

use log::{debug, warn};

use crate::error::Ll1Error;
use crate::first_follow::{first_of_sequence, FirstSets, FollowSets};
use crate::grammar::{Grammar, Production};
use crate::symbol::Symbol;

/// The LL(1) predictive parsing table: M[nonterminal, lookahead] -> production.
#[derive(Debug, Clone)]
pub struct Ll1Table {
    pub(crate) cells: HashMap<(Symbol, Symbol), Production>,
}

impl Ll1Table {
    /// Builds the table for `grammar`, given its already-computed FIRST and
    /// FOLLOW sets. Fails with [`Ll1Error::Conflict`] on the first cell that
    /// would receive two productions.
    pub fn build(
        grammar: &Grammar,
        first: &FirstSets,
        follow: &FollowSets,
    ) -> Result<Self, Ll1Error> {
        let mut cells: HashMap<(Symbol, Symbol), Production> = HashMap::new();

        for production in grammar.productions() {
            let first_of_rhs = first_of_sequence(&production.rhs, first);

            for &lookahead in first_of_rhs.iter().filter(|s| !s.is_epsilon()) {
                Self::insert(&mut cells, production.lhs, lookahead, production)?;
            }

            if first_of_rhs.contains(&Symbol::Epsilon) {
                for &lookahead in follow.get(&production.lhs).unwrap() {
                    Self::insert(&mut cells, production.lhs, lookahead, production)?;
                }
            }
        }

        Ok(Ll1Table { cells })
    }

    fn insert(
        cells: &mut HashMap<(Symbol, Symbol), Production>,
        nonterminal: Symbol,
        lookahead: Symbol,
        production: &Production,
    ) -> Result<(), Ll1Error> {
        let key = (nonterminal, lookahead);
        if let Some(existing) = cells.get(&key) {
            if existing.rhs != production.rhs {
                warn!(
                    "LL(1) conflict at M[{}, {}]: {:?} vs. {:?}",
                    nonterminal, lookahead, existing.rhs, production.rhs
                );
                return Err(Ll1Error::Conflict {
                    nonterminal,
                    lookahead,
                    existing: existing.rhs.clone(),
                    incoming: production.rhs.clone(),
                });
            }
            return Ok(());
        }
        debug!(
            "M[{}, {}] = {} -> {:?}",
            nonterminal, lookahead, nonterminal, production.rhs
        );
        cells.insert(key, production.clone());
        Ok(())
    }

    /// Looks up the production for `(nonterminal, lookahead)`, if any.
    pub fn get(&self, nonterminal: Symbol, lookahead: Symbol) -> Option<&Production> {
        self.cells.get(&(nonterminal, lookahead))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(lines: &[&str]) -> Result<Ll1Table, Ll1Error> {
        let grammar = Grammar::parse(lines.iter().copied()).unwrap();
        let first = grammar.compute_first_sets();
        let follow = grammar.compute_follow_sets(&first);
        Ll1Table::build(&grammar, &first, &follow)
    }

    #[test]
    fn builds_table_for_epsilon_grammar() {
        let table = build(&["2", "S -> aS e", "S -> b"]);
        assert!(table.is_ok());
    }

    #[test]
    fn detects_first_first_conflict_from_left_recursion() {
        // S -> Sa | a : FIRST(Sa) and FIRST(a) both contain 'a'.
        let table = build(&["2", "S -> Sa", "S -> a"]);
        assert!(matches!(table, Err(Ll1Error::Conflict { .. })));
    }

    #[test]
    fn accepts_classic_ll1_ambiguity_grammar() {
        // S -> aSb | e is LL(1): FIRST(aSb) = {a}, FIRST(e) = {e}, and
        // FOLLOW(S) = {$, b} is disjoint from {a}.
        let table = build(&["2", "S -> aSb", "S -> e"]);
        assert!(table.is_ok());
    }
}
