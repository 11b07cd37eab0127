//! Convenience boolean checks layered over the table builders (§8,
//! properties 4-5): a grammar "is LL(1)" iff its table constructs without
//! conflict, and likewise for SLR(1).

use crate::grammar::Grammar;
use crate::slr_table::SlrTable;
use crate::table::Ll1Table;

impl Grammar {
    /// Whether the LL(1) predictive table builds without conflict.
    pub fn is_ll1(&self) -> bool {
        let first = self.compute_first_sets();
        let follow = self.compute_follow_sets(&first);
        Ll1Table::build(self, &first, &follow).is_ok()
    }

    /// Whether the SLR(1) ACTION/GOTO tables build without conflict.
    pub fn is_slr1(&self) -> bool {
        let first = self.compute_first_sets();
        let follow = self.compute_follow_sets(&first);
        SlrTable::build(self, &follow).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsilon_grammar_is_ll1() {
        let grammar = Grammar::parse(["1", "S -> aSb e"].into_iter()).unwrap();
        assert!(grammar.is_ll1());
    }

    #[test]
    fn left_recursive_grammar_is_not_ll1_but_is_slr1() {
        let grammar = Grammar::parse(["2", "S -> Sa", "S -> a"].into_iter()).unwrap();
        assert!(!grammar.is_ll1());
        assert!(grammar.is_slr1());
    }

    #[test]
    fn grammar_with_no_terminating_alternative_is_neither() {
        let grammar = Grammar::parse(["2", "S -> A", "A -> A b"].into_iter()).unwrap();
        assert!(!grammar.is_ll1());
        assert!(!grammar.is_slr1());
    }
}
