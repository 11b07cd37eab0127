//! Stack-driven shift-reduce SLR(1) recognition (§4.E).

use log::trace;

use crate::slr_table::{Action, SlrTable};
use crate::symbol::Symbol;

/// An SLR(1) parser: the ACTION/GOTO tables built from a grammar's
/// canonical LR(0) collection.
pub struct SlrParser<'t> {
    table: &'t SlrTable,
}

impl<'t> SlrParser<'t> {
    pub fn new(table: &'t SlrTable) -> Self {
        SlrParser { table }
    }

    /// Accepts or rejects `input` by stack-driven shift-reduce parsing.
    pub fn recognizes(&self, input: &str) -> bool {
        let mut symbols: Vec<Symbol> = input.chars().map(Symbol::from_char).collect();
        // 'e' and '$' are reserved by the character-to-symbol convention (§3)
        // and can never be terminals; an input character that symbolizes to
        // Epsilon or EndMarker would otherwise be indistinguishable from the
        // true appended sentinel once it is read as the lookahead.
        if symbols.iter().any(|s| s.is_epsilon() || s.is_end_marker()) {
            return false;
        }
        symbols.push(Symbol::EndMarker);

        let mut stack: Vec<usize> = vec![0];
        let mut pos = 0usize;

        loop {
            let state = *stack.last().expect("stack is never emptied");
            let lookahead = symbols[pos];

            trace!("state = {}, lookahead = {}", state, lookahead);

            match self.table.action(state, lookahead) {
                None => return false,
                Some(Action::Shift(next)) => {
                    stack.push(*next);
                    pos += 1;
                }
                Some(Action::Reduce { lhs, rhs }) => {
                    let pop_count = if *rhs == [Symbol::Epsilon] { 0 } else { rhs.len() };
                    let new_len = stack.len() - pop_count;
                    stack.truncate(new_len);

                    let top = *stack.last().expect("stack is never emptied");
                    match self.table.goto(top, *lhs) {
                        Some(next) => stack.push(next),
                        None => return false,
                    }
                }
                Some(Action::Accept) => return true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;

    fn build(lines: &[&str]) -> SlrTable {
        let grammar = Grammar::parse(lines.iter().copied()).unwrap();
        let first = grammar.compute_first_sets();
        let follow = grammar.compute_follow_sets(&first);
        SlrTable::build(&grammar, &follow).unwrap()
    }

    #[test]
    fn accepts_classic_arithmetic_expressions() {
        let table = build(&[
            "6",
            "S -> S+T",
            "S -> T",
            "T -> T*F",
            "T -> F",
            "F -> (S)",
            "F -> i",
        ]);
        let parser = SlrParser::new(&table);

        assert!(parser.recognizes("i+i"));
        assert!(parser.recognizes("(i)"));
        assert!(!parser.recognizes("(i+i)*i)"));
    }

    #[test]
    fn accepts_left_recursive_grammar() {
        let table = build(&["2", "S -> Sa", "S -> a"]);
        let parser = SlrParser::new(&table);
        assert!(parser.recognizes("a"));
        assert!(parser.recognizes("aa"));
        assert!(!parser.recognizes(""));
    }

    #[test]
    fn accepts_epsilon_derivable_grammar() {
        let table = build(&["1", "S -> aSb e"]);
        let parser = SlrParser::new(&table);
        assert!(parser.recognizes("aabb"));
        assert!(parser.recognizes("ab"));
        assert!(!parser.recognizes("aab"));
    }

    #[test]
    fn rejects_reserved_characters_in_input() {
        let table = build(&["2", "S -> Sa", "S -> a"]);
        let parser = SlrParser::new(&table);
        assert!(!parser.recognizes("a$"));
        assert!(!parser.recognizes("ae"));
    }
}
