//! Stack-driven LL(1) recognition (§4.D).

use log::trace;

use crate::grammar::Grammar;
use crate::symbol::Symbol;
use crate::table::Ll1Table;

/// An LL(1) parser: a grammar paired with its predictive table.
pub struct Ll1Parser<'g> {
    grammar: &'g Grammar,
    table: &'g Ll1Table,
}

impl<'g> Ll1Parser<'g> {
    pub fn new(grammar: &'g Grammar, table: &'g Ll1Table) -> Self {
        Ll1Parser { grammar, table }
    }

    /// Accepts or rejects `input` by stack-driven top-down parsing.
    pub fn recognizes(&self, input: &str) -> bool {
        let mut symbols: Vec<Symbol> = input.chars().map(Symbol::from_char).collect();
        // 'e' and '$' are reserved by the character-to-symbol convention (§3)
        // and can never be terminals; an input character that symbolizes to
        // Epsilon or EndMarker would otherwise be indistinguishable from the
        // true appended sentinel once it reaches the top of the stack.
        if symbols.iter().any(|s| s.is_epsilon() || s.is_end_marker()) {
            return false;
        }
        symbols.push(Symbol::EndMarker);

        let mut stack: Vec<Symbol> = vec![Symbol::EndMarker, self.grammar.start_symbol()];
        let mut pos = 0usize;

        loop {
            let top = *stack.last().expect("stack is never popped past EndMarker");
            let lookahead = symbols[pos];

            trace!("stack top = {}, lookahead = {}", top, lookahead);

            match top {
                Symbol::EndMarker if lookahead == Symbol::EndMarker => return true,
                Symbol::Terminal(_) | Symbol::EndMarker => {
                    if top == lookahead {
                        stack.pop();
                        pos += 1;
                    } else {
                        return false;
                    }
                }
                Symbol::Nonterminal(_) => {
                    let Some(production) = self.table.get(top, lookahead) else {
                        return false;
                    };
                    stack.pop();
                    if production.rhs != [Symbol::Epsilon] {
                        for &symbol in production.rhs.iter().rev() {
                            stack.push(symbol);
                        }
                    }
                }
                Symbol::Epsilon => unreachable!("epsilon is never pushed onto the stack"),
            }
        }
    }
}
