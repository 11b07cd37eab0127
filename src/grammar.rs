//! Grammar definition: productions over the four-variant [`Symbol`] alphabet,
//! plus the textual format parser of §4.A.

use std::collections::HashMap;
use std::collections::HashSet;

use log::debug;

use crate::error::GrammarError;
use crate::symbol::Symbol;

/// A single rewrite rule `lhs -> rhs`. A production with no symbols on its
/// right-hand side is never constructed; an empty alternative is represented
/// as the single-element sequence `[Symbol::Epsilon]`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Production {
    pub lhs: Symbol,
    pub rhs: Vec<Symbol>,
}

impl Production {
    /// The effective length of the right-hand side for dot-advancement and
    /// stack-pop purposes: an epsilon production has effective length 0.
    pub fn effective_len(&self) -> usize {
        if self.rhs == [Symbol::Epsilon] {
            0
        } else {
            self.rhs.len()
        }
    }
}

/// A context-free grammar: the ordered list of productions plus the symbol
/// inventories and an index from nonterminal to its productions, all
/// preserving source order.
#[derive(Debug, Clone)]
pub struct Grammar {
    productions: Vec<Production>,
    terminals: HashSet<Symbol>,
    non_terminals: HashSet<Symbol>,
    start_symbol: Symbol,
    productions_by_lhs: HashMap<Symbol, Vec<usize>>,
}

impl Grammar {
    /// An empty grammar with the fixed start symbol `S`.
    pub fn new() -> Self {
        Grammar {
            productions: Vec::new(),
            terminals: HashSet::new(),
            non_terminals: HashSet::new(),
            start_symbol: Symbol::start_symbol(),
            productions_by_lhs: HashMap::new(),
        }
    }

    /// Appends one production, updating the terminal/nonterminal inventories
    /// and the by-LHS index.
    pub fn add_production(&mut self, lhs: Symbol, rhs: Vec<Symbol>) {
        self.non_terminals.insert(lhs);

        for symbol in &rhs {
            match symbol {
                Symbol::Nonterminal(_) => {
                    self.non_terminals.insert(*symbol);
                }
                Symbol::Terminal(_) => {
                    self.terminals.insert(*symbol);
                }
                Symbol::Epsilon | Symbol::EndMarker => {}
            }
        }

        let index = self.productions.len();
        self.productions.push(Production { lhs, rhs });
        self.productions_by_lhs.entry(lhs).or_default().push(index);
    }

    /// Parses the §4.A textual grammar format: a count line followed by that
    /// many `X -> alt1 alt2 ...` production lines.
    pub fn parse<'a, I>(lines: I) -> Result<Grammar, GrammarError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut lines = lines.into_iter();

        let header = lines.next().ok_or(GrammarError::EmptyInput)?;
        let count: usize = header
            .trim()
            .parse()
            .map_err(|_| GrammarError::InvalidHeader(header.to_string()))?;

        let mut grammar = Grammar::new();
        let mut found = 0usize;

        for line in lines.by_ref().take(count) {
            let (lhs_part, rhs_part) = line
                .split_once(" -> ")
                .ok_or_else(|| GrammarError::MissingArrow(line.to_string()))?;

            let mut lhs_chars = lhs_part.chars();
            let lhs_char = lhs_chars
                .next()
                .filter(|c| c.is_ascii_uppercase())
                .ok_or_else(|| GrammarError::InvalidLeftHandSide(line.to_string()))?;
            if lhs_chars.next().is_some() {
                return Err(GrammarError::InvalidLeftHandSide(line.to_string()));
            }
            let lhs = Symbol::Nonterminal(lhs_char);

            let alternatives: Vec<&str> = rhs_part.split_whitespace().collect();
            if alternatives.is_empty() {
                return Err(GrammarError::EmptyRightHandSide(line.to_string()));
            }

            for alt in alternatives {
                let rhs: Vec<Symbol> = alt.chars().map(Symbol::from_char).collect();
                debug!("parsed production {} -> {:?}", lhs, rhs);
                grammar.add_production(lhs, rhs);
            }

            found += 1;
        }

        if found < count {
            return Err(GrammarError::TooFewProductionLines {
                expected: count,
                found,
            });
        }

        Ok(grammar)
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn terminals(&self) -> &HashSet<Symbol> {
        &self.terminals
    }

    pub fn non_terminals(&self) -> &HashSet<Symbol> {
        &self.non_terminals
    }

    pub fn start_symbol(&self) -> Symbol {
        self.start_symbol
    }

    /// The productions whose left-hand side is `nt`, in source order.
    pub fn productions_for(&self, nt: Symbol) -> impl Iterator<Item = &Production> {
        self.productions_by_lhs
            .get(&nt)
            .into_iter()
            .flatten()
            .map(move |&i| &self.productions[i])
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Grammar::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_simple_grammar() {
        let input = ["2", "S -> aS e", "S -> b"];
        let grammar = Grammar::parse(input.iter().copied()).unwrap();

        assert_eq!(grammar.productions().len(), 3);
        assert_eq!(grammar.start_symbol(), Symbol::Nonterminal('S'));
        assert!(grammar.terminals().contains(&Symbol::Terminal('a')));
        assert!(grammar.terminals().contains(&Symbol::Terminal('b')));
    }

    #[test]
    fn epsilon_alternative_becomes_single_element_rhs() {
        let input = ["1", "S -> e"];
        let grammar = Grammar::parse(input.iter().copied()).unwrap();
        assert_eq!(grammar.productions()[0].rhs, vec![Symbol::Epsilon]);
        assert_eq!(grammar.productions()[0].effective_len(), 0);
    }

    #[test]
    fn nonterminals_appearing_only_on_a_rhs_are_still_tracked() {
        let input = ["1", "S -> AB"];
        let grammar = Grammar::parse(input.iter().copied()).unwrap();
        assert!(grammar.non_terminals().contains(&Symbol::Nonterminal('A')));
        assert!(grammar.non_terminals().contains(&Symbol::Nonterminal('B')));
    }

    #[test]
    fn rejects_missing_arrow() {
        let input = ["1", "S => a"];
        assert!(matches!(
            Grammar::parse(input.iter().copied()),
            Err(GrammarError::MissingArrow(_))
        ));
    }

    #[test]
    fn rejects_too_few_production_lines() {
        let input = ["2", "S -> a"];
        assert!(matches!(
            Grammar::parse(input.iter().copied()),
            Err(GrammarError::TooFewProductionLines {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn rejects_empty_input() {
        let input: [&str; 0] = [];
        assert!(matches!(
            Grammar::parse(input.iter().copied()),
            Err(GrammarError::EmptyInput)
        ));
    }

    #[test]
    fn productions_for_preserves_source_order() {
        let input = ["3", "S -> a", "S -> b", "S -> c"];
        let grammar = Grammar::parse(input.iter().copied()).unwrap();
        let rhs: Vec<_> = grammar
            .productions_for(Symbol::Nonterminal('S'))
            .map(|p| p.rhs.clone())
            .collect();
        assert_eq!(
            rhs,
            vec![
                vec![Symbol::Terminal('a')],
                vec![Symbol::Terminal('b')],
                vec![Symbol::Terminal('c')],
            ]
        );
    }
}
