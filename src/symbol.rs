//! The four-variant symbol alphabet shared by every grammar, FIRST/FOLLOW
//! computation, and both parser constructions.

use std::cmp::Ordering;
use std::fmt;

/// A single symbol appearing in a grammar, a FIRST/FOLLOW set, or on a parser
/// stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A terminal, carrying the single ASCII character it was read from.
    Terminal(char),
    /// A nonterminal, identified by its uppercase ASCII letter.
    Nonterminal(char),
    /// The empty string, written `ε` in derivations and `e` in grammar input.
    Epsilon,
    /// The end-of-input marker, conventionally drawn as `$`.
    EndMarker,
}

impl Symbol {
    /// Applies the character-to-symbol convention of the grammar input
    /// format: uppercase letters are nonterminals, `e` is epsilon, `$` is the
    /// end marker, everything else is a terminal.
    pub fn from_char(c: char) -> Symbol {
        if c == 'e' {
            Symbol::Epsilon
        } else if c == '$' {
            Symbol::EndMarker
        } else if c.is_ascii_uppercase() {
            Symbol::Nonterminal(c)
        } else {
            Symbol::Terminal(c)
        }
    }

    /// The start symbol, fixed by convention as `Nonterminal('S')`.
    pub fn start_symbol() -> Symbol {
        Symbol::Nonterminal('S')
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::Nonterminal(_))
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    pub fn is_end_marker(&self) -> bool {
        matches!(self, Symbol::EndMarker)
    }

    /// Rank used to order the four kinds relative to one another:
    /// Epsilon < Terminal < Nonterminal < EndMarker.
    fn kind_rank(&self) -> u8 {
        match self {
            Symbol::Epsilon => 0,
            Symbol::Terminal(_) => 1,
            Symbol::Nonterminal(_) => 2,
            Symbol::EndMarker => 3,
        }
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Symbol::Terminal(a), Symbol::Terminal(b)) => a.cmp(b),
            (Symbol::Nonterminal(a), Symbol::Nonterminal(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(c) => write!(f, "{}", c),
            Symbol::Nonterminal(c) => write!(f, "{}", c),
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::EndMarker => write!(f, "$"),
        }
    }
}
