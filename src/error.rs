//! Crate-wide error taxonomy: one enum per construction phase, each
//! `Display`-able so `main` can collect them behind `Box<dyn std::error::Error>`.

use std::fmt;

use crate::symbol::Symbol;

/// Errors raised while parsing the textual grammar format.
#[derive(Debug)]
pub enum GrammarError {
    /// The input stream was empty.
    EmptyInput,
    /// The first line was not a positive integer.
    InvalidHeader(String),
    /// Fewer production lines were present than the header declared.
    TooFewProductionLines { expected: usize, found: usize },
    /// A production line was missing the ` -> ` separator.
    MissingArrow(String),
    /// A production line's left-hand side was not a single uppercase letter.
    InvalidLeftHandSide(String),
    /// A production line had no alternatives after the separator.
    EmptyRightHandSide(String),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GrammarError::EmptyInput => write!(f, "grammar input was empty"),
            GrammarError::InvalidHeader(line) => {
                write!(f, "expected a production count, found: {:?}", line)
            }
            GrammarError::TooFewProductionLines { expected, found } => write!(
                f,
                "expected {} production lines, found {}",
                expected, found
            ),
            GrammarError::MissingArrow(line) => {
                write!(f, "production line missing ' -> ' separator: {:?}", line)
            }
            GrammarError::InvalidLeftHandSide(line) => write!(
                f,
                "production left-hand side must be a single uppercase letter: {:?}",
                line
            ),
            GrammarError::EmptyRightHandSide(line) => {
                write!(f, "production has no alternatives: {:?}", line)
            }
        }
    }
}

impl std::error::Error for GrammarError {}

/// Errors raised while building the LL(1) predictive table.
#[derive(Debug)]
pub enum Ll1Error {
    /// Two productions both claim the cell `(nonterminal, lookahead)`.
    Conflict {
        nonterminal: Symbol,
        lookahead: Symbol,
        existing: Vec<Symbol>,
        incoming: Vec<Symbol>,
    },
}

impl fmt::Display for Ll1Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Ll1Error::Conflict {
                nonterminal,
                lookahead,
                existing,
                incoming,
            } => write!(
                f,
                "LL(1) conflict at M[{}, {}]: {} -> {:?} already present, cannot also place {} -> {:?}",
                nonterminal, lookahead, nonterminal, existing, nonterminal, incoming
            ),
        }
    }
}

impl std::error::Error for Ll1Error {}

/// Errors raised while synthesizing the SLR(1) ACTION/GOTO tables.
#[derive(Debug)]
pub enum SlrError {
    /// A shift and a reduce both want the same `(state, terminal)` cell.
    ShiftReduceConflict {
        state: usize,
        symbol: Symbol,
        production: (Symbol, Vec<Symbol>),
    },
    /// Two distinct reductions both want the same `(state, terminal)` cell.
    ReduceReduceConflict {
        state: usize,
        symbol: Symbol,
        first: (Symbol, Vec<Symbol>),
        second: (Symbol, Vec<Symbol>),
    },
}

impl fmt::Display for SlrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SlrError::ShiftReduceConflict {
                state,
                symbol,
                production,
            } => write!(
                f,
                "shift/reduce conflict in state {} on {}: shift vs. reduce by {} -> {:?}",
                state, symbol, production.0, production.1
            ),
            SlrError::ReduceReduceConflict {
                state,
                symbol,
                first,
                second,
            } => write!(
                f,
                "reduce/reduce conflict in state {} on {}: {} -> {:?} vs. {} -> {:?}",
                state, symbol, first.0, first.1, second.0, second.1
            ),
        }
    }
}

impl std::error::Error for SlrError {}
