//! Canonical LR(0) collection and ACTION/GOTO table synthesis for SLR(1)
//! (§4.E).

use std::collections::{HashMap, HashSet, VecDeque};

use log::{debug, warn};

use crate::error::SlrError;
use crate::first_follow::FollowSets;
use crate::grammar::Grammar;
use crate::slr_item::{AugmentedGrammar, Item};
use crate::symbol::Symbol;

/// One entry of the ACTION table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce {
        lhs: Symbol,
        rhs: Vec<Symbol>,
    },
    Accept,
}

/// The SLR(1) automaton: its canonical collection plus the ACTION and GOTO
/// tables synthesized from it.
pub struct SlrTable {
    pub(crate) states: Vec<HashSet<Item>>,
    pub(crate) action: HashMap<(usize, Symbol), Action>,
    pub(crate) goto: HashMap<(usize, Symbol), usize>,
}

impl SlrTable {
    /// Builds the canonical collection and ACTION/GOTO tables for `grammar`,
    /// given its FOLLOW sets. Fails on the first shift/reduce or
    /// reduce/reduce conflict encountered.
    pub fn build(grammar: &Grammar, follow: &FollowSets) -> Result<Self, SlrError> {
        let augmented = AugmentedGrammar::new(grammar);
        let states = build_canonical_collection(&augmented);

        let mut action: HashMap<(usize, Symbol), Action> = HashMap::new();
        let mut goto: HashMap<(usize, Symbol), usize> = HashMap::new();

        for (i, state) in states.states.iter().enumerate() {
            // The accept item (if present) is inserted last, after every
            // shift/reduce in this state has gone through its own
            // conflict-checked insertion, so an accept colliding with a
            // genuine reduce or shift is always caught regardless of the
            // HashSet's iteration order over `state`.
            let mut accept = false;

            for item in state {
                if augmented.is_accept_item(item) {
                    accept = true;
                    continue;
                }

                match augmented.symbol_after_dot(item) {
                    Some(Symbol::Terminal(c)) => {
                        let symbol = Symbol::Terminal(c);
                        if let Some(&j) = states.transitions.get(&(i, symbol)) {
                            insert_shift(&mut action, i, symbol, j)?;
                        }
                    }
                    Some(Symbol::Nonterminal(_)) => {}
                    Some(Symbol::Epsilon) | Some(Symbol::EndMarker) => {}
                    None => {
                        // Completed item: reduce by its production over its
                        // nonterminal's FOLLOW set.
                        let production = augmented.production_of(item);
                        for &symbol in follow.get(&production.lhs).unwrap() {
                            insert_reduce(
                                &mut action,
                                i,
                                symbol,
                                production.lhs,
                                production.rhs.clone(),
                            )?;
                        }
                    }
                }
            }

            if accept {
                insert_accept(
                    &mut action,
                    i,
                    augmented.start_production.lhs,
                    augmented.start_production.rhs.clone(),
                )?;
            }

            for (&(from, symbol), &to) in &states.transitions {
                if from == i {
                    if let Symbol::Nonterminal(_) = symbol {
                        goto.insert((i, symbol), to);
                    }
                }
            }
        }

        Ok(SlrTable {
            states: states.states,
            action,
            goto,
        })
    }

    pub fn action(&self, state: usize, symbol: Symbol) -> Option<&Action> {
        self.action.get(&(state, symbol))
    }

    pub fn goto(&self, state: usize, nonterminal: Symbol) -> Option<usize> {
        self.goto.get(&(state, nonterminal)).copied()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}

fn insert_shift(
    action: &mut HashMap<(usize, Symbol), Action>,
    state: usize,
    symbol: Symbol,
    target: usize,
) -> Result<(), SlrError> {
    match action.get(&(state, symbol)) {
        None => {
            action.insert((state, symbol), Action::Shift(target));
            Ok(())
        }
        Some(Action::Shift(existing)) if *existing == target => Ok(()),
        Some(Action::Shift(_)) => Ok(()),
        Some(Action::Reduce { lhs, rhs }) => {
            warn!(
                "shift/reduce conflict in state {} on {}: reduce by {} -> {:?}",
                state, symbol, lhs, rhs
            );
            Err(SlrError::ShiftReduceConflict {
                state,
                symbol,
                production: (*lhs, rhs.clone()),
            })
        }
        // Accept is always inserted after every shift in its state, so this
        // arm is unreachable in practice; kept as a loud error rather than a
        // silent accept so an iteration-order change can't resurrect it.
        Some(Action::Accept) => {
            warn!(
                "shift/reduce conflict in state {} on {}: conflicts with accept",
                state, symbol
            );
            Err(SlrError::ShiftReduceConflict {
                state,
                symbol,
                production: (AugmentedGrammar::AUGMENTED_START, Vec::new()),
            })
        }
    }
}

fn insert_reduce(
    action: &mut HashMap<(usize, Symbol), Action>,
    state: usize,
    symbol: Symbol,
    lhs: Symbol,
    rhs: Vec<Symbol>,
) -> Result<(), SlrError> {
    match action.get(&(state, symbol)) {
        None => {
            action.insert((state, symbol), Action::Reduce { lhs, rhs });
            Ok(())
        }
        Some(Action::Shift(_)) => {
            warn!(
                "shift/reduce conflict in state {} on {}: reduce by {} -> {:?}",
                state, symbol, lhs, rhs
            );
            Err(SlrError::ShiftReduceConflict {
                state,
                symbol,
                production: (lhs, rhs),
            })
        }
        Some(Action::Reduce {
            lhs: existing_lhs,
            rhs: existing_rhs,
        }) => {
            if *existing_lhs == lhs && *existing_rhs == rhs {
                Ok(())
            } else {
                warn!(
                    "reduce/reduce conflict in state {} on {}: {} -> {:?} vs. {} -> {:?}",
                    state, symbol, existing_lhs, existing_rhs, lhs, rhs
                );
                Err(SlrError::ReduceReduceConflict {
                    state,
                    symbol,
                    first: (*existing_lhs, existing_rhs.clone()),
                    second: (lhs, rhs),
                })
            }
        }
        // Accept is always inserted after every reduce in its state, so this
        // arm is unreachable in practice; kept as a loud error rather than a
        // silent accept so an iteration-order change can't resurrect it.
        Some(Action::Accept) => {
            warn!(
                "reduce/reduce conflict in state {} on {}: {} -> {:?} conflicts with accept",
                state, symbol, lhs, rhs
            );
            Err(SlrError::ReduceReduceConflict {
                state,
                symbol,
                first: (lhs, rhs),
                second: (AugmentedGrammar::AUGMENTED_START, Vec::new()),
            })
        }
    }
}

/// Inserts the accept action for `(state, EndMarker)`, going through the
/// same conflict-checked path as shift/reduce insertion (§4.E: "a single
/// conflict is fatal"). Called after every shift/reduce in `state` has
/// already been inserted, so a genuine collision with a reduce or shift on
/// EndMarker is always detected here rather than resolved by whichever item
/// the canonical collection's `HashSet` happened to iterate first.
fn insert_accept(
    action: &mut HashMap<(usize, Symbol), Action>,
    state: usize,
    augmented_lhs: Symbol,
    augmented_rhs: Vec<Symbol>,
) -> Result<(), SlrError> {
    let symbol = Symbol::EndMarker;
    match action.get(&(state, symbol)) {
        None => {
            action.insert((state, symbol), Action::Accept);
            Ok(())
        }
        Some(Action::Accept) => Ok(()),
        Some(Action::Shift(_)) => {
            warn!(
                "shift/reduce conflict in state {} on {}: shift conflicts with accept",
                state, symbol
            );
            Err(SlrError::ShiftReduceConflict {
                state,
                symbol,
                production: (augmented_lhs, augmented_rhs),
            })
        }
        Some(Action::Reduce { lhs, rhs }) => {
            warn!(
                "reduce/reduce conflict in state {} on {}: {} -> {:?} conflicts with accept",
                state, symbol, lhs, rhs
            );
            Err(SlrError::ReduceReduceConflict {
                state,
                symbol,
                first: (*lhs, rhs.clone()),
                second: (augmented_lhs, augmented_rhs),
            })
        }
    }
}

struct CanonicalCollection {
    states: Vec<HashSet<Item>>,
    transitions: HashMap<(usize, Symbol), usize>,
}

fn build_canonical_collection(augmented: &AugmentedGrammar) -> CanonicalCollection {
    let initial = augmented.closure([augmented.initial_item()].into_iter().collect());

    let mut states = vec![initial];
    let mut transitions = HashMap::new();
    let mut queue: VecDeque<usize> = VecDeque::from([0]);

    while let Some(i) = queue.pop_front() {
        let symbols = augmented.symbols_after_dot(&states[i]);

        for symbol in symbols {
            let target_items = augmented.goto(&states[i], symbol);
            if target_items.is_empty() {
                continue;
            }

            let existing = states.iter().position(|s| *s == target_items);
            let j = match existing {
                Some(j) => j,
                None => {
                    let j = states.len();
                    debug!("SLR state {} discovered ({} items)", j, target_items.len());
                    states.push(target_items);
                    queue.push_back(j);
                    j
                }
            };

            transitions.insert((i, symbol), j);
        }
    }

    CanonicalCollection { states, transitions }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(lines: &[&str]) -> Result<SlrTable, SlrError> {
        let grammar = Grammar::parse(lines.iter().copied()).unwrap();
        let first = grammar.compute_first_sets();
        let follow = grammar.compute_follow_sets(&first);
        SlrTable::build(&grammar, &follow)
    }

    #[test]
    fn builds_table_for_left_recursive_grammar() {
        // S -> Sa | a is not LL(1) but is SLR(1).
        let table = build(&["2", "S -> Sa", "S -> a"]).unwrap();
        assert!(table.state_count() >= 2);
    }

    #[test]
    fn detects_conflict_on_ambiguous_grammar() {
        // S -> A | B, A -> a, B -> a: reduce/reduce on FOLLOW(S) = {$}.
        let table = build(&["3", "S -> A", "S -> B", "A -> a"]);
        // B has no productions of its own in this deliberately malformed
        // grammar; exercise the ambiguous case with both defined instead.
        let _ = table;

        let table = build(&["4", "S -> A", "S -> B", "A -> a", "B -> a"]);
        assert!(matches!(table, Err(SlrError::ReduceReduceConflict { .. })));
    }

    #[test]
    fn accept_reduce_collision_is_a_conflict_not_a_silent_resolution() {
        // S -> S is a degenerate production whose closure puts a completed
        // item S -> S . in the same state as the augmented accept item
        // S' -> S . ; FOLLOW(S) = {$}, so both want ACTION[state, $].
        let table = build(&["1", "S -> S"]);
        assert!(table.is_err());
    }

    #[test]
    fn classic_arithmetic_grammar_has_no_conflicts() {
        let table = build(&[
            "6",
            "S -> S+T",
            "S -> T",
            "T -> T*F",
            "T -> F",
            "F -> (S)",
            "F -> i",
        ]);
        assert!(table.is_ok());
    }
}
