//! Pretty-table diagnostics (§6, ambient/non-normative): renders the
//! grammar, FIRST/FOLLOW sets, the LL(1) table, and the SLR(1) ACTION/GOTO
//! tables via `comfy-table`. None of this is reachable from the mandated
//! stdout protocol in `main` — it exists for interactive/debugging use only.

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};

use crate::first_follow::{FirstSets, FollowSets};
use crate::grammar::Grammar;
use crate::slr_table::{Action, SlrTable};
use crate::symbol::Symbol;
use crate::table::Ll1Table;

fn sorted<I: IntoIterator<Item = Symbol>>(symbols: I) -> Vec<Symbol> {
    let mut v: Vec<Symbol> = symbols.into_iter().collect();
    v.sort();
    v
}

impl Grammar {
    /// Renders each nonterminal's alternatives as `LHS -> alt1 | alt2 | ...`.
    pub fn to_comfy_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Nonterminal").add_attribute(Attribute::Bold),
            Cell::new("Productions").add_attribute(Attribute::Bold),
        ]);

        for nt in sorted(self.non_terminals().iter().copied()) {
            let alternatives: Vec<String> = self
                .productions_for(nt)
                .map(|p| {
                    p.rhs
                        .iter()
                        .map(|s| s.to_string())
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect();
            if alternatives.is_empty() {
                continue;
            }
            table.add_row(vec![nt.to_string(), alternatives.join(" | ")]);
        }

        table
    }
}

/// Renders a FIRST or FOLLOW map as a two-column table, one row per
/// nonterminal, sets printed in their canonical order.
fn sets_to_comfy_table(title: &str, sets: &std::collections::HashMap<Symbol, std::collections::HashSet<Symbol>>, nonterminals_only: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Symbol").add_attribute(Attribute::Bold),
        Cell::new(title).add_attribute(Attribute::Bold),
    ]);

    let mut symbols: Vec<Symbol> = sets.keys().copied().collect();
    if nonterminals_only {
        symbols.retain(|s| s.is_nonterminal());
    }
    symbols.sort();

    for symbol in symbols {
        let members = sorted(sets.get(&symbol).unwrap().iter().copied());
        let rendered = members
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![symbol.to_string(), rendered]);
    }

    table
}

/// Renders FIRST(X) for every nonterminal X.
pub fn first_sets_to_comfy_table(first: &FirstSets) -> Table {
    sets_to_comfy_table("FIRST", first, true)
}

/// Renders FOLLOW(A) for every nonterminal A.
pub fn follow_sets_to_comfy_table(follow: &FollowSets) -> Table {
    sets_to_comfy_table("FOLLOW", follow, false)
}

impl Ll1Table {
    /// Renders M[nonterminal, lookahead] as a grid, `_` for empty cells.
    pub fn to_comfy_table(&self) -> Table {
        let mut nonterminals: Vec<Symbol> = self
            .cells
            .keys()
            .map(|(nt, _)| *nt)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();
        nonterminals.sort();

        let mut lookaheads: Vec<Symbol> = self
            .cells
            .keys()
            .map(|(_, a)| *a)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();
        lookaheads.sort();

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        let mut header = vec![Cell::new("M").add_attribute(Attribute::Bold)];
        header.extend(lookaheads.iter().map(|a| Cell::new(a.to_string()).add_attribute(Attribute::Bold)));
        table.set_header(header);

        for nt in nonterminals {
            let mut row = vec![Cell::new(nt.to_string())];
            for &a in &lookaheads {
                let content = self
                    .cells
                    .get(&(nt, a))
                    .map(|p| {
                        let rhs = p.rhs.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(" ");
                        format!("{} -> {}", nt, rhs)
                    })
                    .unwrap_or_else(|| "_".to_string());
                row.push(Cell::new(content));
            }
            table.add_row(row);
        }

        table
    }
}

impl SlrTable {
    /// Renders ACTION and GOTO side by side, one row per state.
    pub fn to_comfy_table(&self) -> Table {
        let mut terminals: Vec<Symbol> = self
            .action
            .keys()
            .map(|(_, a)| *a)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();
        terminals.sort();

        let mut nonterminals: Vec<Symbol> = self
            .goto
            .keys()
            .map(|(_, nt)| *nt)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();
        nonterminals.sort();

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        let mut header = vec![Cell::new("State").add_attribute(Attribute::Bold)];
        header.extend(terminals.iter().map(|a| Cell::new(format!("action({})", a)).add_attribute(Attribute::Bold)));
        header.extend(nonterminals.iter().map(|nt| Cell::new(format!("goto({})", nt)).add_attribute(Attribute::Bold)));
        table.set_header(header);

        for state in 0..self.state_count() {
            let mut row = vec![Cell::new(state.to_string())];
            for &a in &terminals {
                let content = match self.action(state, a) {
                    Some(Action::Shift(j)) => format!("s{}", j),
                    Some(Action::Reduce { lhs, rhs }) => format!(
                        "r({} -> {})",
                        lhs,
                        rhs.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(" ")
                    ),
                    Some(Action::Accept) => "acc".to_string(),
                    None => "_".to_string(),
                };
                row.push(Cell::new(content));
            }
            for &nt in &nonterminals {
                let content = self
                    .goto(state, nt)
                    .map(|j| j.to_string())
                    .unwrap_or_else(|| "_".to_string());
                row.push(Cell::new(content));
            }
            table.add_row(row);
        }

        table
    }
}

impl std::fmt::Display for Ll1Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_comfy_table())
    }
}

impl std::fmt::Display for SlrTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_comfy_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_table_lists_every_nonterminal() {
        let grammar = Grammar::parse(["2", "S -> aS e", "S -> b"].into_iter()).unwrap();
        let rendered = grammar.to_comfy_table().to_string();
        assert!(rendered.contains('S'));
    }

    #[test]
    fn ll1_table_renders_without_panicking() {
        let grammar = Grammar::parse(["1", "S -> aSb e"].into_iter()).unwrap();
        let first = grammar.compute_first_sets();
        let follow = grammar.compute_follow_sets(&first);
        let table = Ll1Table::build(&grammar, &first, &follow).unwrap();
        let rendered = table.to_comfy_table().to_string();
        assert!(rendered.contains('S'));
    }

    #[test]
    fn slr_table_renders_without_panicking() {
        let grammar = Grammar::parse(["2", "S -> Sa", "S -> a"].into_iter()).unwrap();
        let first = grammar.compute_first_sets();
        let follow = grammar.compute_follow_sets(&first);
        let table = SlrTable::build(&grammar, &follow).unwrap();
        let rendered = table.to_comfy_table().to_string();
        assert!(rendered.contains("acc"));
    }
}
