//! Drives construction of both parsers and dispatches to the four outcome
//! cases (§4.F).

use log::info;

use crate::grammar::Grammar;
use crate::parser::Ll1Parser;
use crate::slr_parser::SlrParser;
use crate::table::Ll1Table;
use crate::slr_table::SlrTable;

/// Which parser(s) a grammar admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Both,
    Ll1Only,
    Slr1Only,
    Neither,
}

impl Classification {
    /// The announcement line mandated by §6, or `None` in the `Both` case
    /// (where the selection prompt is printed instead).
    pub fn announcement(&self) -> Option<&'static str> {
        match self {
            Classification::Both => None,
            Classification::Ll1Only => Some("Grammar is LL(1)."),
            Classification::Slr1Only => Some("Grammar is SLR(1)."),
            Classification::Neither => Some("Grammar is neither LL(1) nor SLR(1)."),
        }
    }
}

/// Owns a grammar and whichever of the two parser tables could be built for
/// it, and answers acceptance queries against either.
pub struct Driver {
    grammar: Grammar,
    ll1_table: Option<Ll1Table>,
    slr_table: Option<SlrTable>,
}

impl Driver {
    /// Computes FIRST and FOLLOW, then attempts both constructions.
    /// Neither attempt's failure is fatal: a conflict simply means that
    /// parser is unavailable.
    pub fn new(grammar: Grammar) -> Self {
        let first = grammar.compute_first_sets();
        info!("computed FIRST sets for {} nonterminals", first.len());
        let follow = grammar.compute_follow_sets(&first);
        info!("computed FOLLOW sets for {} nonterminals", follow.len());

        let ll1_table = match Ll1Table::build(&grammar, &first, &follow) {
            Ok(table) => {
                info!("LL(1) table constructed");
                Some(table)
            }
            Err(e) => {
                info!("LL(1) construction failed: {}", e);
                None
            }
        };

        let slr_table = match SlrTable::build(&grammar, &follow) {
            Ok(table) => {
                info!("SLR(1) table constructed ({} states)", table.state_count());
                Some(table)
            }
            Err(e) => {
                info!("SLR(1) construction failed: {}", e);
                None
            }
        };

        Driver {
            grammar,
            ll1_table,
            slr_table,
        }
    }

    pub fn classification(&self) -> Classification {
        match (self.ll1_table.is_some(), self.slr_table.is_some()) {
            (true, true) => Classification::Both,
            (true, false) => Classification::Ll1Only,
            (false, true) => Classification::Slr1Only,
            (false, false) => Classification::Neither,
        }
    }

    pub fn has_ll1(&self) -> bool {
        self.ll1_table.is_some()
    }

    pub fn has_slr1(&self) -> bool {
        self.slr_table.is_some()
    }

    /// Accepts or rejects `input` using the LL(1) parser, if one was built.
    pub fn recognize_ll1(&self, input: &str) -> Option<bool> {
        let table = self.ll1_table.as_ref()?;
        Some(Ll1Parser::new(&self.grammar, table).recognizes(input))
    }

    /// Accepts or rejects `input` using the SLR(1) parser, if one was built.
    pub fn recognize_slr1(&self, input: &str) -> Option<bool> {
        let table = self.slr_table.as_ref()?;
        Some(SlrParser::new(table).recognizes(input))
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }
}
