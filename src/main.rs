pub mod driver;
pub mod error;
pub mod first_follow;
pub mod grammar;
pub mod parser;
pub mod print;
pub mod slr_item;
pub mod slr_parser;
pub mod slr_table;
pub mod symbol;
pub mod table;
pub mod validation;

use std::error::Error;
use std::io::{self, BufRead, Write};

use log::{error, info};

use driver::{Classification, Driver};
use grammar::Grammar;

/// Reads the §4.A grammar block from `lines`: a count, then that many
/// production lines.
fn read_grammar_block(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<Grammar, Box<dyn Error>> {
    let header = match lines.next() {
        Some(line) => line?,
        None => return Ok(Grammar::parse(std::iter::empty::<&str>())?),
    };

    let mut block = vec![header.clone()];
    if let Ok(count) = header.trim().parse::<usize>() {
        for _ in 0..count {
            match lines.next() {
                Some(line) => block.push(line?),
                None => break,
            }
        }
    }

    Ok(Grammar::parse(block.iter().map(|s| s.as_str()))?)
}

/// Reads input strings from `lines` until an empty line or EOF, printing
/// `yes`/`no` per `recognize`'s verdict (§6, §8 boundary behavior: EOF
/// terminates the block exactly as an empty line does).
fn run_string_block(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    mut recognize: impl FnMut(&str) -> bool,
) {
    loop {
        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => return,
        };
        if line.is_empty() {
            return;
        }
        println!("{}", if recognize(&line) { "yes" } else { "no" });
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let grammar = match read_grammar_block(&mut lines) {
        Ok(grammar) => grammar,
        Err(e) => {
            error!("fatal error while reading the grammar block: {}", e);
            return Err(e);
        }
    };
    info!("grammar parsed: {} productions", grammar.productions().len());

    let driver = Driver::new(grammar);
    let classification = driver.classification();
    info!("dispatching on classification: {:?}", classification);

    match classification {
        Classification::Both => loop {
            print!("Select a parser (T: for LL(1), B: for SLR(1), Q: quit):\n");
            io::stdout().flush()?;

            let selection = match lines.next() {
                Some(Ok(line)) => line,
                _ => break,
            };

            match selection.trim() {
                "T" | "t" => {
                    run_string_block(&mut lines, |s| driver.recognize_ll1(s).unwrap_or(false))
                }
                "B" | "b" => {
                    run_string_block(&mut lines, |s| driver.recognize_slr1(s).unwrap_or(false))
                }
                "Q" | "q" => break,
                _ => continue,
            }
        },
        Classification::Ll1Only => {
            println!("{}", classification.announcement().unwrap());
            run_string_block(&mut lines, |s| driver.recognize_ll1(s).unwrap_or(false));
        }
        Classification::Slr1Only => {
            println!("{}", classification.announcement().unwrap());
            run_string_block(&mut lines, |s| driver.recognize_slr1(s).unwrap_or(false));
        }
        Classification::Neither => {
            println!("{}", classification.announcement().unwrap());
        }
    }

    Ok(())
}
