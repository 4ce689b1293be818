use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;

use cryptoquip::{Dictionary, Hint, PieceOrder, Quip, SolverConfig};

macro_rules! time {
    ($e:expr) => {{
        let mut time = stopwatch::Stopwatch::start_new();
        let result = $e;
        time.stop();
        (time.elapsed(), result)
    }};
}

const SELF_TEST_CYPHERTEXT: &str = "Fict O ncc bivteclnbklzn O lcpji ukl pt vzglcddp";
const SELF_TEST_PLAINTEXT: &str = "When I see thunderstorms I reach for an umbrella";

/// Solve cryptoquips with a word block attack.
#[derive(Parser)]
#[command(name = "cryptoquip", version)]
struct Opts {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve one puzzle and print every solution found.
    Solve {
        /// The puzzle, punctuation and all. Quote it.
        cyphertext: String,

        /// The letter published with the puzzle, as cypher=plain, e.g. b=t.
        #[arg(long)]
        hint: Hint,

        /// Whitespace separated word list. Defaults to the small bundled list.
        #[arg(short, long)]
        dict: Option<PathBuf>,

        /// Order to visit the words of the puzzle in.
        #[arg(long, value_enum, default_value_t = Order::Phrase)]
        order: Order,

        /// Drop a guess as soon as it leaves some other word without candidates.
        #[arg(long)]
        forward_check: bool,

        /// Give up after this many search steps.
        #[arg(long)]
        node_limit: Option<u64>,
    },

    /// Solve a known puzzle against the bundled word list and check the answer.
    Selftest,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Order {
    Phrase,
    Fewest,
    Longest,
}

impl From<Order> for PieceOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Phrase => PieceOrder::Phrase,
            Order::Fewest => PieceOrder::FewestCandidates,
            Order::Longest => PieceOrder::LongestFirst,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    match Opts::parse().command {
        Command::Solve {
            cyphertext,
            hint,
            dict,
            order,
            forward_check,
            node_limit,
        } => {
            let dictionary = match dict {
                Some(path) => Dictionary::load(&path)
                    .with_context(|| format!("Failed to load dictionary {}", path.display()))?,
                None => Dictionary::bundled(),
            };

            let config = SolverConfig::default()
                .with_order(order.into())
                .with_forward_check(forward_check)
                .with_node_limit(node_limit);

            let quip = solve(&cyphertext, hint, &dictionary, config)?;
            if quip.solutions().is_empty() {
                println!("No solution found.");
            }
        }

        Command::Selftest => {
            let hint = Hint {
                cypher: 'b',
                plain: 't',
            };
            let quip = solve(
                SELF_TEST_CYPHERTEXT,
                hint,
                &Dictionary::bundled(),
                SolverConfig::default(),
            )?;

            if !quip.solutions().iter().any(|x| x == SELF_TEST_PLAINTEXT) {
                bail!("self test failed, expected {:?}", SELF_TEST_PLAINTEXT);
            }
            println!("Self test passed.");
        }
    }

    Ok(())
}

fn solve(
    cyphertext: &str,
    hint: Hint,
    dictionary: &Dictionary,
    config: SolverConfig,
) -> Result<Quip> {
    let (elapsed, quip) = time!(Quip::new(cyphertext, hint.cypher, hint.plain, dictionary));
    let mut quip = quip?.with_config(config);
    println!("Setup time: {:?}", elapsed);

    let (elapsed, _) = time!(quip.attempt_word_block_attack());
    debug!("{:?}", quip.stats());

    for solution in quip.solutions() {
        println!("{}", solution);
    }

    if quip.stats().truncated {
        println!("Search stopped after {} steps.", quip.stats().nodes);
    }

    println!("Elapsed: {:?}", elapsed);
    Ok(quip)
}
