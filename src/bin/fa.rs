use clap::{Arg, ArgAction, ArgMatches, Command};
use finite_automata::machines::{self, Machine};
use tracing::{debug, trace};
use tracing_subscriber::{filter, prelude::*};

fn cli() -> Command {
    let machine = Arg::new("machine")
        .required(true)
        .value_parser(machines::NAMES);
    let compile = Arg::new("compile")
        .short('c')
        .long("compile")
        .action(ArgAction::SetTrue)
        .help("determinize the machine before using it");

    Command::new("fa")
        .about("Runs and compiles finite automata")
        .subcommand_required(true)
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .global(true)
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .subcommand(Command::new("list").about("lists the available machines"))
        .subcommand(
            Command::new("run")
                .about("runs a machine on a word and reports whether it is accepted")
                .arg(machine.clone())
                .arg(Arg::new("word").default_value(""))
                .arg(compile.clone()),
        )
        .subcommand(
            Command::new("table")
                .about("prints the transition table of a machine")
                .arg(machine)
                .arg(compile),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

/// Looks up the machine named in `matches`, determinizing it if `--compile` is given.
fn load(matches: &ArgMatches) -> Result<Machine, String> {
    let name = matches
        .get_one::<String>("machine")
        .ok_or("no machine given")?;
    let machine = machines::by_name(name).ok_or_else(|| format!("unknown machine `{name}`"))?;
    if !matches.get_flag("compile") {
        return Ok(machine);
    }
    debug!("determinizing `{name}`");
    machine
        .into_nfa()
        .determinize()
        .map(Machine::Deterministic)
        .map_err(|e| e.to_string())
}

fn run(matches: &ArgMatches) -> Result<(), String> {
    let word = matches
        .get_one::<String>("word")
        .map(String::as_str)
        .unwrap_or_default();
    let machine = load(matches)?;
    match machine {
        Machine::Deterministic(dfa) => {
            let outcome = dfa.run(word.chars()).map_err(|e| e.to_string())?;
            println!("------ DFA Machine Summary ------");
            println!("{outcome}");
            println!(
                "Final state: {}",
                dfa.state_name(outcome.reached).unwrap_or("?")
            );
        }
        Machine::Nondeterministic(nfa) => {
            let outcome = nfa.run(word.chars()).map_err(|e| e.to_string())?;
            println!("------ NFA Machine Summary ------");
            println!("{outcome}");
            println!("Active states: {}", nfa.show_states(&outcome.reached));
        }
    }
    println!("Input: {word:?}");
    Ok(())
}

fn table(matches: &ArgMatches) -> Result<(), String> {
    match load(matches)? {
        Machine::Deterministic(dfa) => println!("{}", dfa.transition_table()),
        Machine::Nondeterministic(nfa) => println!("{}", nfa.transition_table()),
    }
    Ok(())
}

pub fn main() {
    let matches = cli().get_matches();

    setup_logging(&matches);

    let result = match matches.subcommand() {
        Some(("list", _)) => {
            for name in machines::NAMES {
                println!("{name}");
            }
            Ok(())
        }
        Some(("run", sub)) => run(sub),
        Some(("table", sub)) => table(sub),
        _ => unreachable!("a subcommand is required"),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
