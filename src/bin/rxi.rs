//! Interactive test-and-inspect driver for the regex engine:
//! `clap::Parser`-derived subcommands, `simple_logger` at `Warn`, errors
//! surfaced through `log::error!` rather than a panic.

use bytereg::{compiler, flags::RegexFlags, parser, MatchResult, Regex};
use clap::{Parser, Subcommand};
use log::error;

#[derive(Parser)]
#[command(name = "rxi", about = "Interactive driver for the byte-oriented regex engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reports whether the pattern matches anywhere in the text.
    Test {
        pattern: String,
        text: String,
        #[arg(short, long, default_value = "")]
        flags: String,
    },
    /// Prints the first match and its capture groups.
    Match {
        pattern: String,
        text: String,
        #[arg(short, long, default_value = "")]
        flags: String,
    },
    /// Prints every match. The `g` flag is added automatically if absent.
    MatchAll {
        pattern: String,
        text: String,
        #[arg(short, long, default_value = "")]
        flags: String,
    },
    /// Dumps the compiled bytecode for a pattern without running it.
    Dump {
        pattern: String,
        #[arg(short, long, default_value = "")]
        flags: String,
    },
}

fn main() {
    simple_logger::init_with_level(log::Level::Warn).expect("failed to initialize logger");
    let cli = Cli::parse();
    if let Err(message) = run(cli.command) {
        error!("{message}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Test { pattern, text, flags } => {
            let mut re = Regex::new(&pattern, &flags).map_err(|e| e.to_string())?;
            println!("{}", re.test(text.as_bytes()));
            Ok(())
        }
        Command::Match { pattern, text, flags } => {
            let mut re = Regex::new(&pattern, &flags).map_err(|e| e.to_string())?;
            match re.match_(text.as_bytes()) {
                Some(m) => print_match(&m, text.as_bytes()),
                None => println!("no match"),
            }
            Ok(())
        }
        Command::MatchAll { pattern, text, flags } => {
            let flags = if flags.contains('g') {
                flags
            } else {
                format!("{flags}g")
            };
            let mut re = Regex::new(&pattern, &flags).map_err(|e| e.to_string())?;
            let text_bytes = text.as_bytes();
            let matches: Vec<MatchResult> = re
                .match_all(text_bytes)
                .expect("global flag was just ensured above")
                .collect();
            if matches.is_empty() {
                println!("no match");
            }
            for m in &matches {
                print_match(m, text_bytes);
            }
            Ok(())
        }
        Command::Dump { pattern, flags } => {
            let ast = parser::parse(pattern.as_bytes()).map_err(|e| e.to_string())?;
            let group_count = ast.max_group_index() + 1;
            let program = compiler::compile(&ast, group_count, RegexFlags::parse(&flags));
            for (addr, instr) in program.instructions().iter().enumerate() {
                println!("{addr:4}: {instr:?}");
            }
            Ok(())
        }
    }
}

fn print_match(m: &MatchResult, text: &[u8]) {
    println!(
        "index {} : {}",
        m.index,
        String::from_utf8_lossy(m.full_match(text))
    );
    for i in 1..=m.group_count() {
        match m.group(i, text) {
            Some(group) => println!("  group {i}: {}", String::from_utf8_lossy(group)),
            None => println!("  group {i}: <unset>"),
        }
    }
}
