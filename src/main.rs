//! zalgo-gen CLI - Command-line interface
//!
//! Commands:
//!   generate - Build the tables and predicate from an input document
//!   check    - Report whether a generated file is stale
//!   stats    - Show what minimization produced
//!   schema   - Print the input document JSON Schema

use std::path::Path;
use std::process::ExitCode;
use zalgo_gen::*;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "generate" => cmd_generate(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "stats" => cmd_stats(&args[2..]),
        "schema" => cmd_schema(),
        "version" | "--version" | "-v" => {
            println!("zalgo-gen {}", VERSION);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Err("Unknown command".into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"
zalgo-gen - zalgo mark tables and membership predicate generator

USAGE:
    zalgo-gen <COMMAND> [OPTIONS]

COMMANDS:
    generate <input>                 Generate the Rust source (stdout by default)
    check <input> <generated.rs>     Fail if the generated file is stale
    stats <input>                    Show the minimization report
    schema                           Print the input document JSON Schema
    version                          Print the version

OPTIONS:
    --output <file>                  Output file for generate (written atomically)
    --greedy                         Use greedy cover selection (generate, stats)
    --json                           JSON output (stats)

ENVIRONMENT:
    RUST_LOG=info|debug              Show pipeline progress (default: warn)

EXAMPLES:
    zalgo-gen generate data/zalgo-char-data.toml --output src/chars.rs
    zalgo-gen check data/zalgo-char-data.toml src/chars.rs
    zalgo-gen stats data/zalgo-char-data.toml --json
"#
    );
}

fn cmd_generate(args: &[String]) -> Result<()> {
    let input = parse_input_arg(args)
        .ok_or("Usage: zalgo-gen generate <input> [--output <file>] [--greedy]")?;
    let strategy = parse_strategy_arg(args);

    match parse_output_arg(args)? {
        Some(output) => {
            let artifact = generate_file(Path::new(input), Path::new(output), strategy)?;
            eprintln!(
                "Generated {} ({} clauses, {} members)",
                output, artifact.report.clauses, artifact.report.members
            );
        }
        None => {
            let artifact = load_generator(input, strategy)?.build()?;
            print!("{}", artifact.source);
        }
    }
    Ok(())
}

fn cmd_check(args: &[String]) -> Result<()> {
    if args.len() < 2 {
        return Err("Usage: zalgo-gen check <input> <generated.rs>".into());
    }

    let input = std::fs::read(&args[0])?;
    let artifact = std::fs::read_to_string(&args[1])?;

    if is_stale(&artifact, &input) {
        return Err(format!(
            "{} is stale, regenerate it from {}",
            args[1], args[0]
        )
        .into());
    }

    println!("✓ {} is up to date", args[1]);
    Ok(())
}

fn cmd_stats(args: &[String]) -> Result<()> {
    let input = parse_input_arg(args).ok_or("Usage: zalgo-gen stats <input> [--json] [--greedy]")?;
    let json_output = args.contains(&"--json".to_string());

    let artifact = load_generator(input, parse_strategy_arg(args))?.build()?;
    let report = &artifact.report;

    if json_output {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("Minimization report for {}\n", input);
    for (category, count) in &report.categories {
        println!("  {:<5} {}", category, count);
    }
    println!("  members          {}", report.members);
    println!("  prime implicants {}", report.prime_implicants);
    println!("  essential primes {}", report.essential_primes);
    println!("  core rows        {}", report.core_rows);
    println!("  clauses          {}", report.clauses);
    println!("  literals         {}", report.literals);
    match report.range {
        Some((min, max)) => println!("  range            U+{:04X}..=U+{:04X}", min, max),
        None => println!("  range            (empty)"),
    }
    println!(
        "  strategy         {}{}",
        match report.strategy {
            Strategy::Exact => "exact",
            Strategy::Greedy => "greedy",
        },
        if report.fell_back {
            " (fell back to greedy)"
        } else {
            ""
        }
    );
    Ok(())
}

fn cmd_schema() -> Result<()> {
    println!("{}", CharDocument::json_schema()?);
    Ok(())
}

fn load_generator(input: &str, strategy: Option<Strategy>) -> Result<Generator> {
    let generator = Generator::from_path(Path::new(input))?;
    Ok(match strategy {
        Some(strategy) => generator.with_strategy(strategy),
        None => generator,
    })
}

/// First argument that is neither a flag nor the value of `--output`
fn parse_input_arg(args: &[String]) -> Option<&str> {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--output" || arg == "-o" {
            skip_next = true;
        } else if !arg.starts_with('-') {
            return Some(arg.as_str());
        }
    }
    None
}

fn parse_strategy_arg(args: &[String]) -> Option<Strategy> {
    args.iter()
        .any(|a| a == "--greedy")
        .then_some(Strategy::Greedy)
}

fn parse_output_arg(args: &[String]) -> Result<Option<&str>> {
    for (i, arg) in args.iter().enumerate() {
        if arg == "--output" || arg == "-o" {
            return match args.get(i + 1) {
                Some(path) => Ok(Some(path.as_str())),
                None => Err("--output requires a file path".into()),
            };
        }
    }
    Ok(None)
}
