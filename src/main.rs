use std::{fs, process::ExitCode};

use clap::Parser;
use vela::{Bindings, Interpreter, InterpreterConfig, evaluate, init_tracing};

/// VeLa is a small expression language for filtering and computing over
/// variable-star observations.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells vela to read the program from the file named by CONTENTS.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode prints the value of the program's final statement.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Binds NAME to VALUE before running; VALUE is itself a VeLa expression.
    #[arg(short, long = "bind", value_name = "NAME=VALUE")]
    bindings: Vec<String>,

    /// Maximum nesting of user-defined function calls.
    #[arg(long)]
    max_call_depth: Option<usize>,

    contents: String,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    let mut config = InterpreterConfig::default();
    if let Some(depth) = args.max_call_depth {
        config.max_call_depth = depth;
    }
    let mut vela = Interpreter::with_config(config);

    let bindings = match parse_bindings(&args.bindings) {
        Ok(bindings) => bindings,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        },
    };
    vela.push_environment(bindings);

    match vela.program(&script) {
        Ok(result) => {
            if args.pipe_mode
               && let Some(value) = result
            {
                println!("{}", value.to_human_readable_string());
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

/// Evaluates each `NAME=VALUE` argument into a binding.
fn parse_bindings(raw: &[String]) -> Result<Bindings, String> {
    let mut bindings = Bindings::new();
    for binding in raw {
        let Some((name, source)) = binding.split_once('=') else {
            return Err(format!("Expected NAME=VALUE, found '{binding}'"));
        };
        let value = evaluate(source).map_err(|e| format!("In binding '{name}': {e}"))?
                                    .ok_or_else(|| format!("Binding '{name}' has no value"))?;
        bindings.insert(name.trim(), value);
    }
    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use vela::Operand;

    use super::*;

    #[test]
    fn bindings_are_evaluated() {
        let bindings = parse_bindings(&["band=\"Vis\"".to_string(), "mag=9 + 0.5".to_string()]).unwrap();

        assert_eq!(bindings.get("band"), Some(&Operand::from("Vis")));
        assert_eq!(bindings.get("mag"), Some(&Operand::Real(9.5)));
    }

    #[test]
    fn malformed_binding_is_rejected() {
        assert!(parse_bindings(&["magnitude".to_string()]).is_err());
    }
}
