use std::fs;

use vela::{Interpreter, Operand};
use walkdir::WalkDir;

#[test]
fn sample_scripts_evaluate_to_true() {
    let mut count = 0;

    for entry in
        WalkDir::new("scripts").into_iter()
                               .filter_map(Result::ok)
                               .filter(|e| e.path().extension().is_some_and(|ext| ext == "vela"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        match Interpreter::new().program(&source) {
            Ok(Some(Operand::Boolean(true))) => {},
            Ok(other) => panic!("Script {path:?} evaluated to {other:?}, expected true"),
            Err(e) => panic!("Script {path:?} failed:\n{source}\nError: {e}"),
        }
    }

    assert!(count > 0, "No VeLa scripts found in scripts/");
}
