use proptest::prelude::*;
use vela::{Bindings, EvalErrorKind, Interpreter, Operand, evaluate};

const KEYWORDS: &[&str] = &["true", "false", "let", "const", "fun", "while", "if", "then", "else", "in"];

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("keywords are not identifiers", |name| {
                              !KEYWORDS.contains(&name.as_str())
                          })
}

/// Expressions that fail when evaluated.
fn failing_expression() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("1 / 0 = 0"),
                Just("undefined_name"),
                Just("no_such_function(1)"),
                Just("1 + \"a\" = 2"),
                Just("abs(1, 2) = 1"),]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Rendering an integer and evaluating the text gives the integer back.
    /// `i64::MIN` has no literal form (see `smallest_integer_is_not_a_literal`).
    #[test]
    fn integer_literals_round_trip(n in (i64::MIN + 1)..=i64::MAX) {
        let value = evaluate(&Operand::Integer(n).to_human_readable_string()).unwrap();
        prop_assert_eq!(value, Some(Operand::Integer(n)));
    }

    /// Scientific notation without an explicit `+` agrees with Rust's parser.
    #[test]
    fn scientific_literals_parse(mantissa in 0u32..100_000,
                                 fraction in 0u32..1000,
                                 negative_exponent in any::<bool>(),
                                 exponent in 0u32..40,
                                 upper in any::<bool>()) {
        let text = format!("{mantissa}.{fraction}{}{}{exponent}",
                           if upper { "E" } else { "e" },
                           if negative_exponent { "-" } else { "" });
        let expected: f64 = text.parse().unwrap();

        prop_assert_eq!(evaluate(&text).unwrap(), Some(Operand::Real(expected)));
    }

    /// The right operand of a decided `&` or `|` is never evaluated.
    #[test]
    fn short_circuit_skips_failing_operands(failing in failing_expression()) {
        prop_assert_eq!(evaluate(&format!("false & {failing}")).unwrap(),
                        Some(Operand::Boolean(false)));
        prop_assert_eq!(evaluate(&format!("true | {failing}")).unwrap(),
                        Some(Operand::Boolean(true)));
        let conjunction = format!("true & {failing}");
        prop_assert!(evaluate(&conjunction).is_err());
    }

    /// `p => q` is `!p | q`.
    #[test]
    fn implication_is_material(p in any::<bool>(), q in any::<bool>()) {
        let implication = evaluate(&format!("{p} => {q}")).unwrap();
        let expanded = evaluate(&format!("!{p} | {q}")).unwrap();

        prop_assert_eq!(implication, expanded);
    }

    /// A pushed binding shadows the outer one until it is popped.
    #[test]
    fn pushed_scopes_shadow(name in identifier(), outer in any::<i64>(), inner in any::<i64>()) {
        let mut vela = Interpreter::new();

        vela.push_environment(Bindings::new().with(name.as_str(), outer));
        vela.push_environment(Bindings::new().with(name.as_str(), inner));
        prop_assert_eq!(vela.program(&name).unwrap(), Some(Operand::Integer(inner)));

        vela.pop_environment().unwrap();
        prop_assert_eq!(vela.program(&name).unwrap(), Some(Operand::Integer(outer)));

        vela.pop_environment().unwrap();
        let fresh = Interpreter::new();
        prop_assert_eq!(vela.lookup(&name), fresh.lookup(&name));
    }

    /// One parsed program evaluates differently under different bindings.
    #[test]
    fn parsed_programs_are_reusable(a in -1000i64..1000, b in -1000i64..1000) {
        let mut vela = Interpreter::new();
        let program = vela.parse("magnitude * 2 + 1").unwrap();

        for value in [a, b] {
            vela.push_environment(Bindings::new().with("magnitude", value));
            prop_assert_eq!(vela.evaluate(&program).unwrap(),
                            Some(Operand::Integer(value * 2 + 1)));
            vela.pop_environment().unwrap();
        }
    }

    /// Integer addition and multiplication agree with checked `i64` arithmetic.
    #[test]
    fn integer_arithmetic_is_checked(a in any::<i64>(), b in any::<i64>()) {
        let mut vela = Interpreter::new();
        vela.push_environment(Bindings::new().with("a", a).with("b", b));

        for (source, expected) in [("a + b", a.checked_add(b)),
                                   ("a - b", a.checked_sub(b)),
                                   ("a * b", a.checked_mul(b))] {
            match expected {
                Some(n) => prop_assert_eq!(vela.program(source).unwrap(), Some(Operand::Integer(n))),
                None => prop_assert_eq!(vela.program(source).unwrap_err().eval_kind(),
                                        Some(EvalErrorKind::Overflow)),
            }
        }
    }

    /// Integers and reals of the same value are equal.
    #[test]
    fn equality_widens_integers(n in -1_000_000i64..1_000_000) {
        prop_assert_eq!(evaluate(&format!("{n} = {n}.0")).unwrap(), Some(Operand::Boolean(true)));
        prop_assert_eq!(evaluate(&format!("{n} < {n} + 0.5")).unwrap(), Some(Operand::Boolean(true)));
    }
}
