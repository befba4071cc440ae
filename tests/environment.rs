use pretty_assertions::assert_eq;
use vela::{Bindings, EvalErrorKind, Interpreter, InterpreterConfig, Operand, VeLaError};

#[test]
fn pushed_bindings_are_visible_until_popped() {
    let mut vela = Interpreter::new();
    let base_depth = vela.scope_depth();

    vela.push_environment(Bindings::new().with("magnitude", 9.5).with("band", "Vis"));
    assert_eq!(vela.scope_depth(), base_depth + 1);
    assert!(vela.boolean_expression("magnitude < 10 & band = \"Vis\"").unwrap());

    let popped = vela.pop_environment().unwrap();
    assert_eq!(popped.get("magnitude"), Some(&Operand::Real(9.5)));
    assert_eq!(vela.scope_depth(), base_depth);

    let err = vela.program("magnitude").unwrap_err();
    assert_eq!(err.eval_kind(), Some(EvalErrorKind::UnknownVariable));
}

#[test]
fn inner_scopes_shadow_outer_ones() {
    let mut vela = Interpreter::new();
    vela.push_environment(Bindings::new().with("x", 1));
    vela.push_environment(Bindings::new().with("x", 2));

    assert_eq!(vela.real_expression("x").unwrap(), 2.0);
    vela.pop_environment().unwrap();
    assert_eq!(vela.real_expression("x").unwrap(), 1.0);
    vela.pop_environment().unwrap();
}

#[test]
fn let_writes_to_the_innermost_scope() {
    let mut vela = Interpreter::new();
    vela.push_environment(Bindings::new());

    vela.program("let scratch = 42").unwrap();
    assert_eq!(vela.lookup("scratch"), Some(&Operand::Integer(42)));

    let popped = vela.pop_environment().unwrap();
    assert_eq!(popped.get("scratch"), Some(&Operand::Integer(42)));
    assert_eq!(vela.lookup("scratch"), None);
}

#[test]
fn base_scope_cannot_be_popped() {
    let mut vela = Interpreter::new();

    let err = vela.pop_environment().unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::Internal);
    assert!(vela.lookup("abs").is_some());
}

#[test]
fn builtins_may_be_shadowed_by_pushed_scopes() {
    let mut vela = Interpreter::new();

    vela.push_environment(Bindings::new().with("PI", 3));
    assert_eq!(vela.program("PI").unwrap(), Some(Operand::Integer(3)));
    vela.pop_environment().unwrap();

    assert_eq!(vela.program("PI").unwrap(), Some(Operand::Real(std::f64::consts::PI)));
}

#[test]
fn bind_respects_constants() {
    let mut vela = Interpreter::new();

    vela.bind("limit", 10).unwrap();
    assert_eq!(vela.real_expression("limit * 2").unwrap(), 20.0);

    let err = vela.bind("sqrt", 1).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::ConstantRebinding);
}

#[test]
fn definitions_persist_between_programs() {
    let mut vela = Interpreter::new();

    vela.program("fun mag2flux(m) { pow(10, -0.4 * m) }").unwrap();
    let flux = vela.real_expression("mag2flux(0)").unwrap();

    assert!((flux - 1.0).abs() < 1e-12);
}

#[test]
fn failed_calls_leave_the_scope_stack_balanced() {
    let mut vela = Interpreter::new();
    let depth = vela.scope_depth();

    vela.program("fun boom(x) { x / 0 }").unwrap();
    assert!(vela.program("boom(1)").is_err());
    assert!(vela.program("fun f(n) { f(n + 1) }; f(0)").is_err());

    assert_eq!(vela.scope_depth(), depth);
    assert_eq!(vela.program("1 + 1").unwrap(), Some(Operand::Integer(2)));
}

#[test]
fn result_type_helpers() {
    let mut vela = Interpreter::new();

    assert!(vela.boolean_expression("1 < 2").unwrap());
    assert_eq!(vela.real_expression("7 / 2").unwrap(), 3.0);

    let err = vela.boolean_expression("1 + 1").unwrap_err();
    assert_eq!(err.eval_kind(), Some(EvalErrorKind::TypeMismatch));

    let err = vela.real_expression("\"nine\"").unwrap_err();
    assert_eq!(err.eval_kind(), Some(EvalErrorKind::TypeMismatch));

    let err = vela.real_expression("let x = 1").unwrap_err();
    assert_eq!(err.eval_kind(), Some(EvalErrorKind::MissingValue));

    let err = vela.real_expression("1 +").unwrap_err();
    assert!(err.is_parse_error());
}

#[test]
fn parsed_programs_are_cached_and_reusable() {
    let mut vela = Interpreter::new();

    let first = vela.parse("magnitude * 2").unwrap();
    let second = vela.parse("magnitude * 2").unwrap();
    assert!(std::rc::Rc::ptr_eq(&first, &second));
    assert_eq!(vela.cached_programs(), 1);

    for magnitude in [1, 2, 3] {
        vela.push_environment(Bindings::new().with("magnitude", magnitude));
        assert_eq!(vela.evaluate(&first).unwrap(), Some(Operand::Integer(magnitude * 2)));
        vela.pop_environment().unwrap();
    }

    vela.clear_cache();
    assert_eq!(vela.cached_programs(), 0);
}

#[test]
fn cache_is_bounded_and_optional() {
    let config = InterpreterConfig { max_cached_programs: 2,
                                     ..InterpreterConfig::default() };
    let mut vela = Interpreter::with_config(config);
    for source in ["1", "2", "3"] {
        vela.program(source).unwrap();
    }
    assert!(vela.cached_programs() <= 2);

    let config = InterpreterConfig { cache_programs: false,
                                     ..InterpreterConfig::default() };
    let mut vela = Interpreter::with_config(config);
    vela.program("1").unwrap();
    assert_eq!(vela.cached_programs(), 0);
}

#[test]
fn call_depth_is_configurable() {
    let config = InterpreterConfig { max_call_depth: 10,
                                     ..InterpreterConfig::default() };
    let mut vela = Interpreter::with_config(config);

    vela.program("fun depth(n) { if n = 0 then 0 else 1 + depth(n - 1) }").unwrap();
    assert_eq!(vela.program("depth(9)").unwrap(), Some(Operand::Integer(9)));
    assert_eq!(vela.program("depth(10)").unwrap_err().eval_kind(),
               Some(EvalErrorKind::StackOverflow));
}

#[test]
fn bindings_collect_from_iterators() {
    let bindings: Bindings = [("a", 1), ("b", 2)].into_iter().collect();
    let mut vela = Interpreter::new();
    vela.push_environment(bindings);

    assert_eq!(vela.program("a + b").unwrap(), Some(Operand::Integer(3)));
}

#[test]
fn errors_render_with_positions() {
    let mut vela = Interpreter::new();
    let err = vela.program("let x = 1;\nx + \"a\"").unwrap_err();

    assert!(matches!(err, VeLaError::Eval(_)));
    assert!(err.to_string().starts_with("Error on line 2"), "{err}");
}

#[test]
fn deeply_nested_lists_survive_comparison_rendering_and_drop() {
    let mut vela = Interpreter::new();
    vela.program("let x = {}; let i = 0; while i < 300000 { let x = {x}; let i = i + 1 }")
        .unwrap();

    assert_eq!(vela.program("x = x").unwrap(), Some(Operand::Boolean(true)));
    assert_eq!(vela.program("length(str(x))").unwrap(), Some(Operand::Integer(600_002)));

    let nested = vela.lookup("x").cloned().unwrap();
    assert!(nested == nested.clone());
    drop(vela);
    drop(nested);
}
