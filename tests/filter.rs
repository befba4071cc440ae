use pretty_assertions::assert_eq;
use vela::{
    Bindings, EvalErrorKind, Interpreter,
    filter::{BindingSource, ErrorPolicy, Observation, ObservationFilter},
};

fn light_curve() -> Vec<Observation> {
    vec![Observation::new(2_459_000.5, 9.2, 0.1).with_band("Visual").with_obscode("ABC"),
         Observation::new(2_459_001.5, 11.4, 0.1).with_band("Visual").with_obscode("XYZ"),
         Observation::new(2_459_002.5, 9.8, 0.02).with_band("Johnson V").with_obscode("ABC"),
         Observation::new(2_459_003.5, 10.1, 0.3).with_band("Johnson B").with_obscode("DEF"),]
}

fn times(observations: &[Observation]) -> Vec<f64> {
    observations.iter().map(|ob| ob.time).collect()
}

#[test]
fn filter_selects_matching_observations() {
    let mut vela = Interpreter::new();
    let filter = ObservationFilter::new(&mut vela,
                                        "magnitude < 10 & obscode = \"ABC\"",
                                        ErrorPolicy::Abort).unwrap();

    let selected = filter.apply(&mut vela, &light_curve()).unwrap();

    assert_eq!(times(&selected), vec![2_459_000.5, 2_459_002.5]);
}

#[test]
fn filter_can_use_builtins_and_definitions() {
    let mut vela = Interpreter::new();
    vela.program("fun is_v(band) { band = \"Visual\" | endswith(band, \" V\") }").unwrap();
    let filter = ObservationFilter::new(&mut vela,
                                        "is_v(band) & uncertainty <= 0.1",
                                        ErrorPolicy::Abort).unwrap();

    let selected = filter.apply(&mut vela, &light_curve()).unwrap();

    assert_eq!(times(&selected), vec![2_459_000.5, 2_459_001.5, 2_459_002.5]);
}

#[test]
fn filter_leaves_the_scope_stack_balanced() {
    let mut vela = Interpreter::new();
    let depth = vela.scope_depth();
    let filter = ObservationFilter::new(&mut vela, "magnitude < limit", ErrorPolicy::Skip).unwrap();

    let selected = filter.apply(&mut vela, &light_curve()).unwrap();

    assert!(selected.is_empty());
    assert_eq!(vela.scope_depth(), depth);
    assert!(vela.lookup("magnitude").is_none());
}

#[test]
fn abort_policy_returns_the_first_error() {
    let mut vela = Interpreter::new();
    let observations = vec![Observation::new(1.0, 9.0, 0.1).with_field("comp", 12),
                            Observation::new(2.0, 9.0, 0.1).with_field("comp", "n/a")];
    let filter = ObservationFilter::new(&mut vela, "magnitude < comp", ErrorPolicy::Abort).unwrap();

    let err = filter.apply(&mut vela, &observations).unwrap_err();

    assert_eq!(err.kind, EvalErrorKind::TypeMismatch);
}

#[test]
fn skip_policy_drops_failing_items() {
    let mut vela = Interpreter::new();
    let observations = vec![Observation::new(1.0, 9.0, 0.1).with_field("comp", 12),
                            Observation::new(2.0, 9.0, 0.1).with_field("comp", "n/a"),
                            Observation::new(3.0, 13.0, 0.1).with_field("comp", 12)];
    let filter = ObservationFilter::new(&mut vela, "magnitude < comp", ErrorPolicy::Skip).unwrap();

    let selected = filter.apply(&mut vela, &observations).unwrap();

    assert_eq!(times(&selected), vec![1.0]);
}

#[test]
fn non_boolean_filters_are_type_errors() {
    let mut vela = Interpreter::new();
    let filter = ObservationFilter::new(&mut vela, "magnitude + 1", ErrorPolicy::Abort).unwrap();

    let err = filter.matches(&mut vela, &light_curve()[0]).unwrap_err();

    assert_eq!(err.kind, EvalErrorKind::TypeMismatch);
}

#[test]
fn malformed_filters_fail_to_compile() {
    let mut vela = Interpreter::new();

    let err = ObservationFilter::new(&mut vela, "magnitude <", ErrorPolicy::Skip).unwrap_err();

    assert!(err.is_parse_error());
}

#[test]
fn observation_bindings_expose_standard_and_extra_fields() {
    let ob = Observation::new(2_459_000.5, 9.2, 0.1).with_band("Visual")
                                                    .with_obscode("ABC")
                                                    .with_field("airmass", 1.3);
    let bindings = ob.bindings();

    assert_eq!(bindings.len(), 6);
    assert_eq!(bindings.get("band").map(ToString::to_string), Some("Visual".to_string()));
    assert_eq!(bindings.get("airmass").map(ToString::to_string), Some("1.3".to_string()));
}

#[test]
fn plain_bindings_are_a_binding_source() {
    let mut vela = Interpreter::new();
    let filter = ObservationFilter::new(&mut vela, "x > 1", ErrorPolicy::Abort).unwrap();
    let items = vec![Bindings::new().with("x", 1), Bindings::new().with("x", 2)];

    let selected = filter.apply(&mut vela, &items).unwrap();

    assert_eq!(selected, vec![Bindings::new().with("x", 2)]);
}
