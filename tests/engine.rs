use symba::{
    Environment,
    ast::{Expr, ExprRef},
    parse_expression, run_source,
};

/// Parses and evaluates source in a fresh environment.
fn eval_fresh(source: &str) -> ExprRef {
    let mut env = Environment::new();
    run_source(source, &mut env).unwrap_or_else(|e| panic!("evaluation of {source:?} failed: {e}"))
}

/// Parses and evaluates source with the given numeric variables bound.
fn eval_bound(source: &str, vars: &[(&str, f64)]) -> ExprRef {
    let mut env = Environment::new();
    for (name, value) in vars {
        env.variables.insert((*name).to_string(), Expr::number(*value));
    }
    run_source(source, &mut env).unwrap_or_else(|e| panic!("evaluation of {source:?} failed: {e}"))
}

/// Parses source and prints it back in surface form.
fn printed(source: &str) -> String {
    parse_expression(source).unwrap_or_else(|e| panic!("parsing {source:?} failed: {e}"))
                            .to_string()
}

/// Extracts a numeric result or fails the test.
fn numeric(expr: &ExprRef) -> f64 {
    expr.number_value()
        .unwrap_or_else(|| panic!("expected a numeric result, got {expr}"))
}

/// Evaluates source expecting an error, and returns its message.
fn error_message(source: &str) -> String {
    let mut env = Environment::new();
    match run_source(source, &mut env) {
        Err(e) => e.to_string(),
        Ok(v) => panic!("evaluation of {source:?} succeeded with {v}, expected an error"),
    }
}

// Parser: surface forms and tree shapes.

#[test]
fn basic_expressions_round_trip() {
    for source in ["2 + 3", "-2 + 3", "2 + -3", "x + 1", "sin[x]", "sin[-x]",
                   "max[-2, min[-3, -4]]", "2^3", "-2^3", "2^-3", "exp[1]", "floor[3.7]",
                   "ceil[3.2]", "round[3.5]"]
    {
        assert_eq!(printed(source), source);
        // Reparsing the printed form gives the same tree.
        assert_eq!(parse_expression(&printed(source)).unwrap(),
                   parse_expression(source).unwrap(),
                   "round-trip changed the tree for {source:?}");
    }
}

#[test]
fn implicit_multiplication_of_number_and_symbol() {
    let expr = parse_expression("2x").unwrap();
    assert_eq!(expr,
               Expr::call("Times", vec![Expr::number(2.0), Expr::symbol("x")]));
}

#[test]
fn implicit_multiplication_absorbs_the_sign() {
    let expr = parse_expression("-2x").unwrap();
    assert_eq!(expr,
               Expr::call("Times", vec![Expr::number(-2.0), Expr::symbol("x")]));
}

#[test]
fn implicit_multiplication_with_parentheses() {
    let expr = parse_expression("2(3 + x)").unwrap();
    let sum = Expr::call("Plus", vec![Expr::number(3.0), Expr::symbol("x")]);
    assert_eq!(expr, Expr::call("Times", vec![Expr::number(2.0), sum]));
}

#[test]
fn assignments_parse_into_assignment_nodes() {
    let expr = parse_expression("x = 2").unwrap();
    assert_eq!(*expr,
               Expr::Assignment { name:  "x".to_string(),
                                  value: Expr::number(2.0), });
}

#[test]
fn if_parses_as_a_plain_call_form() {
    let expr = parse_expression("If[x == 0, 1, 2]").unwrap();
    let condition = Expr::call("Equal", vec![Expr::symbol("x"), Expr::number(0.0)]);
    assert_eq!(expr,
               Expr::call("If", vec![condition, Expr::number(1.0), Expr::number(2.0)]));
}

#[test]
fn logical_operators_parse_with_correct_precedence() {
    assert_eq!(parse_expression("True && False").unwrap(),
               Expr::call("And", vec![Expr::boolean(true), Expr::boolean(false)]));

    assert_eq!(parse_expression("x && y").unwrap(),
               Expr::call("And", vec![Expr::symbol("x"), Expr::symbol("y")]));

    // `&&` binds tighter than `||`.
    let and = Expr::call("And", vec![Expr::boolean(true), Expr::boolean(false)]);
    assert_eq!(parse_expression("True && False || True").unwrap(),
               Expr::call("Or", vec![and, Expr::boolean(true)]));

    let or = Expr::call("Or", vec![Expr::boolean(true), Expr::boolean(false)]);
    assert_eq!(parse_expression("(True || False) && x").unwrap(),
               Expr::call("And", vec![or, Expr::symbol("x")]));
}

#[test]
fn chained_string_joins_flatten() {
    assert_eq!(parse_expression("\"Hello\" <> \" \" <> \"World\"").unwrap(),
               Expr::call("StringJoin",
                          vec![Expr::string("Hello"), Expr::string(" "), Expr::string("World")]));
}

#[test]
fn rules_parse_below_string_joins() {
    let expr = parse_expression("\"a\" <> \"b\" -> \"c\"").unwrap();
    let join = Expr::call("StringJoin", vec![Expr::string("a"), Expr::string("b")]);
    assert_eq!(*expr,
               Expr::Rule { lhs: join,
                            rhs: Expr::string("c"), });
}

#[test]
fn rules_are_ordinary_call_arguments() {
    let expr = parse_expression("StringReplace[\"Hello World\", \"World\" -> \"Moon\"]").unwrap();
    let Expr::FunctionCall { head, args } = &*expr else {
        panic!("expected a call form, got {expr}");
    };
    assert_eq!(head, "StringReplace");
    assert_eq!(args.len(), 2);
    assert!(matches!(&*args[1], Expr::Rule { .. }));
}

#[test]
fn list_literals_parse_into_the_list_call_form() {
    assert_eq!(parse_expression("{1, 2, 3}").unwrap(),
               Expr::call("List",
                          vec![Expr::number(1.0), Expr::number(2.0), Expr::number(3.0)]));

    assert_eq!(parse_expression("{}").unwrap(), Expr::call("List", Vec::new()));

    let inner = Expr::call("List", vec![Expr::number(2.0), Expr::number(3.0)]);
    assert_eq!(parse_expression("{1, {2, 3}, 4}").unwrap(),
               Expr::call("List", vec![Expr::number(1.0), inner, Expr::number(4.0)]));

    assert_eq!(parse_expression("{1, \"hello\", True, x}").unwrap(),
               Expr::call("List",
                          vec![Expr::number(1.0),
                               Expr::string("hello"),
                               Expr::boolean(true),
                               Expr::symbol("x")]));
}

#[test]
fn lists_nest_inside_calls_and_expressions() {
    let expr = parse_expression("f[{1, 2}, 3]").unwrap();
    let list = Expr::call("List", vec![Expr::number(1.0), Expr::number(2.0)]);
    assert_eq!(expr, Expr::call("f", vec![list, Expr::number(3.0)]));

    let expr = parse_expression("{1+2, x^2, f[3]}").unwrap();
    let Expr::FunctionCall { head, args } = &*expr else {
        panic!("expected a call form, got {expr}");
    };
    assert_eq!(head, "List");
    assert!(args[0].is_call_to("Plus"));
    assert!(args[1].is_call_to("Power"));
    assert!(args[2].is_call_to("f"));
}

#[test]
fn constant_names_parse_as_plain_symbols() {
    for name in ["Pi", "E", "Degree", "GoldenRatio", "Catalan", "EulerGamma", "Infinity"] {
        let expr = parse_expression(name).unwrap();
        assert!(expr.is_symbol_named(name), "{name} did not parse as a symbol");
    }
}

#[test]
fn division_binds_whole_products_in_the_denominator() {
    // input, denominator coefficient, numerator symbol, denominator symbol
    let cases = [("x/-3x", -3.0, "x", "x"),
                 ("y/2y", 2.0, "y", "y"),
                 ("a/-b", -1.0, "a", "b"),
                 ("z/4w", 4.0, "z", "w"),
                 ("t/-7t", -7.0, "t", "t"),
                 ("m/(-2m)", -2.0, "m", "m"),
                 ("p/(-q)", -1.0, "p", "q")];

    for (source, coefficient, numerator, denominator) in cases {
        let expected =
            Expr::call("Divide",
                       vec![Expr::symbol(numerator),
                            Expr::call("Times",
                                       vec![Expr::number(coefficient),
                                            Expr::symbol(denominator)])]);
        assert_eq!(parse_expression(source).unwrap(), expected, "wrong tree for {source:?}");
    }
}

#[test]
fn parenthesised_denominators_are_used_verbatim() {
    // A single alphanumeric word is one symbol, not a product.
    let expr = parse_expression("-a/(bC)").unwrap();
    let numerator = Expr::call("Times", vec![Expr::number(-1.0), Expr::symbol("a")]);
    assert_eq!(expr, Expr::call("Divide", vec![numerator.clone(), Expr::symbol("bC")]));

    // With a space, juxtaposition makes it a product.
    let expr = parse_expression("-a/(b C)").unwrap();
    let product = Expr::call("Times", vec![Expr::symbol("b"), Expr::symbol("C")]);
    assert_eq!(expr, Expr::call("Divide", vec![numerator, product]));

    // Arbitrary expressions pass through unchanged.
    let expr = parse_expression("-2/(x^2)").unwrap();
    let power = Expr::call("Power", vec![Expr::symbol("x"), Expr::number(2.0)]);
    assert_eq!(expr, Expr::call("Divide", vec![Expr::number(-2.0), power]));

    let expr = parse_expression("-x/(y+z)").unwrap();
    let sum = Expr::call("Plus", vec![Expr::symbol("y"), Expr::symbol("z")]);
    let negated_x = Expr::call("Times", vec![Expr::number(-1.0), Expr::symbol("x")]);
    assert_eq!(expr, Expr::call("Divide", vec![negated_x, sum]));

    let expr = parse_expression("-3/(Sin[x])").unwrap();
    let sin = Expr::call("Sin", vec![Expr::symbol("x")]);
    assert_eq!(expr, Expr::call("Divide", vec![Expr::number(-3.0), sin]));

    let expr = parse_expression("-a/(b_c)").unwrap();
    let numerator = Expr::call("Times", vec![Expr::number(-1.0), Expr::symbol("a")]);
    assert_eq!(expr, Expr::call("Divide", vec![numerator, Expr::symbol("b_c")]));
}

#[test]
fn malformed_input_is_rejected() {
    assert!(parse_expression("2 +").is_err());
    assert!(parse_expression("(1 + 2").is_err());
    assert!(parse_expression("{1, 2").is_err());
    assert!(parse_expression("f[1, 2").is_err());
    assert!(parse_expression("\"abc").is_err());
    // Number-number juxtaposition is not a product.
    assert!(parse_expression("2 3").is_err());
}

// Evaluator: arithmetic and simplification.

#[test]
fn basic_arithmetic_is_evaluated() {
    assert_eq!(numeric(&eval_fresh("2 + 3")), 5.0);
    assert_eq!(numeric(&eval_fresh("2 * (3 + 4)")), 14.0);
    assert_eq!(numeric(&eval_fresh("2 * (3 + (4 * (5 - 1)))")), 38.0);
    assert_eq!(numeric(&eval_fresh("2^3")), 8.0);
    assert_eq!(numeric(&eval_fresh("8 - 5")), 3.0);
}

#[test]
fn math_builtins_compute_numerically() {
    assert!(numeric(&eval_fresh("Sin[0]")).abs() < 1e-9);
    assert!((numeric(&eval_fresh("Cos[0]")) - 1.0).abs() < 1e-9);
    assert!((numeric(&eval_fresh("Sqrt[9]")) - 3.0).abs() < 1e-9);
    assert!((numeric(&eval_fresh("Exp[1]")) - std::f64::consts::E).abs() < 1e-9);
    assert!((numeric(&eval_fresh("Exp[0]")) - 1.0).abs() < 1e-9);
    assert!(numeric(&eval_fresh("Log[1]")).abs() < 1e-9);
    assert_eq!(numeric(&eval_fresh("Abs[-5]")), 5.0);
}

#[test]
fn rounding_follows_the_numeric_conventions() {
    assert_eq!(numeric(&eval_fresh("Floor[3.7]")), 3.0);
    assert_eq!(numeric(&eval_fresh("Floor[-3.7]")), -4.0);
    assert_eq!(numeric(&eval_fresh("Ceiling[3.2]")), 4.0);
    assert_eq!(numeric(&eval_fresh("Ceiling[-3.2]")), -3.0);
    // Round is half away from zero.
    assert_eq!(numeric(&eval_fresh("Round[3.5]")), 4.0);
    assert_eq!(numeric(&eval_fresh("Round[3.4]")), 3.0);
    assert_eq!(numeric(&eval_fresh("Round[-3.5]")), -4.0);
    assert_eq!(numeric(&eval_fresh("Round[-3.4]")), -3.0);
}

#[test]
fn symbolic_math_builtins_stay_inert() {
    assert_eq!(eval_fresh("Sin[x]"), Expr::call("Sin", vec![Expr::symbol("x")]));
    // Lowercase heads have no handler at all.
    assert_eq!(eval_fresh("sin[0]"), Expr::call("sin", vec![Expr::number(0.0)]));
}

#[test]
fn bound_variables_resolve_through_the_environment() {
    assert_eq!(numeric(&eval_bound("x + y", &[("x", 10.0), ("y", 5.0)])), 15.0);
    assert_eq!(numeric(&eval_bound("x * y", &[("x", 10.0), ("y", 5.0)])), 50.0);
}

#[test]
fn additive_and_multiplicative_identities_vanish() {
    for source in ["0 + x", "x + 0", "1 * x", "x * 1", "0 + (1 * x)"] {
        let result = eval_fresh(source);
        assert!(result.is_symbol_named("x"), "{source} evaluated to {result}, expected x");
    }

    assert_eq!(numeric(&eval_fresh("(x * 0) + 1")), 1.0);
}

#[test]
fn zero_absorbs_products() {
    assert_eq!(numeric(&eval_fresh("0 * x")), 0.0);
    assert_eq!(numeric(&eval_fresh("x * 0")), 0.0);
    assert_eq!(numeric(&eval_fresh("2 * 3 * 0")), 0.0);
}

#[test]
fn power_simplifies_trivial_exponents() {
    assert_eq!(numeric(&eval_fresh("x^0")), 1.0);
    assert!(eval_fresh("x^1").is_symbol_named("x"));
}

#[test]
fn nary_sums_fold_numerically() {
    assert_eq!(numeric(&eval_fresh("2 + 3 + 4")), 9.0);
}

#[test]
fn sums_order_numerics_first() {
    assert_eq!(eval_fresh("z + 1"),
               Expr::call("Plus", vec![Expr::number(1.0), Expr::symbol("z")]));
}

#[test]
fn assignments_bind_and_return_the_name() {
    let mut env = Environment::new();
    let result = run_source("x = 2", &mut env).unwrap();
    assert!(result.is_symbol_named("x"));
    assert_eq!(env.variables.get("x"), Some(&Expr::number(2.0)));

    let result = run_source("x", &mut env).unwrap();
    assert_eq!(numeric(&result), 2.0);
}

#[test]
fn statement_sequences_evaluate_left_to_right() {
    let mut env = Environment::new();
    let result = run_source("x = 2; x + 3", &mut env).unwrap();
    assert_eq!(numeric(&result), 5.0);
    assert_eq!(env.variables.get("x"), Some(&Expr::number(2.0)));
}

#[test]
fn chained_assignments_bind_every_name() {
    let mut env = Environment::new();
    run_source("x = y = 2", &mut env).unwrap();
    assert_eq!(env.variables.get("x"), Some(&Expr::number(2.0)));
    assert_eq!(env.variables.get("y"), Some(&Expr::number(2.0)));
}

#[test]
fn division_by_zero_is_indeterminate() {
    assert_eq!(*eval_fresh("0 / 0"), Expr::Indeterminate);
    // DirectedInfinity stays disabled along with complex arithmetic, so a
    // nonzero numerator collapses the same way.
    assert_eq!(*eval_fresh("1 / 0"), Expr::Indeterminate);
    assert_eq!(*eval_fresh("-1 / 0"), Expr::Indeterminate);
}

#[test]
fn integer_division_reduces_to_rationals() {
    assert_eq!(*eval_fresh("1/3"), Expr::Rational { num: 1, den: 3 });
    assert_eq!(*eval_fresh("2/6"), Expr::Rational { num: 1, den: 3 });
    assert_eq!(*eval_fresh("6/2"), Expr::Number(3.0));
    assert_eq!(eval_fresh("1/3").to_string(), "1/3");
}

#[test]
fn rational_arithmetic_stays_exact() {
    assert_eq!(*eval_fresh("1/3 + 1/6"), Expr::Rational { num: 1, den: 2 });
    assert_eq!(*eval_fresh("1/3 * 3/2"), Expr::Rational { num: 1, den: 2 });
    // A float demotes the whole fold.
    assert_eq!(*eval_fresh("1/2 + 0.5"), Expr::Number(1.0));
}

#[test]
fn division_by_products_evaluates_numerically() {
    let cases: [(&str, &[(&str, f64)], f64); 7] =
        [("x/-3x", &[("x", 2.0)], -1.0 / 3.0),
         ("y/2y", &[("y", 5.0)], 0.5),
         ("a/-b", &[("a", 6.0), ("b", 2.0)], -3.0),
         ("z/4w", &[("z", 8.0), ("w", 2.0)], 1.0),
         ("t/-7t", &[("t", 7.0)], -1.0 / 7.0),
         ("m/(-2m)", &[("m", 10.0)], -0.5),
         ("p/(-q)", &[("p", 9.0), ("q", 3.0)], -3.0)];

    for (source, vars, expected) in cases {
        let value = numeric(&eval_bound(source, vars));
        assert!((value - expected).abs() < 1e-9,
                "{source} evaluated to {value}, expected {expected}");
    }
}

// Evaluator: equality, logic, and conditionals.

#[test]
fn equality_compares_numeric_values() {
    assert_eq!(*eval_bound("x == 5", &[("x", 5.0)]), Expr::Boolean(true));
    assert_eq!(*eval_bound("x == 5", &[("x", 3.0)]), Expr::Boolean(false));
}

#[test]
fn equality_between_free_symbols_stays_inert() {
    assert_eq!(eval_fresh("x == y"),
               Expr::call("Equal", vec![Expr::symbol("x"), Expr::symbol("y")]));
}

#[test]
fn structurally_identical_operands_compare_equal() {
    assert_eq!(*eval_fresh("{1, x} == {1, x}"), Expr::Boolean(true));
}

#[test]
fn logical_and_short_circuits() {
    assert_eq!(*eval_fresh("True && False"), Expr::Boolean(false));
    assert_eq!(*eval_fresh("True && True"), Expr::Boolean(true));
    assert_eq!(eval_fresh("True && x"),
               Expr::call("And", vec![Expr::boolean(true), Expr::symbol("x")]));
    // A false argument wins even when a later argument would fail.
    assert_eq!(*eval_fresh("False && StringJoin[1]"), Expr::Boolean(false));
}

#[test]
fn logical_or_short_circuits() {
    assert_eq!(*eval_fresh("True || False"), Expr::Boolean(true));
    assert_eq!(*eval_fresh("False || False"), Expr::Boolean(false));
    assert_eq!(eval_fresh("False || x"),
               Expr::call("Or", vec![Expr::boolean(false), Expr::symbol("x")]));
    // A true argument wins even when a later argument would fail.
    assert_eq!(*eval_fresh("True || StringJoin[1]"), Expr::Boolean(true));
}

#[test]
fn retained_logical_nodes_flatten() {
    assert_eq!(eval_fresh("True && x && y"),
               Expr::call("And",
                          vec![Expr::boolean(true), Expr::symbol("x"), Expr::symbol("y")]));
}

#[test]
fn if_selects_the_matching_branch() {
    assert_eq!(numeric(&eval_bound("If[x == 0, 1, 2]", &[("x", 0.0)])), 1.0);
    assert_eq!(numeric(&eval_bound("If[x == 0, 1, 2]", &[("x", 3.0)])), 2.0);
}

#[test]
fn if_with_a_symbolic_condition_keeps_branches_unevaluated() {
    let result = eval_fresh("If[x == 0, 1, 2]");
    let condition = Expr::call("Equal", vec![Expr::symbol("x"), Expr::number(0.0)]);
    assert_eq!(result,
               Expr::call("If", vec![condition, Expr::number(1.0), Expr::number(2.0)]));
}

// Evaluator: strings.

#[test]
fn string_join_concatenates() {
    assert_eq!(*eval_fresh("\"Hello\" <> \" World\""), Expr::Str("Hello World".to_string()));
    assert_eq!(*eval_fresh("\"Hello\" <> \" \" <> \"World\""),
               Expr::Str("Hello World".to_string()));
    assert_eq!(*eval_fresh("\"\" <> \"Hello\""), Expr::Str("Hello".to_string()));
}

#[test]
fn string_join_rejects_non_strings() {
    assert_eq!(error_message("\"Hello\" <> 123"), "StringJoin expects string arguments");
}

#[test]
fn string_length_counts_code_points() {
    assert_eq!(numeric(&eval_fresh("StringLength[\"Hello\"]")), 5.0);
    assert_eq!(numeric(&eval_fresh("StringLength[\"\"]")), 0.0);
    assert_eq!(numeric(&eval_fresh("StringLength[\"Hello World!\"]")), 12.0);
}

#[test]
fn string_replace_is_literal_and_non_overlapping() {
    assert_eq!(*eval_fresh("StringReplace[\"Hello World\", \"World\" -> \"Moon\"]"),
               Expr::Str("Hello Moon".to_string()));
    assert_eq!(*eval_fresh("StringReplace[\"abcabc\", \"abc\" -> \"x\"]"),
               Expr::Str("xx".to_string()));
    assert_eq!(*eval_fresh("StringReplace[\"Hello\", \"x\" -> \"y\"]"),
               Expr::Str("Hello".to_string()));
}

#[test]
fn string_replace_evaluates_rule_sides_lazily() {
    assert_eq!(*eval_fresh("r = \"World\"; StringReplace[\"Hello World\", r -> \"Moon\"]"),
               Expr::Str("Hello Moon".to_string()));
}

#[test]
fn string_take_handles_counts_and_spans() {
    assert_eq!(*eval_fresh("StringTake[\"Hello\", 3]"), Expr::Str("Hel".to_string()));
    assert_eq!(*eval_fresh("StringTake[\"Hello\", -2]"), Expr::Str("lo".to_string()));
    assert_eq!(*eval_fresh("StringTake[\"Hello\", {2, 4}]"), Expr::Str("ell".to_string()));
}

#[test]
fn string_take_rejects_invalid_indices() {
    for source in ["StringTake[\"Hello\", 0]", "StringTake[\"Hello\", 6]",
                   "StringTake[\"Hello\", -6]", "StringTake[\"Hello\", {4, 2}]",
                   "StringTake[\"Hello\", {0, 3}]"]
    {
        assert_eq!(error_message(source), "StringTake expects a valid index or range");
    }
}

// Evaluator: lists and broadcasting.

fn number_list(values: &[f64]) -> ExprRef {
    Expr::list(values.iter().map(|v| Expr::number(*v)).collect())
}

#[test]
fn lists_add_elementwise() {
    assert_eq!(eval_fresh("{1, 2, 3} + {4, 5, 6}"), number_list(&[5.0, 7.0, 9.0]));
}

#[test]
fn scalars_broadcast_over_sums() {
    assert_eq!(eval_fresh("10 + {1, 2, 3}"), number_list(&[11.0, 12.0, 13.0]));
    assert_eq!(eval_fresh("{1, 2, 3} + 10"), number_list(&[11.0, 12.0, 13.0]));
}

#[test]
fn lists_multiply_elementwise() {
    assert_eq!(eval_fresh("{1, 2, 3} * {4, 5, 6}"), number_list(&[4.0, 10.0, 18.0]));
}

#[test]
fn scalars_broadcast_over_products() {
    assert_eq!(eval_fresh("2 * {4, 5, 6}"), number_list(&[8.0, 10.0, 12.0]));
    assert_eq!(eval_fresh("{4, 5, 6} * 2"), number_list(&[8.0, 10.0, 12.0]));
}

#[test]
fn nested_lists_combine_recursively() {
    let expected = Expr::list(vec![number_list(&[11.0, 22.0]), number_list(&[33.0, 44.0])]);
    assert_eq!(eval_fresh("{{1, 2}, {3, 4}} + {{10, 20}, {30, 40}}"), expected);
}

#[test]
fn mismatched_list_sizes_are_rejected() {
    assert_eq!(error_message("{1, 2} + {3, 4, 5}"),
               "List sizes must match for elementwise operation");
    assert_eq!(error_message("{{1, 2}, {3}} + {{1, 2}, {3, 4}}"),
               "List sizes must match for elementwise operation");
}

#[test]
fn symbolic_list_elements_stay_symbolic() {
    let result = eval_fresh("{x, y, 3} + {1, 2, z}");
    let Expr::List(elements) = &*result else {
        panic!("expected a list, got {result}");
    };
    assert_eq!(elements.len(), 3);
    for element in elements {
        assert!(element.is_call_to("Plus"), "expected a Plus, got {element}");
    }
}

#[test]
fn length_counts_list_elements() {
    assert_eq!(numeric(&eval_fresh("Length[{1, 2, 3, 4}]")), 4.0);
    assert_eq!(numeric(&eval_fresh("Length[{}]")), 0.0);
    // Strings are StringLength's business; Length leaves them alone.
    assert_eq!(eval_fresh("Length[\"abc\"]"),
               Expr::call("Length", vec![Expr::string("abc")]));
}

// Evaluator: user-defined functions.

#[test]
fn immediate_definitions_apply_positionally() {
    assert_eq!(numeric(&eval_fresh("square[x] = x * x; square[3]")), 9.0);
    assert_eq!(numeric(&eval_fresh("add[a, b] = a + b; add[2, 5]")), 7.0);
}

#[test]
fn definitions_return_their_name() {
    let mut env = Environment::new();
    let result = run_source("square[x] = x * x", &mut env).unwrap();
    assert!(result.is_symbol_named("square"));
    assert!(env.functions.contains_key("square"));
}

#[test]
fn delayed_bodies_see_later_bindings() {
    // The body references `y`, which is only bound after the definition.
    assert_eq!(numeric(&eval_fresh("f[x] := x + y; y = 10; f[1]")), 11.0);
}

#[test]
fn immediate_bodies_are_evaluated_at_definition_time() {
    // `y` is rebound after the definition, but the immediate body captured
    // its value at definition time.
    assert_eq!(numeric(&eval_fresh("y = 10; g[x] = x + y; y = 0; g[1]")), 11.0);
}

#[test]
fn missing_trailing_arguments_fall_back_to_defaults() {
    assert_eq!(numeric(&eval_fresh("g[x, y = 2] := x + y; g[5]")), 7.0);
    assert_eq!(numeric(&eval_fresh("g[x, y = 2] := x + y; g[5, 10]")), 15.0);
}

#[test]
fn arity_mismatches_are_reported() {
    assert!(error_message("g[x, y] := x + y; g[1, 2, 3]").contains("expects 2 argument(s)"));
    assert!(error_message("g[x, y] := x + y; g[1]").contains("expects 2 argument(s)"));
}

#[test]
fn unknown_heads_stay_inert_with_evaluated_arguments() {
    assert_eq!(eval_fresh("f[1 + 2]"), Expr::call("f", vec![Expr::number(3.0)]));
}

// Leaf idempotence and the environment boundary.

#[test]
fn literals_evaluate_to_themselves() {
    assert_eq!(*eval_fresh("42"), Expr::Number(42.0));
    assert_eq!(*eval_fresh("3.5"), Expr::Number(3.5));
    assert_eq!(*eval_fresh("True"), Expr::Boolean(true));
    assert_eq!(*eval_fresh("\"hi\""), Expr::Str("hi".to_string()));
    assert!(eval_fresh("someFreeSymbol").is_symbol_named("someFreeSymbol"));
}

#[test]
fn completed_assignments_survive_later_errors() {
    let mut env = Environment::new();
    let result = run_source("x = 2; StringTake[\"Hello\", 0]", &mut env);
    assert!(result.is_err());
    assert_eq!(env.variables.get("x"), Some(&Expr::number(2.0)));
}
