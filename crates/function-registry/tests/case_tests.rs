// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Data-driven resolution cases from `fixtures/resolution_cases.yaml`

use sqlfn_function_registry::{Expr, Function, FunctionBinder, FunctionRegistry, FunctionResult};
use sqlfn_test_utils::{BindAssertions, ResolutionCase, error_kind, parse_cases};

const CASES: &str = include_str!("fixtures/resolution_cases.yaml");

fn build_and_bind(registry: &FunctionRegistry, case: &ResolutionCase) -> FunctionResult<Expr> {
    let arguments = case
        .arguments()
        .unwrap_or_else(|e| panic!("[{}] bad arguments: {}", case.description, e));
    let call = Function::from_call(&case.function, case.distinct, arguments)?;
    FunctionBinder::new(registry).bind(&Expr::from(call))
}

fn check_case(registry: &FunctionRegistry, case: &ResolutionCase) {
    let result = build_and_bind(registry, case);

    if let Some(expected) = &case.expect.error {
        match result {
            Ok(bound) => panic!(
                "[{}] expected {} error, bound {}",
                case.description,
                expected,
                bound.to_sql()
            ),
            Err(e) => assert_eq!(
                error_kind(&e),
                expected,
                "[{}] unexpected error: {}",
                case.description,
                e
            ),
        }
        return;
    }

    let bound = match result {
        Ok(bound) => bound,
        Err(e) => panic!("[{}] failed to bind: {}", case.description, e),
    };
    BindAssertions::assert_fully_resolved(&bound);

    if let Some(return_type) = case.expected_return_type().unwrap() {
        BindAssertions::assert_bound_type(&bound, &return_type);
    }
    if let Some(argument_types) = case.expected_argument_types().unwrap() {
        BindAssertions::assert_argument_types(&bound, &argument_types);
    }
    if let Some(nullable) = case.expect.nullable {
        BindAssertions::assert_nullable(&bound, nullable);
    }

    let signature = BindAssertions::matched_signature(&bound);
    assert!(
        !signature.is_variadic,
        "[{}] bound signature is still variadic",
        case.description
    );
    assert_eq!(
        signature.argument_types.len(),
        bound_arity(&bound),
        "[{}] one argument type per argument",
        case.description
    );
}

fn bound_arity(expr: &Expr) -> usize {
    match expr {
        Expr::Function(function) => function.children().len(),
        _ => 0,
    }
}

#[test]
fn test_resolution_cases() {
    let cases = parse_cases(CASES).expect("case file should parse");
    let registry = FunctionRegistry::new();

    for case in &cases {
        check_case(&registry, case);
    }
}

#[test]
fn test_cases_are_stable_across_registries() {
    let cases = parse_cases(CASES).unwrap();
    let first = FunctionRegistry::new();
    let second = FunctionRegistry::new();

    for case in &cases {
        assert_eq!(
            build_and_bind(&first, case),
            build_and_bind(&second, case),
            "[{}] differs between registries",
            case.description
        );
    }
}

#[test]
fn test_cases_cover_every_builtin() {
    let cases = parse_cases(CASES).unwrap();
    let registry = FunctionRegistry::new();

    for name in registry.function_names() {
        assert!(
            cases
                .iter()
                .any(|case| case.function == name && case.expect.return_type.is_some()),
            "no successful case for {}",
            name
        );
    }
}
