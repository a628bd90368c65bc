// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for resolution and binding against the builtin catalog

use serde_json::json;
use sqlfn_function_registry::{
    DataType, Expr, Function, FunctionBinder, FunctionError, FunctionRegistry, FunctionSignature,
    RegistrationMode, RegistryConfig, SignatureDescriber, SignatureResolver,
};
use sqlfn_ir::{AggregateFunction, ExpressionFunction, precision};
use sqlfn_test_utils::{BindAssertions, ExprFixtures as F};

fn bind(expr: &Expr) -> Result<Expr, FunctionError> {
    let registry = FunctionRegistry::new();
    FunctionBinder::new(&registry).bind(expr)
}

#[test]
fn test_resolution_is_deterministic() {
    let registry = FunctionRegistry::new();
    let resolver = SignatureResolver::new(&registry);

    let cases: Vec<(&str, Vec<DataType>, bool)> = vec![
        ("avg", vec![DataType::SmallInt], false),
        ("avg", vec![DataType::DecimalV3(20, 3)], false),
        ("avg", vec![DataType::NullType], false),
        ("count", vec![DataType::Date, DataType::String], true),
        ("group_concat", vec![DataType::Char(2), DataType::String, DataType::BigInt], true),
        ("histogram", vec![DataType::Date, DataType::Double], false),
        ("reverse", vec![DataType::array_of(DataType::Date)], false),
    ];

    for (name, args, variadic) in cases {
        let first = resolver.resolve(name, &args, variadic);
        let second = resolver.resolve(name, &args, variadic);
        assert!(first.is_ok(), "{} failed: {:?}", name, first);
        assert_eq!(first, second, "{} resolved differently", name);
    }
}

#[test]
fn test_tie_break_follows_registration_order() {
    let mut registry = FunctionRegistry::empty();
    let by_int = FunctionSignature::ret(DataType::String).args(vec![DataType::Integer]);
    let by_any = FunctionSignature::ret(DataType::Date).args(vec![DataType::AnyType]);
    registry
        .register_signatures("f", vec![by_int.clone(), by_any.clone()])
        .unwrap();

    let resolver = SignatureResolver::new(&registry);
    for _ in 0..10 {
        // Both cost 0 for INT
        assert_eq!(resolver.resolve("f", &[DataType::Integer], false), Ok(by_int.clone()));
    }
    // Only ANY accepts STRING
    assert_eq!(resolver.resolve("f", &[DataType::String], false), Ok(by_any.clone()));

    let mut reversed = FunctionRegistry::empty();
    reversed
        .register_signatures("f", vec![by_any.clone(), by_int])
        .unwrap();
    assert_eq!(
        SignatureResolver::new(&reversed).resolve("f", &[DataType::Integer], false),
        Ok(by_any)
    );
}

#[test]
fn test_avg_decimal_scale_two_widens_to_four() {
    let expr = F::call("avg", vec![F::column("price", DataType::DecimalV3(10, 2))]);
    let bound = bind(&expr).unwrap();

    BindAssertions::assert_bound_type(&bound, &DataType::DecimalV3(38, 4));
    BindAssertions::assert_argument_types(&bound, &[DataType::DecimalV3(12, 4)]);
}

#[test]
fn test_avg_decimal_scale_six_is_kept() {
    let expr = F::call("avg", vec![F::column("rate", DataType::DecimalV3(12, 6))]);
    let bound = bind(&expr).unwrap();

    BindAssertions::assert_bound_type(&bound, &DataType::DecimalV3(38, 6));
    BindAssertions::assert_argument_types(&bound, &[DataType::DecimalV3(12, 6)]);
}

#[test]
fn test_avg_precision_is_idempotent_after_binding() {
    let bound = bind(&F::call("avg", vec![F::order_total()])).unwrap();
    let signature = BindAssertions::matched_signature(&bound).clone();
    let args = [DataType::DecimalV3(10, 2)];
    assert_eq!(precision::rewrite_avg(&signature, &args), signature);
}

#[test]
fn test_avg_over_integers_and_nulls() {
    let bound = bind(&F::call("avg", vec![F::column("qty", DataType::Integer)])).unwrap();
    BindAssertions::assert_bound_type(&bound, &DataType::Double);

    let bound = bind(&F::call("avg", vec![F::null()])).unwrap();
    BindAssertions::assert_fully_resolved(&bound);
    BindAssertions::assert_nullable(&bound, true);
}

#[test]
fn test_avg_rejects_string_before_resolution() {
    let result = bind(&F::call("avg", vec![F::user_name()]));
    match result {
        Err(FunctionError::IllegalArgumentType {
            function,
            call,
            position,
            actual,
            ..
        }) => {
            assert_eq!(function, "avg");
            assert_eq!(call, "avg(users.name)");
            assert_eq!(position, 0);
            assert_eq!(actual, DataType::String);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_avg_distinct_keeps_flag_through_binding() {
    let bound = bind(&F::distinct_call("avg", vec![F::order_total()])).unwrap();
    assert_eq!(bound.to_sql(), "avg(DISTINCT orders.total)");
    BindAssertions::assert_nullable(&bound, true);
}

#[test]
fn test_group_concat_reconstruction_preserves_split() {
    let expr = F::call(
        "group_concat",
        vec![
            F::user_name(),
            F::asc(F::user_id()),
            F::desc(F::column("ts", DataType::DateTime)),
        ],
    );
    let Expr::Function(Function::GroupConcat(gc)) = &expr else {
        panic!("expected group_concat");
    };
    assert_eq!(gc.non_order_arguments(), 1);
    assert_eq!(gc.orders().count(), 2);

    // Substitute every child, as a rewrite pass would
    let substituted = gc
        .with_children(vec![
            F::column("title", DataType::Varchar(64)),
            F::asc(F::column("a", DataType::Integer)),
            F::asc(F::column("b", DataType::Integer)),
        ])
        .unwrap();
    assert_eq!(substituted.non_order_arguments(), 1);
    assert_eq!(substituted.orders().count(), 2);
    assert_eq!(
        substituted.to_sql(),
        "group_concat(title ORDER BY a ASC, b ASC)"
    );

    let bound = bind(&Expr::from(Function::GroupConcat(substituted))).unwrap();
    BindAssertions::assert_bound_type(&bound, &DataType::VARCHAR_SYSTEM_DEFAULT);
    BindAssertions::assert_argument_types(
        &bound,
        &[
            DataType::VARCHAR_SYSTEM_DEFAULT,
            DataType::Integer,
            DataType::Integer,
        ],
    );
}

#[test]
fn test_group_concat_positional_after_order_fails() {
    let result = Function::from_call(
        "group_concat",
        false,
        vec![F::user_name(), F::asc(F::user_id()), F::string(",")],
    );
    BindAssertions::assert_error_kind(&result, "InvalidArgumentStructure");

    let expr = F::call("group_concat", vec![F::user_name()]);
    let Expr::Function(Function::GroupConcat(gc)) = &expr else {
        panic!("expected group_concat");
    };
    let rebuilt = gc.with_distinct_and_children(
        true,
        vec![F::user_name(), F::desc(F::user_id()), F::user_name()],
    );
    BindAssertions::assert_error_kind(&rebuilt, "InvalidArgumentStructure");
}

#[test]
fn test_group_concat_rejects_numeric_separator() {
    let result = bind(&F::call("group_concat", vec![F::user_name(), F::int(1)]));
    match result {
        Err(FunctionError::IllegalArgumentType { position, reason, .. }) => {
            assert_eq!(position, 1);
            assert_eq!(reason, "requires second parameter to be of type STRING");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_reverse_array_keeps_element_type() {
    let ints = DataType::array_of(DataType::Integer);
    let bound = bind(&F::call("reverse", vec![F::column("ids", ints.clone())])).unwrap();
    BindAssertions::assert_bound_type(&bound, &ints);
    BindAssertions::assert_argument_types(&bound, &[ints]);

    let bound = bind(&F::call("reverse", vec![F::column("code", DataType::Char(4))])).unwrap();
    BindAssertions::assert_bound_type(&bound, &DataType::VARCHAR_SYSTEM_DEFAULT);

    // The decimal template binds to the actual element type on both sides
    let decimals = DataType::array_of(DataType::DecimalV2(10, 2));
    let bound = bind(&F::call("reverse", vec![F::column("prices", decimals.clone())])).unwrap();
    BindAssertions::assert_bound_type(&bound, &decimals);
    BindAssertions::assert_argument_types(&bound, &[decimals]);
}

#[test]
fn test_no_matching_signature_reports_name_and_types() {
    let registry = FunctionRegistry::new();
    let err = SignatureResolver::new(&registry)
        .resolve("histogram", &[DataType::Integer, DataType::String], false)
        .unwrap_err();
    match &err {
        FunctionError::NoMatchingSignature {
            name,
            argument_types,
            candidates,
            ..
        } => {
            assert_eq!(name, "histogram");
            assert_eq!(argument_types, &vec![DataType::Integer, DataType::String]);
            assert_eq!(candidates.len(), 3);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    let message = err.to_string();
    assert!(message.contains("histogram(INT, STRING)"));
    assert!(message.contains("histogram(ANY, DOUBLE) -> VARCHAR(65533)"));
}

#[test]
fn test_count_forms() {
    let star = bind(&F::call("count", vec![])).unwrap();
    assert_eq!(star.to_sql(), "count(*)");
    BindAssertions::assert_bound_type(&star, &DataType::BigInt);
    BindAssertions::assert_nullable(&star, false);

    let multi = bind(&F::distinct_call(
        "count",
        vec![F::nullable_column("a", DataType::Date), F::user_name()],
    ))
    .unwrap();
    BindAssertions::assert_argument_types(&multi, &[DataType::Date, DataType::String]);
    BindAssertions::assert_nullable(&multi, false);
}

#[test]
fn test_histogram_bindings() {
    let bound = bind(&F::call(
        "histogram",
        vec![F::column("age", DataType::SmallInt), F::double(0.1), F::int(8)],
    ))
    .unwrap();
    BindAssertions::assert_bound_type(&bound, &DataType::VARCHAR_SYSTEM_DEFAULT);
    BindAssertions::assert_argument_types(
        &bound,
        &[DataType::SmallInt, DataType::Double, DataType::Integer],
    );

    let err = bind(&F::call("histogram", vec![F::column("uv", DataType::Bitmap)]));
    BindAssertions::assert_error_kind(&err, "IllegalArgumentType");
}

#[test]
fn test_intermediate_types_after_binding() {
    let bound = bind(&F::call("avg", vec![F::column("price", DataType::DecimalV3(10, 2))]))
        .unwrap();
    let Expr::Function(function) = &bound else {
        panic!("expected call");
    };
    assert_eq!(
        function.intermediate_types(),
        Ok(Some(vec![DataType::DecimalV3(38, 4), DataType::BigInt]))
    );
}

#[test]
fn test_registry_from_json_settings() {
    let settings = json!({
        "functionRegistry": {
            "registrationMode": "merge",
            "disabledFunctions": ["histogram"]
        }
    });
    let config = RegistryConfig::from_settings(&settings).unwrap();
    assert_eq!(config.registration_mode, RegistrationMode::Merge);

    let mut registry = FunctionRegistry::with_config(config);
    assert!(!registry.has_function("histogram"));
    assert!(registry.has_function("group_concat"));

    // Merge appends after the builtin overloads
    registry
        .register_signatures(
            "REVERSE",
            vec![FunctionSignature::ret(DataType::Date).args(vec![DataType::Date])],
        )
        .unwrap();
    let reverse = registry.get_signatures("reverse").unwrap();
    assert_eq!(reverse.len(), 15);
    assert_eq!(reverse[14].argument_types, vec![DataType::Date]);

    assert!(bind(&F::call("histogram", vec![F::user_id()])).is_ok());
    let err = FunctionBinder::new(&registry).bind(&F::call("histogram", vec![F::user_id()]));
    assert_eq!(
        err,
        Err(FunctionError::UnknownFunction {
            name: "histogram".to_string(),
            call: "histogram(users.id)".to_string(),
        })
    );
}

#[test]
fn test_registry_from_yaml_without_builtins() {
    let config = RegistryConfig::from_yaml_str("loadBuiltins: false\ncaseInsensitiveNames: false\n")
        .unwrap();
    let mut registry = FunctionRegistry::with_config(config);
    assert!(registry.is_empty());

    registry
        .register_signatures(
            "Reverse",
            vec![FunctionSignature::ret(DataType::String).args(vec![DataType::String])],
        )
        .unwrap();
    assert!(registry.has_function("Reverse"));
    assert!(!registry.has_function("reverse"));

    // Reject is the default mode
    let err = registry.register_signatures("Reverse", vec![]);
    assert_eq!(
        err,
        Err(FunctionError::DuplicateFunctionRegistration {
            name: "Reverse".to_string()
        })
    );
}

#[test]
fn test_describe_builtin_overloads() {
    let registry = FunctionRegistry::new();
    let describer = SignatureDescriber::new(&registry);

    let text = describer.describe_function("GROUP_CONCAT").unwrap();
    assert!(text.contains("group_concat(VARCHAR(65533), ANY...) -> VARCHAR(65533)"));
    assert!(text.ends_with("2 overloads"));

    let all = describer.describe_all();
    assert!(all.contains(&"avg: 9 overload(s)".to_string()));
    assert!(all.contains(&"reverse: 14 overload(s)".to_string()));
}
