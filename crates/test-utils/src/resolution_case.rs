// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Data-driven resolution cases
//!
//! A case file is a YAML list. Each case names a function, its arguments and
//! the expected outcome; types are written the way `DataType` displays them:
//!
//! ```yaml
//! - description: avg over a two-digit decimal widens the scale
//!   function: avg
//!   args:
//!     - { kind: column, name: price, type: "DECIMALV3(10, 2)" }
//!   expect:
//!     return_type: "DECIMALV3(38, 4)"
//!     argument_types: ["DECIMALV3(12, 4)"]
//!
//! - description: avg rejects strings
//!   function: avg
//!   args:
//!     - { kind: column, name: name, type: STRING }
//!   expect:
//!     error: IllegalArgumentType
//! ```

use std::path::Path;

use serde::Deserialize;
use sqlfn_ir::{ColumnRef, DataType, Expr, Literal, OrderExpr};
use thiserror::Error;

/// A single resolution case
#[derive(Debug, Clone, Deserialize)]
pub struct ResolutionCase {
    pub description: String,
    pub function: String,
    #[serde(default)]
    pub distinct: bool,
    #[serde(default)]
    pub args: Vec<ArgSpec>,
    pub expect: ExpectedOutcome,
}

/// One argument of a case
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArgSpec {
    Column {
        name: String,
        #[serde(rename = "type")]
        data_type: String,
        #[serde(default)]
        nullable: bool,
    },
    NullLiteral,
    Int {
        value: i64,
    },
    Double {
        value: f64,
    },
    Str {
        value: String,
    },
    Order {
        name: String,
        #[serde(rename = "type")]
        data_type: String,
        #[serde(default)]
        desc: bool,
    },
}

/// Expected outcome: either a bound result or an error variant name
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpectedOutcome {
    pub return_type: Option<String>,
    pub argument_types: Option<Vec<String>>,
    pub nullable: Option<bool>,
    pub error: Option<String>,
}

/// Case file errors
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Empty case file")]
    EmptyFile,

    #[error("Invalid type '{text}': {reason}")]
    InvalidType { text: String, reason: String },

    #[error("Invalid expectation in '{description}': {reason}")]
    InvalidExpectation { description: String, reason: String },
}

/// Parse a case file
pub fn parse_case_file(path: &Path) -> Result<Vec<ResolutionCase>, CaseError> {
    let content = std::fs::read_to_string(path)?;
    parse_cases(&content)
}

/// Parse cases from YAML content
pub fn parse_cases(content: &str) -> Result<Vec<ResolutionCase>, CaseError> {
    let cases: Vec<ResolutionCase> = serde_yaml::from_str(content)?;
    if cases.is_empty() {
        return Err(CaseError::EmptyFile);
    }
    for case in &cases {
        case.validate()?;
    }
    Ok(cases)
}

impl ResolutionCase {
    fn validate(&self) -> Result<(), CaseError> {
        let expect = &self.expect;
        let reason = match (&expect.return_type, &expect.error) {
            (Some(_), Some(_)) => "both return_type and error are set",
            (None, None) => "one of return_type or error is required",
            (None, Some(_)) if expect.argument_types.is_some() || expect.nullable.is_some() => {
                "error cases cannot expect types or nullability"
            }
            _ => {
                // Surface type typos at parse time
                self.arguments()?;
                self.expected_return_type()?;
                self.expected_argument_types()?;
                return Ok(());
            }
        };
        Err(CaseError::InvalidExpectation {
            description: self.description.clone(),
            reason: reason.to_string(),
        })
    }

    /// Argument expressions in call order
    pub fn arguments(&self) -> Result<Vec<Expr>, CaseError> {
        self.args.iter().map(ArgSpec::to_expr).collect()
    }

    pub fn expected_return_type(&self) -> Result<Option<DataType>, CaseError> {
        self.expect.return_type.as_deref().map(parse_type).transpose()
    }

    pub fn expected_argument_types(&self) -> Result<Option<Vec<DataType>>, CaseError> {
        self.expect
            .argument_types
            .as_ref()
            .map(|types| {
                types
                    .iter()
                    .map(|t| parse_type(t))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()
    }
}

impl ArgSpec {
    pub fn to_expr(&self) -> Result<Expr, CaseError> {
        let expr = match self {
            ArgSpec::Column {
                name,
                data_type,
                nullable,
            } => Expr::from(ColumnRef::new(name, parse_type(data_type)?).with_nullable(*nullable)),
            ArgSpec::NullLiteral => Expr::from(Literal::Null),
            ArgSpec::Int { value } => Expr::from(Literal::Integer(*value)),
            ArgSpec::Double { value } => Expr::from(Literal::Float(*value)),
            ArgSpec::Str { value } => Expr::from(Literal::String(value.clone())),
            ArgSpec::Order {
                name,
                data_type,
                desc,
            } => {
                let column = ColumnRef::new(name, parse_type(data_type)?);
                if *desc {
                    Expr::from(OrderExpr::desc(column))
                } else {
                    Expr::from(OrderExpr::asc(column))
                }
            }
        };
        Ok(expr)
    }
}

/// Parse a type written the way `DataType` displays it
pub fn parse_type(text: &str) -> Result<DataType, CaseError> {
    let invalid = |reason: &str| CaseError::InvalidType {
        text: text.to_string(),
        reason: reason.to_string(),
    };

    let upper = text.trim().to_ascii_uppercase();

    if let Some(element) = upper
        .strip_prefix("ARRAY<")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        return Ok(DataType::array_of(parse_type(element)?));
    }

    if let Some((name, params)) = upper.split_once('(') {
        let params = params
            .strip_suffix(')')
            .ok_or_else(|| invalid("missing ')'"))?;
        let params = params
            .split(',')
            .map(|p| p.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| invalid(&e.to_string()))?;

        let checked = |ty: sqlfn_ir::FunctionResult<DataType>| ty.map_err(|e| invalid(&e.to_string()));
        return match (name.trim(), params.as_slice()) {
            ("DECIMALV3", [precision, scale]) => checked(DataType::decimal_v3(*precision, *scale)),
            ("DECIMALV2", [precision, scale]) => checked(DataType::decimal_v2(*precision, *scale)),
            ("VARCHAR", [len]) => Ok(DataType::Varchar(*len)),
            ("CHAR", [len]) => Ok(DataType::Char(*len)),
            _ => Err(invalid("unknown parameterized type")),
        };
    }

    let ty = match upper.as_str() {
        "TINYINT" => DataType::TinyInt,
        "SMALLINT" => DataType::SmallInt,
        "INT" | "INTEGER" => DataType::Integer,
        "BIGINT" => DataType::BigInt,
        "LARGEINT" => DataType::LargeInt,
        "FLOAT" => DataType::Float,
        "DOUBLE" => DataType::Double,
        "BOOLEAN" => DataType::Boolean,
        "VARCHAR" => DataType::VARCHAR_SYSTEM_DEFAULT,
        "STRING" => DataType::String,
        "DATE" => DataType::Date,
        "DATETIME" => DataType::DateTime,
        "BITMAP" => DataType::Bitmap,
        "HLL" => DataType::Hll,
        "NULL" => DataType::NullType,
        "ANY" => DataType::AnyType,
        _ => return Err(invalid("unknown type")),
    };
    Ok(ty)
}
