// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Signature resolution
//!
//! [`SignatureResolver`] picks one registered overload for a call given the
//! actual argument types:
//!
//! 1. Candidates whose arity does not fit the call are skipped, as are
//!    variadic candidates when the call does not allow them.
//! 2. Each argument is costed with [`implicit_cast_cost`]; one impossible
//!    cast discards the candidate.
//! 3. The cheapest candidate wins. Ties go to the candidate registered first.
//!
//! [`bind_signature`] then specializes the winner to the actual argument
//! types.

use sqlfn_ir::{DataType, FunctionError, FunctionResult, FunctionSignature};
use tracing::{debug, trace};

use crate::coercion::implicit_cast_cost;
use crate::describe::render_signatures;
use crate::registry::FunctionRegistry;

/// Picks the best matching signature for a call
#[derive(Debug, Clone, Copy)]
pub struct SignatureResolver<'a> {
    registry: &'a FunctionRegistry,
}

impl<'a> SignatureResolver<'a> {
    pub fn new(registry: &'a FunctionRegistry) -> Self {
        Self { registry }
    }

    /// Resolve `name` called with `argument_types`
    ///
    /// # Errors
    ///
    /// - [`FunctionError::UnknownFunction`] if `name` is not registered
    /// - [`FunctionError::NoMatchingSignature`] if no candidate accepts the
    ///   argument types
    pub fn resolve(
        &self,
        name: &str,
        argument_types: &[DataType],
        allow_variadic: bool,
    ) -> FunctionResult<FunctionSignature> {
        let key = self.registry.normalize(name);
        let candidates =
            self.registry
                .get_signatures(&key)
                .ok_or_else(|| FunctionError::UnknownFunction {
                    name: key.to_string(),
                    call: render_types_call(&key, argument_types),
                })?;

        let mut best: Option<(u32, &FunctionSignature)> = None;
        for (index, candidate) in candidates.iter().enumerate() {
            if candidate.is_variadic && !allow_variadic {
                trace!("{} candidate #{} skipped: variadic", key, index);
                continue;
            }
            let Some(cost) = candidate_cost(candidate, argument_types) else {
                trace!("{} candidate #{} {} rejected", key, index, candidate);
                continue;
            };
            trace!("{} candidate #{} {} costs {}", key, index, candidate, cost);

            // Strictly cheaper only, so the first listed wins a tie
            if best.is_none_or(|(best_cost, _)| cost < best_cost) {
                best = Some((cost, candidate));
            }
        }

        match best {
            Some((cost, signature)) => {
                debug!("Resolved {}{} (cost {})", key, signature, cost);
                Ok(signature.clone())
            }
            None => Err(FunctionError::NoMatchingSignature {
                name: key.to_string(),
                call: render_types_call(&key, argument_types),
                argument_types: argument_types.to_vec(),
                candidates: render_signatures(&key, candidates),
            }),
        }
    }
}

/// Total cast cost of calling `signature` with `argument_types`, `None` if it does not apply
pub fn candidate_cost(signature: &FunctionSignature, argument_types: &[DataType]) -> Option<u32> {
    if !signature.accepts_arity(argument_types.len()) {
        return None;
    }
    argument_types
        .iter()
        .enumerate()
        .try_fold(0u32, |total, (index, actual)| {
            let declared = signature.argument_type(index)?;
            Some(total + implicit_cast_cost(actual, declared)?)
        })
}

/// Specialize a resolved signature to the actual argument types
///
/// `ANY` entries and decimal templates take the actual argument type, and a
/// variadic tail is expanded to one entry per actual argument. The result
/// has exactly one argument type per argument and no `ANY`.
///
/// An `ARRAY` return type declared with the same template as an argument
/// follows that argument, so the element type passes through unchanged.
pub fn bind_signature(signature: &FunctionSignature, argument_types: &[DataType]) -> FunctionSignature {
    let bound: Vec<DataType> = argument_types
        .iter()
        .enumerate()
        .map(|(index, actual)| match signature.argument_type(index) {
            Some(declared) => bind_type(declared, actual),
            None => actual.clone(),
        })
        .collect();

    let return_type = if signature.return_type.is_array_type() {
        (0..bound.len())
            .find(|&index| {
                signature.argument_type(index) == Some(&signature.return_type)
                    && bound[index].is_array_type()
            })
            .map_or_else(|| signature.return_type.clone(), |index| bound[index].clone())
    } else {
        signature.return_type.clone()
    };
    FunctionSignature::ret(return_type).args(bound)
}

fn bind_type(declared: &DataType, actual: &DataType) -> DataType {
    match (declared, actual) {
        (DataType::AnyType, _) => actual.clone(),
        (DataType::DecimalV3(..), DataType::DecimalV3(..))
        | (DataType::DecimalV2(..), DataType::DecimalV2(..)) => actual.clone(),
        (DataType::Array(declared), DataType::Array(actual)) => {
            DataType::array_of(bind_type(declared, actual))
        }
        // `NULL` into `ARRAY<ANY>` still must not leave `ANY` behind
        (DataType::Array(declared), _) if declared.contains_any_type() => actual.clone(),
        _ => declared.clone(),
    }
}

fn render_types_call(name: &str, argument_types: &[DataType]) -> String {
    let types: Vec<String> = argument_types.iter().map(ToString::to_string).collect();
    format!("{}({})", name, types.join(", "))
}
