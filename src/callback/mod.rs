//! User callbacks with flexible arity
//!
//! Validation and autocompletion callbacks are registered with an explicit
//! parameter-name list and invoked through a bound wrapper that supplies
//! only the declared arguments. The wrapper is built fresh per invocation
//! and the arity check happens there, so a bad signature surfaces the first
//! time the callback would actually run.

pub mod arity;
pub mod signature;

// Re-export main types
pub use arity::*;
pub use signature::*;

use std::fmt;

use crate::command::ParamSpec;
use crate::completion::RawCompletion;
use crate::error::CallbackResult;
use crate::runner::Context;

/// Arguments supplied to a validation callback.
///
/// Fields the callback did not declare are `None`.
#[derive(Debug, Clone, Copy)]
pub struct ValidationArgs<'a> {
    pub ctx: Option<&'a Context>,
    pub param: Option<&'a ParamSpec>,
    pub value: Option<&'a str>,
}

/// Arguments supplied to an autocompletion callback.
#[derive(Debug, Clone, Copy)]
pub struct CompletionArgs<'a> {
    pub ctx: Option<&'a Context>,
    pub args: Option<&'a [String]>,
    pub incomplete: Option<&'a str>,
}

type ValidationFn =
    dyn Fn(ValidationArgs<'_>) -> std::result::Result<Option<String>, String> + Send + Sync;

type CompletionFn = dyn Fn(CompletionArgs<'_>) -> Vec<RawCompletion> + Send + Sync;

/// A user callback that checks or transforms a parsed parameter value.
///
/// Returning `Ok(Some(v))` replaces the value with `v`; `Ok(None)` keeps it;
/// `Err(message)` rejects it.
pub struct ValidationCallback {
    signature: CallableSignature,
    func: Box<ValidationFn>,
}

impl ValidationCallback {
    pub fn new<F>(params: &[&str], func: F) -> Self
    where
        F: Fn(ValidationArgs<'_>) -> std::result::Result<Option<String>, String>
            + Send
            + Sync
            + 'static,
    {
        ValidationCallback {
            signature: CallableSignature::new(params.iter().copied()),
            func: Box::new(func),
        }
    }
}

impl Introspect for ValidationCallback {
    fn signature(&self) -> &CallableSignature {
        &self.signature
    }
}

impl fmt::Debug for ValidationCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationCallback")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// A user callback that produces dynamic completion candidates.
///
/// Candidates are returned in the order they should be shown and are trusted
/// to already be filtered against the incomplete token.
pub struct CompletionCallback {
    signature: CallableSignature,
    func: Box<CompletionFn>,
}

impl CompletionCallback {
    pub fn new<F>(params: &[&str], func: F) -> Self
    where
        F: Fn(CompletionArgs<'_>) -> Vec<RawCompletion> + Send + Sync + 'static,
    {
        CompletionCallback {
            signature: CallableSignature::new(params.iter().copied()),
            func: Box::new(func),
        }
    }
}

impl Introspect for CompletionCallback {
    fn signature(&self) -> &CallableSignature {
        &self.signature
    }
}

impl fmt::Debug for CompletionCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionCallback")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// A validation callback bound to a validated arity
#[derive(Debug)]
pub struct BoundValidation<'cb> {
    callback: &'cb ValidationCallback,
    arity: Arity,
}

/// Adapt a validation callback, checking its declared arity
pub fn adapt_validation(callback: &ValidationCallback) -> CallbackResult<BoundValidation<'_>> {
    let arity = Arity::of(&callback.signature, CallbackRole::Validation)?;
    Ok(BoundValidation { callback, arity })
}

impl BoundValidation<'_> {
    /// Invoke the callback with the canonical tuple (ctx, param, value),
    /// passing through only the slots its arity selects
    pub fn call(
        &self,
        ctx: &Context,
        param: &ParamSpec,
        value: &str,
    ) -> std::result::Result<Option<String>, String> {
        let [use_ctx, use_param, use_value] = self.arity.mask();
        (self.callback.func)(ValidationArgs {
            ctx: use_ctx.then_some(ctx),
            param: use_param.then_some(param),
            value: use_value.then_some(value),
        })
    }
}

/// An autocompletion callback bound to a validated arity
#[derive(Debug)]
pub struct BoundCompletion<'cb> {
    callback: &'cb CompletionCallback,
    arity: Arity,
}

/// Adapt an autocompletion callback, checking its declared arity
pub fn adapt_completion(callback: &CompletionCallback) -> CallbackResult<BoundCompletion<'_>> {
    let arity = Arity::of(&callback.signature, CallbackRole::Autocompletion)?;
    Ok(BoundCompletion { callback, arity })
}

impl BoundCompletion<'_> {
    /// Invoke the callback with the canonical tuple (ctx, args-so-far,
    /// incomplete), passing through only the slots its arity selects
    pub fn call(&self, ctx: &Context, args: &[String], incomplete: &str) -> Vec<RawCompletion> {
        let [use_ctx, use_args, use_incomplete] = self.arity.mask();
        (self.callback.func)(CompletionArgs {
            ctx: use_ctx.then_some(ctx),
            args: use_args.then_some(args),
            incomplete: use_incomplete.then_some(incomplete),
        })
    }
}
