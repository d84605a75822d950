//! Arity validation and argument selection
//!
//! A callback may declare 0 to 3 parameters. Which values it receives is
//! decided by a slot-mask table keyed by the declared arity: the last
//! declared parameter always binds the most-specific value (`value` for
//! validation, `incomplete` for autocompletion), any remaining parameters
//! fill from the front of the canonical tuple. A 2-parameter validation
//! callback therefore receives (context, value) and skips the parameter
//! metadata; this matches long-standing observable behavior and is kept.

use crate::callback::signature::CallableSignature;
use crate::error::{CallbackError, CallbackResult};

/// Maximum number of parameters a callback may declare
pub const MAX_ARITY: usize = 3;

/// The role a user callback was registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackRole {
    Validation,
    Autocompletion,
}

/// Which canonical slots reach a callback of a given arity.
///
/// Slots are (context, middle, trailing); middle is the parameter metadata
/// for validation and args-so-far for autocompletion.
const SLOT_MASKS: [[bool; 3]; MAX_ARITY + 1] = [
    [false, false, false],
    [false, false, true],
    [true, false, true],
    [true, true, true],
];

/// A validated callback arity, always within the legal set {0,1,2,3}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity(usize);

impl Arity {
    /// Validate a signature's declared arity for a role.
    ///
    /// Anything above [`MAX_ARITY`] fails with the role-specific error
    /// rather than silently dropping parameters; for autocompletion the
    /// error names the unrecognized trailing parameters.
    pub fn of(signature: &CallableSignature, role: CallbackRole) -> CallbackResult<Self> {
        let n = signature.arity();
        if n <= MAX_ARITY {
            return Ok(Arity(n));
        }
        Err(match role {
            CallbackRole::Validation => CallbackError::TooManyValidationParameters,
            CallbackRole::Autocompletion => {
                let extra = signature.names()[MAX_ARITY..].join(", ");
                CallbackError::TooManyAutocompletionParameters(extra)
            }
        })
    }

    /// The slot mask for this arity: (context, middle, trailing)
    pub fn mask(self) -> [bool; 3] {
        SLOT_MASKS[self.0]
    }

    /// The validated parameter count
    pub fn count(self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(names: &[&str]) -> CallableSignature {
        CallableSignature::new(names.iter().copied())
    }

    #[test]
    fn test_legal_arities() {
        for n in 0..=MAX_ARITY {
            let names: Vec<String> = (0..n).map(|i| format!("p{}", i)).collect();
            let signature = CallableSignature::new(names);
            let arity = Arity::of(&signature, CallbackRole::Validation).unwrap();
            assert_eq!(arity.count(), n);
        }
    }

    #[test]
    fn test_mask_selects_trailing_then_front() {
        assert_eq!(Arity(0).mask(), [false, false, false]);
        assert_eq!(Arity(1).mask(), [false, false, true]);
        // the asymmetric 2-parameter form: context + trailing, middle skipped
        assert_eq!(Arity(2).mask(), [true, false, true]);
        assert_eq!(Arity(3).mask(), [true, true, true]);
    }

    #[test]
    fn test_too_many_validation_parameters() {
        let err = Arity::of(&sig(&["ctx", "param", "val1", "val2"]), CallbackRole::Validation)
            .unwrap_err();
        assert_eq!(err, CallbackError::TooManyValidationParameters);
        assert_eq!(
            err.to_string(),
            "Too many CLI parameter callback function parameters"
        );
    }

    #[test]
    fn test_too_many_autocompletion_parameters_names_extras() {
        let err = Arity::of(
            &sig(&["ctx", "args", "incomplete", "val2"]),
            CallbackRole::Autocompletion,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid autocompletion callback parameters: val2"
        );

        let err = Arity::of(
            &sig(&["ctx", "args", "incomplete", "val2", "val3"]),
            CallbackRole::Autocompletion,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid autocompletion callback parameters: val2, val3"
        );
    }
}
