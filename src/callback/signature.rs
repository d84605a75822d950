//! Callback signature introspection
//!
//! A user callback declares its formal parameter names when it is registered.
//! The signature carries names only, never types: an "untyped" callback is the
//! normal case, and everything downstream works purely from the name count.

/// Ordered formal parameter names declared by a user callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableSignature {
    names: Vec<String>,
}

impl CallableSignature {
    /// Create a signature from an ordered list of parameter names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CallableSignature {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The declared parameter names, in order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.names.len()
    }
}

/// Anything that carries an inspectable callback signature
pub trait Introspect {
    fn signature(&self) -> &CallableSignature;
}

/// Ordered parameter names of a callback
pub fn parameter_names<C: Introspect>(callable: &C) -> &[String] {
    callable.signature().names()
}
