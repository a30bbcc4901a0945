use std::collections::HashMap;

/// Constants every environment starts with.
pub const CONSTANTS: &[(&str, f64)] = &[("pi", std::f64::consts::PI),
                                         ("e", std::f64::consts::E),
                                         ("tau", std::f64::consts::TAU)];

/// Maps variable names to their values.
///
/// A fresh environment holds the [`CONSTANTS`]. Assignments add or overwrite
/// entries, including the constants themselves, for as long as the owning
/// evaluator lives.
///
/// # Example
/// ```
/// use calcbox::interpreter::evaluator::environment::Environment;
///
/// let mut env = Environment::new();
/// assert_eq!(env.get("pi"), Some(std::f64::consts::PI));
///
/// env.set("pi", 3.0);
/// assert_eq!(env.get("pi"), Some(3.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    variables: HashMap<String, f64>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment holding only the built-in constants.
    #[must_use]
    pub fn new() -> Self {
        let variables = CONSTANTS.iter()
                                 .map(|(name, value)| ((*name).to_string(), *value))
                                 .collect();
        Self { variables }
    }

    /// Returns the value bound to `name`. Lookup is case-sensitive.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    /// Binds `name` to `value`, replacing any previous binding.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.variables.insert(name.into(), value);
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl<K: Into<String>> Extend<(K, f64)> for Environment {
    fn extend<T: IntoIterator<Item = (K, f64)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_constants() {
        let env = Environment::default();
        assert_eq!(env.len(), CONSTANTS.len());
        assert_eq!(env.get("e"), Some(std::f64::consts::E));
        assert_eq!(env.get("tau"), Some(std::f64::consts::TAU));
        assert_eq!(env.get("PI"), None);
    }

    #[test]
    fn extend_overrides_constants() {
        let mut env = Environment::new();
        env.extend([("e", 2.0), ("x", 1.5)]);
        assert_eq!(env.get("e"), Some(2.0));
        assert!(env.contains("x"));
        assert_eq!(env.len(), 4);
    }
}
