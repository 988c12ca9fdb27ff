//! Variable registry: the immutable name → index mapping built from the
//! cut-table header.
//!
//! A registry is created once per [`CutTable`](crate::cut::CutTable) and handed
//! out as `Arc<VariableRegistry>` to every [`DataSet`](crate::data::DataSet)
//! projected against it, so the lookup table exists exactly once.

use crate::error::{Result, RgsError};
use std::collections::HashMap;

/// A named variable and its position in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Variable name (unique within a registry).
    pub name: String,
    /// Position in canonical column order.
    pub index: usize,
}

/// Immutable name → index mapping.
///
/// # Examples
///
/// ```
/// use u_cutscan::VariableRegistry;
///
/// let registry = VariableRegistry::new(["pt", "eta"]).unwrap();
/// assert_eq!(registry.resolve("eta").unwrap(), 1);
/// assert!(registry.resolve("phi").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct VariableRegistry {
    variables: Vec<Variable>,
    lookup: HashMap<String, usize>,
}

impl VariableRegistry {
    /// Builds a registry from variable names in canonical order.
    ///
    /// Fails on an empty list, an empty name, or a duplicate name.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut variables = Vec::new();
        let mut lookup = HashMap::new();
        for (index, name) in names.into_iter().enumerate() {
            let name: String = name.into();
            if name.trim().is_empty() {
                return Err(RgsError::config(format!("empty variable name at column {index}")));
            }
            if lookup.insert(name.clone(), index).is_some() {
                return Err(RgsError::config(format!("duplicate variable: {name}")));
            }
            variables.push(Variable { name, index });
        }
        if variables.is_empty() {
            return Err(RgsError::config("registry has no variables"));
        }
        Ok(Self { variables, lookup })
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Index of `name`, or a config error if the registry does not know it.
    pub fn resolve(&self, name: &str) -> Result<usize> {
        self.lookup
            .get(name)
            .copied()
            .ok_or_else(|| RgsError::config(format!("unknown variable: {name}")))
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    /// Name of the variable at `index`.
    pub fn name(&self, index: usize) -> Result<&str> {
        RgsError::check_index("variable", index, self.variables.len())?;
        Ok(&self.variables[index].name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.variables.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Maps every registry variable onto its column in `header`.
    ///
    /// The returned vector is in registry order: entry `i` is the position of
    /// registry variable `i` inside `header`. Columns are matched by name, so
    /// `header` may order or extend its columns freely, but it must contain
    /// every registry variable.
    pub fn project<S: AsRef<str>>(&self, header: &[S]) -> Result<Vec<usize>> {
        let positions: HashMap<&str, usize> = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_ref(), i))
            .collect();

        let mut missing = Vec::new();
        let mut columns = Vec::with_capacity(self.variables.len());
        for var in &self.variables {
            match positions.get(var.name.as_str()) {
                Some(&col) => columns.push(col),
                None => missing.push(var.name.as_str()),
            }
        }
        if !missing.is_empty() {
            return Err(RgsError::config(format!(
                "header is missing variable(s): {}",
                missing.join(", ")
            )));
        }
        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let reg = VariableRegistry::new(["a", "b", "c"]).unwrap();
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.resolve("a").unwrap(), 0);
        assert_eq!(reg.resolve("c").unwrap(), 2);
        assert!(matches!(reg.resolve("d"), Err(RgsError::Config(_))));
    }

    #[test]
    fn test_duplicate_rejected() {
        assert!(VariableRegistry::new(["a", "a"]).is_err());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(VariableRegistry::new(Vec::<String>::new()).is_err());
        assert!(VariableRegistry::new(["a", " "]).is_err());
    }

    #[test]
    fn test_project_reorders_by_name() {
        let reg = VariableRegistry::new(["pt", "eta"]).unwrap();
        let cols = reg.project(&["w", "eta", "phi", "pt"]).unwrap();
        assert_eq!(cols, vec![3, 1]);
    }

    #[test]
    fn test_project_missing_variable() {
        let reg = VariableRegistry::new(["pt", "eta", "met"]).unwrap();
        let err = reg.project(&["pt"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("eta"), "{msg}");
        assert!(msg.contains("met"), "{msg}");
    }

    #[test]
    fn test_name_index_checked() {
        let reg = VariableRegistry::new(["x"]).unwrap();
        assert_eq!(reg.name(0).unwrap(), "x");
        assert!(matches!(reg.name(1), Err(RgsError::Index { .. })));
    }
}
