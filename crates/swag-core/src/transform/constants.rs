use std::collections::HashMap;

use crate::ir::IrConstant;

/// Deduplicates literal text into shared `_CONSTANT<N>` names. Names are
/// assigned in first-seen order; an identical value always gets back the
/// name it was first given.
#[derive(Debug, Default)]
pub struct ConstantInterner {
    entries: Vec<IrConstant>,
    by_value: HashMap<String, usize>,
}

impl ConstantInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get-or-create the name for `value`.
    pub fn intern(&mut self, value: impl Into<String>) -> String {
        let value = value.into();
        if let Some(&idx) = self.by_value.get(&value) {
            return self.entries[idx].name.clone();
        }
        let name = format!("_CONSTANT{}", self.entries.len());
        log::debug!("interned {name} = {value}");
        self.by_value.insert(value.clone(), self.entries.len());
        self.entries.push(IrConstant {
            name: name.clone(),
            value,
        });
        name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_constants(self) -> Vec<IrConstant> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_values_share_a_name() {
        let mut interner = ConstantInterner::new();
        let a = interner.intern("{ headers: {} }");
        let b = interner.intern("{ headers: {} }".to_string());
        assert_eq!(a, "_CONSTANT0");
        assert_eq!(a, b);
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn test_distinct_values_numbered_in_first_seen_order() {
        let mut interner = ConstantInterner::new();
        assert_eq!(interner.intern("b"), "_CONSTANT0");
        assert_eq!(interner.intern("a"), "_CONSTANT1");
        assert_eq!(interner.intern("b"), "_CONSTANT0");
        assert_eq!(interner.intern("c"), "_CONSTANT2");

        let constants = interner.into_constants();
        let values: Vec<&str> = constants.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["b", "a", "c"]);
    }
}
