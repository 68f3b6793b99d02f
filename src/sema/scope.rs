use std::collections::HashMap;

use crate::sema::tree::SymbolId;

#[derive(Clone, Debug, Default)]
pub struct Scope {
    symbols: HashMap<String, SymbolId>,
}

impl Scope {
    pub fn empty() -> Self {
        Scope { symbols: HashMap::new() }
    }

    // false when the name is taken, the first symbol stays
    pub fn add(&mut self, name: &str, symbol: SymbolId) -> bool {
        let mut res = false;

        self.symbols.entry(name.to_string())
            .or_insert_with(|| { res = true; symbol });

        res
    }

    pub fn find(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
