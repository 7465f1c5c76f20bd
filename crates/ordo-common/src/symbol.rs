use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::sync::RwLock;

/// An interned identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(u32);

impl Symbol {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Default)]
struct InternerState {
    lookup: FxHashMap<SmolStr, Symbol>,
    names: Vec<SmolStr>,
}

/// Thread-safe interner mapping identifier text to symbols and back.
#[derive(Debug, Default)]
pub struct SymbolInterner {
    state: RwLock<InternerState>,
}

impl SymbolInterner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, name: &str) -> Symbol {
        if let Some(&sym) = self.state.read().unwrap().lookup.get(name) {
            return sym;
        }

        let mut state = self.state.write().unwrap();

        // Another writer may have interned it between the read and write locks
        if let Some(&sym) = state.lookup.get(name) {
            return sym;
        }

        let sym = Symbol(state.names.len() as u32);
        let name = SmolStr::new(name);
        state.names.push(name.clone());
        state.lookup.insert(name, sym);
        sym
    }

    pub fn resolve(&self, sym: Symbol) -> SmolStr {
        self.state.read().unwrap().names[sym.index()].clone()
    }
}
