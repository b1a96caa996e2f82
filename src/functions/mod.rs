pub mod arithmetic;
pub mod constants;
pub mod exponential;
pub mod trigonometry;

use crate::error::CalcError;
use std::collections::HashMap;
use std::sync::OnceLock;

pub type Function = fn(&[f64]) -> Result<f64, CalcError>;

/// The allow-list of callable functions. It is built once per process and only
/// handed out by shared reference, so nothing can add to it after start-up.
pub struct FunctionTable {
    functions: HashMap<&'static str, Function>,
}

impl FunctionTable {
    pub fn global() -> &'static FunctionTable {
        static TABLE: OnceLock<FunctionTable> = OnceLock::new();
        TABLE.get_or_init(FunctionTable::build)
    }

    fn build() -> Self {
        let mut table = FunctionTable {
            functions: HashMap::new(),
        };
        trigonometry::register(&mut table);
        exponential::register(&mut table);
        arithmetic::register(&mut table);
        table
    }

    fn register(&mut self, name: &'static str, function: Function) {
        self.functions.insert(name, function);
    }

    pub fn get(&self, name: &str) -> Option<Function> {
        self.functions.get(name).copied()
    }

    /// Sorted function names.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
