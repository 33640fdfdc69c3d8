use crate::domain::model::Declaration;
use crate::domain::ports::SymbolSource;
use crate::utils::error::Result;

/// Symbol source over a fixed list, for hosts that build declarations themselves.
#[derive(Debug, Clone, Default)]
pub struct InMemorySymbolSource {
    declarations: Vec<Declaration>,
}

impl InMemorySymbolSource {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self { declarations }
    }

    pub fn push(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }
}

impl SymbolSource for InMemorySymbolSource {
    fn find_declarations_with_marker(&self, kind: &str) -> Result<Vec<Declaration>> {
        Ok(self
            .declarations
            .iter()
            .filter(|d| d.has_marker(kind))
            .cloned()
            .collect())
    }
}
