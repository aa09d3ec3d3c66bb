use rpds::HashTrieMap;

use crate::term::{Builtin, Term, TermRef};

/// Single-letter bindings visible to the parser. Cheap to clone; a
/// definition added after a term was parsed does not affect that term.
#[derive(Clone, Debug)]
pub struct Environment {
    bindings: HashTrieMap<char, TermRef>,
}

impl Default for Environment {
    fn default() -> Self {
        use Builtin::*;
        let mut bindings = HashTrieMap::new();
        for (name, prim) in [('S', S), ('K', K), ('I', I), ('B', B), ('C', C), ('W', W)] {
            bindings = bindings.insert(name, Term::Combinator(prim, vec![]).into());
        }
        Self { bindings }
    }
}

impl Environment {
    /// Meaning of one atom: its binding if defined, otherwise itself.
    pub fn resolve(&self, name: char) -> TermRef {
        self.bindings
            .get(&name)
            .cloned()
            .unwrap_or_else(|| Term::Symbol(name).into())
    }

    pub fn define(&mut self, name: char, term: TermRef) {
        self.bindings = self.bindings.insert(name, term);
    }
}
