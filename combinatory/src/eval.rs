use crate::term::{Supplied, Term, TermRef};

/// One rewrite applied somewhere inside a term.
#[derive(Debug)]
pub struct Step {
    pub term: TermRef,
    /// Whether the rewrite was a rule firing. Feeding an argument to a
    /// combinator below its arity changes the tree without changing what it
    /// denotes, and the trace does not show it.
    pub visible: bool,
}

/// Applies the leftmost available rewrite, or returns `None` for a term in
/// normal form. The function side is searched before the argument side, and
/// an apply node supplies its argument only after both sides are settled.
pub fn reduce_once(term: &Term) -> Option<Step> {
    if let Term::Apply(lhs, rhs) = term {
        if let Some(Step { term, visible }) = reduce_once(lhs) {
            return Some(Step {
                term: Term::Apply(term, rhs.clone()).into(),
                visible,
            });
        }
        if let Some(Step { term, visible }) = reduce_once(rhs) {
            return Some(Step {
                term: Term::Apply(lhs.clone(), term).into(),
                visible,
            });
        }
        if let Term::Combinator(prim, supplied) = lhs.as_ref() {
            let (term, visible) = match prim.supply(supplied, rhs) {
                Supplied::Partial(term) => (term, false),
                Supplied::Fired(term) => (term, true),
            };
            return Some(Step { term, visible });
        }
    }
    None
}

/// Pull-driven trace: the seed term first, then every visibly rewritten term
/// in order. Nothing is computed until pulled, so a diverging term costs only
/// as many steps as the caller demands.
pub struct Reductions {
    current: TermRef,
    started: bool,
    finished: bool,
}

pub fn reductions(term: TermRef) -> Reductions {
    Reductions {
        current: term,
        started: false,
        finished: false,
    }
}

impl Reductions {
    /// Runs every remaining rewrite and returns the final term. This can
    /// differ from the last visible term when arguments were still being
    /// accumulated after it, and it does not return on a diverging term.
    pub fn into_normal_form(mut self) -> TermRef {
        while let Some(step) = reduce_once(&self.current) {
            self.current = step.term;
        }
        self.current
    }
}

impl Iterator for Reductions {
    type Item = TermRef;

    fn next(&mut self) -> Option<TermRef> {
        if !self.started {
            self.started = true;
            return Some(self.current.clone());
        }
        while !self.finished {
            match reduce_once(&self.current) {
                Some(Step { term, visible }) => {
                    self.current = term;
                    if visible {
                        return Some(self.current.clone());
                    }
                }
                None => self.finished = true,
            }
        }
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{env::Environment, parser::parse_term, term::Builtin};

    fn trace_in(env: &Environment, src: &str) -> Vec<String> {
        let term = parse_term(env, src).unwrap();
        reductions(term).map(|term| term.to_string()).collect()
    }

    fn trace(src: &str) -> Vec<String> {
        trace_in(&Environment::default(), src)
    }

    #[test]
    fn test_builtin_traces() {
        assert_eq!(trace("Ix"), ["Ix", "x"]);
        assert_eq!(trace("Kxy"), ["Kxy", "x"]);
        assert_eq!(trace("Wab"), ["Wab", "abb"]);
        assert_eq!(trace("Babc"), ["Babc", "a(bc)"]);
        assert_eq!(trace("Cabc"), ["Cabc", "acb"]);
        assert_eq!(trace("SKKx"), ["SKKx", "Kx(Kx)", "x"]);
    }

    #[test]
    fn test_seed_alone_when_already_normal() {
        assert_eq!(trace("x"), ["x"]);
        assert_eq!(trace("ab"), ["ab"]);
        assert_eq!(trace("S"), ["S"]);
    }

    #[test]
    fn test_leftmost_redex_first() {
        // Both sides hold a redex; the function side is rewritten first.
        assert_eq!(trace("(Ia)(Ib)"), ["Ia(Ib)", "a(Ib)", "ab"]);
    }

    #[test]
    fn test_trailing_accumulation_stays_out_of_the_trace() {
        assert_eq!(trace("Ka"), ["Ka"]);
        let env = Environment::default();
        let term = parse_term(&env, "Ka").unwrap();
        let normal = reductions(term).into_normal_form();
        assert_eq!(
            normal.as_ref(),
            &Term::Combinator(Builtin::K, vec![Term::Symbol('a').into()])
        );
        assert_eq!(normal.to_string(), "Ka");
    }

    #[test]
    fn test_into_normal_form() {
        let env = Environment::default();
        let term = parse_term(&env, "SKKx").unwrap();
        assert_eq!(
            reductions(term).into_normal_form().as_ref(),
            &Term::Symbol('x')
        );
    }

    #[test]
    fn test_iterator_fuses() {
        let env = Environment::default();
        let mut steps = reductions(parse_term(&env, "Ix").unwrap());
        assert_eq!(steps.next().unwrap().to_string(), "Ix");
        assert_eq!(steps.next().unwrap().to_string(), "x");
        assert_eq!(steps.next(), None);
        assert_eq!(steps.next(), None);
    }

    #[test]
    fn test_alias_resolves_at_parse_time() {
        let mut env = Environment::default();
        let rhs = parse_term(&env, "I").unwrap();
        env.define('Q', reductions(rhs).into_normal_form());
        // `Q` means the identity combinator from the moment it is parsed.
        assert_eq!(trace_in(&env, "Qa"), ["Ia", "a"]);
    }

    #[test]
    fn test_alias_binds_the_normal_form() {
        let mut env = Environment::default();
        let rhs = parse_term(&env, "SKKx").unwrap();
        env.define('Q', reductions(rhs).into_normal_form());
        assert_eq!(env.resolve('Q').as_ref(), &Term::Symbol('x'));
    }

    #[test]
    fn test_divergent_term_is_pulled_lazily() {
        let env = Environment::default();
        let term = parse_term(&env, "SII(SII)").unwrap();
        let steps = reductions(term).take(20).collect::<Vec<_>>();
        assert_eq!(steps.len(), 20);
        assert_eq!(steps[0].to_string(), "SII(SII)");
    }

    #[test]
    fn test_untouched_subtrees_are_shared_across_steps() {
        let env = Environment::default();
        let term = parse_term(&env, "(Ia)(bc)").unwrap();
        let rhs = match term.as_ref() {
            Term::Apply(_, rhs) => rhs.clone(),
            term => panic!("unexpected parse: {term}"),
        };
        let mut steps = reductions(term);
        steps.next();
        let stepped = steps.next().unwrap();
        match stepped.as_ref() {
            Term::Apply(_, kept) => assert!(TermRef::ptr_eq(kept, &rhs)),
            term => panic!("unexpected step: {term}"),
        }
    }
}
