use std::rc::Rc;

pub type TermRef = Rc<Term>;

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Term {
    /// An uninterpreted atom, irreducible on its own.
    Symbol(char),
    /// A built-in rule together with the arguments supplied so far; the
    /// argument count stays strictly below the rule's arity.
    Combinator(Builtin, Vec<TermRef>),
    /// `f x`; chains associate left.
    Apply(TermRef, TermRef),
}

#[derive(PartialEq, Eq, Clone, Copy, derive_more::Display, Debug)]
pub enum Builtin {
    #[display(fmt = "S")]
    S,
    #[display(fmt = "K")]
    K,
    #[display(fmt = "I")]
    I,
    #[display(fmt = "B")]
    B,
    #[display(fmt = "C")]
    C,
    #[display(fmt = "W")]
    W,
}

/// Result of handing one argument to a combinator.
#[derive(Debug)]
pub enum Supplied {
    /// The argument was only accumulated; no rule fired.
    Partial(TermRef),
    /// The final argument arrived and the rule rewrote the redex.
    Fired(TermRef),
}

impl Builtin {
    pub fn arity(self) -> usize {
        use Builtin::*;
        match self {
            S | B | C => 3,
            K | W => 2,
            I => 1,
        }
    }

    /// S x y z = (x z)(y z)    B x y z = x (y z)
    /// K x y   = x             C x y z = (x z) y
    /// I x     = x             W x y   = (x y) y
    fn rewrite(self, args: &[TermRef]) -> Shape {
        use Builtin::*;
        match (self, args) {
            (S, [x, y, z]) => Shape::pair(
                Shape::pair(x.into(), z.into()),
                Shape::pair(y.into(), z.into()),
            ),
            (K, [x, _]) => x.into(),
            (I, [x]) => x.into(),
            (B, [x, y, z]) => Shape::pair(x.into(), Shape::pair(y.into(), z.into())),
            (C, [x, y, z]) => Shape::pair(Shape::pair(x.into(), z.into()), y.into()),
            (W, [x, y]) => Shape::pair(Shape::pair(x.into(), y.into()), y.into()),
            _ => unreachable!("{self} fired with {} arguments", args.len()),
        }
    }

    /// Hands one more argument to the combinator. The rule fires exactly when
    /// the argument list reaches the arity, so a full combinator never
    /// survives as a value.
    pub fn supply(self, supplied: &[TermRef], arg: &TermRef) -> Supplied {
        let mut args = supplied.to_vec();
        args.push(arg.clone());
        if args.len() < self.arity() {
            Supplied::Partial(Term::Combinator(self, args).into())
        } else {
            Supplied::Fired(self.rewrite(&args).into_term())
        }
    }
}

/// Intermediate shape of a rewrite result, materialized into `Apply` nodes
/// before anything else sees it.
enum Shape {
    Leaf(TermRef),
    Pair(Box<Shape>, Box<Shape>),
}

impl From<&TermRef> for Shape {
    fn from(term: &TermRef) -> Self {
        Shape::Leaf(term.clone())
    }
}

impl Shape {
    fn pair(lhs: Shape, rhs: Shape) -> Self {
        Shape::Pair(lhs.into(), rhs.into())
    }

    fn into_term(self) -> TermRef {
        match self {
            Shape::Leaf(term) => term,
            Shape::Pair(lhs, rhs) => Term::Apply(lhs.into_term(), rhs.into_term()).into(),
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn fmt_rec(
            term: &Term,
            bracket: bool,
            f: &mut std::fmt::Formatter<'_>,
        ) -> std::fmt::Result {
            match term {
                Term::Symbol(name) => f.write_fmt(format_args!("{name}")),
                Term::Combinator(prim, supplied) => {
                    let bracket = bracket && !supplied.is_empty();
                    if bracket {
                        f.write_str("(")?;
                    }
                    f.write_fmt(format_args!("{prim}"))?;
                    for arg in supplied {
                        fmt_rec(arg, true, f)?;
                    }
                    if bracket {
                        f.write_str(")")?;
                    }
                    Ok(())
                }
                Term::Apply(lhs, rhs) => {
                    if bracket {
                        f.write_str("(")?;
                    }
                    fmt_rec(lhs, false, f)?;
                    fmt_rec(rhs, true, f)?;
                    if bracket {
                        f.write_str(")")?;
                    }
                    Ok(())
                }
            }
        }
        fmt_rec(self, false, f)
    }
}
