//! Abstract evaluation of an expression under an [`Env`].

use tip_syntax::{ArithOp, CompOp, Expr};

use crate::env::Env;
use crate::lattice::Sign;

pub fn eval(env: &Env, expr: &Expr) -> Sign {
    match expr {
        Expr::Id(x) => env.get(x),
        Expr::Int(n) => Sign::of_int(*n),
        // `input` may be any integer the user types in.
        Expr::Input => Sign::Top,
        Expr::Arithmetic(l, op, r) => {
            let (a, b) = (eval(env, l), eval(env, r));
            match op {
                ArithOp::Add => a.add(b),
                ArithOp::Sub => a.sub(b),
                ArithOp::Mul => a.mul(b),
                ArithOp::Div => a.div(b),
            }
        }
        // `Zero` stands for false and `Pos` for true here, matching the
        // comparison-result convention `gt`/`eq` are defined against.
        Expr::Comparison(l, op, r) => {
            let (a, b) = (eval(env, l), eval(env, r));
            match op {
                CompOp::Gt => a.gt(b),
                CompOp::Eq => a.eq(b),
            }
        }
        // Pointers, records, calls and `null` carry no tracked integer
        // sign; they are conservatively unknown.
        Expr::Null
        | Expr::Reference(_)
        | Expr::Dereference(_)
        | Expr::Allocation(_)
        | Expr::FunctionCall(..)
        | Expr::Record(_)
        | Expr::FieldAccess(..) => Sign::Top,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tip_syntax::Ident;

    #[test]
    fn arithmetic_on_literals() {
        let env = Env::new();
        let e = Expr::arithmetic(Expr::Int(2), ArithOp::Mul, Expr::Int(-3));
        assert_eq!(eval(&env, &e), Sign::Neg);
    }

    #[test]
    fn unbound_variable_is_bottom() {
        let env = Env::new();
        assert_eq!(eval(&env, &Expr::Id(Ident::new("x"))), Sign::Bottom);
    }

    #[test]
    fn input_is_top() {
        let env = Env::new();
        assert_eq!(eval(&env, &Expr::Input), Sign::Top);
    }

    #[test]
    fn comparison_dispatches_to_the_matching_table() {
        let env = Env::new();
        let gt = Expr::comparison(Expr::Int(0), tip_syntax::CompOp::Gt, Expr::Int(-1));
        assert_eq!(eval(&env, &gt), Sign::Pos);
        let eq = Expr::comparison(Expr::Int(3), tip_syntax::CompOp::Eq, Expr::Int(3));
        assert_eq!(eval(&env, &eq), Sign::Top);
    }
}
