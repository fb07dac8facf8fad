//! A single CFG node's abstract state: a map from variable to [`Sign`].
//!
//! This is the "MapLattice" of §4.4/§4.5 — the product of one [`Sign`]
//! lattice per program variable. A variable absent from the map is treated
//! as `Bottom` (unreachable / never assigned along this path), so an empty
//! map is the lattice's own bottom element.

use rustc_hash::FxHashMap;
use tip_syntax::Ident;

use crate::lattice::Sign;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Env(FxHashMap<Ident, Sign>);

impl Env {
    pub fn new() -> Self {
        Env::default()
    }

    pub fn get(&self, x: &Ident) -> Sign {
        self.0.get(x).copied().unwrap_or(Sign::Bottom)
    }

    pub fn set(&mut self, x: Ident, s: Sign) {
        self.0.insert(x, s);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ident, &Sign)> {
        self.0.iter()
    }

    /// Pointwise join: `⊥` for variables missing from both sides, and the
    /// join of whatever values are present otherwise.
    pub fn join(&self, other: &Env) -> Env {
        let mut result = self.clone();
        for (x, s) in other.iter() {
            let joined = result.get(x).join(*s);
            result.set(x.clone(), joined);
        }
        result
    }

    pub fn join_all<'a>(envs: impl Iterator<Item = &'a Env>) -> Env {
        envs.fold(Env::new(), |acc, e| acc.join(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_defaults_to_bottom() {
        let env = Env::new();
        assert_eq!(env.get(&Ident::new("x")), Sign::Bottom);
    }

    #[test]
    fn join_combines_two_envs_pointwise() {
        let mut a = Env::new();
        a.set(Ident::new("x"), Sign::Pos);
        let mut b = Env::new();
        b.set(Ident::new("x"), Sign::Neg);
        b.set(Ident::new("y"), Sign::Zero);

        let joined = a.join(&b);
        assert_eq!(joined.get(&Ident::new("x")), Sign::Top);
        assert_eq!(joined.get(&Ident::new("y")), Sign::Zero);
    }
}
