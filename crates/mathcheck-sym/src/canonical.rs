//! Canonical rational-function form.
//!
//! An expression normalises to `num / den`, both polynomials with exact
//! rational coefficients over [`Atom`]s. Monomials are kept in graded
//! lexicographic order so the leading term of a polynomial is its last key,
//! which is what the division routines rely on.

use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use mathcheck_core::errors::MathcheckError;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::ast::{Constant, Func};
use crate::budget::SimplifyBudget;

const MAX_RADICAL_PASSES: usize = 8;
const TRIAL_DIVISION_LIMIT: u32 = 1000;

/// Bit length of the wider of numerator and denominator.
pub(crate) fn coefficient_bits(value: &BigRational) -> u64 {
    value.numer().bits().max(value.denom().bits())
}

/// Indivisible factor of a monomial.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Atom {
    Symbol(String),
    Constant(Constant),
    /// Function application that could not be evaluated exactly.
    Apply(Func, Box<RationalFn>),
    /// `base ^ exponent`; radicals are `base ^ (1/q)`.
    Power(Box<RationalFn>, Box<RationalFn>),
}

impl Atom {
    /// Root index `q` when this atom is `b^(1/q)` over a polynomial base.
    fn radical_index(&self) -> Option<(&Poly, u32)> {
        let Atom::Power(base, exponent) = self else {
            return None;
        };
        if !base.den.is_one() {
            return None;
        }
        let value = exponent.as_constant()?;
        if !value.numer().is_one() {
            return None;
        }
        let index = u32::try_from(value.denom()).ok()?;
        (index >= 2).then_some((&base.num, index))
    }
}

/// Product of atoms raised to positive integer powers, sorted by atom.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Monomial(Vec<(Atom, u32)>);

impl Monomial {
    fn unit() -> Self {
        Monomial(Vec::new())
    }

    fn atom(atom: Atom) -> Self {
        Monomial(vec![(atom, 1)])
    }

    fn from_map(map: BTreeMap<Atom, u32>) -> Self {
        Monomial(map.into_iter().filter(|(_, exp)| *exp > 0).collect())
    }

    pub(crate) fn factors(&self) -> &[(Atom, u32)] {
        &self.0
    }

    fn is_unit(&self) -> bool {
        self.0.is_empty()
    }

    fn degree(&self) -> u64 {
        self.0.iter().map(|(_, exp)| u64::from(*exp)).sum()
    }

    fn mul(&self, other: &Monomial) -> Monomial {
        let mut map: BTreeMap<Atom, u32> = self.0.iter().cloned().collect();
        for (atom, exp) in &other.0 {
            let slot = map.entry(atom.clone()).or_insert(0);
            *slot = slot.saturating_add(*exp);
        }
        Monomial::from_map(map)
    }

    /// `self / other` when every exponent of `other` fits.
    fn divide(&self, other: &Monomial) -> Option<Monomial> {
        let mut map: BTreeMap<Atom, u32> = self.0.iter().cloned().collect();
        for (atom, exp) in &other.0 {
            let slot = map.get_mut(atom)?;
            if *slot < *exp {
                return None;
            }
            *slot -= exp;
        }
        Some(Monomial::from_map(map))
    }

    fn gcd(&self, other: &Monomial) -> Monomial {
        let theirs: BTreeMap<&Atom, u32> =
            other.0.iter().map(|(atom, exp)| (atom, *exp)).collect();
        Monomial(
            self.0
                .iter()
                .filter_map(|(atom, exp)| {
                    theirs.get(atom).map(|o| (atom.clone(), (*exp).min(*o)))
                })
                .collect(),
        )
    }

    /// Splits off `b^(k/q)` for the first radical atom with `k >= q`, returning
    /// the remaining monomial, the base `b` and the whole power `k / q`.
    fn split_radical(&self) -> Option<(Monomial, Poly, u32)> {
        self.0.iter().enumerate().find_map(|(idx, (atom, count))| {
            let (base, index) = atom.radical_index()?;
            if *count < index {
                return None;
            }
            let mut rest = self.0.clone();
            let remainder = count % index;
            if remainder == 0 {
                rest.remove(idx);
            } else {
                rest[idx].1 = remainder;
            }
            Some((Monomial(rest), base.clone(), count / index))
        })
    }

    fn lex_cmp(&self, other: &Monomial) -> Ordering {
        let (mut i, mut j) = (0, 0);
        loop {
            match (self.0.get(i), other.0.get(j)) {
                (None, None) => return Ordering::Equal,
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (Some((lhs, lexp)), Some((rhs, rexp))) => match lhs.cmp(rhs) {
                    Ordering::Less => return Ordering::Greater,
                    Ordering::Greater => return Ordering::Less,
                    Ordering::Equal if lexp != rexp => return lexp.cmp(rexp),
                    Ordering::Equal => {
                        i += 1;
                        j += 1;
                    }
                },
            }
        }
    }
}

impl Ord for Monomial {
    fn cmp(&self, other: &Self) -> Ordering {
        self.degree()
            .cmp(&other.degree())
            .then_with(|| self.lex_cmp(other))
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sparse polynomial; zero coefficients are never stored.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub(crate) struct Poly {
    terms: BTreeMap<Monomial, BigRational>,
}

impl Poly {
    fn zero() -> Self {
        Poly::default()
    }

    fn constant(value: BigRational) -> Self {
        let mut poly = Poly::zero();
        poly.add_term(Monomial::unit(), value);
        poly
    }

    fn one() -> Self {
        Poly::constant(BigRational::one())
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub(crate) fn is_one(&self) -> bool {
        self.as_constant().is_some_and(|value| value.is_one())
    }

    /// Terms in ascending monomial order.
    pub(crate) fn terms(&self) -> impl DoubleEndedIterator<Item = (&Monomial, &BigRational)> {
        self.terms.iter()
    }

    fn as_constant(&self) -> Option<BigRational> {
        match self.terms.len() {
            0 => Some(BigRational::zero()),
            1 => self.terms.get(&Monomial::unit()).cloned(),
            _ => None,
        }
    }

    fn coefficient_bits(&self) -> u64 {
        self.terms.values().map(coefficient_bits).max().unwrap_or(0)
    }

    fn leading(&self) -> Option<(Monomial, BigRational)> {
        self.terms
            .iter()
            .next_back()
            .map(|(mono, coef)| (mono.clone(), coef.clone()))
    }

    fn add_term(&mut self, mono: Monomial, coef: BigRational) {
        if coef.is_zero() {
            return;
        }
        match self.terms.entry(mono) {
            Entry::Vacant(slot) => {
                slot.insert(coef);
            }
            Entry::Occupied(mut slot) => {
                let sum = slot.get() + &coef;
                if sum.is_zero() {
                    slot.remove();
                } else {
                    *slot.get_mut() = sum;
                }
            }
        }
    }

    fn add(&self, other: &Poly, budget: &SimplifyBudget) -> Result<Poly, MathcheckError> {
        let mut out = self.clone();
        for (mono, coef) in &other.terms {
            out.add_term(mono.clone(), coef.clone());
        }
        budget.check_terms(out.terms.len())?;
        Ok(out)
    }

    fn neg(&self) -> Poly {
        Poly {
            terms: self
                .terms
                .iter()
                .map(|(mono, coef)| (mono.clone(), -coef))
                .collect(),
        }
    }

    fn scale(&self, factor: &BigRational) -> Poly {
        self.mul_term(&Monomial::unit(), factor)
    }

    fn mul_term(&self, mono: &Monomial, coef: &BigRational) -> Poly {
        let mut out = Poly::zero();
        for (own, own_coef) in &self.terms {
            out.add_term(own.mul(mono), own_coef * coef);
        }
        out
    }

    fn mul(&self, other: &Poly, budget: &SimplifyBudget) -> Result<Poly, MathcheckError> {
        let mut out = Poly::zero();
        for (lhs, lcoef) in &self.terms {
            for (rhs, rcoef) in &other.terms {
                out.add_term(lhs.mul(rhs), lcoef * rcoef);
            }
            budget.check_terms(out.terms.len())?;
        }
        budget.check_coefficient_bits(out.coefficient_bits())?;
        Ok(out)
    }

    fn pow(&self, exponent: u32, budget: &SimplifyBudget) -> Result<Poly, MathcheckError> {
        // Multinomial coefficients add at most log2(terms) bits per factor.
        let growth = u64::from(usize::BITS - self.terms.len().leading_zeros());
        budget.check_coefficient_bits(
            (self.coefficient_bits() + growth).saturating_mul(u64::from(exponent)),
        )?;
        let mut result = Poly::one();
        let mut base = self.clone();
        let mut remaining = exponent;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.mul(&base, budget)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.mul(&base, budget)?;
            }
        }
        Ok(result)
    }

    fn monomial_content(&self) -> Monomial {
        let mut iter = self.terms.keys();
        let Some(first) = iter.next() else {
            return Monomial::unit();
        };
        iter.fold(first.clone(), |acc, mono| acc.gcd(mono))
    }

    fn divide_monomial(&self, divisor: &Monomial) -> Poly {
        Poly {
            terms: self
                .terms
                .iter()
                .map(|(mono, coef)| {
                    let reduced = mono.divide(divisor).unwrap_or_else(|| mono.clone());
                    (reduced, coef.clone())
                })
                .collect(),
        }
    }

    fn monic(&self) -> Poly {
        match self.leading() {
            Some((_, lead)) if !lead.is_one() => self.scale(&lead.recip()),
            _ => self.clone(),
        }
    }

    /// Multivariate division; terms whose leading monomial is not divisible
    /// move to the remainder.
    fn div_rem(
        &self,
        divisor: &Poly,
        budget: &SimplifyBudget,
    ) -> Result<(Poly, Poly), MathcheckError> {
        let Some((lead_mono, lead_coef)) = divisor.leading() else {
            return Err(MathcheckError::eval("division_by_zero", "polynomial division by zero"));
        };
        let mut working = self.clone();
        let mut quotient = Poly::zero();
        let mut remainder = Poly::zero();
        while let Some((mono, coef)) = working.leading() {
            match mono.divide(&lead_mono) {
                Some(factor) => {
                    let scale = &coef / &lead_coef;
                    working = working.add(&divisor.mul_term(&factor, &scale).neg(), budget)?;
                    quotient.add_term(factor, scale);
                }
                None => {
                    working.terms.remove(&mono);
                    remainder.add_term(mono, coef);
                }
            }
            budget.check_terms(quotient.terms.len() + remainder.terms.len())?;
        }
        Ok((quotient, remainder))
    }

    fn div_exact(
        &self,
        divisor: &Poly,
        budget: &SimplifyBudget,
    ) -> Result<Option<Poly>, MathcheckError> {
        let (quotient, remainder) = self.div_rem(divisor, budget)?;
        Ok(remainder.is_zero().then_some(quotient))
    }
}

/// The single atom shared by every non-constant monomial, if any.
fn sole_atom<'a>(polys: &[&'a Poly]) -> Option<&'a Atom> {
    let mut found: Option<&Atom> = None;
    for poly in polys.iter().copied() {
        for mono in poly.terms.keys() {
            match mono.0.as_slice() {
                [] => {}
                [(atom, _)] => match found {
                    None => found = Some(atom),
                    Some(prev) if prev == atom => {}
                    Some(_) => return None,
                },
                _ => return None,
            }
        }
    }
    found
}

fn univariate_gcd(
    lhs: &Poly,
    rhs: &Poly,
    budget: &SimplifyBudget,
) -> Result<Option<Poly>, MathcheckError> {
    if sole_atom(&[lhs, rhs]).is_none() {
        return Ok(None);
    }
    let (mut a, mut b) = (lhs.clone(), rhs.clone());
    while !b.is_zero() {
        let (_, remainder) = a.div_rem(&b, budget)?;
        a = b;
        b = remainder;
    }
    Ok(Some(a.monic()))
}

fn reduce_radicals(poly: Poly, budget: &SimplifyBudget) -> Result<Poly, MathcheckError> {
    let mut current = poly;
    for _ in 0..MAX_RADICAL_PASSES {
        let mut changed = false;
        let mut next = Poly::zero();
        for (mono, coef) in current.terms {
            match mono.split_radical() {
                Some((rest, base, whole)) => {
                    changed = true;
                    let expanded = base.pow(whole, budget)?.mul_term(&rest, &coef);
                    next = next.add(&expanded, budget)?;
                }
                None => next.add_term(mono, coef),
            }
        }
        current = next;
        if !changed {
            break;
        }
    }
    Ok(current)
}

/// Splits `n` into `outside^q * inside` with `inside` free of `q`-th powers
/// among small primes.
fn integer_root_split(n: &BigUint, q: u32) -> (BigUint, BigUint) {
    let root = n.nth_root(q);
    if root.pow(q) == *n {
        return (root, BigUint::one());
    }
    let mut rest = n.clone();
    let mut outside = BigUint::one();
    let mut inside = BigUint::one();
    for candidate in 2..=TRIAL_DIVISION_LIMIT {
        let divisor = BigUint::from(candidate);
        if &divisor * &divisor > rest {
            break;
        }
        let mut count = 0u32;
        while (&rest % &divisor).is_zero() {
            rest /= &divisor;
            count += 1;
        }
        outside *= divisor.pow(count / q);
        inside *= divisor.pow(count % q);
    }
    let root = rest.nth_root(q);
    if root.pow(q) == rest {
        outside *= root;
    } else {
        inside *= rest;
    }
    (outside, inside)
}

fn rational_pow_int(value: &BigRational, exponent: u32) -> BigRational {
    BigRational::new(value.numer().pow(exponent), value.denom().pow(exponent))
}

/// Canonical `num / den` with a monic denominator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct RationalFn {
    num: Poly,
    den: Poly,
}

impl RationalFn {
    pub(crate) fn constant(value: BigRational) -> Self {
        RationalFn {
            num: Poly::constant(value),
            den: Poly::one(),
        }
    }

    pub(crate) fn zero() -> Self {
        RationalFn::constant(BigRational::zero())
    }

    pub(crate) fn one() -> Self {
        RationalFn::constant(BigRational::one())
    }

    pub(crate) fn from_atom(atom: Atom) -> Self {
        let mut num = Poly::zero();
        num.add_term(Monomial::atom(atom), BigRational::one());
        RationalFn { num, den: Poly::one() }
    }

    pub(crate) fn numerator(&self) -> &Poly {
        &self.num
    }

    pub(crate) fn denominator(&self) -> &Poly {
        &self.den
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    fn is_one(&self) -> bool {
        self.num.is_one() && self.den.is_one()
    }

    pub(crate) fn as_constant(&self) -> Option<BigRational> {
        if self.den.is_one() {
            self.num.as_constant()
        } else {
            None
        }
    }

    fn normalize(num: Poly, den: Poly, budget: &SimplifyBudget) -> Result<Self, MathcheckError> {
        let num = reduce_radicals(num, budget)?;
        let den = reduce_radicals(den, budget)?;
        if den.is_zero() {
            return Err(MathcheckError::eval(
                "division_by_zero",
                "denominator simplifies to zero",
            ));
        }
        if num.is_zero() {
            return Ok(RationalFn::zero());
        }
        if let Some(value) = den.as_constant() {
            return RationalFn {
                num: num.scale(&value.recip()),
                den: Poly::one(),
            }
            .within(budget);
        }

        let common = num.monomial_content().gcd(&den.monomial_content());
        let (mut num, mut den) = if common.is_unit() {
            (num, den)
        } else {
            (num.divide_monomial(&common), den.divide_monomial(&common))
        };

        if let Some(quotient) = num.div_exact(&den, budget)? {
            return Ok(RationalFn {
                num: quotient,
                den: Poly::one(),
            });
        }
        if let Some(quotient) = den.div_exact(&num, budget)? {
            num = Poly::one();
            den = quotient;
        } else if let Some(gcd) = univariate_gcd(&num, &den, budget)? {
            if gcd.as_constant().is_none() {
                let reduced_num = num.div_exact(&gcd, budget)?;
                let reduced_den = den.div_exact(&gcd, budget)?;
                if let (Some(n), Some(d)) = (reduced_num, reduced_den) {
                    num = n;
                    den = d;
                }
            }
        }

        if let Some(value) = den.as_constant() {
            return RationalFn {
                num: num.scale(&value.recip()),
                den: Poly::one(),
            }
            .within(budget);
        }
        let lead = den.leading().map(|(_, coef)| coef).unwrap_or_else(BigRational::one);
        let factor = lead.recip();
        RationalFn {
            num: num.scale(&factor),
            den: den.scale(&factor),
        }
        .within(budget)
    }

    fn within(self, budget: &SimplifyBudget) -> Result<Self, MathcheckError> {
        budget.check_coefficient_bits(self.num.coefficient_bits().max(self.den.coefficient_bits()))?;
        Ok(self)
    }

    pub(crate) fn neg(&self) -> Self {
        RationalFn {
            num: self.num.neg(),
            den: self.den.clone(),
        }
    }

    pub(crate) fn add(&self, other: &Self, budget: &SimplifyBudget) -> Result<Self, MathcheckError> {
        if self.den == other.den {
            let num = self.num.add(&other.num, budget)?;
            return RationalFn::normalize(num, self.den.clone(), budget);
        }
        let num = self
            .num
            .mul(&other.den, budget)?
            .add(&other.num.mul(&self.den, budget)?, budget)?;
        let den = self.den.mul(&other.den, budget)?;
        RationalFn::normalize(num, den, budget)
    }

    pub(crate) fn sub(&self, other: &Self, budget: &SimplifyBudget) -> Result<Self, MathcheckError> {
        self.add(&other.neg(), budget)
    }

    pub(crate) fn mul(&self, other: &Self, budget: &SimplifyBudget) -> Result<Self, MathcheckError> {
        let num = self.num.mul(&other.num, budget)?;
        let den = self.den.mul(&other.den, budget)?;
        RationalFn::normalize(num, den, budget)
    }

    pub(crate) fn div(&self, other: &Self, budget: &SimplifyBudget) -> Result<Self, MathcheckError> {
        if other.is_zero() {
            return Err(MathcheckError::eval("division_by_zero", "divisor simplifies to zero"));
        }
        let num = self.num.mul(&other.den, budget)?;
        let den = self.den.mul(&other.num, budget)?;
        RationalFn::normalize(num, den, budget)
    }

    fn pow_int(&self, exponent: &BigInt, budget: &SimplifyBudget) -> Result<Self, MathcheckError> {
        let magnitude = budget.check_exponent(exponent)?;
        if magnitude == 0 {
            return Ok(RationalFn::one());
        }
        let num = self.num.pow(magnitude, budget)?;
        let den = self.den.pow(magnitude, budget)?;
        if exponent.is_negative() {
            RationalFn::normalize(den, num, budget)
        } else {
            RationalFn::normalize(num, den, budget)
        }
    }

    /// `self ^ exponent` with exact evaluation where the exponent is rational.
    pub(crate) fn pow(
        &self,
        exponent: &Self,
        budget: &SimplifyBudget,
    ) -> Result<Self, MathcheckError> {
        let Some(value) = exponent.as_constant() else {
            if self.is_one() {
                return Ok(RationalFn::one());
            }
            return Ok(RationalFn::from_atom(Atom::Power(
                Box::new(self.clone()),
                Box::new(exponent.clone()),
            )));
        };
        if value.is_integer() {
            return self.pow_int(value.numer(), budget);
        }
        let index = budget.check_exponent(value.denom())?;
        budget.check_exponent(value.numer())?;
        match self.as_constant() {
            Some(base) => rational_power(&base, value.numer(), index, budget),
            None => {
                let (whole, fraction) = value.numer().div_mod_floor(&BigInt::from(index));
                let radical = RationalFn::from_atom(Atom::Power(
                    Box::new(self.clone()),
                    Box::new(RationalFn::constant(BigRational::new(
                        BigInt::one(),
                        BigInt::from(index),
                    ))),
                ));
                self.pow_int(&whole, budget)?
                    .mul(&radical.pow_int(&fraction, budget)?, budget)
            }
        }
    }

    /// Applies a named function, evaluating the handful of exact values.
    pub(crate) fn apply(
        func: Func,
        arg: &Self,
        budget: &SimplifyBudget,
    ) -> Result<Self, MathcheckError> {
        let pi = RationalFn::from_atom(Atom::Constant(Constant::Pi));
        let e = RationalFn::from_atom(Atom::Constant(Constant::E));
        let value = match func {
            Func::Sqrt => {
                let half = RationalFn::constant(BigRational::new(BigInt::one(), BigInt::from(2)));
                return arg.pow(&half, budget);
            }
            Func::Exp => return e.pow(arg, budget),
            Func::Abs => arg.as_constant().map(|c| c.abs()),
            Func::Log if arg.is_one() => Some(BigRational::zero()),
            Func::Log if *arg == e => Some(BigRational::one()),
            Func::Sin | Func::Tan if arg.is_zero() || *arg == pi => Some(BigRational::zero()),
            Func::Cos if arg.is_zero() => Some(BigRational::one()),
            Func::Cos if *arg == pi => Some(-BigRational::one()),
            _ => None,
        };
        Ok(match value {
            Some(value) => RationalFn::constant(value),
            None => RationalFn::from_atom(Atom::Apply(func, Box::new(arg.clone()))),
        })
    }
}

/// `base ^ (numer / index)` for a rational base, leaving an irreducible
/// radical when the root is not exact.
fn rational_power(
    base: &BigRational,
    numer: &BigInt,
    index: u32,
    budget: &SimplifyBudget,
) -> Result<RationalFn, MathcheckError> {
    if base.is_zero() {
        if numer.is_negative() {
            return Err(MathcheckError::eval(
                "division_by_zero",
                "zero raised to a negative power",
            ));
        }
        return Ok(RationalFn::zero());
    }
    let magnitude = budget.check_exponent(numer)?;
    budget.check_coefficient_bits(coefficient_bits(base).saturating_mul(u64::from(magnitude)))?;
    let mut powered = rational_pow_int(base, magnitude);
    if numer.is_negative() {
        powered = powered.recip();
    }
    // (n/d)^(1/q) = (n * d^(q-1))^(1/q) / d
    let denom = powered.denom().clone();
    budget.check_coefficient_bits(
        powered.numer().bits() + denom.bits().saturating_mul(u64::from(index - 1)),
    )?;
    let radicand = powered.numer() * denom.pow(index - 1);
    let negative = radicand.is_negative();
    let (outside, inside) = integer_root_split(radicand.magnitude(), index);
    let odd_root = index % 2 == 1;

    let mut coefficient = BigRational::new(BigInt::from(outside), denom);
    if negative && odd_root {
        coefficient = -coefficient;
    }
    let inside = BigInt::from(inside);
    let inside = if negative && !odd_root { -inside } else { inside };
    if inside.is_one() {
        return Ok(RationalFn::constant(coefficient));
    }
    let radical = RationalFn::from_atom(Atom::Power(
        Box::new(RationalFn::constant(BigRational::from_integer(inside))),
        Box::new(RationalFn::constant(BigRational::new(
            BigInt::one(),
            BigInt::from(index),
        ))),
    ));
    RationalFn::constant(coefficient).mul(&radical, budget)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Atom {
        Atom::Symbol(name.to_string())
    }

    #[test]
    fn graded_order_puts_higher_degree_last() {
        let x2 = Monomial(vec![(sym("x"), 2)]);
        let xy = Monomial(vec![(sym("x"), 1), (sym("y"), 1)]);
        let y2 = Monomial(vec![(sym("y"), 2)]);
        let x = Monomial::atom(sym("x"));
        assert!(x < y2);
        assert!(y2 < xy);
        assert!(xy < x2);
        assert!(Monomial::unit() < x);
    }

    #[test]
    fn root_split_pulls_out_perfect_powers() {
        let (outside, inside) = integer_root_split(&BigUint::from(72u32), 2);
        assert_eq!(outside, BigUint::from(6u32));
        assert_eq!(inside, BigUint::from(2u32));
        let (outside, inside) = integer_root_split(&BigUint::from(27u32), 3);
        assert_eq!(outside, BigUint::from(3u32));
        assert!(inside.is_one());
    }

    #[test]
    fn negative_square_root_keeps_unit_radical() {
        let budget = SimplifyBudget::default();
        let minus_four = BigRational::from_integer((-4).into());
        let root = rational_power(&minus_four, &BigInt::one(), 2, &budget).unwrap();
        assert!(root.as_constant().is_none());
        let squared = root.mul(&root, &budget).unwrap();
        assert_eq!(squared.as_constant(), Some(minus_four));
    }

    #[test]
    fn coefficient_growth_is_bounded() {
        let budget = SimplifyBudget::default();
        let big = RationalFn::constant(BigRational::from_integer(BigInt::from(10).pow(256)));
        let exponent = RationalFn::constant(BigRational::from_integer(BigInt::from(256)));
        let err = big.pow(&exponent, &budget).unwrap_err();
        assert_eq!(err.info().code, "max_coefficient_bits");

        let x = RationalFn::from_atom(sym("x"));
        let wide = x.add(&big, &budget).unwrap();
        assert!(wide.pow(&exponent, &budget).is_err());
    }

    #[test]
    fn exact_division_cancels_common_factor() {
        let budget = SimplifyBudget::default();
        let x = RationalFn::from_atom(sym("x"));
        let one = RationalFn::one();
        let num = x.mul(&x, &budget).unwrap().sub(&one, &budget).unwrap();
        let den = x.sub(&one, &budget).unwrap();
        let quotient = num.div(&den, &budget).unwrap();
        assert_eq!(quotient, x.add(&one, &budget).unwrap());
    }

    #[test]
    fn univariate_gcd_reduces_fraction() {
        let budget = SimplifyBudget::default();
        let x = RationalFn::from_atom(sym("x"));
        let one = RationalFn::one();
        let x2 = x.mul(&x, &budget).unwrap();
        // (x^2 - 1) / (x^2 + 2x + 1) = (x - 1) / (x + 1)
        let num = x2.sub(&one, &budget).unwrap();
        let two_x = x.add(&x, &budget).unwrap();
        let den = x2.add(&two_x, &budget).unwrap().add(&one, &budget).unwrap();
        let reduced = num.div(&den, &budget).unwrap();
        let expected = x
            .sub(&one, &budget)
            .unwrap()
            .div(&x.add(&one, &budget).unwrap(), &budget)
            .unwrap();
        assert_eq!(reduced, expected);
        assert_eq!(reduced.denominator().terms().count(), 2);
    }
}
