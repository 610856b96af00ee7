//! Entry points for collections whose scalar domain is only known at run time.
//!
//! Each entry point resolves the domain shared by its operands once, promotes plain-number
//! operands into that domain when needed, and runs the generic algorithm with the matching
//! capability set.

use std::borrow::Cow;

use log::debug;
use scalar::{
    resolve_values, AnyArithmetic, Arithmetic, BigDecimal, BigNumberArithmetic, BigRational,
    Complex64, ComplexArithmetic, Domain, FractionArithmetic, FromNumber, NumberArithmetic,
    Quantity, UnitArithmetic, Value,
};

use crate::{
    backward_solve, backward_substitute, decompose, forward_solve, forward_substitute,
    validate::{normalize_rhs_owned, square_order},
    Collection, Config, Error, Lup, Options, Solution,
};

/// A collection tagged with its scalar domain.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyMatrix {
    Number(Collection<f64>),
    BigNumber(Collection<BigDecimal>),
    Fraction(Collection<BigRational>),
    Complex(Collection<Complex64>),
    Unit(Collection<Quantity>),
}

impl AnyMatrix {
    pub fn domain(&self) -> Domain {
        match self {
            AnyMatrix::Number(_) => Domain::Number,
            AnyMatrix::BigNumber(_) => Domain::BigNumber,
            AnyMatrix::Fraction(_) => Domain::Fraction,
            AnyMatrix::Complex(_) => Domain::Complex,
            AnyMatrix::Unit(_) => Domain::Unit,
        }
    }

    pub fn size(&self) -> Vec<usize> {
        match self {
            AnyMatrix::Number(c) => c.size(),
            AnyMatrix::BigNumber(c) => c.size(),
            AnyMatrix::Fraction(c) => c.size(),
            AnyMatrix::Complex(c) => c.size(),
            AnyMatrix::Unit(c) => c.size(),
        }
    }

    /// Builds a dense matrix from rows of mixed scalars.
    ///
    /// The domain is resolved over all elements and every element is converted into it.
    pub fn from_values(rows: Vec<Vec<Value>>, config: &scalar::Config) -> Result<Self, Error> {
        let domain = resolve_values(rows.iter().flatten())?;
        Ok(match domain {
            Domain::Number => AnyMatrix::Number(typed_rows(&rows, domain, config, |v| match v {
                Value::Number(x) => Some(x),
                _ => None,
            })?),
            Domain::BigNumber => {
                AnyMatrix::BigNumber(typed_rows(&rows, domain, config, |v| match v {
                    Value::BigNumber(x) => Some(x),
                    _ => None,
                })?)
            }
            Domain::Fraction => {
                AnyMatrix::Fraction(typed_rows(&rows, domain, config, |v| match v {
                    Value::Fraction(x) => Some(x),
                    _ => None,
                })?)
            }
            Domain::Complex => AnyMatrix::Complex(typed_rows(&rows, domain, config, |v| match v {
                Value::Complex(x) => Some(x),
                _ => None,
            })?),
            Domain::Unit => AnyMatrix::Unit(typed_rows(&rows, domain, config, |v| match v {
                Value::Unit(x) => Some(x),
                _ => None,
            })?),
        })
    }

    /// Builds a one-dimensional vector from mixed scalars.
    pub fn from_value_vector(values: Vec<Value>, config: &scalar::Config) -> Result<Self, Error> {
        let len = values.len();
        let matrix = Self::from_values(vec![values], config)?;
        // a single row of `len` entries, reshaped into a vector
        Ok(match matrix {
            AnyMatrix::Number(c) => AnyMatrix::Number(row_to_vector(c, len)),
            AnyMatrix::BigNumber(c) => AnyMatrix::BigNumber(row_to_vector(c, len)),
            AnyMatrix::Fraction(c) => AnyMatrix::Fraction(row_to_vector(c, len)),
            AnyMatrix::Complex(c) => AnyMatrix::Complex(row_to_vector(c, len)),
            AnyMatrix::Unit(c) => AnyMatrix::Unit(row_to_vector(c, len)),
        })
    }
}

fn typed_rows<T: nalgebra::Scalar>(
    rows: &[Vec<Value>],
    domain: Domain,
    config: &scalar::Config,
    extract: impl Fn(Value) -> Option<T>,
) -> Result<Collection<T>, Error> {
    let typed = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| {
                    let coerced = v.coerce(domain, config)?;
                    extract(coerced).ok_or(scalar::Error::IncompatibleTypes {
                        domains: vec![v.domain(), domain],
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    Collection::from_rows(typed)
}

fn row_to_vector<T: nalgebra::Scalar>(c: Collection<T>, len: usize) -> Collection<T> {
    match c {
        Collection::Dense(m) => {
            Collection::Vector(m.reshape_generic(nalgebra::Dyn(len), nalgebra::U1))
        }
        other => other,
    }
}

impl From<Collection<f64>> for AnyMatrix {
    fn from(c: Collection<f64>) -> Self {
        AnyMatrix::Number(c)
    }
}

impl From<Collection<BigDecimal>> for AnyMatrix {
    fn from(c: Collection<BigDecimal>) -> Self {
        AnyMatrix::BigNumber(c)
    }
}

impl From<Collection<BigRational>> for AnyMatrix {
    fn from(c: Collection<BigRational>) -> Self {
        AnyMatrix::Fraction(c)
    }
}

impl From<Collection<Complex64>> for AnyMatrix {
    fn from(c: Collection<Complex64>) -> Self {
        AnyMatrix::Complex(c)
    }
}

impl From<Collection<Quantity>> for AnyMatrix {
    fn from(c: Collection<Quantity>) -> Self {
        AnyMatrix::Unit(c)
    }
}

/// A factorization in the resolved domain.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyLup {
    Number(Lup<f64>),
    BigNumber(Lup<BigDecimal>),
    Fraction(Lup<BigRational>),
    Complex(Lup<Complex64>),
    Unit(Lup<Quantity>),
}

impl AnyLup {
    pub fn p(&self) -> &[usize] {
        match self {
            AnyLup::Number(lup) => &lup.p,
            AnyLup::BigNumber(lup) => &lup.p,
            AnyLup::Fraction(lup) => &lup.p,
            AnyLup::Complex(lup) => &lup.p,
            AnyLup::Unit(lup) => &lup.p,
        }
    }
}

/// A solution in the resolved domain.
#[derive(Clone, Debug, PartialEq)]
pub enum AnySolution {
    Number(Solution<f64>),
    BigNumber(Solution<BigDecimal>),
    Fraction(Solution<BigRational>),
    Complex(Solution<Complex64>),
    Unit(Solution<Quantity>),
}

impl AnySolution {
    pub fn domain(&self) -> Domain {
        match self {
            AnySolution::Number(_) => Domain::Number,
            AnySolution::BigNumber(_) => Domain::BigNumber,
            AnySolution::Fraction(_) => Domain::Fraction,
            AnySolution::Complex(_) => Domain::Complex,
            AnySolution::Unit(_) => Domain::Unit,
        }
    }

    /// Number of solution vectors.
    pub fn len(&self) -> usize {
        match self {
            AnySolution::Number(s) => s.len(),
            AnySolution::BigNumber(s) => s.len(),
            AnySolution::Fraction(s) => s.len(),
            AnySolution::Complex(s) => s.len(),
            AnySolution::Unit(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Capability sets the dispatcher can run: how to view an [`AnyMatrix`] in the domain, and how
/// to tag results with it.
trait Dispatch: Arithmetic {
    /// Borrows `m` if it already is in this domain, converts it if it can be promoted.
    fn lift<'a>(&self, m: &'a AnyMatrix) -> Result<Cow<'a, Collection<Self::Scalar>>, Error>;

    fn wrap_lup(lup: Lup<Self::Scalar>) -> AnyLup;

    fn wrap_solution(solution: Solution<Self::Scalar>) -> AnySolution;
}

fn incompatible(m: &AnyMatrix, target: Domain) -> Error {
    Error::Arithmetic(scalar::Error::IncompatibleTypes {
        domains: vec![m.domain(), target],
    })
}

fn promote<'a, A: FromNumber>(
    arith: &A,
    m: &'a AnyMatrix,
    own: Option<&'a Collection<A::Scalar>>,
) -> Result<Cow<'a, Collection<A::Scalar>>, Error> {
    match (own, m) {
        (Some(c), _) => Ok(Cow::Borrowed(c)),
        (None, AnyMatrix::Number(c)) => {
            debug!("promoting {:?} number matrix to {}", c.size(), arith.domain());
            Ok(Cow::Owned(c.try_map(|x| arith.from_number(*x))?))
        }
        (None, other) => Err(incompatible(other, arith.domain())),
    }
}

impl Dispatch for NumberArithmetic {
    fn lift<'a>(&self, m: &'a AnyMatrix) -> Result<Cow<'a, Collection<f64>>, Error> {
        match m {
            AnyMatrix::Number(c) => Ok(Cow::Borrowed(c)),
            other => Err(incompatible(other, Domain::Number)),
        }
    }

    fn wrap_lup(lup: Lup<f64>) -> AnyLup {
        AnyLup::Number(lup)
    }

    fn wrap_solution(solution: Solution<f64>) -> AnySolution {
        AnySolution::Number(solution)
    }
}

impl Dispatch for BigNumberArithmetic {
    fn lift<'a>(&self, m: &'a AnyMatrix) -> Result<Cow<'a, Collection<BigDecimal>>, Error> {
        let own = match m {
            AnyMatrix::BigNumber(c) => Some(c),
            _ => None,
        };
        promote(self, m, own)
    }

    fn wrap_lup(lup: Lup<BigDecimal>) -> AnyLup {
        AnyLup::BigNumber(lup)
    }

    fn wrap_solution(solution: Solution<BigDecimal>) -> AnySolution {
        AnySolution::BigNumber(solution)
    }
}

impl Dispatch for FractionArithmetic {
    fn lift<'a>(&self, m: &'a AnyMatrix) -> Result<Cow<'a, Collection<BigRational>>, Error> {
        let own = match m {
            AnyMatrix::Fraction(c) => Some(c),
            _ => None,
        };
        promote(self, m, own)
    }

    fn wrap_lup(lup: Lup<BigRational>) -> AnyLup {
        AnyLup::Fraction(lup)
    }

    fn wrap_solution(solution: Solution<BigRational>) -> AnySolution {
        AnySolution::Fraction(solution)
    }
}

impl Dispatch for ComplexArithmetic {
    fn lift<'a>(&self, m: &'a AnyMatrix) -> Result<Cow<'a, Collection<Complex64>>, Error> {
        let own = match m {
            AnyMatrix::Complex(c) => Some(c),
            _ => None,
        };
        promote(self, m, own)
    }

    fn wrap_lup(lup: Lup<Complex64>) -> AnyLup {
        AnyLup::Complex(lup)
    }

    fn wrap_solution(solution: Solution<Complex64>) -> AnySolution {
        AnySolution::Complex(solution)
    }
}

impl Dispatch for UnitArithmetic {
    fn lift<'a>(&self, m: &'a AnyMatrix) -> Result<Cow<'a, Collection<Quantity>>, Error> {
        match m {
            AnyMatrix::Unit(c) => Ok(Cow::Borrowed(c)),
            other => Err(incompatible(other, Domain::Unit)),
        }
    }

    fn wrap_lup(lup: Lup<Quantity>) -> AnyLup {
        AnyLup::Unit(lup)
    }

    fn wrap_solution(solution: Solution<Quantity>) -> AnySolution {
        AnySolution::Unit(solution)
    }
}

/// Runs `$body` with `$a` bound to the concrete capability set inside `$arith`.
macro_rules! with_arithmetic {
    ($arith:expr, |$a:ident| $body:expr) => {
        match $arith {
            AnyArithmetic::Number($a) => $body,
            AnyArithmetic::BigNumber($a) => $body,
            AnyArithmetic::Fraction($a) => $body,
            AnyArithmetic::Complex($a) => $body,
            AnyArithmetic::Unit($a) => $body,
        }
    };
}

fn resolve(operands: &[&AnyMatrix], config: &Config) -> Result<AnyArithmetic, Error> {
    Ok(AnyArithmetic::resolve(
        operands.iter().map(|m| m.domain()),
        &config.arithmetic,
    )?)
}

#[derive(Clone, Copy, Debug)]
enum Triangle {
    Lower,
    Upper,
}

fn lup_in<A: Dispatch>(arith: &A, a: &AnyMatrix) -> Result<AnyLup, Error> {
    let a = arith.lift(a)?;
    decompose(arith, &a).map(A::wrap_lup)
}

fn substitute_in<A: Dispatch>(
    arith: &A,
    triangle: Triangle,
    m: &AnyMatrix,
    b: Option<&AnyMatrix>,
    options: &Options,
) -> Result<AnySolution, Error> {
    let m = arith.lift(m)?;
    let b = b.map(|b| arith.lift(b)).transpose()?;

    let solution = match (triangle, b) {
        // a promoted right-hand side is already a private copy
        (Triangle::Lower, Some(Cow::Owned(b))) => {
            let b = normalize_rhs_owned(square_order(&m.size())?, Some(b), &arith.zero())?;
            forward_substitute(arith, &m, b, options)?
        }
        (Triangle::Upper, Some(Cow::Owned(b))) => {
            let b = normalize_rhs_owned(square_order(&m.size())?, Some(b), &arith.zero())?;
            backward_substitute(arith, &m, b, options)?
        }
        (Triangle::Lower, b) => forward_solve(arith, &m, b.as_deref(), options)?,
        (Triangle::Upper, b) => backward_solve(arith, &m, b.as_deref(), options)?,
    };
    Ok(A::wrap_solution(solution))
}

fn lusolve_in<A: Dispatch>(
    arith: &A,
    a: &AnyMatrix,
    b: Option<&AnyMatrix>,
    options: &Options,
) -> Result<AnySolution, Error> {
    let a = arith.lift(a)?;
    let n = square_order(&a.size())?;
    let lup = decompose(arith, &a)?;

    let solution = match b.map(|b| arith.lift(b)).transpose()? {
        Some(Cow::Owned(b)) => {
            let b = normalize_rhs_owned(n, Some(b), &arith.zero())?;
            lup.solve_vector(arith, b, options)?
        }
        b => lup.solve(arith, b.as_deref(), options)?,
    };
    Ok(A::wrap_solution(solution))
}

/// LUP factorization of `a` in its own domain.
pub fn lup(a: &AnyMatrix, config: &Config) -> Result<AnyLup, Error> {
    let arith = resolve(&[a], config)?;
    with_arithmetic!(arith, |ar| lup_in(&ar, a))
}

/// Forward substitution `L x = b`, `b` and `L` promoted to a common domain.
pub fn lsolve(l: &AnyMatrix, b: Option<&AnyMatrix>, config: &Config) -> Result<AnySolution, Error> {
    let operands: Vec<&AnyMatrix> = std::iter::once(l).chain(b).collect();
    let arith = resolve(&operands, config)?;
    with_arithmetic!(arith, |ar| {
        substitute_in(&ar, Triangle::Lower, l, b, &config.options)
    })
}

/// Backward substitution `U x = b`, `b` and `U` promoted to a common domain.
pub fn usolve(u: &AnyMatrix, b: Option<&AnyMatrix>, config: &Config) -> Result<AnySolution, Error> {
    let operands: Vec<&AnyMatrix> = std::iter::once(u).chain(b).collect();
    let arith = resolve(&operands, config)?;
    with_arithmetic!(arith, |ar| {
        substitute_in(&ar, Triangle::Upper, u, b, &config.options)
    })
}

/// Solves `A x = b` through the LUP factorization of `A`.
pub fn lusolve(a: &AnyMatrix, b: Option<&AnyMatrix>, config: &Config) -> Result<AnySolution, Error> {
    let operands: Vec<&AnyMatrix> = std::iter::once(a).chain(b).collect();
    let arith = resolve(&operands, config)?;
    with_arithmetic!(arith, |ar| lusolve_in(&ar, a, b, &config.options))
}
