//! Selection of the single arithmetic domain shared by a set of operands.

use log::debug;

use crate::{
    BigNumberArithmetic, ComplexArithmetic, Config, Domain, Error, FractionArithmetic,
    NumberArithmetic, UnitArithmetic, Value,
};

/// Determines the common domain of a set of operands.
///
/// * every operand in one domain: that domain.
/// * exactly two domains, one of them `Number`, the other able to absorb numbers: the other
///   domain (numbers get promoted).
/// * anything else is an [`Error::IncompatibleTypes`]; no operands is [`Error::NoOperands`].
///
/// The cost is linear in the number of operands. Callers pass one domain per collection, not
/// one per element.
pub fn resolve_domain<I>(domains: I) -> Result<Domain, Error>
where
    I: IntoIterator<Item = Domain>,
{
    let mut found: Vec<Domain> = Vec::new();
    for domain in domains {
        if !found.contains(&domain) {
            found.push(domain);
        }
    }

    let resolved = match found.as_slice() {
        [] => return Err(Error::NoOperands),
        [single] => *single,
        [Domain::Number, other] | [other, Domain::Number] if other.has_from_number() => *other,
        _ => {
            found.sort();
            return Err(Error::IncompatibleTypes { domains: found });
        }
    };

    debug!("resolved arithmetic domain {} from {:?}", resolved, found);
    Ok(resolved)
}

/// [`resolve_domain`] over scalar operands.
pub fn resolve_values<'a, I>(values: I) -> Result<Domain, Error>
where
    I: IntoIterator<Item = &'a Value>,
{
    resolve_domain(values.into_iter().map(Value::domain))
}

/// A capability set chosen at run time.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyArithmetic {
    Number(NumberArithmetic),
    BigNumber(BigNumberArithmetic),
    Fraction(FractionArithmetic),
    Complex(ComplexArithmetic),
    Unit(UnitArithmetic),
}

impl AnyArithmetic {
    /// Builds the capability set for `domain` with the settings in `config`.
    pub fn new(domain: Domain, config: &Config) -> Self {
        match domain {
            Domain::Number => AnyArithmetic::Number(NumberArithmetic::new(config)),
            Domain::BigNumber => AnyArithmetic::BigNumber(BigNumberArithmetic::new(config)),
            Domain::Fraction => AnyArithmetic::Fraction(FractionArithmetic::new()),
            Domain::Complex => AnyArithmetic::Complex(ComplexArithmetic::new(config)),
            Domain::Unit => AnyArithmetic::Unit(UnitArithmetic::new(config)),
        }
    }

    /// Resolves the domain of `domains` and builds its capability set.
    pub fn resolve<I>(domains: I, config: &Config) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Domain>,
    {
        resolve_domain(domains).map(|domain| Self::new(domain, config))
    }

    pub fn domain(&self) -> Domain {
        match self {
            AnyArithmetic::Number(_) => Domain::Number,
            AnyArithmetic::BigNumber(_) => Domain::BigNumber,
            AnyArithmetic::Fraction(_) => Domain::Fraction,
            AnyArithmetic::Complex(_) => Domain::Complex,
            AnyArithmetic::Unit(_) => Domain::Unit,
        }
    }
}
