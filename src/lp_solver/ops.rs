//! Operator overloading for linear programming expressions
//!
//! A coefficient times a variable gives a one-term expression, and
//! expressions add up, either with `+` or by summing an iterator:
//!
//! ```ignore
//! let x = builder.add_variable("x", VariableType::Integer, 0.0, f64::INFINITY);
//! let y = builder.add_variable("y", VariableType::Integer, 0.0, f64::INFINITY);
//!
//! let expr1 = 2.0 * x + 1.5 * y;
//! let expr2: LinearExpression<_> = [(20.0, x), (15.0, y)]
//!     .into_iter()
//!     .map(|(c, v)| c * v)
//!     .sum();
//! ```
//!
//! All operations keep the brand type parameter, so variables from different
//! models cannot be mixed.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use super::{LinearExpression, LinearTerm, VariableId};

impl<Brand> Add<LinearExpression<Brand>> for LinearExpression<Brand> {
    type Output = LinearExpression<Brand>;

    fn add(mut self, other: LinearExpression<Brand>) -> Self::Output {
        self += other;
        self
    }
}

impl<Brand> AddAssign<LinearExpression<Brand>> for LinearExpression<Brand> {
    fn add_assign(&mut self, other: LinearExpression<Brand>) {
        self.terms.extend(other.terms);
    }
}

impl<Brand> Sum for LinearExpression<Brand> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(LinearExpression::new(), |acc, expr| acc + expr)
    }
}

impl<Brand> Mul<f64> for VariableId<Brand> {
    type Output = LinearExpression<Brand>;

    fn mul(self, coefficient: f64) -> Self::Output {
        LinearExpression {
            terms: vec![LinearTerm {
                coefficient,
                variable: self,
            }],
        }
    }
}

impl<Brand> Mul<VariableId<Brand>> for f64 {
    type Output = LinearExpression<Brand>;

    fn mul(self, variable: VariableId<Brand>) -> Self::Output {
        variable * self
    }
}
