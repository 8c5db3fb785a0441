use malachite_base::num::basic::traits::{NegativeOne, One, Zero};
use std::{
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use crate::natural::Natural;

/// An arbitrary-precision signed integer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Integer(malachite_nz::integer::Integer);

impl Integer {
    pub(crate) fn from_malachite(value: malachite_nz::integer::Integer) -> Self {
        Self(value)
    }
    pub(crate) fn to_malachite(self) -> malachite_nz::integer::Integer {
        self.0
    }
    pub(crate) fn to_malachite_ref(&self) -> &malachite_nz::integer::Integer {
        &self.0
    }
}

impl std::fmt::Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Integer {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        malachite_nz::integer::Integer::from_str(s)
            .map(Self)
            .map_err(|_| ())
    }
}

macro_rules! from_signed {
    ($t:ty) => {
        impl From<$t> for Integer {
            fn from(value: $t) -> Self {
                Self(malachite_nz::integer::Integer::from(value))
            }
        }
    };
}
from_signed!(i8);
from_signed!(i16);
from_signed!(i32);
from_signed!(i64);
from_signed!(i128);
from_signed!(isize);
from_signed!(u8);
from_signed!(u16);
from_signed!(u32);
from_signed!(u64);
from_signed!(u128);
from_signed!(usize);

impl From<Natural> for Integer {
    fn from(value: Natural) -> Self {
        Self(malachite_nz::integer::Integer::from(value.to_malachite()))
    }
}
impl From<&Natural> for Integer {
    fn from(value: &Natural) -> Self {
        Self(malachite_nz::integer::Integer::from(
            value.to_malachite_ref().clone(),
        ))
    }
}

impl Neg for Natural {
    type Output = Integer;
    fn neg(self) -> Integer {
        -Integer::from(self)
    }
}
impl Neg for &Natural {
    type Output = Integer;
    fn neg(self) -> Integer {
        -Integer::from(self)
    }
}

impl Integer {
    pub const ZERO: Self = Self(malachite_nz::integer::Integer::ZERO);
    pub const ONE: Self = Self(malachite_nz::integer::Integer::ONE);
    pub const NEGATIVE_ONE: Self = Self(malachite_nz::integer::Integer::NEGATIVE_ONE);

    pub fn is_zero(&self) -> bool {
        self == &Integer::ZERO
    }

    pub fn abs(&self) -> Natural {
        use malachite_base::num::arithmetic::traits::UnsignedAbs;
        Natural::from_malachite(self.0.unsigned_abs())
    }

    pub fn gcd(a: &Integer, b: &Integer) -> Natural {
        Natural::gcd(&a.abs(), &b.abs())
    }

    pub fn lcm(a: &Integer, b: &Integer) -> Natural {
        Natural::lcm(&a.abs(), &b.abs())
    }

    pub fn sign(&self) -> i32 {
        use std::cmp::Ordering;
        match self.0.cmp(&malachite_nz::integer::Integer::ZERO) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }
}

impl Neg for Integer {
    type Output = Integer;
    fn neg(self) -> Integer {
        Integer(-self.0)
    }
}
impl Neg for &Integer {
    type Output = Integer;
    fn neg(self) -> Integer {
        Integer(-&self.0)
    }
}

impl Add<&Integer> for &Integer {
    type Output = Integer;
    fn add(self, rhs: &Integer) -> Integer {
        Integer(&self.0 + &rhs.0)
    }
}
impl Add<Integer> for Integer {
    type Output = Integer;
    fn add(self, rhs: Integer) -> Integer {
        Integer(self.0 + rhs.0)
    }
}
impl AddAssign<&Integer> for Integer {
    fn add_assign(&mut self, rhs: &Integer) {
        self.0 += &rhs.0
    }
}

impl Sub<&Integer> for &Integer {
    type Output = Integer;
    fn sub(self, rhs: &Integer) -> Integer {
        Integer(&self.0 - &rhs.0)
    }
}
impl SubAssign<&Integer> for Integer {
    fn sub_assign(&mut self, rhs: &Integer) {
        self.0 -= &rhs.0
    }
}

impl Mul<&Integer> for &Integer {
    type Output = Integer;
    fn mul(self, rhs: &Integer) -> Integer {
        Integer(&self.0 * &rhs.0)
    }
}
impl Mul<Integer> for Integer {
    type Output = Integer;
    fn mul(self, rhs: Integer) -> Integer {
        Integer(self.0 * rhs.0)
    }
}
impl MulAssign<&Integer> for Integer {
    fn mul_assign(&mut self, rhs: &Integer) {
        self.0 *= &rhs.0
    }
}
