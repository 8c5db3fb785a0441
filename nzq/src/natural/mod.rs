use malachite_base::num::arithmetic::traits::{CeilingLogBase2, DivMod, Gcd, Lcm};
use malachite_base::num::basic::traits::{One, Zero};
use std::{
    ops::{Add, AddAssign, Div, Mul, MulAssign, Sub, SubAssign},
    str::FromStr,
};

use crate::integer::Integer;

/// An arbitrary-precision non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Natural(malachite_nz::natural::Natural);

impl Natural {
    pub(crate) fn from_malachite(value: malachite_nz::natural::Natural) -> Self {
        Self(value)
    }
    pub(crate) fn to_malachite(self) -> malachite_nz::natural::Natural {
        self.0
    }
    pub(crate) fn to_malachite_ref(&self) -> &malachite_nz::natural::Natural {
        &self.0
    }
}

impl std::fmt::Display for Natural {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Natural {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        malachite_nz::natural::Natural::from_str(s)
            .map(Self)
            .map_err(|_| ())
    }
}

macro_rules! from_unsigned {
    ($t:ty) => {
        impl From<$t> for Natural {
            fn from(value: $t) -> Self {
                Self(malachite_nz::natural::Natural::from(value))
            }
        }
    };
}
from_unsigned!(u8);
from_unsigned!(u16);
from_unsigned!(u32);
from_unsigned!(u64);
from_unsigned!(u128);
from_unsigned!(usize);

impl Natural {
    pub const ZERO: Self = Self(malachite_nz::natural::Natural::ZERO);
    pub const ONE: Self = Self(malachite_nz::natural::Natural::ONE);

    pub fn is_zero(&self) -> bool {
        self == &Natural::ZERO
    }

    pub fn gcd(a: &Natural, b: &Natural) -> Natural {
        Natural((&a.0).gcd(&b.0))
    }

    pub fn lcm(a: &Natural, b: &Natural) -> Natural {
        Natural((&a.0).lcm(&b.0))
    }

    pub fn div_mod(&self, other: &Natural) -> (Natural, Natural) {
        let (q, r) = (self.0.clone()).div_mod(other.0.clone());
        (Natural(q), Natural(r))
    }

    pub fn bit_length(&self) -> u64 {
        if self.is_zero() {
            0
        } else {
            self.0.ceiling_log_base_2() + 1
        }
    }
}

impl Add<&Natural> for &Natural {
    type Output = Natural;
    fn add(self, rhs: &Natural) -> Natural {
        Natural(&self.0 + &rhs.0)
    }
}
impl Add<Natural> for Natural {
    type Output = Natural;
    fn add(self, rhs: Natural) -> Natural {
        Natural(self.0 + rhs.0)
    }
}
impl AddAssign<&Natural> for Natural {
    fn add_assign(&mut self, rhs: &Natural) {
        self.0 += &rhs.0
    }
}

impl Sub<&Natural> for &Natural {
    type Output = Natural;
    fn sub(self, rhs: &Natural) -> Natural {
        Natural(&self.0 - &rhs.0)
    }
}
impl SubAssign<&Natural> for Natural {
    fn sub_assign(&mut self, rhs: &Natural) {
        self.0 -= &rhs.0
    }
}

impl Mul<&Natural> for &Natural {
    type Output = Natural;
    fn mul(self, rhs: &Natural) -> Natural {
        Natural(&self.0 * &rhs.0)
    }
}

impl Div<&Natural> for &Natural {
    /// Floor division; callers that know the divisor divides exactly (e.g. dividing
    /// an lcm by one of its factors) get the exact quotient.
    type Output = Natural;
    fn div(self, rhs: &Natural) -> Natural {
        Natural(self.0.clone() / rhs.0.clone())
    }
}
impl Mul<Natural> for Natural {
    type Output = Natural;
    fn mul(self, rhs: Natural) -> Natural {
        Natural(self.0 * rhs.0)
    }
}
impl MulAssign<&Natural> for Natural {
    fn mul_assign(&mut self, rhs: &Natural) {
        self.0 *= &rhs.0
    }
}
