//! Fixed-point numeric type for monetary values
//!
//! The book format stores every amount as an exact fraction in `N/D` text
//! form, where the denominator matches the commodity's smallest currency
//! unit (100 for cents, 1000, 10000, ...). Keeping numerator and
//! denominator as written avoids floating-point precision issues and lets
//! values round-trip through parse and format unchanged.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::{BookError, BookResult};

/// Rounding policy for division and denominator conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Fail with an arithmetic error when the result is not exact
    Exact,
    /// Round half away from zero
    HalfUp,
}

/// An exact fraction with the denominator the file prescribes
///
/// The denominator is always positive; the sign lives in the numerator.
/// Values are *not* auto-reduced, so a value read as `50/100` is written
/// back as `50/100`, not `1/2`. Equality and ordering compare the
/// mathematical value, not the representation.
#[derive(Debug, Clone, Copy)]
pub struct FixedPoint {
    num: i128,
    den: i128,
}

fn gcd(mut a: i128, mut b: i128) -> i128 {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    if a == 0 {
        1
    } else {
        a
    }
}

/// Integer quotient of p/q rounded half away from zero; q must be positive
fn div_round_half_up(p: i128, q: i128) -> i128 {
    let half = q / 2;
    if p >= 0 {
        (p + half) / q
    } else {
        -((-p + half) / q)
    }
}

impl FixedPoint {
    /// Create a fraction; the sign is normalized onto the numerator
    ///
    /// A zero denominator is rejected.
    pub fn new(num: i128, den: i128) -> BookResult<Self> {
        if den == 0 {
            return Err(BookError::DivisionByZero);
        }
        if den < 0 {
            Ok(Self {
                num: -num,
                den: -den,
            })
        } else {
            Ok(Self { num, den })
        }
    }

    /// Zero with denominator 1
    pub const fn zero() -> Self {
        Self { num: 0, den: 1 }
    }

    /// A whole number as `n/1`
    pub const fn from_int(n: i128) -> Self {
        Self { num: n, den: 1 }
    }

    /// The numerator as written
    pub const fn numerator(&self) -> i128 {
        self.num
    }

    /// The denominator as written (always positive)
    pub const fn denominator(&self) -> i128 {
        self.den
    }

    /// Check if the value is zero
    pub const fn is_zero(&self) -> bool {
        self.num == 0
    }

    /// Check if the value is strictly positive
    pub const fn is_positive(&self) -> bool {
        self.num > 0
    }

    /// Check if the value is strictly negative
    pub const fn is_negative(&self) -> bool {
        self.num < 0
    }

    /// Absolute value, same denominator
    pub const fn abs(&self) -> Self {
        Self {
            num: self.num.abs(),
            den: self.den,
        }
    }

    /// Parse from the canonical `N/D` form or a plain decimal
    ///
    /// Accepts `"123/100"`, `"1.23"`, `"-5"`, `"+0.700"`. Decimal input
    /// maps to a power-of-ten denominator matching the written precision.
    pub fn parse(s: &str) -> BookResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BookError::Validation("empty numeric string".into()));
        }

        if let Some((num_str, den_str)) = s.split_once('/') {
            let num: i128 = num_str
                .trim()
                .parse()
                .map_err(|_| BookError::Validation(format!("invalid numerator: {}", s)))?;
            let den: i128 = den_str
                .trim()
                .parse()
                .map_err(|_| BookError::Validation(format!("invalid denominator: {}", s)))?;
            return Self::new(num, den);
        }

        // Plain decimal
        let (negative, rest) = match s.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let (int_part, frac_part) = match rest.split_once('.') {
            Some((i, f)) => (i, f),
            None => (rest, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(BookError::Validation(format!("invalid number: {}", s)));
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(BookError::Validation(format!("invalid number: {}", s)));
        }

        let int_val: i128 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| BookError::Validation(format!("number out of range: {}", s)))?
        };
        let frac_val: i128 = if frac_part.is_empty() {
            0
        } else {
            frac_part
                .parse()
                .map_err(|_| BookError::Validation(format!("number out of range: {}", s)))?
        };

        let den = 10i128.pow(frac_part.len() as u32);
        let num = int_val * den + frac_val;
        Self::new(if negative { -num } else { num }, den)
    }

    /// Multiply exactly; the product is reduced to keep components small
    pub fn mul(&self, rhs: &Self) -> Self {
        let num = self.num * rhs.num;
        let den = self.den * rhs.den;
        let g = gcd(num, den);
        Self {
            num: num / g,
            den: den / g,
        }
    }

    /// Divide, expressing the quotient at the requested denominator
    ///
    /// With [`Rounding::Exact`] the call fails when the quotient is not
    /// representable exactly at `target_den`; with [`Rounding::HalfUp`]
    /// ties round away from zero.
    pub fn checked_div(
        &self,
        rhs: &Self,
        target_den: i128,
        rounding: Rounding,
    ) -> BookResult<Self> {
        if rhs.num == 0 {
            return Err(BookError::DivisionByZero);
        }
        if target_den <= 0 {
            return Err(BookError::Validation(format!(
                "invalid target denominator: {}",
                target_den
            )));
        }
        // self/rhs at target_den: p / q where
        //   p = self.num * rhs.den * target_den
        //   q = self.den * rhs.num
        let mut p = self.num * rhs.den * target_den;
        let mut q = self.den * rhs.num;
        if q < 0 {
            p = -p;
            q = -q;
        }
        if p % q == 0 {
            return Self::new(p / q, target_den);
        }
        match rounding {
            Rounding::Exact => Err(BookError::InexactDivision { num: p, den: q }),
            Rounding::HalfUp => Self::new(div_round_half_up(p, q), target_den),
        }
    }

    /// Re-express the value at a different denominator
    pub fn with_denominator(&self, den: i128, rounding: Rounding) -> BookResult<Self> {
        self.checked_div(&Self::from_int(1), den, rounding)
    }

    /// Exact reciprocal; fails for zero
    pub fn recip(&self) -> BookResult<Self> {
        Self::new(self.den, self.num)
    }

    /// Exact decimal rendering where possible
    ///
    /// Falls back to rounding half-up at the denominator's own digit width
    /// when the denominator has prime factors other than 2 and 5.
    pub fn to_decimal_string(&self) -> String {
        // Works on the written components so "700/1000" renders "0.700"
        let (mut num, mut den) = (self.num, self.den);

        // Scale a 2^a * 5^b denominator up to a pure power of ten
        let mut d = den;
        let mut twos = 0u32;
        let mut fives = 0u32;
        while d % 2 == 0 {
            d /= 2;
            twos += 1;
        }
        while d % 5 == 0 {
            d /= 5;
            fives += 1;
        }
        if d == 1 {
            if twos > fives {
                let f = 5i128.pow(twos - fives);
                num *= f;
                den *= f;
            } else if fives > twos {
                let f = 2i128.pow(fives - twos);
                num *= f;
                den *= f;
            }
            let places = twos.max(fives) as usize;
            return render_scaled(num, den, places);
        }

        // Irregular denominator: round at its own precision
        let places = den.to_string().len();
        let scale = 10i128.pow(places as u32);
        let scaled = div_round_half_up(num * scale, den);
        render_scaled(scaled, scale, places)
    }

    /// Currency rendering with two decimal places, e.g. `"$12.34"`
    ///
    /// Display-only rounding, half away from zero.
    pub fn format_currency(&self, symbol: &str) -> String {
        let cents = div_round_half_up(self.num * 100, self.den);
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.abs();
        format!("{}{}{}.{:02}", sign, symbol, cents / 100, cents % 100)
    }
}

fn render_scaled(num: i128, den: i128, places: usize) -> String {
    let sign = if num < 0 { "-" } else { "" };
    let num = num.abs();
    let whole = num / den;
    if places == 0 {
        format!("{}{}", sign, whole)
    } else {
        let frac = num % den;
        format!("{}{}.{:0places$}", sign, whole, frac, places = places)
    }
}

impl Default for FixedPoint {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl FromStr for FixedPoint {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for FixedPoint {
    fn eq(&self, other: &Self) -> bool {
        self.num * other.den == other.num * self.den
    }
}

impl Eq for FixedPoint {}

impl PartialOrd for FixedPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FixedPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplication keeps order
        (self.num * other.den).cmp(&(other.num * self.den))
    }
}

impl Hash for FixedPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash the reduced form so equal values hash equally
        let g = gcd(self.num, self.den);
        (self.num / g).hash(state);
        (self.den / g).hash(state);
    }
}

impl Add for FixedPoint {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let g = gcd(self.den, other.den);
        let den = self.den / g * other.den;
        Self {
            num: self.num * (den / self.den) + other.num * (den / other.den),
            den,
        }
    }
}

impl AddAssign for FixedPoint {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for FixedPoint {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + (-other)
    }
}

impl SubAssign for FixedPoint {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for FixedPoint {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            num: -self.num,
            den: self.den,
        }
    }
}

impl std::iter::Sum for FixedPoint {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(FixedPoint::zero(), |acc, x| acc + x)
    }
}

impl Serialize for FixedPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FixedPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}
