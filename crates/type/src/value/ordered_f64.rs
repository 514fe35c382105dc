// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
	hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

/// An f64 that is never NaN, so it can be compared and hashed.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct OrderedF64(f64);

impl OrderedF64 {
	pub fn value(&self) -> f64 {
		self.0
	}
}

impl TryFrom<f64> for OrderedF64 {
	type Error = &'static str;

	fn try_from(value: f64) -> Result<Self, Self::Error> {
		if value.is_nan() {
			Err("NaN is not a valid OrderedF64")
		} else {
			// -0.0 and 0.0 compare equal, keep a single representation for hashing
			Ok(OrderedF64(if value == 0.0 { 0.0 } else { value }))
		}
	}
}

impl From<OrderedF64> for f64 {
	fn from(value: OrderedF64) -> Self {
		value.0
	}
}

impl PartialEq for OrderedF64 {
	fn eq(&self, other: &Self) -> bool {
		self.0 == other.0
	}
}

impl Eq for OrderedF64 {}

impl PartialOrd for OrderedF64 {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for OrderedF64 {
	fn cmp(&self, other: &Self) -> Ordering {
		self.0.total_cmp(&other.0)
	}
}

impl Hash for OrderedF64 {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.to_bits().hash(state);
	}
}

impl Display for OrderedF64 {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_rejects_nan() {
		assert!(OrderedF64::try_from(f64::NAN).is_err());
	}

	#[test]
	fn test_zero_sign_normalized() {
		let a = OrderedF64::try_from(0.0).unwrap();
		let b = OrderedF64::try_from(-0.0).unwrap();
		assert_eq!(a, b);
		assert_eq!(a.value().to_bits(), b.value().to_bits());
	}

	#[test]
	fn test_ordering() {
		let a = OrderedF64::try_from(-1.0).unwrap();
		let b = OrderedF64::try_from(f64::INFINITY).unwrap();
		assert!(a < b);
	}
}
