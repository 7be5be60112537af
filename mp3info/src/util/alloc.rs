use crate::error::Result;
use crate::macros::err;

/// The largest single buffer mp3info will attempt to allocate
///
/// This covers the largest possible ID3v2 tag (a 28-bit size plus its header).
pub(crate) const ALLOCATION_LIMIT: usize = 0x0FFF_FFFF + 10;

/// **DO NOT USE DIRECTLY**
///
/// Creates a `Vec` of the specified length, containing copies of `element`.
///
/// This should be used through [`try_vec!`](crate::macros::try_vec)
pub(crate) fn fallible_vec_from_element<T>(element: T, expected_size: usize) -> Result<Vec<T>>
where
	T: Clone,
{
	let mut v: Vec<T> = Vec::try_with_capacity_stable(expected_size)?;
	v.resize(expected_size, element);

	Ok(v)
}

/// Provides the `try_with_capacity` method on `Vec`
///
/// This can be used directly.
pub(crate) trait VecFallibleCapacity<T>: Sized {
	/// Same as `Vec::with_capacity`, but takes [`ALLOCATION_LIMIT`] into account.
	///
	/// Named `try_with_capacity_stable` to avoid conflicts with the nightly `Vec::try_with_capacity`.
	fn try_with_capacity_stable(capacity: usize) -> Result<Self>;
}

impl<T> VecFallibleCapacity<T> for Vec<T> {
	fn try_with_capacity_stable(capacity: usize) -> Result<Self> {
		if capacity > ALLOCATION_LIMIT {
			err!(TooMuchData);
		}

		let mut v = Vec::new();
		v.try_reserve(capacity)?;

		Ok(v)
	}
}

#[cfg(test)]
mod tests {
	use crate::util::alloc::{ALLOCATION_LIMIT, fallible_vec_from_element};

	#[test_log::test]
	fn vec_fallible_repeat() {
		let u8_vec_len_20 = fallible_vec_from_element(0u8, 20).unwrap();
		assert_eq!(u8_vec_len_20.len(), 20);
		assert!(u8_vec_len_20.iter().all(|e| *e == 0));

		let ff_vec_len_89 = fallible_vec_from_element(0xFFu8, 89).unwrap();
		assert_eq!(ff_vec_len_89.len(), 89);
		assert!(ff_vec_len_89.iter().all(|e| *e == 0xFF));

		let too_large = fallible_vec_from_element(0u8, ALLOCATION_LIMIT + 1);
		assert!(too_large.is_err());
	}
}
