macro_rules! try_vec {
	($elem:expr; $size:expr) => {{ $crate::util::alloc::fallible_vec_from_element($elem, $size)? }};
}

// Shorthand for return Err(Mp3InfoError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(Mp3InfoError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(Mp3InfoError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::Mp3InfoError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:literal)) => {
		return Err(crate::error::Mp3InfoError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for Id3v2Error::new(Id3v2ErrorKind::Foo(..)).into()
//
// Usage:
// - id3v2_err!(Variant)
// - id3v2_err!(Variant(args..))
//
// or bail:
//
// - id3v2_err!(@BAIL Variant(args..))
macro_rules! id3v2_err {
	(@BAIL $($rest:tt)+) => {
		return Err(id3v2_err!($($rest)+))
	};
	($variant:ident $(($($arg:expr),+))?) => {
		Into::<crate::error::Mp3InfoError>::into(crate::error::Id3v2Error::new(
			crate::error::Id3v2ErrorKind::$variant $(($($arg),+))?,
		))
	};
}

pub(crate) use {err, id3v2_err, try_vec};
