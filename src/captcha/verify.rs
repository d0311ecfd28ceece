//! Answer checking.

/// Returns true if `candidate`, with ASCII letters uppercased, equals `expected`.
///
/// `expected` is compared as given; generated values are already uppercase.
/// Non-ASCII characters are left untouched, so `ß` never matches `SS`.
#[must_use]
pub fn check_values(expected: &str, candidate: &str) -> bool {
    candidate.to_ascii_uppercase() == expected
}
