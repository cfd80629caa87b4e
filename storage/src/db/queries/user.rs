/// Query to read the user with the given (normalized) email.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM users WHERE email = $email LIMIT 1
/// ```
#[must_use]
#[inline]
pub const fn read_by_email() -> &'static str {
    "SELECT * FROM users WHERE email = $email LIMIT 1"
}
