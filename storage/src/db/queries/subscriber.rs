/// Query to read the subscriber with the given (normalized) email.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM newsletter_subscribers WHERE email = $email LIMIT 1
/// ```
#[must_use]
#[inline]
pub const fn read_by_email() -> &'static str {
    "SELECT * FROM newsletter_subscribers WHERE email = $email LIMIT 1"
}
