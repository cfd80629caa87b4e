/// Query to list the process steps in order.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM process_steps ORDER BY step ASC
/// ```
#[must_use]
#[inline]
pub const fn list_steps() -> &'static str {
    "SELECT * FROM process_steps ORDER BY step ASC"
}

/// Query to list the material categories alphabetically.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM materials ORDER BY category ASC
/// ```
#[must_use]
#[inline]
pub const fn list_materials() -> &'static str {
    "SELECT * FROM materials ORDER BY category ASC"
}
