/// Query to list journal posts, newest first.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM blog_posts ORDER BY date DESC
/// ```
#[must_use]
#[inline]
pub const fn list() -> &'static str {
    "SELECT * FROM blog_posts ORDER BY `date` DESC"
}

#[cfg(test)]
mod query_validation_tests {
    use crate::db::queries::validate_query;

    use super::*;

    #[test]
    fn test_list() {
        validate_query(list(), "SELECT * FROM blog_posts ORDER BY `date` DESC");
    }
}
