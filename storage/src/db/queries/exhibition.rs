/// Query to list exhibitions, latest start date first, optionally only those with `$status`.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM exhibitions WHERE status = $status ORDER BY startDate DESC
/// ```
#[must_use]
#[inline]
pub const fn list(filter_status: bool) -> &'static str {
    if filter_status {
        "SELECT * FROM exhibitions WHERE status = $status ORDER BY startDate DESC"
    } else {
        "SELECT * FROM exhibitions ORDER BY startDate DESC"
    }
}

#[cfg(test)]
mod query_validation_tests {
    use rstest::rstest;

    use crate::db::queries::validate_query;

    use super::*;

    #[rstest]
    #[case::all(list(false), "SELECT * FROM exhibitions ORDER BY startDate DESC")]
    #[case::by_status(
        list(true),
        "SELECT * FROM exhibitions WHERE status = $status ORDER BY startDate DESC"
    )]
    fn test_queries(#[case] query: &str, #[case] expected: &str) {
        validate_query(query, expected);
    }
}
