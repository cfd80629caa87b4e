/// Query to read the series with the given title.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM series WHERE title = $title LIMIT 1
/// ```
#[must_use]
#[inline]
pub const fn read_by_title() -> &'static str {
    "SELECT * FROM series WHERE title = $title LIMIT 1"
}

/// Query to create `$series`, or count one more artwork on the series that already has its title.
///
/// Runs as one transaction keyed on the title, so a concurrent writer makes it fail and retry
/// rather than write a second series.
///
/// Compiles to:
/// ```sql, ignore
/// BEGIN TRANSACTION;
/// LET $existing = (SELECT VALUE id FROM series WHERE title = $series.title);
/// IF array::len($existing) > 0 {
///     UPDATE $existing SET artworkCount += 1 RETURN NONE;
/// } ELSE {
///     CREATE $series.id CONTENT $series RETURN NONE;
/// };
/// COMMIT TRANSACTION;
/// ```
#[must_use]
#[inline]
pub const fn insert_or_count_artwork() -> &'static str {
    "BEGIN TRANSACTION; \
     LET $existing = (SELECT VALUE id FROM series WHERE title = $series.title); \
     IF array::len($existing) > 0 { UPDATE $existing SET artworkCount += 1 RETURN NONE; } \
     ELSE { CREATE $series.id CONTENT $series RETURN NONE; }; \
     COMMIT TRANSACTION;"
}

/// Query to create `$series`, or overwrite the derived fields of the series that already has its
/// title.
///
/// Compiles to:
/// ```sql, ignore
/// BEGIN TRANSACTION;
/// LET $existing = (SELECT VALUE id FROM series WHERE title = $series.title);
/// IF array::len($existing) > 0 {
///     UPDATE $existing SET
///         images = $series.images,
///         coverImage = $series.coverImage,
///         artworkCount = $series.artworkCount
///     RETURN NONE;
/// } ELSE {
///     CREATE $series.id CONTENT $series RETURN NONE;
/// };
/// COMMIT TRANSACTION;
/// ```
#[must_use]
#[inline]
pub const fn insert_or_set_derived() -> &'static str {
    "BEGIN TRANSACTION; \
     LET $existing = (SELECT VALUE id FROM series WHERE title = $series.title); \
     IF array::len($existing) > 0 { \
     UPDATE $existing SET images = $series.images, coverImage = $series.coverImage, \
     artworkCount = $series.artworkCount RETURN NONE; \
     } ELSE { CREATE $series.id CONTENT $series RETURN NONE; }; \
     COMMIT TRANSACTION;"
}

/// Query to set the images of the series with the given title.
///
/// Compiles to:
/// ```sql, ignore
/// UPDATE series SET images = $images WHERE title = $title
/// ```
#[must_use]
#[inline]
pub const fn set_images_by_title() -> &'static str {
    "UPDATE series SET images = $images WHERE title = $title"
}

/// Query to set the cover image of the series with the given title.
///
/// Compiles to:
/// ```sql, ignore
/// UPDATE series SET coverImage = $cover WHERE title = $title
/// ```
#[must_use]
#[inline]
pub const fn set_cover_by_title() -> &'static str {
    "UPDATE series SET coverImage = $cover WHERE title = $title"
}

#[cfg(test)]
mod query_validation_tests {
    use rstest::rstest;

    use crate::db::queries::validate_query;

    use super::*;

    #[rstest]
    #[case::read_by_title(read_by_title(), "SELECT * FROM series WHERE title = $title LIMIT 1")]
    #[case::set_images_by_title(
        set_images_by_title(),
        "UPDATE series SET images = $images WHERE title = $title"
    )]
    #[case::set_cover_by_title(
        set_cover_by_title(),
        "UPDATE series SET coverImage = $cover WHERE title = $title"
    )]
    fn test_queries(#[case] query: &str, #[case] expected: &str) {
        validate_query(query, expected);
    }

    #[rstest]
    #[case::insert_or_count_artwork(insert_or_count_artwork())]
    #[case::insert_or_set_derived(insert_or_set_derived())]
    fn test_title_keyed_writes_are_one_transaction(#[case] query: &str) {
        let statements = surrealdb::syn::parse(query).unwrap();
        // BEGIN, LET, IF, COMMIT
        assert_eq!(statements.len(), 4);
        assert!(query.starts_with("BEGIN TRANSACTION;"));
        assert!(query.ends_with("COMMIT TRANSACTION;"));
    }
}
