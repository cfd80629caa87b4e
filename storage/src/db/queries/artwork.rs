use crate::db::schemas::artwork::ArtworkFilter;

/// Query to read the artworks of a series, in natural order.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM artworks WHERE series = $series ORDER BY createdAt ASC, id ASC
/// ```
#[must_use]
#[inline]
pub const fn read_by_series() -> &'static str {
    "SELECT * FROM artworks WHERE series = $series ORDER BY createdAt ASC, id ASC"
}

/// Query to read up to `$limit` random featured artworks.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM artworks WHERE featured = true ORDER BY RAND() LIMIT $limit
/// ```
#[must_use]
#[inline]
pub const fn read_featured() -> &'static str {
    "SELECT * FROM artworks WHERE featured = true ORDER BY RAND() LIMIT $limit"
}

/// Query to read up to `$limit` random artworks.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM artworks ORDER BY RAND() LIMIT $limit
/// ```
#[must_use]
#[inline]
pub const fn read_random() -> &'static str {
    "SELECT * FROM artworks ORDER BY RAND() LIMIT $limit"
}

/// Query to list artworks, newest first, filtered by the set fields of `filter`.
///
/// The free-text part of the filter (`search`) is not part of the query.
///
/// Compiles to (with every filter set):
/// ```sql, ignore
/// SELECT * FROM artworks WHERE year = $year AND medium = $medium AND series = $series ORDER BY createdAt DESC
/// ```
#[must_use]
pub fn list(filter: &ArtworkFilter) -> String {
    let mut conditions = Vec::with_capacity(3);
    if filter.year.is_some() {
        conditions.push("year = $year");
    }
    if filter.medium.is_some() {
        conditions.push("medium = $medium");
    }
    if filter.series.is_some() {
        conditions.push("series = $series");
    }

    if conditions.is_empty() {
        "SELECT * FROM artworks ORDER BY createdAt DESC".to_owned()
    } else {
        format!(
            "SELECT * FROM artworks WHERE {} ORDER BY createdAt DESC",
            conditions.join(" AND ")
        )
    }
}
