use crate::errors::Error;

/// Struct to assist deserializing the results of the count queries
#[derive(Debug, serde::Deserialize, PartialEq, Eq, Clone, Copy)]
pub struct Count {
    count: u64,
}

impl Count {
    #[cfg(test)]
    pub const fn new(count: u64) -> Self {
        Self { count }
    }

    /// Count the number of items in a table.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or if the result cannot be deserialized.
    pub async fn count<C: surrealdb::Connection>(
        db: &surrealdb::Surreal<C>,
        table: &str,
    ) -> Result<u64, Error> {
        Self::take_count(db.query(count(table)).await?, table)
    }

    /// Count the number of items in a table where `field` equals `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or if the result cannot be deserialized.
    pub async fn count_where<C: surrealdb::Connection, V: serde::Serialize + Send + 'static>(
        db: &surrealdb::Surreal<C>,
        table: &str,
        field: &str,
        value: V,
    ) -> Result<u64, Error> {
        let response = db
            .query(count_where(table, field))
            .bind(("value", value))
            .await?;
        Self::take_count(response, table)
    }

    fn take_count(mut response: surrealdb::Response, table: &str) -> Result<u64, Error> {
        let result: Option<Self> = response.take(0)?;
        Ok(result.map_or_else(
            || {
                // `GROUP ALL` over an empty table yields no rows at all
                log::debug!("When counting entries in table {table}, no count was returned");
                0
            },
            |c| c.count,
        ))
    }
}

/// Query to count the number of items in a table.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT count() FROM table GROUP ALL
/// ```
#[must_use]
pub fn count(table: &str) -> String {
    format!("SELECT count() FROM {table} GROUP ALL")
}

/// Query to count the number of items in a table whose `field` equals `$value`.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT count() FROM table WHERE field = $value GROUP ALL
/// ```
#[must_use]
pub fn count_where(table: &str, field: &str) -> String {
    format!("SELECT count() FROM {table} WHERE {field} = $value GROUP ALL")
}

#[cfg(test)]
mod query_validation_tests {
    use rstest::rstest;

    use crate::db::queries::validate_query;

    use super::*;

    #[rstest]
    #[case::count(count("artworks"), "SELECT count() FROM artworks GROUP ALL")]
    #[case::count_where(
        count_where("users", "role"),
        "SELECT count() FROM users WHERE role = $value GROUP ALL"
    )]
    fn test_queries(#[case] query: String, #[case] expected: &str) {
        validate_query(query, expected);
    }
}
