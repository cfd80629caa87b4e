pub mod artwork;
pub mod exhibition;
pub mod generic;
pub mod post;
pub mod process;
pub mod series;
pub mod subscriber;
pub mod user;

#[cfg(test)]
pub fn validate_query(query: impl AsRef<str>, expected: &str) {
    use pretty_assertions::assert_eq;

    let compiled_query = surrealdb::syn::parse(query.as_ref()).unwrap();
    let compiled_expected = surrealdb::syn::parse(expected).unwrap();
    assert!(
        !compiled_expected.0.is_empty(),
        "Expected query compiled to an empty list of statements: \"{expected}\""
    );
    assert_eq!(compiled_query, compiled_expected);
}
