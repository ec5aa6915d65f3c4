//! Table definitions for the banks and reviews tables

/// Bank catalog, one row per tracked institution.
pub const CREATE_BANKS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS banks (
        bank_id INTEGER PRIMARY KEY AUTOINCREMENT,
        bank_name VARCHAR(50) NOT NULL UNIQUE,
        app_name VARCHAR(100)
    )
"#;

/// Annotated reviews, each pointing at a bank.
///
/// `bank_id` carries no foreign key; rows are checked against the catalog
/// when they are inserted.
pub const CREATE_REVIEWS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS reviews (
        review_id INTEGER PRIMARY KEY AUTOINCREMENT,
        bank_id INTEGER NOT NULL,
        review_text VARCHAR(1000),
        rating REAL NOT NULL CHECK (rating BETWEEN 1 AND 5),
        review_date DATE NOT NULL,
        sentiment_label VARCHAR(20) NOT NULL DEFAULT 'neutral',
        sentiment_score REAL, -- -1 to 1
        source VARCHAR(50) NOT NULL DEFAULT 'Google Play',
        theme VARCHAR(50) DEFAULT 'Other'
    )
"#;

pub const CREATE_REVIEWS_BANK_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reviews_bank_id ON reviews(bank_id)";

/// Statements run in order by schema creation.
pub const SCHEMA_STATEMENTS: [&str; 3] = [
    CREATE_BANKS_TABLE,
    CREATE_REVIEWS_TABLE,
    CREATE_REVIEWS_BANK_INDEX,
];
