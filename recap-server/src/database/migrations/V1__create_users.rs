/// Accounts; email is the login identifier
pub fn migration() -> String {
    r#"
CREATE TABLE users (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    name TEXT,
    password_hash TEXT NOT NULL,
    created_at INTEGER NOT NULL
);
"#
    .to_string()
}
