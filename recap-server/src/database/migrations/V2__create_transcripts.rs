/// Uploaded transcripts, owned by a user
pub fn migration() -> String {
    r#"
CREATE TABLE transcripts (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
);

CREATE INDEX idx_transcripts_user_created
    ON transcripts(user_id, created_at);
"#
    .to_string()
}
