/// Generated summaries; removed together with their transcript
pub fn migration() -> String {
    r#"
CREATE TABLE summaries (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    transcript_id TEXT NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    prompt TEXT NOT NULL,
    is_edited INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE,
    FOREIGN KEY (transcript_id) REFERENCES transcripts (id) ON DELETE CASCADE
);

CREATE INDEX idx_summaries_user_created
    ON summaries(user_id, created_at);

CREATE INDEX idx_summaries_transcript
    ON summaries(transcript_id);
"#
    .to_string()
}
