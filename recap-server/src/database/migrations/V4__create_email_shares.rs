/// One row per successful share; recipients stored as a JSON array
pub fn migration() -> String {
    r#"
CREATE TABLE email_shares (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    summary_id TEXT NOT NULL,
    recipients TEXT NOT NULL,
    subject TEXT NOT NULL,
    message TEXT,
    sent_at INTEGER NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE,
    FOREIGN KEY (summary_id) REFERENCES summaries (id) ON DELETE CASCADE
);

CREATE INDEX idx_email_shares_user_sent
    ON email_shares(user_id, sent_at);
"#
    .to_string()
}
