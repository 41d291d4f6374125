use crate::error::{AppError, AppResult};
use crate::models::{
    EmailShare, EmailShareWithSummary, Summary, SummaryWithTranscript, Transcript,
    TranscriptOverview, User,
};
use rusqlite::{params, types::Type, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("src/database/migrations");

    pub fn run(conn: &mut rusqlite::Connection) -> Result<refinery::Report, refinery::Error> {
        migrations::runner().run(conn)
    }
}

pub type DbConnection = Arc<Mutex<Connection>>;

/// SQLite storage. Every transcript, summary and share query is scoped to a user id;
/// rows owned by someone else are reported exactly like missing rows.
pub struct Database {
    connection: DbConnection,
}

const SUMMARY_COLUMNS: &str = "s.id, s.user_id, s.transcript_id, s.title, s.content, s.prompt, \
     s.is_edited, s.created_at, s.updated_at, t.title";

const SHARE_COLUMNS: &str =
    "e.id, e.user_id, e.summary_id, e.recipients, e.subject, e.message, e.sent_at, s.title";

impl Database {
    pub fn new(db_path: &Path) -> AppResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;

        // SQLite ships with foreign keys disabled; cascades depend on them
        conn.execute("PRAGMA foreign_keys = ON", [])?;

        let database = Database {
            connection: Arc::new(Mutex::new(conn)),
        };

        database.run_migrations()?;

        Ok(database)
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to acquire database lock: {e}")))
    }

    fn run_migrations(&self) -> AppResult<()> {
        let mut conn = self.lock()?;
        let report = embedded::run(&mut conn)?;

        for migration in report.applied_migrations() {
            tracing::info!("Applied migration {}", migration);
        }

        Ok(())
    }

    // ---------- users ----------

    pub fn create_user(&self, user: &User) -> AppResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO users (id, email, name, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id,
                user.email,
                user.name,
                user.password_hash,
                user.created_at
            ],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(ref err, _)
                if err.code == ErrorCode::ConstraintViolation =>
            {
                AppError::InvalidRequest("An account with this email already exists".to_string())
            }
            other => AppError::Database(other),
        })?;

        Ok(())
    }

    pub fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, email, name, password_hash, created_at FROM users WHERE email = ?1",
            params![email],
            user_from_row,
        )
        .optional()?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub fn get_user_by_id(&self, id: &str) -> AppResult<User> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, email, name, password_hash, created_at FROM users WHERE id = ?1",
            params![id],
            user_from_row,
        )
        .optional()?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    // ---------- transcripts ----------

    pub fn create_transcript(&self, transcript: &Transcript) -> AppResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO transcripts (id, user_id, title, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                transcript.id,
                transcript.user_id,
                transcript.title,
                transcript.content,
                transcript.created_at,
                transcript.updated_at
            ],
        )?;
        Ok(())
    }

    /// Caller's transcripts with summary counts, newest first
    pub fn list_transcripts(&self, user_id: &str) -> AppResult<Vec<TranscriptOverview>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT t.id, t.title, t.created_at, t.updated_at,
                    (SELECT COUNT(*) FROM summaries s WHERE s.transcript_id = t.id)
             FROM transcripts t
             WHERE t.user_id = ?1
             ORDER BY t.created_at DESC, t.rowid DESC",
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            Ok(TranscriptOverview {
                id: row.get(0)?,
                title: row.get(1)?,
                created_at: row.get(2)?,
                updated_at: row.get(3)?,
                summary_count: row.get(4)?,
            })
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn get_transcript(&self, id: &str, user_id: &str) -> AppResult<Transcript> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, user_id, title, content, created_at, updated_at
             FROM transcripts WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
            |row| {
                Ok(Transcript {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    title: row.get(2)?,
                    content: row.get(3)?,
                    created_at: row.get(4)?,
                    updated_at: row.get(5)?,
                })
            },
        )
        .optional()?
        .ok_or_else(|| AppError::NotFound("Transcript not found".to_string()))
    }

    /// Deletes the transcript; its summaries and their shares cascade
    pub fn delete_transcript(&self, id: &str, user_id: &str) -> AppResult<()> {
        let conn = self.lock()?;
        let deleted = conn.execute(
            "DELETE FROM transcripts WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;

        if deleted == 0 {
            return Err(AppError::NotFound("Transcript not found".to_string()));
        }
        Ok(())
    }

    pub fn count_transcripts(&self, user_id: &str) -> AppResult<i64> {
        let conn = self.lock()?;
        Ok(conn.query_row(
            "SELECT COUNT(*) FROM transcripts WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )?)
    }

    // ---------- summaries ----------

    pub fn create_summary(&self, summary: &Summary) -> AppResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO summaries
                (id, user_id, transcript_id, title, content, prompt, is_edited, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                summary.id,
                summary.user_id,
                summary.transcript_id,
                summary.title,
                summary.content,
                summary.prompt,
                summary.is_edited,
                summary.created_at,
                summary.updated_at
            ],
        )?;
        Ok(())
    }

    /// Caller's summaries, optionally for one transcript, newest first
    pub fn list_summaries(
        &self,
        user_id: &str,
        transcript_id: Option<&str>,
    ) -> AppResult<Vec<SummaryWithTranscript>> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {SUMMARY_COLUMNS}
             FROM summaries s
             JOIN transcripts t ON t.id = s.transcript_id
             WHERE s.user_id = ?1 AND (?2 IS NULL OR s.transcript_id = ?2)
             ORDER BY s.created_at DESC, s.rowid DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![user_id, transcript_id], summary_from_row)?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn get_summary(&self, id: &str, user_id: &str) -> AppResult<SummaryWithTranscript> {
        let conn = self.lock()?;
        query_summary(&conn, id, user_id)
    }

    /// Replaces title and content and marks the summary as edited
    pub fn update_summary(
        &self,
        id: &str,
        user_id: &str,
        title: &str,
        content: &str,
        updated_at: i64,
    ) -> AppResult<SummaryWithTranscript> {
        let conn = self.lock()?;
        let updated = conn.execute(
            "UPDATE summaries
             SET title = ?3, content = ?4, is_edited = 1, updated_at = ?5
             WHERE id = ?1 AND user_id = ?2",
            params![id, user_id, title, content, updated_at],
        )?;

        if updated == 0 {
            return Err(AppError::NotFound("Summary not found".to_string()));
        }
        query_summary(&conn, id, user_id)
    }

    pub fn delete_summary(&self, id: &str, user_id: &str) -> AppResult<()> {
        let conn = self.lock()?;
        let deleted = conn.execute(
            "DELETE FROM summaries WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;

        if deleted == 0 {
            return Err(AppError::NotFound("Summary not found".to_string()));
        }
        Ok(())
    }

    pub fn count_summaries(&self, user_id: &str) -> AppResult<i64> {
        let conn = self.lock()?;
        Ok(conn.query_row(
            "SELECT COUNT(*) FROM summaries WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )?)
    }

    /// Summaries created at or after `since` (unix seconds)
    pub fn count_summaries_since(&self, user_id: &str, since: i64) -> AppResult<i64> {
        let conn = self.lock()?;
        Ok(conn.query_row(
            "SELECT COUNT(*) FROM summaries WHERE user_id = ?1 AND created_at >= ?2",
            params![user_id, since],
            |row| row.get(0),
        )?)
    }

    // ---------- email shares ----------

    pub fn create_email_share(&self, share: &EmailShare) -> AppResult<()> {
        let recipients = serde_json::to_string(&share.recipients)
            .map_err(|e| AppError::Internal(format!("Failed to serialize recipients: {e}")))?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO email_shares (id, user_id, summary_id, recipients, subject, message, sent_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                share.id,
                share.user_id,
                share.summary_id,
                recipients,
                share.subject,
                share.message,
                share.sent_at
            ],
        )?;
        Ok(())
    }

    /// Caller's shares, optionally for one summary, newest first by send time
    pub fn list_email_shares(
        &self,
        user_id: &str,
        summary_id: Option<&str>,
    ) -> AppResult<Vec<EmailShareWithSummary>> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {SHARE_COLUMNS}
             FROM email_shares e
             JOIN summaries s ON s.id = e.summary_id
             WHERE e.user_id = ?1 AND (?2 IS NULL OR e.summary_id = ?2)
             ORDER BY e.sent_at DESC, e.rowid DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![user_id, summary_id], share_from_row)?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn count_email_shares(&self, user_id: &str) -> AppResult<i64> {
        let conn = self.lock()?;
        Ok(conn.query_row(
            "SELECT COUNT(*) FROM email_shares WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )?)
    }
}

fn query_summary(conn: &Connection, id: &str, user_id: &str) -> AppResult<SummaryWithTranscript> {
    let sql = format!(
        "SELECT {SUMMARY_COLUMNS}
         FROM summaries s
         JOIN transcripts t ON t.id = s.transcript_id
         WHERE s.id = ?1 AND s.user_id = ?2"
    );
    conn.query_row(&sql, params![id, user_id], summary_from_row)
        .optional()?
        .ok_or_else(|| AppError::NotFound("Summary not found".to_string()))
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<SummaryWithTranscript> {
    Ok(SummaryWithTranscript {
        summary: Summary {
            id: row.get(0)?,
            user_id: row.get(1)?,
            transcript_id: row.get(2)?,
            title: row.get(3)?,
            content: row.get(4)?,
            prompt: row.get(5)?,
            is_edited: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        },
        transcript_title: row.get(9)?,
    })
}

fn share_from_row(row: &Row<'_>) -> rusqlite::Result<EmailShareWithSummary> {
    let raw_recipients: String = row.get(3)?;
    let recipients: Vec<String> = serde_json::from_str(&raw_recipients)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(EmailShareWithSummary {
        share: EmailShare {
            id: row.get(0)?,
            user_id: row.get(1)?,
            summary_id: row.get(2)?,
            recipients,
            subject: row.get(4)?,
            message: row.get(5)?,
            sent_at: row.get(6)?,
        },
        summary_title: row.get(7)?,
    })
}
