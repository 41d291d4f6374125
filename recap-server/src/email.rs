//! Outbound email for shared summaries.

use crate::config::SmtpConfig;
use async_trait::async_trait;
use futures_util::future::try_join_all;
use handlebars::Handlebars;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

const HTML_TEMPLATE: &str = include_str!("templates/share_email.html.hbs");
const TEXT_TEMPLATE: &str = include_str!("templates/share_email.txt.hbs");

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Email delivery is not configured")]
    NotConfigured,

    #[error("Invalid address '{address}': {reason}")]
    Address { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),
}

/// A fully rendered message for one recipient
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError>;
}

/// True for anything shaped like `local@domain.tld`
pub fn is_valid_address(address: &str) -> bool {
    EMAIL_PATTERN.is_match(address)
}

/// Returns the addresses that do not look like `local@domain.tld`
pub fn invalid_recipients(recipients: &[String]) -> Vec<&str> {
    recipients
        .iter()
        .map(String::as_str)
        .filter(|r| !is_valid_address(r))
        .collect()
}

#[derive(Serialize)]
struct ShareEmailContext<'a> {
    title: &'a str,
    content: &'a str,
    sender: &'a str,
    message: Option<&'a str>,
}

/// Rendered share email, `(text, html)`. User text is escaped in the HTML body.
pub fn render_share_email(
    title: &str,
    content: &str,
    sender: &str,
    message: Option<&str>,
) -> Result<(String, String), EmailError> {
    let handlebars = Handlebars::new();
    let context = ShareEmailContext {
        title,
        content,
        sender,
        message: message.filter(|m| !m.trim().is_empty()),
    };

    let text = handlebars.render_template(TEXT_TEMPLATE, &context)?;
    let html = handlebars.render_template(HTML_TEMPLATE, &context)?;

    Ok((text.trim().to_string(), html))
}

/// Sends every email concurrently. The first failure aborts the batch.
pub async fn send_all(sender: &dyn EmailSender, emails: Vec<OutgoingEmail>) -> Result<(), EmailError> {
    try_join_all(emails.into_iter().map(|email| sender.send(email))).await?;
    Ok(())
}

pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    /// STARTTLS relay on the configured port (587 unless overridden)
    pub fn new(config: &SmtpConfig) -> Result<Self, EmailError> {
        let from_address = config.from_address().ok_or(EmailError::NotConfigured)?;
        let from = parse_mailbox(from_address)?;

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?.port(config.port);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, EmailError> {
    address.parse::<Mailbox>().map_err(|e| EmailError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError> {
        let message = lettre::Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(&email.to)?)
            .subject(email.subject)
            .multipart(MultiPart::alternative_plain_html(
                email.text_body,
                email.html_body,
            ))?;

        self.transport.send(message).await?;
        tracing::debug!("Delivered email to {}", email.to);
        Ok(())
    }
}

/// Used when no SMTP server is configured; every send fails
pub struct UnconfiguredEmailSender;

#[async_trait]
impl EmailSender for UnconfiguredEmailSender {
    async fn send(&self, _email: OutgoingEmail) -> Result<(), EmailError> {
        Err(EmailError::NotConfigured)
    }
}
