//! SMTP email sender implementation using Lettre.

use crate::error::{DocgateError, Result};
use crate::providers::{Attachment, EmailSender};
use base64::Engine;
use lettre::message::header::ContentType;
use lettre::message::{Attachment as MessagePart, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

/// SMTP email sender using Lettre.
///
/// Sends real emails via an SMTP relay, suitable for production use.
/// Template identifiers from the document config select the subject and
/// body; the attachment is decoded from its snapshot encoding and carried
/// as a binary part.
#[derive(Clone)]
pub struct SmtpEmailSender {
    /// SMTP server address.
    smtp_server: String,

    /// SMTP server port.
    smtp_port: u16,

    /// SMTP credentials.
    credentials: Credentials,

    /// Sender email address.
    from_email: String,

    /// Sender display name.
    from_name: String,
}

impl SmtpEmailSender {
    /// Create a new SMTP email sender.
    ///
    /// # Arguments
    ///
    /// - `smtp_server`: SMTP server address (e.g. "smtp.fastmail.com")
    /// - `smtp_port`: SMTP server port (usually 587 for TLS)
    /// - `smtp_username` / `smtp_password`: SMTP authentication
    /// - `from_email`: Sender email address
    /// - `from_name`: Sender display name
    #[must_use]
    pub fn new(
        smtp_server: String,
        smtp_port: u16,
        smtp_username: String,
        smtp_password: String,
        from_email: String,
        from_name: String,
    ) -> Self {
        let credentials = Credentials::new(smtp_username, smtp_password);

        Self {
            smtp_server,
            smtp_port,
            credentials,
            from_email,
            from_name,
        }
    }

    /// Build SMTP transport for sending emails.
    ///
    /// Creates a new transport for each email to avoid connection pooling
    /// issues.
    fn build_transport(&self) -> Result<SmtpTransport> {
        let relay = SmtpTransport::relay(&self.smtp_server)
            .map_err(|e| DocgateError::Email(format!("SMTP relay error: {e}")))?;

        Ok(relay
            .port(self.smtp_port)
            .credentials(self.credentials.clone())
            .build())
    }

    /// Build the "From" header.
    fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    fn builder(&self, to: &str, subject: &str) -> Result<lettre::message::MessageBuilder> {
        Ok(Message::builder()
            .from(
                self.from_header()
                    .parse()
                    .map_err(|e| DocgateError::Email(format!("Invalid from address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| DocgateError::Email(format!("Invalid to address: {e}")))?)
            .subject(subject))
    }

    async fn dispatch(&self, email: Message) -> Result<()> {
        let mailer = self.build_transport()?;

        tokio::task::spawn_blocking(move || {
            mailer
                .send(&email)
                .map_err(|e| DocgateError::Email(format!("Failed to send email: {e}")))
        })
        .await
        .map_err(|e| DocgateError::Email(format!("Email task failed: {e}")))?
        .map(|_| ())
    }

    fn subject_for(template: &str, recipient_name: &str) -> String {
        match template {
            "request-rejected" => "About your document request".to_string(),
            _ => format!("Here is the document you requested, {recipient_name}"),
        }
    }
}

impl EmailSender for SmtpEmailSender {
    async fn send_document(
        &self,
        to: &str,
        recipient_name: &str,
        template: &str,
        attachment: Attachment,
    ) -> Result<()> {
        let content = base64::engine::general_purpose::STANDARD
            .decode(attachment.content_base64.as_bytes())
            .map_err(|e| DocgateError::Email(format!("Attachment is not valid base64: {e}")))?;

        let content_type = ContentType::parse(&attachment.content_type)
            .map_err(|e| DocgateError::Email(format!("Invalid attachment content type: {e}")))?;

        let html_body = format!(
            r"<p>Hi {recipient_name},</p>
<p>Your request was accepted. You'll find <strong>{filename}</strong> attached.</p>",
            filename = attachment.filename,
        );

        let email = self
            .builder(to, &Self::subject_for(template, recipient_name))?
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::html(html_body))
                    .singlepart(
                        MessagePart::new(attachment.filename).body(content, content_type),
                    ),
            )
            .map_err(|e| DocgateError::Email(format!("Failed to build email: {e}")))?;

        self.dispatch(email).await
    }

    async fn send_rejection(&self, to: &str, recipient_name: &str, template: &str) -> Result<()> {
        let html_body = format!(
            r"<p>Hi {recipient_name},</p>
<p>Unfortunately your document request was not approved this time.</p>",
        );

        let email = self
            .builder(to, &Self::subject_for(template, recipient_name))?
            .header(ContentType::TEXT_HTML)
            .body(html_body)
            .map_err(|e| DocgateError::Email(format!("Failed to build email: {e}")))?;

        self.dispatch(email).await
    }
}
