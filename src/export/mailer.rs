// src/export/mailer.rs
// Outbound report mail: async SMTP with STARTTLS, credentials from the
// environment, fixed To/Cc from config, one file attachment. Missing
// credentials downgrade the whole stage to a log line.

use std::path::Path;

use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, Message, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::AsyncSmtpTransport;
use lettre::{AsyncTransport, Tokio1Executor};
use tracing::info;

use crate::config::MailConfig;

pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Vec<Mailbox>,
    cc: Vec<Mailbox>,
    subject_prefix: String,
}

impl Mailer {
    /// Build from `SMTP_HOST`/`SMTP_PORT`/`SMTP_USER`/`SMTP_PASS`/`SMTP_FROM`
    /// plus the configured recipients. Returns `Ok(None)` (skip, not fail)
    /// when credentials or recipients are absent.
    pub fn from_env(cfg: &MailConfig) -> Result<Option<Self>> {
        let vars = ["SMTP_HOST", "SMTP_USER", "SMTP_PASS", "SMTP_FROM"]
            .map(|k| std::env::var(k).ok());
        let [Some(host), Some(user), Some(pass), Some(from_addr)] = vars else {
            info!("SMTP credentials not fully set, mail stage will be skipped");
            return Ok(None);
        };
        if cfg.to.is_empty() {
            info!("no mail recipients configured, mail stage will be skipped");
            return Ok(None);
        }

        let port: u16 = match std::env::var("SMTP_PORT") {
            Ok(p) => p.parse().context("parsing SMTP_PORT")?,
            Err(_) => 587,
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)
            .context("building smtp transport")?
            .port(port)
            .credentials(Credentials::new(user, pass))
            .build();

        let from: Mailbox = from_addr.parse().context("parsing SMTP_FROM")?;
        let parse_all = |addrs: &[String]| -> Result<Vec<Mailbox>> {
            addrs
                .iter()
                .map(|a| a.parse::<Mailbox>().with_context(|| format!("parsing mail address {a}")))
                .collect()
        };

        Ok(Some(Self {
            transport,
            from,
            to: parse_all(&cfg.to)?,
            cc: parse_all(&cfg.cc)?,
            subject_prefix: cfg.subject_prefix.clone(),
        }))
    }

    /// Send the report with `attachment` included. Transport failures bubble
    /// up to the caller, which treats mail as best-effort.
    pub async fn send_report(&self, run_date: &str, body: &str, attachment: &Path) -> Result<()> {
        let bytes = tokio::fs::read(attachment)
            .await
            .with_context(|| format!("reading attachment {}", attachment.display()))?;
        let filename = attachment
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| "report.html".to_string());

        let mut builder = Message::builder().from(self.from.clone());
        for m in &self.to {
            builder = builder.to(m.clone());
        }
        for m in &self.cc {
            builder = builder.cc(m.clone());
        }

        let msg = builder
            .subject(format!("{} ({})", self.subject_prefix, run_date))
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(body.to_string()))
                    .singlepart(
                        Attachment::new(filename).body(
                            bytes,
                            ContentType::parse("text/html; charset=utf-8")
                                .expect("static content type"),
                        ),
                    ),
            )
            .context("building report mail")?;

        self.transport.send(msg).await.context("sending report mail")?;
        info!(run_date, "report mail sent");
        Ok(())
    }
}
