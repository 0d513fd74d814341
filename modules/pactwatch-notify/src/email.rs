use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use pactwatch_common::{ContractRecord, ExpiringContract, SmtpConfig};
use streamline_client::ReviewOutcome;

use crate::backend::NotifyBackend;

/// SMTP email notification channel (STARTTLS relay).
pub struct EmailChannel {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl EmailChannel {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: config.user.parse()?,
            to: config.to.parse()?,
        })
    }

    async fn send_mail(&self, subject: String, body: String) -> anyhow::Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .body(body)?;
        self.transport.send(message).await?;
        Ok(())
    }
}

#[async_trait]
impl NotifyBackend for EmailChannel {
    async fn send_expiry_warning(&self, expiring: &ExpiringContract) -> anyhow::Result<()> {
        let subject = format!(
            "\u{26a0}\u{fe0f} Contract Expiring Soon - {}",
            expiring.record.file_name
        );
        let body = format!(
            "Hello team,\n\n\
             The following contract is about to expire:\n\n\
             \u{1f4c2} File name: {}\n\
             \u{1f4c5} Expiry date: {}\n\
             \u{23f3} Days left: {} days\n\n\
             Please review and follow up before the contract ends.\n\n\
             Regards,\n\
             Contract Monitoring System (pactwatch)",
            expiring.record.file_name, expiring.record.expiry_date, expiring.days_left,
        );
        self.send_mail(subject, body).await
    }

    async fn send_ingest_receipt(
        &self,
        record: &ContractRecord,
        review: &ReviewOutcome,
    ) -> anyhow::Result<()> {
        let subject = format!("\u{2705} Contract Recorded - {}", record.file_name);
        let body = format!(
            "Hello team,\n\n\
             A new contract was recorded:\n\n\
             \u{1f4c2} File name: {}\n\
             \u{1f194} Contract ID: {}\n\
             \u{1f4c5} Expiry date: {}\n\
             \u{1f4dd} Review status: {}\n\n\
             Regards,\n\
             Contract Monitoring System (pactwatch)",
            record.file_name, record.id, record.expiry_date, review.status,
        );
        self.send_mail(subject, body).await
    }
}
