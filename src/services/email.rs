use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use uuid::Uuid;

use crate::config::Config;

pub struct EmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
    site_name: String,
}

impl EmailService {
    /// Returns None if SMTP or the contact recipient is not fully
    /// configured; the contact endpoint degrades to 503.
    pub fn new(config: &Config) -> Option<Self> {
        let host = config.smtp_host.as_deref()?;
        let username = config.smtp_username.clone()?;
        let password = config.smtp_password.clone()?;
        let from_addr = config.smtp_from.as_deref()?;
        let to_addr = config.contact_recipient.as_deref()?;

        let port = config.smtp_port.unwrap_or(587);
        let creds = Credentials::new(username, password);

        let transport = if port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                .ok()?
                .credentials(creds)
                .build()
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .ok()?
                .credentials(creds)
                .build()
        };

        let from: Mailbox = from_addr.parse().ok()?;
        let to: Mailbox = to_addr.parse().ok()?;

        Some(Self {
            transport,
            from,
            to,
            site_name: config.site_name.clone(),
        })
    }

    fn new_message_id(&self) -> String {
        format!("<{}@{}>", Uuid::new_v4(), self.from.email.domain())
    }

    /// Forward a contact-form submission (catering requests, general
    /// questions) to the configured recipient.
    pub async fn send_contact_message(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        event_date: Option<&str>,
        message: &str,
    ) -> anyhow::Result<()> {
        let subject = format!("{} — new contact form message from {name}", self.site_name);

        let phone_line = phone.unwrap_or("not provided");
        let date_line = event_date.unwrap_or("not provided");
        let text = format!(
            "New contact form submission\n\n\
             Name: {name}\n\
             Email: {email}\n\
             Phone: {phone_line}\n\
             Event date: {date_line}\n\n\
             {message}\n"
        );
        let html = format!(
            r#"<h2 style="margin:0 0 16px">New contact form submission</h2>
<p><strong>Name:</strong> {name}<br>
<strong>Email:</strong> {email}<br>
<strong>Phone:</strong> {phone_line}<br>
<strong>Event date:</strong> {date_line}</p>
<p style="white-space:pre-wrap">{message}</p>"#
        );

        let reply_to: Mailbox = format!("{name} <{email}>")
            .parse()
            .unwrap_or_else(|_| self.from.clone());

        let mail = Message::builder()
            .message_id(Some(self.new_message_id()))
            .from(self.from.clone())
            .reply_to(reply_to)
            .to(self.to.clone())
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )?;

        self.transport.send(mail).await?;
        Ok(())
    }
}
