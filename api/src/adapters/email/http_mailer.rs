//! HTTP mail gateway client
//!
//! Posts outgoing mail as JSON to a transactional mail API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::domain::ports::{Mailer, OutgoingMail};
use crate::error::MailError;

pub struct HttpMailer {
    http: Client,
    api_url: String,
    api_token: String,
    from: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_token: String, from: String) -> Self {
        Self {
            http: Client::new(),
            api_url,
            api_token,
            from,
        }
    }
}

#[derive(Serialize)]
struct SendMailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_token)
            .json(&SendMailRequest {
                from: &self.from,
                to: &mail.to,
                subject: &mail.subject,
                text: &mail.body,
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        Err(MailError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
