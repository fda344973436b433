use crate::model::Lead;
use anyhow::Result;
use serde::Serialize;

/// Best-effort lead delivery. The relay never reports application
/// errors back, so the absence of a transport error is treated as
/// success.
#[rocket::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, lead: &Lead) -> Result<()>;
}

#[derive(Serialize)]
struct LeadPayload {
    name: String,
    email: String,
    phone: String,
    experience: String,
    interests: String,
    message: String,
}

impl From<&Lead> for LeadPayload {
    fn from(lead: &Lead) -> LeadPayload {
        LeadPayload {
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            experience: lead.experience.clone(),
            interests: lead.interests.join(", "),
            message: lead.message.clone().unwrap_or_default(),
        }
    }
}

pub struct LeadRelay {
    http: reqwest::Client,
    url: String,
}

impl LeadRelay {
    pub fn new(url: String) -> LeadRelay {
        LeadRelay {
            http: reqwest::Client::new(),
            url,
        }
    }
}

#[rocket::async_trait]
impl Notifier for LeadRelay {
    async fn notify(&self, lead: &Lead) -> Result<()> {
        let payload = LeadPayload::from(lead);
        self.http.post(&self.url).json(&payload).send().await?;
        Ok(())
    }
}
