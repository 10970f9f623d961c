// Copyright (c) 2023 Espresso Systems (espressosys.com)
// This file is part of the Superform v2 contract bindings.
//
// This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use crate::{
    config::WebhookConfig,
    incident::{Incident, Severity},
};
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, incident: &Incident) -> Result<()>;
}

/// Writes incidents to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, incident: &Incident) -> Result<()> {
        tracing::warn!("[{}] {}", incident.severity, incident.title);
        tracing::info!("{}", incident.description);
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IncidentMetadata {
    pub team: &'static str,
    pub service: &'static str,
}

/// Body of an incident.io HTTP alert event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IncidentPayload<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub deduplication_key: &'a str,
    pub status: &'static str,
    pub metadata: IncidentMetadata,
}

impl<'a> From<&'a Incident> for IncidentPayload<'a> {
    fn from(incident: &'a Incident) -> Self {
        Self {
            title: &incident.title,
            description: &incident.description,
            deduplication_key: &incident.dedup_key,
            status: "firing",
            metadata: IncidentMetadata {
                team: "core",
                service: "superform-v2",
            },
        }
    }
}

/// Posts incidents to the webhook configured for their severity.
#[derive(Clone, Debug, Default)]
pub struct WebhookNotifier {
    webhooks: BTreeMap<Severity, WebhookConfig>,
}

impl WebhookNotifier {
    pub fn new(webhooks: BTreeMap<Severity, WebhookConfig>) -> Self {
        Self { webhooks }
    }

    pub fn webhook(&self, incident: &Incident) -> Option<&WebhookConfig> {
        self.webhooks.get(&incident.severity)
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, incident: &Incident) -> Result<()> {
        let Some(webhook) = self.webhook(incident) else {
            bail!("no webhook configured for {}", incident.severity);
        };

        let mut res = surf::post(webhook.url.as_str())
            .header("Authorization", webhook.secret.as_str())
            .body_json(&IncidentPayload::from(incident))
            .map_err(|err| anyhow!("failed to encode incident: {err}"))?
            .await
            .map_err(|err| anyhow!("failed to send incident to {}: {err}", webhook.url))?;

        if !res.status().is_success() {
            let body = res.body_string().await.unwrap_or_default();
            bail!(
                "incident webhook {} rejected {}: {} {body}",
                webhook.url,
                incident.dedup_key,
                res.status()
            );
        }
        tracing::info!("Sent incident {} to {}", incident.dedup_key, webhook.url);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn incident(severity: Severity) -> Incident {
        Incident {
            severity,
            title: "Oracle Configuration Set: ERC4626YieldSourceOracle on Base".to_string(),
            description: "**Oracle Configuration Set**".to_string(),
            dedup_key: "oracle-config-set-0x12345678-0xab".to_string(),
        }
    }

    #[test]
    fn test_payload_shape() {
        let incident = incident(Severity::Sev3Protocol);
        assert_eq!(
            serde_json::to_value(IncidentPayload::from(&incident)).unwrap(),
            json!({
                "title": "Oracle Configuration Set: ERC4626YieldSourceOracle on Base",
                "description": "**Oracle Configuration Set**",
                "deduplication_key": "oracle-config-set-0x12345678-0xab",
                "status": "firing",
                "metadata": {
                    "team": "core",
                    "service": "superform-v2",
                },
            })
        );
    }

    #[test]
    fn test_webhook_by_severity() {
        let config = WebhookConfig {
            url: "https://example.com/sev3".parse().unwrap(),
            secret: "secret".to_string(),
        };
        let notifier = WebhookNotifier::new([(Severity::Sev3Protocol, config.clone())].into());
        assert_eq!(
            notifier.webhook(&incident(Severity::Sev3Protocol)),
            Some(&config)
        );
        assert_eq!(notifier.webhook(&incident(Severity::Sev4Protocol)), None);
    }

    #[async_std::test]
    async fn test_missing_webhook_fails() {
        let err = WebhookNotifier::default()
            .notify(&incident(Severity::Sev2))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "no webhook configured for sev2");
    }

    #[async_std::test]
    async fn test_log_notifier() {
        LogNotifier.notify(&incident(Severity::Sev1)).await.unwrap();
    }
}
