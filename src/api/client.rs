use std::{collections::HashMap, time::Duration};

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, info};

use super::envelope::{decode_envelope, ApiSuccess};
use crate::{
    config::ApiConfig,
    error::ClientError,
    timing::{
        daily::DaySchedule,
        schedule::{ScheduleMap, SchedulePayload},
        weekday::Locale,
    },
};

/// Talks to the booking backend about a prestation's weekly schedule.
///
/// Authentication rides on whatever the backend expects outside of this client
/// (session cookies); nothing here manages it.
#[derive(Clone)]
pub struct ScheduleClient {
    client: Client,
    base_url: String,
    schedule_path: String,
}

impl ScheduleClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            schedule_path: config.schedule_path.clone(),
        })
    }

    fn schedule_url(&self, prestation_id: &str) -> String {
        format!(
            "{}{}",
            self.base_url,
            self.schedule_path.replace("{id}", prestation_id)
        )
    }

    async fn send(request: RequestBuilder) -> Result<(u16, String), ClientError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "Backend responded");
        Ok((status, body))
    }

    /// POSTs the full schedule. Returns the success envelope with whatever `data` the backend sent.
    pub async fn submit_schedule(
        &self,
        prestation_id: &str,
        payload: &SchedulePayload,
    ) -> Result<ApiSuccess<Value>, ClientError> {
        let url = self.schedule_url(prestation_id);
        info!(%url, days = payload.schedule().len(), "Submitting schedule");
        let (status, body) = Self::send(self.client.post(&url).json(payload)).await?;
        decode_envelope(status, &body)
    }

    /// Fetches the stored schedule, whose weekday keys are in `locale`.
    pub async fn fetch_schedule(
        &self,
        prestation_id: &str,
        locale: Locale,
    ) -> Result<ScheduleMap, ClientError> {
        let url = self.schedule_url(prestation_id);
        debug!(%url, "Fetching schedule");
        let (status, body) = Self::send(self.client.get(&url)).await?;
        let envelope: ApiSuccess<HashMap<String, DaySchedule>> = decode_envelope(status, &body)?;
        let days = envelope.data.ok_or(ClientError::MissingData)?;
        Ok(ScheduleMap::from_localized(locale, days)?)
    }

    /// Like `fetch_schedule`, but a prestation with nothing stored yet (404) starts empty.
    pub async fn fetch_schedule_or_empty(
        &self,
        prestation_id: &str,
        locale: Locale,
    ) -> Result<ScheduleMap, ClientError> {
        match self.fetch_schedule(prestation_id, locale).await {
            Err(ClientError::Rejected {
                status_code: 404, ..
            }) => {
                debug!(prestation_id, "No stored schedule, starting empty");
                Ok(ScheduleMap::new())
            }
            other => other,
        }
    }
}
