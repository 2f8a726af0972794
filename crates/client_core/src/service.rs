use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use shared::{
    domain::{StudentIdentity, StudentRecord},
    error::ApiError,
    protocol::{
        LookupOutcome, LookupResponse, PaymentRequest, PaymentResponse, LOOKUP_PATH, PAYMENT_PATH,
    },
};
use tracing::debug;

use crate::{error::ServiceError, settings::ClientSettings};

/// Remote side of the fee entry screen.
#[async_trait]
pub trait FeeService: Send + Sync {
    /// `Ok(None)` when no student matches the identity.
    async fn lookup_student(
        &self,
        identity: &StudentIdentity,
    ) -> Result<Option<StudentRecord>, ServiceError>;

    async fn record_payment(&self, request: &PaymentRequest)
        -> Result<StudentRecord, ServiceError>;
}

#[async_trait]
impl<T> FeeService for Arc<T>
where
    T: FeeService + ?Sized,
{
    async fn lookup_student(
        &self,
        identity: &StudentIdentity,
    ) -> Result<Option<StudentRecord>, ServiceError> {
        (**self).lookup_student(identity).await
    }

    async fn record_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<StudentRecord, ServiceError> {
        (**self).record_payment(request).await
    }
}

pub struct HttpFeeService {
    http: Client,
    server_url: String,
}

impl HttpFeeService {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_url: server_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> anyhow::Result<Self> {
        let server_url = settings.validated_server_url()?;
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build http client")?;
        Ok(Self { http, server_url })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }
}

#[async_trait]
impl FeeService for HttpFeeService {
    async fn lookup_student(
        &self,
        identity: &StudentIdentity,
    ) -> Result<Option<StudentRecord>, ServiceError> {
        let server_url = &self.server_url;
        debug!(grade = %identity.grade, "looking up student");
        let response = self
            .http
            .get(format!("{server_url}{LOOKUP_PATH}"))
            .query(identity)
            .send()
            .await
            .context("lookup request failed")?;

        // The body decides the outcome; error bodies arrive with 4xx statuses.
        let status = response.status();
        let body: LookupResponse = response
            .json()
            .await
            .context("lookup response was not valid JSON")?;

        match body.into_outcome().context("malformed lookup response")? {
            LookupOutcome::Rejected(message) => Err(ServiceError::Rejected {
                status: status.as_u16(),
                message: Some(message),
            }),
            LookupOutcome::Existing(record) => Ok(Some(record)),
            LookupOutcome::NotFound => Ok(None),
        }
    }

    async fn record_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<StudentRecord, ServiceError> {
        let server_url = &self.server_url;
        debug!(
            grade = %request.identity.grade,
            new_student = request.total_fees.is_some(),
            "recording payment"
        );
        let response = self
            .http
            .post(format!("{server_url}{PAYMENT_PATH}"))
            .json(request)
            .send()
            .await
            .context("payment request failed")?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .context("payment response was not valid JSON")?;

        let error = ApiError::deserialize(&body)
            .ok()
            .map(|api_error| api_error.error)
            .filter(|message| !message.is_empty());
        if status != StatusCode::OK || error.is_some() {
            return Err(ServiceError::Rejected {
                status: status.as_u16(),
                message: error,
            });
        }

        let parsed: PaymentResponse =
            serde_json::from_value(body).context("payment response missing student record")?;
        Ok(parsed.record)
    }
}
