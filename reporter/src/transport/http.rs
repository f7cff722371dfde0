//! HTTP(S) push sender
//!
//! Posts line-protocol batches to `<scheme>://<host>:<port>/write` with the
//! database name (the URI path, leading slash stripped) and the timestamp
//! precision as query parameters, and optional basic-auth credentials.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::transport::endpoint::EndpointDescriptor;
use crate::transport::factory::{SenderBuildError, SenderSettings};
use crate::transport::{Point, SendError, Sender, encode_batch};
use crate::utils::time::{TimePrecision, saturated_millis};

pub struct HttpSender {
    client: reqwest::Client,
    write_url: Url,
    database: String,
    credentials: Option<(String, Option<String>)>,
    precision: TimePrecision,
    connect_timeout_ms: i32,
    read_timeout_ms: i32,
}

impl HttpSender {
    /// Build the sender. No connection is attempted until the first `send`;
    /// a client-build or URL failure is still a construction error.
    pub fn build(
        endpoint: &EndpointDescriptor,
        settings: &SenderSettings,
    ) -> Result<Self, SenderBuildError> {
        let connect_timeout_ms = saturated_millis(settings.connect_timeout);
        let read_timeout_ms = saturated_millis(settings.read_timeout);

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(connect_timeout_ms as u64))
            .timeout(Duration::from_millis(read_timeout_ms as u64))
            .build()
            .map_err(|e| SenderBuildError::construction("http", endpoint.address(), e))?;

        let write_url = Url::parse(&format!(
            "{}://{}/write",
            endpoint.scheme,
            endpoint.address()
        ))
        .map_err(|e| SenderBuildError::construction("http", endpoint.address(), e))?;

        let database = endpoint
            .path
            .strip_prefix('/')
            .unwrap_or(&endpoint.path)
            .to_string();

        let credentials = endpoint.credentials.as_deref().map(|userinfo| {
            match userinfo.split_once(':') {
                Some((user, pass)) => (user.to_string(), Some(pass.to_string())),
                None => (userinfo.to_string(), None),
            }
        });

        Ok(Self {
            client,
            write_url,
            database,
            credentials,
            precision: settings.time_precision,
            connect_timeout_ms,
            read_timeout_ms,
        })
    }

    /// Target database (URI path with the leading slash stripped)
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Basic-auth user, when credentials were supplied
    pub fn username(&self) -> Option<&str> {
        self.credentials.as_ref().map(|(user, _)| user.as_str())
    }

    pub fn write_url(&self) -> &Url {
        &self.write_url
    }

    pub fn connect_timeout_ms(&self) -> i32 {
        self.connect_timeout_ms
    }

    pub fn read_timeout_ms(&self) -> i32 {
        self.read_timeout_ms
    }
}

#[async_trait]
impl Sender for HttpSender {
    async fn send(&self, batch: &[Point]) -> Result<(), SendError> {
        let body = encode_batch(batch, self.precision);

        let mut request = self
            .client
            .post(self.write_url.clone())
            .query(&[
                ("db", self.database.as_str()),
                ("precision", self.precision.as_str()),
            ])
            .body(body);
        if let Some((user, pass)) = &self.credentials {
            request = request.basic_auth(user, pass.as_deref());
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(SendError::Status {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }

    fn transport(&self) -> &'static str {
        "http"
    }
}
