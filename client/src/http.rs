//! reqwest-backed [`RemoteGateway`].

use eventdesk_core::gateway::{
    GatewayError, GatewayFuture, GatewayResponse, GraphQlRequest, RemoteGateway,
};

/// Sends GraphQL requests as JSON `POST`s to one endpoint.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGateway {
    /// Gateway for `endpoint` with a default client
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Gateway reusing an existing client (connection pool, timeouts)
    #[must_use]
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Target URL
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RemoteGateway for HttpGateway {
    fn send(&self, request: GraphQlRequest, token: Option<String>) -> GatewayFuture<'_> {
        Box::pin(async move {
            let operation = request.operation;
            let mut builder = self.client.post(&self.endpoint).json(&request);
            if let Some(token) = token {
                builder = builder.bearer_auth(token);
            }

            let response = builder.send().await.map_err(|e| {
                tracing::debug!(%operation, error = %e, "Request failed to send");
                GatewayError::Network(e.to_string())
            })?;

            let status = response.status().as_u16();
            if status != 200 && status != 201 {
                return Err(GatewayError::Status(status));
            }

            let body: GatewayResponse = response
                .json()
                .await
                .map_err(|e| GatewayError::Decode(e.to_string()))?;

            if let Some(errors) = body.errors.as_ref().filter(|errors| !errors.is_null()) {
                return Err(GatewayError::Rejected(errors.to_string()));
            }

            tracing::trace!(%operation, status, "Response received");
            Ok(body)
        })
    }
}
