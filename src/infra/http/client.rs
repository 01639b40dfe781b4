use async_trait::async_trait;
use backoffice_api_types::{ListEnvelope, MutationResponse, PermissionsResponse, RecordEnvelope};
use bytes::Bytes;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use crate::application::error::{FetchError, MutationError};
use crate::application::repos::{Ack, ResourceApi};
use crate::application::validation::NormalizedPayload;
use crate::config::ApiSettings;
use crate::domain::filters::ListQuery;
use crate::domain::permissions::AuthContext;
use crate::domain::records::{Page, RecordId, ResourceRecord};
use crate::domain::resources::{Collection, RecordAction};
use crate::infra::error::InfraError;

/// Form field carrying the real verb of multipart updates.
const METHOD_OVERRIDE_FIELD: &str = "_method";

/// [`ResourceApi`] over the admin REST backend.
#[derive(Clone, Debug)]
pub struct HttpResourceApi {
    client: Client,
    base: Url,
    token: Option<String>,
    page_size: u32,
    permissions_path: String,
}

impl HttpResourceApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, InfraError> {
        if let Some(token) = settings.token.as_deref() {
            HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|err| InfraError::configuration(format!("invalid api token: {err}")))?;
        }
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(settings.timeout)
            .build()?;
        Ok(Self {
            client,
            base: settings.base_url.clone(),
            token: settings.token.clone(),
            page_size: settings.page_size.get(),
            permissions_path: settings.permissions_path.clone(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("backoffice-cli/", env!("CARGO_PKG_VERSION"))
    }

    /// `base` with `segments` appended; each segment is percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, String> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| format!("`{}` cannot be used as a base URL", self.base))?;
            path.pop_if_empty();
            for part in segments
                .iter()
                .flat_map(|segment| segment.split('/'))
                .filter(|part| !part.is_empty())
            {
                path.push(part);
            }
        }
        Ok(url)
    }

    /// Permissions endpoint: a leading `/` resolves from the host root, anything
    /// else under `base`.
    fn permissions_url(&self) -> Result<Url, String> {
        if self.permissions_path.starts_with('/') {
            self.base
                .join(&self.permissions_path)
                .map_err(|err| format!("invalid permissions path `{}`: {err}", self.permissions_path))
        } else {
            self.endpoint(&[self.permissions_path.as_str()])
        }
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let req = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        match self.token.as_deref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send_read(&self, url: Url) -> Result<(StatusCode, Bytes), FetchError> {
        debug!(%url, "GET");
        let resp = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(FetchError::transport)?;
        let (status, bytes) = read_body(resp).await.map_err(FetchError::transport)?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: error_message(&bytes),
            });
        }
        Ok((status, bytes))
    }

    async fn send_write(&self, request: RequestBuilder) -> Result<Ack, MutationError> {
        let resp = request.send().await.map_err(MutationError::transport)?;
        let (status, bytes) = read_body(resp).await.map_err(MutationError::transport)?;
        debug!(%status, "write acknowledged");

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            MutationResponse::default()
        } else {
            match serde_json::from_slice::<MutationResponse>(&bytes) {
                Ok(body) => body,
                Err(err) if status.is_success() => {
                    debug!(error = %err, "write response body is not JSON, treating as success");
                    MutationResponse::default()
                }
                Err(err) => {
                    debug!(error = %err, "failed write returned a non-JSON body");
                    return Err(MutationError::Rejected(
                        MutationError::GENERIC_MESSAGE.to_string(),
                    ));
                }
            }
        };

        if let Some((field, message)) = body.first_field_error() {
            return Err(MutationError::Validation { field, message });
        }
        if !status.is_success() || body.success == Some(false) {
            let message = body
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| MutationError::GENERIC_MESSAGE.to_string());
            return Err(MutationError::Rejected(message));
        }
        Ok(Ack::new(body.message))
    }
}

async fn read_body(resp: Response) -> Result<(StatusCode, Bytes), reqwest::Error> {
    let status = resp.status();
    let bytes = resp.bytes().await?;
    Ok((status, bytes))
}

/// `message` of a JSON error body, else the raw body text.
fn error_message(bytes: &[u8]) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    serde_json::from_slice::<ErrorBody>(bytes)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| String::from_utf8_lossy(bytes).trim().to_string())
}

#[async_trait]
impl ResourceApi for HttpResourceApi {
    async fn list(
        &self,
        collection: &Collection,
        query: &ListQuery,
    ) -> Result<Page<ResourceRecord>, FetchError> {
        let mut url = self
            .endpoint(&[collection.path()])
            .map_err(FetchError::Transport)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.pairs() {
                pairs.append_pair(key, &value);
            }
        }

        let (_, bytes) = self.send_read(url).await?;
        let mut envelope: ListEnvelope =
            serde_json::from_slice(&bytes).map_err(FetchError::decode)?;
        if envelope.success == Some(false) {
            let message = envelope
                .message
                .take()
                .unwrap_or_else(|| format!("Failed to load {}", collection.key()));
            return Err(FetchError::Rejected(message));
        }

        let page = envelope
            .take_page(collection.key())
            .ok_or_else(|| {
                FetchError::Decode(format!("response has no `{}` page", collection.key()))
            })?
            .map_err(FetchError::decode)?;
        let records = page
            .data
            .into_iter()
            .map(ResourceRecord::from_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(FetchError::decode)?;

        Ok(Page::new(records, page.total, page.per_page, self.page_size))
    }

    async fn fetch(
        &self,
        collection: &Collection,
        id: &RecordId,
    ) -> Result<ResourceRecord, FetchError> {
        let url = self
            .endpoint(&[collection.path(), id.as_str()])
            .map_err(FetchError::Transport)?;
        let (_, bytes) = self.send_read(url).await?;
        let envelope: RecordEnvelope =
            serde_json::from_slice(&bytes).map_err(FetchError::decode)?;
        if envelope.success == Some(false) {
            let message = envelope
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| format!("Failed to load {}", collection.key()));
            return Err(FetchError::Rejected(message));
        }
        let data = envelope
            .data
            .ok_or_else(|| FetchError::Decode("response has no `data` record".into()))?;
        ResourceRecord::from_value(data).map_err(FetchError::decode)
    }

    async fn perform(
        &self,
        collection: &Collection,
        id: &RecordId,
        action: RecordAction,
    ) -> Result<Ack, MutationError> {
        let url = self
            .endpoint(&[collection.path(), id.as_str(), action.path_segment()])
            .map_err(MutationError::Transport)?;
        debug!(%url, "POST action");
        self.send_write(self.request(Method::POST, url)).await
    }

    async fn update(
        &self,
        collection: &Collection,
        id: &RecordId,
        payload: &NormalizedPayload,
    ) -> Result<Ack, MutationError> {
        let url = self
            .endpoint(&[collection.path(), id.as_str()])
            .map_err(MutationError::Transport)?;
        let form = payload
            .fields()
            .iter()
            .fold(Form::new().text(METHOD_OVERRIDE_FIELD, "PUT"), |form, (field, value)| {
                form.text(*field, value.clone())
            });
        debug!(%url, fields = payload.fields().len(), "POST multipart update");
        self.send_write(self.request(Method::POST, url).multipart(form))
            .await
    }

    async fn delete(&self, collection: &Collection, id: &RecordId) -> Result<Ack, MutationError> {
        let url = self
            .endpoint(&[collection.path(), id.as_str()])
            .map_err(MutationError::Transport)?;
        debug!(%url, "DELETE");
        self.send_write(self.request(Method::DELETE, url)).await
    }

    async fn permissions(&self) -> Result<AuthContext, FetchError> {
        let url = self.permissions_url().map_err(FetchError::Transport)?;
        let (_, bytes) = self.send_read(url).await?;
        let response: PermissionsResponse =
            serde_json::from_slice(&bytes).map_err(FetchError::decode)?;
        Ok(AuthContext::from(response))
    }
}
