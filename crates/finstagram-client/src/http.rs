//! HTTP transport for the client.
//!
//! Provides [`HttpApi`], a thin reqwest wrapper that maps each [`Endpoint`] to
//! one request. No retries and no timeout beyond the one configured at
//! construction (none by default, matching the transport default).

use std::time::Duration;

use finstagram_proto::{
    ChatPeer, Credentials, Endpoint, LoginReply, MediaEntry, Method, NotificationEntry,
    OutgoingMessage, ProfileDraft, ProfileView, ServerMessage, WireMessage,
};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::{Api, ApiError};

/// Backend client over HTTP.
///
/// Clone is cheap: reqwest shares its connection pool between clones.
#[derive(Debug, Clone)]
pub struct HttpApi {
    base: Url,
    client: Client,
}

impl HttpApi {
    /// Create a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if `base_url` is not an absolute
    /// http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client whose requests fail after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!("not an http base url: {base_url}")));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self { base, client })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Absolute URL for `endpoint`, with user-supplied segments
    /// percent-encoded.
    pub fn url(&self, endpoint: &Endpoint<'_>) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::InvalidUrl(self.base.to_string()))?;
            segments.pop_if_empty();
            segments.extend(endpoint.segments());
        }
        Ok(url)
    }

    fn request(&self, endpoint: &Endpoint<'_>) -> Result<RequestBuilder, ApiError> {
        let url = self.url(endpoint)?;
        tracing::debug!(%endpoint, "backend request");
        Ok(match endpoint.method() {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint<'_>) -> Result<T, ApiError> {
        let response = self.request(&endpoint)?.send().await?;
        decode(response).await
    }

    async fn post<B, T>(&self, endpoint: Endpoint<'_>, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(&endpoint)?.json(body).send().await?;
        decode(response).await
    }
}

/// Decode a success body as `T`, or turn an error status into
/// `ApiError::Rejected` carrying the body's `message` field.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message =
        response.json::<ServerMessage>().await.ok().and_then(|body| body.text().map(String::from));
    Err(ApiError::Rejected { status: status.as_u16(), message })
}

impl Api for HttpApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginReply, ApiError> {
        self.post(Endpoint::Login, credentials).await
    }

    async fn signup(&self, credentials: &Credentials) -> Result<ServerMessage, ApiError> {
        self.post(Endpoint::Signup, credentials).await
    }

    async fn create_profile(&self, profile: &ProfileDraft) -> Result<ServerMessage, ApiError> {
        self.post(Endpoint::CreateProfile, profile).await
    }

    async fn chat_list(&self, username: &str) -> Result<Vec<ChatPeer>, ApiError> {
        self.get(Endpoint::ChatList { username }).await
    }

    async fn messages(&self, user: &str, peer: &str) -> Result<Vec<WireMessage>, ApiError> {
        self.get(Endpoint::Messages { user, peer }).await
    }

    async fn send_message(&self, message: &OutgoingMessage) -> Result<(), ApiError> {
        let response = self.request(&Endpoint::SendMessage)?.json(message).send().await?;
        check_status(response).await.map(|_| ())
    }

    async fn posts(&self) -> Result<Vec<MediaEntry>, ApiError> {
        self.get(Endpoint::Posts).await
    }

    async fn reels(&self) -> Result<Vec<MediaEntry>, ApiError> {
        self.get(Endpoint::Reels).await
    }

    async fn notifications(&self, username: &str) -> Result<Vec<NotificationEntry>, ApiError> {
        self.get(Endpoint::Notifications { username }).await
    }

    async fn profile(&self, username: &str) -> Result<ProfileView, ApiError> {
        self.get(Endpoint::Profile { username }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_under_base_path() {
        let api = HttpApi::new("http://localhost:5000/").unwrap();
        let url = api.url(&Endpoint::Messages { user: "abc", peer: "bob" }).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/messages/abc/bob");

        let nested = HttpApi::new("https://example.com/finstagram/").unwrap();
        let url = nested.url(&Endpoint::Posts).unwrap();
        assert_eq!(url.as_str(), "https://example.com/finstagram/api/posts");
    }

    #[test]
    fn url_encodes_usernames() {
        let api = HttpApi::new("http://localhost:5000").unwrap();
        let url = api.url(&Endpoint::ChatList { username: "a b/c" }).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/chat-list/a%20b%2Fc");
    }

    #[test]
    fn rejects_non_http_base() {
        assert!(matches!(HttpApi::new("mailto:abc@example.com"), Err(ApiError::InvalidUrl(_))));
        assert!(matches!(HttpApi::new("not a url"), Err(ApiError::InvalidUrl(_))));
    }
}
