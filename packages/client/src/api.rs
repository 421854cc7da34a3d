//! HTTP client for the chat server's JSON API.

use reqwest::Url;
use serde::{Serialize, de::DeserializeOwned};
use tsudoi_shared::protocol::{
    ApiResponse,
    http::{
        CreateRoomRequest, CredentialsRequest, LoginResponse, RoomDto, SendMessageRequest,
        SentMessageDto,
    },
};

use crate::error::ClientError;

/// Typed wrapper over the server API.
///
/// Holds the session token after a successful login and presents it as a
/// bearer token on every authenticated call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    /// `base_url` is the server origin, e.g. `http://127.0.0.1:8080`
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                base_url
            )));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base,
            token: None,
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let request = CredentialsRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post::<_, ()>(&["api", "register"], &request, false)
            .await
            .map(|_| ())
    }

    /// Log in and keep the issued token for subsequent calls
    pub async fn login(&mut self, username: &str, password: &str) -> Result<String, ClientError> {
        let request = CredentialsRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse =
            require(self.post(&["api", "login"], &request, false).await?)?;
        self.token = Some(response.token.clone());
        Ok(response.token)
    }

    pub async fn logout(&mut self) -> Result<(), ClientError> {
        self.post::<_, ()>(&["api", "logout"], &serde_json::json!({}), true)
            .await?;
        self.token = None;
        Ok(())
    }

    pub async fn create_room(&self, name: &str) -> Result<RoomDto, ClientError> {
        let request = CreateRoomRequest {
            name: name.to_string(),
        };
        require(self.post(&["api", "rooms"], &request, true).await?)
    }

    pub async fn list_rooms(&self) -> Result<Vec<RoomDto>, ClientError> {
        require(self.get(&["api", "rooms"]).await?)
    }

    pub async fn list_user_rooms(&self) -> Result<Vec<String>, ClientError> {
        require(self.get(&["api", "me", "rooms"]).await?)
    }

    pub async fn join_room(&self, name: &str) -> Result<(), ClientError> {
        self.post::<_, ()>(&["api", "rooms", name, "join"], &serde_json::json!({}), true)
            .await
            .map(|_| ())
    }

    pub async fn leave_room(&self, name: &str) -> Result<(), ClientError> {
        self.post::<_, ()>(&["api", "rooms", name, "leave"], &serde_json::json!({}), true)
            .await
            .map(|_| ())
    }

    pub async fn list_room_members(&self, name: &str) -> Result<Vec<String>, ClientError> {
        require(self.get(&["api", "rooms", name, "members"]).await?)
    }

    pub async fn send_message(
        &self,
        room: &str,
        text: &str,
    ) -> Result<SentMessageDto, ClientError> {
        let request = SendMessageRequest {
            text: text.to_string(),
        };
        require(
            self.post(&["api", "rooms", room, "messages"], &request, true)
                .await?,
        )
    }

    /// WebSocket URL of the message stream for the current token
    pub fn stream_url(&self) -> Result<Url, ClientError> {
        let token = self.bearer()?;
        let mut url = self.endpoint(&["ws"])?;
        let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
        url.set_scheme(scheme)
            .map_err(|_| ClientError::InvalidUrl(self.base.to_string()))?;
        url.query_pairs_mut().clear().append_pair("token", token);
        Ok(url)
    }

    fn bearer(&self) -> Result<&str, ClientError> {
        self.token.as_deref().ok_or(ClientError::NotLoggedIn)
    }

    /// Build an endpoint URL; each segment is percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Option<T>, ClientError> {
        let url = self.endpoint(segments)?;
        let response = self.http.get(url).bearer_auth(self.bearer()?).send().await?;
        decode(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
        authenticated: bool,
    ) -> Result<Option<T>, ClientError> {
        let url = self.endpoint(segments)?;
        let mut request = self.http.post(url).json(body);
        if authenticated {
            request = request.bearer_auth(self.bearer()?);
        }
        decode(request.send().await?).await
    }
}

async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Option<T>, ClientError> {
    let status = response.status();
    let body: ApiResponse<T> = response
        .json()
        .await
        .map_err(|e| ClientError::UnexpectedResponse(format!("{}: {}", status, e)))?;

    if body.success {
        return Ok(body.payload);
    }
    Err(match body.error {
        Some(error) => ClientError::Api(error),
        None => ClientError::UnexpectedResponse(format!("{}: failure without error", status)),
    })
}

fn require<T>(payload: Option<T>) -> Result<T, ClientError> {
    payload.ok_or_else(|| ClientError::UnexpectedResponse("missing payload".to_string()))
}
