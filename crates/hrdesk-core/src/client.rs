//! The authenticated API client.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::credentials::Credentials;
use crate::error::{ApiError, Error, RefreshError};
use crate::request::{ApiRequest, ApiResponse, Attempt};
use crate::session::Session;
use crate::tokens::{RefreshToken, TokenPair};
use crate::traits::{Navigator, SessionStore, Transport};
use crate::Result;

/// Default path of the refresh exchange.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Default path of the login endpoint.
pub const LOGIN_PATH: &str = "/auth/login";

/// Endpoint configuration for [`AuthClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Path of the refresh exchange, relative to the API base.
    pub refresh_path: String,
    /// Path of the login endpoint, relative to the API base.
    pub login_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            refresh_path: REFRESH_PATH.to_string(),
            login_path: LOGIN_PATH.to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Issues API requests on behalf of the application, attaching the stored
/// access token and recovering from an expired one.
///
/// On a 401 the client exchanges the stored refresh token for a new pair,
/// stores it, and replays the request once. If the exchange is impossible
/// or fails, or the replay is rejected again, the session is cleared and
/// the [`Navigator`] is told to show the login screen.
///
/// Refresh is per request: two requests failing at the same time each run
/// their own exchange, and the last one to finish decides the stored pair.
///
/// The client is cheap to clone; clones share the store, transport and
/// navigator.
pub struct AuthClient<S, T, N> {
    inner: Arc<ClientInner<S, T, N>>,
}

struct ClientInner<S, T, N> {
    config: ClientConfig,
    store: S,
    transport: T,
    navigator: N,
}

impl<S, T, N> Clone for AuthClient<S, T, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, T, N> AuthClient<S, T, N>
where
    S: SessionStore,
    T: Transport,
    N: Navigator,
{
    /// Create a client with the default endpoint paths.
    pub fn new(store: S, transport: T, navigator: N) -> Self {
        Self::with_config(ClientConfig::default(), store, transport, navigator)
    }

    pub fn with_config(config: ClientConfig, store: S, transport: T, navigator: N) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                config,
                store,
                transport,
                navigator,
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &S {
        &self.inner.store
    }

    /// Perform one logical request.
    ///
    /// Returns the response for any 2xx status. Other statuses come back as
    /// [`Error::Api`], unreachable backends as [`Error::Transport`]. When
    /// the session could not be recovered the error is the 401 or the
    /// refresh failure that ended it.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn request(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        if let Some(session) = self.inner.store.read().await {
            request.set_bearer(session.access_token());
        }

        let mut attempt = Attempt::Fresh;

        loop {
            debug!(?attempt, "Dispatching request");
            let response = self.inner.transport.send(&request).await?;

            if response.is_success() {
                return Ok(response);
            }

            let error = ApiError::from_body(response.status, &response.body);
            if !error.is_unauthorized() {
                return Err(error.into());
            }

            match attempt {
                Attempt::Retried => {
                    warn!("Request rejected again after refresh");
                    return Err(self.expire(error.into()).await);
                }
                Attempt::Fresh => {
                    attempt = Attempt::Retried;

                    let Some(session) = self.inner.store.read().await else {
                        debug!("No refresh token stored");
                        return Err(self.expire(error.into()).await);
                    };

                    let tokens = match self.exchange(session.refresh_token()).await {
                        Ok(tokens) => tokens,
                        Err(e) => return Err(self.expire(e.into()).await),
                    };

                    let session = session.rotate(tokens);
                    self.inner.store.write(&session).await;
                    request.set_bearer(session.access_token());
                }
            }
        }
    }

    /// Perform a request and decode a successful JSON body.
    pub async fn request_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        self.request(request).await?.json()
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.request_json(ApiRequest::get(path)).await
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        self.request_json(ApiRequest::post(path).json(body)?).await
    }

    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        self.request_json(ApiRequest::put(path).json(body)?).await
    }

    pub async fn patch<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        self.request_json(ApiRequest::patch(path).json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.request(ApiRequest::delete(path)).await
    }

    /// Open a session with email and password.
    ///
    /// The response must carry `accessToken` and `refreshToken`; any other
    /// fields are kept in the stored session. A rejected login is returned
    /// as-is and does not trigger a refresh or a redirect.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        info!("Creating new session");

        let request = ApiRequest::post(&self.inner.config.login_path).json(credentials)?;
        let response = self.inner.transport.send(&request).await?.error_for_status()?;

        let session = Session::decode(&response.text()).ok_or_else(|| {
            Error::Decode("login response did not contain a token pair".to_string())
        })?;

        self.inner.store.write(&session).await;
        debug!("Session created successfully");
        Ok(session)
    }

    /// Discard the stored session at the user's request.
    pub async fn logout(&self) {
        info!("Logging out");
        self.inner.store.clear().await;
    }

    /// Returns the stored session, if any.
    pub async fn session(&self) -> Option<Session> {
        self.inner.store.read().await
    }

    /// Trade a refresh token for a new pair. The request carries no
    /// bearer credential.
    #[instrument(skip_all)]
    async fn exchange(
        &self,
        refresh_token: &RefreshToken,
    ) -> std::result::Result<TokenPair, RefreshError> {
        info!("Refreshing session");

        let request = ApiRequest::post(&self.inner.config.refresh_path)
            .json(&RefreshRequest {
                refresh_token: refresh_token.as_str(),
            })
            .map_err(|e| RefreshError::Other(Box::new(e)))?;

        let response = match self.inner.transport.send(&request).await {
            Ok(response) => response,
            Err(Error::Transport(e)) => return Err(RefreshError::Transport(e)),
            Err(e) => return Err(RefreshError::Other(Box::new(e))),
        };

        if !response.is_success() {
            return Err(RefreshError::Rejected(ApiError::from_body(
                response.status,
                &response.body,
            )));
        }

        let tokens: TokenPair = response
            .json()
            .map_err(|e| RefreshError::MalformedResponse(e.to_string()))?;

        if !tokens.is_complete() {
            return Err(RefreshError::MalformedResponse(
                "empty token in refresh response".to_string(),
            ));
        }

        debug!("Session refreshed successfully");
        Ok(tokens)
    }

    /// Drop the session, send the user to the login screen, and hand the
    /// triggering error back.
    async fn expire(&self, error: Error) -> Error {
        info!(error = %error, "Session expired, redirecting to login");
        self.inner.store.clear().await;
        self.inner.navigator.navigate_to_login();
        error
    }
}

impl<S, T, N> std::fmt::Debug for AuthClient<S, T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
