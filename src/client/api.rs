use reqwest::Method;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::client::session::Session;
use crate::error::MessageBody;
use crate::todos::dto::{CreateTodoRequest, CreatedTodoResponse, UpdateTodoRequest, UpdatedTodoResponse};
use crate::todos::Todo;
use crate::users::dto::{
    ActivationRequest, PublicUser, SigninRequest, SigninResponse, SignupRequest,
};

/// Normalized client-side error: a kind plus the message shown inline.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Any 403: the stored token has been discarded and the user must sign
    /// in again.
    #[error("Session expired. Please login again.")]
    SessionExpired,

    /// Non-2xx response other than 403, carrying the server's message field.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::SessionExpired => "authentication",
            ClientError::Api { .. } => "api",
            ClientError::Transport(_) => "transport",
        }
    }
}

/// Typed client for the todolist REST service.
///
/// Owns the [`Session`]: the bearer token is attached to every request when
/// present, and any 403 clears it before the error surfaces.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// `base_url` up to and including the service prefix, e.g.
    /// `http://localhost:5000/service`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut rb = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.session.token() {
            rb = rb.bearer_auth(token);
        }
        rb
    }

    async fn handle<T: DeserializeOwned>(
        &mut self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.as_u16() == 403 {
            warn!("403 response, discarding session token");
            self.session.clear();
            return Err(ClientError::SessionExpired);
        }
        if !status.is_success() {
            let message = resp
                .json::<MessageBody>()
                .await
                .map(|b| b.message)
                .unwrap_or_else(|_| "Request failed.".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.json::<T>().await?)
    }

    pub async fn signup(&mut self, payload: &SignupRequest) -> Result<String, ClientError> {
        let resp = self
            .request(Method::POST, "/user/signup")
            .json(payload)
            .send()
            .await?;
        let body: MessageBody = self.handle(resp).await?;
        Ok(body.message)
    }

    pub async fn activate(&mut self, activation_token: &str) -> Result<String, ClientError> {
        let resp = self
            .request(Method::POST, "/user/activation")
            .json(&ActivationRequest {
                activation_token: activation_token.to_string(),
            })
            .send()
            .await?;
        let body: MessageBody = self.handle(resp).await?;
        Ok(body.message)
    }

    /// On success the returned token becomes the session token.
    pub async fn signin(&mut self, email: &str, password: &str) -> Result<SigninResponse, ClientError> {
        let resp = self
            .request(Method::POST, "/user/signin")
            .json(&SigninRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        let body: SigninResponse = self.handle(resp).await?;
        self.session.set_token(body.refresh_token.clone());
        Ok(body)
    }

    /// Purely local: tokens are stateless, nothing to tell the server.
    pub fn logout(&mut self) {
        self.session.clear();
    }

    pub async fn user_info(&mut self) -> Result<PublicUser, ClientError> {
        let resp = self.request(Method::GET, "/user/user-infor").send().await?;
        self.handle(resp).await
    }

    pub async fn get_all(&mut self) -> Result<Vec<Todo>, ClientError> {
        let resp = self.request(Method::GET, "/todo/get_all").send().await?;
        self.handle(resp).await
    }

    pub async fn add_todo(&mut self, payload: &CreateTodoRequest) -> Result<Todo, ClientError> {
        let resp = self
            .request(Method::POST, "/todo/add_todo")
            .json(payload)
            .send()
            .await?;
        let body: CreatedTodoResponse = self.handle(resp).await?;
        Ok(body.new_todo)
    }

    pub async fn update_todo(
        &mut self,
        id: Uuid,
        payload: &UpdateTodoRequest,
    ) -> Result<Todo, ClientError> {
        let resp = self
            .request(Method::PATCH, &format!("/todo/update_todo/{id}"))
            .json(payload)
            .send()
            .await?;
        let body: UpdatedTodoResponse = self.handle(resp).await?;
        Ok(body.updated_todo)
    }

    pub async fn delete_todo(&mut self, id: Uuid) -> Result<String, ClientError> {
        let resp = self
            .request(Method::DELETE, &format!("/todo/delete_todo/{id}"))
            .send()
            .await?;
        let body: MessageBody = self.handle(resp).await?;
        Ok(body.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;
    use axum::{routing::get, routing::post, Json, Router};

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/service")
    }

    #[tokio::test]
    async fn forbidden_clears_session_and_reports_expiry() {
        let router = Router::new().route(
            "/service/todo/get_all",
            get(|| async {
                (
                    axum::http::StatusCode::FORBIDDEN,
                    Json(serde_json::json!({
                        "message": "Token Expired or Invalid Authentication."
                    })),
                )
            }),
        );
        let base = spawn(router).await;

        let mut client = ApiClient::new(base);
        client.session_mut().set_token("stale-token");

        let err = client.get_all().await.unwrap_err();
        assert!(matches!(err, ClientError::SessionExpired));
        assert_eq!(err.kind(), "authentication");
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn bearer_token_is_attached_when_present() {
        let router = Router::new().route(
            "/service/todo/get_all",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get(axum::http::header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                assert_eq!(auth, "Bearer tok-123");
                Json(Vec::<Todo>::new())
            }),
        );
        let base = spawn(router).await;

        let mut client = ApiClient::new(base);
        client.session_mut().set_token("tok-123");
        let todos = client.get_all().await.unwrap();
        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn error_bodies_surface_their_message() {
        let router = Router::new().route(
            "/service/user/signup",
            post(|| async {
                (
                    axum::http::StatusCode::CONFLICT,
                    Json(serde_json::json!({"message": "Email already registered."})),
                )
            }),
        );
        let base = spawn(router).await;

        let mut client = ApiClient::new(base);
        let err = client
            .signup(&SignupRequest {
                personal_id: "id1".into(),
                name: "Alice".into(),
                email: "a@x.com".into(),
                password: "Passw0rd".into(),
                address: "addr".into(),
                phone_number: "123".into(),
            })
            .await
            .unwrap_err();

        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "Email already registered.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn signin_stores_the_returned_token() {
        let router = Router::new().route(
            "/service/user/signin",
            post(|| async {
                Json(serde_json::json!({
                    "user": {
                        "id": Uuid::new_v4(),
                        "personal_id": "id1",
                        "name": "Alice",
                        "email": "a@x.com",
                        "address": "addr",
                        "phone_number": "123",
                        "activated": true,
                        "created_at": "2025-03-01T00:00:00Z"
                    },
                    "refresh_token": "tok-456"
                }))
            }),
        );
        let base = spawn(router).await;

        let mut client = ApiClient::new(base);
        let resp = client.signin("a@x.com", "Passw0rd").await.unwrap();
        assert_eq!(resp.user.name, "Alice");
        assert_eq!(client.session().token(), Some("tok-456"));

        client.logout();
        assert!(!client.session().is_authenticated());
    }
}
