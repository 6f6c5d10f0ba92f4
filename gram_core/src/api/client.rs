use super::error::{self, Error};
use super::{graphql, login, signup, AuthResult};
use crate::login::AuthToken;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use url::Url;

/// Client for the GraphQL API
#[derive(Debug, Clone)]
pub struct Client {
    /// The GraphQL endpoint, including the path, e.g.
    /// `https://gram.your-domain.com/graphql`.
    pub endpoint: String,

    /// Auth. Set this by logging in; it's sent as a bearer token.
    pub auth: Option<AuthToken>,
}

impl Client {
    /// Construct a new client
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            auth: None,
        }
    }

    /// Log into the server. A wrong password is not an error here; check
    /// `AuthResult::is_success`.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `mutate`.
    pub async fn login(
        &self,
        client: &reqwest::Client,
        req: &login::Req,
    ) -> error::Result<AuthResult> {
        let resp: login::Resp = self
            .mutate(client, login::OPERATION, login::MUTATION, req)
            .await?;

        Ok(resp.login)
    }

    /// Create an account on the server.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `mutate`.
    pub async fn signup(
        &self,
        client: &reqwest::Client,
        req: &signup::Req,
    ) -> error::Result<AuthResult> {
        let resp: signup::Resp = self
            .mutate(client, signup::OPERATION, signup::MUTATION, req)
            .await?;

        Ok(resp.signup)
    }

    /// Run a mutation and unwrap the GraphQL envelope.
    ///
    /// ## Errors
    ///
    /// - `Error::UrlParse` if `endpoint` isn't a URL
    /// - `Error::GraphQl` or `Error::MissingData` if the envelope has no data
    /// - anything from `handle_response`
    async fn mutate<V, T>(
        &self,
        client: &reqwest::Client,
        operation_name: &'static str,
        query: &'static str,
        variables: &V,
    ) -> error::Result<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let url = Url::parse(&self.endpoint)?;

        let mut req = client.post(url).json(&graphql::Request {
            operation_name,
            query,
            variables,
        });

        if let Some(token) = &self.auth {
            req = req.bearer_auth(token.as_str());
        }

        let resp: graphql::Response<T> = Self::handle_response(req).await?;

        resp.into_result()
    }

    /// Convert an HTTP response into a result, interpreting errors in a
    /// standard way.
    ///
    /// ## Errors
    ///
    /// - `Ok(..)` if the server returned a success (2xx)
    /// - `Error::Client` if the server returned a client error (4xx). GraphQL
    ///   servers usually explain themselves in the body; we use the first
    ///   message if there is one.
    /// - `Error::Server` if the server returned a server error (5xx)
    /// - `Error::Unexpected` if the server returned something else (the server is
    ///   not supposed to issue redirects or informational responses.)
    async fn handle_response<T>(req: reqwest::RequestBuilder) -> error::Result<T>
    where
        T: DeserializeOwned,
    {
        let resp = req.send().await?;

        let status = resp.status();

        if status.is_success() {
            Ok(resp.json().await?)
        } else if status.is_client_error() {
            let message = resp
                .json::<graphql::Response<IgnoredAny>>()
                .await
                .ok()
                .and_then(|body| body.errors.into_iter().next())
                .map_or_else(|| status.to_string(), |err| err.message);

            Err(Error::Client(message))
        } else if status.is_server_error() {
            Err(Error::Server)
        } else {
            Err(Error::Unexpected(status))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Credentials, SignupRequest};
    use axum::{
        http::{header::AUTHORIZATION, HeaderMap, StatusCode},
        response::IntoResponse,
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    /// Serve a router on a random local port, returning the GraphQL endpoint.
    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        format!("http://{addr}/graphql")
    }

    /// A tiny stand-in for the real API. Knows exactly one account.
    async fn graphql(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
        let vars = &body["variables"];

        match body["operationName"].as_str() {
            Some("login") => {
                if vars["nickname"] == "nick" && vars["password"] == "hunter2hunter2" {
                    Json(json!({
                        "data": { "login": { "isSuccess": true, "token": "T", "error": null } }
                    }))
                } else {
                    Json(json!({
                        "data": { "login": { "isSuccess": false, "token": null, "error": "bad credentials" } }
                    }))
                }
            }
            Some("signup") => {
                if vars["nickname"] == "nick" {
                    Json(json!({
                        "data": { "signup": { "isSuccess": false, "error": "nickname taken" } }
                    }))
                } else {
                    Json(json!({ "data": { "signup": { "isSuccess": true, "error": null } } }))
                }
            }
            Some("whoami") => {
                let auth = headers
                    .get(AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default();

                Json(json!({ "data": { "login": { "isSuccess": true, "error": auth } } }))
            }
            _ => Json(json!({ "errors": [{ "message": "unknown operation" }] })),
        }
    }

    fn credentials(nickname: &str, password: &str) -> Credentials {
        Credentials {
            nickname: nickname.to_string(),
            password: password.to_string(),
        }
    }

    mod login {
        use super::*;

        #[test_log::test(tokio::test)]
        async fn test_success() {
            let endpoint = serve(Router::new().route("/graphql", post(graphql))).await;

            let result = Client::new(endpoint)
                .login(&reqwest::Client::new(), &credentials("nick", "hunter2hunter2"))
                .await
                .unwrap();

            assert_eq!(result, AuthResult::with_token("T"));
        }

        #[test_log::test(tokio::test)]
        async fn test_bad_credentials() {
            let endpoint = serve(Router::new().route("/graphql", post(graphql))).await;

            let result = Client::new(endpoint)
                .login(&reqwest::Client::new(), &credentials("nick", "wrong"))
                .await
                .unwrap();

            assert_eq!(result, AuthResult::failure("bad credentials"));
        }

        #[test_log::test(tokio::test)]
        async fn test_sends_bearer_token() {
            // piggyback on the stub's whoami branch to echo the header back
            async fn echo(headers: HeaderMap, Json(mut body): Json<Value>) -> Json<Value> {
                body["operationName"] = json!("whoami");
                graphql(headers, Json(body)).await
            }

            let endpoint = serve(Router::new().route("/graphql", post(echo))).await;

            let mut client = Client::new(endpoint);
            client.auth = Some(AuthToken::new("T"));

            let result = client
                .login(&reqwest::Client::new(), &credentials("nick", "hunter2hunter2"))
                .await
                .unwrap();

            assert_eq!(result.error.as_deref(), Some("Bearer T"));
        }
    }

    mod signup {
        use super::*;

        fn request(nickname: &str) -> SignupRequest {
            SignupRequest {
                name: "Nick".to_string(),
                nickname: nickname.to_string(),
                email: "nick@example.com".to_string(),
                password: "hunter2hunter2".to_string(),
            }
        }

        #[test_log::test(tokio::test)]
        async fn test_success() {
            let endpoint = serve(Router::new().route("/graphql", post(graphql))).await;

            let result = Client::new(endpoint)
                .signup(&reqwest::Client::new(), &request("new_nick"))
                .await
                .unwrap();

            assert_eq!(result, AuthResult::success());
        }

        #[test_log::test(tokio::test)]
        async fn test_taken() {
            let endpoint = serve(Router::new().route("/graphql", post(graphql))).await;

            let result = Client::new(endpoint)
                .signup(&reqwest::Client::new(), &request("nick"))
                .await
                .unwrap();

            assert_eq!(result, AuthResult::failure("nickname taken"));
        }
    }

    mod errors {
        use super::*;

        #[test_log::test(tokio::test)]
        async fn test_graphql_errors_without_data() {
            let endpoint = serve(Router::new().route(
                "/graphql",
                post(|| async { Json(json!({ "errors": [{ "message": "boom" }] })) }),
            ))
            .await;

            let err = Client::new(endpoint)
                .login(&reqwest::Client::new(), &credentials("nick", "pw"))
                .await
                .unwrap_err();

            assert!(matches!(err, Error::GraphQl(ref message) if message == "boom"));
        }

        #[test_log::test(tokio::test)]
        async fn test_client_error_uses_first_message() {
            let endpoint = serve(Router::new().route(
                "/graphql",
                post(|| async {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "errors": [{ "message": "Variable \"$email\" is required" }] })),
                    )
                        .into_response()
                }),
            ))
            .await;

            let err = Client::new(endpoint)
                .login(&reqwest::Client::new(), &credentials("nick", "pw"))
                .await
                .unwrap_err();

            assert!(
                matches!(err, Error::Client(ref message) if message == "Variable \"$email\" is required")
            );
        }

        #[test_log::test(tokio::test)]
        async fn test_client_error_without_body() {
            let endpoint = serve(Router::new().route(
                "/graphql",
                post(|| async { StatusCode::NOT_FOUND }),
            ))
            .await;

            let err = Client::new(endpoint)
                .login(&reqwest::Client::new(), &credentials("nick", "pw"))
                .await
                .unwrap_err();

            assert!(matches!(err, Error::Client(ref message) if message == "404 Not Found"));
        }

        #[test_log::test(tokio::test)]
        async fn test_server_error() {
            let endpoint = serve(Router::new().route(
                "/graphql",
                post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            ))
            .await;

            let err = Client::new(endpoint)
                .login(&reqwest::Client::new(), &credentials("nick", "pw"))
                .await
                .unwrap_err();

            assert!(matches!(err, Error::Server));
        }

        #[test_log::test(tokio::test)]
        async fn test_bad_endpoint() {
            let err = Client::new("not a url".to_string())
                .login(&reqwest::Client::new(), &credentials("nick", "pw"))
                .await
                .unwrap_err();

            assert!(matches!(err, Error::UrlParse(_)));
        }
    }
}
