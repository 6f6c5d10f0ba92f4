use super::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// What we POST to the GraphQL endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request<'a, V> {
    /// Name of the operation in `query` to run
    pub operation_name: &'static str,

    /// The GraphQL document
    pub query: &'static str,

    /// Values for the operation's `$variables`
    pub variables: &'a V,
}

/// What the endpoint sends back. Under GraphQL over HTTP either field may be
/// missing, but at least one should be present.
#[derive(Debug, Deserialize)]
pub struct Response<T> {
    pub data: Option<T>,

    #[serde(default)]
    pub errors: Vec<ErrorMessage>,
}

/// A single entry in a response's `errors`. We only care about the message.
#[derive(Debug, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl<T> Response<T> {
    /// Pull the data out of the envelope. If the server sent both data and
    /// errors we keep the data and log the errors.
    ///
    /// ## Errors
    ///
    /// - `Error::GraphQl` if there are errors and no data
    /// - `Error::MissingData` if there's nothing at all
    pub fn into_result(self) -> Result<T> {
        match self.data {
            Some(data) => {
                if !self.errors.is_empty() {
                    tracing::warn!(errors = ?self.errors, "partial GraphQL response");
                }

                Ok(data)
            }
            None if self.errors.is_empty() => Err(Error::MissingData),
            None => Err(Error::GraphQl(self.joined_errors())),
        }
    }

    /// All the error messages as one line
    fn joined_errors(&self) -> String {
        self.errors
            .iter()
            .map(|err| err.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_camel_case() {
        let req = Request {
            operation_name: "login",
            query: "mutation login { login }",
            variables: &json!({ "nickname": "nick" }),
        };

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "operationName": "login",
                "query": "mutation login { login }",
                "variables": { "nickname": "nick" },
            })
        );
    }

    #[test]
    fn errors_without_data_are_joined() {
        let resp: Response<serde_json::Value> = serde_json::from_value(json!({
            "errors": [{ "message": "one" }, { "message": "two", "path": ["login"] }],
        }))
        .unwrap();

        match resp.into_result() {
            Err(Error::GraphQl(message)) => assert_eq!(message, "one; two"),
            other => panic!("expected a GraphQL error, got {other:?}"),
        }
    }

    #[test]
    fn data_wins_over_errors() {
        let resp: Response<u8> = serde_json::from_value(json!({
            "data": 1,
            "errors": [{ "message": "ignored" }],
        }))
        .unwrap();

        assert_eq!(resp.into_result().unwrap(), 1);
    }

    #[test]
    fn empty_envelope_is_missing_data() {
        let resp: Response<u8> = serde_json::from_value(json!({})).unwrap();

        assert!(matches!(resp.into_result(), Err(Error::MissingData)));
    }
}
