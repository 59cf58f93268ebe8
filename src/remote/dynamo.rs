//! DynamoDB game-state table over the JSON 1.0 protocol
//!
//! Record shape: `{userId: S, gameState: S, timestamp: N}` with `userId` as
//! the partition key.

use std::rc::Rc;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, Request, Response, Url};
use serde_json::{Value, json};

use super::sigv4::{self, SigningParams};
use super::{RemoteError, RemoteStore, Transport};
use crate::config::{AwsConfig, ConfigError, TABLE_NAME};
use crate::platform::now_ms;

const SERVICE: &str = "dynamodb";
const TARGET_PREFIX: &str = "DynamoDB_20120810";
const JSON_1_0: &str = "application/x-amz-json-1.0";

/// Game-state store backed by a DynamoDB table
pub struct DynamoDbStore {
    transport: Rc<dyn Transport>,
    config: AwsConfig,
    endpoint: Url,
    clock: fn() -> f64,
}

impl DynamoDbStore {
    /// Fails when the configuration cannot address an endpoint
    pub fn new(transport: Rc<dyn Transport>, config: AwsConfig) -> Result<Self, ConfigError> {
        let endpoint = config.dynamodb_endpoint()?;
        Ok(Self {
            transport,
            config,
            endpoint,
            clock: now_ms,
        })
    }

    /// Override the wall clock (signing date and record timestamp)
    pub fn with_clock(mut self, clock: fn() -> f64) -> Self {
        self.clock = clock;
        self
    }

    /// Sign and send one API call, returning the decoded JSON body
    async fn call(&self, operation: &str, payload: Value) -> Result<Value, RemoteError> {
        if self.config.credentials.is_empty() {
            return Err(RemoteError::MissingCredentials);
        }

        let body = serde_json::to_vec(&payload).map_err(|e| RemoteError::Malformed(e.to_string()))?;
        let target = HeaderValue::from_str(&format!("{}.{}", TARGET_PREFIX, operation))
            .map_err(|e| RemoteError::Signing(e.to_string()))?;

        let mut request = Request::new(Method::POST, self.endpoint.clone());
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_1_0));
        request.headers_mut().insert("x-amz-target", target);
        *request.body_mut() = Some(body.into());
        sigv4::sign(
            &mut request,
            &SigningParams {
                credentials: &self.config.credentials,
                region: &self.config.region,
                service: SERVICE,
                timestamp_ms: (self.clock)(),
            },
        )?;

        let response = self.transport.execute(request).await?;
        decode_response(operation, response).await
    }
}

/// Attribute-value record written by `PutItem`
pub fn state_item(user_id: &str, payload: &str, timestamp_ms: f64) -> Value {
    json!({
        "userId": { "S": user_id },
        "gameState": { "S": payload },
        "timestamp": { "N": format!("{}", timestamp_ms.floor() as i64) },
    })
}

async fn decode_response(operation: &str, response: Response) -> Result<Value, RemoteError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| RemoteError::Network(e.to_string()))?;
    if !status.is_success() {
        return Err(classify_error(status.as_u16(), &text));
    }
    if text.trim().is_empty() {
        return Ok(json!({}));
    }
    serde_json::from_str(&text)
        .map_err(|e| RemoteError::Malformed(format!("{} response: {}", operation, e)))
}

/// Map an error body like `{"__type":"...#ThrottlingException","message":"..."}`
fn classify_error(status: u16, body: &str) -> RemoteError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let kind = parsed
        .as_ref()
        .and_then(|v| v.get("__type"))
        .and_then(Value::as_str)
        .map(|t| t.rsplit('#').next().unwrap_or(t).to_string())
        .unwrap_or_default();
    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message").or_else(|| v.get("Message")))
        .and_then(Value::as_str)
        .unwrap_or(body)
        .to_string();

    match kind.as_str() {
        "ThrottlingException" | "ProvisionedThroughputExceededException" | "RequestLimitExceeded" => {
            RemoteError::Throttled(message)
        }
        "" => RemoteError::Http { status, message },
        _ => RemoteError::Http {
            status,
            message: format!("{}: {}", kind, message),
        },
    }
}

#[async_trait(?Send)]
impl RemoteStore for DynamoDbStore {
    async fn put_state(&self, user_id: &str, payload: &str) -> Result<(), RemoteError> {
        let request = json!({
            "TableName": TABLE_NAME,
            "Item": state_item(user_id, payload, (self.clock)()),
        });
        self.call("PutItem", request).await?;
        log::debug!("Saved game state for {} to {}", user_id, TABLE_NAME);
        Ok(())
    }

    async fn get_state(&self, user_id: &str) -> Result<Option<String>, RemoteError> {
        let request = json!({
            "TableName": TABLE_NAME,
            "Key": { "userId": { "S": user_id } },
        });
        let response = self.call("GetItem", request).await?;

        let Some(item) = response.get("Item") else {
            return Ok(None);
        };
        item.get("gameState")
            .and_then(|attr| attr.get("S"))
            .and_then(Value::as_str)
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| RemoteError::Malformed("record has no gameState string".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::testing::ScriptedTransport;
    use futures::executor::block_on;

    fn fixed_clock() -> f64 {
        1_700_000_000_123.0
    }

    fn store(transport: &Rc<ScriptedTransport>) -> DynamoDbStore {
        let config = AwsConfig::from_values(Some("eu-west-1"), Some("AKID"), Some("secret"));
        DynamoDbStore::new(transport.clone(), config)
            .unwrap()
            .with_clock(fixed_clock)
    }

    fn sent_json(transport: &ScriptedTransport, index: usize) -> Value {
        serde_json::from_slice(&transport.requests.borrow()[index].body).unwrap()
    }

    #[test]
    fn test_invalid_region_rejected_at_construction() {
        let transport = Rc::new(ScriptedTransport::new());
        let config = AwsConfig::from_values(Some("Mars Base"), Some("a"), Some("b"));
        assert!(DynamoDbStore::new(transport, config).is_err());
    }

    #[test]
    fn test_put_item_request() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, "{}");
        block_on(store(&transport).put_state("current-user", r#"{"units":[]}"#)).unwrap();

        let requests = transport.requests.borrow();
        let req = &requests[0];
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.url.as_str(), "https://dynamodb.eu-west-1.amazonaws.com/");
        assert_eq!(req.header("x-amz-target"), Some("DynamoDB_20120810.PutItem"));
        assert_eq!(req.header("content-type"), Some("application/x-amz-json-1.0"));
        assert!(req.header("authorization").is_some());
        drop(requests);

        let body = sent_json(&transport, 0);
        assert_eq!(body["TableName"], "NeonGenesisGameState");
        assert_eq!(body["Item"]["userId"]["S"], "current-user");
        assert_eq!(body["Item"]["gameState"]["S"], r#"{"units":[]}"#);
        assert_eq!(body["Item"]["timestamp"]["N"], "1700000000123");
    }

    #[test]
    fn test_get_item_found() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(
            200,
            r#"{"Item":{"userId":{"S":"u"},"gameState":{"S":"{\"quests\":[]}"},"timestamp":{"N":"1"}}}"#,
        );
        let payload = block_on(store(&transport).get_state("u")).unwrap();
        assert_eq!(payload.as_deref(), Some(r#"{"quests":[]}"#));
        assert_eq!(sent_json(&transport, 0)["Key"]["userId"]["S"], "u");
    }

    #[test]
    fn test_get_item_missing_record() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, "{}");
        assert_eq!(block_on(store(&transport).get_state("nobody")).unwrap(), None);
    }

    #[test]
    fn test_get_item_without_payload_is_malformed() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, r#"{"Item":{"userId":{"S":"u"}}}"#);
        let err = block_on(store(&transport).get_state("u")).unwrap_err();
        assert!(matches!(err, RemoteError::Malformed(_)));
    }

    #[test]
    fn test_throttling_is_classified() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(
            400,
            r#"{"__type":"com.amazonaws.dynamodb.v20120810#ProvisionedThroughputExceededException","message":"slow down"}"#,
        );
        let err = block_on(store(&transport).put_state("u", "{}")).unwrap_err();
        assert!(matches!(err, RemoteError::Throttled(ref m) if m == "slow down"));
    }

    #[test]
    fn test_other_errors_keep_status() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(
            400,
            r#"{"__type":"com.amazon.coral.service#UnrecognizedClientException","message":"bad token"}"#,
        );
        let err = block_on(store(&transport).get_state("u")).unwrap_err();
        match err {
            RemoteError::Http { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "UnrecognizedClientException: bad token");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_garbage_success_body_is_malformed() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, "<html>captive portal</html>");
        let err = block_on(store(&transport).get_state("u")).unwrap_err();
        assert!(matches!(err, RemoteError::Malformed(_)));
    }

    #[test]
    fn test_missing_credentials_skip_network() {
        let transport = Rc::new(ScriptedTransport::new());
        let store = DynamoDbStore::new(transport.clone(), AwsConfig::default()).unwrap();
        let err = block_on(store.put_state("u", "{}")).unwrap_err();
        assert!(matches!(err, RemoteError::MissingCredentials));
        assert_eq!(transport.request_count(), 0);
    }
}
