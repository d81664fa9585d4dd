//! Language-model collaborators backed by the OpenAI chat completions API.
//!
//! Both calls force a single function call whose JSON-schema parameters
//! constrain the model's answer, then deserialize the call's arguments.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::OpenAiConfig;
use crate::domain::cart::CategoryPrediction;
use crate::domain::errors::DomainError;
use crate::domain::ports::{CategoryClassifier, WeightExtractor};
use crate::domain::shipping::CategoryLabel;
use crate::domain::weight::{WeightSpec, WeightUnit};

const CATEGORY_FUNCTION: &str = "fn_get_prediction_category";
const WEIGHT_FUNCTION: &str = "fn_extract_weight";

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    arguments: String,
}

fn category_function() -> Value {
    let labels: Vec<&str> = CategoryLabel::ALL.iter().map(|l| l.as_str()).collect();
    json!({
        "name": CATEGORY_FUNCTION,
        "description": "Predict the correct category given the input text in Spanish or English. \
                        Map to standard shipping categories.",
        "parameters": {
            "type": "object",
            "properties": {
                "prediction": {
                    "type": "string",
                    "description": "The predicted product category.",
                    "enum": labels,
                }
            },
            "required": ["prediction"],
        }
    })
}

fn weight_function() -> Value {
    json!({
        "name": WEIGHT_FUNCTION,
        "description": "Extract weight value and unit from product dimensions if present",
        "parameters": {
            "type": "object",
            "properties": {
                "weight_value": {
                    "type": "string",
                    "description": "The numeric weight value extracted, or 'no_weight' if not found",
                },
                "weight_unit": {
                    "type": "string",
                    "description": "The weight unit (g, kg, lb, oz) or 'no_unit' if not found",
                    "enum": WeightUnit::LABELS,
                }
            },
            "required": ["weight_value", "weight_unit"],
        }
    })
}

#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send `content` and force a call to `function`, returning its
    /// deserialized arguments.
    async fn call_function<T: DeserializeOwned>(
        &self,
        content: String,
        function: Value,
    ) -> Result<T, DomainError> {
        let name = function["name"].clone();
        let body = json!({
            "model": self.model,
            "temperature": 0,
            "messages": [{ "role": "user", "content": content }],
            "tools": [{ "type": "function", "function": function }],
            "tool_choice": { "type": "function", "function": { "name": name } },
        });

        let completion: ChatCompletion = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| DomainError::Upstream(e.to_string()))?
            .json()
            .await
            .map_err(|e| DomainError::Upstream(e.to_string()))?;

        let call = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.tool_calls.into_iter().next())
            .ok_or_else(|| DomainError::Upstream("completion has no function call".into()))?;

        log::debug!("{} returned {}", call.function.name, call.function.arguments);

        serde_json::from_str(&call.function.arguments)
            .map_err(|e| DomainError::Upstream(format!("bad function arguments: {e}")))
    }
}

#[async_trait]
impl CategoryClassifier for OpenAiClient {
    async fn classify(&self, text: &str) -> CategoryPrediction {
        match self
            .call_function::<CategoryPrediction>(text.to_string(), category_function())
            .await
        {
            Ok(prediction) => prediction,
            Err(e) => {
                log::warn!("Category classification failed: {}", e);
                CategoryPrediction::empty()
            }
        }
    }
}

#[async_trait]
impl WeightExtractor for OpenAiClient {
    async fn extract(&self, specifications: &Value) -> WeightSpec {
        match self
            .call_function::<WeightSpec>(specifications.to_string(), weight_function())
            .await
        {
            Ok(spec) => spec,
            Err(e) => {
                log::warn!("Weight extraction failed: {}", e);
                WeightSpec::missing()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> OpenAiClient {
        OpenAiClient::new(
            &OpenAiConfig {
                api_key: "sk-test".to_string(),
                model: "gpt-4o-mini".to_string(),
                base_url: server.uri(),
            },
            reqwest::Client::new(),
        )
    }

    fn completion(function: &str, arguments: Value) -> Value {
        json!({
            "id": "chatcmpl-1",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": { "name": function, "arguments": arguments.to_string() }
                    }]
                },
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn classify_returns_the_function_prediction() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "tool_choice": { "function": { "name": CATEGORY_FUNCTION } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                CATEGORY_FUNCTION,
                json!({ "prediction": "Electronics" }),
            )))
            .expect(1)
            .mount(&server)
            .await;

        let prediction = client(&server).classify("Electrónicos > Audífonos").await;
        assert_eq!(prediction, CategoryPrediction::new("Electronics"));
    }

    #[tokio::test]
    async fn classify_degrades_to_empty_prediction_on_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let prediction = client(&server).classify("anything").await;
        assert!(prediction.is_empty());
    }

    #[tokio::test]
    async fn classify_degrades_to_empty_prediction_without_tool_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "Books" } }]
            })))
            .mount(&server)
            .await;

        assert!(client(&server).classify("libro").await.is_empty());
    }

    #[tokio::test]
    async fn extract_returns_weight_spec() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                WEIGHT_FUNCTION,
                json!({ "weight_value": "2,5", "weight_unit": "kg" }),
            )))
            .mount(&server)
            .await;

        let spec = client(&server)
            .extract(&json!({ "Peso del producto": "2,5 Kilogramos" }))
            .await;
        assert_eq!(spec, WeightSpec::new("2,5", WeightUnit::Kilograms));
    }

    #[tokio::test]
    async fn extract_accepts_numeric_weight_value() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                WEIGHT_FUNCTION,
                json!({ "weight_value": 2, "weight_unit": "kg" }),
            )))
            .mount(&server)
            .await;

        let spec = client(&server)
            .extract(&json!({ "Peso del producto": "2 Kilogramos" }))
            .await;
        assert_eq!(spec, WeightSpec::new("2", WeightUnit::Kilograms));
        assert!((spec.to_pounds() - 4.40924).abs() < 1e-9);
    }

    #[tokio::test]
    async fn extract_degrades_to_sentinel_on_malformed_arguments() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                WEIGHT_FUNCTION,
                json!({ "weight": 3 }),
            )))
            .mount(&server)
            .await;

        let spec = client(&server).extract(&json!([])).await;
        assert_eq!(spec, WeightSpec::missing());
    }

    #[test]
    fn category_function_enumerates_every_label() {
        let function = category_function();
        let labels = function["parameters"]["properties"]["prediction"]["enum"]
            .as_array()
            .unwrap();
        assert_eq!(labels.len(), 19);
        assert!(labels.contains(&json!("Independent Design items")));
    }
}
