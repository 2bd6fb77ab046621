use serde::Deserialize;
use serde_json::json;

use super::error::GenerationError;
use crate::{
    domain::generation::ImagePayload,
    infra::{config::ImageGenerationConfig, secrets::redact_text},
};

const PROMPT_PLACEHOLDER: &str = "{prompt}";
const DEFAULT_MIME_TYPE: &str = "image/png";

/// REST client for the Imagen `:predict` endpoint.
#[derive(Debug, Clone)]
pub struct ImagenClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    prompt_template: String,
}

impl ImagenClient {
    /// Resolves the API key from the configured environment variable.
    pub fn from_env(
        config: &ImageGenerationConfig,
        http: reqwest::Client,
    ) -> Result<Self, GenerationError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| GenerationError::MissingCredential {
                env_var: config.api_key_env.clone(),
            })?;

        Ok(Self::with_api_key(config, http, api_key))
    }

    pub fn with_api_key(
        config: &ImageGenerationConfig,
        http: reqwest::Client,
        api_key: String,
    ) -> Self {
        Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_owned(),
            model: config.model.clone(),
            api_key,
            prompt_template: config.prompt_template.clone(),
        }
    }

    pub fn predict_url(&self) -> String {
        format!("{}/models/{}:predict", self.endpoint, self.model)
    }

    pub async fn generate(&self, prompt: &str) -> Result<ImagePayload, GenerationError> {
        let body = request_body(&render_prompt(&self.prompt_template, prompt));

        let response = self
            .http
            .post(self.predict_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|error| GenerationError::Transport(redact_text(&error.to_string())))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|error| GenerationError::Transport(redact_text(&error.to_string())))?;

        let result = parse_predict_response(status, &text);
        if let Err(error) = &result {
            tracing::warn!(
                code = error.code(),
                status,
                error = %redact_text(&error.to_string()),
                "image generation failed"
            );
        }
        result
    }
}

pub fn render_prompt(template: &str, prompt: &str) -> String {
    let prompt = prompt.trim();
    if template.contains(PROMPT_PLACEHOLDER) {
        template.replace(PROMPT_PLACEHOLDER, prompt)
    } else {
        format!("{template} {prompt}")
    }
}

fn request_body(prompt: &str) -> serde_json::Value {
    json!({
        "instances": [{ "prompt": prompt }],
        "parameters": {
            "sampleCount": 1,
            "aspectRatio": "1:1",
            "outputMimeType": DEFAULT_MIME_TYPE,
        }
    })
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Maps an HTTP status and body to the first generated image.
pub fn parse_predict_response(status: u16, body: &str) -> Result<ImagePayload, GenerationError> {
    if !(200..300).contains(&status) {
        let message = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) if envelope.error.status.is_empty() => envelope.error.message,
            Ok(envelope) => format!("{}: {}", envelope.error.status, envelope.error.message),
            Err(_) => body.trim().to_owned(),
        };
        return Err(GenerationError::Upstream { status, message });
    }

    let response: PredictResponse = serde_json::from_str(body)
        .map_err(|error| GenerationError::MalformedResponse(error.to_string()))?;

    response
        .predictions
        .into_iter()
        .find_map(|prediction| {
            let data = prediction.bytes_base64_encoded.filter(|data| !data.is_empty())?;
            let mime_type = prediction
                .mime_type
                .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_owned());
            Some(ImagePayload::new(mime_type, data))
        })
        .ok_or(GenerationError::NoImages)
}
