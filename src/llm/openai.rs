use crate::*;
use anyhow::Context;

#[derive(Debug, serde::Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, serde::Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, serde::Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(Debug, serde::Deserialize)]
struct Choice {
    message: Completion,
}

#[derive(Debug, serde::Deserialize)]
struct Completion {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAi {
    http: reqwest::Client,
    endpoint: String,
    key: String,
    model: String,
}

impl OpenAi {
    pub fn new(key: &str, base: &str, model: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(LLM_TIMEOUT)
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", base.trim_end_matches('/')),
            key: key.to_string(),
            model: model.to_string(),
        })
    }
    /// Reads `OPENAI_API_KEY`, `OPENAI_BASE_URL` and `CHATGAME_MODEL`.
    pub fn from_env() -> anyhow::Result<Self> {
        let key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set; pass --offline to play without a model")?;
        let base = std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| String::from(DEFAULT_BASE_URL));
        let model = std::env::var("CHATGAME_MODEL").unwrap_or_else(|_| String::from(DEFAULT_MODEL));
        Self::new(&key, &base, &model)
    }
    pub fn model(&self) -> &str {
        &self.model
    }
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
    fn request<'a>(&'a self, prompt: &'a Prompt) -> Request<'a> {
        Request {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: &prompt.system,
                },
                Message {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: LLM_TEMPERATURE,
            max_tokens: LLM_MAX_TOKENS,
        }
    }
}

#[async_trait::async_trait]
impl Oracle for OpenAi {
    async fn ask(&self, prompt: &Prompt) -> anyhow::Result<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.key)
            .json(&self.request(prompt))
            .send()
            .await
            .with_context(|| format!("send completion request to {}", self.endpoint))?
            .error_for_status()
            .context("completion request rejected")?
            .json::<Response>()
            .await
            .context("decode completion response")?;
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context("completion has no content")?;
        log::debug!("{} replied {:?}", self.model, content);
        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body() {
        let client = OpenAi::new("key", "https://example.com/v1/", DEFAULT_MODEL).unwrap();
        assert_eq!(client.endpoint(), "https://example.com/v1/chat/completions");
        let prompt = Prompt {
            system: String::from("You are a strategic meeting assistant."),
            user: String::from("History:"),
        };
        let body = serde_json::to_value(client.request(&prompt)).unwrap();
        assert_eq!(body["model"], "gpt-4.1-nano");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "History:");
        assert_eq!(body["max_tokens"], 512);
    }

    #[test]
    fn response_body() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":" Proposed-Date: Mon \n"}}]}"#;
        let response = serde_json::from_str::<Response>(json).unwrap();
        assert_eq!(response.choices[0].message.content.as_deref(), Some(" Proposed-Date: Mon \n"));
    }
}
