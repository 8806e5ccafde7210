//! Persona pipeline: validate the request, build the prompt pair, call the
//! upstream once and map the outcome onto the persona's reply body.

mod continuation;
mod dialogue;
mod story;

pub use continuation::Continuation;
pub use dialogue::Dialogue;
pub use story::Story;

use actix_web::HttpResponse;
use log::{debug, error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::model::ChatCompletion;
use crate::web::models::Message;

pub const DEFAULT_TEMPERATURE: f32 = 0.8;

/// System instructions plus the user turn sent for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn into_messages(self) -> Vec<Message> {
        vec![Message::system(self.system), Message::user(self.user)]
    }
}

pub trait Persona {
    /// Used in operator log lines.
    const NAME: &'static str;
    /// Shown when a required field is missing.
    const MISSING_INPUT: &'static str;
    /// Shown when the upstream answered without usable content.
    const EMPTY_FALLBACK: &'static str;
    /// Shown when the upstream call failed.
    const FAILURE_FALLBACK: &'static str;
    const TEMPERATURE: f32 = DEFAULT_TEMPERATURE;
    const MAX_TOKENS: Option<u32> = None;

    type Request: DeserializeOwned + Default;
    type Reply: Serialize;

    /// Returns `None` when a required field is absent or blank.
    fn prompt(request: &Self::Request) -> Option<Prompt>;

    fn reply(text: String) -> Self::Reply;
}

/// Returns the field's trimmed value if it carries any text.
pub(crate) fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Bodies that are missing, not JSON or wrongly typed are read as an empty request.
pub fn parse_request<P: Persona>(body: &[u8]) -> P::Request {
    serde_json::from_slice(body).unwrap_or_default()
}

pub async fn respond<P: Persona>(client: &dyn ChatCompletion, body: &[u8]) -> HttpResponse {
    let request = parse_request::<P>(body);

    let prompt = match P::prompt(&request) {
        Some(prompt) => prompt,
        None => {
            info!("{}: rejected request with missing fields", P::NAME);
            return HttpResponse::BadRequest().json(P::reply(P::MISSING_INPUT.to_string()));
        }
    };

    let request_id = Uuid::new_v4();
    debug!("{} [{}] prompt: {:?}", P::NAME, request_id, prompt);

    match client
        .call(prompt.into_messages(), P::TEMPERATURE, P::MAX_TOKENS)
        .await
    {
        Ok(response) => {
            let text = response
                .first_content()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(String::from)
                .unwrap_or_else(|| {
                    info!("{} [{}] upstream returned no content", P::NAME, request_id);
                    P::EMPTY_FALLBACK.to_string()
                });
            HttpResponse::Ok().json(P::reply(text))
        }
        Err(e) => {
            error!("{} [{}] upstream call failed: {}", P::NAME, request_id, e);
            HttpResponse::InternalServerError().json(P::reply(P::FAILURE_FALLBACK.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fake::FakeCompletion;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn required_rejects_blank_values() {
        assert_eq!(required(&None), None);
        assert_eq!(required(&Some("".to_string())), None);
        assert_eq!(required(&Some("  \n".to_string())), None);
        assert_eq!(required(&Some(" 窗前明月光 ".to_string())), Some("窗前明月光"));
    }

    #[test]
    fn malformed_body_reads_as_empty_request() {
        let request = parse_request::<Dialogue>(b"not json");
        assert!(request.question.is_none());
        let request = parse_request::<Dialogue>(br#"{"question": 42}"#);
        assert!(request.question.is_none());
        let request = parse_request::<Dialogue>(b"");
        assert!(request.question.is_none());
    }

    #[actix_web::test]
    async fn missing_field_never_reaches_upstream() {
        let fake = FakeCompletion::replying("unused");
        let response = respond::<Story>(
            &fake,
            r#"{"beast":"麒麟","poemTitle":"静夜思","poet":"李白"}"#.as_bytes(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["story"], "缺少参数");
        assert!(fake.calls().is_empty());
    }

    #[actix_web::test]
    async fn generated_text_is_trimmed() {
        let fake = FakeCompletion::replying("\n  把酒问青天  \n");
        let response = respond::<Dialogue>(&fake, "{\"question\":\"明月几时有？\"}".as_bytes()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["answer"], "把酒问青天");
    }

    #[actix_web::test]
    async fn whitespace_content_uses_empty_fallback() {
        let fake = FakeCompletion::replying("   ");
        let response = respond::<Continuation>(&fake, "{\"firstLine\":\"窗前明月光\"}".as_bytes()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["continuation"], Continuation::EMPTY_FALLBACK);
    }

    #[actix_web::test]
    async fn failure_uses_failure_fallback() {
        let fake = FakeCompletion::failing();
        let body = "{\"beast\":\"麒麟\",\"poemTitle\":\"静夜思\",\"poet\":\"李白\",\"poemText\":\"床前明月光\"}";
        let response = respond::<Story>(&fake, body.as_bytes()).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["story"], Story::FAILURE_FALLBACK);
        assert_eq!(fake.calls().len(), 1);
    }
}
