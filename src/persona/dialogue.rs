use super::{required, Persona, Prompt};
use crate::web::models::{DialogueRequest, DialogueResponse};

const SYSTEM_PROMPT: &str = "你是北宋文豪苏轼，字子瞻，号东坡居士。\n\
                             性格豁达、通透、有文人风骨。\n\
                             请用偏文言但现代人可读的方式回答。\n\
                             字数 100~150 字。";

/// Su Shi answering questions across time.
pub struct Dialogue;

impl Persona for Dialogue {
    const NAME: &'static str = "sushi";
    const MISSING_INPUT: &'static str = "缺少问题参数";
    const EMPTY_FALLBACK: &'static str = "风雨太大，东坡暂未回应。";
    const FAILURE_FALLBACK: &'static str = "风雨太大，东坡暂未回应。";

    type Request = DialogueRequest;
    type Reply = DialogueResponse;

    fn prompt(request: &DialogueRequest) -> Option<Prompt> {
        let question = required(&request.question)?;
        Some(Prompt {
            system: SYSTEM_PROMPT.to_string(),
            user: question.to_string(),
        })
    }

    fn reply(answer: String) -> DialogueResponse {
        DialogueResponse { answer }
    }
}
