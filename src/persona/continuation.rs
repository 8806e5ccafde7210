use serde_json::Value;

use super::{required, Persona, Prompt};
use crate::web::models::{ContinuationRequest, ContinuationResponse};

pub const DEFAULT_MOOD: &str = "自由";
const UNKNOWN_MOOD_PHRASE: &str = "自然流露";

/// Maps a named mood to the tone phrase woven into the system prompt.
/// Unknown moods are accepted and get a neutral phrase.
pub fn mood_phrase(mood: &str) -> &'static str {
    match mood {
        "孤独" => "带着淡淡的孤寂与思念",
        "漂泊" => "充满行旅的苍凉与不羁",
        "喜悦" => "明快而充满生机",
        "思念" => "柔软而深情的相思",
        "自由" => "豁达洒脱、随心所欲",
        _ => UNKNOWN_MOOD_PHRASE,
    }
}

/// Three more lines completing a quatrain the user started.
pub struct Continuation;

impl Persona for Continuation {
    const NAME: &'static str = "creation/continue";
    const MISSING_INPUT: &'static str = "请先写下你的开头哦～";
    const EMPTY_FALLBACK: &'static str = "云深不知处，\n松风自吹寒。\n一叶梦相关。";
    const FAILURE_FALLBACK: &'static str = "墨汁晕开了，\n古人暂未落笔。\n稍候再试吧。";
    const TEMPERATURE: f32 = 0.9;
    const MAX_TOKENS: Option<u32> = Some(100);

    type Request = ContinuationRequest;
    type Reply = ContinuationResponse;

    fn prompt(request: &ContinuationRequest) -> Option<Prompt> {
        let first_line = required(&request.first_line)?;
        // Only an absent mood takes the default; null or non-string values read as unknown.
        let phrase = match &request.mood {
            None => mood_phrase(DEFAULT_MOOD),
            Some(Value::String(mood)) => mood_phrase(mood.trim()),
            Some(_) => UNKNOWN_MOOD_PHRASE,
        };

        let system = format!(
            "你是古代诗人的灵魂，正在与现代人隔空合写一首新诗。\n\
             用户会给你开头一句，你只需续写三句（共四句成一绝句）。\n\
             要求：\n\
             - 严格遵循近体诗格律（五言或七言统一）\n\
             - 意境与用户开头契合，情绪{}\n\
             - 语言古雅但现代人可读\n\
             - 不要解释，不要加标点说明\n\
             - 只输出三句诗，不要有其他文字",
            phrase
        );
        let user = format!("我的开头是：{}\n请续写三句。", first_line);

        Some(Prompt { system, user })
    }

    fn reply(continuation: String) -> ContinuationResponse {
        ContinuationResponse { continuation }
    }
}
