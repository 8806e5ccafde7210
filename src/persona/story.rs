use super::{required, Persona, Prompt};
use crate::web::models::{StoryRequest, StoryResponse};

/// A mythical beast narrating a classical poem to children.
pub struct Story;

impl Persona for Story {
    const NAME: &'static str = "kids/story";
    const MISSING_INPUT: &'static str = "缺少参数";
    const EMPTY_FALLBACK: &'static str = "神兽今天有点害羞，一会再来讲。";
    const FAILURE_FALLBACK: &'static str = "神兽走进云雾里了，一会儿再来吧。";

    type Request = StoryRequest;
    type Reply = StoryResponse;

    fn prompt(request: &StoryRequest) -> Option<Prompt> {
        let beast = required(&request.beast)?;
        let title = required(&request.poem_title)?;
        let poet = required(&request.poet)?;
        let text = required(&request.poem_text)?;

        let system = format!(
            "你是一位中国传统神兽，名字是【{beast}】。\n\
             听众是 6-10 岁的孩子。\n\
             讲故事要求：\n\
             1. 温柔、简单、有画面感\n\
             2. 用“我带你看……”讲诗\n\
             3. 讲成一个完整的小故事\n\
             4. 字数 120~180 字"
        );
        let user = format!(
            "这首诗是《{title}》，作者是{poet}：\n\n{text}\n\n请你作为{beast}讲一个诗里的故事。"
        );

        Some(Prompt { system, user })
    }

    fn reply(story: String) -> StoryResponse {
        StoryResponse { story }
    }
}
