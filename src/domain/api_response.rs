use serde::{Deserialize, Serialize};

/// JSON shape returned by the story endpoints.
///
/// `story_id` is only present on creation. Extra keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponseDto {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(rename = "storyId", default)]
    pub story_id: Option<String>,
}
