use super::assertions::{
    StepError, expect_msg, expect_status, expect_story_id, read_api_response,
};
use crate::domain::StoryDto;
use crate::story_client::StoryClient;
use reqwest::StatusCode;

pub const MSG_CREATED: &str = "Successfully created!";
pub const MSG_EDITED: &str = "Successfully edited";
pub const MSG_DELETED: &str = "Deleted successfully!";
pub const MSG_NO_SPOILERS: &str = "No spoilers...";
pub const MSG_UNABLE_TO_DELETE: &str = "Unable to delete this story spoiler!";

/// Well-formed id that does not belong to any story
pub const UNKNOWN_STORY_ID: &str = "112222333355";
/// Id the API cannot resolve to a story
pub const MALFORMED_STORY_ID: &str = "XXXXXXXXX";

/// Name of the only value steps hand to each other.
pub const STORY_ID: &str = "story_id";

pub fn new_story() -> StoryDto {
    StoryDto::new("New Test Title", "Some Description").with_url("")
}

pub fn edited_story() -> StoryDto {
    StoryDto::new("Edited Test Title", "Test Description with edited title")
}

pub fn story_without_title() -> StoryDto {
    new_story().without_title()
}

/// State threaded through the steps of one run.
#[derive(Debug, Clone, Default)]
pub struct ScenarioContext {
    pub story_id: Option<String>,
}

impl ScenarioContext {
    fn story_id(&self) -> Result<&str, StepError> {
        self.story_id
            .as_deref()
            .ok_or(StepError::MissingDependency(STORY_ID))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CreateStory,
    EditStory,
    DeleteStory,
    CreateStoryWithoutTitle,
    EditUnknownStory,
    DeleteUnknownStory,
}

impl Step {
    /// The steps in the order they have to run.
    pub const ORDERED: [Step; 6] = [
        Step::CreateStory,
        Step::EditStory,
        Step::DeleteStory,
        Step::CreateStoryWithoutTitle,
        Step::EditUnknownStory,
        Step::DeleteUnknownStory,
    ];

    pub fn order(self) -> usize {
        match self {
            Step::CreateStory => 1,
            Step::EditStory => 2,
            Step::DeleteStory => 3,
            Step::CreateStoryWithoutTitle => 4,
            Step::EditUnknownStory => 5,
            Step::DeleteUnknownStory => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Step::CreateStory => "create_story_with_correct_data",
            Step::EditStory => "edit_story_with_correct_data",
            Step::DeleteStory => "delete_story_with_correct_data",
            Step::CreateStoryWithoutTitle => "create_story_with_missing_title",
            Step::EditUnknownStory => "edit_story_with_unknown_id",
            Step::DeleteUnknownStory => "delete_story_with_unknown_id",
        }
    }

    /// Context values the step reads.
    pub fn needs(self) -> &'static [&'static str] {
        match self {
            Step::EditStory | Step::DeleteStory => &[STORY_ID],
            _ => &[],
        }
    }

    /// Context values the step writes when it passes.
    pub fn provides(self) -> &'static [&'static str] {
        match self {
            Step::CreateStory => &[STORY_ID],
            _ => &[],
        }
    }

    #[tracing::instrument(name = "Running step", skip_all, fields(step = self.name()))]
    pub async fn run(
        self,
        client: &StoryClient,
        ctx: &mut ScenarioContext,
    ) -> Result<(), StepError> {
        match self {
            Step::CreateStory => {
                let response = client.create_story(&new_story()).await?;
                expect_status(&response, StatusCode::CREATED)?;
                let body = read_api_response(response).await?;
                expect_msg(&body, MSG_CREATED)?;
                let story_id = expect_story_id(&body)?;
                tracing::info!(%story_id, "Captured story id");
                ctx.story_id = Some(story_id);
            }
            Step::EditStory => {
                let story_id = ctx.story_id()?;
                let response = client.edit_story(story_id, &edited_story()).await?;
                expect_status(&response, StatusCode::OK)?;
                let body = read_api_response(response).await?;
                expect_msg(&body, MSG_EDITED)?;
            }
            Step::DeleteStory => {
                let story_id = ctx.story_id()?;
                let response = client.delete_story(story_id).await?;
                expect_status(&response, StatusCode::OK)?;
                let body = read_api_response(response).await?;
                expect_msg(&body, MSG_DELETED)?;
            }
            Step::CreateStoryWithoutTitle => {
                let response = client.create_story(&story_without_title()).await?;
                expect_status(&response, StatusCode::BAD_REQUEST)?;
            }
            Step::EditUnknownStory => {
                let response = client.edit_story(UNKNOWN_STORY_ID, &edited_story()).await?;
                expect_status(&response, StatusCode::NOT_FOUND)?;
                let body = read_api_response(response).await?;
                expect_msg(&body, MSG_NO_SPOILERS)?;
            }
            Step::DeleteUnknownStory => {
                let response = client.delete_story(MALFORMED_STORY_ID).await?;
                expect_status(&response, StatusCode::BAD_REQUEST)?;
                let body = read_api_response(response).await?;
                expect_msg(&body, MSG_UNABLE_TO_DELETE)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.order(), self.name())
    }
}
