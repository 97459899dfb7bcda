//! The ordered create/edit/delete run against the story API.
//!
//! Steps share nothing but the [`ScenarioContext`] handed from one to the
//! next. A failing step is recorded and the run moves on.

mod assertions;
mod report;
mod steps;

pub use assertions::{AssertionFailure, StepError};
pub use report::{StepReport, SuiteReport};
pub use steps::{
    MALFORMED_STORY_ID, MSG_CREATED, MSG_DELETED, MSG_EDITED, MSG_NO_SPOILERS,
    MSG_UNABLE_TO_DELETE, STORY_ID, ScenarioContext, Step, UNKNOWN_STORY_ID, edited_story,
    new_story, story_without_title,
};

use crate::configuration::Settings;
use crate::story_client::{SetupError, StoryClient, build_story_client};

/// Runs every step of [`Step::ORDERED`] once, in order.
pub async fn run_steps(client: &StoryClient, ctx: &mut ScenarioContext) -> SuiteReport {
    let mut report = SuiteReport::default();
    for step in Step::ORDERED {
        tracing::info!(step = %step, "Starting step");
        let outcome = step.run(client, ctx).await;
        match &outcome {
            Ok(()) => tracing::info!(step = %step, "Step passed"),
            Err(e) => tracing::error!(
                step = %step,
                error.cause_chain = ?e,
                error.message = %e,
                "Step failed"
            ),
        }
        report.steps.push(StepReport { step, outcome });
    }
    report
}

/// Authenticates once, then runs the ordered steps with a fresh context.
///
/// A setup failure is returned as is and no step runs.
#[tracing::instrument(name = "Running story suite", skip_all)]
pub async fn run_suite(settings: &Settings) -> Result<SuiteReport, SetupError> {
    let client = build_story_client(settings).await?;
    let mut ctx = ScenarioContext::default();
    Ok(run_steps(&client, &mut ctx).await)
}
