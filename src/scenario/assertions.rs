use crate::domain::ApiResponseDto;
use crate::telemetry::error_chain_fmt;
use reqwest::{Response, StatusCode};

/// A single observed value that did not match what the step expected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("`{field}` mismatch: expected {expected}, but was {actual}")]
pub struct AssertionFailure {
    pub field: &'static str,
    pub expected: String,
    pub actual: String,
}

#[derive(thiserror::Error)]
pub enum StepError {
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),
    #[error("Step needs `{0}`, which no earlier step captured")]
    MissingDependency(&'static str),
    #[error("Response body ({status}) is not the expected JSON shape: {body}")]
    UnexpectedBody {
        status: StatusCode,
        body: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to execute request")]
    Transport(#[from] reqwest::Error),
}

impl std::fmt::Debug for StepError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub fn expect_status(response: &Response, expected: StatusCode) -> Result<(), AssertionFailure> {
    let actual = response.status();
    if actual == expected {
        Ok(())
    } else {
        Err(AssertionFailure {
            field: "status",
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

pub async fn read_api_response(response: Response) -> Result<ApiResponseDto, StepError> {
    let status = response.status();
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|source| StepError::UnexpectedBody {
        status,
        body,
        source,
    })
}

pub fn expect_msg(response: &ApiResponseDto, expected: &str) -> Result<(), AssertionFailure> {
    if response.msg.as_deref() == Some(expected) {
        Ok(())
    } else {
        Err(AssertionFailure {
            field: "msg",
            expected: describe(Some(expected)),
            actual: describe(response.msg.as_deref()),
        })
    }
}

/// Returns the captured story id, failing when it is absent.
pub fn expect_story_id(response: &ApiResponseDto) -> Result<String, AssertionFailure> {
    match response.story_id.as_deref() {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        other => Err(AssertionFailure {
            field: "storyId",
            expected: "a non-empty identifier".into(),
            actual: describe(other),
        }),
    }
}

fn describe(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("{:?}", v),
        None => "nothing".into(),
    }
}
