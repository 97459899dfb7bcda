mod api_response;
mod credentials;
mod story;

pub use api_response::ApiResponseDto;
pub use credentials::Credentials;
pub use story::StoryDto;
