pub mod form;
pub mod message;
pub mod profile;
pub use form::empty_as_none;
pub use message::Message;
pub use profile::*;

use utoipa::OpenApi;

use crate::models::User;

#[derive(OpenApi)]
#[openapi(components(schemas(Message, Profile, ProfileUpdate, User)))]
/// Captures OpenAPI schemas defined in the DTO module
pub struct OpenApiSchemas;
