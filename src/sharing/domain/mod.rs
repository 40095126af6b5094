//! Domain model for sharing completed tasks and deriving templates.

mod error;
mod grant;
mod template;

pub use crate::task::domain::{ShareSettings, ShareToken};
pub use error::SharingDomainError;
pub use grant::{ShareGrant, ShareResponse};
pub use template::{NewTemplateParams, Template, TemplateId, TemplateName};
