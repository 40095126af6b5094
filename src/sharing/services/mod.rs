//! Services exposed by the sharing module.

mod share;

pub use share::{
    CreateTemplateRequest, ShareRequest, SharingResult, SharingService, SharingServiceError,
};
