//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    DEFAULT_LIST_LIMIT, ListQuery, TaskDetails, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, TaskPage, TaskSubmission,
};
