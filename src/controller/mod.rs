//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and launches API requests.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key and mouse event handling
//! - `search`: Search submission and completion
//! - `indexes`: Index management and statistics refresh

mod input;
mod search;
mod indexes;

use std::sync::Arc;

use crate::model::{ApiError, AppModel, IndexOp, SearchDispatcher, SongApi};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: AppModel,
    pub(crate) api: Arc<dyn SongApi>,
    pub(crate) dispatcher: SearchDispatcher,
}

impl AppController {
    pub fn new(model: AppModel, api: Arc<dyn SongApi>) -> Self {
        Self {
            model,
            dispatcher: SearchDispatcher::new(api.clone()),
            api,
        }
    }

    pub(crate) fn format_index_error(op: IndexOp, error: &ApiError) -> String {
        if error.is_transport() {
            op.transport_error()
        } else if let Some(detail) = error.server_detail() {
            format!("Error: {}", detail)
        } else {
            op.fallback_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fake_api::transport_error;
    use crate::model::{IndexAction, IndexKind};

    #[test]
    fn test_format_index_error() {
        let op = IndexOp::new(IndexAction::Create, IndexKind::FullText);

        let server = ApiError::Server {
            endpoint: "/index/create".into(),
            status: 200,
            detail: Some("Invalid index type. Use 'fts' or 'trgm'".into()),
        };
        assert_eq!(
            AppController::format_index_error(op, &server),
            "Error: Invalid index type. Use 'fts' or 'trgm'"
        );

        let bare = ApiError::Decode {
            endpoint: "/index/create".into(),
            message: "missing field `message`".into(),
        };
        assert_eq!(
            AppController::format_index_error(op, &bare),
            "Error: Failed to create index"
        );

        assert_eq!(
            AppController::format_index_error(op, &transport_error("/index/create")),
            "Error: Failed to create index. Check the log for details."
        );
    }
}
