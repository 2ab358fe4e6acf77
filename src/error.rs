use std::path::PathBuf;

use thiserror::Error;

/// Rejected edits to the plan. None of these change any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("{what} limit of {limit} reached")]
    CapacityExceeded { what: &'static str, limit: usize },
    #[error("Selected room already exists.")]
    RoomExists { x: i32, y: i32 },
    #[error("No room under the cursor to delete!")]
    RoomNotFound { x: i32, y: i32 },
    #[error("No thing is selected.")]
    NoSelection,
    #[error("thing {index} does not exist")]
    ThingNotFound { index: usize },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal startup failures.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("framebuffer surface: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),
}
