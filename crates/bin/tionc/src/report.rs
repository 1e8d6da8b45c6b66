//! JSON report of one document run.

use std::error::Error;

use serde::Serialize;
use tion_app::flags::FeatureFlags;
use tion_app::graph::ObjectGraph;
use tion_domain::error::CompileError;

/// Outcome of one device block.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BlockReport {
    Compiled { graph: Box<ObjectGraph> },
    Valid,
    Failed {
        error: String,
        /// Configuration path of the offending value, for schema errors.
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },
}

impl BlockReport {
    /// Report a block that was only validated.
    #[must_use]
    pub fn validated<T>(result: Result<T, CompileError>) -> Self {
        match result {
            Ok(_) => Self::Valid,
            Err(err) => Self::failed(&err),
        }
    }

    fn failed(err: &CompileError) -> Self {
        let path = match err {
            CompileError::Schema(err) => Some(err.path.to_string()),
            CompileError::Config(_) => None,
        };
        Self::Failed {
            error: render(err),
            path,
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl From<Result<ObjectGraph, CompileError>> for BlockReport {
    fn from(result: Result<ObjectGraph, CompileError>) -> Self {
        match result {
            Ok(graph) => Self::Compiled {
                graph: Box::new(graph),
            },
            Err(err) => Self::failed(&err),
        }
    }
}

/// Every block of a document plus the flags the build needs.
#[derive(Debug, Serialize)]
pub struct Report {
    pub blocks: Vec<BlockReport>,
    /// Union of the flags of every compiled block.
    pub flags: FeatureFlags,
    pub build_flags: Vec<String>,
}

impl Report {
    #[must_use]
    pub fn new(blocks: Vec<BlockReport>) -> Self {
        let mut flags = FeatureFlags::default();
        for block in &blocks {
            if let BlockReport::Compiled { graph } = block {
                flags.merge(&graph.flags);
            }
        }
        let build_flags = flags.build_flags();
        Self {
            blocks,
            flags,
            build_flags,
        }
    }

    /// Number of blocks that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.blocks.iter().filter(|block| block.is_failed()).count()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Error message followed by its causes.
fn render(err: &dyn Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
