//! The façade: resolves the request path inside the workspace root, loads the
//! dataset, dispatches to an operation and renders the outcome. Never returns
//! an error — every failure becomes the `Error: <message>` string.

use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::dataset::Dataset;
use crate::error::{EngineError, Result};
use crate::input;
use crate::ops::{self, SortOrder};
use crate::render::{self, Report};
use crate::request::OperationRequest;

/// Lifecycle phase of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolPhase {
    Start,
    End,
}

/// Notification payload delivered to the status callback.
#[derive(Debug, Clone)]
pub struct ToolEvent {
    pub phase: ToolPhase,
    pub operation: &'static str,
    pub request_id: u64,
}

type Notifier = Arc<dyn Fn(&ToolEvent) + Send + Sync>;

/// Emits `tool_start` on construction and `tool_end` on drop, so the end
/// notification fires on every exit path, unwinding included.
struct LifecycleGuard {
    notifier: Option<Notifier>,
    operation: &'static str,
    request_id: u64,
}

impl LifecycleGuard {
    fn enter(notifier: Option<Notifier>, operation: &'static str, request_id: u64) -> Self {
        if let Some(ref notify) = notifier {
            notify(&ToolEvent {
                phase: ToolPhase::Start,
                operation,
                request_id,
            });
        }
        Self {
            notifier,
            operation,
            request_id,
        }
    }
}

impl Drop for LifecycleGuard {
    fn drop(&mut self) {
        if let Some(ref notify) = self.notifier {
            notify(&ToolEvent {
                phase: ToolPhase::End,
                operation: self.operation,
                request_id: self.request_id,
            });
        }
    }
}

/// The analysis engine façade.
///
/// Stateless across invocations: each call is a pure function of the file
/// content and the request. Concurrent calls share nothing but the workspace
/// root and the request-id counter.
pub struct Engine {
    root: PathBuf,
    notifier: Option<Notifier>,
    next_request_id: AtomicU64,
}

impl Engine {
    /// Create an engine sandboxed to the given workspace root. All request
    /// paths resolve relative to it and must stay inside it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            notifier: None,
            next_request_id: AtomicU64::new(1),
        }
    }

    /// Install a status callback receiving one `tool_start` and one
    /// `tool_end` event per invocation.
    pub fn with_notifier(mut self, notify: impl Fn(&ToolEvent) + Send + Sync + 'static) -> Self {
        self.notifier = Some(Arc::new(notify));
        self
    }

    /// Execute one request and return the rendered report.
    ///
    /// This is the system boundary: success or failure, the return value is
    /// a string, and failures start with `Error: `.
    pub async fn execute(&self, request: OperationRequest) -> String {
        let request_id = self.next_request_id.fetch_add(1, Ordering::SeqCst);
        let operation = request.operation();
        let _guard = LifecycleGuard::enter(self.notifier.clone(), operation, request_id);

        info!(operation, request_id, file = request.file(), "tool dispatch");

        let rendered = match self.run(request).await {
            Ok(report) => render::render(&report),
            Err(err) => {
                debug!(operation, request_id, error = %err, "operation failed");
                render::render_error(&err)
            }
        };

        info!(operation, request_id, "tool complete");
        rendered
    }

    async fn run(&self, request: OperationRequest) -> Result<Report> {
        let path = self.resolve_path(request.file())?;

        // The file read is the pipeline's only suspension point.
        let content =
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| EngineError::NotFound {
                    path: path.clone(),
                    source: e,
                })?;

        // Compute on the blocking pool; a panicking operation surfaces as a
        // join error and is reported as an internal fault, not propagated.
        tokio::task::spawn_blocking(move || {
            let dataset = input::load_str(&content)?;
            dispatch(dataset, request)
        })
        .await
        .map_err(|e| EngineError::Internal(e.to_string()))?
    }

    /// Canonicalize the requested path against the workspace root, failing
    /// closed before any access to the requested file if it escapes.
    fn resolve_path(&self, file: &str) -> Result<PathBuf> {
        let canonical_root = self.root.canonicalize().map_err(|e| {
            EngineError::Internal(format!(
                "workspace root '{}' unavailable: {}",
                self.root.display(),
                e
            ))
        })?;

        let requested = Path::new(file);
        let joined = if requested.is_absolute() {
            requested.to_path_buf()
        } else {
            canonical_root.join(requested)
        };

        // Lexical containment first: catches `..` escapes without touching
        // the requested file, even when it does not exist.
        let normalized = normalize(&joined);
        if !normalized.starts_with(&canonical_root) {
            return Err(EngineError::PathTraversal(PathBuf::from(file)));
        }

        // Then resolve symlinks and re-check containment.
        match normalized.canonicalize() {
            Ok(canonical) => {
                if canonical.starts_with(&canonical_root) {
                    Ok(canonical)
                } else {
                    Err(EngineError::PathTraversal(PathBuf::from(file)))
                }
            }
            Err(e) => Err(EngineError::NotFound {
                path: normalized,
                source: e,
            }),
        }
    }
}

/// Lexically normalize a path: strip `.` and resolve `..` without touching
/// the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

fn dispatch(dataset: Dataset, request: OperationRequest) -> Result<Report> {
    match request {
        OperationRequest::Describe { .. } => Ok(Report::Describe(ops::describe(&dataset))),
        OperationRequest::Statistics { column, .. } => {
            let summary = ops::column_stats(&dataset, &column)?;
            Ok(Report::ColumnStats { column, summary })
        }
        OperationRequest::Filter {
            column,
            operator,
            value,
            ..
        } => {
            let result = ops::filter(&dataset, &column, &operator, &value)?;
            Ok(Report::Rows {
                verb: "Filter",
                dataset: result,
            })
        }
        OperationRequest::Sort { column, order, .. } => {
            let order = SortOrder::from_str(&order)?;
            let result = ops::sort(&dataset, &column, order)?;
            Ok(Report::Rows {
                verb: "Sort",
                dataset: result,
            })
        }
        OperationRequest::GroupBy {
            group_column,
            agg_column,
            func,
            ..
        } => {
            let groups = ops::group_by(&dataset, &group_column, &agg_column, &func)?;
            Ok(Report::Groups {
                group_column,
                agg_column,
                func,
                groups,
            })
        }
        OperationRequest::Correlate { columns, .. } => {
            Ok(Report::Correlation(ops::correlation(&dataset, &columns)?))
        }
        OperationRequest::Transform {
            column,
            kind,
            new_name,
            ..
        } => {
            let (result, new_column) =
                ops::transform(&dataset, &column, &kind, new_name.as_deref())?;
            Ok(Report::Transformed {
                new_column,
                dataset: result,
            })
        }
        OperationRequest::Outliers { column, method, .. } => {
            let outliers = ops::outliers(&dataset, &column, &method)?;
            Ok(Report::Outliers {
                column,
                method,
                outliers,
            })
        }
    }
}
