//! Route parsing and tab labelling

use super::{normalize_path, segments};
use crate::tab::TabKind;

/// Label and kind for a navigation path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub title: String,
    pub kind: TabKind,
}

impl Classification {
    fn new(title: impl Into<String>, kind: TabKind) -> Self {
        Self {
            title: title.into(),
            kind,
        }
    }
}

/// A parsed navigation path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Workspace,
    Calendar,
    People,
    Admin,
    Channels,
    Explorer,
    Ai,
    Projects,
    Project { slug: String },
    ProjectTimeline { slug: String },
    ProjectTask { slug: String, task: String },
    /// `/c` with no channel selected
    ChannelIndex,
    Channel { slug: String },
    /// `/dm` with no conversation selected
    DirectMessages,
    DirectMessage { slug: String },
    /// First segment not in the lookup table
    Other { segment: String },
}

impl Route {
    /// Parse a path; the input is normalized first so any string is accepted
    pub fn parse(raw: &str) -> Self {
        let path = normalize_path(raw);
        let parts: Vec<&str> = segments(&path).collect();

        match parts.as_slice() {
            [] | ["dashboard", ..] => Route::Dashboard,
            ["workspace", ..] => Route::Workspace,
            ["calendar", ..] => Route::Calendar,
            ["people", ..] => Route::People,
            ["admin", ..] => Route::Admin,
            ["channels", ..] => Route::Channels,
            ["explorer", ..] => Route::Explorer,
            ["ai", ..] => Route::Ai,
            ["projects"] => Route::Projects,
            ["projects", slug, "timeline", ..] => Route::ProjectTimeline {
                slug: slug.to_string(),
            },
            ["projects", slug, "tasks", task, ..] => Route::ProjectTask {
                slug: slug.to_string(),
                task: task.to_string(),
            },
            ["projects", slug, ..] => Route::Project {
                slug: slug.to_string(),
            },
            ["c"] => Route::ChannelIndex,
            ["c", slug, ..] => Route::Channel {
                slug: slug.to_string(),
            },
            ["dm"] => Route::DirectMessages,
            ["dm", slug, ..] => Route::DirectMessage {
                slug: slug.to_string(),
            },
            [first, ..] => Route::Other {
                segment: first.to_string(),
            },
        }
    }

    /// Tab label and kind for this route
    pub fn classification(&self) -> Classification {
        match self {
            Route::Dashboard => Classification::new("Dashboard", TabKind::Project),
            Route::Workspace => Classification::new("Workspace", TabKind::Project),
            Route::Calendar => Classification::new("Calendar", TabKind::Calendar),
            Route::People => Classification::new("People", TabKind::Doc),
            Route::Admin => Classification::new("Admin", TabKind::Doc),
            Route::Channels | Route::ChannelIndex => {
                Classification::new("Channels", TabKind::Channel)
            }
            Route::Explorer => Classification::new("Explorer", TabKind::Doc),
            Route::Ai => Classification::new("AI Assistant", TabKind::Doc),
            Route::Projects => Classification::new("Projects", TabKind::Project),
            Route::Project { slug } => Classification::new(title_case(slug), TabKind::Project),
            Route::ProjectTimeline { slug } => {
                Classification::new(format!("{} Timeline", title_case(slug)), TabKind::Timeline)
            }
            Route::ProjectTask { task, .. } => {
                Classification::new(format!("Task {task}"), TabKind::Task)
            }
            Route::Channel { slug } => {
                Classification::new(format!("#{}", title_case(slug)), TabKind::Channel)
            }
            Route::DirectMessages => Classification::new("Direct Messages", TabKind::Channel),
            Route::DirectMessage { slug } => {
                Classification::new(format!("@{}", title_case(slug)), TabKind::Channel)
            }
            Route::Other { segment } => {
                let title = title_case(segment);
                if title.is_empty() {
                    Classification::new("Tab", TabKind::Doc)
                } else {
                    Classification::new(title, TabKind::Doc)
                }
            }
        }
    }
}

/// Classify a path into a tab title and kind. Never fails.
pub fn classify(path: &str) -> Classification {
    Route::parse(path).classification()
}

/// Title-case a slug: words split on `-`, `_` and whitespace, first letter
/// of each word upper-cased, the rest kept as written.
pub fn title_case(slug: &str) -> String {
    slug.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
