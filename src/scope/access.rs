//! Authorization predicate consulted before entering a project scope

use super::Scope;
use super::directory::Project;
use std::collections::HashSet;

/// Decides whether the current user may switch into a project.
///
/// Supplied by the session/auth collaborator. Closures of the matching shape
/// implement it directly.
pub trait ProjectAccess {
    fn can_switch_to_project(&self, current: &Scope, project: &Project) -> bool;
}

impl<F> ProjectAccess for F
where
    F: Fn(&Scope, &Project) -> bool,
{
    fn can_switch_to_project(&self, current: &Scope, project: &Project) -> bool {
        self(current, project)
    }
}

/// Grants every project
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl ProjectAccess for AllowAll {
    fn can_switch_to_project(&self, _current: &Scope, _project: &Project) -> bool {
        true
    }
}

/// Honors the directory's `restricted` flag
#[derive(Debug, Clone, Copy, Default)]
pub struct UnrestrictedOnly;

impl ProjectAccess for UnrestrictedOnly {
    fn can_switch_to_project(&self, _current: &Scope, project: &Project) -> bool {
        !project.restricted
    }
}

/// Grants only the listed project ids
#[derive(Debug, Clone, Default)]
pub struct ProjectAllowList {
    allowed: HashSet<String>,
}

impl ProjectAllowList {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl ProjectAccess for ProjectAllowList {
    fn can_switch_to_project(&self, _current: &Scope, project: &Project) -> bool {
        self.allowed.contains(&project.id)
    }
}
