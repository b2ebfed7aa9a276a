//! Organization / division / project scope
//!
//! `ScopeContext` owns the authoritative scope triple and the directory it is
//! validated against. Every setter validates first and mutates only on
//! success; the caller (the shell controller) is responsible for navigating
//! afterwards. Breadcrumbs are recomputed whenever the triple or the
//! directory changes.

mod access;
mod directory;

pub use access::{AllowAll, ProjectAccess, ProjectAllowList, UnrestrictedOnly};
pub use directory::{Division, OrgDirectory, Organization, Project};

use crate::route::{DEFAULT_PATH, normalize_path};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The selected organization, division and (optionally) project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub org_id: String,
    pub division_id: String,
    /// `None` means a workspace-level view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl Scope {
    pub fn new(org_id: impl Into<String>, division_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            division_id: division_id.into(),
            project_id: None,
        }
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Browser path prefix for this scope
    pub fn prefix(&self) -> String {
        format!("/{}/{}", self.org_id, self.division_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreadcrumbKind {
    Organization,
    Division,
    Project,
}

/// One step of the org → division → project trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub id: String,
    pub name: String,
    pub kind: BreadcrumbKind,
    pub href: String,
}

/// Rejected scope changes. The scope is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("directory has no organization with a division")]
    NoOrganizations,
    #[error("unknown organization '{0}'")]
    UnknownOrganization(String),
    #[error("division '{division_id}' does not belong to organization '{org_id}'")]
    DivisionNotInOrganization { org_id: String, division_id: String },
    #[error("project '{project_id}' is not part of division '{division_id}'")]
    ProjectNotInDivision {
        division_id: String,
        project_id: String,
    },
    #[error("access to project '{0}' was denied")]
    ProjectAccessDenied(String),
    #[error("leave project '{0}' before switching organization or division")]
    ProjectScopeActive(String),
}

/// Holds the scope triple and derives breadcrumbs from it
pub struct ScopeContext {
    directory: OrgDirectory,
    access: Box<dyn ProjectAccess>,
    scope: Scope,
    breadcrumbs: Vec<Breadcrumb>,
    /// Relative path behind the division breadcrumb and the bare prefix
    home_path: String,
}

impl std::fmt::Debug for ScopeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeContext")
            .field("scope", &self.scope)
            .field("breadcrumbs", &self.breadcrumbs)
            .finish_non_exhaustive()
    }
}

impl ScopeContext {
    /// Resolve the session's starting scope.
    ///
    /// `preferred` (e.g. from a restored session) is used when its org and
    /// division still exist; its project is kept only if it still exists and
    /// access is granted. Otherwise the first organization's first division
    /// is selected.
    pub fn resolve(
        directory: OrgDirectory,
        access: impl ProjectAccess + 'static,
        preferred: Option<&Scope>,
    ) -> Result<Self, ScopeError> {
        let access: Box<dyn ProjectAccess> = Box::new(access);
        let scope = resolve_scope(&directory, access.as_ref(), preferred)?;
        let mut ctx = Self {
            directory,
            access,
            scope,
            breadcrumbs: Vec::new(),
            home_path: DEFAULT_PATH.to_string(),
        };
        ctx.rebuild_breadcrumbs();
        log::info!(
            "Resolved scope {}/{} project={:?}",
            ctx.scope.org_id,
            ctx.scope.division_id,
            ctx.scope.project_id
        );
        Ok(ctx)
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        &self.breadcrumbs
    }

    pub fn directory(&self) -> &OrgDirectory {
        &self.directory
    }

    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    /// Change the page the division breadcrumb links to
    pub fn set_home_path(&mut self, path: &str) {
        self.home_path = normalize_path(path);
        self.rebuild_breadcrumbs();
    }

    /// Switch organization and division.
    ///
    /// Rejected while a project scope is active unless the target equals the
    /// current org/division; call `clear_project_scope` first.
    pub fn set_scope(&mut self, org_id: &str, division_id: &str) -> Result<(), ScopeError> {
        if self.scope.org_id == org_id && self.scope.division_id == division_id {
            return Ok(());
        }
        if let Some(project_id) = &self.scope.project_id {
            return Err(ScopeError::ProjectScopeActive(project_id.clone()));
        }
        if self.directory.organization(org_id).is_none() {
            return Err(ScopeError::UnknownOrganization(org_id.to_string()));
        }
        if self.directory.division(org_id, division_id).is_none() {
            return Err(ScopeError::DivisionNotInOrganization {
                org_id: org_id.to_string(),
                division_id: division_id.to_string(),
            });
        }

        self.scope = Scope::new(org_id, division_id);
        self.rebuild_breadcrumbs();
        log::info!("Scope set to {}/{}", org_id, division_id);
        Ok(())
    }

    /// Switch division within the current organization
    pub fn set_division(&mut self, division_id: &str) -> Result<(), ScopeError> {
        let org_id = self.scope.org_id.clone();
        self.set_scope(&org_id, division_id)
    }

    /// Enter a project of the current division, subject to the access predicate
    pub fn set_project_scope(&mut self, project_id: &str) -> Result<(), ScopeError> {
        let Some(project) =
            self.directory
                .project(&self.scope.org_id, &self.scope.division_id, project_id)
        else {
            return Err(ScopeError::ProjectNotInDivision {
                division_id: self.scope.division_id.clone(),
                project_id: project_id.to_string(),
            });
        };
        if !self.access.can_switch_to_project(&self.scope, project) {
            log::warn!("Access to project {} denied", project_id);
            return Err(ScopeError::ProjectAccessDenied(project_id.to_string()));
        }

        self.scope.project_id = Some(project_id.to_string());
        self.rebuild_breadcrumbs();
        log::info!("Entered project {}", project_id);
        Ok(())
    }

    /// Leave the project scope. Returns false if no project was set.
    pub fn clear_project_scope(&mut self) -> bool {
        if self.scope.project_id.take().is_none() {
            return false;
        }
        self.rebuild_breadcrumbs();
        log::info!("Left project scope");
        true
    }

    /// Swap in a refreshed directory, re-validating the current scope.
    ///
    /// Returns true if the scope had to change. On error nothing is replaced.
    pub fn replace_directory(&mut self, directory: OrgDirectory) -> Result<bool, ScopeError> {
        let scope = resolve_scope(&directory, self.access.as_ref(), Some(&self.scope))?;
        let changed = scope != self.scope;
        self.directory = directory;
        self.scope = scope;
        self.rebuild_breadcrumbs();
        Ok(changed)
    }

    /// Scoped browser path for a relative path
    pub fn href(&self, relative: &str) -> String {
        format!("{}{}", self.scope.prefix(), normalize_path(relative))
    }

    /// Relative path of a scoped browser path, or `None` when the path is
    /// not under the current org/division
    pub fn strip_prefix(&self, href: &str) -> Option<String> {
        let path = normalize_path(href);
        let prefix = self.scope.prefix();
        let rest = path.strip_prefix(&prefix)?;
        if rest.is_empty() {
            Some(self.home_path.clone())
        } else if rest.starts_with('/') {
            Some(rest.to_string())
        } else {
            None
        }
    }

    fn rebuild_breadcrumbs(&mut self) {
        let mut crumbs = Vec::with_capacity(3);
        let Some(org) = self.directory.organization(&self.scope.org_id) else {
            self.breadcrumbs = crumbs;
            return;
        };
        crumbs.push(Breadcrumb {
            id: org.id.clone(),
            name: org.name.clone(),
            kind: BreadcrumbKind::Organization,
            href: format!("/{}", org.id),
        });

        if let Some(division) = self.directory.division(&org.id, &self.scope.division_id) {
            crumbs.push(Breadcrumb {
                id: division.id.clone(),
                name: division.name.clone(),
                kind: BreadcrumbKind::Division,
                href: self.href(&self.home_path),
            });

            if let Some(project_id) = &self.scope.project_id
                && let Some(project) = division.projects.iter().find(|p| &p.id == project_id)
            {
                crumbs.push(Breadcrumb {
                    id: project.id.clone(),
                    name: project.name.clone(),
                    kind: BreadcrumbKind::Project,
                    href: self.href(&format!("/projects/{}", project.id)),
                });
            }
        }
        self.breadcrumbs = crumbs;
    }
}

fn resolve_scope(
    directory: &OrgDirectory,
    access: &dyn ProjectAccess,
    preferred: Option<&Scope>,
) -> Result<Scope, ScopeError> {
    if let Some(preferred) = preferred
        && directory
            .division(&preferred.org_id, &preferred.division_id)
            .is_some()
    {
        let mut scope = Scope::new(&preferred.org_id, &preferred.division_id);
        if let Some(project_id) = &preferred.project_id
            && let Some(project) =
                directory.project(&preferred.org_id, &preferred.division_id, project_id)
            && access.can_switch_to_project(&scope, project)
        {
            scope.project_id = Some(project_id.clone());
        }
        return Ok(scope);
    }

    let (org, division) = directory.first_scope().ok_or(ScopeError::NoOrganizations)?;
    Ok(Scope::new(&org.id, &division.id))
}
