//! Organization directory: organizations → divisions → projects
//!
//! Stands in for the org backend. Loaded from YAML:
//!
//! ```yaml
//! organizations:
//!   - id: acme
//!     name: Acme Corp
//!     divisions:
//!       - id: eng
//!         name: Engineering
//!         projects:
//!           - id: apollo
//!             name: Apollo
//!             restricted: true
//! ```

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgDirectory {
    #[serde(default)]
    pub organizations: Vec<Organization>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub divisions: Vec<Division>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Mock authorization flag: restricted projects are denied by the
    /// directory-backed access check
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub restricted: bool,
}

impl OrgDirectory {
    /// Single personal organization, used when no directory file is configured
    pub fn fallback() -> Self {
        Self {
            organizations: vec![Organization {
                id: "personal".to_string(),
                name: "Personal".to_string(),
                divisions: vec![Division {
                    id: "home".to_string(),
                    name: "Home".to_string(),
                    projects: Vec::new(),
                }],
            }],
        }
    }

    /// Load and validate a directory file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read org directory from {:?}", path))?;
        let directory: OrgDirectory = serde_yaml_ng::from_str(&contents)
            .with_context(|| format!("Failed to parse org directory from {:?}", path))?;
        directory
            .validate()
            .with_context(|| format!("Invalid org directory {:?}", path))?;
        log::info!(
            "Loaded org directory with {} organizations from {:?}",
            directory.organizations.len(),
            path
        );
        Ok(directory)
    }

    /// Ids must be unique among siblings
    pub fn validate(&self) -> Result<()> {
        let mut orgs = HashSet::new();
        for org in &self.organizations {
            if !orgs.insert(org.id.as_str()) {
                bail!("duplicate organization id '{}'", org.id);
            }
            let mut divisions = HashSet::new();
            for division in &org.divisions {
                if !divisions.insert(division.id.as_str()) {
                    bail!("duplicate division id '{}' in '{}'", division.id, org.id);
                }
                let mut projects = HashSet::new();
                for project in &division.projects {
                    if !projects.insert(project.id.as_str()) {
                        bail!(
                            "duplicate project id '{}' in '{}/{}'",
                            project.id,
                            org.id,
                            division.id
                        );
                    }
                }
            }
        }
        Ok(())
    }

    pub fn organization(&self, org_id: &str) -> Option<&Organization> {
        self.organizations.iter().find(|o| o.id == org_id)
    }

    pub fn division(&self, org_id: &str, division_id: &str) -> Option<&Division> {
        self.organization(org_id)?
            .divisions
            .iter()
            .find(|d| d.id == division_id)
    }

    pub fn project(&self, org_id: &str, division_id: &str, project_id: &str) -> Option<&Project> {
        self.division(org_id, division_id)?
            .projects
            .iter()
            .find(|p| p.id == project_id)
    }

    /// First organization that has at least one division, with that division
    pub fn first_scope(&self) -> Option<(&Organization, &Division)> {
        self.organizations
            .iter()
            .find_map(|org| org.divisions.first().map(|division| (org, division)))
    }
}
