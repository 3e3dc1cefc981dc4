//! Placeholder parsing and the repo-query dispatch vocabulary
//!
//! A token like `{{github:repo,octocat,hello,starsCount}}` parses in two
//! stages: the first colon separates the service name from its raw
//! parameters, then the GitHub provider reads the parameters as four
//! positional comma-separated fields (api, owner, repo, property).

use clap::ValueEnum;

/// A placeholder split into its service name and raw parameter string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    pub service: &'a str,
    pub param: &'a str,
}

impl<'a> Placeholder<'a> {
    /// Parse a token (braces included) into service and parameters.
    ///
    /// A token without a colon parses as `service = <inner text>` with an
    /// empty parameter string; it then falls through the unknown-provider
    /// path during resolution.
    pub fn parse(token: &'a str) -> Self {
        let inner = token
            .strip_prefix("{{")
            .and_then(|t| t.strip_suffix("}}"))
            .unwrap_or(token);

        match inner.split_once(':') {
            Some((service, param)) => Self { service, param },
            None => Self {
                service: inner,
                param: "",
            },
        }
    }
}

/// Endpoint group selected by the first parameter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiGroup {
    Repo,
}

impl ApiGroup {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "repo" => Some(ApiGroup::Repo),
            _ => None,
        }
    }
}

/// A repository property a placeholder can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepoProperty {
    Description,
    Language,
    Stars,
    Forks,
    Watchers,
    Downloads,
    UniqueVisitors,
    TotalViews,
}

impl RepoProperty {
    /// Parse a property name as written in a template. Both historical
    /// spellings of the download total are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "description" => Some(RepoProperty::Description),
            "language" => Some(RepoProperty::Language),
            "starsCount" => Some(RepoProperty::Stars),
            "forksCount" => Some(RepoProperty::Forks),
            "watchingCount" => Some(RepoProperty::Watchers),
            "downloadCount" | "downloadsCount" => Some(RepoProperty::Downloads),
            "uniqueVisitors" => Some(RepoProperty::UniqueVisitors),
            "totalViews" => Some(RepoProperty::TotalViews),
            _ => None,
        }
    }
}

/// A parsed GitHub repo query: `api,owner,repo,property`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoQuery<'a> {
    pub api: &'a str,
    pub owner: &'a str,
    pub repo: &'a str,
    pub property: &'a str,
}

impl<'a> RepoQuery<'a> {
    /// Split a raw parameter string into its four positional fields.
    /// Returns `None` when the field count is wrong.
    pub fn parse(param: &'a str) -> Option<Self> {
        let mut fields = param.split(',');
        let query = Self {
            api: fields.next()?,
            owner: fields.next()?,
            repo: fields.next()?,
            property: fields.next()?,
        };
        if fields.next().is_some() {
            return None;
        }
        Some(query)
    }
}

/// Which properties an invocation supports.
///
/// The repository-README template generation historically exposed the core
/// stats only; the profile-README generation added traffic views. Unified
/// here as per-invocation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PropertyProfile {
    /// Repository metadata and release downloads
    Core,
    /// Core plus traffic views (requires push access to the repository)
    #[default]
    Extended,
}

impl PropertyProfile {
    pub fn supports(&self, property: RepoProperty) -> bool {
        match property {
            RepoProperty::UniqueVisitors | RepoProperty::TotalViews => {
                matches!(self, PropertyProfile::Extended)
            }
            _ => true,
        }
    }
}
