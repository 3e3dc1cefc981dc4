//! End-to-end renderer tests over a recorded fetch transport
//!
//! The real GitHub provider runs against a stub `ResourceFetcher`, so these
//! tests pin down the full pipeline (extract → dispatch → fetch → cache →
//! substitute) without touching the network.

use async_trait::async_trait;
use gitfill::provider::{
    GitHubProvider, Release, ReleaseAsset, RepoMetadata, Resource, ResourceData, ResourceFetcher,
    TrafficViews,
};
use gitfill::{PropertyProfile, Renderer};
use std::sync::{Arc, Mutex};

/// Serves canned payloads keyed by resource path and records every fetch.
struct RecordingFetcher {
    calls: Arc<Mutex<Vec<String>>>,
    outcomes: Vec<(String, Result<ResourceData, String>)>,
}

impl RecordingFetcher {
    fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(vec![])),
            outcomes: vec![],
        }
    }

    fn with(mut self, path: &str, outcome: Result<ResourceData, String>) -> Self {
        self.outcomes.push((path.to_string(), outcome));
        self
    }

    fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl ResourceFetcher for RecordingFetcher {
    async fn fetch(&self, resource: &Resource) -> anyhow::Result<ResourceData> {
        let path = resource.path();
        self.calls.lock().unwrap().push(path.clone());
        match self.outcomes.iter().find(|(p, _)| *p == path) {
            Some((_, Ok(data))) => Ok(data.clone()),
            Some((_, Err(reason))) => anyhow::bail!("{reason}"),
            None => anyhow::bail!("no stub for {path}"),
        }
    }
}

fn octo_demo_metadata() -> ResourceData {
    ResourceData::Repo(RepoMetadata {
        description: Some("A demo repository".to_string()),
        language: Some("Rust".to_string()),
        stargazers_count: 42,
        forks_count: 6,
        subscribers_count: 11,
    })
}

fn renderer_over(fetcher: RecordingFetcher, profile: PropertyProfile) -> Renderer {
    let provider = GitHubProvider::with_fetcher(Box::new(fetcher), profile);
    Renderer::new(profile).with_provider(Box::new(provider))
}

#[tokio::test]
async fn test_stars_end_to_end() {
    let fetcher = RecordingFetcher::new().with("repos/octo/demo", Ok(octo_demo_metadata()));
    let mut renderer = renderer_over(fetcher, PropertyProfile::Extended);

    let out = renderer
        .render("Stars: {{github:repo,octo,demo,starsCount}}")
        .await
        .unwrap();

    assert_eq!(out, "Stars: 42");
}

#[tokio::test]
async fn test_one_metadata_call_for_two_properties() {
    let fetcher = RecordingFetcher::new().with("repos/octo/demo", Ok(octo_demo_metadata()));
    let calls = fetcher.calls();
    let mut renderer = renderer_over(fetcher, PropertyProfile::Extended);

    let out = renderer
        .render("s={{github:repo,octo,demo,starsCount}} f={{github:repo,octo,demo,forksCount}}")
        .await
        .unwrap();

    assert_eq!(out, "s=42 f=6");
    assert_eq!(*calls.lock().unwrap(), vec!["repos/octo/demo"]);
}

#[tokio::test]
async fn test_duplicate_tokens_one_fetch_identical_replacement() {
    let fetcher = RecordingFetcher::new().with("repos/octo/demo", Ok(octo_demo_metadata()));
    let calls = fetcher.calls();
    let mut renderer = renderer_over(fetcher, PropertyProfile::Extended);

    let out = renderer
        .render("{{github:repo,octo,demo,starsCount}}/{{github:repo,octo,demo,starsCount}}")
        .await
        .unwrap();

    assert_eq!(out, "42/42");
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_releases_failure_isolated_from_other_placeholders() {
    let fetcher = RecordingFetcher::new()
        .with("repos/octo/demo", Ok(octo_demo_metadata()))
        .with(
            "repos/octo/demo/releases",
            Err("GitHub API error (502): bad gateway".to_string()),
        );
    let mut renderer = renderer_over(fetcher, PropertyProfile::Extended);

    let out = renderer
        .render(
            "downloads={{github:repo,octo,demo,downloadCount}}\nstars={{github:repo,octo,demo,starsCount}}\n",
        )
        .await
        .unwrap();

    assert!(out.contains("downloads=N/A: GitHub API error (502): bad gateway"));
    assert!(out.contains("stars=42"));
}

#[tokio::test]
async fn test_release_downloads_summed_excluding_drafts() {
    let releases = ResourceData::Releases(vec![
        Release {
            draft: false,
            assets: vec![
                ReleaseAsset { download_count: 100 },
                ReleaseAsset { download_count: 20 },
            ],
        },
        Release {
            draft: true,
            assets: vec![ReleaseAsset {
                download_count: 9999,
            }],
        },
        Release {
            draft: false,
            assets: vec![ReleaseAsset { download_count: 3 }],
        },
    ]);
    let fetcher = RecordingFetcher::new().with("repos/octo/demo/releases", Ok(releases));
    let mut renderer = renderer_over(fetcher, PropertyProfile::Extended);

    let out = renderer
        .render("{{github:repo,octo,demo,downloadsCount}}")
        .await
        .unwrap();

    assert_eq!(out, "123");
}

#[tokio::test]
async fn test_traffic_properties_share_one_fetch() {
    let fetcher = RecordingFetcher::new().with(
        "repos/octo/demo/traffic/views",
        Ok(ResourceData::Traffic(TrafficViews {
            count: 1400,
            uniques: 250,
        })),
    );
    let calls = fetcher.calls();
    let mut renderer = renderer_over(fetcher, PropertyProfile::Extended);

    let out = renderer
        .render("v={{github:repo,octo,demo,totalViews}} u={{github:repo,octo,demo,uniqueVisitors}}")
        .await
        .unwrap();

    assert_eq!(out, "v=1400 u=250");
    assert_eq!(*calls.lock().unwrap(), vec!["repos/octo/demo/traffic/views"]);
}

#[tokio::test]
async fn test_core_profile_turns_traffic_into_sentinel() {
    let fetcher = RecordingFetcher::new().with("repos/octo/demo", Ok(octo_demo_metadata()));
    let calls = fetcher.calls();
    let mut renderer = renderer_over(fetcher, PropertyProfile::Core);

    let out = renderer
        .render("{{github:repo,octo,demo,uniqueVisitors}} {{github:repo,octo,demo,starsCount}}")
        .await
        .unwrap();

    assert_eq!(out, "N/A: Unknown property: uniqueVisitors 42");
    // The unsupported property never reached the network
    assert_eq!(*calls.lock().unwrap(), vec!["repos/octo/demo"]);
}

#[tokio::test]
async fn test_mixed_document_with_unknown_service() {
    let fetcher = RecordingFetcher::new().with("repos/octo/demo", Ok(octo_demo_metadata()));
    let mut renderer = renderer_over(fetcher, PropertyProfile::Extended);

    let out = renderer
        .render(
            "# Demo\n\n{{github:repo,octo,demo,description}}\n\nMirror: {{gitlab:repo,octo,demo,description}}\n",
        )
        .await
        .unwrap();

    assert_eq!(
        out,
        "# Demo\n\nA demo repository\n\nMirror: N/A: Unknown provider: gitlab\n"
    );
}

#[tokio::test]
async fn test_different_repos_fetch_separately() {
    let other = ResourceData::Repo(RepoMetadata {
        description: None,
        language: None,
        stargazers_count: 7,
        forks_count: 1,
        subscribers_count: 2,
    });
    let fetcher = RecordingFetcher::new()
        .with("repos/octo/demo", Ok(octo_demo_metadata()))
        .with("repos/octo/other", Ok(other));
    let calls = fetcher.calls();
    let mut renderer = renderer_over(fetcher, PropertyProfile::Extended);

    let out = renderer
        .render("{{github:repo,octo,demo,starsCount}} {{github:repo,octo,other,starsCount}}")
        .await
        .unwrap();

    assert_eq!(out, "42 7");
    assert_eq!(calls.lock().unwrap().len(), 2);
}
