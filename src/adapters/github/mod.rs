//! GitHub REST client
//!
//! Implements `GitHubApi` over the public REST API with a bearer token.
//! Installation IDs are accepted for routing parity but requests are
//! authenticated with the configured token. Path segments are
//! percent-encoded, and list endpoints follow `Link: rel="next"` headers.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::core::models::{GitHubUser, UserCommitSummary};
use crate::core::ports::{CommitStatus, GitHubApi, GitHubError, GitHubRepository, Membership};

/// Public GitHub API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PER_PAGE: u32 = 100;

/// GitHub REST client
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: Url,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client for the given API root
    ///
    /// # Errors
    ///
    /// Returns an error if the API root is not a valid base URL or the HTTP
    /// client cannot be built.
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Result<Self, GitHubError> {
        let raw = api_url.into();
        let api_url = Url::parse(raw.trim_end_matches('/'))
            .map_err(|e| GitHubError::Transport(format!("invalid API URL {raw}: {e}")))?;
        if api_url.cannot_be_a_base() {
            return Err(GitHubError::Transport(format!("invalid API URL {raw}")));
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("cla-signatures/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GitHubError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_url,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Endpoint URL with each segment percent-encoded
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Endpoint URL for a list call, asking for full pages
    fn list_url(&self, segments: &[&str]) -> Url {
        let mut url = self.url(segments);
        url.query_pairs_mut().append_pair("per_page", &PER_PAGE.to_string());
        url
    }

    fn authorized(&self, request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token.or(self.token.as_deref()) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<Response, GitHubError> {
        debug!("GitHub request {url}");
        request
            .send()
            .await
            .map_err(|e| GitHubError::Transport(e.to_string()))
    }

    async fn get(&self, url: &Url) -> Result<Response, GitHubError> {
        self.send(self.authorized(self.client.get(url.clone()), None), url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, GitHubError> {
        let response = self.get(url).await?;
        decode(check(response, url).await?).await
    }

    /// GET that maps 404 to `None`
    async fn get_optional<T: DeserializeOwned>(&self, url: &Url) -> Result<Option<T>, GitHubError> {
        let response = self.get(url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(check(response, url).await?).await.map(Some)
    }

    /// GET every page of a list endpoint
    async fn get_all<T: DeserializeOwned>(&self, first: Url) -> Result<Vec<T>, GitHubError> {
        let mut items = Vec::new();
        let mut url = first;
        loop {
            let response = check(self.get(&url).await?, &url).await?;
            let next = next_page(response.headers());
            let page: Vec<T> = decode(response).await?;
            items.extend(page);

            match next {
                Some(next) if next.as_str().starts_with(self.api_url.as_str()) => url = next,
                Some(next) => {
                    warn!("not following next page {next} outside {}", self.api_url);
                    break;
                },
                None => break,
            }
        }
        Ok(items)
    }
}

/// Target of the `rel="next"` entry of a `Link` header
fn next_page(headers: &header::HeaderMap) -> Option<Url> {
    let link = headers.get(header::LINK)?.to_str().ok()?;
    link.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        if !params.split(';').any(|p| p.trim() == "rel=\"next\"") {
            return None;
        }
        let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;
        Url::parse(target).ok()
    })
}

async fn check(response: Response, url: &Url) -> Result<Response, GitHubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(GitHubError::Status {
        status: status.as_u16(),
        url: url.to_string(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GitHubError> {
    response
        .json()
        .await
        .map_err(|e| GitHubError::Decode(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct OrgResponse {
    login: String,
}

#[derive(Debug, Deserialize)]
struct MembershipResponse {
    state: String,
    role: String,
}

#[derive(Debug, Deserialize)]
struct OwnerResponse {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryResponse {
    id: i64,
    name: String,
    owner: OwnerResponse,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    sha: String,
    author: Option<GitHubUser>,
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    author: Option<GitAuthor>,
}

#[derive(Debug, Deserialize)]
struct GitAuthor {
    name: Option<String>,
    email: Option<String>,
}

impl From<CommitResponse> for UserCommitSummary {
    fn from(commit: CommitResponse) -> Self {
        let (author_name, author_email) = commit
            .commit
            .author
            .map(|a| (a.name, a.email))
            .unwrap_or_default();
        Self {
            sha: commit.sha,
            commit_author: commit.author,
            author_name,
            author_email,
        }
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn user_organizations(&self, access_token: &str) -> Result<Vec<String>, GitHubError> {
        if access_token.is_empty() {
            return Err(GitHubError::Unauthenticated("user access token".to_string()));
        }
        let url = self.list_url(&["user", "orgs"]);
        let request = self.authorized(self.client.get(url.clone()), Some(access_token));
        let response = check(self.send(request, &url).await?, &url).await?;
        let orgs: Vec<OrgResponse> = decode(response).await?;
        Ok(orgs.into_iter().map(|o| o.login).collect())
    }

    async fn membership(&self, username: &str, org: &str) -> Result<Option<Membership>, GitHubError> {
        let membership: Option<MembershipResponse> = self
            .get_optional(&self.url(&["orgs", org, "memberships", username]))
            .await?;
        Ok(membership.map(|m| Membership {
            state: m.state,
            role: m.role,
        }))
    }

    async fn user_details(&self, username: &str) -> Result<Option<GitHubUser>, GitHubError> {
        self.get_optional(&self.url(&["users", username])).await
    }

    async fn repository(
        &self,
        installation_id: i64,
        repository_id: i64,
    ) -> Result<GitHubRepository, GitHubError> {
        debug!("fetching repository {repository_id} via installation {installation_id}");
        let url = self.url(&["repositories", &repository_id.to_string()]);
        let repository: RepositoryResponse = self.get_json(&url).await?;
        Ok(GitHubRepository {
            id: repository.id,
            name: repository.name,
            owner: repository.owner.login,
        })
    }

    async fn pull_request_commit_authors(
        &self,
        installation_id: i64,
        pull_request: i64,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<UserCommitSummary>, GitHubError> {
        debug!("listing commits of {owner}/{repo}#{pull_request} via installation {installation_id}");
        let pull_request = pull_request.to_string();
        let url = self.list_url(&["repos", owner, repo, "pulls", &pull_request, "commits"]);
        let commits: Vec<CommitResponse> = self.get_all(url).await?;
        Ok(commits.into_iter().map(UserCommitSummary::from).collect())
    }

    async fn create_commit_status(
        &self,
        installation_id: i64,
        owner: &str,
        repo: &str,
        sha: &str,
        status: &CommitStatus,
    ) -> Result<(), GitHubError> {
        debug!("posting {:?} status on {owner}/{repo}@{sha} via installation {installation_id}", status.state);
        let url = self.url(&["repos", owner, repo, "statuses", sha]);
        let request = self.authorized(self.client.post(url.clone()), None).json(status);
        check(self.send(request, &url).await?, &url).await?;
        Ok(())
    }
}
