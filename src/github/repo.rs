use color_eyre::Result;
use octocrab::Octocrab;
use serde::Deserialize;

/// API がデフォルトブランチを返さない場合のフォールバック
const FALLBACK_BRANCH: &str = "main";

#[derive(Debug, Clone, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoInfo {
    pub owner: RepoOwner,
    pub default_branch: Option<String>,
}

impl RepoInfo {
    /// ツリーのルートになるラベル（例: "NLnetLabs:main"）
    pub fn default_branch_label(&self) -> String {
        let branch = self.default_branch.as_deref().unwrap_or(FALLBACK_BRANCH);
        format!("{}:{}", self.owner.login, branch)
    }
}

pub async fn fetch_repo(client: &Octocrab, owner: &str, repo: &str) -> Result<RepoInfo> {
    let url = format!("/repos/{}/{}", owner, repo);
    let info: RepoInfo = client.get(url, None::<&()>).await?;
    log::debug!("default branch of {owner}/{repo}: {:?}", info.default_branch);
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::github::client::create_client;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_default_branch_label() {
        let info = RepoInfo {
            owner: RepoOwner {
                login: "NLnetLabs".to_string(),
            },
            default_branch: Some("develop".to_string()),
        };
        assert_eq!(info.default_branch_label(), "NLnetLabs:develop");
    }

    #[test]
    fn test_default_branch_label_fallback() {
        let info = RepoInfo {
            owner: RepoOwner {
                login: "octocat".to_string(),
            },
            default_branch: None,
        };
        assert_eq!(info.default_branch_label(), "octocat:main");
    }

    #[tokio::test]
    async fn test_fetch_repo_uses_canonical_owner() {
        let server = MockServer::start().await;
        // リダイレクト後の正式なオーナー名が返るケース
        Mock::given(method("GET"))
            .and(path("/repos/nlnetlabs/domain"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "domain",
                "owner": { "login": "NLnetLabs" },
                "default_branch": "main"
            })))
            .mount(&server)
            .await;

        let client = create_client(&ClientConfig {
            token: None,
            base_uri: Some(server.uri()),
        })
        .unwrap();
        let info = fetch_repo(&client, "nlnetlabs", "domain").await.unwrap();
        assert_eq!(info.default_branch_label(), "NLnetLabs:main");
    }

    #[tokio::test]
    async fn test_fetch_repo_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/owner/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Not Found",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&server)
            .await;

        let client = create_client(&ClientConfig {
            token: None,
            base_uri: Some(server.uri()),
        })
        .unwrap();
        assert!(fetch_repo(&client, "owner", "missing").await.is_err());
    }
}
