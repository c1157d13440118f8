use std::fmt;
use std::str::FromStr;

/// 参照する環境変数（先に見つかったものを使う）
const TOKEN_VARS: [&str; 2] = ["GITHUB_ACCESS_TOKEN", "GITHUB_TOKEN"];
const API_URL_VAR: &str = "GITHUB_API_URL";

/// `owner/name` 形式のリポジトリ指定
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
#[error("The repository name needs to include the namespace, e.g. NLnetLabs/domain")]
pub struct InvalidRepoId;

impl FromStr for RepoId {
    type Err = InvalidRepoId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner, name) = s.split_once('/').ok_or(InvalidRepoId)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(InvalidRepoId);
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// GitHub API クライアントの設定。
/// token が None の場合は匿名アクセス（レート制限が厳しい）。
#[derive(Clone, Default)]
pub struct ClientConfig {
    pub token: Option<String>,
    pub base_uri: Option<String>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("base_uri", &self.base_uri)
            .finish()
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の lookup 関数から設定を組み立てる（空文字は未設定扱い）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            token: TOKEN_VARS.iter().find_map(|key| non_empty(*key)),
            base_uri: non_empty(API_URL_VAR),
        }
    }
}

/// ツリー表示のオプション
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOptions {
    pub print_urls: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_repo_id_parse_valid() {
        let repo: RepoId = "NLnetLabs/domain".parse().unwrap();
        assert_eq!(repo.owner, "NLnetLabs");
        assert_eq!(repo.name, "domain");
        assert_eq!(repo.to_string(), "NLnetLabs/domain");
    }

    #[test]
    fn test_repo_id_parse_invalid() {
        for input in ["domain", "/domain", "NLnetLabs/", "a/b/c", ""] {
            assert_eq!(input.parse::<RepoId>(), Err(InvalidRepoId), "{input}");
        }
    }

    #[test]
    fn test_config_prefers_access_token() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("GITHUB_ACCESS_TOKEN", "first"),
            ("GITHUB_TOKEN", "second"),
        ]));
        assert_eq!(config.token.as_deref(), Some("first"));
    }

    #[test]
    fn test_config_falls_back_to_github_token() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("GITHUB_ACCESS_TOKEN", ""),
            ("GITHUB_TOKEN", "second"),
        ]));
        assert_eq!(config.token.as_deref(), Some("second"));
    }

    #[test]
    fn test_config_anonymous_when_unset() {
        let config = ClientConfig::from_lookup(lookup_from(&[]));
        assert!(config.token.is_none());
        assert!(config.base_uri.is_none());
    }

    #[test]
    fn test_config_debug_redacts_token() {
        let config = ClientConfig::from_lookup(lookup_from(&[("GITHUB_TOKEN", "secret")]));
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
