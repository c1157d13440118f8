use color_eyre::Result;
use octocrab::{Octocrab, Page};
use serde::{Deserialize, Serialize};

/// 1ページあたりの取得件数（API の上限）
pub const PER_PAGE: u8 = 100;

/// 取得対象の PR の状態
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PullState {
    #[default]
    All,
    Open,
}

impl PullState {
    pub fn as_api_str(&self) -> &str {
        match self {
            PullState::All => "all",
            PullState::Open => "open",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct LabelRecord {
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct BranchRecord {
    label: Option<String>,
    #[serde(rename = "ref", default)]
    branch: String,
}

#[derive(Debug, Clone, Deserialize)]
struct PullRecord {
    number: u64,
    title: Option<String>,
    html_url: Option<String>,
    merged_at: Option<String>,
    #[serde(default)]
    labels: Vec<LabelRecord>,
    head: BranchRecord,
    base: BranchRecord,
}

#[derive(Serialize)]
struct ListParams<'a> {
    state: &'a str,
    per_page: u8,
}

/// ツリー構築に使う PR 情報
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PullRequestInfo {
    pub title: String,
    pub number: u64,
    pub base_label: String,
    pub head_label: String,
    pub labels: Vec<String>,
    pub is_merged: bool,
    pub url: String,
}

impl BranchRecord {
    /// "owner:branch" 形式のラベル。フォーク削除などで label が無い場合は ref を使う。
    fn into_label(self) -> String {
        self.label.unwrap_or(self.branch)
    }
}

impl From<PullRecord> for PullRequestInfo {
    fn from(record: PullRecord) -> Self {
        Self {
            title: record.title.unwrap_or_default(),
            number: record.number,
            base_label: record.base.into_label(),
            head_label: record.head.into_label(),
            labels: record.labels.into_iter().map(|l| l.name).collect(),
            // 一覧 API は merged を返さないので merged_at で判定する
            is_merged: record.merged_at.is_some(),
            url: record.html_url.unwrap_or_default(),
        }
    }
}

/// リポジトリの PR を全ページ取得する（API の返却順を保持）。
/// 2ページ目以降は Link ヘッダーの rel="next" を octocrab がたどる。
pub async fn fetch_pulls(
    client: &Octocrab,
    owner: &str,
    repo: &str,
    state: PullState,
) -> Result<Vec<PullRequestInfo>> {
    let url = format!("/repos/{}/{}/pulls", owner, repo);
    let params = ListParams {
        state: state.as_api_str(),
        per_page: PER_PAGE,
    };
    let page: Page<PullRecord> = client.get(&url, Some(&params)).await?;
    log::debug!(
        "{owner}/{repo}: first page has {} pull requests, more pages: {}",
        page.items.len(),
        page.next.is_some()
    );

    let records = client.all_pages(page).await?;
    Ok(records.into_iter().map(PullRequestInfo::from).collect())
}
