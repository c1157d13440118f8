use crate::config::ClientConfig;
use color_eyre::Result;
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;

/// 設定から GitHub API クライアントを作成する。
/// トークンが無ければ匿名クライアントになる。
pub fn create_client(config: &ClientConfig) -> Result<Octocrab> {
    // 失敗時は再試行せず即座にエラーにする
    let mut builder = Octocrab::builder().add_retry_config(RetryConfig::None);
    if let Some(base_uri) = &config.base_uri {
        builder = builder.base_uri(base_uri.as_str())?;
    }

    let client = match &config.token {
        Some(token) => builder.personal_token(token.clone()).build()?,
        None => {
            log::info!("No GitHub token configured, using anonymous access");
            builder.build()?
        }
    };
    Ok(client)
}
