use chrono::Local;
use clap::Subcommand;
use devtab_core::dashboard::github;
use devtab_core::Config;

#[derive(Subcommand)]
pub enum GithubAction {
    /// Print the contribution chart image URL
    Chart {
        /// GitHub username (defaults to the configured one)
        #[arg(long)]
        username: Option<String>,
        /// Chart colour scheme
        #[arg(long)]
        theme: Option<String>,
    },
    /// Print the profile URL
    Profile {
        /// GitHub username (defaults to the configured one)
        #[arg(long)]
        username: Option<String>,
    },
}

fn username_or_configured(
    username: Option<String>,
    config: &Config,
) -> Result<String, Box<dyn std::error::Error>> {
    let username = username
        .map(|u| u.trim().to_string())
        .unwrap_or_else(|| config.github_username.clone());
    if username.is_empty() {
        return Err("no GitHub username configured; pass --username or run `devtab config set github_username <name>`".into());
    }
    github::validate_username(&username)?;
    Ok(username)
}

pub fn run(action: GithubAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    match action {
        GithubAction::Chart { username, theme } => {
            let username = username_or_configured(username, &config)?;
            let theme = theme.unwrap_or_else(|| config.graph_theme.clone());
            let today = Local::now().date_naive();
            println!("{}", github::chart_url(&username, &theme, today));
        }
        GithubAction::Profile { username } => {
            let username = username_or_configured(username, &config)?;
            println!("{}", github::profile_url(&username));
        }
    }
    Ok(())
}
