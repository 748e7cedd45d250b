use clap::Subcommand;
use devtab_core::{resolve, Config, IconSpec};

#[derive(Subcommand)]
pub enum IconAction {
    /// Resolve the icon candidates for a link
    Resolve {
        /// Link target URL
        url: String,
        /// Declared icon: image URL, rooted path or glyph
        #[arg(long, default_value = "")]
        icon: String,
    },
    /// Resolve the icons of every configured quick link
    Links,
}

pub fn run(action: IconAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        IconAction::Resolve { url, icon } => {
            let resolution = resolve(&IconSpec::new(icon, url));
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        }
        IconAction::Links => {
            let config = Config::load()?;
            let out: Vec<serde_json::Value> = config
                .quick_links
                .iter()
                .map(|link| {
                    serde_json::json!({
                        "name": link.name,
                        "url": link.url,
                        "candidates": link.resolve_icon(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
