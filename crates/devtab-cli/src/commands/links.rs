use clap::Subcommand;
use devtab_core::dashboard::{add_link, edit_link, remove_link};
use devtab_core::{Config, QuickLink};

#[derive(Subcommand)]
pub enum LinksAction {
    /// List quick links
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a quick link
    Add {
        name: String,
        url: String,
        /// Image URL or glyph; empty fetches the site's favicon
        #[arg(long, default_value = "")]
        icon: String,
    },
    /// Replace the quick link at an index
    Edit {
        index: usize,
        name: String,
        url: String,
        #[arg(long, default_value = "")]
        icon: String,
    },
    /// Remove the quick link at an index
    Remove { index: usize },
}

pub fn run(action: LinksAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    match action {
        LinksAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&config.quick_links)?);
            } else {
                for (i, link) in config.quick_links.iter().enumerate() {
                    let icon = if link.icon.is_empty() { "-" } else { link.icon.as_str() };
                    println!("{i:>2}  {:<20} {:<40} {icon}", link.name, link.url);
                }
            }
        }
        LinksAction::Add { name, url, icon } => {
            let link = QuickLink::new(name, url, icon)?;
            add_link(&mut config.quick_links, link);
            config.save()?;
            println!("added #{}", config.quick_links.len() - 1);
        }
        LinksAction::Edit {
            index,
            name,
            url,
            icon,
        } => {
            let link = QuickLink::new(name, url, icon)?;
            edit_link(&mut config.quick_links, index, link)?;
            config.save()?;
            println!("updated #{index}");
        }
        LinksAction::Remove { index } => {
            let removed = remove_link(&mut config.quick_links, index)?;
            config.save()?;
            println!("removed {}", removed.name);
        }
    }
    Ok(())
}
