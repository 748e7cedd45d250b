use clap::Args;
use devtab_core::dashboard::navigate;
use devtab_core::{Config, SearchEngine};

#[derive(Args)]
pub struct SearchArgs {
    /// Query text or URL
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,
    /// Engine to use instead of the configured one (google, claude, chatgpt, stackoverflow)
    #[arg(long)]
    engine: Option<SearchEngine>,
}

pub fn run(args: SearchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = match args.engine {
        Some(engine) => engine,
        None => Config::load_or_default().search_engine,
    };
    let query = args.query.join(" ");
    match navigate(&query, engine) {
        Some(url) => println!("{url}"),
        None => return Err("empty query".into()),
    }
    Ok(())
}
