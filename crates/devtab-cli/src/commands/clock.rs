use chrono::Local;
use clap::Args;
use devtab_core::{ClockFace, ClockFormat, Config};

#[derive(Args)]
pub struct ClockArgs {
    /// 12 or 24 hour display (defaults to the configured format)
    #[arg(long)]
    format: Option<ClockFormat>,
    /// Show seconds
    #[arg(long)]
    seconds: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ClockArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let format = args.format.unwrap_or(config.clock_format);
    let face = ClockFace::at(&Local::now(), format, args.seconds || config.show_seconds);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&face)?);
    } else {
        println!("{}", face.time());
        println!("{}", face.date);
    }
    Ok(())
}
