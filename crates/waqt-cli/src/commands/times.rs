use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use waqt_core::{date_range, find_for_date, normalize_time, CacheStore};

#[derive(Args)]
pub struct TimesArgs {
    /// Day to show, yyyy-MM-dd (defaults to today)
    #[arg(long)]
    pub date: Option<String>,
    /// Day offset relative to the chosen date (1 = tomorrow, -1 = yesterday)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i64,
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: TimesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = CacheStore::open()?;
    let cached = store
        .load()
        .ok_or("no cached schedule yet; run `waqt refresh` first")?;

    let base = match &args.date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")?,
        None => Local::now().date_naive(),
    };
    let target = base + Duration::days(args.offset);

    match find_for_date(&cached.schedule, target) {
        Some(day) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&day.prayers())?);
            } else {
                if let Some(place) = &cached.place {
                    println!("{place}");
                }
                println!("{target}");
                for prayer in day.prayers() {
                    let time = normalize_time(&prayer.time).unwrap_or_else(|| "--:--".into());
                    println!("{:<8} {}", prayer.name.as_str(), time);
                }
            }
        }
        // Expected absence: the date is outside the fetched window.
        None => match date_range(&cached.schedule) {
            Some((start, end)) => println!(
                "no times cached for {target}; the cached window covers {start} to {end}"
            ),
            None => println!("no times cached for {target}"),
        },
    }
    Ok(())
}
