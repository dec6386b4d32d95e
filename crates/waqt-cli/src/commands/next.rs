use chrono::{Duration, Local};
use clap::Args;
use waqt_core::{
    find_for_date, format_countdown, normalize_time, refresh_interval, time_until,
    upcoming_prayer, CacheStore, CachedSchedule, Prayer,
};

#[derive(Args)]
pub struct NextArgs {
    /// Keep printing; ticks once per second inside the final minute,
    /// once per minute otherwise
    #[arg(long)]
    pub watch: bool,
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: NextArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = CacheStore::open()?;
    let cached = store
        .load()
        .ok_or("no cached schedule yet; run `waqt refresh` first")?;

    loop {
        let interval = print_once(&cached, args.json)?;
        if !args.watch {
            return Ok(());
        }
        std::thread::sleep(interval);
    }
}

fn print_once(
    cached: &CachedSchedule,
    json: bool,
) -> Result<std::time::Duration, Box<dyn std::error::Error>> {
    let now = Local::now();
    let today = now.date_naive();
    let now_time = now.time();

    let Some(day) = find_for_date(&cached.schedule, today) else {
        println!("today is outside the cached window; run `waqt refresh`");
        return Ok(std::time::Duration::from_secs(60));
    };
    let prayers = day.prayers();

    if let Some(prayer) = upcoming_prayer(&prayers, now_time) {
        let remaining = time_until(prayer, now_time).unwrap_or_else(Duration::zero);
        if json {
            let payload = serde_json::json!({
                "prayer": prayer.name.as_str(),
                "time": normalize_time(&prayer.time),
                "countdown": format_countdown(remaining),
                "fallback": false,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        } else {
            println!(
                "{} at {} (in {})",
                prayer.name.as_str(),
                normalize_time(&prayer.time).unwrap_or_default(),
                format_countdown(remaining)
            );
        }
        return Ok(refresh_interval(remaining));
    }

    // All prayed through for the day: fall back to tomorrow's first prayer.
    let tomorrow = today + Duration::days(1);
    let first: Option<Prayer> = find_for_date(&cached.schedule, tomorrow).and_then(|d| {
        d.prayers()
            .iter()
            .find(|p| normalize_time(&p.time).is_some())
            .cloned()
    });

    match first {
        Some(prayer) => {
            if json {
                let payload = serde_json::json!({
                    "prayer": prayer.name.as_str(),
                    "time": normalize_time(&prayer.time),
                    "date": tomorrow.to_string(),
                    "fallback": true,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!(
                    "all prayers for today have passed; next is {} tomorrow at {}",
                    prayer.name.as_str(),
                    normalize_time(&prayer.time).unwrap_or_default()
                );
            }
        }
        None => println!(
            "all prayers for today have passed and tomorrow is outside the cached window; run `waqt refresh`"
        ),
    }
    Ok(std::time::Duration::from_secs(60))
}
