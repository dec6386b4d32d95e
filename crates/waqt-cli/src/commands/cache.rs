use clap::Subcommand;
use waqt_core::{
    date_range, distance_meters, resolve_location, should_refresh, CacheStore, Config,
};

#[derive(Subcommand)]
pub enum CacheAction {
    /// Show slot metadata and the gate verdict for the current location
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove the cached schedule
    Clear,
}

pub fn run(action: CacheAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = CacheStore::open()?;
    match action {
        CacheAction::Status { json } => {
            let Some(cached) = store.load() else {
                println!("no cached schedule");
                return Ok(());
            };

            let config = Config::load_or_default();
            let fetched_at = chrono::DateTime::from_timestamp_millis(cached.fetched_at_ms)
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| cached.fetched_at_ms.to_string());
            let window = date_range(&cached.schedule);
            let gate = resolve_location(&config).ok().map(|current| {
                let distance = distance_meters(&cached.location, &current);
                let refresh = should_refresh(
                    Some(&cached),
                    &current,
                    config.cache.refresh_threshold_meters,
                );
                (distance, refresh)
            });

            if json {
                let payload = serde_json::json!({
                    "fetched_at": fetched_at,
                    "days": cached.schedule.len(),
                    "window": window.map(|(s, e)| [s.to_string(), e.to_string()]),
                    "timezone": cached.timezone,
                    "place": cached.place,
                    "location": cached.location,
                    "distance_meters": gate.map(|(d, _)| d),
                    "needs_refresh": gate.map(|(_, r)| r),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("fetched at: {fetched_at}");
                println!("days cached: {}", cached.schedule.len());
                if let Some((start, end)) = window {
                    println!("window: {start} to {end}");
                }
                println!("timezone: {}", cached.timezone);
                if let Some(place) = &cached.place {
                    println!("place: {place}");
                }
                match gate {
                    Some((distance, refresh)) => {
                        println!("distance from here: {:.0} m", distance);
                        println!("needs refresh: {refresh}");
                    }
                    None => println!("needs refresh: unknown (location disabled)"),
                }
            }
        }
        CacheAction::Clear => {
            store.clear()?;
            println!("cache cleared");
        }
    }
    Ok(())
}
