use chrono::{Local, Utc};
use clap::Args;
use waqt_core::{
    date_range, resolve_location, should_refresh, CacheStore, CachedSchedule, Config,
    GeocodeClient, LocationError, TimetableClient,
};

#[derive(Args)]
pub struct RefreshArgs {
    /// Refetch even when the cached schedule is still valid here
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: RefreshArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = CacheStore::open()?;

    let current = match resolve_location(&config) {
        Ok(loc) => loc,
        Err(e @ LocationError::Denied) => {
            return Err(format!("{e}; set one with `waqt location set <lat> <lon>`").into());
        }
        Err(e) => return Err(e.into()),
    };

    let cached = store.load();
    if !args.force
        && !should_refresh(
            cached.as_ref(),
            &current,
            config.cache.refresh_threshold_meters,
        )
    {
        println!("cached schedule is still valid for this location; use --force to refetch");
        return Ok(());
    }

    let timetable = TimetableClient::new(&config)?;
    let geocode = GeocodeClient::new(&config)?;
    let timezone = config.timezone();
    let today = Local::now().date_naive();

    // Location is resolved, the gate has spoken; now the one network
    // round trip, awaited sequentially.
    let runtime = tokio::runtime::Runtime::new()?;
    let (fetched, place) = runtime
        .block_on(async {
            let fetched = timetable
                .fetch_window(current.latitude, current.longitude, today, &timezone)
                .await?;
            let place = geocode
                .display_name(fetched.latitude, fetched.longitude)
                .await;
            Ok::<_, waqt_core::FetchError>((fetched, place))
        })
        .map_err(|e| format!("{e}; previous cached data is kept, retry with `waqt refresh`"))?;

    let snapshot = CachedSchedule {
        schedule: fetched.days,
        location: current,
        fetched_at_ms: Utc::now().timestamp_millis(),
        timezone: fetched.timezone,
        place: Some(place),
    };

    if store.replace(&snapshot)? {
        let days = snapshot.schedule.len();
        let place = snapshot.place.as_deref().unwrap_or_default();
        match date_range(&snapshot.schedule) {
            Some((start, end)) => {
                println!("fetched {days} day(s) covering {start} to {end} for {place}")
            }
            None => println!("fetched {days} day(s) for {place}"),
        }
    } else {
        println!("discarded response: a newer fetch has already been applied");
    }
    Ok(())
}
