use clap::Subcommand;
use waqt_core::{resolve_location, Config, GeocodeClient, LocationError};

#[derive(Subcommand)]
pub enum LocationAction {
    /// Show the coordinates in effect
    Show,
    /// Store fixed coordinates
    Set {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
    /// Reverse-geocode the coordinates to a display name
    Name,
}

pub fn run(action: LocationAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default();
    match action {
        LocationAction::Show => match resolve_location(&config) {
            Ok(loc) => println!("{}, {}", loc.latitude, loc.longitude),
            // Distinct mode, not an error: the rest of the app still
            // serves cached data while location is disabled.
            Err(LocationError::Denied) => println!(
                "location disabled: no coordinates configured; set one with `waqt location set <lat> <lon>`"
            ),
            Err(e) => return Err(e.into()),
        },
        LocationAction::Set {
            latitude,
            longitude,
        } => {
            if !(-90.0..=90.0).contains(&latitude) {
                return Err(format!("latitude {latitude} out of range (-90..=90)").into());
            }
            if !(-180.0..=180.0).contains(&longitude) {
                return Err(format!("longitude {longitude} out of range (-180..=180)").into());
            }
            config.location.latitude = Some(latitude);
            config.location.longitude = Some(longitude);
            config.save()?;
            println!("location set to {latitude}, {longitude}");
        }
        LocationAction::Name => {
            let loc = resolve_location(&config).map_err(|e| match e {
                LocationError::Denied => {
                    format!("{e}; set one with `waqt location set <lat> <lon>`")
                }
                other => other.to_string(),
            })?;
            let geocode = GeocodeClient::new(&config)?;
            let runtime = tokio::runtime::Runtime::new()?;
            let name = runtime.block_on(geocode.display_name(loc.latitude, loc.longitude));
            println!("{name}");
        }
    }
    Ok(())
}
