use climascope::{Climascope, Coordinate, QueryOutcome};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let api_key = std::env::var("OPENWEATHER_API_KEY")?;
    let raster_url = std::env::var("KOPPEN_RASTER_URL")?;

    let client = Climascope::builder().api_key(api_key).build();
    if let Err(e) = client.load_raster(&raster_url).await {
        eprintln!("climate raster unavailable: {e}");
    }

    print_outcome(client.query_by_name("Ho Chi Minh City").await?);

    let mid_pacific = Coordinate::new(0.0, 160.0).expect("valid coordinate");
    print_outcome(client.query_by_coordinate(mid_pacific).await?);

    Ok(())
}

fn print_outcome(outcome: QueryOutcome) {
    let QueryOutcome::Complete(report) = outcome else {
        println!("query did not produce a report: {outcome:?}");
        return;
    };
    println!(
        "{}, {} ({})",
        report.identity.localized_name, report.identity.country_code, report.coordinate
    );
    match report.climate {
        Some(class) => println!("  climate: {class}"),
        None => println!("  climate: Unknown"),
    }
    if let Some(elevation) = report.elevation {
        println!("  elevation: {elevation}");
    }
    if let Some(weather) = report.weather {
        println!(
            "  {} / feels like {}, {} ({:?})",
            weather.temperature, weather.feels_like, weather.description, weather.condition
        );
        println!(
            "  humidity {}%, wind {:.1} m/s ({:.1} km/h), precipitation {} mm",
            weather.humidity,
            weather.wind_speed,
            weather.wind_speed_kmh(),
            weather.precipitation
        );
    }
}
