use garmin_connect_client::{ConnectClient, config::Config, http_client::ReqwestConnectClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::from_env()?;
    let client = ReqwestConnectClient::from_config(&cfg)?;

    let display_name = std::env::args().nth(1);
    let limit = std::env::var("GARMIN_CONNECT_LIMIT")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(5);

    let activities = client
        .activities(display_name.as_deref(), 0, limit)
        .await
        .map_err(|e| format!("failed to fetch activities: {}", e))?;

    if activities.is_empty() {
        println!("No activities returned (check display name or session)");
        return Ok(());
    }

    println!("Activities (limit {}):", limit);
    for a in activities {
        println!("- {} {}", a.id, a.activity_name);
    }

    Ok(())
}
