use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use voiceguide::{
    AppState, CompletionService, DubaiAssistant, Gazetteer, LocationService, OpenAiClient,
    VERSION, VoiceGuideConfig, logging, web,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = VoiceGuideConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging)?;

    info!("Starting VoiceGuide v{}", VERSION);

    let completion: Arc<dyn CompletionService> =
        Arc::new(OpenAiClient::new(&config).context("Failed to build completion client")?);

    let gazetteer = match &config.locations.gazetteer_path {
        Some(path) => Gazetteer::from_json_file(path).context("Failed to load gazetteer")?,
        None => Gazetteer::dubai(),
    };
    info!("Gazetteer ready with {} entries", gazetteer.len());
    let gazetteer = Arc::new(gazetteer);

    let state = AppState {
        assistant: Arc::new(DubaiAssistant::new(
            completion.clone(),
            config.assistant.clone(),
        )),
        locations: Arc::new(LocationService::new(
            completion,
            gazetteer,
            &config.locations,
            config.map.clone(),
        )),
        maps_api_key: config.maps.google_api_key.clone(),
    };

    web::run(&config.server, state).await
}
