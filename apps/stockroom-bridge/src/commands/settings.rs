//! Settings commands. Saving replaces the whole value.

use tracing::{debug, info};

use stockroom_core::Settings;

use crate::state::StoreState;

pub async fn get_settings(state: &StoreState) -> Settings {
    debug!("get_settings command");
    state.read().await.settings().clone()
}

pub async fn save_settings(state: &StoreState, settings: Settings) -> Settings {
    debug!("save_settings command");
    let saved = state.write().await.save_settings(settings);
    info!(
        company = %saved.company_name,
        currency = %saved.currency,
        "Settings saved"
    );
    saved
}
