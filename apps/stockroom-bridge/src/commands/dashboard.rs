//! Dashboard command: aggregates computed from one consistent snapshot.

use tracing::debug;

use stockroom_core::DashboardSummary;

use crate::state::StoreState;

pub async fn get_dashboard(state: &StoreState) -> DashboardSummary {
    debug!("get_dashboard command");
    let store = state.read().await;
    DashboardSummary::compute(&store.list_products(), &store.list_sales())
}
