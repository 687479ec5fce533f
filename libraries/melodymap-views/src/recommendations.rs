//! Recommendations page.

use crate::cycle::{CycleTracker, FetchState};
use crate::error::ViewError;
use melodymap_client::MelodyMapClient;
use melodymap_core::{
    Recommendation, RecommendationLimit, Recommendations, TimeRange, UserProfile,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Everything the recommendations page shows after a successful cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationsData {
    pub profile: UserProfile,
    pub recommendations: Vec<Recommendation>,
}

/// Both selectors of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecommendationSelection {
    /// Range the seed tracks are taken from
    pub time_range: TimeRange,
    /// Number of tracks to ask for
    pub limit: RecommendationLimit,
}

/// Recommendations page controller.
///
/// Works like the home page, with recommendations in place of the top
/// items and a result-limit selector next to the time range.
pub struct RecommendationsView {
    client: Arc<MelodyMapClient>,
    selection: RwLock<RecommendationSelection>,
    state: RwLock<FetchState<RecommendationsData>>,
    cycles: CycleTracker,
}

impl RecommendationsView {
    pub fn new(client: Arc<MelodyMapClient>) -> Self {
        Self {
            client,
            selection: RwLock::new(RecommendationSelection::default()),
            state: RwLock::new(FetchState::default()),
            cycles: CycleTracker::default(),
        }
    }

    pub async fn selection(&self) -> RecommendationSelection {
        *self.selection.read().await
    }

    /// Snapshot of what the page renders
    pub async fn state(&self) -> FetchState<RecommendationsData> {
        self.state.read().await.clone()
    }

    /// Mount the page and run the first cycle.
    pub async fn mount(&self) {
        self.cycles.mount();
        self.refresh().await;
    }

    pub fn unmount(&self) {
        self.cycles.unmount();
    }

    /// Change the seed time range; refetches when mounted.
    pub async fn set_time_range(&self, time_range: TimeRange) {
        self.selection.write().await.time_range = time_range;
        if self.cycles.is_mounted() {
            self.refresh().await;
        }
    }

    /// Change the result limit; refetches when mounted.
    pub async fn set_limit(&self, limit: RecommendationLimit) {
        self.selection.write().await.limit = limit;
        if self.cycles.is_mounted() {
            self.refresh().await;
        }
    }

    /// Run one fetch cycle with the current selection.
    pub async fn refresh(&self) {
        if !self.cycles.is_mounted() {
            return;
        }

        let generation = self.cycles.begin();
        let selection = self.selection().await;
        self.state.write().await.begin();
        debug!(
            time_range = %selection.time_range,
            limit = selection.limit.value(),
            generation,
            "Starting recommendations fetch cycle"
        );

        let (recommendations, profile) = tokio::join!(
            self.client
                .recommendations(selection.time_range, selection.limit),
            self.client.profile(),
        );

        let outcome = assemble(profile, recommendations);

        let mut state = self.state.write().await;
        if !self.cycles.is_current(generation) {
            debug!(generation, "Discarding stale recommendations fetch cycle");
            return;
        }
        state.settle(outcome);
    }
}

fn assemble(
    profile: melodymap_client::Result<UserProfile>,
    recommendations: melodymap_client::Result<Recommendations>,
) -> Result<RecommendationsData, ViewError> {
    Ok(RecommendationsData {
        profile: profile?,
        recommendations: recommendations?.recommendations,
    })
}
