//! Home page: profile, top artists and top tracks.

use crate::cycle::{CycleTracker, FetchState};
use crate::error::ViewError;
use melodymap_client::MelodyMapClient;
use melodymap_core::{Artist, TimeRange, TopItems, Track, UserProfile, HOME_TOP_ITEMS_LIMIT};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Everything the home page shows after a successful cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeData {
    pub profile: UserProfile,
    /// Ranked, as returned by the backend
    pub top_artists: Vec<Artist>,
    /// Ranked, as returned by the backend
    pub top_tracks: Vec<Track>,
}

/// Home page controller.
///
/// Each cycle fetches the profile, top artists and top tracks together
/// for the selected time range. The page shows all three or, if any call
/// fails, only the generic failure message.
pub struct HomeView {
    client: Arc<MelodyMapClient>,
    time_range: RwLock<TimeRange>,
    state: RwLock<FetchState<HomeData>>,
    cycles: CycleTracker,
}

impl HomeView {
    /// Create an unmounted view with the default time range.
    pub fn new(client: Arc<MelodyMapClient>) -> Self {
        Self {
            client,
            time_range: RwLock::new(TimeRange::default()),
            state: RwLock::new(FetchState::default()),
            cycles: CycleTracker::default(),
        }
    }

    /// Selected time range
    pub async fn time_range(&self) -> TimeRange {
        *self.time_range.read().await
    }

    /// Snapshot of what the page renders
    pub async fn state(&self) -> FetchState<HomeData> {
        self.state.read().await.clone()
    }

    /// Mount the page and run the first cycle.
    pub async fn mount(&self) {
        self.cycles.mount();
        self.refresh().await;
    }

    /// Unmount the page. Cycles still in flight are discarded when they land.
    pub fn unmount(&self) {
        self.cycles.unmount();
    }

    /// Change the time range and, when mounted, start a new cycle with it.
    pub async fn set_time_range(&self, time_range: TimeRange) {
        *self.time_range.write().await = time_range;
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
        let time_range = self.time_range().await;
        self.state.write().await.begin();
        debug!(time_range = %time_range, generation, "Starting home fetch cycle");

        let (profile, artists, tracks) = tokio::join!(
            self.client.profile(),
            self.client.top_artists(time_range, HOME_TOP_ITEMS_LIMIT),
            self.client.top_tracks(time_range, HOME_TOP_ITEMS_LIMIT),
        );

        let outcome = assemble(profile, artists, tracks);

        let mut state = self.state.write().await;
        if !self.cycles.is_current(generation) {
            debug!(generation, "Discarding stale home fetch cycle");
            return;
        }
        state.settle(outcome);
    }
}

fn assemble(
    profile: melodymap_client::Result<UserProfile>,
    artists: melodymap_client::Result<TopItems<Artist>>,
    tracks: melodymap_client::Result<TopItems<Track>>,
) -> Result<HomeData, ViewError> {
    Ok(HomeData {
        profile: profile?,
        top_artists: artists?.items,
        top_tracks: tracks?.items,
    })
}
