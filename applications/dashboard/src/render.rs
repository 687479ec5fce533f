//! Plain-text rendering of dashboard screens.

use crate::app::{Page, Screen, Visit};
use melodymap_core::{RecommendationLimit, Route, TimeRange};
use melodymap_views::{
    FetchState, Layout, ENTRY_PROMPT, ENTRY_TITLE, PROCESSING_MESSAGE, SIGN_IN_LABEL,
};
use std::fmt;

const RULE: &str = "----------------------------------------";

impl fmt::Display for Visit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for screen in &self.screens {
            write!(f, "{}", screen)?;
        }
        if let Some(url) = &self.redirect {
            writeln!(f, "Redirecting to {}", url)?;
        }
        Ok(())
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", LayoutView(&self.layout))?;
        writeln!(f, "{}", RULE)?;
        write_page(f, &self.page)?;
        writeln!(f)
    }
}

/// Header and navigation of the layout shell.
pub struct LayoutView<'a>(pub &'a Layout);

impl fmt::Display for LayoutView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = self.0;
        write!(f, "MelodyMap  {}", layout.route)?;
        if let Some(action) = layout.header_action {
            write!(f, "  [{}]", action.label())?;
        }
        writeln!(f)?;

        if !layout.links.is_empty() {
            let links: Vec<_> = layout
                .links
                .iter()
                .map(|route| format!("{} ({})", route.title(), route.path()))
                .collect();
            writeln!(f, "Links: {}", links.join(" | "))?;
        }
        writeln!(f, "Menu: [{}]", layout.nav_action.label())
    }
}

/// Output of the `status` command.
pub struct StatusReport<'a>(pub &'a Layout);

impl fmt::Display for StatusReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", LayoutView(self.0))?;
        let signed_in = if self.0.authenticated { "yes" } else { "no" };
        writeln!(f, "Signed in: {}", signed_in)
    }
}

fn write_page(f: &mut fmt::Formatter<'_>, page: &Page) -> fmt::Result {
    match page {
        Page::Entry {
            is_loading,
            login_url,
        } => {
            writeln!(f, "{}", ENTRY_TITLE)?;
            writeln!(f, "{}", ENTRY_PROMPT)?;
            if *is_loading {
                writeln!(f, "[{}] ... opening {}", SIGN_IN_LABEL, login_url)
            } else {
                writeln!(f, "[{}]", SIGN_IN_LABEL)
            }
        }
        Page::Callback { state } => match state.message() {
            Some(message) => writeln!(f, "{}", message),
            None => writeln!(f, "{}", PROCESSING_MESSAGE),
        },
        Page::Home { time_range, state } => write_fetch(f, state, |f, data| {
            write_welcome(f, &data.profile.display_name, data.profile.avatar_url())?;
            write_time_range(f, "Select Time Range", *time_range)?;

            writeln!(f, "Your Top Artists")?;
            for (rank, artist) in data.top_artists.iter().enumerate() {
                write!(f, "  {:>2}. {}", rank + 1, artist.name)?;
                write_image(f, artist.image_url())?;
            }

            writeln!(f, "Your Top Tracks")?;
            for (rank, track) in data.top_tracks.iter().enumerate() {
                write!(f, "  {:>2}. {}", rank + 1, track.name)?;
                if let Some(artist) = track.primary_artist() {
                    write!(f, " - {}", artist)?;
                }
                write_image(f, track.album_art_url())?;
            }

            writeln!(
                f,
                "[View Recommendations] {}",
                Route::Recommendations.path()
            )
        }),
        Page::Recommendations { selection, state } => write_fetch(f, state, |f, data| {
            write_welcome(f, &data.profile.display_name, data.profile.avatar_url())?;
            writeln!(f, "Recommended Tracks")?;
            write_time_range(f, "Seed Tracks Time Range", selection.time_range)?;
            write_limit(f, selection.limit)?;

            for track in &data.recommendations {
                write!(f, "  {}", track.name)?;
                if let Some(artist) = track.primary_artist() {
                    write!(f, " - {}", artist)?;
                }
                write_image(f, track.album_art_url())?;
            }
            Ok(())
        }),
        Page::Playlists { state } => write_fetch(f, state, |f, playlists| {
            writeln!(f, "Your Playlists")?;
            for playlist in &playlists.items {
                writeln!(f, "  {} ({} tracks)", playlist.name, playlist.tracks.total)?;
            }
            Ok(())
        }),
        Page::RecentlyPlayed { state } => write_fetch(f, state, |f, recent| {
            writeln!(f, "Recently Played")?;
            for play in &recent.items {
                write!(f, "  {} {}", play.played_at, play.track.name)?;
                if let Some(artist) = play.track.primary_artist() {
                    write!(f, " - {}", artist)?;
                }
                writeln!(f)?;
            }
            Ok(())
        }),
        Page::Guarded => Ok(()),
    }
}

fn write_fetch<T>(
    f: &mut fmt::Formatter<'_>,
    state: &FetchState<T>,
    body: impl FnOnce(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    if let Some(error) = &state.error {
        return writeln!(f, "{}", error);
    }
    if state.is_loading {
        writeln!(f, "Loading...")?;
    }
    match &state.data {
        Some(data) => body(f, data),
        None => Ok(()),
    }
}

fn write_welcome(
    f: &mut fmt::Formatter<'_>,
    display_name: &str,
    avatar: Option<&str>,
) -> fmt::Result {
    write!(f, "Welcome, {}", display_name)?;
    write_image(f, avatar)
}

fn write_image(f: &mut fmt::Formatter<'_>, url: Option<&str>) -> fmt::Result {
    match url {
        Some(url) => writeln!(f, "  <{}>", url),
        None => writeln!(f),
    }
}

fn write_time_range(f: &mut fmt::Formatter<'_>, label: &str, selected: TimeRange) -> fmt::Result {
    let options: Vec<_> = TimeRange::ALL
        .iter()
        .map(|range| mark(range.label(), *range == selected))
        .collect();
    writeln!(f, "{}: {}", label, options.join("  "))
}

fn write_limit(f: &mut fmt::Formatter<'_>, selected: RecommendationLimit) -> fmt::Result {
    let options: Vec<_> = RecommendationLimit::ALL
        .iter()
        .map(|limit| mark(&limit.label(), *limit == selected))
        .collect();
    writeln!(f, "Number of Recommendations: {}", options.join("  "))
}

fn mark(label: &str, selected: bool) -> String {
    if selected {
        format!("(*) {}", label)
    } else {
        format!("( ) {}", label)
    }
}
