//! Scroll-driven video coordination.
//!
//! Every DOM event the video section cares about becomes one [`Command`];
//! [`Coordinator::dispatch`] applies it to the single piece of state that
//! tracks which unit is active and how each one is presented.

pub mod dom;
pub mod geometry;
pub mod surface;

use crate::config::Tuning;
use geometry::{
    caption_opacity, crossfade_progress, scrub_fraction, select_active, unit_frame,
    within_preload_reach, ViewportState,
};
use surface::{BarSnapshot, MediaElement, UnitView, Viewport};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Muted playback with caption and mute affordance on top.
    #[default]
    Ambient,
    /// Audible playback with the transport bar.
    Player,
}

/// One DOM event, already reduced to what the coordinator needs.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    ScrollTick(ViewportState),
    /// Play/pause button on a unit's bar.
    TogglePlayback(usize),
    /// Click on the video area outside the bar and mute affordance.
    MediaClick(usize),
    /// Click on a mute affordance; always applies to the active unit.
    MuteButton,
    ScrubBegin { index: usize, pointer_x: f64 },
    ScrubMove { pointer_x: f64 },
    ScrubEnd,
    TimeUpdate(usize),
    /// The media fired `play` or `pause`.
    PlaybackChanged(usize),
    MetadataLoaded(usize),
}

pub struct VideoUnit<M, V> {
    index: usize,
    media: M,
    view: V,
    mode: Mode,
    preloaded: bool,
    start_offset: Option<f64>,
    start_applied: bool,
}

impl<M: MediaElement, V: UnitView> VideoUnit<M, V> {
    pub fn new(index: usize, media: M, view: V, start_offset: Option<f64>) -> Self {
        Self {
            index,
            media,
            view,
            mode: Mode::Ambient,
            preloaded: false,
            start_offset,
            start_applied: false,
        }
    }

    fn enter_player_mode(&mut self) {
        self.view.set_overlay_visible(false);
        self.view.set_bar_active(true);
        self.mode = Mode::Player;
    }

    fn exit_player_mode(&mut self) {
        self.view.set_overlay_visible(true);
        self.view.set_bar_active(false);
        self.mode = Mode::Ambient;
    }

    fn render_bar(&self) {
        self.view.render_bar(BarSnapshot::of(&self.media));
    }
}

pub struct Coordinator<M, V, W> {
    units: Vec<VideoUnit<M, V>>,
    viewport: W,
    tuning: Tuning,
    active_index: usize,
    is_muted: bool,
    scrubbing: Option<usize>,
}

impl<M: MediaElement, V: UnitView, W: Viewport> Coordinator<M, V, W> {
    pub fn new(units: Vec<VideoUnit<M, V>>, viewport: W, tuning: Tuning) -> Self {
        Self {
            units,
            viewport,
            tuning,
            active_index: 0,
            is_muted: true,
            scrubbing: None,
        }
    }

    /// Initial playback: only the first unit runs, muted.
    pub fn start(&self) {
        for unit in &self.units {
            unit.media.set_muted(true);
            if unit.index == 0 {
                unit.media.play();
            } else {
                unit.media.pause();
            }
        }
    }

    #[cfg(test)]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    #[cfg(test)]
    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    pub fn mode(&self, index: usize) -> Option<Mode> {
        self.units.get(index).map(|u| u.mode)
    }

    #[cfg(test)]
    pub fn is_preloaded(&self, index: usize) -> bool {
        self.units.get(index).is_some_and(|u| u.preloaded)
    }

    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::ScrollTick(viewport) => self.scroll_tick(&viewport),
            Command::TogglePlayback(index) => self.toggle_playback(index),
            Command::MediaClick(index) => self.media_click(index),
            Command::MuteButton => self.unmute(self.active_index),
            Command::ScrubBegin { index, pointer_x } => {
                self.scrubbing = Some(index);
                self.seek_to_pointer(index, pointer_x);
            }
            Command::ScrubMove { pointer_x } => {
                if let Some(index) = self.scrubbing {
                    self.seek_to_pointer(index, pointer_x);
                }
            }
            Command::ScrubEnd => self.scrubbing = None,
            Command::TimeUpdate(index) => {
                if let Some(unit) = self.units.get(index) {
                    if unit.mode == Mode::Player {
                        unit.render_bar();
                    }
                }
            }
            Command::PlaybackChanged(index) => {
                if let Some(unit) = self.units.get(index) {
                    unit.render_bar();
                }
            }
            Command::MetadataLoaded(index) => self.apply_start_offset(index),
        }
    }

    fn scroll_tick(&mut self, viewport: &ViewportState) {
        if self.units.is_empty() {
            return;
        }
        let selected = select_active(
            viewport.units.iter().map(|u| u.media_top),
            viewport.height,
            self.tuning.activation_line,
        );
        self.set_active(selected.min(self.units.len() - 1));
        self.render_transitions(viewport);
    }

    fn set_active(&mut self, next: usize) {
        // Same unit: leave playback alone so a manual pause sticks.
        if next == self.active_index {
            return;
        }
        let sticky = self.tuning.sticky_player_mode;

        for unit in self.units.iter_mut() {
            if unit.index == next {
                if unit.mode == Mode::Player {
                    // Volume comes back through the crossfade as scrolling settles.
                    unit.media.set_muted(false);
                    unit.media.set_volume(0.0);
                    self.is_muted = false;
                    unit.media.play();
                    unit.render_bar();
                } else {
                    unit.media.set_muted(true);
                    unit.media.play();
                }
            } else {
                unit.media.pause();
                unit.media.set_muted(true);
                if !sticky && unit.mode == Mode::Player {
                    unit.exit_player_mode();
                }
            }
        }

        log::debug!("active video {} -> {}", self.active_index, next);
        self.is_muted = true;
        self.active_index = next;
    }

    fn render_transitions(&mut self, viewport: &ViewportState) {
        let height = viewport.height;
        let last = self.units.len() - 1;

        for i in 0..self.units.len() {
            let Some(geometry) = viewport.units.get(i) else {
                break;
            };

            if let Some(spacer_top) = geometry.spacer_top {
                if i < last
                    && !self.units[i + 1].preloaded
                    && within_preload_reach(spacer_top, height, &self.tuning)
                {
                    let next = &mut self.units[i + 1];
                    next.media.preload_eagerly();
                    next.preloaded = true;
                    log::debug!("preloading video {}", next.index);
                }

                self.units[i]
                    .view
                    .set_overlay_opacity(caption_opacity(spacer_top, height, &self.tuning));
            }

            if i == last {
                continue;
            }
            let Some(next_geometry) = viewport.units.get(i + 1) else {
                continue;
            };
            let frame = unit_frame(
                crossfade_progress(next_geometry.media_top, height),
                &self.tuning,
            );
            let unit = &self.units[i];
            unit.view.set_media_style(frame.scale, frame.opacity);
            if i == self.active_index && !unit.media.is_muted() {
                unit.media.set_volume(frame.volume);
            }
        }
    }

    fn toggle_playback(&mut self, index: usize) {
        let Some(unit) = self.units.get(index) else {
            return;
        };
        if unit.media.is_paused() {
            unit.media.set_muted(false);
            unit.media.set_volume(1.0);
            self.is_muted = false;
            unit.media.play();
        } else {
            unit.media.pause();
        }
    }

    fn media_click(&mut self, index: usize) {
        match self.mode(index) {
            Some(Mode::Player) => self.toggle_playback(index),
            Some(Mode::Ambient) => self.unmute(index),
            None => {}
        }
    }

    /// Ambient to Player: restart with sound, then ease the page toward the
    /// next unit so a short scroll starts the next transition.
    fn unmute(&mut self, index: usize) {
        let Some(unit) = self.units.get_mut(index) else {
            return;
        };
        self.is_muted = false;
        unit.media.set_muted(false);
        unit.media.set_volume(1.0);
        unit.media.seek(0.0);
        unit.media.play();
        unit.enter_player_mode();

        if let Some(next) = self.units.get(index + 1) {
            let target = next.view.offset_top()
                - self.viewport.height()
                - self.tuning.unmute_scroll_margin;
            self.viewport.smooth_scroll_to(target.max(0.0));
        }
    }

    fn seek_to_pointer(&self, index: usize, pointer_x: f64) {
        let Some(unit) = self.units.get(index) else {
            return;
        };
        let duration = unit.media.duration();
        if !(duration.is_finite() && duration > 0.0) {
            return;
        }
        let (left, width) = unit.view.scrubber_bounds();
        unit.media.seek(scrub_fraction(pointer_x, left, width) * duration);
        unit.render_bar();
    }

    fn apply_start_offset(&mut self, index: usize) {
        let Some(unit) = self.units.get_mut(index) else {
            return;
        };
        if unit.start_applied {
            return;
        }
        unit.start_applied = true;
        if let Some(start) = unit.start_offset.filter(|s| s.is_finite() && *s != 0.0) {
            unit.media.seek(start);
        }
    }
}
