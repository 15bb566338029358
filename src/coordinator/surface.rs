//! Seams between the coordinator and the page. The browser implementations
//! live in `dom`; tests drive the coordinator through recording fakes.

/// A `<video>` element.
pub trait MediaElement {
    fn is_paused(&self) -> bool;
    fn is_muted(&self) -> bool;
    fn set_muted(&self, muted: bool);
    fn set_volume(&self, volume: f64);
    /// Starts playback. A rejected start is swallowed by the implementation.
    fn play(&self);
    fn pause(&self);
    fn current_time(&self) -> f64;
    fn duration(&self) -> f64;
    fn seek(&self, seconds: f64);
    fn preload_eagerly(&self);
}

/// What a player bar shows; recomputed from the media on every refresh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSnapshot {
    pub current_time: f64,
    pub duration: f64,
    pub paused: bool,
}

impl BarSnapshot {
    pub fn of(media: &impl MediaElement) -> Self {
        Self {
            current_time: media.current_time(),
            duration: media.duration(),
            paused: media.is_paused(),
        }
    }

    /// Progress fill width in percent.
    pub fn progress_percent(&self) -> f64 {
        if self.duration > 0.0 && self.duration.is_finite() {
            self.current_time / self.duration * 100.0
        } else {
            0.0
        }
    }
}

/// The visible parts of one video block other than the video itself.
pub trait UnitView {
    /// Shows or hides caption and mute affordance. Showing also clears any
    /// fade opacity left on them.
    fn set_overlay_visible(&self, visible: bool);
    fn set_overlay_opacity(&self, opacity: f64);
    fn set_bar_active(&self, active: bool);
    fn render_bar(&self, snapshot: BarSnapshot);
    /// `None` clears the transform.
    fn set_media_style(&self, scale: Option<f64>, opacity: f64);
    /// Left edge and width of the scrubber track, in client coordinates.
    fn scrubber_bounds(&self) -> (f64, f64);
    /// Document offset of the media container.
    fn offset_top(&self) -> f64;
}

/// The window the units scroll in.
pub trait Viewport {
    fn height(&self) -> f64;
    fn smooth_scroll_to(&self, top: f64);
}
