//! Pure scroll geometry: which unit is active, and how each unit looks and
//! sounds for a given viewport. Nothing here touches the DOM.

use crate::config::Tuning;

/// Bounding-rect tops of one video block, relative to the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UnitGeometry {
    pub media_top: f64,
    pub spacer_top: Option<f64>,
}

/// Everything one frame of work needs to know about the page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewportState {
    pub height: f64,
    pub units: Vec<UnitGeometry>,
}

/// Per-frame visual parameters for one unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitFrame {
    /// `None` clears the transform.
    pub scale: Option<f64>,
    pub opacity: f64,
    /// Audio level for the active unit as the next one slides over it.
    pub volume: f64,
}

impl Default for UnitFrame {
    fn default() -> Self {
        Self {
            scale: None,
            opacity: 1.0,
            volume: 1.0,
        }
    }
}

/// Highest index whose top has crossed the activation line, or 0.
pub fn select_active(
    media_tops: impl IntoIterator<Item = f64>,
    viewport_height: f64,
    activation_line: f64,
) -> usize {
    let line = viewport_height * activation_line;
    media_tops
        .into_iter()
        .enumerate()
        .filter(|(_, top)| *top <= line)
        .map(|(i, _)| i)
        .last()
        .unwrap_or(0)
}

/// Whether the next unit's video should be fetched eagerly.
pub fn within_preload_reach(spacer_top: f64, viewport_height: f64, tuning: &Tuning) -> bool {
    spacer_top < viewport_height * tuning.preload_reach
}

/// Opacity of caption and mute affordance as the spacer crosses the fade line.
pub fn caption_opacity(spacer_top: f64, viewport_height: f64, tuning: &Tuning) -> f64 {
    let fade = (viewport_height * tuning.caption_fade_start - spacer_top)
        / (viewport_height * tuning.caption_fade_span);
    1.0 - clamp_unit(fade)
}

/// How far the next unit has slid into view, in `[0, 1]`.
pub fn crossfade_progress(next_top: f64, viewport_height: f64) -> f64 {
    clamp_unit(1.0 - next_top / viewport_height)
}

pub fn crossfade_volume(progress: f64, tuning: &Tuning) -> f64 {
    if progress < tuning.volume_fade_start {
        1.0
    } else if progress < tuning.volume_fade_end {
        1.0 - (progress - tuning.volume_fade_start)
            / (tuning.volume_fade_end - tuning.volume_fade_start)
    } else {
        0.0
    }
}

pub fn unit_frame(progress: f64, tuning: &Tuning) -> UnitFrame {
    UnitFrame {
        scale: (progress > 0.0).then(|| 1.0 - progress * tuning.shrink),
        opacity: 1.0 - progress,
        volume: crossfade_volume(progress, tuning),
    }
}

/// Scrubber position of a pointer over the track, in `[0, 1]`.
pub fn scrub_fraction(pointer_x: f64, track_left: f64, track_width: f64) -> f64 {
    clamp_unit((pointer_x - track_left) / track_width)
}

/// NaN collapses to 0 so a zero-sized viewport or track cannot poison styles.
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VH: f64 = 800.0;

    #[test]
    fn selects_last_unit_past_the_line() {
        assert_eq!(select_active([-900.0, 100.0, 400.0, 1200.0], VH, 0.5), 2);
        assert_eq!(select_active([-1600.0, -800.0, 0.0], VH, 0.5), 2);
    }

    #[test]
    fn defaults_to_first_unit() {
        assert_eq!(select_active([500.0, 1300.0], VH, 0.5), 0);
        assert_eq!(select_active(std::iter::empty(), VH, 0.5), 0);
    }

    #[test]
    fn top_exactly_on_the_line_counts() {
        assert_eq!(select_active([-10.0, 400.0], VH, 0.5), 1);
        assert_eq!(select_active([-10.0, 400.5], VH, 0.5), 0);
    }

    #[test]
    fn preload_reach_is_strict() {
        let tuning = Tuning::default();
        assert!(within_preload_reach(1199.0, VH, &tuning));
        assert!(!within_preload_reach(1200.0, VH, &tuning));
    }

    #[test]
    fn caption_fades_over_thirty_percent_window() {
        let tuning = Tuning::default();
        assert_eq!(caption_opacity(600.0, VH, &tuning), 1.0);
        assert_eq!(caption_opacity(400.0, VH, &tuning), 1.0);
        assert!((caption_opacity(280.0, VH, &tuning) - 0.5).abs() < 1e-9);
        assert_eq!(caption_opacity(160.0, VH, &tuning), 0.0);
        assert_eq!(caption_opacity(-500.0, VH, &tuning), 0.0);
    }

    #[test]
    fn progress_tracks_next_unit_entering() {
        assert_eq!(crossfade_progress(VH, VH), 0.0);
        assert_eq!(crossfade_progress(2.0 * VH, VH), 0.0);
        assert_eq!(crossfade_progress(VH / 2.0, VH), 0.5);
        assert_eq!(crossfade_progress(-100.0, VH), 1.0);
        assert_eq!(crossfade_progress(100.0, 0.0), 0.0);
    }

    #[test]
    fn resting_unit_has_no_transform() {
        let frame = unit_frame(0.0, &Tuning::default());
        assert_eq!(frame, UnitFrame::default());
    }

    #[test]
    fn fully_covered_unit_is_shrunk_and_silent() {
        let frame = unit_frame(1.0, &Tuning::default());
        assert!((frame.scale.unwrap() - 0.88).abs() < 1e-9);
        assert_eq!(frame.opacity, 0.0);
        assert_eq!(frame.volume, 0.0);
    }

    #[test]
    fn volume_ramps_between_thirty_and_fifty_percent() {
        let tuning = Tuning::default();
        assert_eq!(crossfade_volume(0.29, &tuning), 1.0);
        assert_eq!(crossfade_volume(0.3, &tuning), 1.0);
        assert!((crossfade_volume(0.4, &tuning) - 0.5).abs() < 1e-9);
        assert_eq!(crossfade_volume(0.5, &tuning), 0.0);
        assert_eq!(crossfade_volume(0.9, &tuning), 0.0);
    }

    #[test]
    fn crossfade_is_monotonic() {
        let tuning = Tuning::default();
        let mut last = unit_frame(0.0, &tuning);
        for step in 1..=100 {
            let frame = unit_frame(step as f64 / 100.0, &tuning);
            assert!(frame.opacity <= last.opacity);
            assert!(frame.scale.unwrap_or(1.0) <= last.scale.unwrap_or(1.0));
            assert!(frame.volume <= last.volume);
            last = frame;
        }
    }

    #[test]
    fn scrub_fraction_clamps_to_track() {
        assert_eq!(scrub_fraction(50.0, 100.0, 200.0), 0.0);
        assert_eq!(scrub_fraction(200.0, 100.0, 200.0), 0.5);
        assert_eq!(scrub_fraction(900.0, 100.0, 200.0), 1.0);
        assert_eq!(scrub_fraction(100.0, 100.0, 0.0), 0.0);
    }
}
