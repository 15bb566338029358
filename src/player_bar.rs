use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew_icons::{Icon, IconId};

use crate::coordinator::surface::BarSnapshot;

/// `m:ss`; anything non-finite reads as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "0:00".to_string();
    }
    let whole = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

pub fn time_label(snapshot: &BarSnapshot) -> String {
    format!(
        "{} / {}",
        format_time(snapshot.current_time),
        format_time(snapshot.duration)
    )
}

/// Nodes of one player bar the coordinator writes to.
#[derive(Clone, Default, PartialEq)]
pub struct BarRefs {
    pub root: NodeRef,
    pub scrubber: NodeRef,
    pub progress: NodeRef,
    pub time: NodeRef,
    pub icon_play: NodeRef,
    pub icon_pause: NodeRef,
}

#[derive(Properties, PartialEq, Clone)]
pub struct PlayerBarProps {
    pub refs: BarRefs,
    pub on_toggle: Callback<()>,
    /// Pointer went down on the scrubber, with its client x.
    pub on_scrub_begin: Callback<f64>,
    pub on_scrub_move: Callback<f64>,
    pub on_scrub_end: Callback<()>,
}

fn first_touch_x(e: &TouchEvent) -> Option<f64> {
    e.touches().get(0).map(|t| t.client_x() as f64)
}

#[function_component(PlayerBar)]
pub fn player_bar(props: &PlayerBarProps) -> Html {
    let refs = &props.refs;

    let on_toggle_click = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_: MouseEvent| on_toggle.emit(()))
    };

    let on_mouse_down = {
        let on_scrub_begin = props.on_scrub_begin.clone();
        Callback::from(move |e: MouseEvent| on_scrub_begin.emit(e.client_x() as f64))
    };

    let on_touch_start = {
        let on_scrub_begin = props.on_scrub_begin.clone();
        Callback::from(move |e: TouchEvent| {
            if let Some(x) = first_touch_x(&e) {
                on_scrub_begin.emit(x);
            }
        })
    };

    let on_touch_move = {
        let on_scrub_move = props.on_scrub_move.clone();
        Callback::from(move |e: TouchEvent| {
            if let Some(x) = first_touch_x(&e) {
                on_scrub_move.emit(x);
            }
        })
    };

    let on_touch_end = {
        let on_scrub_end = props.on_scrub_end.clone();
        Callback::from(move |_: TouchEvent| on_scrub_end.emit(()))
    };

    html! {
        <div class="video-player-bar" ref={refs.root.clone()}>
            <button class="video-player-bar__btn" type="button" aria-label="Pause" onclick={on_toggle_click}>
                <span class="icon-pause" ref={refs.icon_pause.clone()}>
                    <Icon icon_id={IconId::LucidePause} width={"20"} height={"20"} />
                </span>
                <span class="icon-play" ref={refs.icon_play.clone()} style="display: none;">
                    <Icon icon_id={IconId::LucidePlay} width={"20"} height={"20"} />
                </span>
            </button>
            <div
                class="video-player-bar__scrubber"
                ref={refs.scrubber.clone()}
                onmousedown={on_mouse_down}
                ontouchstart={on_touch_start}
                ontouchmove={on_touch_move}
                ontouchend={on_touch_end}
            >
                <div class="video-player-bar__track">
                    <div class="video-player-bar__progress" ref={refs.progress.clone()}></div>
                </div>
            </div>
            <span class="video-player-bar__time" ref={refs.time.clone()}>{"0:00 / 0:00"}</span>
        </div>
    }
}

/// Whether a click landed on the bar or the mute affordance rather than on
/// the video itself.
pub fn is_control_click(e: &MouseEvent) -> bool {
    e.target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest(".video-player-bar, .video-block__mute").ok().flatten())
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(59.99), "0:59");
        assert_eq!(format_time(600.0), "10:00");
        assert_eq!(format_time(3725.4), "62:05");
    }

    #[test]
    fn non_finite_time_reads_as_zero() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
        assert_eq!(format_time(f64::NEG_INFINITY), "0:00");
    }

    #[test]
    fn label_and_progress_follow_snapshot() {
        let snapshot = BarSnapshot {
            current_time: 30.0,
            duration: 120.0,
            paused: false,
        };
        assert_eq!(time_label(&snapshot), "0:30 / 2:00");
        assert_eq!(snapshot.progress_percent(), 25.0);
    }

    #[test]
    fn unknown_duration_shows_empty_bar() {
        let snapshot = BarSnapshot {
            current_time: 4.0,
            duration: f64::NAN,
            paused: true,
        };
        assert_eq!(time_label(&snapshot), "0:04 / 0:00");
        assert_eq!(snapshot.progress_percent(), 0.0);
    }
}
