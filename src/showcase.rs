use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::Window;
use yew::prelude::*;
use yew_icons::{Icon, IconId};

use crate::config::{Tuning, VideoSource};
use crate::coordinator::dom::{measure, DomMedia, DomUnitView, DomViewport, UnitRefs};
use crate::coordinator::{Command, Coordinator, VideoUnit};
use crate::error::ShowcaseError;
use crate::frame_gate::{FrameGate, RafScheduler};
use crate::player_bar::{is_control_click, PlayerBar};

type DomCoordinator = Coordinator<DomMedia, DomUnitView, DomViewport>;
type CoordinatorSlot = Rc<RefCell<Option<DomCoordinator>>>;

fn send(slot: &CoordinatorSlot, command: Command) {
    match slot.try_borrow_mut() {
        Ok(mut coordinator) => {
            if let Some(coordinator) = coordinator.as_mut() {
                coordinator.dispatch(command);
            }
        }
        Err(_) => log::warn!("skipping re-entrant {:?}", command),
    }
}

fn dispatcher<E: 'static>(
    slot: &CoordinatorSlot,
    to_command: impl Fn(E) -> Command + 'static,
) -> Callback<E> {
    let slot = slot.clone();
    Callback::from(move |e: E| send(&slot, to_command(e)))
}

fn build_coordinator(
    window: &Window,
    refs: &[UnitRefs],
    videos: &[VideoSource],
    tuning: Tuning,
) -> Result<DomCoordinator, ShowcaseError> {
    let units = refs
        .iter()
        .zip(videos)
        .enumerate()
        .map(|(i, (refs, source))| {
            let (media, view) = refs.bind()?;
            Ok(VideoUnit::new(i, media, view, source.start))
        })
        .collect::<Result<Vec<_>, ShowcaseError>>()?;
    Ok(Coordinator::new(units, DomViewport::new(window.clone()), tuning))
}

/// Window-level listeners: the frame-gated scroll tick, and scrubber drags
/// that leave the track.
fn attach_listeners(
    window: &Window,
    refs: Rc<Vec<UnitRefs>>,
    slot: &CoordinatorSlot,
) -> Vec<EventListener> {
    let gate = {
        let window = window.clone();
        let slot = slot.clone();
        FrameGate::new(RafScheduler::default(), move |scroll_y: f64| {
            log::trace!("scroll frame at {scroll_y}");
            send(&slot, Command::ScrollTick(measure(&window, &refs)));
        })
    };

    let on_scroll = {
        let window_for_scroll = window.clone();
        EventListener::new(window, "scroll", move |_| {
            gate.offer(window_for_scroll.scroll_y().unwrap_or_default());
        })
    };

    let on_mouse_move = {
        let slot = slot.clone();
        EventListener::new(window, "mousemove", move |e| {
            if let Some(e) = e.dyn_ref::<MouseEvent>() {
                send(
                    &slot,
                    Command::ScrubMove {
                        pointer_x: e.client_x() as f64,
                    },
                );
            }
        })
    };

    let on_mouse_up = {
        let slot = slot.clone();
        EventListener::new(window, "mouseup", move |_| send(&slot, Command::ScrubEnd))
    };

    vec![on_scroll, on_mouse_move, on_mouse_up]
}

#[derive(Properties, PartialEq, Clone)]
pub struct VideoShowcaseProps {
    pub videos: Vec<VideoSource>,
    #[prop_or_default]
    pub tuning: Tuning,
}

#[function_component(VideoShowcase)]
pub fn video_showcase(props: &VideoShowcaseProps) -> Html {
    let unit_refs = use_memo(props.videos.len(), |count| {
        (0..*count).map(|_| UnitRefs::default()).collect::<Vec<_>>()
    });
    let coordinator: CoordinatorSlot = use_mut_ref(|| None);

    // Bind the coordinator once the blocks are mounted
    {
        let unit_refs = unit_refs.clone();
        let coordinator = coordinator.clone();
        let videos = props.videos.clone();
        let tuning = props.tuning.clone();

        use_effect_with((), move |_| {
            let mut listeners = Vec::new();
            let built = web_sys::window()
                .ok_or(ShowcaseError::NoWindow)
                .and_then(|window| {
                    build_coordinator(&window, &unit_refs, &videos, tuning).map(|c| (window, c))
                });

            match built {
                Ok((window, built)) => {
                    built.start();
                    *coordinator.borrow_mut() = Some(built);
                    listeners = attach_listeners(&window, unit_refs, &coordinator);
                }
                Err(e) => log::warn!("video showcase disabled: {e}"),
            }

            move || drop(listeners)
        });
    }

    let blocks = props
        .videos
        .iter()
        .zip(unit_refs.iter())
        .enumerate()
        .map(|(i, (source, refs))| {
            let on_media_click = {
                let slot = coordinator.clone();
                Callback::from(move |e: MouseEvent| {
                    if !is_control_click(&e) {
                        send(&slot, Command::MediaClick(i));
                    }
                })
            };
            let on_playback = dispatcher(&coordinator, move |_: Event| Command::PlaybackChanged(i));

            html! {
                <article class="video-block">
                    <div class="video-block__media" ref={refs.media.clone()} onclick={on_media_click}>
                        <video
                            ref={refs.video.clone()}
                            class="video-block__video"
                            src={source.src.clone()}
                            poster={source.poster.clone()}
                            autoplay={i == 0}
                            muted={true}
                            loop={true}
                            playsinline={true}
                            preload={if i == 0 { "auto" } else { "metadata" }}
                            onloadedmetadata={dispatcher(&coordinator, move |_: Event| Command::MetadataLoaded(i))}
                            ontimeupdate={dispatcher(&coordinator, move |_: Event| Command::TimeUpdate(i))}
                            onplay={on_playback.clone()}
                            onpause={on_playback}
                        ></video>
                        if let Some(caption) = source.caption.clone() {
                            <p class="video-block__caption" ref={refs.caption.clone()}>{caption}</p>
                        }
                        <button
                            class="video-block__mute"
                            type="button"
                            aria-label="Turn sound on"
                            ref={refs.mute.clone()}
                            onclick={dispatcher(&coordinator, |_: MouseEvent| Command::MuteButton)}
                        >
                            <Icon icon_id={IconId::LucideVolumeX} width={"18"} height={"18"} />
                            <span>{"Sound on"}</span>
                        </button>
                        <PlayerBar
                            refs={refs.bar.clone()}
                            on_toggle={dispatcher(&coordinator, move |_: ()| Command::TogglePlayback(i))}
                            on_scrub_begin={dispatcher(&coordinator, move |x: f64| Command::ScrubBegin { index: i, pointer_x: x })}
                            on_scrub_move={dispatcher(&coordinator, |x: f64| Command::ScrubMove { pointer_x: x })}
                            on_scrub_end={dispatcher(&coordinator, |_: ()| Command::ScrubEnd)}
                        />
                    </div>
                    <div class="video-block__spacer" ref={refs.spacer.clone()}></div>
                </article>
            }
        })
        .collect::<Html>();

    html! {
        <section id="videos" class="videos">
            { blocks }
        </section>
    }
}
