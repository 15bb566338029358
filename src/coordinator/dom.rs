//! Browser side of the coordinator seams.

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Element, HtmlElement, HtmlVideoElement, Node, ScrollBehavior, ScrollToOptions, Window,
};
use yew::NodeRef;

use super::geometry::{UnitGeometry, ViewportState};
use super::surface::{BarSnapshot, MediaElement, UnitView, Viewport};
use crate::error::ShowcaseError;
use crate::player_bar::{time_label, BarRefs};

/// Nodes of one rendered video block.
#[derive(Clone, Default, PartialEq)]
pub struct UnitRefs {
    pub media: NodeRef,
    pub video: NodeRef,
    pub caption: NodeRef,
    pub mute: NodeRef,
    pub spacer: NodeRef,
    pub bar: BarRefs,
}

fn require<T>(node: &NodeRef, name: &'static str) -> Result<T, ShowcaseError>
where
    T: AsRef<Node> + From<JsValue>,
{
    node.cast::<T>().ok_or(ShowcaseError::MissingElement(name))
}

impl UnitRefs {
    /// Resolves the mounted nodes into coordinator handles.
    pub fn bind(&self) -> Result<(DomMedia, DomUnitView), ShowcaseError> {
        let media = DomMedia {
            video: require(&self.video, "video")?,
        };
        let view = DomUnitView {
            media: require(&self.media, "media container")?,
            caption: self.caption.cast(),
            mute: self.mute.cast(),
            bar: require(&self.bar.root, "player bar")?,
            scrubber: require(&self.bar.scrubber, "scrubber")?,
            progress: require(&self.bar.progress, "progress")?,
            time: require(&self.bar.time, "time label")?,
            icon_play: require(&self.bar.icon_play, "play icon")?,
            icon_pause: require(&self.bar.icon_pause, "pause icon")?,
        };
        Ok((media, view))
    }

    fn top_of(node: &NodeRef) -> Option<f64> {
        node.cast::<Element>()
            .map(|el| el.get_bounding_client_rect().top())
    }
}

/// Reads the live geometry for one frame of work.
pub fn measure(window: &Window, units: &[UnitRefs]) -> ViewportState {
    ViewportState {
        height: inner_height(window),
        units: units
            .iter()
            .map(|refs| UnitGeometry {
                media_top: UnitRefs::top_of(&refs.media).unwrap_or(f64::INFINITY),
                spacer_top: UnitRefs::top_of(&refs.spacer),
            })
            .collect(),
    }
}

fn inner_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

fn set_style(el: &HtmlElement, name: &str, value: &str) {
    el.style().set_property(name, value).ok();
}

fn clear_style(el: &HtmlElement, name: &str) {
    el.style().remove_property(name).ok();
}

pub struct DomMedia {
    video: HtmlVideoElement,
}

impl MediaElement for DomMedia {
    fn is_paused(&self) -> bool {
        self.video.paused()
    }

    fn is_muted(&self) -> bool {
        self.video.muted()
    }

    fn set_muted(&self, muted: bool) {
        self.video.set_muted(muted);
    }

    fn set_volume(&self, volume: f64) {
        self.video.set_volume(volume);
    }

    fn play(&self) {
        // Autoplay policy rejects starts during fast scrolling; that is expected.
        match self.video.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::trace!("play rejected: {:?}", e);
                }
            }),
            Err(e) => log::trace!("play failed: {:?}", e),
        }
    }

    fn pause(&self) {
        self.video.pause().ok();
    }

    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn duration(&self) -> f64 {
        self.video.duration()
    }

    fn seek(&self, seconds: f64) {
        self.video.set_current_time(seconds);
    }

    fn preload_eagerly(&self) {
        self.video.set_preload("auto");
    }
}

pub struct DomUnitView {
    media: HtmlElement,
    caption: Option<HtmlElement>,
    mute: Option<HtmlElement>,
    bar: Element,
    scrubber: Element,
    progress: HtmlElement,
    time: Element,
    icon_play: HtmlElement,
    icon_pause: HtmlElement,
}

impl DomUnitView {
    fn overlay(&self) -> impl Iterator<Item = &HtmlElement> {
        self.caption.iter().chain(self.mute.iter())
    }
}

impl UnitView for DomUnitView {
    fn set_overlay_visible(&self, visible: bool) {
        for el in self.overlay() {
            if visible {
                clear_style(el, "display");
                clear_style(el, "opacity");
            } else {
                set_style(el, "display", "none");
            }
        }
    }

    fn set_overlay_opacity(&self, opacity: f64) {
        let value = opacity.to_string();
        for el in self.overlay() {
            set_style(el, "opacity", &value);
        }
    }

    fn set_bar_active(&self, active: bool) {
        self.bar
            .class_list()
            .toggle_with_force("is-active", active)
            .ok();
    }

    fn render_bar(&self, snapshot: BarSnapshot) {
        set_style(
            &self.progress,
            "width",
            &format!("{}%", snapshot.progress_percent()),
        );
        self.time.set_text_content(Some(&time_label(&snapshot)));

        let (shown, hidden) = if snapshot.paused {
            (&self.icon_play, &self.icon_pause)
        } else {
            (&self.icon_pause, &self.icon_play)
        };
        set_style(shown, "display", "block");
        set_style(hidden, "display", "none");
    }

    fn set_media_style(&self, scale: Option<f64>, opacity: f64) {
        match scale {
            Some(scale) => set_style(&self.media, "transform", &format!("scale({scale})")),
            None => clear_style(&self.media, "transform"),
        }
        set_style(&self.media, "opacity", &opacity.to_string());
    }

    fn scrubber_bounds(&self) -> (f64, f64) {
        let rect = self.scrubber.get_bounding_client_rect();
        (rect.left(), rect.width())
    }

    fn offset_top(&self) -> f64 {
        self.media.offset_top() as f64
    }
}

pub struct DomViewport {
    window: Window,
}

impl DomViewport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Viewport for DomViewport {
    fn height(&self) -> f64 {
        inner_height(&self.window)
    }

    fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}
