use gloo_events::EventListener;
use yew::prelude::*;

use crate::frame_gate::{FrameGate, RafScheduler};

/// The bar turns solid once the videos section has scrolled up under it.
pub fn is_scrolled(videos_bottom: f64, nav_height: f64) -> bool {
    videos_bottom <= nav_height
}

#[derive(Properties, PartialEq, Clone)]
pub struct NavBarProps {
    /// Element id of the section the bar floats over.
    #[prop_or(AttrValue::Static("videos"))]
    pub over: AttrValue,
}

#[function_component(NavBar)]
pub fn nav_bar(props: &NavBarProps) -> Html {
    let nav_ref = use_node_ref();
    let scrolled = use_state_eq(|| false);

    {
        let nav_ref = nav_ref.clone();
        let scrolled = scrolled.clone();
        let over = props.over.clone();

        use_effect_with(over, move |over| {
            let over = over.clone();
            let listener = web_sys::window().map(|window| {
                let document = window.document();
                let gate = FrameGate::new(RafScheduler::default(), move |_: ()| {
                    let section = document.as_ref().and_then(|d| d.get_element_by_id(&over));
                    let nav = nav_ref.cast::<web_sys::HtmlElement>();
                    if let (Some(section), Some(nav)) = (section, nav) {
                        let bottom = section.get_bounding_client_rect().bottom();
                        scrolled.set(is_scrolled(bottom, nav.offset_height() as f64));
                    }
                });
                gate.offer(());
                EventListener::new(&window, "scroll", move |_| {
                    gate.offer(());
                })
            });
            if listener.is_none() {
                log::warn!("nav bar: no window, scroll styling off");
            }

            move || drop(listener)
        });
    }

    html! {
        <nav id="nav" class={classes!("nav", scrolled.then_some("nav--scrolled"))} ref={nav_ref}>
            <a class="nav__brand" href="#">{"Visual Builders"}</a>
            <div class="nav__links">
                <a href="#videos">{"Watch"}</a>
                <a href="#community">{"Community"}</a>
            </div>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_once_videos_pass_under_the_bar() {
        assert!(!is_scrolled(900.0, 64.0));
        assert!(!is_scrolled(64.5, 64.0));
        assert!(is_scrolled(64.0, 64.0));
        assert!(is_scrolled(-300.0, 64.0));
    }
}
