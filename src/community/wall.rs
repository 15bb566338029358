use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{HtmlImageElement, HtmlInputElement};
use yew::prelude::*;

use super::avatar::{avatar_url, fallback_avatar, profile_url};
use super::roster::{submit, AddOutcome, SupporterRoster};
use super::store::{fetch_remote, LocalSupporterStore, SupporterStore};
use crate::error::HandleError;

const PLACEHOLDER: &str = "your X handle";
const DUPLICATE_PLACEHOLDER: &str = "Already added!";
const PLACEHOLDER_RESET_MS: u32 = 2_000;
const DEFAULT_COUNT_TEXT: &str = "Join the visual builders";

/// One pixel of slack absorbs sub-pixel rounding in the wrapper height.
fn overflows(scroll_height: i32, client_height: i32) -> bool {
    scroll_height > client_height + 1
}

fn check_overflow(wrapper_ref: &NodeRef, expanded: bool, overflowing: &UseStateHandle<bool>) {
    // An expanded grid keeps its toggle until collapsed again
    if expanded {
        return;
    }
    if let Some(wrapper) = wrapper_ref.cast::<web_sys::Element>() {
        overflowing.set(overflows(wrapper.scroll_height(), wrapper.client_height()));
    }
}

fn on_avatar_error(handle: &str) -> Callback<Event> {
    let fallback = fallback_avatar(handle);
    Callback::from(move |e: Event| {
        if let Some(img) = e.target().and_then(|t| t.dyn_into::<HtmlImageElement>().ok()) {
            if img.src() != fallback {
                img.set_src(&fallback);
            }
        }
    })
}

#[derive(Properties, PartialEq, Clone)]
pub struct CommunityWallProps {
    pub supporters_url: AttrValue,
    pub storage_key: AttrValue,
    pub avatar_base_url: AttrValue,
    pub profile_base_url: AttrValue,
    #[prop_or(100)]
    pub milestone: usize,
}

#[function_component(CommunityWall)]
pub fn community_wall(props: &CommunityWallProps) -> Html {
    let roster = use_state(SupporterRoster::default);
    let expanded = use_state_eq(|| false);
    let expanded_ref = use_mut_ref(|| false);
    let overflowing = use_state_eq(|| false);
    let placeholder = use_state_eq(|| PLACEHOLDER);
    let placeholder_reset: Rc<RefCell<Option<Timeout>>> = use_mut_ref(|| None);
    let overflow_frame: Rc<RefCell<Option<AnimationFrame>>> = use_mut_ref(|| None);
    let input_ref = use_node_ref();
    let wrapper_ref = use_node_ref();
    let store = use_memo(props.storage_key.clone(), |key| {
        LocalSupporterStore::new(key.to_string())
    });

    {
        let expanded_ref = expanded_ref.clone();
        use_effect_with(*expanded, move |expanded| {
            *expanded_ref.borrow_mut() = *expanded;
            || ()
        });
    }

    // Published list merged with what this browser has added
    {
        let roster = roster.clone();
        let store = store.clone();
        use_effect_with(props.supporters_url.clone(), move |url| {
            let url = url.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let remote = fetch_remote(&url).await;
                roster.set(SupporterRoster::from_sources(remote, store.load()));
            });
            || ()
        });
    }

    // Re-measure after the grid has been laid out
    {
        let wrapper_ref = wrapper_ref.clone();
        let overflowing = overflowing.clone();
        let overflow_frame = overflow_frame.clone();
        use_effect_with((roster.handles().len(), *expanded), move |(_, expanded)| {
            let expanded = *expanded;
            *overflow_frame.borrow_mut() = Some(request_animation_frame(move |_| {
                check_overflow(&wrapper_ref, expanded, &overflowing);
            }));
            || ()
        });
    }

    {
        let wrapper_ref = wrapper_ref.clone();
        let overflowing = overflowing.clone();
        let expanded_ref = expanded_ref.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "resize", move |_| {
                    check_overflow(&wrapper_ref, *expanded_ref.borrow(), &overflowing);
                })
            });
            move || drop(listener)
        });
    }

    let on_submit = {
        let roster = roster.clone();
        let input_ref = input_ref.clone();
        let placeholder = placeholder.clone();
        let placeholder_reset = placeholder_reset.clone();
        let store = store.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(input) = input_ref.cast::<HtmlInputElement>() else {
                return;
            };

            let mut next = (*roster).clone();
            match submit(&mut next, &*store, &input.value()) {
                Err(HandleError::Empty) => {}
                Err(err) => {
                    input.set_custom_validity(&err.to_string());
                    input.report_validity();
                }
                Ok(AddOutcome::AlreadyPresent) => {
                    input.set_custom_validity("");
                    input.set_value("");
                    placeholder.set(DUPLICATE_PLACEHOLDER);
                    let placeholder = placeholder.clone();
                    *placeholder_reset.borrow_mut() = Some(Timeout::new(
                        PLACEHOLDER_RESET_MS,
                        move || placeholder.set(PLACEHOLDER),
                    ));
                }
                Ok(AddOutcome::Added) => {
                    input.set_custom_validity("");
                    roster.set(next);
                    input.set_value("");
                }
            }
        })
    };

    // A stale validity message would block the next native submit
    let on_input = {
        let input_ref = input_ref.clone();
        Callback::from(move |_: InputEvent| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                input.set_custom_validity("");
            }
        })
    };

    let on_toggle_expand = {
        let expanded = expanded.clone();
        Callback::from(move |_: MouseEvent| expanded.set(!*expanded))
    };

    let cards = roster
        .handles()
        .iter()
        .map(|handle| {
            html! {
                <a
                    key={handle.clone()}
                    class="supporter-card"
                    href={profile_url(&props.profile_base_url, handle)}
                    target="_blank"
                    rel="noopener"
                >
                    <img
                        class="supporter-card__avatar"
                        src={avatar_url(&props.avatar_base_url, handle)}
                        alt={format!("@{handle}")}
                        loading="lazy"
                        onerror={on_avatar_error(handle)}
                    />
                    <span class="supporter-card__handle">{format!("@{handle}")}</span>
                </a>
            }
        })
        .collect::<Html>();

    let count_text = roster
        .count_label(props.milestone)
        .unwrap_or_else(|| DEFAULT_COUNT_TEXT.to_string());

    let wrapper_class = classes!(
        "supporters-grid-wrapper",
        expanded.then_some("is-expanded"),
        overflowing.then_some("is-overflowing")
    );

    html! {
        <section id="community" class="community">
            <h2 class="community__title">{"Backed by builders"}</h2>
            <p id="supporter-count" class="community__count">{count_text}</p>
            <form id="supporter-form" class="supporter-form" onsubmit={on_submit}>
                <input
                    id="handle-input"
                    type="text"
                    ref={input_ref}
                    placeholder={*placeholder}
                    autocomplete="off"
                    maxlength="16"
                    oninput={on_input}
                />
                <button type="submit">{"Add me"}</button>
            </form>
            <div id="supporters-grid-wrapper" class={wrapper_class} ref={wrapper_ref}>
                <div id="supporters-grid" class="supporters-grid">{cards}</div>
            </div>
            if *overflowing {
                <button id="supporters-show-all" class="community__toggle" type="button" onclick={on_toggle_expand}>
                    {if *expanded { "Show less" } else { "Show all" }}
                </button>
            }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_needs_more_than_a_pixel() {
        assert!(!overflows(300, 300));
        assert!(!overflows(301, 300));
        assert!(overflows(302, 300));
    }
}
