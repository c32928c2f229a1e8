/// Reusable UI components

use super::state::{Tone, MAX_RATING};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusLineProps {
    pub message: String,
    #[prop_or(Tone::Info)]
    pub tone: Tone,
}

#[function_component(StatusLine)]
pub fn status_line(props: &StatusLineProps) -> Html {
    let (bg_color, border_color) = match props.tone {
        Tone::Info => ("#e3f2fd", "#2196f3"),
        Tone::Safe => ("#e8f5e9", "#4caf50"),
        Tone::Danger => ("#fff3e0", "#ff9800"),
        Tone::Error => ("#ffebee", "#f44336"),
    };

    html! {
        <div class="result" style={format!("padding: 12px; border-radius: 4px; background-color: {}; border-left: 4px solid {}; margin: 10px 0;", bg_color, border_color)}>
            <p class="message-paragraph">{&props.message}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StarRatingProps {
    pub rating: u8,
    pub on_rate: Callback<u8>,
}

#[function_component(StarRating)]
pub fn star_rating(props: &StarRatingProps) -> Html {
    html! {
        <div class="stars">
            {for (1..=MAX_RATING).map(|star| {
                let class = if props.rating >= star { "star filled" } else { "star" };
                html! {
                    <span key={star} class={class} onclick={props.on_rate.reform(move |_| star)}>
                        {"★"}
                    </span>
                }
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ConfirmModalProps {
    pub message: String,
    pub on_continue: Callback<()>,
    pub on_close_tab: Callback<()>,
}

/// Blocking yes/no prompt shown when a checked link is distracting
#[function_component(ConfirmModal)]
pub fn confirm_modal(props: &ConfirmModalProps) -> Html {
    html! {
        <div class="pf-v5-c-backdrop">
            <div class="pf-v5-l-bullseye">
                <div class="pf-v5-c-modal-box pf-m-sm" role="dialog" aria-modal="true">
                    <header class="pf-v5-c-modal-box__header">
                        <h1 class="pf-v5-c-modal-box__title">{"Distracting site"}</h1>
                    </header>
                    <div class="pf-v5-c-modal-box__body">
                        <p>{&props.message}</p>
                        <p>{"Continue to this site?"}</p>
                    </div>
                    <footer class="pf-v5-c-modal-box__footer">
                        <button class="pf-v5-c-button pf-m-primary" onclick={props.on_continue.reform(|_| ())}>
                            {"Yes, continue"}
                        </button>
                        <button class="pf-v5-c-button pf-m-danger" onclick={props.on_close_tab.reform(|_| ())}>
                            {"No, close tab"}
                        </button>
                    </footer>
                </div>
            </div>
        </div>
    }
}
