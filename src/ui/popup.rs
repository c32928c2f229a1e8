/// Popup UI for FocusFlow

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use patternfly_yew::prelude::*;
use crate::chrome::{self, ActiveTab, ChromeAlertSink};
use crate::classifier::ClassificationClient;
use crate::config::ApiConfig;
use crate::dispatcher::Dispatcher;
use crate::error::CheckError;
use crate::messages::BackgroundMessage;
use crate::settings;
use crate::transport::FetchTransport;
use super::components::{ConfirmModal, StarRating, StatusLine};
use super::education::Education;
use super::state::{self, CheckStatus, FeedbackForm, ReportForm, SavedSettings};

#[derive(Clone, Copy, PartialEq)]
enum Panel {
    Check,
    Report,
    Education,
    Feedback,
}

impl Panel {
    const ALL: [Panel; 4] = [Panel::Check, Panel::Report, Panel::Education, Panel::Feedback];

    fn label(&self) -> &'static str {
        match self {
            Panel::Check => "Check",
            Panel::Report => "Report",
            Panel::Education => "Education",
            Panel::Feedback => "Feedback",
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let client = use_memo((), |_| ClassificationClient::new(ApiConfig::from_env(), FetchTransport));
    let store = use_memo((), |_| settings::select_store());

    let panel = use_state(|| Panel::Check);
    let url = use_state(String::new);
    let active_tab = use_state(|| None::<ActiveTab>);
    let status = use_state(CheckStatus::default);
    let modal_open = use_state(|| false);
    let saved = use_state(SavedSettings::default);
    let report = use_state(ReportForm::default);
    let feedback = use_state(FeedbackForm::default);

    // Prefill from the active tab and restore settings on mount
    {
        let store = store.clone();
        let saved = saved.clone();
        let active_tab = active_tab.clone();
        let url = url.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                saved.set(SavedSettings::Ready(settings::load_or_default(&**store).await));

                match chrome::active_tab().await {
                    Ok(Some(tab)) => {
                        if let Some(tab_url) = &tab.url {
                            url.set(tab_url.clone());
                        }
                        active_tab.set(Some(tab));
                    }
                    Ok(None) => log::debug!("No active tab available"),
                    Err(e) => log::warn!("Failed to read active tab: {}", e),
                }
            });
            || ()
        });
    }

    let on_url_input = {
        let url = url.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                url.set(input.value());
            }
        })
    };

    // Check link handler
    let on_check = {
        let client = client.clone();
        let url = url.clone();
        let active_tab = active_tab.clone();
        let status = status.clone();
        let modal_open = modal_open.clone();

        Callback::from(move |_| {
            let candidate = (*url).trim().to_string();
            if candidate.is_empty() {
                status.set(CheckStatus::Failed(CheckError::EmptyUrl));
                return;
            }

            let client = client.clone();
            let tab = (*active_tab).clone();
            let status = status.clone();
            let modal_open = modal_open.clone();

            status.set(CheckStatus::Checking);

            spawn_local(async move {
                match client.check(&candidate).await {
                    Ok(verdict) => {
                        if verdict.distracting {
                            let target = state::overlay_target(tab.as_ref(), &verdict);
                            Dispatcher::new(ChromeAlertSink).dispatch(&verdict, target);
                            modal_open.set(true);
                        }
                        status.set(CheckStatus::Finished(verdict));
                    }
                    Err(e) => {
                        log::error!("Check failed: {}", e);
                        status.set(CheckStatus::Failed(e));
                    }
                }
            });
        })
    };

    let on_modal_continue = {
        let modal_open = modal_open.clone();
        Callback::from(move |_| modal_open.set(false))
    };

    let on_modal_close_tab = {
        let modal_open = modal_open.clone();
        let active_tab = active_tab.clone();

        Callback::from(move |_| {
            modal_open.set(false);
            let target = state::close_target((*active_tab).as_ref());
            spawn_local(async move {
                if let Err(e) = chrome::close_tab_or_window(target).await {
                    log::error!("Failed to close tab: {}", e);
                }
            });
        })
    };

    let on_toggle_dark_mode = {
        let saved = saved.clone();
        let store = store.clone();

        Callback::from(move |_| {
            let Some(updated) = saved.toggled_dark_mode() else {
                log::debug!("Settings not loaded yet, ignoring dark mode toggle");
                return;
            };
            saved.set(SavedSettings::Ready(updated));

            let store = store.clone();
            spawn_local(async move {
                if let Err(e) = store.save(&updated).await {
                    log::error!("Failed to save settings: {}", e);
                }
            });
        })
    };

    let on_toggle_protection = {
        let saved = saved.clone();
        let store = store.clone();
        let client = client.clone();

        Callback::from(move |_| {
            let Some(updated) = saved.toggled_protection() else {
                log::debug!("Settings not loaded yet, ignoring protection toggle");
                return;
            };
            let enabled = updated.protection_enabled;
            saved.set(SavedSettings::Ready(updated));

            let store = store.clone();
            let client = client.clone();
            spawn_local(async move {
                if let Err(e) = store.save(&updated).await {
                    log::error!("Failed to save settings: {}", e);
                }
                if let Err(e) = chrome::send_to_background(&BackgroundMessage::ToggleProtection { enabled }).await {
                    log::warn!("Background did not receive protection toggle: {}", e);
                }
                if let Err(e) = client.set_protection(enabled).await {
                    log::warn!("Enable protection failed: {}", e);
                }
            });
        })
    };

    // Panel click handlers
    let on_panel_click = {
        let panel = panel.clone();
        move |target: Panel| {
            let panel = panel.clone();
            Callback::from(move |_| panel.set(target))
        }
    };

    let on_report_url = {
        let report = report.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let mut form = (*report).clone();
                form.url = input.value();
                report.set(form);
            }
        })
    };

    let on_report_details = {
        let report = report.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlTextAreaElement>() {
                let mut form = (*report).clone();
                form.details = input.value();
                report.set(form);
            }
        })
    };

    let on_report_submit = {
        let report = report.clone();
        Callback::from(move |_| {
            let mut form = (*report).clone();
            if form.submit() {
                report.set(form);
            }
        })
    };

    let on_rate = {
        let feedback = feedback.clone();
        Callback::from(move |stars: u8| {
            let mut form = (*feedback).clone();
            form.rate(stars);
            feedback.set(form);
        })
    };

    let on_feedback_text = {
        let feedback = feedback.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlTextAreaElement>() {
                let mut form = (*feedback).clone();
                form.text = input.value();
                feedback.set(form);
            }
        })
    };

    let on_feedback_submit = {
        let feedback = feedback.clone();
        Callback::from(move |_| {
            let mut form = (*feedback).clone();
            if form.submit() {
                feedback.set(form);
            }
        })
    };

    let is_busy = status.is_busy();
    let settings_ready = saved.is_ready();
    let current = saved.current();
    let show_modal = *modal_open && status.is_distracting();

    html! {
        <div class={if current.dark_mode { "App dark" } else { "App" }}>
            <header class="header">
                <div class="brand">{"FocusFlow"}</div>
                <Button onclick={on_toggle_dark_mode} disabled={!settings_ready} variant={ButtonVariant::Secondary}>
                    {if current.dark_mode { "Light Mode" } else { "Dark Mode" }}
                </Button>
            </header>

            // Panel navigation
            <div class="pf-v5-c-tabs tabs-nav">
                <ul class="pf-v5-c-tabs__list">
                    {for Panel::ALL.iter().map(|&target| html! {
                        <li class={if *panel == target { "pf-v5-c-tabs__item pf-m-current" } else { "pf-v5-c-tabs__item" }}>
                            <button class="pf-v5-c-tabs__link" onclick={on_panel_click(target)}>
                                <span class="pf-v5-c-tabs__item-text">{target.label()}</span>
                            </button>
                        </li>
                    })}
                </ul>
            </div>

            <div class="tab-pane-content">
                {match *panel {
                    Panel::Check => html! {
                        <section class="section check-section">
                            <h2>{"Check a Link"}</h2>
                            <div class="input-group">
                                <input
                                    type="text"
                                    placeholder="Paste your URL here..."
                                    value={(*url).clone()}
                                    oninput={on_url_input}
                                />
                                <Button onclick={on_check} disabled={is_busy} variant={ButtonVariant::Primary}>
                                    {"Check Link"}
                                </Button>
                            </div>

                            if is_busy {
                                <div class="loading-text-center">
                                    <Spinner />
                                </div>
                            }

                            if !show_modal {
                                if let Some(message) = status.message() {
                                    <StatusLine message={message} tone={status.tone()} />
                                }
                            }

                            <div class="protection-controls flex-column-gap">
                                <Button onclick={on_toggle_protection} disabled={!settings_ready} variant={ButtonVariant::Secondary} block={true}>
                                    {if current.protection_enabled { "Protection Enabled ✅" } else { "Enable Protection 🔒" }}
                                </Button>
                                <Button onclick={on_panel_click(Panel::Report)} variant={ButtonVariant::Secondary} block={true}>
                                    {"Report Phishing 🚩"}
                                </Button>
                            </div>
                        </section>
                    },
                    Panel::Report => html! {
                        <section class="section report-section">
                            <h2>{"Report Suspicious Link"}</h2>
                            <div class="report-form flex-column-gap">
                                <input
                                    type="text"
                                    placeholder="Suspicious URL"
                                    value={report.url.clone()}
                                    oninput={on_report_url}
                                />
                                <textarea
                                    placeholder="Add details or context about this link..."
                                    value={report.details.clone()}
                                    oninput={on_report_details}
                                />
                                <Button onclick={on_report_submit} variant={ButtonVariant::Primary}>
                                    {"Submit Report"}
                                </Button>
                            </div>
                            if let Some(message) = &report.message {
                                <Alert r#type={AlertType::Success} title={message.clone()} inline={true}>
                                </Alert>
                            }
                        </section>
                    },
                    Panel::Education => html! { <Education /> },
                    Panel::Feedback => html! {
                        <section class="section feedback-section">
                            <h2>{"Feedback"}</h2>
                            <p class="feedback-intro">
                                {"We value your feedback. Let us know how we can improve FocusFlow."}
                            </p>
                            <div class="feedback-form flex-column-gap">
                                <div class="rating">
                                    <label>{"Rate us:"}</label>
                                    <StarRating rating={feedback.rating} on_rate={on_rate} />
                                </div>
                                <textarea
                                    placeholder="Tell us more..."
                                    value={feedback.text.clone()}
                                    oninput={on_feedback_text}
                                />
                                <Button onclick={on_feedback_submit} variant={ButtonVariant::Primary}>
                                    {"Submit Feedback"}
                                </Button>
                            </div>
                            if let Some(message) = &feedback.message {
                                <Alert r#type={AlertType::Success} title={message.clone()} inline={true}>
                                </Alert>
                            }
                        </section>
                    },
                }}
            </div>

            if show_modal {
                <ConfirmModal
                    message={status.message().unwrap_or_default()}
                    on_continue={on_modal_continue}
                    on_close_tab={on_modal_close_tab}
                />
            }

            <p class="footer-popup">
                {"© 2025 FocusFlow v0.1.0"}
            </p>
        </div>
    }
}
