use dioxus::prelude::*;
use dioxus_router::Link;
use fahm_core::model::{ExamId, LearnerId};
use services::{AccountService, DashboardError};
use tracing::warn;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    DashboardState, DashboardVm, ExamTabVm, UpgradePromptVm, WorldAction, WorldCardVm,
    map_dashboard,
};

fn view_error(err: &DashboardError) -> ViewError {
    match err {
        DashboardError::Config(_) => ViewError::Config,
        _ => ViewError::Unknown,
    }
}

/// Persist the learner's exam choice. Returns `false` after logging if the
/// write failed.
pub(crate) async fn remember_exam(
    accounts: &AccountService,
    learner: LearnerId,
    exam: &ExamId,
) -> bool {
    match accounts.select_exam(learner, exam).await {
        Ok(()) => true,
        Err(err) => {
            warn!(%learner, exam = %exam, error = %err, "failed to save exam choice");
            false
        }
    }
}

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let learner = ctx.learner_id();
    let dashboard = ctx.dashboard();
    let accounts = ctx.accounts();

    let mut ui_state = use_signal(DashboardState::default);
    let mut expanded = use_signal(|| None::<u32>);
    let requested = use_memo(move || ui_state.read().selected_exam().cloned());

    let mut resource = use_resource(move || {
        let dashboard = dashboard.clone();
        let requested = requested();
        async move {
            let data = dashboard
                .load(learner, requested.as_ref())
                .await
                .map_err(|err| view_error(&err))?;
            Ok::<DashboardVm, ViewError>(map_dashboard(&data))
        }
    });

    let choose_exam = use_callback(move |id: ExamId| {
        if !ui_state.write().choose_exam(id.clone()) {
            return;
        }
        expanded.set(None);
        let accounts = accounts.clone();
        spawn(async move {
            if !remember_exam(&accounts, learner, &id).await {
                ui_state.write().exam_not_saved();
            }
        });
    });

    let toggle_world = use_callback(move |position: u32| {
        let current = *expanded.read();
        expanded.set(if current == Some(position) {
            None
        } else {
            Some(position)
        });
    });

    let state = view_state_from_resource(&resource);
    let menu_open = ui_state.read().exam_menu_open();
    let open_world = *expanded.read();
    let save_notice = ui_state.read().save_notice().map(str::to_owned);

    rsx! {
        div { class: "page dashboard",
            if let Some(message) = save_notice {
                SaveNotice { message }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    header { class: "dashboard-header",
                        div {
                            p { class: "greeting", "{vm.greeting}" }
                            h2 { "{vm.exam_name}" }
                            p { class: "subscription",
                                "Your subscription: "
                                strong { "{vm.tier_label}" }
                                " · {vm.access_line}"
                            }
                            p { class: "completed", "{vm.completed_line}" }
                        }
                        if vm.show_upgrade_button {
                            Link { class: "btn-primary", to: Route::Pricing {}, "Upgrade Plan" }
                        }
                    }

                    if let Some(notice) = vm.notice.clone() {
                        p { class: "notice", "{notice}" }
                    }

                    div { class: "exam-switcher",
                        button {
                            class: "exam-toggle",
                            onclick: move |_| ui_state.write().toggle_exam_menu(),
                            "Change exam"
                        }
                        if menu_open {
                            ul { class: "exam-menu",
                                for tab in vm.exam_tabs.iter().cloned() {
                                    ExamTabButton { key: "{tab.id}", tab, on_choose: choose_exam }
                                }
                            }
                        }
                    }

                    div { class: "world-grid",
                        for world in vm.worlds.iter().cloned() {
                            WorldCard {
                                key: "{world.position}",
                                expanded: open_world == Some(world.position),
                                world,
                                on_toggle: toggle_world,
                            }
                        }
                    }

                    if let Some(prompt) = vm.upgrade_prompt.clone() {
                        UpgradePrompt { prompt }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button { onclick: move |_| resource.restart(), "Retry" }
                },
            }
        }
    }
}

#[component]
pub(crate) fn SaveNotice(message: String) -> Element {
    rsx! {
        p { class: "notice save-failed", role: "alert", "{message}" }
    }
}

#[component]
fn ExamTabButton(tab: ExamTabVm, on_choose: Callback<ExamId>) -> Element {
    let class = if tab.selected { "exam-tab selected" } else { "exam-tab" };
    let id = tab.id.clone();
    rsx! {
        li {
            button { class, onclick: move |_| on_choose.call(id.clone()), "{tab.name}" }
        }
    }
}

#[component]
fn WorldCard(world: WorldCardVm, expanded: bool, on_toggle: Callback<u32>) -> Element {
    let class = if world.locked { "world-card locked" } else { "world-card" };
    let position = world.position;
    let action = world.action;

    rsx! {
        div { class,
            div { class: "world-label", "{world.label}" }
            h3 { "{world.title}" }
            p { class: "world-subject", "{world.subject_line}" }

            if let Some(label) = world.progress_label.clone() {
                div { class: "progress-bar",
                    div { class: "progress-fill", width: "{world.progress_percent}%" }
                }
                p { class: "progress-label", "{label}" }
            }
            if let Some(hint) = world.unlock_hint.clone() {
                p { class: "unlock-hint", "{hint}" }
            }

            if action == WorldAction::Upgrade {
                Link { class: "world-cta upgrade", to: Route::Pricing {}, "{action.label()}" }
            } else {
                button {
                    class: "world-cta",
                    onclick: move |_| on_toggle.call(position),
                    "{action.label()}"
                }
            }

            if expanded {
                ul { class: "world-levels",
                    for level in world.levels.iter() {
                        li { "{level}" }
                    }
                }
            }
        }
    }
}

#[component]
fn UpgradePrompt(prompt: UpgradePromptVm) -> Element {
    rsx! {
        section { class: "upgrade-prompt",
            h3 { "{prompt.heading}" }
            p { "{prompt.body}" }
            Link { class: "btn-primary", to: Route::Pricing {}, "{prompt.cta}" }
        }
    }
}
