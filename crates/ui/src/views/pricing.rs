use dioxus::prelude::*;
use fahm_core::model::Tier;
use services::AccountServiceError;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{PlanAction, PricingCardVm, map_pricing};

#[derive(Clone, Debug, PartialEq)]
struct PricingData {
    cards: Vec<PricingCardVm>,
}

#[component]
pub fn PricingView() -> Element {
    let ctx = use_context::<AppContext>();
    let learner = ctx.learner_id();
    let accounts = ctx.accounts();
    let table = ctx.dashboard().gate().table().clone();

    let mut message = use_signal(|| None::<String>);

    let resource_accounts = accounts.clone();
    let mut resource = use_resource(move || {
        let accounts = resource_accounts.clone();
        let table = table.clone();
        async move {
            let tier = accounts
                .tier(learner)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(PricingData {
                cards: map_pricing(&table, tier),
            })
        }
    });

    let upgrade = use_callback(move |target: Tier| {
        let accounts = accounts.clone();
        spawn(async move {
            let text = match accounts.upgrade(learner, target).await {
                Ok(tier) => format!("You are now on the {tier} plan."),
                Err(AccountServiceError::NotAnUpgrade { from, .. }) => {
                    format!("You are already on the {from} plan.")
                }
                Err(_) => ViewError::Unknown.message().to_owned(),
            };
            message.set(Some(text));
            resource.restart();
        });
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page pricing",
            h2 { "Choose your plan" }
            if let Some(text) = message() {
                p { class: "notice", "{text}" }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    div { class: "pricing-grid",
                        for card in data.cards {
                            PlanCard { key: "{card.tier}", card, on_upgrade: upgrade }
                        }
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
fn PlanCard(card: PricingCardVm, on_upgrade: Callback<Tier>) -> Element {
    let class = if card.action == PlanAction::Current {
        "plan-card current"
    } else {
        "plan-card"
    };
    let label = card.action_label();

    rsx! {
        div { class,
            h3 { "{card.name}" }
            p { class: "plan-price", "{card.price_line}" }
            p { class: "plan-access", "{card.access_line}" }
            match card.action {
                PlanAction::Upgrade(tier) => rsx! {
                    button { class: "btn-primary", onclick: move |_| on_upgrade.call(tier), "{label}" }
                },
                _ => rsx! {
                    span { class: "plan-status", "{label}" }
                },
            }
        }
    }
}
