// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SSH keys page — searchable inventory sorted by trust level, with
// expandable rows listing each key's associated servers.

use chrono::Utc;
use dioxus::prelude::*;

use vaultview_core::types::{FilterState, SortConfig, SortDirection, SshKey, TrustLevel};
use vaultview_inventory::{DataSource, FixtureSource, ListController, Paging, datetime};

use crate::services::app_services::AppServices;

#[component]
pub fn SshKeys() -> Element {
    let svc = use_context::<AppServices>();
    let latency = svc.fetch_latency();
    let cache = svc.cache();

    let mut ctl = use_signal(move || {
        ListController::<SshKey>::new(
            cache,
            SortConfig::new("trust_level", SortDirection::Desc),
            Paging::all(),
        )
    });
    let mut search = use_signal(String::new);

    let _loader = use_resource(move || async move {
        ctl.write().begin_load();
        let result = FixtureSource::ssh_keys()
            .with_latency(latency)
            .fetch_all()
            .await;
        ctl.write().complete_load(result);
    });

    let loading = ctl.read().loading();
    let error = ctl.read().error();
    let total = ctl.read().all().len();
    let visible: Vec<SshKey> = ctl.read().visible().to_vec();
    let now = Utc::now();

    if error {
        return rsx! {
            div {
                h1 { "SSH Keys" }
                p { style: "text-align: center; color: #ff3b30; margin: 48px 0;",
                    "Something went wrong while loading SSH keys."
                }
                button {
                    style: "display: block; margin: 0 auto; padding: 8px 24px; border-radius: 6px; border: 1px solid #ccc; background: white; color: #333;",
                    onclick: move |_| {
                        spawn(async move {
                            ctl.write().begin_load();
                            let result = FixtureSource::ssh_keys()
                                .with_latency(latency)
                                .fetch_all()
                                .await;
                            ctl.write().complete_load(result);
                        });
                    },
                    "Retry"
                }
            }
        };
    }

    if loading && total == 0 {
        return rsx! {
            div {
                h1 { "SSH Keys" }
                p { style: "text-align: center; color: #aaa; margin: 48px 0;", "Loading SSH keys..." }
            }
        };
    }

    rsx! {
        div {
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h1 { "SSH Keys" }
                span { style: "color: #666; font-size: 14px;", "{total} keys" }
            }
            p { style: "color: #666;",
                "Discover, search, and assess trust for SSH keys across your fleet."
            }

            div { style: "display: flex; gap: 8px; margin: 12px 0;",
                input {
                    r#type: "text",
                    placeholder: "Search owner or fingerprint",
                    style: "flex: 1; max-width: 360px; padding: 6px 10px; border: 1px solid #ccc; border-radius: 6px;",
                    value: "{search}",
                    oninput: move |evt| {
                        search.set(evt.value());
                        ctl.write().set_filter(FilterState {
                            search: Some(evt.value()),
                            ..FilterState::default()
                        });
                    },
                }
                button {
                    style: "padding: 6px 12px; border-radius: 6px; border: 1px solid #ccc; background: white; color: #333; font-size: 13px;",
                    onclick: move |_| { ctl.write().toggle_sort("trust_level"); },
                    "Sort by trust"
                }
                button {
                    style: "padding: 6px 12px; border-radius: 6px; border: 1px solid #ccc; background: white; color: #333; font-size: 13px;",
                    onclick: move |_| { ctl.write().toggle_sort("last_used"); },
                    "Sort by last used"
                }
            }

            for key in visible.iter() {
                {
                    let key_id = key.id.clone();
                    let expanded = ctl.read().is_expanded(&key.id);
                    let last_used = datetime::format_relative_time(key.last_used, now);
                    let created = datetime::format_date(key.created_at);

                    rsx! {
                        div { style: "padding: 12px; margin: 8px 0; border: 1px solid #e0e0e0; border-radius: 8px;",
                            div { style: "display: flex; justify-content: space-between; align-items: center;",
                                div {
                                    button {
                                        style: "border: none; background: none; color: #999; font-size: 12px; margin-right: 8px; cursor: pointer;",
                                        onclick: move |_| { ctl.write().toggle_expand(&key_id); },
                                        if expanded { "▼" } else { "▶" }
                                    }
                                    strong { "{key.key_owner}" }
                                }
                                span { style: "font-size: 12px; padding: 4px 8px; border-radius: 4px; background: {trust_bg(key.trust_level)}; color: white;",
                                    "{key.trust_level.label()}"
                                }
                            }
                            p { style: "color: #666; font-size: 13px; margin: 4px 0 0 28px; font-family: monospace;",
                                "{key.fingerprint}"
                            }
                            p { style: "color: #999; font-size: 12px; margin: 2px 0 0 28px;",
                                "{key.key_type} · last used {last_used}"
                            }
                            if expanded {
                                div { style: "margin: 8px 0 0 28px; padding: 8px; background: #8e8e9314; border-radius: 6px;",
                                    p { style: "font-size: 13px; font-weight: 600; margin: 0 0 4px;",
                                        "Associated servers ({key.servers.len()})"
                                    }
                                    if key.servers.is_empty() {
                                        p { style: "color: #999; font-size: 12px; margin: 0;", "No server associations." }
                                    } else {
                                        for server in key.servers.iter() {
                                            p { style: "font-size: 12px; margin: 2px 0; font-family: monospace;",
                                                "{server.name} — {server.address}"
                                            }
                                        }
                                    }
                                    p { style: "color: #999; font-size: 11px; margin: 6px 0 0;",
                                        "Created {created}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn trust_bg(level: TrustLevel) -> &'static str {
    match level {
        TrustLevel::High => "#34c759",
        TrustLevel::Medium => "#ff9500",
        TrustLevel::Low => "#ff3b30",
    }
}
