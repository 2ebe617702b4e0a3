// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Audit logs page — incrementally loaded timeline with an action-type
// filter and expandable metadata rows.

use dioxus::prelude::*;

use vaultview_core::types::{ActionType, AuditLogEntry, FilterState, SortConfig, SortDirection};
use vaultview_inventory::{DataSource, FixtureSource, ListController, Paging, datetime};

use crate::services::app_services::AppServices;

#[component]
pub fn AuditLogs() -> Element {
    let svc = use_context::<AppServices>();
    let latency = svc.fetch_latency();
    let window = svc.config().audit_window_size;
    let cache = svc.cache();

    let mut ctl = use_signal(move || {
        ListController::<AuditLogEntry>::new(
            cache,
            SortConfig::new("timestamp", SortDirection::Desc),
            Paging::incremental(window),
        )
    });

    let _loader = use_resource(move || async move {
        ctl.write().begin_load();
        let result = FixtureSource::audit_logs()
            .with_latency(latency)
            .fetch_all()
            .await;
        ctl.write().complete_load(result);
    });

    let loading = ctl.read().loading();
    let error = ctl.read().error();
    let total = ctl.read().all().len();
    let total_filtered = ctl.read().total_filtered();
    let visible: Vec<AuditLogEntry> = ctl.read().visible().to_vec();
    let has_more = ctl.read().has_more();

    if error {
        return rsx! {
            div {
                h1 { "Audit Logs" }
                p { style: "text-align: center; color: #ff3b30; margin: 48px 0;",
                    "Something went wrong while loading the audit log."
                }
                button {
                    style: "display: block; margin: 0 auto; padding: 8px 24px; border-radius: 6px; border: 1px solid #ccc; background: white; color: #333;",
                    onclick: move |_| {
                        spawn(async move {
                            ctl.write().begin_load();
                            let result = FixtureSource::audit_logs()
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
                h1 { "Audit Logs" }
                p { style: "text-align: center; color: #aaa; margin: 48px 0;", "Loading audit logs..." }
            }
        };
    }

    rsx! {
        div {
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h1 { "Audit Logs" }
                span { style: "color: #666; font-size: 14px;",
                    "{visible.len()} of {total_filtered} entries"
                }
            }
            p { style: "color: #666;",
                "Every recorded operation with its actor, action, and target."
            }

            // Action-type filter
            select {
                style: "padding: 6px 10px; border: 1px solid #ccc; border-radius: 6px; margin: 12px 0; font-size: 13px;",
                onchange: move |evt| {
                    let selected = ActionType::ALL
                        .iter()
                        .copied()
                        .find(|a| a.as_str() == evt.value());
                    ctl.write().set_filter(FilterState {
                        action_type: selected,
                        ..FilterState::default()
                    });
                },
                option { value: "", "All actions" }
                for action in ActionType::ALL.iter() {
                    option { value: "{action.as_str()}", "{action.as_str()}" }
                }
            }

            for entry in visible.iter() {
                {
                    let entry_id = entry.id.clone();
                    let expanded = ctl.read().is_expanded(&entry.id);
                    let ts = datetime::format_date_time(entry.timestamp);
                    let metadata: Vec<String> = entry
                        .metadata
                        .iter()
                        .map(|(name, value)| format!("{name}: {value}"))
                        .collect();

                    rsx! {
                        div { style: "padding: 10px; margin: 4px 0; border: 1px solid #f0f0f0; border-radius: 6px; font-size: 14px;",
                            div { style: "display: flex; justify-content: space-between; align-items: center;",
                                span {
                                    button {
                                        style: "border: none; background: none; color: #999; font-size: 11px; margin-right: 6px; cursor: pointer;",
                                        onclick: move |_| { ctl.write().toggle_expand(&entry_id); },
                                        if expanded { "▼" } else { "▶" }
                                    }
                                    span { style: "font-size: 11px; padding: 3px 8px; border-radius: 4px; background: {action_bg(entry.action_type)}; color: white; text-transform: uppercase;",
                                        "{action_label(entry.action_type)}"
                                    }
                                    strong { style: "margin-left: 8px;", "{entry.actor}" }
                                }
                                span { style: "color: #999; font-size: 12px;", "{ts}" }
                            }
                            p { style: "color: #888; font-size: 12px; margin: 2px 0 0 24px; font-family: monospace;",
                                "{entry.target_resource}"
                            }
                            if expanded {
                                div { style: "margin: 6px 0 0 24px; padding: 8px; background: #8e8e9314; border-radius: 6px;",
                                    if metadata.is_empty() {
                                        p { style: "color: #999; font-size: 12px; margin: 0;", "No metadata." }
                                    } else {
                                        for line in metadata.iter() {
                                            p { style: "font-size: 12px; margin: 2px 0; font-family: monospace;",
                                                "{line}"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if has_more {
                button {
                    style: "display: block; margin: 12px auto; padding: 8px 24px; border-radius: 6px; border: 1px solid #ccc; background: white; color: #333; font-size: 13px;",
                    onclick: move |_| { ctl.write().load_more(); },
                    "Load more"
                }
            } else {
                p { style: "text-align: center; color: #aaa; font-size: 12px; margin: 12px 0;",
                    "End of log."
                }
            }
        }
    }
}

/// `snake_case` wire name rendered with spaces for the badge.
fn action_label(action: ActionType) -> String {
    action.as_str().replace('_', " ")
}

fn action_bg(action: ActionType) -> &'static str {
    let name = action.as_str();
    if name.contains("created") || name.contains("renewed") {
        "#34c759"
    } else if name.contains("revoked") || name.contains("failed") {
        "#ff3b30"
    } else if name.contains("updated") || name.contains("modified") || name.contains("rotated") {
        "#ff9500"
    } else {
        "#8e8e93"
    }
}
