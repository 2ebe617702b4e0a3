// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Code signing page — protection-level filter and a persisted table/grid
// view preference.

use chrono::Utc;
use dioxus::prelude::*;

use vaultview_core::types::{
    CodeSigningKey, FilterState, KeyStatus, ProtectionLevel, SortConfig, SortDirection, ViewMode,
};
use vaultview_inventory::{DataSource, FixtureSource, ListController, Paging, datetime};

use crate::services::app_services::AppServices;

#[component]
pub fn CodeSigning() -> Element {
    let svc = use_context::<AppServices>();
    let latency = svc.fetch_latency();
    let cache = svc.cache();
    let initial_view = svc.settings().get().code_signing_view;

    let mut ctl = use_signal(move || {
        ListController::<CodeSigningKey>::new(
            cache,
            SortConfig::new("key_alias", SortDirection::Asc),
            Paging::all(),
        )
    });
    let mut protection = use_signal(|| Option::<ProtectionLevel>::None);
    let mut view_mode = use_signal(move || initial_view);

    let _loader = use_resource(move || async move {
        ctl.write().begin_load();
        let result = FixtureSource::code_signing_keys()
            .with_latency(latency)
            .fetch_all()
            .await;
        ctl.write().complete_load(result);
    });

    let loading = ctl.read().loading();
    let error = ctl.read().error();
    let total = ctl.read().all().len();
    let visible: Vec<CodeSigningKey> = ctl.read().visible().to_vec();
    let active_filter = *protection.read();
    let mode = *view_mode.read();
    let now = Utc::now();

    if error {
        return rsx! {
            div {
                h1 { "Code Signing Keys" }
                p { style: "text-align: center; color: #ff3b30; margin: 48px 0;",
                    "Something went wrong while loading code-signing keys."
                }
                button {
                    style: "display: block; margin: 0 auto; padding: 8px 24px; border-radius: 6px; border: 1px solid #ccc; background: white; color: #333;",
                    onclick: move |_| {
                        spawn(async move {
                            ctl.write().begin_load();
                            let result = FixtureSource::code_signing_keys()
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
                h1 { "Code Signing Keys" }
                p { style: "text-align: center; color: #aaa; margin: 48px 0;", "Loading code-signing keys..." }
            }
        };
    }

    let svc_toggle = svc.clone();

    rsx! {
        div {
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h1 { "Code Signing Keys" }
                button {
                    style: "padding: 6px 12px; border-radius: 6px; border: 1px solid #ccc; background: white; color: #333; font-size: 13px;",
                    onclick: move |_| {
                        let next = match *view_mode.read() {
                            ViewMode::Table => ViewMode::Grid,
                            ViewMode::Grid => ViewMode::Table,
                        };
                        view_mode.set(next);
                        svc_toggle.settings().set_view_mode(next);
                    },
                    if mode == ViewMode::Table { "Grid view" } else { "Table view" }
                }
            }

            // Protection-level filter
            div { style: "display: flex; gap: 8px; margin: 12px 0;",
                FilterButton {
                    label: "All",
                    active: active_filter.is_none(),
                    on_select: move |_| {
                        protection.set(None);
                        ctl.write().set_filter(FilterState::default());
                    },
                }
                FilterButton {
                    label: "HSM",
                    active: active_filter == Some(ProtectionLevel::Hsm),
                    on_select: move |_| {
                        protection.set(Some(ProtectionLevel::Hsm));
                        ctl.write().set_filter(FilterState {
                            protection_level: Some(ProtectionLevel::Hsm),
                            ..FilterState::default()
                        });
                    },
                }
                FilterButton {
                    label: "Software",
                    active: active_filter == Some(ProtectionLevel::Software),
                    on_select: move |_| {
                        protection.set(Some(ProtectionLevel::Software));
                        ctl.write().set_filter(FilterState {
                            protection_level: Some(ProtectionLevel::Software),
                            ..FilterState::default()
                        });
                    },
                }
            }

            if mode == ViewMode::Grid {
                div { style: "display: flex; flex-wrap: wrap; gap: 12px;",
                    for key in visible.iter() {
                        {
                            let last_used = datetime::format_relative_time(key.last_used, now);
                            rsx! {
                                div { style: "width: 220px; padding: 12px; border: 1px solid #e0e0e0; border-radius: 8px;",
                                    strong { "{key.key_alias}" }
                                    p { style: "color: #666; font-size: 12px; margin: 4px 0;", "{key.algorithm}" }
                                    p { style: "font-size: 12px; margin: 4px 0;",
                                        span { style: "padding: 2px 8px; border-radius: 10px; background: {protection_bg(key.protection_level)}; font-size: 11px;",
                                            "{key.protection_level.label()}"
                                        }
                                        span { style: "margin-left: 6px; color: {status_fg(key.status)}; font-size: 11px;",
                                            "{key.status.label()}"
                                        }
                                    }
                                    p { style: "color: #999; font-size: 11px; margin: 4px 0 0;", "Last used {last_used}" }
                                }
                            }
                        }
                    }
                }
            } else {
                for key in visible.iter() {
                    {
                        let last_used = datetime::format_relative_time(key.last_used, now);
                        let expiry = datetime::format_date(key.expiry_date);
                        rsx! {
                            div { style: "padding: 12px; margin: 8px 0; border: 1px solid #e0e0e0; border-radius: 8px;",
                                div { style: "display: flex; justify-content: space-between; align-items: center;",
                                    strong { "{key.key_alias}" }
                                    span { style: "padding: 2px 8px; border-radius: 10px; background: {protection_bg(key.protection_level)}; font-size: 11px;",
                                        "{key.protection_level.label()}"
                                    }
                                }
                                p { style: "color: #666; font-size: 13px; margin: 4px 0;",
                                    "{key.algorithm} · {key.usage}"
                                }
                                p { style: "color: #999; font-size: 12px; margin: 2px 0;",
                                    "Last used {last_used} · expires {expiry} · "
                                    span { style: "color: {status_fg(key.status)};", "{key.status.label()}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FilterButton(label: &'static str, active: bool, on_select: EventHandler<()>) -> Element {
    let (bg, fg) = if active {
        ("#007aff", "white")
    } else {
        ("white", "#333")
    };
    rsx! {
        button {
            style: "padding: 6px 16px; border-radius: 6px; border: 1px solid #ccc; background: {bg}; color: {fg}; font-size: 13px;",
            onclick: move |_| {
                on_select.call(());
            },
            "{label}"
        }
    }
}

fn protection_bg(level: ProtectionLevel) -> &'static str {
    match level {
        ProtectionLevel::Hsm => "#007aff33",
        ProtectionLevel::Software => "#8e8e9333",
    }
}

fn status_fg(status: KeyStatus) -> &'static str {
    match status {
        KeyStatus::Active => "#34c759",
        KeyStatus::Expired => "#ff3b30",
    }
}
