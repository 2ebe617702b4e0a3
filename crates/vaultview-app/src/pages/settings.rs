// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page — theme toggle, cache maintenance, and fetch tuning.

use dioxus::prelude::*;

use vaultview_store::Settings;

use crate::services::app_services::AppServices;

#[component]
pub fn SettingsPage() -> Element {
    let svc = use_context::<AppServices>();
    let mut theme = use_context::<Signal<Settings>>();
    let mut status_msg = use_signal(|| Option::<String>::None);

    let dark_mode = theme.read().dark_mode;
    let config = svc.config();
    let ttl_minutes = config.cache_ttl_ms / 60_000;
    let latency_ms = config.fetch_latency_ms;

    let svc_theme = svc.clone();
    let svc_clear = svc.clone();
    let svc_save = svc.clone();

    rsx! {
        div {
            h1 { "Settings" }

            section { style: "margin: 16px 0;",
                h3 { "Appearance" }
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #8e8e9333;",
                    span { "Dark mode" }
                    input {
                        r#type: "checkbox",
                        checked: dark_mode,
                        onchange: move |evt| {
                            let dark = evt.checked();
                            svc_theme.settings().set_dark_mode(dark);
                            theme.write().dark_mode = dark;
                        },
                    }
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "Local Cache" }
                p { style: "color: #666; font-size: 13px;",
                    "Record sets stay fresh for {ttl_minutes} minutes; the simulated fetch takes {latency_ms} ms."
                }
                button {
                    style: "padding: 8px 16px; border-radius: 6px; border: 1px solid #ff3b30; color: #ff3b30; background: white; font-size: 13px;",
                    onclick: move |_| {
                        svc_clear.clear_cache();
                        tracing::info!("local cache cleared");
                        status_msg.set(Some("Cached data cleared.".into()));
                    },
                    "Clear cached data"
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "Fetch Tuning" }
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #8e8e9333;",
                    span { "Simulated fetch latency (ms)" }
                    input {
                        r#type: "number",
                        style: "width: 90px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px; text-align: right;",
                        value: "{latency_ms}",
                        onchange: move |evt| {
                            if let Ok(ms) = evt.value().parse::<u64>() {
                                let mut updated = svc_save.config();
                                updated.fetch_latency_ms = ms;
                                match svc_save.save_config(&updated) {
                                    Ok(()) => {
                                        tracing::info!(fetch_latency_ms = ms, "config saved");
                                        status_msg.set(Some("Settings saved.".into()));
                                    }
                                    Err(e) => {
                                        tracing::error!(error = %e, "failed to save config");
                                        status_msg.set(Some(format!("Save failed: {e}")));
                                    }
                                }
                            }
                        },
                    }
                }
            }

            if let Some(ref msg) = *status_msg.read() {
                p { style: "color: #34c759; font-size: 14px; text-align: center; margin-top: 8px;",
                    "{msg}"
                }
            }

            section { style: "margin: 24px 0;",
                h3 { "About" }
                p { style: "color: #666; font-size: 14px;",
                    "Vaultview v0.3.0"
                    br {}
                    "Identity Asset Inventory Dashboard"
                    br {}
                    "PMPL-1.0-or-later"
                }
            }
        }
    }
}
