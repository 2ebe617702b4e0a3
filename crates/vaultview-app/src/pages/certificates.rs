// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Certificates page — inventory table with domain filter, expiry sort,
// fixed-size pages, and an inline edit form.

use chrono::Utc;
use dioxus::prelude::*;

use vaultview_core::types::{
    Certificate, CertificateStatus, FilterState, SortConfig, SortDirection,
};
use vaultview_inventory::{DataSource, FixtureSource, ListController, Paging, datetime};

use crate::services::app_services::AppServices;

#[component]
pub fn Certificates() -> Element {
    let svc = use_context::<AppServices>();
    let latency = svc.fetch_latency();
    let page_size = svc.config().certificate_page_size;
    let cache = svc.cache();

    let mut ctl = use_signal(move || {
        ListController::<Certificate>::new(
            cache,
            SortConfig::new("expiry_date", SortDirection::Asc),
            Paging::paged(page_size),
        )
    });
    let mut domain_filter = use_signal(String::new);
    let mut editing = use_signal(|| Option::<Certificate>::None);

    // Cache-first publish on mount, then the simulated fetch replaces the
    // set wholesale.
    let _loader = use_resource(move || async move {
        ctl.write().begin_load();
        let result = FixtureSource::certificates()
            .with_latency(latency)
            .fetch_all()
            .await;
        ctl.write().complete_load(result);
    });

    let loading = ctl.read().loading();
    let error = ctl.read().error();
    let total = ctl.read().all().len();
    let expiring_soon = ctl
        .read()
        .all()
        .iter()
        .filter(|c| c.status == CertificateStatus::ExpiringSoon)
        .count();
    let visible: Vec<Certificate> = ctl.read().visible().to_vec();
    let page = ctl.read().page();
    let page_count = ctl.read().page_count();
    let total_filtered = ctl.read().total_filtered();
    let now = Utc::now();

    if error {
        return rsx! {
            div {
                h1 { "Certificates" }
                p { style: "text-align: center; color: #ff3b30; margin: 48px 0;",
                    "Something went wrong while loading certificates."
                }
                button {
                    style: "display: block; margin: 0 auto; padding: 8px 24px; border-radius: 6px; border: 1px solid #ccc; background: white; color: #333;",
                    onclick: move |_| {
                        spawn(async move {
                            ctl.write().begin_load();
                            let result = FixtureSource::certificates()
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
                h1 { "Certificates" }
                p { style: "text-align: center; color: #aaa; margin: 48px 0;", "Loading certificates..." }
            }
        };
    }

    rsx! {
        div {
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h1 { "Certificates" }
                span { style: "color: #666; font-size: 14px;",
                    "{total} certificates · {expiring_soon} expiring in the next 30 days"
                }
            }
            p { style: "color: #666;", "Manage TLS certificates across your fleet." }

            // Filter and sort controls
            div { style: "display: flex; gap: 8px; margin: 12px 0;",
                input {
                    r#type: "text",
                    placeholder: "Filter by domain",
                    style: "flex: 1; max-width: 320px; padding: 6px 10px; border: 1px solid #ccc; border-radius: 6px;",
                    value: "{domain_filter}",
                    oninput: move |evt| {
                        domain_filter.set(evt.value());
                        ctl.write().set_filter(FilterState {
                            domain: Some(evt.value()),
                            ..FilterState::default()
                        });
                    },
                }
                button {
                    style: "padding: 6px 12px; border-radius: 6px; border: 1px solid #ccc; background: white; color: #333; font-size: 13px;",
                    onclick: move |_| { ctl.write().toggle_sort("expiry_date"); },
                    "Sort by expiry"
                }
                button {
                    style: "padding: 6px 12px; border-radius: 6px; border: 1px solid #ccc; background: white; color: #333; font-size: 13px;",
                    onclick: move |_| { ctl.write().toggle_sort("name"); },
                    "Sort by name"
                }
            }

            // Rows
            for cert in visible.iter() {
                {
                    let cert_for_edit = cert.clone();
                    let days = datetime::days_until_expiry(cert.expiry_date, now);
                    let expiry = datetime::format_date(cert.expiry_date);

                    rsx! {
                        div { style: "padding: 12px; margin: 8px 0; border: 1px solid #e0e0e0; border-radius: 8px;",
                            div { style: "display: flex; justify-content: space-between; align-items: center;",
                                strong { "{cert.name}" }
                                span { style: "font-size: 12px; padding: 4px 8px; border-radius: 4px; background: {status_bg(cert.status)}; color: white;",
                                    "{cert.status.label()}"
                                }
                            }
                            p { style: "color: #666; font-size: 14px; margin: 4px 0;",
                                "{cert.domain} · {cert.issuer} · {cert.algorithm}"
                            }
                            p { style: "color: #999; font-size: 12px; margin: 2px 0; font-family: monospace;",
                                "{cert.serial_number}"
                            }
                            div { style: "display: flex; justify-content: space-between; align-items: center; margin-top: 4px;",
                                span { style: "color: #666; font-size: 13px;",
                                    "Expires {expiry} ({days} days)"
                                }
                                button {
                                    style: "padding: 4px 12px; border-radius: 4px; border: 1px solid #007aff; color: #007aff; background: white; font-size: 12px;",
                                    onclick: move |_| { editing.set(Some(cert_for_edit.clone())); },
                                    "Edit"
                                }
                            }
                        }
                    }
                }
            }

            // Pagination
            div { style: "display: flex; justify-content: space-between; align-items: center; margin-top: 12px;",
                span { style: "color: #666; font-size: 13px;",
                    "Page {page} of {page_count} · {total_filtered} matching"
                }
                div { style: "display: flex; gap: 8px;",
                    button {
                        style: "padding: 4px 12px; border-radius: 4px; border: 1px solid #ccc; background: white; color: #333; font-size: 12px;",
                        disabled: page <= 1,
                        onclick: move |_| { ctl.write().set_page(page - 1); },
                        "Previous"
                    }
                    button {
                        style: "padding: 4px 12px; border-radius: 4px; border: 1px solid #ccc; background: white; color: #333; font-size: 12px;",
                        disabled: page >= page_count,
                        onclick: move |_| { ctl.write().set_page(page + 1); },
                        "Next"
                    }
                }
            }

            // Edit form
            if let Some(cert) = editing.read().clone() {
                div { style: "margin-top: 16px; padding: 16px; border: 1px solid #007aff40; border-radius: 8px;",
                    h3 { "Edit Certificate" }
                    EditField {
                        label: "Name",
                        value: cert.name.clone(),
                        on_change: move |v: String| {
                            if let Some(c) = editing.write().as_mut() {
                                c.name = v;
                            }
                        },
                    }
                    EditField {
                        label: "Domain",
                        value: cert.domain.clone(),
                        on_change: move |v: String| {
                            if let Some(c) = editing.write().as_mut() {
                                c.domain = v;
                            }
                        },
                    }
                    EditField {
                        label: "Issuer",
                        value: cert.issuer.clone(),
                        on_change: move |v: String| {
                            if let Some(c) = editing.write().as_mut() {
                                c.issuer = v;
                            }
                        },
                    }
                    div { style: "display: flex; gap: 8px; margin-top: 12px;",
                        button {
                            style: "flex: 1; padding: 8px; border-radius: 6px; border: none; background: #007aff; color: white;",
                            onclick: move |_| {
                                if let Some(edited) = editing() {
                                    if let Err(e) = ctl.write().save_edit(edited) {
                                        tracing::error!(error = %e, "failed to save certificate edit");
                                    }
                                }
                                editing.set(None);
                            },
                            "Save Changes"
                        }
                        button {
                            style: "padding: 8px 16px; border-radius: 6px; border: 1px solid #ccc; background: white; color: #333;",
                            onclick: move |_| { editing.set(None); },
                            "Cancel"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn EditField(label: &'static str, value: String, on_change: EventHandler<String>) -> Element {
    rsx! {
        div { style: "margin: 8px 0;",
            label { style: "display: block; font-size: 13px; color: #666; margin-bottom: 4px;", "{label}" }
            input {
                r#type: "text",
                style: "width: 100%; padding: 6px 10px; border: 1px solid #ccc; border-radius: 6px; box-sizing: border-box;",
                value: "{value}",
                oninput: move |evt| {
                    on_change.call(evt.value());
                },
            }
        }
    }
}

fn status_bg(status: CertificateStatus) -> &'static str {
    match status {
        CertificateStatus::Active => "#34c759",
        CertificateStatus::Expired => "#ff3b30",
        CertificateStatus::ExpiringSoon => "#ff9500",
    }
}
