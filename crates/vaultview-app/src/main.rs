// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Vaultview — Identity Asset Inventory Dashboard
//
// Entry point. Initialises logging, backend services, and launches the
// Dioxus UI.

mod pages;
mod services;

use dioxus::prelude::*;

use vaultview_store::Settings;

use pages::audit_logs::AuditLogs;
use pages::certificates::Certificates;
use pages::code_signing::CodeSigning;
use pages::settings::SettingsPage;
use pages::ssh_keys::SshKeys;

use services::app_services::AppServices;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Vaultview starting");

    dioxus::launch(app);
}

/// Top-level route enum.
#[derive(Debug, Clone, Routable, PartialEq)]
enum Route {
    #[layout(TabLayout)]
    #[route("/")]
    Certificates {},
    #[route("/ssh-keys")]
    SshKeys {},
    #[route("/code-signing")]
    CodeSigning {},
    #[route("/audit")]
    AuditLogs {},
    #[route("/settings")]
    SettingsPage {},
}

/// Root component.
fn app() -> Element {
    // Initialise backend services (store, settings, config)
    let svc = use_hook(|| match AppServices::init() {
        Ok(s) => {
            tracing::info!("backend services initialised");
            s
        }
        Err(e) => {
            tracing::error!(error = %e, "persistent storage failed — using in-memory fallback");
            AppServices::fallback().expect("even fallback init failed")
        }
    });

    // Provide services and the reactive settings snapshot for all pages
    use_context_provider(|| svc.clone());
    use_context_provider(|| Signal::new(svc.settings().get()));

    // Log settings changes for diagnostics
    let svc_sub = svc.clone();
    use_hook(move || {
        svc_sub.settings().subscribe(|s| {
            tracing::debug!(dark_mode = s.dark_mode, "settings changed");
        });
    });

    rsx! {
        Router::<Route> {}
    }
}

/// Persistent top-navigation layout wrapping all pages.
#[component]
fn TabLayout() -> Element {
    let theme = use_context::<Signal<Settings>>();
    let dark = theme.read().dark_mode;

    let (page_bg, page_fg) = if dark {
        ("#1c1c1e", "#f2f2f7")
    } else {
        ("#ffffff", "#1c1c1e")
    };
    let nav_bg = if dark { "#2c2c2e" } else { "#fafafa" };

    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; height: 100vh; font-family: system-ui, -apple-system, sans-serif; background: {page_bg}; color: {page_fg};",

            // Top navigation
            nav { class: "tab-bar",
                style: "display: flex; gap: 16px; padding: 12px 16px; border-bottom: 1px solid #3a3a3c40; background: {nav_bg};",
                TabButton { to: Route::Certificates {}, label: "Certificates" }
                TabButton { to: Route::SshKeys {}, label: "SSH Keys" }
                TabButton { to: Route::CodeSigning {}, label: "Code Signing" }
                TabButton { to: Route::AuditLogs {}, label: "Audit Logs" }
                TabButton { to: Route::SettingsPage {}, label: "Settings" }
            }

            // Page content
            div { class: "page-content",
                style: "flex: 1; overflow-y: auto; padding: 16px;",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn TabButton(to: Route, label: &'static str) -> Element {
    rsx! {
        Link { to: to,
            style: "text-decoration: none; color: inherit; font-size: 14px; font-weight: 500;",
            "{label}"
        }
    }
}
