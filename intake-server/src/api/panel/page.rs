//! Server-rendered panel page
//!
//! The Ops section is rendered with current values so the page is usable
//! before any script runs; the other sections load from the panel JSON API.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use shared::models::{Role, ToggleKind, ToggleValue, ToggleView};
use shared::util::format_millis;

const STYLES: &str = include_str!("../../../assets/panel.css");
const SCRIPT: &str = include_str!("../../../assets/panel.js");

const SECTIONS: [(&str, &str); 6] = [
    ("ops", "Ops"),
    ("ai", "AI"),
    ("ai-queue", "AI Queue"),
    ("rules", "Rules"),
    ("menu", "Menu"),
    ("audit", "Audit"),
];

/// Render the panel for `panel` (which page) as seen by `viewer`
pub fn render_panel(panel: Role, viewer: Role, toggles: &[ToggleView], last_updated: i64) -> Markup {
    let title = format!("{} Panel", panel.label());
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLES)) }
            }
            body data-role=(viewer.as_str()) {
                header {
                    strong { (title) }
                    span { "Signed in as " (viewer.label()) }
                }
                nav {
                    @for (id, heading) in SECTIONS {
                        button type="button" data-section=(id) class=[(id == "ops").then_some("active")] { (heading) }
                    }
                }
                main {
                    section id="ops" {
                        h2 { "Ops" }
                        div id="ops-toggles" {
                            @for toggle in toggles {
                                (toggle_row(toggle, viewer))
                            }
                        }
                        p class="meta" {
                            span id="saving" hidden { "Saving…" }
                            " "
                            span id="last-updated" data-ms=(last_updated) {
                                "Last updated: " (format_millis(last_updated))
                            }
                        }
                        p id="ops-error" class="error" hidden {}
                    }
                    @for &(id, heading) in &SECTIONS[1..] {
                        section id=(id) hidden {
                            h2 { (heading) }
                            div id={ (id) "-body" } class="meta" { "Loading…" }
                        }
                    }
                }
                script { (PreEscaped(SCRIPT)) }
            }
        }
    }
}

fn toggle_row(toggle: &ToggleView, viewer: Role) -> Markup {
    let key = toggle.key.as_str();
    let locked = !viewer.satisfies(toggle.min_role);
    html! {
        div class="toggle" {
            label for={ "toggle-" (key) } {
                (toggle.label) " " small { "(" (toggle.min_role.as_str()) "+)" }
            }
            span {
                @match (&toggle.kind, &toggle.value) {
                    (ToggleKind::Choice { choices }, value) => {
                        @let current = value.as_choice().unwrap_or_default();
                        select id={ "toggle-" (key) } data-key=(key) data-prev=(current)
                            disabled[locked] data-locked=[locked.then_some("true")] {
                            @for choice in choices {
                                option value=(choice) selected[choice.as_str() == current] { (choice) }
                            }
                        }
                    }
                    (ToggleKind::Switch, value) => {
                        input type="checkbox" id={ "toggle-" (key) } data-key=(key)
                            checked[matches!(value, ToggleValue::Switch(true))]
                            disabled[locked] data-locked=[locked.then_some("true")];
                    }
                }
                " "
                small id={ "updated-" (key) } { (format_millis(toggle.last_updated)) }
            }
        }
    }
}
