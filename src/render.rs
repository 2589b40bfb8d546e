//! HTML pages for visitors and the admin back office.
//!
//! Pages are maud templates, so every stored value spliced into them is
//! escaped. Only the fixed stylesheets and scripts go in unescaped.

use maud::{html, Markup, PreEscaped, DOCTYPE};
use url::form_urlencoded::byte_serialize;

use crate::routes;
use crate::store::{Route, DEFAULT_WAIT_SECONDS};

/// JSON string literal that is safe to embed inside a `<script>` element
fn script_string(raw: &str) -> String {
    serde_json::Value::from(raw)
        .to_string()
        .replace("</", "<\\/")
}

/// Admin page URL that opens `path` in the edit form
pub fn admin_edit_link(path: &str) -> String {
    let encoded: String = byte_serialize(path.as_bytes()).collect();
    format!("{}?edit={}", routes::ADMIN, encoded)
}

const PUBLIC_STYLE: &str = "body{font-family:Helvetica,Arial,sans-serif;display:flex;align-items:center;justify-content:center;min-height:100vh;margin:0;}main{max-width:640px;width:100%;text-align:center;padding:2rem;border-radius:16px;}a{text-decoration:none;}a:hover{text-decoration:underline;}";

const LANDING_STYLE: &str = "body{background:#f5f7fb;color:#2d3436;}main{background:#fff;box-shadow:0 12px 36px rgba(0,0,0,0.08);}a{color:#0984e3;}";

const NOT_FOUND_STYLE: &str = "body{background:#2d3436;color:#fff;}a{color:#ffeaa7;}";

const INTERSTITIAL_STYLE: &str = "body{background:#111827;color:#e5e7eb;}main{background:rgba(17,24,39,0.8);box-shadow:0 20px 45px rgba(0,0,0,0.35);}img{max-width:100%;border-radius:12px;margin-bottom:1.5rem;}.countdown{font-size:1.1rem;margin:1rem 0;}a{color:#60a5fa;}.note{margin-top:1rem;color:#9ca3af;}.actions{margin-top:1.5rem;display:flex;justify-content:center;gap:1rem;flex-wrap:wrap;}.button{padding:0.6rem 1.2rem;border-radius:999px;background:#2563eb;color:#fff;}";

const COUNTDOWN_SCRIPT: &str = r#"
const secondsEl = document.getElementById('seconds');
if (wait > 0) {
    let remaining = wait;
    const timer = setInterval(() => {
        remaining -= 1;
        if (remaining <= 0) {
            clearInterval(timer);
            window.location.href = redirectUrl;
        }
        if (secondsEl) {
            secondsEl.textContent = Math.max(0, remaining);
        }
    }, 1000);
} else {
    window.location.replace(redirectUrl);
}
"#;

fn public_shell(title: &str, page_style: &str, head_extra: Markup, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                (head_extra)
                style { (PreEscaped(PUBLIC_STYLE)) (PreEscaped(page_style)) }
            }
            body { (body) }
        }
    }
}

pub fn landing_page() -> String {
    let body = html! {
        main {
            h1 { "Redirect routes" }
            p { "Open the back office to create a route, or visit a configured route path." }
            p { a href=(routes::ADMIN) { "Open the back office" } }
        }
    };
    public_shell("Redirect routes", LANDING_STYLE, html! {}, body).into_string()
}

pub fn not_found_page() -> String {
    let body = html! {
        main {
            h1 { "404 Not Found" }
            p { "No redirect is configured for this address." }
            p { a href=(routes::ADMIN) { "Go to the back office" } }
        }
    };
    public_shell("Route not found", NOT_FOUND_STYLE, html! {}, body).into_string()
}

/// Page shown before sending the visitor on to `redirect_url`
///
/// With a positive wait the page counts down and also carries a meta
/// refresh for clients without scripts. With no wait the script redirects
/// at once. Either way a manual link to the target is offered.
pub fn interstitial_page(
    image_url: &str,
    wait_seconds: u64,
    redirect_url: &str,
    note: &str,
) -> String {
    let refresh = html! {
        @if wait_seconds > 0 {
            meta http-equiv="refresh" content=(format!("{};url={}", wait_seconds, redirect_url));
        }
    };
    let script = format!(
        "const wait = {};\nconst redirectUrl = {};{}",
        wait_seconds,
        script_string(redirect_url),
        COUNTDOWN_SCRIPT
    );

    let body = html! {
        main {
            h1 { "Redirecting" }
            @if !image_url.is_empty() {
                img src=(image_url) alt="Banner";
            }
            @if wait_seconds > 0 {
                p class="countdown" {
                    "Redirecting in " span id="seconds" { (wait_seconds) } " seconds…"
                }
            } @else {
                p class="countdown" { "Taking you to the target page…" }
            }
            div class="actions" {
                a class="button" id="redirect-link" href=(redirect_url) { "Go now" }
                a href=(routes::ADMIN) { "Back office" }
            }
            @if !note.is_empty() {
                div class="note" { "Note: " (note) }
            }
        }
        script { (PreEscaped(script)) }
    };

    public_shell("Redirecting", INTERSTITIAL_STYLE, refresh, body).into_string()
}

/// Everything the admin page shows
pub struct AdminPage<'a> {
    pub flash: Option<&'a str>,
    pub editing: Option<&'a Route>,
    pub routes: &'a [Route],
    pub words: &'a [String],
}

const ADMIN_STYLE: &str = "body{font-family:Helvetica,Arial,sans-serif;margin:0 auto;max-width:1080px;padding:1.5rem;color:#1f2937;background:#f9fafb;}header{display:flex;justify-content:space-between;align-items:center;}.flash{padding:0.8rem 1rem;border-radius:8px;background:#dbeafe;margin:1rem 0;}label{display:block;margin:0.8rem 0;}input,textarea{display:block;width:100%;padding:0.5rem;margin-top:0.3rem;box-sizing:border-box;}table{width:100%;border-collapse:collapse;}th,td{padding:0.5rem;border-bottom:1px solid #e5e7eb;text-align:left;}.muted{color:#9ca3af;}.actions form{display:inline;}button.danger{color:#b91c1c;}.word-buttons{display:flex;flex-wrap:wrap;gap:0.4rem;}";

const PATH_BUILDER_SCRIPT: &str = r#"
const pathInput = document.getElementById('path-input');
function appendWord(word) {
    const current = pathInput.value.trim();
    const segment = '/@' + word;
    if (!current || current === '/') {
        pathInput.value = segment;
        return;
    }
    const next = current[0] === '/' ? current : '/' + current;
    pathInput.value = next.replace(/\/+$/, '') + segment;
}
document.querySelectorAll('.word-button').forEach(button => {
    button.addEventListener('click', () => appendWord(button.dataset.word));
});
const clearButton = document.getElementById('clear-path');
if (clearButton) {
    clearButton.addEventListener('click', () => {
        pathInput.value = '';
        pathInput.focus();
    });
}
"#;

pub fn admin_page(page: &AdminPage<'_>) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { "Route admin" }
                style { (PreEscaped(ADMIN_STYLE)) }
            }
            body {
                header {
                    h1 { "Route admin" }
                    nav { a href="/" target="_blank" { "Visit site" } }
                }
                @if let Some(flash) = page.flash {
                    div class="flash" { (flash) }
                }
                (route_form(page))
                (route_table(page.routes))
                script { (PreEscaped(PATH_BUILDER_SCRIPT)) }
            }
        }
    }
    .into_string()
}

fn route_form(page: &AdminPage<'_>) -> Markup {
    let editing = page.editing;
    let field = |f: fn(&Route) -> &str| editing.map(f).unwrap_or_default();
    let wait = editing
        .map(|route| route.wait_seconds)
        .unwrap_or(DEFAULT_WAIT_SECONDS);

    html! {
        section {
            h2 { @if editing.is_some() { "Edit route" } @else { "New route" } }
            form method="post" action=(routes::ADMIN) {
                input type="hidden" name="action" value=(if editing.is_some() { "update" } else { "create" });
                @if let Some(route) = editing {
                    input type="hidden" name="original_path" value=(route.path);
                }
                label {
                    "Route path"
                    input type="text" name="path" id="path-input" value=(field(|r| &r.path)) placeholder="e.g. /@i-do-want//@afford";
                }
                div class="word-bank" {
                    span { "Common words:" }
                    div class="word-buttons" {
                        @for word in page.words {
                            button type="button" class="word-button" data-word=(word) { "@" (word) }
                        }
                        button type="button" id="clear-path" { "Clear" }
                    }
                }
                label {
                    "Image URL"
                    input type="url" name="image_url" value=(field(|r| &r.image_url)) placeholder="https://example.com/banner.jpg";
                }
                label {
                    "Wait (seconds)"
                    input type="number" name="wait_seconds" min="0" value=(wait);
                }
                label {
                    "Redirect URL"
                    input type="url" name="redirect_url" value=(field(|r| &r.redirect_url)) placeholder="https://example.com/target";
                }
                label {
                    "Note"
                    textarea name="note" rows="2" { (field(|r| &r.note)) }
                }
                div class="form-actions" {
                    button type="submit" { "Save" }
                    @if editing.is_some() {
                        " "
                        a href=(routes::ADMIN) { "Cancel editing" }
                    }
                }
            }
        }
    }
}

fn route_table(all_routes: &[Route]) -> Markup {
    html! {
        section {
            h2 { "Routes" }
            @if all_routes.is_empty() {
                p class="muted" { "No routes yet. Create one above." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Path" } th { "Image" } th { "Wait" }
                            th { "Redirect URL" } th { "Note" } th { "Actions" }
                        }
                    }
                    tbody {
                        @for route in all_routes {
                            tr {
                                td { code { (route.path) } }
                                td {
                                    @if route.image_url.is_empty() {
                                        span class="muted" { "none" }
                                    } @else {
                                        a href=(route.image_url) target="_blank" { "view image" }
                                    }
                                }
                                td { (route.wait_seconds.max(0)) " s" }
                                td { a href=(route.redirect_url) target="_blank" { (route.redirect_url) } }
                                td {
                                    @if route.note.is_empty() {
                                        span class="muted" { "none" }
                                    } @else {
                                        (route.note)
                                    }
                                }
                                td class="actions" {
                                    a href=(admin_edit_link(&route.path)) { "Edit" }
                                    " "
                                    form method="post" action=(routes::ADMIN) onsubmit="return confirm('Delete this route?');" {
                                        input type="hidden" name="action" value="delete";
                                        input type="hidden" name="target_path" value=(route.path);
                                        button type="submit" class="danger" { "Delete" }
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
