use yew::prelude::*;
use yew_router::prelude::*;
use log::info;
use web_sys::MouseEvent;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

mod campaign;
mod config;
mod crm;
mod lead;
mod phone;
mod session;
mod submission;
mod validation;

mod components {
    pub mod carousel;
    pub mod contact_section;
    pub mod faq_tabs;
    pub mod hero;
    pub mod info_popup;
    pub mod lead_form;
    pub mod media;
    pub mod popup;
    pub mod testimonial;
}
mod pages {
    pub mod landing;
    pub mod thank_you;
}

use pages::{
    landing::Landing,
    thank_you::ThankYou,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/thankyou.html")]
    ThankYou,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering landing page");
            html! { <Landing /> }
        },
        Route::ThankYou => {
            info!("Rendering thank-you page");
            html! { <ThankYou /> }
        },
        Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
    }
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled = use_state(|| false);

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(move |_| {
            let window = web_sys::window();
            let listener = window.as_ref().and_then(|window| {
                let document = window.document()?;
                let scroll_callback = Closure::wrap(Box::new(move || {
                    if let Some(root) = document.document_element() {
                        is_scrolled.set(root.scroll_top() > 80);
                    }
                }) as Box<dyn FnMut()>);
                window
                    .add_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref())
                    .ok()?;
                Some(scroll_callback)
            });

            move || {
                if let (Some(window), Some(scroll_callback)) = (window, listener) {
                    let _ = window.remove_event_listener_with_callback(
                        "scroll",
                        scroll_callback.as_ref().unchecked_ref(),
                    );
                }
            }
        }, ());
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"Bengaluru Centre"}
                </Link<Route>>

                <button class="burger-menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    <a href="#faq" class="nav-link" onclick={close_menu.clone()}>{"FAQ"}</a>
                    <a href="#contact" class="nav-login-button" onclick={close_menu}>{"Book a consultation"}</a>
                </div>
            </div>
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Nav />
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting landing page");
    yew::Renderer::<App>::new().render();
}
