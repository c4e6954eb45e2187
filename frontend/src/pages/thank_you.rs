use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(ThankYou)]
pub fn thank_you() -> Html {
    html! {
        <div class="thank-you-page">
            <section class="thank-you-panel">
                <h1>{"Thank you!"}</h1>
                <p>{"We have received your details. Our Bengaluru team will call you shortly."}</p>
                <Link<Route> to={Route::Home} classes="forward-link">
                    {"Back to the home page"}
                </Link<Route>>
            </section>
        </div>
    }
}
