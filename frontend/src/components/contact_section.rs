use web_sys::HtmlElement;
use yew::prelude::*;
use yew_hooks::use_window_size;

use super::lead_form::{FormKind, LeadForm};

#[derive(Properties, PartialEq)]
pub struct ContactSectionProps {
    pub map_embed: AttrValue,
}

/// Inline lead form next to the centre map; the map is kept at least as tall
/// as the form.
#[function_component(ContactSection)]
pub fn contact_section(props: &ContactSectionProps) -> Html {
    let form_side = use_node_ref();
    let map_side = use_node_ref();
    let window_size = use_window_size();

    {
        let form_side = form_side.clone();
        let map_side = map_side.clone();
        use_effect_with_deps(
            move |_| {
                if let (Some(form), Some(map)) =
                    (form_side.cast::<HtmlElement>(), map_side.cast::<HtmlElement>())
                {
                    let height = format!("{}px", form.offset_height());
                    let _ = map.style().set_property("min-height", &height);
                }
                || ()
            },
            window_size,
        );
    }

    html! {
        <section id="contact" class="contact-section">
            <div ref={form_side} class="form-side">
                <h2>{"Talk to our Bengaluru team"}</h2>
                <LeadForm kind={FormKind::Main} />
            </div>
            <div ref={map_side} class="map-side">
                <iframe
                    src={props.map_embed.clone()}
                    title="Centre location"
                    loading="lazy"
                    referrerpolicy="no-referrer-when-downgrade"
                />
            </div>
        </section>
    }
}
