use web_sys::{window, Element, ScrollBehavior, ScrollIntoViewOptions};
use yew::prelude::*;

const INFO_POPUP_ID: &str = "seoPopup";

#[derive(Clone, PartialEq)]
pub struct InfoSection {
    pub id: AttrValue,
    pub title: AttrValue,
    pub body: AttrValue,
}

#[derive(Properties, PartialEq)]
pub struct InfoPopupProps {
    pub sections: Vec<InfoSection>,
}

fn scroll_to(id: &str) {
    let Some(section) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    section.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Footer links that open a long-form info panel at the matching section.
#[function_component(InfoPopup)]
pub fn info_popup(props: &InfoPopupProps) -> Html {
    let target = use_state(|| None::<AttrValue>);

    // The panel has to be displayed before its sections can be scrolled to.
    use_effect_with_deps(
        |target: &Option<AttrValue>| {
            if let Some(id) = target {
                scroll_to(id);
            }
            || ()
        },
        (*target).clone(),
    );

    let close = {
        let target = target.clone();
        Callback::from(move |_: MouseEvent| target.set(None))
    };
    let on_backdrop = {
        let target = target.clone();
        Callback::from(move |e: MouseEvent| {
            let outside = e
                .target_dyn_into::<Element>()
                .map_or(false, |el| el.id() == INFO_POPUP_ID);
            if outside {
                target.set(None);
            }
        })
    };

    let display = if target.is_some() { "display: flex;" } else { "display: none;" };

    html! {
        <>
            <ul class="seo-links">
                { for props.sections.iter().map(|section| {
                    let onclick = {
                        let target = target.clone();
                        let id = section.id.clone();
                        Callback::from(move |e: MouseEvent| {
                            e.prevent_default();
                            target.set(Some(id.clone()));
                        })
                    };
                    html! {
                        <li>
                            <a href="#" data-target={section.id.clone()} {onclick}>{ section.title.clone() }</a>
                        </li>
                    }
                }) }
            </ul>
            <div id={INFO_POPUP_ID} class="seo-popup" style={display} onclick={on_backdrop}>
                <div class="seo-popup-content">
                    <button class="seo-popup-close" aria-label="Close" onclick={close}>{"×"}</button>
                    { for props.sections.iter().map(|section| html! {
                        <section id={section.id.clone()}>
                            <h3>{ section.title.clone() }</h3>
                            <p>{ section.body.clone() }</p>
                        </section>
                    }) }
                </div>
            </div>
        </>
    }
}
