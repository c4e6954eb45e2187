use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub struct FaqEntry {
    pub question: AttrValue,
    pub answer: AttrValue,
}

#[derive(Clone, PartialEq)]
pub struct FaqCategory {
    pub id: AttrValue,
    pub label: AttrValue,
    pub entries: Vec<FaqEntry>,
}

#[derive(Properties, PartialEq)]
struct FaqItemProps {
    entry: FaqEntry,
}

#[function_component(FaqItem)]
fn faq_item(props: &FaqItemProps) -> Html {
    let is_open = use_state(|| false);

    let toggle = {
        let is_open = is_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            is_open.set(!*is_open);
        })
    };

    html! {
        <div class={classes!("faq-item", if *is_open { "open" } else { "" })}>
            <button class="faq-question" onclick={toggle}>
                <span class="question-text">{ props.entry.question.clone() }</span>
                <span class="toggle-icon">{if *is_open { "−" } else { "+" }}</span>
            </button>
            <div class="faq-answer">
                <p>{ props.entry.answer.clone() }</p>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FaqTabsProps {
    pub categories: Vec<FaqCategory>,
}

/// One category visible at a time, picked with the buttons on top.
#[function_component(FaqTabs)]
pub fn faq_tabs(props: &FaqTabsProps) -> Html {
    let first = props.categories.first().map(|c| c.id.clone()).unwrap_or_default();
    let active = use_state(move || first);

    html! {
        <section id="faq" class="faq-section">
            <h2>{"Frequently Asked Questions"}</h2>
            <div class="faq-categories">
                { for props.categories.iter().map(|category| {
                    let is_active = *active == category.id;
                    let onclick = {
                        let active = active.clone();
                        let id = category.id.clone();
                        Callback::from(move |_: MouseEvent| active.set(id.clone()))
                    };
                    html! {
                        <button
                            class={classes!("category-btn", is_active.then(|| "active"))}
                            data-category={category.id.clone()}
                            {onclick}
                        >
                            { category.label.clone() }
                        </button>
                    }
                }) }
            </div>
            { for props.categories.iter().map(|category| html! {
                <div
                    id={category.id.clone()}
                    class={classes!("faq-category", (*active == category.id).then(|| "active"))}
                >
                    { for category.entries.iter().map(|entry| html! {
                        <FaqItem entry={entry.clone()} />
                    }) }
                </div>
            }) }
        </section>
    }
}
