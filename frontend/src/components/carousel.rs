use gloo_timers::callback::Timeout;
use web_sys::HtmlMediaElement;
use yew::prelude::*;

use super::media;

/// Index math for a slide deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    len: usize,
    active: usize,
    looped: bool,
}

impl CarouselState {
    pub fn new(len: usize, looped: bool) -> Self {
        Self { len, active: 0, looped }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn next(&self) -> Self {
        let active = if self.active + 1 < self.len {
            self.active + 1
        } else if self.looped {
            0
        } else {
            self.active
        };
        Self { active, ..*self }
    }

    pub fn prev(&self) -> Self {
        let active = if self.active > 0 {
            self.active - 1
        } else if self.looped {
            self.len.saturating_sub(1)
        } else {
            0
        };
        Self { active, ..*self }
    }

    /// Same deck with `len` slides; the active index is clamped into range.
    pub fn resized(&self, len: usize) -> Self {
        Self {
            len,
            active: self.active.min(len.saturating_sub(1)),
            looped: self.looped,
        }
    }

    pub fn go(&self, index: usize) -> Self {
        if index < self.len {
            Self { active: index, ..*self }
        } else {
            *self
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct CarouselProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or(true)]
    pub looped: bool,
    #[prop_or_default]
    pub autoplay_ms: Option<u32>,
    #[prop_or(true)]
    pub navigation: bool,
    /// Fired with the active index on first render and after every change.
    #[prop_or_default]
    pub on_change: Callback<usize>,
    pub children: Children,
}

#[function_component(Carousel)]
pub fn carousel(props: &CarouselProps) -> Html {
    let len = props.children.len();
    let state = use_state(|| CarouselState::new(len, props.looped));
    let deck = CarouselState { looped: props.looped, ..state.resized(len) };

    {
        let on_change = props.on_change.clone();
        use_effect_with_deps(
            move |active: &usize| {
                on_change.emit(*active);
                || ()
            },
            deck.active(),
        );
    }

    {
        let state = state.clone();
        use_effect_with_deps(
            move |(_, interval): &(usize, Option<u32>)| {
                let timeout = interval.map(|ms| {
                    let state = state.clone();
                    Timeout::new(ms, move || state.set(deck.next()))
                });
                move || drop(timeout)
            },
            (deck.active(), props.autoplay_ms),
        );
    }

    let prev = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.set(deck.prev()))
    };
    let next = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.set(deck.next()))
    };

    let active = deck.active();

    html! {
        <div class={classes!("carousel", props.class.clone())}>
            <div class="carousel-track">
                { for props.children.iter().enumerate().map(|(i, slide)| html! {
                    <div
                        class={classes!("carousel-slide", (i == active).then(|| "active"))}
                        aria-hidden={(i != active).to_string()}
                    >
                        { slide }
                    </div>
                }) }
            </div>
            if props.navigation && len > 1 {
                <>
                    <button class="carousel-prev" aria-label="Previous slide" onclick={prev}>{"‹"}</button>
                    <button class="carousel-next" aria-label="Next slide" onclick={next}>{"›"}</button>
                </>
            }
            <div class="carousel-pagination">
                { for (0..len).map(|i| {
                    let state = state.clone();
                    let onclick = Callback::from(move |_: MouseEvent| state.set(deck.go(i)));
                    html! {
                        <button
                            class={classes!("carousel-bullet", (i == active).then(|| "active"))}
                            aria-label={format!("Go to slide {}", i + 1)}
                            {onclick}
                        />
                    }
                }) }
            </div>
            <style>
            {r#".carousel { position: relative; overflow: hidden; }
            .carousel-slide { display: none; }
            .carousel-slide.active { display: block; }
            .carousel-prev, .carousel-next {
                position: absolute;
                top: 50%;
                transform: translateY(-50%);
                border: none;
                background: rgba(0, 0, 0, 0.4);
                color: #fff;
                font-size: 2rem;
                width: 44px;
                height: 44px;
                border-radius: 50%;
                cursor: pointer;
            }
            .carousel-prev { left: 0.5rem; }
            .carousel-next { right: 0.5rem; }
            .carousel-pagination { display: flex; justify-content: center; gap: 0.5rem; padding: 0.75rem 0; }
            .carousel-bullet { width: 10px; height: 10px; border-radius: 50%; border: none; background: #ccc; cursor: pointer; }
            .carousel-bullet.active { background: #333; }"#}
            </style>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoCarouselProps {
    pub videos: Vec<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
}

/// Carousel of clips where only the visible one plays.
#[function_component(VideoCarousel)]
pub fn video_carousel(props: &VideoCarouselProps) -> Html {
    let refs = use_memo(
        |count: &usize| (0..*count).map(|_| NodeRef::default()).collect::<Vec<_>>(),
        props.videos.len(),
    );

    let on_change = {
        let refs = refs.clone();
        Callback::from(move |active: usize| {
            for (i, node) in refs.iter().enumerate() {
                if let Some(video) = node.cast::<HtmlMediaElement>() {
                    if i == active {
                        media::play(&video);
                    } else {
                        media::pause_and_rewind(&video);
                    }
                }
            }
        })
    };

    html! {
        <Carousel class={classes!("video-swiper", props.class.clone())} {on_change}>
            { for props.videos.iter().zip(refs.iter()).map(|(src, node)| html! {
                <video ref={node.clone()} src={src.clone()} muted=true playsinline=true preload="metadata" />
            }) }
        </Carousel>
    }
}
