use gloo_timers::callback::Timeout;
use web_sys::HtmlMediaElement;
use yew::prelude::*;

use super::carousel::Carousel;
use super::media;

const REVEAL_DELAY_MS: u32 = 100;

/// What the video slide does when the deck reports its active index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeroCue {
    /// First report after mount: start the video under the headline.
    PlayCovered,
    /// Slid back onto the video: play, then fade the cover out.
    Reveal,
    /// Left the video: stop it and restore the cover.
    Cover,
    Stay,
}

fn hero_cue(previous: Option<usize>, index: usize) -> HeroCue {
    match (previous, index) {
        (None, 0) => HeroCue::PlayCovered,
        (None, _) => HeroCue::Cover,
        (Some(0), 0) => HeroCue::Stay,
        (Some(_), 0) => HeroCue::Reveal,
        (Some(_), _) => HeroCue::Cover,
    }
}

#[derive(Properties, PartialEq)]
pub struct HeroCarouselProps {
    pub video: AttrValue,
    pub thumbnail: AttrValue,
    #[prop_or_default]
    pub images: Vec<AttrValue>,
    #[prop_or_default]
    pub children: Children,
}

/// Hero banner: a video on the first slide, stills after it.
#[function_component(HeroCarousel)]
pub fn hero_carousel(props: &HeroCarouselProps) -> Html {
    let video_ref = use_node_ref();
    let covered = use_state(|| true);
    let active = use_mut_ref(|| None::<usize>);
    let reveal = use_mut_ref(|| None::<Timeout>);

    let on_change = {
        let video_ref = video_ref.clone();
        let covered = covered.clone();
        let active = active.clone();
        let reveal = reveal.clone();
        Callback::from(move |index: usize| {
            let cue = hero_cue(active.borrow_mut().replace(index), index);
            let Some(video) = video_ref.cast::<HtmlMediaElement>() else {
                return;
            };
            match cue {
                HeroCue::PlayCovered => media::play(&video),
                HeroCue::Reveal => {
                    media::play(&video);
                    let covered = covered.clone();
                    *reveal.borrow_mut() =
                        Some(Timeout::new(REVEAL_DELAY_MS, move || covered.set(false)));
                }
                HeroCue::Cover => {
                    reveal.borrow_mut().take();
                    media::pause_and_rewind(&video);
                    covered.set(true);
                }
                HeroCue::Stay => {}
            }
        })
    };

    let on_play = {
        let video_ref = video_ref.clone();
        let covered = covered.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(video) = video_ref.cast::<HtmlMediaElement>() {
                media::play(&video);
                covered.set(false);
            }
        })
    };

    let on_can_play = {
        let video_ref = video_ref.clone();
        Callback::from(move |_: Event| {
            if *active.borrow() == Some(0) {
                if let Some(video) = video_ref.cast::<HtmlMediaElement>() {
                    media::play(&video);
                }
            }
        })
    };

    let cover_style = if *covered { "opacity: 1;" } else { "opacity: 0;" };

    html! {
        <Carousel class="hero-carousel" {on_change}>
            <div class="hero-video-slide">
                <video
                    ref={video_ref}
                    class="hero-video"
                    src={props.video.clone()}
                    muted=true
                    playsinline=true
                    oncanplay={on_can_play}
                />
                <img class="hero-thumbnail" src={props.thumbnail.clone()} alt="" style={cover_style} />
                <div class="video-overlay" style={cover_style}>
                    { for props.children.iter() }
                </div>
                <button class="play-button" aria-label="Play video" onclick={on_play}>{"▶"}</button>
            </div>
            { for props.images.iter().map(|src| html! {
                <img class="hero-image" src={src.clone()} alt="" />
            }) }
        </Carousel>
    }
}
