use web_sys::{HtmlElement, HtmlMediaElement};
use yew::prelude::*;
use yew_hooks::use_window_size;

use super::carousel::Carousel;
use super::media;

const TESTIMONIAL_VIDEOS: &str = ".testimonial-video-wrapper video";
const MOBILE_BREAKPOINT: f64 = 768.0;

#[derive(Clone, PartialEq)]
pub struct Story {
    pub author: AttrValue,
    pub quote: AttrValue,
    pub video: AttrValue,
    pub poster: AttrValue,
}

#[derive(Properties, PartialEq)]
pub struct TestimonialProps {
    pub story: Story,
}

/// Poster with a play button; the `<video>` is only created on first click.
#[function_component(Testimonial)]
pub fn testimonial(props: &TestimonialProps) -> Html {
    let wrapper_ref = use_node_ref();
    let video_ref = use_node_ref();
    let playing = use_state(|| false);

    let start = {
        let wrapper_ref = wrapper_ref.clone();
        let playing = playing.clone();
        Callback::from(move |_: MouseEvent| {
            // Wrappers hidden by the current layout do not start playback.
            let visible = wrapper_ref
                .cast::<HtmlElement>()
                .map_or(false, |wrapper| wrapper.offset_parent().is_some());
            if !visible {
                return;
            }
            media::pause_all(TESTIMONIAL_VIDEOS);
            playing.set(true);
        })
    };

    let toggle = {
        let video_ref = video_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(video) = video_ref.cast::<HtmlMediaElement>() {
                if video.paused() {
                    media::pause_all(TESTIMONIAL_VIDEOS);
                    media::play(&video);
                } else {
                    let _ = video.pause();
                }
            }
        })
    };

    let story = &props.story;
    html! {
        <figure class="testimonial">
            <div
                ref={wrapper_ref}
                class={classes!("testimonial-video-wrapper", playing.then(|| "playing"))}
                data-video={story.video.clone()}
                data-poster={story.poster.clone()}
            >
                if *playing {
                    <video
                        ref={video_ref}
                        src={story.video.clone()}
                        poster={story.poster.clone()}
                        autoplay=true
                        controls=true
                        playsinline=true
                        onclick={toggle}
                    />
                } else {
                    <>
                        <img class="poster" src={story.poster.clone()} alt={story.author.clone()} />
                        <button class="play-btn" aria-label="Play testimonial" onclick={start}>{"▶"}</button>
                    </>
                }
            </div>
            <figcaption>
                <blockquote>{ story.quote.clone() }</blockquote>
                <cite>{ story.author.clone() }</cite>
            </figcaption>
        </figure>
    }
}

#[derive(Properties, PartialEq)]
pub struct TestimonialsProps {
    pub stories: Vec<Story>,
}

/// Grid on wide screens, single-card slider on phones.
#[function_component(Testimonials)]
pub fn testimonials(props: &TestimonialsProps) -> Html {
    let (width, _) = use_window_size();
    let cards = props.stories.iter().map(|story| html! {
        <Testimonial story={story.clone()} />
    });

    if width < MOBILE_BREAKPOINT {
        html! {
            <div class="testimonials-slider">
                <Carousel class="swiper">
                    { for cards }
                </Carousel>
            </div>
        }
    } else {
        html! {
            <div class="testimonials-grid">
                { for cards }
            </div>
        }
    }
}
