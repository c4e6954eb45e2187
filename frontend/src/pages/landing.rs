use yew::prelude::*;
use yew_hooks::use_window_size;

use crate::components::carousel::{Carousel, VideoCarousel};
use crate::components::contact_section::ContactSection;
use crate::components::faq_tabs::{FaqCategory, FaqEntry, FaqTabs};
use crate::components::hero::HeroCarousel;
use crate::components::info_popup::{InfoPopup, InfoSection};
use crate::components::popup::TimedPopup;
use crate::components::testimonial::{Story, Testimonials};

const INFO_CAROUSEL_BREAKPOINT: f64 = 992.0;
const INFO_CAROUSEL_INTERVAL_MS: u32 = 4_000;
const HIGHLIGHTS: [(&str, &str); 3] = [
    ("Free first consultation", "Meet a specialist at no cost."),
    ("Same-day callback", "Our team calls you back within hours."),
    ("Transparent pricing", "Costs are shared before you commit."),
];
const MAP_EMBED: &str = "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d3888!2d77.5946!3d12.9716";

fn faq(question: &'static str, answer: &'static str) -> FaqEntry {
    FaqEntry {
        question: question.into(),
        answer: answer.into(),
    }
}

fn faq_categories() -> Vec<FaqCategory> {
    vec![
        FaqCategory {
            id: "general".into(),
            label: "General".into(),
            entries: vec![
                faq("Where is the centre?", "Our centre is in central Bengaluru, a short walk from the metro."),
                faq("Is the first consultation free?", "Yes. The first consultation with our specialist is free of charge."),
            ],
        },
        FaqCategory {
            id: "appointments".into(),
            label: "Appointments".into(),
            entries: vec![
                faq("How do I book?", "Fill in the form on this page and our team calls you back within one working day."),
                faq("Can I reschedule?", "Call the front desk at least a day in advance and we will find a new slot."),
            ],
        },
        FaqCategory {
            id: "payments".into(),
            label: "Payments".into(),
            entries: vec![
                faq("Which payment methods do you accept?", "UPI, cards and net banking. EMI plans are available on request."),
            ],
        },
    ]
}

fn stories() -> Vec<Story> {
    vec![
        Story {
            author: "Priya, Whitefield".into(),
            quote: "The team explained every step and called back the same day.".into(),
            video: "/assets/testimonials/priya.mp4".into(),
            poster: "/assets/testimonials/priya.jpg".into(),
        },
        Story {
            author: "Rahul, Jayanagar".into(),
            quote: "Booking took two minutes and the consultation was genuinely free.".into(),
            video: "/assets/testimonials/rahul.mp4".into(),
            poster: "/assets/testimonials/rahul.jpg".into(),
        },
        Story {
            author: "Meera, Hebbal".into(),
            quote: "Friendly staff and no waiting around at the centre.".into(),
            video: "/assets/testimonials/meera.mp4".into(),
            poster: "/assets/testimonials/meera.jpg".into(),
        },
    ]
}

fn info_sections() -> Vec<InfoSection> {
    vec![
        InfoSection {
            id: "about-centre".into(),
            title: "About our Bengaluru centre".into(),
            body: "Opened to serve families across the city, the centre brings consultations, diagnostics and follow-ups under one roof.".into(),
        },
        InfoSection {
            id: "our-approach".into(),
            title: "Our approach".into(),
            body: "Every plan starts with a conversation. We explain options, timelines and costs before anything is booked.".into(),
        },
        InfoSection {
            id: "visiting".into(),
            title: "Visiting the centre".into(),
            body: "Parking is available on site. Bring any previous reports to your first appointment.".into(),
        },
    ]
}

#[function_component(InfoCards)]
fn info_cards() -> Html {
    let (width, _) = use_window_size();
    let cards = HIGHLIGHTS.iter().map(|(title, text)| html! {
        <div class="info-card">
            <h3>{ *title }</h3>
            <p>{ *text }</p>
        </div>
    });

    if width < INFO_CAROUSEL_BREAKPOINT {
        html! {
            <Carousel class="mobile-info-carousel" autoplay_ms={Some(INFO_CAROUSEL_INTERVAL_MS)}>
                { for cards }
            </Carousel>
        }
    } else {
        html! {
            <div class="info-grid">{ for cards }</div>
        }
    }
}

#[function_component(Landing)]
pub fn landing() -> Html {
    html! {
        <div class="landing-page">
            <HeroCarousel
                video="/assets/hero.mp4"
                thumbnail="/assets/hero-thumbnail.jpg"
                images={vec![AttrValue::from("/assets/hero-2.jpg"), AttrValue::from("/assets/hero-3.jpg")]}
            >
                <h1>{"Expert care in Bengaluru"}</h1>
                <p class="hero-subtitle">{"Book a free consultation with our specialists today."}</p>
                <a href="#contact" class="hero-cta">{"Get a callback"}</a>
            </HeroCarousel>

            <section class="highlights">
                <InfoCards />
            </section>

            <section class="gallery">
                <h2>{"Inside the centre"}</h2>
                <Carousel class="image-swiper">
                    <img src="/assets/gallery/reception.jpg" alt="Reception" />
                    <img src="/assets/gallery/consultation.jpg" alt="Consultation room" />
                    <img src="/assets/gallery/lab.jpg" alt="Lab" />
                </Carousel>
            </section>

            <section class="videos">
                <h2>{"Meet our specialists"}</h2>
                <VideoCarousel videos={vec![
                    AttrValue::from("/assets/videos/specialist-1.mp4"),
                    AttrValue::from("/assets/videos/specialist-2.mp4"),
                    AttrValue::from("/assets/videos/specialist-3.mp4"),
                ]} />
            </section>

            <section class="testimonials">
                <h2>{"What our visitors say"}</h2>
                <Testimonials stories={stories()} />
            </section>

            <ContactSection map_embed={MAP_EMBED} />

            <FaqTabs categories={faq_categories()} />

            <footer class="landing-footer">
                <InfoPopup sections={info_sections()} />
            </footer>

            <TimedPopup />
        </div>
    }
}
