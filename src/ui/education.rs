/// Static "Learn About Scams" panel
use yew::prelude::*;

struct Card {
    title: &'static str,
    tips: [&'static str; 3],
}

const CARDS: [Card; 3] = [
    Card {
        title: "How to Spot a Scam",
        tips: [
            "Check for urgent, threatening language or unbelievable offers.",
            "Examine URLs carefully; watch out for subtle spelling differences.",
            "If something seems off, verify before clicking.",
        ],
    },
    Card {
        title: "Preventative Measures",
        tips: [
            "Use strong, unique passwords with multi-factor authentication.",
            "Keep your software and security patches up to date.",
            "Review your browsing habits regularly.",
        ],
    },
    Card {
        title: "Stay Informed",
        tips: [
            "Follow reputable cybersecurity blogs.",
            "Be aware of the latest phishing trends.",
            "Report scams to authorities promptly.",
        ],
    },
];

#[function_component(Education)]
pub fn education() -> Html {
    html! {
        <section class="section education-section">
            <h2>{"Learn About Scams"}</h2>
            <p class="education-intro">
                {"Understanding common scam tactics and how to protect yourself is essential. \
                  Below are some quick tips to keep in mind:"}
            </p>
            <div class="education-cards">
                {for CARDS.iter().map(|card| html! {
                    <div key={card.title} class="education-card">
                        <h3>{card.title}</h3>
                        <ul>
                            {for card.tips.iter().map(|tip| html! { <li>{*tip}</li> })}
                        </ul>
                    </div>
                })}
            </div>
        </section>
    }
}
