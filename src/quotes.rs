//! Static quote lists for the scheduled messages.
//!
//! Content is externally curated and opaque to the selection policy; the
//! bot only ever picks one entry uniformly at random.

use rand::Rng;

/// Quotes for the daily morning motivation post.
pub const MORNING_QUOTES: &[&str] = &[
    "Small steps every day beat big plans someday.",
    "You don't need to feel ready. You need to start.",
    "Consistency is a superpower nobody is born with.",
    "Today's practice is tomorrow's instinct.",
    "Show up for ten minutes. The rest usually follows.",
    "Progress hides in the days that feel ordinary.",
    "The best time to practice was yesterday. The second best is now.",
];

/// Quotes for the daily afternoon reminder ping.
pub const REMINDER_QUOTES: &[&str] = &[
    "Quick check-in: did you give your brain its daily rep?",
    "A short focused session counts. Zero doesn't.",
    "Five minutes of thinking beats an hour of scrolling.",
    "Your future self is watching. Make them smile.",
    "Still time today. Pick one small thing and finish it.",
    "Momentum is built one unglamorous afternoon at a time.",
];

/// Quotes posted alongside a freshly served problem.
pub const NEW_PROBLEM_QUOTES: &[&str] = &[
    "Fresh challenge just dropped. Take it apart slowly.",
    "New problem, same rule: understand before you code.",
    "Here's one to chew on. One good idea is enough.",
    "Don't aim for clever. Aim for clear.",
    "Read it twice, solve it once.",
    "Struggling is the workout. Enjoy the burn.",
];

/// Picks a uniformly random entry, or an empty string for an empty list.
pub fn pick_random<R: Rng + ?Sized>(quotes: &[&str], rng: &mut R) -> String {
    if quotes.is_empty() {
        return String::new();
    }
    quotes[rng.gen_range(0..quotes.len())].to_owned()
}
