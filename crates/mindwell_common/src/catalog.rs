//! Static pool of daily wellness tasks and wisdom quotes.
//!
//! Selection is randomized; the pool itself never changes.

use crate::record::{Difficulty, TaskCategory, TaskTemplate};
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

/// A quote with the life rule it illustrates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wisdom {
    pub rule: &'static str,
    pub description: &'static str,
    pub quote: &'static str,
    pub movie: &'static str,
    pub wisdom: &'static str,
}

pub const WISDOM: &[Wisdom] = &[
    Wisdom {
        rule: "Gratitude over Comparison",
        description: "Appreciate what you have instead of comparing with others",
        quote: "Itni shiddat se maine tumhe paane ki koshish ki hai, ki har zarre ne mujse tumse milane ki saazish ki hai.",
        movie: "Om Shanti Om",
        wisdom: "The universe conspires to help those who truly appreciate what they seek",
    },
    Wisdom {
        rule: "Focus on What You Can Control",
        description: "Don't waste energy on what's beyond your influence",
        quote: "Haar ke jeetne wale ko hi Baazigar kehte hain.",
        movie: "Baazigar",
        wisdom: "True champions are those who rise after falling",
    },
    Wisdom {
        rule: "Reframe Problems as Opportunities",
        description: "Every challenge is a teacher in disguise",
        quote: "Zindagi mein kuch banna ho, kuch hasil karna ho, toh hamesha dil ki suno.",
        movie: "3 Idiots",
        wisdom: "Follow your heart to find your true path",
    },
    Wisdom {
        rule: "Be Present, Not Past or Future Stuck",
        description: "Value today, not regrets or future worries",
        quote: "Kal ho na ho.",
        movie: "Kal Ho Naa Ho",
        wisdom: "Tomorrow may not come, so live fully today",
    },
    Wisdom {
        rule: "Progress, Not Perfection",
        description: "Take small steps daily instead of seeking perfection",
        quote: "All izz well.",
        movie: "3 Idiots",
        wisdom: "When you believe all is well, you create space for solutions",
    },
    Wisdom {
        rule: "Seek Learning, Not Just Success",
        description: "Failures are lessons, not endings",
        quote: "Picture abhi baaki hai mere dost.",
        movie: "Om Shanti Om",
        wisdom: "Your story is still being written",
    },
    Wisdom {
        rule: "Kindness as a Strength",
        description: "Be kind to yourself and others, it's a superpower",
        quote: "Insaan ki asli pehchaan uske dukh mein hoti hai, sukh mein toh sab ache lagte hain.",
        movie: "Munna Bhai MBBS",
        wisdom: "True character is revealed in difficult times",
    },
];

pub const MOTIVATIONAL_MESSAGES: &[&str] = &[
    "🌟 You're building something beautiful - your mental wellness!",
    "💪 Every small step is a victory worth celebrating!",
    "🌱 Like a garden, your mind grows stronger with daily care!",
    "✨ Your commitment to self-care is inspiring!",
    "🎯 Progress, not perfection - you're doing amazing!",
    "🌈 Each day you choose wellness, you choose life!",
    "🚀 Your journey matters, and you're not walking it alone!",
    "💙 Taking care of your mental health is the bravest thing you can do!",
];

fn task(
    category: TaskCategory,
    title: &str,
    description: &str,
    duration_minutes: u32,
    difficulty: Difficulty,
    wisdom: Option<&str>,
) -> TaskTemplate {
    TaskTemplate {
        category,
        title: title.to_string(),
        description: description.to_string(),
        duration_minutes,
        difficulty,
        wisdom: wisdom.map(str::to_string),
    }
}

/// Every task the generator can hand out
#[rustfmt::skip]
pub fn all_tasks() -> Vec<TaskTemplate> {
    use Difficulty::*;
    use TaskCategory::*;

    vec![
        // Cognitive
        task(Cognitive, "Brain Training Exercise", "Complete a 15-minute puzzle or brain training game", 15, Easy, None),
        task(Cognitive, "Challenge Your Mind", "Solve a riddle, learn a fascinating fact, or reflect deeply for five minutes", 10, Easy, Some("Small mental challenges build strong minds")),
        task(Cognitive, "Math Challenge", "Solve mathematical problems or equations for 20 minutes", 20, Medium, None),

        // Mindfulness
        task(Mindfulness, "Morning Calm Ritual", "Wake up before the noise begins and meet your calm with 10 minutes of silence", 10, Easy, Some("Peace begins in the quiet moments before the world awakens")),
        task(Mindfulness, "Sacred Reading", "Read something meaningful, sacred or inspiring, for just ten minutes", 10, Easy, Some("Nourish your soul with words that uplift")),
        task(Mindfulness, "Mindful Walking", "Take a walk without your phone and bring yourself into the moment", 20, Easy, Some("The present moment is your greatest teacher")),
        task(Mindfulness, "Deep Breathing Practice", "Breathe deeply and let your body and mind settle in silence for 10 minutes", 10, Easy, Some("In every breath lies the power to reset your mind")),
        task(Mindfulness, "Cultivate Stillness", "Listen more than you speak today and practice mindful listening in conversations", 30, Medium, Some("In silence, we find wisdom")),
        task(Mindfulness, "Phone-Free Pause", "Quiet the rush: pause and breathe before checking your phone for the first time", 5, Easy, Some("Your peace is more valuable than your notifications")),

        // Creative
        task(Creative, "Nourish Your Thoughts", "Write or reflect in a journal for 15 minutes about your inner world", 15, Easy, Some("Your thoughts deserve care and attention")),
        task(Creative, "Art Creation", "Draw, paint, or create something artistic for 30 minutes", 30, Medium, None),

        // Physical
        task(Physical, "Mindful Exercise", "Do 20-30 minutes of physical exercise or yoga with full presence", 25, Medium, None),
        task(Physical, "Hydration Mindfulness", "As you hydrate your body, consciously replenish your thoughts", 5, Easy, Some("Care for your body, nurture your mind")),

        // Social
        task(Social, "Meaningful Connection", "Call or message a friend or family member who matters to you", 15, Easy, Some("Relationships are the foundation of happiness")),
        task(Social, "Act of Purpose", "Do one small act that lifts someone else up", 20, Medium, Some("Kindness multiplies when shared")),
        task(Social, "Book Support Time", "When things get heavy, book time with someone who cares", 30, Medium, Some("Seeking help is a sign of strength, not weakness")),

        // Learning
        task(Learning, "Learn Something New", "Spend 30 minutes learning about a topic that interests you", 30, Medium, None),
        task(Learning, "Read Educational Content", "Read articles or books that expand your knowledge for 45 minutes", 45, Hard, None),

        // Gratitude and positivity
        task(Mindfulness, "Gratitude Grounding", "Name three good things from your life this morning", 5, Easy, Some("Gratitude turns what we have into enough")),
        task(Mindfulness, "Small Win Celebration", "Make one small win your first act today and celebrate consistency", 10, Easy, Some("Small steps build strong habits")),
        task(Mindfulness, "Mood Awareness", "Track your mood and emotions; awareness is the first step to any positive change", 5, Easy, Some("Understanding yourself is the beginning of transformation")),
    ]
}

/// Pick `count` distinct tasks from the pool
pub fn generate_daily_tasks<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<TaskTemplate> {
    all_tasks()
        .choose_multiple(rng, count)
        .cloned()
        .collect()
}

pub fn random_wisdom<R: Rng + ?Sized>(rng: &mut R) -> &'static Wisdom {
    WISDOM.choose(rng).unwrap_or(&WISDOM[0])
}

/// Same quote all day, a different one tomorrow
pub fn todays_wisdom(date: NaiveDate) -> &'static Wisdom {
    let key = date.format("%a %b %d %Y").to_string();
    let hash = key
        .chars()
        .fold(0i32, |acc, c| acc.wrapping_shl(5).wrapping_sub(acc).wrapping_add(c as i32));
    let index = (hash.unsigned_abs() as usize) % WISDOM.len();
    &WISDOM[index]
}

pub fn motivational_message<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    MOTIVATIONAL_MESSAGES
        .choose(rng)
        .copied()
        .unwrap_or(MOTIVATIONAL_MESSAGES[0])
}
