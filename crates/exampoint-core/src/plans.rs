//! Plan table for the three subscription tiers.

use serde::Serialize;

use crate::tier::Tier;

/// Price and feature list for one tier.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub tier: Tier,
    pub name: &'static str,
    pub price: u32,
    pub currency: &'static str,
    pub interval: &'static str,
    pub features: &'static [&'static str],
}

impl Plan {
    /// e.g. `$7/month`.
    pub fn price_label(&self) -> String {
        format!("{}{}/{}", self.currency, self.price, self.interval)
    }

    pub fn highlights(&self, n: usize) -> Vec<&'static str> {
        self.features.iter().take(n).copied().collect()
    }
}

static FREE: Plan = Plan {
    tier: Tier::Free,
    name: "Free",
    price: 0,
    currency: "$",
    interval: "month",
    features: &[
        "3 AI Flashcard Sets Per Month",
        "5 Quiz Questions Per Day",
        "Basic Progress Tracking",
        "Study Streak Counter",
        "Limited to 1 Subject at a Time",
        "Ads Supported",
    ],
};

static BASIC: Plan = Plan {
    tier: Tier::Basic,
    name: "Basic",
    price: 7,
    currency: "$",
    interval: "month",
    features: &[
        "50 AI Flashcard Sets Per Month",
        "100 Quiz Questions Per Day",
        "AI Tutor Sessions (20 Questions/Day)",
        "Spaced Repetition Algorithm",
        "Progress Tracking Dashboard",
        "Multi-Exam Support (SAT, ACT, AP)",
        "Study Streak Tracking & Badges",
        "Up to 5 Active Subjects",
        "Upload Study Materials (PDF, Images)",
        "Ad-Free Experience",
    ],
};

static ELITE: Plan = Plan {
    tier: Tier::Elite,
    name: "Elite",
    price: 15,
    currency: "$",
    interval: "month",
    features: &[
        "Unlimited AI Flashcard Generation",
        "Unlimited Quiz Questions",
        "Unlimited AI Tutor Chat Sessions",
        "Priority Flashcard Generation (2x Faster)",
        "Advanced Analytics Dashboard",
        "Parent Dashboard & Weekly Reports",
        "Personalized Mastery Pathways",
        "Premium UI Themes",
        "Downloadable Study Pack PDFs",
        "Score Prediction & Target Planning",
        "Unlimited Active Subjects",
        "Video Lecture Upload & Analysis",
    ],
};

pub fn plan(tier: Tier) -> &'static Plan {
    match tier {
        Tier::Free => &FREE,
        Tier::Basic => &BASIC,
        Tier::Elite => &ELITE,
    }
}

pub fn all_plans() -> [&'static Plan; 3] {
    [&FREE, &BASIC, &ELITE]
}

/// Tiers strictly above `current`, lowest first.
pub fn upgrade_options(current: Tier) -> Vec<Tier> {
    Tier::ALL.into_iter().filter(|t| *t > current).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_labels() {
        assert_eq!(plan(Tier::Free).price_label(), "$0/month");
        assert_eq!(plan(Tier::Basic).price_label(), "$7/month");
        assert_eq!(plan(Tier::Elite).price_label(), "$15/month");
    }

    #[test]
    fn feature_counts_match_table() {
        assert_eq!(plan(Tier::Free).features.len(), 6);
        assert_eq!(plan(Tier::Basic).features.len(), 10);
        assert_eq!(plan(Tier::Elite).features.len(), 12);
        assert_eq!(plan(Tier::Basic).highlights(4).len(), 4);
    }

    #[test]
    fn upgrades_only_go_up() {
        assert_eq!(upgrade_options(Tier::Free), vec![Tier::Basic, Tier::Elite]);
        assert_eq!(upgrade_options(Tier::Basic), vec![Tier::Elite]);
        assert!(upgrade_options(Tier::Elite).is_empty());
    }
}
