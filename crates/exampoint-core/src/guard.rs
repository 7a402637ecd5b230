//! Feature gating: decide what a tier-locked feature shows for the current session.

use serde::Serialize;

use crate::plans;
use crate::session::Session;
use crate::tier::Tier;

/// Number of plan features listed in an upgrade prompt.
const PROMPT_HIGHLIGHTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emblem {
    Crown,
    Sparkles,
}

/// Upsell shown to a signed-in user whose tier is too low.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradePrompt {
    pub title: String,
    pub description: String,
    pub required_tier: Tier,
    pub plan_name: &'static str,
    pub highlights: Vec<&'static str>,
    pub current_plan: &'static str,
    pub price_label: String,
    pub emblem: Emblem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum GuardView {
    Granted,
    Hidden,
    SignUpRequired { title: String },
    UpgradeRequired(UpgradePrompt),
}

impl GuardView {
    pub fn is_granted(&self) -> bool {
        matches!(self, GuardView::Granted)
    }
}

#[derive(Debug, Clone)]
pub struct Guard {
    required: Tier,
    feature_name: Option<String>,
    show_upgrade_ui: bool,
}

impl Guard {
    pub fn new(required: Tier) -> Self {
        Self {
            required,
            feature_name: None,
            show_upgrade_ui: true,
        }
    }

    pub fn feature(mut self, name: impl Into<String>) -> Self {
        self.feature_name = Some(name.into());
        self
    }

    /// Render nothing instead of a sign-up or upgrade prompt when access is denied.
    pub fn without_upgrade_ui(mut self) -> Self {
        self.show_upgrade_ui = false;
        self
    }

    pub fn evaluate(&self, session: &Session) -> GuardView {
        if session.has_access(self.required) {
            return GuardView::Granted;
        }
        if !self.show_upgrade_ui {
            return GuardView::Hidden;
        }
        if !session.is_authenticated() {
            return GuardView::SignUpRequired {
                title: self.title("Sign Up Required"),
            };
        }

        let plan = plans::plan(self.required);
        GuardView::UpgradeRequired(UpgradePrompt {
            title: self.title("Upgrade Required"),
            description: format!("This feature requires the {} plan", plan.name),
            required_tier: self.required,
            plan_name: plan.name,
            highlights: plan.highlights(PROMPT_HIGHLIGHTS),
            current_plan: plans::plan(session.current_tier()).name,
            price_label: plan.price_label(),
            emblem: if self.required == Tier::Elite {
                Emblem::Crown
            } else {
                Emblem::Sparkles
            },
        })
    }

    fn title(&self, suffix: &str) -> String {
        match &self.feature_name {
            Some(name) => format!("{} - {}", name, suffix),
            None => suffix.to_string(),
        }
    }
}

/// The AI tutor is a BASIC feature.
pub fn tutor_guard() -> Guard {
    Guard::new(Tier::Basic).feature("AI Tutor")
}
