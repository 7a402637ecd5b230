//! Checkout and subscription overview.
//!
//! Paid plans are bought on an external billing portal. We hand out the
//! redirect and never learn whether the payment went through.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Serialize;

use crate::plans;
use crate::session::Session;
use crate::tier::Tier;

const BILLING_PERIOD_DAYS: i64 = 30;
const MASKED_PAYMENT_METHOD: &str = "•••• 4242";
const OVERVIEW_FEATURES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    /// Applied in place (FREE needs no payment).
    Activated { tier: Tier },
    /// Send the user to the billing portal.
    Redirect { tier: Tier, url: String },
}

/// External links the site hands out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingLinks {
    pub billing_url: String,
    pub donation_url: String,
}

impl BillingLinks {
    pub fn new(billing_url: impl Into<String>, donation_url: impl Into<String>) -> Self {
        Self {
            billing_url: billing_url.into(),
            donation_url: donation_url.into(),
        }
    }

    pub fn checkout(&self, session: &mut Session, tier: Tier) -> CheckoutOutcome {
        if !tier.is_paid() {
            session.upgrade_tier(Tier::Free);
            return CheckoutOutcome::Activated { tier };
        }
        tracing::info!(%tier, "checkout: redirecting to billing portal");
        CheckoutOutcome::Redirect {
            tier,
            url: self.billing_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingDetails {
    pub next_billing_date: DateTime<Utc>,
    pub payment_method: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionOverview {
    pub tier: Tier,
    pub plan_name: &'static str,
    pub price: String,
    pub billing: Option<BillingDetails>,
    pub includes: Vec<&'static str>,
    pub upgrade_options: Vec<Tier>,
}

pub fn subscription_overview(session: &Session, now: DateTime<Utc>) -> SubscriptionOverview {
    let tier = session.current_tier();
    let plan = plans::plan(tier);
    let (price, billing) = if tier.is_paid() {
        (
            plan.price_label(),
            Some(BillingDetails {
                next_billing_date: now + ChronoDuration::days(BILLING_PERIOD_DAYS),
                payment_method: MASKED_PAYMENT_METHOD,
            }),
        )
    } else {
        ("Free forever".to_string(), None)
    };

    SubscriptionOverview {
        tier,
        plan_name: plan.name,
        price,
        billing,
        includes: plan.highlights(OVERVIEW_FEATURES),
        upgrade_options: plans::upgrade_options(tier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn links() -> BillingLinks {
        BillingLinks::new("https://billing.example/portal", "https://donate.example")
    }

    #[test]
    fn paid_checkout_redirects_without_changing_tier() {
        let mut s = Session::new(Duration::ZERO);
        let out = links().checkout(&mut s, Tier::Elite);
        assert_eq!(
            out,
            CheckoutOutcome::Redirect {
                tier: Tier::Elite,
                url: "https://billing.example/portal".to_string()
            }
        );
        assert_eq!(s.current_tier(), Tier::Free);
    }

    #[test]
    fn free_checkout_activates_in_place() {
        let mut s = Session::new(Duration::ZERO);
        s.upgrade_tier(Tier::Basic);
        let out = links().checkout(&mut s, Tier::Free);
        assert_eq!(out, CheckoutOutcome::Activated { tier: Tier::Free });
        assert_eq!(s.current_tier(), Tier::Free);
    }

    #[test]
    fn overview_for_free_has_no_billing() {
        let s = Session::new(Duration::ZERO);
        let o = subscription_overview(&s, Utc::now());
        assert_eq!(o.price, "Free forever");
        assert!(o.billing.is_none());
        assert_eq!(o.includes.len(), 3);
        assert_eq!(o.upgrade_options, vec![Tier::Basic, Tier::Elite]);
    }

    #[test]
    fn overview_for_paid_tier_bills_in_thirty_days() {
        let mut s = Session::new(Duration::ZERO);
        s.upgrade_tier(Tier::Basic);
        let now = Utc::now();
        let o = subscription_overview(&s, now);
        assert_eq!(o.price, "$7/month");
        let billing = o.billing.unwrap();
        assert_eq!(billing.next_billing_date - now, ChronoDuration::days(30));
        assert_eq!(billing.payment_method, "•••• 4242");
        assert_eq!(o.upgrade_options, vec![Tier::Elite]);
    }
}
