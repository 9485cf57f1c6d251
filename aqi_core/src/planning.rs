//! Summary guidance across a whole forecast.

use serde::Serialize;

use crate::advisory::Category;
use crate::stepper::ForecastPoint;

pub const WARN_UNHEALTHY: &str = "Avoid outdoor exercise. People with respiratory or cardiac conditions, children and older adults should stay indoors.";
pub const WARN_VERY_UNHEALTHY: &str =
    "If you must go outside, wear an N95/FFP2 mask and avoid crowded/traffic-heavy routes.";
pub const WARN_SENSITIVE: &str = "Consider moving outdoor activities to an indoor, well-ventilated area or rescheduling to a cleaner hour.";

/// Plan driven by the worst hour of the forecast.
///
/// An empty `warnings` list means normal outdoor activities are fine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityPlan {
    pub worst_category: Category,
    pub worst_label: &'static str,
    pub peak_value: f64,
    pub activity: &'static str,
    pub mask: &'static str,
    pub warnings: Vec<&'static str>,
}

impl ActivityPlan {
    /// `None` for an empty forecast.
    pub fn from_forecast(points: &[ForecastPoint]) -> Option<Self> {
        let worst = points
            .iter()
            .max_by(|a, b| a.category.cmp(&b.category).then(a.value.total_cmp(&b.value)))?;
        let category = worst.category;

        let warnings = [
            (Category::Unhealthy, WARN_UNHEALTHY),
            (Category::VeryUnhealthy, WARN_VERY_UNHEALTHY),
            (Category::UnhealthyForSensitive, WARN_SENSITIVE),
        ]
        .into_iter()
        .filter(|(at_least, _)| category >= *at_least)
        .map(|(_, text)| text)
        .collect();

        Some(Self {
            worst_category: category,
            worst_label: worst.label,
            peak_value: worst.value,
            activity: worst.advice.activity,
            mask: worst.advice.mask,
            warnings,
        })
    }

    #[inline]
    pub fn outdoor_ok(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::{AdvisoryClassifier, AdvisoryScheme};
    use chrono::NaiveDate;

    fn points(values: &[f64], scheme: AdvisoryScheme) -> Vec<ForecastPoint> {
        let c = AdvisoryClassifier::new(scheme);
        let base = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        values
            .iter()
            .zip(1u32..)
            .map(|(&v, h)| {
                let k = c.classify(v);
                ForecastPoint {
                    step: h,
                    time: base + chrono::Duration::hours(i64::from(h)),
                    value: v,
                    category: k.category,
                    label: k.label,
                    color: k.color,
                    advice: k.advice,
                    conditions: None,
                }
            })
            .collect()
    }

    #[test]
    fn clean_forecast_has_no_warnings() {
        let plan = ActivityPlan::from_forecast(&points(&[20.0, 45.0], AdvisoryScheme::Simple)).unwrap();
        assert_eq!(plan.worst_category, Category::Good);
        assert_eq!(plan.peak_value, 45.0);
        assert!(plan.outdoor_ok());
    }

    #[test]
    fn simple_unhealthy_gets_first_and_third_warning() {
        let plan =
            ActivityPlan::from_forecast(&points(&[60.0, 160.0, 90.0], AdvisoryScheme::Simple)).unwrap();
        assert_eq!(plan.worst_category, Category::Unhealthy);
        assert_eq!(plan.mask, "N95 mask recommended");
        assert_eq!(plan.warnings, vec![WARN_UNHEALTHY, WARN_SENSITIVE]);
    }

    #[test]
    fn extended_very_unhealthy_gets_all_warnings_in_order() {
        let plan = ActivityPlan::from_forecast(&points(&[350.0], AdvisoryScheme::Extended)).unwrap();
        assert_eq!(
            plan.warnings,
            vec![WARN_UNHEALTHY, WARN_VERY_UNHEALTHY, WARN_SENSITIVE]
        );
    }

    #[test]
    fn sensitive_band_only_suggests_rescheduling() {
        let plan = ActivityPlan::from_forecast(&points(&[150.0], AdvisoryScheme::Extended)).unwrap();
        assert_eq!(plan.warnings, vec![WARN_SENSITIVE]);
    }

    #[test]
    fn empty_forecast_has_no_plan() {
        assert!(ActivityPlan::from_forecast(&[]).is_none());
    }
}
