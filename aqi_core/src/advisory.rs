//! AQI → health category, display color and guidance.
//!
//! Every label in the system comes from one `AdvisoryClassifier`. Category
//! bands and guidance use separate threshold tables: mask advice, for
//! instance, changes at 150 while the simple category bands do not.
//!
//! All tables share one lookup rule: the first entry whose inclusive upper
//! bound is `>= value` wins, and the last entry is an unbounded catch-all.

use serde::Serialize;

/// Health category, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Good => "Good",
            Category::Moderate => "Moderate",
            Category::UnhealthyForSensitive => "Unhealthy for sensitive groups",
            Category::Unhealthy => "Unhealthy",
            Category::VeryUnhealthy => "Very Unhealthy",
            Category::Hazardous => "Hazardous",
        }
    }
}

/// Band table selection. One scheme per classifier; they are not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryScheme {
    /// Good ≤ 50, Moderate ≤ 100, Unhealthy above.
    #[default]
    Simple,
    /// Six bands at 50/100/200/300/400, Hazardous above.
    Extended,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvisoryBand {
    /// Inclusive upper bound; `f64::INFINITY` for the catch-all.
    pub upper: f64,
    pub category: Category,
    pub color: &'static str,
}

const fn band(upper: f64, category: Category, color: &'static str) -> AdvisoryBand {
    AdvisoryBand {
        upper,
        category,
        color,
    }
}

const SIMPLE_BANDS: [AdvisoryBand; 3] = [
    band(50.0, Category::Good, "#16a34a"),
    band(100.0, Category::Moderate, "#f59e0b"),
    band(f64::INFINITY, Category::Unhealthy, "#ef4444"),
];

const EXTENDED_BANDS: [AdvisoryBand; 6] = [
    band(50.0, Category::Good, "#16a34a"),
    band(100.0, Category::Moderate, "#f59e0b"),
    band(200.0, Category::UnhealthyForSensitive, "#f97316"),
    band(300.0, Category::Unhealthy, "#ef4444"),
    band(400.0, Category::VeryUnhealthy, "#9f1239"),
    band(f64::INFINITY, Category::Hazardous, "#7c2d12"),
];

type Guidance = (f64, &'static str);

const SIMPLE_ACTIVITY: [Guidance; 3] = [
    (50.0, "Safe for all outdoor activities"),
    (100.0, "Sensitive groups should limit prolonged exertion"),
    (f64::INFINITY, "Avoid prolonged outdoor exertion"),
];

const SIMPLE_MASK: [Guidance; 3] = [
    (100.0, "No mask needed"),
    (150.0, "Mask recommended for sensitive groups"),
    (f64::INFINITY, "N95 mask recommended"),
];

const EXTENDED_ACTIVITY: [Guidance; 6] = [
    (50.0, "Safe for all outdoor activities"),
    (100.0, "OK for most, sensitive individuals should limit long exertion"),
    (200.0, "Sensitive groups: reduce prolonged/outdoor heavy exercise"),
    (300.0, "Limit outdoor activities; avoid prolonged or heavy exertion"),
    (400.0, "Avoid outdoor exertion; stay indoors if possible"),
    (f64::INFINITY, "Stay indoors, avoid all outdoor activity"),
];

const EXTENDED_MASK: [Guidance; 6] = [
    (50.0, "No mask needed"),
    (100.0, "Optional cloth/surgical mask"),
    (200.0, "Surgical mask recommended for sensitive persons"),
    (300.0, "Surgical/N95 for vulnerable; consider N95 if outdoors"),
    (400.0, "N95/FFP2 recommended if stepping out"),
    (f64::INFINITY, "N95/FFP2 required if you must go out"),
];

const VENTILATION: [Guidance; 2] = [
    (50.0, "Open windows for fresh air"),
    (f64::INFINITY, "Keep windows closed during peak traffic"),
];

/// One-line outlook for the current reading, shared by both schemes.
const RECOMMENDATION: [Guidance; 2] = [
    (50.0, "Air quality is good. Enjoy outdoor activities!"),
    (f64::INFINITY, "Air quality is acceptable."),
];

/// First entry whose upper bound is `>= value`; the last entry otherwise
/// (which also absorbs NaN).
fn first_at_or_above<T>(table: &[T], upper: impl Fn(&T) -> f64, value: f64) -> &T {
    table
        .iter()
        .find(|e| upper(e) >= value)
        .unwrap_or(&table[table.len() - 1])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub activity: &'static str,
    pub mask: &'static str,
    pub ventilation: &'static str,
}

/// Full advisory for one AQI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub category: Category,
    pub label: &'static str,
    pub color: &'static str,
    pub advice: Advice,
}

#[derive(Debug, Clone, Copy)]
pub struct AdvisoryClassifier {
    scheme: AdvisoryScheme,
    bands: &'static [AdvisoryBand],
    activity: &'static [Guidance],
    mask: &'static [Guidance],
}

impl Default for AdvisoryClassifier {
    fn default() -> Self {
        Self::new(AdvisoryScheme::Simple)
    }
}

impl AdvisoryClassifier {
    pub fn new(scheme: AdvisoryScheme) -> Self {
        match scheme {
            AdvisoryScheme::Simple => Self {
                scheme,
                bands: &SIMPLE_BANDS,
                activity: &SIMPLE_ACTIVITY,
                mask: &SIMPLE_MASK,
            },
            AdvisoryScheme::Extended => Self {
                scheme,
                bands: &EXTENDED_BANDS,
                activity: &EXTENDED_ACTIVITY,
                mask: &EXTENDED_MASK,
            },
        }
    }

    #[inline]
    pub fn scheme(&self) -> AdvisoryScheme {
        self.scheme
    }

    /// Bands in ascending order of upper bound.
    pub fn bands(&self) -> &'static [AdvisoryBand] {
        self.bands
    }

    pub fn band(&self, value: f64) -> &'static AdvisoryBand {
        first_at_or_above(self.bands, |b| b.upper, value)
    }

    #[inline]
    pub fn category(&self, value: f64) -> Category {
        self.band(value).category
    }

    pub fn advice(&self, value: f64) -> Advice {
        Advice {
            activity: first_at_or_above(self.activity, |g| g.0, value).1,
            mask: first_at_or_above(self.mask, |g| g.0, value).1,
            ventilation: first_at_or_above(&VENTILATION, |g| g.0, value).1,
        }
    }

    pub fn recommendation(&self, value: f64) -> &'static str {
        first_at_or_above(&RECOMMENDATION, |g| g.0, value).1
    }

    pub fn classify(&self, value: f64) -> Classification {
        let band = self.band(value);
        Classification {
            category: band.category,
            label: band.category.label(),
            color: band.color,
            advice: self.advice(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_boundaries_are_inclusive() {
        let c = AdvisoryClassifier::new(AdvisoryScheme::Simple);
        assert_eq!(c.category(50.0), Category::Good);
        assert_eq!(c.category(51.0), Category::Moderate);
        assert_eq!(c.category(100.0), Category::Moderate);
        assert_eq!(c.category(100.5), Category::Unhealthy);
        assert_eq!(c.category(10_000.0), Category::Unhealthy);
    }

    #[test]
    fn extended_bands() {
        let c = AdvisoryClassifier::new(AdvisoryScheme::Extended);
        assert_eq!(c.category(150.0), Category::UnhealthyForSensitive);
        assert_eq!(c.category(300.0), Category::Unhealthy);
        assert_eq!(c.category(301.0), Category::VeryUnhealthy);
        assert_eq!(c.category(401.0), Category::Hazardous);
        assert_eq!(c.classify(401.0).color, "#7c2d12");
    }

    #[test]
    fn mask_threshold_differs_from_category_threshold() {
        let c = AdvisoryClassifier::new(AdvisoryScheme::Simple);
        assert_eq!(c.advice(120.0).mask, "Mask recommended for sensitive groups");
        assert_eq!(c.advice(150.0).mask, "Mask recommended for sensitive groups");
        assert_eq!(c.advice(151.0).mask, "N95 mask recommended");
        assert_eq!(c.category(120.0), c.category(151.0));
    }

    #[test]
    fn ventilation_splits_at_50() {
        let c = AdvisoryClassifier::default();
        assert_eq!(c.advice(50.0).ventilation, "Open windows for fresh air");
        assert_eq!(
            c.advice(51.0).ventilation,
            "Keep windows closed during peak traffic"
        );
    }

    #[test]
    fn recommendation_splits_at_50_in_both_schemes() {
        for scheme in [AdvisoryScheme::Simple, AdvisoryScheme::Extended] {
            let c = AdvisoryClassifier::new(scheme);
            assert_eq!(
                c.recommendation(50.0),
                "Air quality is good. Enjoy outdoor activities!"
            );
            assert_eq!(c.recommendation(50.5), "Air quality is acceptable.");
            assert_eq!(c.recommendation(450.0), "Air quality is acceptable.");
        }
    }

    #[test]
    fn nan_falls_into_catch_all() {
        let c = AdvisoryClassifier::default();
        assert_eq!(c.category(f64::NAN), Category::Unhealthy);
    }
}
