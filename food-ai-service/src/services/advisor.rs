//! Rule-based dietary risk scoring.
//!
//! Each recognized condition owns one or more rules. A rule that fires adds
//! its points, records its flag and, for most rules, contributes an advice
//! sentence. The final score is capped at [`MAX_RISK_SCORE`].

use crate::models::{AdviceResult, Condition, FoodProfile};

pub const MAX_RISK_SCORE: u32 = 100;

pub const FALLBACK_ADVICE: &str = "No major risks detected. Enjoy in moderation.";

struct Rule {
    condition: Condition,
    points: u32,
    flag: &'static str,
    advice: Option<&'static str>,
    fires: fn(&FoodProfile) -> bool,
}

const RULES: &[Rule] = &[
    Rule {
        condition: Condition::Diabetic,
        points: 30,
        flag: "High carb",
        advice: Some("Reduce starchy ingredients or use low-GI substitutes."),
        fires: sugary_or_starchy,
    },
    Rule {
        condition: Condition::Hypertensive,
        points: 20,
        flag: "Salt content",
        advice: Some("Avoid adding salt; use natural spices."),
        fires: salted,
    },
    Rule {
        condition: Condition::Hypertensive,
        points: 15,
        flag: "High fat",
        advice: None,
        fires: high_fat,
    },
    Rule {
        condition: Condition::WeightLoss,
        points: 25,
        flag: "High calorie",
        advice: Some("Consider smaller portions or reduce oil usage."),
        fires: high_calorie,
    },
    Rule {
        condition: Condition::Malnourished,
        points: 15,
        flag: "Low protein",
        advice: Some("Add protein-rich sides like beans or eggs."),
        fires: low_protein,
    },
    Rule {
        condition: Condition::PregnantOrNursing,
        points: 10,
        flag: "Low protein for pregnancy",
        advice: Some("Increase protein with fish, legumes, or eggs."),
        fires: low_protein,
    },
    Rule {
        condition: Condition::CholesterolWatch,
        points: 20,
        flag: "Cholesterol risk",
        advice: Some("Avoid palm oil and fried foods."),
        fires: cholesterol_risk,
    },
];

fn sugary_or_starchy(p: &FoodProfile) -> bool {
    p.has_ingredient("sugar") || p.carbs > 40.0
}

fn salted(p: &FoodProfile) -> bool {
    p.has_ingredient("salt")
}

fn high_fat(p: &FoodProfile) -> bool {
    p.fat > 25.0
}

fn high_calorie(p: &FoodProfile) -> bool {
    p.calories > 400.0
}

fn low_protein(p: &FoodProfile) -> bool {
    p.protein < 10.0
}

fn cholesterol_risk(p: &FoodProfile) -> bool {
    p.has_ingredient("palm oil") || p.fat > 25.0
}

/// Score `profile` against `conditions`.
///
/// Conditions are evaluated in the order given and once per occurrence, so a
/// repeated tag repeats its points and flags. Unknown tags are ignored. Advice
/// sentences keep their first-occurrence order.
pub fn evaluate<S: AsRef<str>>(profile: &FoodProfile, conditions: &[S]) -> AdviceResult {
    let mut total: u32 = 0;
    let mut flags = Vec::new();
    let mut advice: Vec<&'static str> = Vec::new();

    for condition in conditions
        .iter()
        .filter_map(|tag| Condition::from_tag(tag.as_ref()))
    {
        for rule in RULES.iter().filter(|r| r.condition == condition) {
            if !(rule.fires)(profile) {
                continue;
            }
            total = total.saturating_add(rule.points);
            flags.push(rule.flag.to_string());
            if let Some(sentence) = rule.advice {
                if !advice.contains(&sentence) {
                    advice.push(sentence);
                }
            }
        }
    }

    let advice = if advice.is_empty() {
        FALLBACK_ADVICE.to_string()
    } else {
        advice.join(" ")
    };

    AdviceResult {
        advice,
        risk_score: total.min(MAX_RISK_SCORE),
        flags,
    }
}
