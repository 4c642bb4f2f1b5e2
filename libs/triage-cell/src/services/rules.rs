// libs/triage-cell/src/services/rules.rs
//
// Keyword rule-table symptom classifier. This is the deterministic fallback
// tier of the recommendation feature; richer classifiers sit outside this
// service and degrade to exactly this table.
use crate::models::SpecialtyRecommendation;

pub const GENERAL_PRACTICE: &str = "General Practice";

const MAX_RECOMMENDATIONS: usize = 3;

struct Rule {
    keywords: &'static [&'static str],
    specialty: &'static str,
    confidence: u8,
    reasoning: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        keywords: &["headache", "dizziness", "migraine", "neuralgia"],
        specialty: "Neurology",
        confidence: 85,
        reasoning: "Symptoms point to a neurological problem",
    },
    Rule {
        keywords: &["chest pain", "palpitation", "shortness of breath", "arrhythmia"],
        specialty: "Cardiology",
        confidence: 90,
        reasoning: "Symptoms may indicate a heart condition",
    },
    Rule {
        keywords: &["vision", "eyes", "watery eyes", "eye pain"],
        specialty: "Ophthalmology",
        confidence: 95,
        reasoning: "Vision problems need an ophthalmologist",
    },
    Rule {
        keywords: &["throat", "runny nose", "cough", "ear", "hearing"],
        specialty: "Otolaryngology",
        confidence: 88,
        reasoning: "Symptoms of an ear, nose or throat condition",
    },
    Rule {
        keywords: &["rash", "itching", "skin", "spots", "dermatitis"],
        specialty: "Dermatology",
        confidence: 92,
        reasoning: "Skin problems need a dermatologist",
    },
    Rule {
        keywords: &["stomach", "nausea", "vomiting", "diarrhea", "constipation"],
        specialty: "Gastroenterology",
        confidence: 87,
        reasoning: "Digestive symptoms",
    },
];

/// Match a symptom description against the rule table. Always yields at
/// least one recommendation: general practice backstops everything, either
/// as the only match or as the lower-confidence alternative.
pub fn recommend(symptoms: &str) -> Vec<SpecialtyRecommendation> {
    let symptoms = symptoms.to_lowercase();
    let mut recommendations: Vec<SpecialtyRecommendation> = RULES
        .iter()
        .filter(|rule| rule.keywords.iter().any(|k| symptoms.contains(k)))
        .map(|rule| SpecialtyRecommendation {
            specialty: rule.specialty,
            confidence: rule.confidence,
            reasoning: rule.reasoning,
        })
        .collect();

    if recommendations.is_empty() {
        recommendations.push(SpecialtyRecommendation {
            specialty: GENERAL_PRACTICE,
            confidence: 70,
            reasoning: "General symptoms, start with a general practitioner",
        });
    } else {
        recommendations.push(SpecialtyRecommendation {
            specialty: GENERAL_PRACTICE,
            confidence: 60,
            reasoning: "Alternative for a general consultation",
        });
    }

    recommendations.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}
