//! Pattern Rule Bank.
//!
//! Pure configuration: ordered intent rules `(intent, patterns, confidence)` and
//! ordered entity rules `(entity type, patterns, normalizer)`. Every pattern is
//! compiled case-insensitively. The built-in bank covers French and English;
//! alternate banks can be built in code or loaded from JSON without touching
//! any other component.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

use super::intent::Intent;
use crate::error::AppError;

/// Type of an extracted entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Food,
    MealType,
    Time,
    Quantity,
    Emotion,
    Goal,
}

/// Canonicalization applied to a raw entity match.
///
/// A closed set rather than a function pointer so banks stay serializable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalizer {
    Lowercase,
    Food,
    MealType,
    Time,
    Quantity,
    Emotion,
    Goal,
}

impl Normalizer {
    pub fn apply(&self, raw: &str) -> String {
        let lower = raw.trim().to_lowercase().replace('’', "'");
        match self {
            Normalizer::Lowercase => lower,
            Normalizer::Food => normalize_food(lower),
            Normalizer::MealType => normalize_meal_type(lower),
            Normalizer::Time => normalize_time(lower),
            Normalizer::Quantity => normalize_quantity(lower),
            Normalizer::Emotion => normalize_emotion(lower),
            Normalizer::Goal => normalize_goal(lower),
        }
    }
}

/// Words whose trailing `s`/`x` is not a plural marker.
const INVARIANT_FOODS: &[&str] = &[
    "riz", "chips", "frites", "pâtes", "pates", "lentilles", "fries", "pois", "ananas", "couscous",
];

fn normalize_food(lower: String) -> String {
    if INVARIANT_FOODS.contains(&lower.as_str()) || lower.chars().count() <= 3 {
        return lower;
    }
    lower
        .strip_suffix('s')
        .or_else(|| lower.strip_suffix('x'))
        .map(str::to_string)
        .unwrap_or(lower)
}

fn normalize_meal_type(lower: String) -> String {
    let canonical = if lower.starts_with("petit") || lower == "breakfast" {
        "breakfast"
    } else if matches!(lower.as_str(), "déjeuner" | "dejeuner" | "lunch") {
        "lunch"
    } else if matches!(lower.as_str(), "dîner" | "diner" | "souper" | "dinner") {
        "dinner"
    } else if matches!(
        lower.as_str(),
        "goûter" | "gouter" | "collation" | "en-cas" | "snack"
    ) {
        "snack"
    } else if lower == "brunch" {
        "brunch"
    } else {
        return lower;
    };
    canonical.to_string()
}

fn normalize_time(lower: String) -> String {
    let canonical = match lower.as_str() {
        "ce matin" => Some("morning"),
        "ce midi" => Some("noon"),
        "cet après-midi" | "cet apres-midi" | "cette après-midi" | "cette apres-midi" => {
            Some("afternoon")
        }
        "ce soir" => Some("evening"),
        "hier soir" => Some("yesterday_evening"),
        "cette nuit" => Some("night"),
        "hier" => Some("yesterday"),
        "aujourd'hui" => Some("today"),
        "maintenant" => Some("now"),
        _ => None,
    };
    match canonical {
        Some(c) => c.to_string(),
        None => parse_clock(&lower).unwrap_or(lower),
    }
}

/// `"14h30"`, `"8 h"`, `"7:05"` -> `"HH:MM"`.
fn parse_clock(text: &str) -> Option<String> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let (hours, minutes) = compact.split_once(['h', ':'])?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = if minutes.is_empty() {
        0
    } else {
        minutes.parse().ok()?
    };
    (hours < 24 && minutes < 60).then(|| format!("{:02}:{:02}", hours, minutes))
}

fn normalize_quantity(lower: String) -> String {
    let split = lower
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
        .unwrap_or(lower.len());
    let (number, unit) = lower.split_at(split);
    let (number, unit) = if number.is_empty() {
        // Spelled-out amount: "deux portions"
        match unit.split_once(' ') {
            Some((word, rest)) => match word {
                "un" | "une" => ("1".to_string(), rest),
                "deux" => ("2".to_string(), rest),
                "trois" => ("3".to_string(), rest),
                "quatre" => ("4".to_string(), rest),
                "cinq" => ("5".to_string(), rest),
                _ => return lower.clone(),
            },
            None => return lower.clone(),
        }
    } else {
        (number.replace(',', "."), unit)
    };

    let unit = match unit.trim() {
        "g" | "gramme" | "grammes" => "g",
        "kg" | "kilo" | "kilos" => "kg",
        "ml" => "ml",
        "cl" => "cl",
        "l" | "litre" | "litres" => "l",
        "portion" | "portions" | "part" | "parts" => "portion",
        "tranche" | "tranches" | "slice" | "slices" => "slice",
        "verre" | "verres" | "glass" | "glasses" => "glass",
        "tasse" | "tasses" | "cup" | "cups" => "cup",
        "bol" | "bols" => "bowl",
        "cuillère" | "cuillères" | "cuillere" | "cuilleres" => "spoon",
        "calories" | "kcal" => "kcal",
        other => other,
    };
    format!("{} {}", number, unit)
}

fn normalize_emotion(lower: String) -> String {
    let starts = |prefixes: &[&str]| prefixes.iter().any(|p| lower.starts_with(p));
    let canonical = if starts(&["stress"]) {
        "stress"
    } else if starts(&["anxi", "angoiss"]) {
        "anxiety"
    } else if starts(&["trist", "déprim", "deprim", "sad"]) {
        "sadness"
    } else if starts(&["heureu", "content", "happy"]) {
        "joy"
    } else if starts(&["fier", "fièr", "proud"]) {
        "pride"
    } else if starts(&["énerv", "enerv", "en col", "angry"]) {
        "anger"
    } else if starts(&["frustr"]) {
        "frustration"
    } else if starts(&["seul", "lonely"]) {
        "loneliness"
    } else if starts(&["ennui", "ennuy", "bored"]) {
        "boredom"
    } else {
        return lower;
    };
    canonical.to_string()
}

fn normalize_goal(lower: String) -> String {
    let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));
    let canonical = if has(&["maintenir", "stabiliser"]) {
        "maintenance"
    } else if has(&["poids", "maigrir", "mincir", "kg", "lose weight"]) {
        "weight_loss"
    } else if has(&["muscle", "masse"]) {
        "muscle_gain"
    } else if has(&["manger", "rééquilibrage", "reequilibrage", "eat healthier"]) {
        "healthy_eating"
    } else {
        return lower;
    };
    canonical.to_string()
}

/// Compiles one bank pattern, always case-insensitive.
pub fn compile_pattern(pattern: &str) -> Result<Regex, AppError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| AppError::Pattern(format!("'{}': {}", pattern, e)))
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>, AppError> {
    patterns.iter().map(|p| compile_pattern(p)).collect()
}

/// Intent rule: the first matching pattern yields `confidence`.
#[derive(Debug, Clone)]
pub struct IntentRule {
    pub intent: Intent,
    pub patterns: Vec<Regex>,
    pub confidence: f32,
}

impl IntentRule {
    pub fn new(intent: Intent, patterns: &[&str], confidence: f32) -> Result<Self, AppError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(AppError::Validation(format!(
                "confidence {} for {} is outside [0, 1]",
                confidence, intent
            )));
        }
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        Ok(Self {
            intent,
            patterns: compile_all(&patterns)?,
            confidence,
        })
    }
}

/// Entity rule: every match of every pattern is a candidate entity.
#[derive(Debug, Clone)]
pub struct EntityRule {
    pub entity_type: EntityType,
    pub patterns: Vec<Regex>,
    pub normalizer: Option<Normalizer>,
}

impl EntityRule {
    pub fn new(
        entity_type: EntityType,
        patterns: &[&str],
        normalizer: Option<Normalizer>,
    ) -> Result<Self, AppError> {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        Ok(Self {
            entity_type,
            patterns: compile_all(&patterns)?,
            normalizer,
        })
    }

    pub fn normalize(&self, raw: &str) -> String {
        self.normalizer
            .unwrap_or(Normalizer::Lowercase)
            .apply(raw)
    }
}

/// Serialized form of an intent rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRuleSpec {
    pub intent: Intent,
    pub patterns: Vec<String>,
    pub confidence: f32,
}

/// Serialized form of an entity rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRuleSpec {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub patterns: Vec<String>,
    #[serde(default)]
    pub normalizer: Option<Normalizer>,
}

/// Serialized form of a whole bank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternBankSpec {
    #[serde(default)]
    pub intents: Vec<IntentRuleSpec>,
    #[serde(default)]
    pub entities: Vec<EntityRuleSpec>,
}

/// The two ordered rule tables consumed by the classifier and the extractor.
#[derive(Debug, Clone)]
pub struct PatternBank {
    intents: Vec<IntentRule>,
    entities: Vec<EntityRule>,
}

impl Default for PatternBank {
    fn default() -> Self {
        BUILTIN_BANK.clone()
    }
}

impl PatternBank {
    pub fn new(intents: Vec<IntentRule>, entities: Vec<EntityRule>) -> Self {
        Self { intents, entities }
    }

    pub fn intents(&self) -> &[IntentRule] {
        &self.intents
    }

    pub fn entities(&self) -> &[EntityRule] {
        &self.entities
    }

    /// Compiles a bank from its serialized form, rejecting bad regexes and
    /// out-of-range confidences.
    pub fn from_spec(spec: &PatternBankSpec) -> Result<Self, AppError> {
        let intents = spec
            .intents
            .iter()
            .map(|rule| {
                if !(0.0..=1.0).contains(&rule.confidence) {
                    return Err(AppError::Validation(format!(
                        "confidence {} for {} is outside [0, 1]",
                        rule.confidence, rule.intent
                    )));
                }
                Ok(IntentRule {
                    intent: rule.intent,
                    patterns: compile_all(&rule.patterns)?,
                    confidence: rule.confidence,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        let entities = spec
            .entities
            .iter()
            .map(|rule| {
                Ok(EntityRule {
                    entity_type: rule.entity_type,
                    patterns: compile_all(&rule.patterns)?,
                    normalizer: rule.normalizer,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self { intents, entities })
    }

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let spec: PatternBankSpec = serde_json::from_str(json)?;
        Self::from_spec(&spec)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }
}

// Ordered by specificity; the classifier keeps bank order on confidence ties.
const INTENT_TABLE: &[(Intent, &[&str], f32)] = &[
    (
        Intent::Hunger,
        &[
            r"\bj['’]ai (très |trop |tellement |vraiment |super |un peu )?faim\b",
            r"\b(affamée?s?|meurs de faim|crève la dalle)\b",
            // bare "faim" only where it cannot follow a negation
            r"^\s*faim\b",
            r"\b(grosse|petite|une) faim\b",
            r"\b(i['’]?m|i am|i feel|i['’]?m getting) (so |really |very )?(hungry|starving)\b",
            r"^\s*(so |really |very )?(hungry|starving)\b",
        ],
        0.95,
    ),
    (
        Intent::Thirst,
        &[
            r"\bj['’]ai soif\b",
            r"\b(soif|assoiffée?|déshydratée?)\b",
            r"\b(thirsty|dehydrated)\b",
        ],
        0.85,
    ),
    (
        Intent::Craving,
        &[
            r"\benvie (de |d['’])?(sucré|sucre|salé|chocolat|gras|grignoter|bonbons?|gâteaux?|chips)",
            r"\b(fringale|grignoter|grignotage|pulsion)\b",
            r"\b(craving|cravings|crave)\b",
        ],
        0.85,
    ),
    (
        Intent::Fatigue,
        &[
            r"\bfatigu[ée]e?s?\b",
            r"\b([ée]puis[ée]e?s?|crev[ée]e?s?|[ée]reint[ée]e?s?|k\.?o)\b",
            r"\b(tired|exhausted|sleepy|worn out)\b",
        ],
        0.7,
    ),
    (
        Intent::LowEnergy,
        &[
            r"\b(pas|plus|peu|manque) d['’]\s?[ée]nergie\b",
            r"\bsans [ée]nergie\b",
            r"\bcoup de (barre|mou|pompe)\b",
            r"\b(low energy|no energy|drained|sluggish)\b",
        ],
        0.65,
    ),
    (
        Intent::Stress,
        &[
            r"\bstress(?:[ée]e?s?|ant|ante)?\b",
            r"\b(sous pression|tendue?|sur les nerfs)\b",
            r"\b(stressed|under pressure)\b",
        ],
        0.8,
    ),
    (
        Intent::Anxiety,
        &[
            r"\b(anxieux|anxieuse|anxiété|angoiss[ée]e?s?|angoisse|inqui[eè]te?s?|panique)\b",
            r"\b(anxious|anxiety|worried|panic)\b",
        ],
        0.8,
    ),
    (
        Intent::Overwhelm,
        &[
            r"\b(débordée?s?|submergée?s?|trop de choses|je n['’]y arrive (pas|plus))\b",
            r"\bc['’]est trop (dur|lourd|compliqué|difficile)\b",
            r"\b(overwhelmed|it['’]?s (all )?too much)\b",
        ],
        0.8,
    ),
    (
        Intent::Frustration,
        &[
            r"\b(frustrée?s?|frustrant|frustration|énervée?s?|agacée?s?|marre|ras le bol)\b",
            r"\b(frustrated|annoyed|fed up)\b",
        ],
        0.75,
    ),
    (
        Intent::Celebration,
        &[
            r"\b(j['’]ai réussi|youpi|trop contente?|fière? de moi|victoire)\b",
            r"\bj['’]ai perdu \d+",
            r"\b(i did it|i made it|so proud|yay|nailed it)\b",
        ],
        0.85,
    ),
    (
        Intent::ProgressCheck,
        &[
            r"\b(mes progrès|ma progression|où j['’]en suis|mon bilan|mes résultats|combien j['’]ai perdu)\b",
            r"\b(my progress|how am i doing|my results)\b",
        ],
        0.8,
    ),
    (
        Intent::Plateau,
        &[
            r"\b(plateau|stagne|stagnation|je ne perds plus|ne bouge plus)\b",
            r"\b(stuck|not losing|stalled)\b",
        ],
        0.75,
    ),
    (
        Intent::ExplainDecision,
        &[
            r"\bpourquoi (tu|vous) (me |m['’])?(propos|recommand|conseill|sugg[eè]r)",
            r"\bpourquoi (ce|cette|ces) (repas|recettes?|plats?|menus?|choix)\b",
            r"\bwhy (did you|do you) (suggest|recommend|propose)",
        ],
        0.8,
    ),
    (
        Intent::MealSuggestion,
        &[
            r"\b(qu['’]est-ce que je (mange|peux manger|pourrais manger)|quoi manger|que manger)\b",
            r"\bidées? (de )?(repas|recettes?|dîner|déjeuner)\b",
            r"\b(propose|suggère|recommande)(-moi|z-moi)? (un|une|des) (repas|recettes?|plats?|snacks?|collations?)\b",
            r"\b(what should i eat|meal ideas?|suggest a (meal|recipe))\b",
        ],
        0.8,
    ),
    (
        Intent::LogMeal,
        &[
            r"\bj['’]ai (mangé|bu|pris|dîné|diné|déjeuné|dejeuné|grignoté)\b",
            r"\bje viens de (manger|finir)\b",
            r"\b(note|enregistre|ajoute) (mon|ce) (repas|dîner|déjeuner|petit[- ]déjeuner)\b",
            r"\bi (just )?(ate|had|drank)\b",
        ],
        0.85,
    ),
    (
        Intent::NutritionQuestion,
        &[
            r"\bcombien de (calories|protéines|glucides|lipides)\b",
            r"\best-ce que\b.*\b(sain|bon pour)\b",
            r"\b(calories?|protéines?|glucides?|lipides?|fibres?|vitamines?|nutriments?|index glycémique)\b",
            r"\b(how many calories|protein|carbs|is it healthy)\b",
        ],
        0.7,
    ),
    (
        Intent::ChallengeStart,
        &[
            r"\b(commencer|lancer|démarrer|relever) (un|le|ce) défi\b",
            r"\bnouveau défi\b",
            r"\b(start (a|the) challenge|new challenge)\b",
        ],
        0.8,
    ),
    (
        Intent::Doubt,
        &[
            r"\b(je doute|ça ne sert à rien|ça ne marche pas|pas sûre? que|je n['’]y crois (pas|plus))\b",
            r"\best-ce que ça (marche|vaut)",
            r"\b(not sure (this|it) works|does this even work|i doubt)\b",
        ],
        0.75,
    ),
    (
        Intent::Greeting,
        &[r"^\s*(bonjour|bonsoir|salut|coucou|hello|hi|hey|yo)\b"],
        0.9,
    ),
    (
        Intent::Feedback,
        &[
            r"\b(j['’]adore (l['’]app|cette app)|super app|avis sur l['’]app|bug)\b",
            r"\b(merci|thanks|thank you|feedback)\b",
        ],
        0.7,
    ),
    (
        Intent::Help,
        &[
            r"\b(aide|aidez|aider|help)\b",
            r"\bcomment (ça marche|utiliser)\b",
        ],
        0.7,
    ),
];

const ENTITY_TABLE: &[(EntityType, &[&str], Option<Normalizer>)] = &[
    (
        EntityType::Food,
        &[
            r"\b(pizzas?|burgers?|hamburgers?|pâtes|pates|riz|salades?|poulet|poissons?|saumon|thon|œufs?|oeufs?|fromages?|yaourts?|pain|pommes?|bananes?|chocolat|gâteaux?|biscuits?|chips|frites|légumes?|fruits?|soupes?|sandwichs?|quinoa|avocats?|steak|viande|lentilles|pasta|rice|chicken|fish|eggs?|cheese|bread|apples?|cookies?|fries|salmon|vegetables?)\b",
        ],
        Some(Normalizer::Food),
    ),
    (
        EntityType::MealType,
        &[
            r"\b(petit[- ]déjeuner|petit[- ]dejeuner|déjeuner|dejeuner|dîner|diner|souper|goûter|gouter|collation|en-cas|brunch|breakfast|lunch|dinner|snack)\b",
        ],
        Some(Normalizer::MealType),
    ),
    (
        EntityType::Time,
        &[
            r"\b(ce matin|ce midi|cet?t?e? apr[eè]s-midi|ce soir|hier soir|cette nuit|hier|aujourd['’]hui|maintenant)\b",
            r"\b\d{1,2}\s?h(\d{2})?\b",
            r"\b\d{1,2}:\d{2}\b",
        ],
        Some(Normalizer::Time),
    ),
    (
        EntityType::Quantity,
        &[
            r"\b\d+(?:[.,]\d+)?\s?(g|grammes?|kg|kilos?|ml|cl|l|litres?|portions?|parts?|tranches?|verres?|tasses?|bols?|cuillères?|calories|kcal|cups?|slices?|glass(es)?)\b",
            r"\b(un|une|deux|trois|quatre|cinq) (portions?|parts?|tranches?|verres?|tasses?|bols?)\b",
        ],
        Some(Normalizer::Quantity),
    ),
    (
        EntityType::Emotion,
        &[
            r"\b(stress(?:[ée]e?s?)?|anxieux|anxieuse|angoiss[ée]e?s?|triste|déprimée?s?|heureux|heureuse|contente?|fière?|énervée?s?|en colère|frustrée?s?|seule?|ennuyée?|sad|happy|angry|lonely|bored|anxious|stressed)\b",
        ],
        Some(Normalizer::Emotion),
    ),
    (
        EntityType::Goal,
        &[
            r"\b(perdre du poids|perdre \d+\s?kg|maigrir|mincir|prendre du muscle|prendre de la masse|manger (mieux|sainement|sain)|rééquilibrage alimentaire|maintenir mon poids|stabiliser mon poids|lose weight|gain muscle|eat healthier)\b",
        ],
        Some(Normalizer::Goal),
    ),
];

// NOTE: expect() is acceptable here: the built-in tables are compile-time data.
static BUILTIN_BANK: LazyLock<PatternBank> = LazyLock::new(|| {
    let intents = INTENT_TABLE
        .iter()
        .map(|(intent, patterns, confidence)| {
            IntentRule::new(*intent, patterns, *confidence)
                .expect("Invalid built-in intent pattern")
        })
        .collect();
    let entities = ENTITY_TABLE
        .iter()
        .map(|(entity_type, patterns, normalizer)| {
            EntityRule::new(*entity_type, patterns, *normalizer)
                .expect("Invalid built-in entity pattern")
        })
        .collect();
    PatternBank::new(intents, entities)
});
