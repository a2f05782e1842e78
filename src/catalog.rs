//! Question catalog — the fixed, ordered survey structure.
//!
//! The catalog is pure data: 47 screens (welcome, 45 questions,
//! finalize), each pinned to an external field slot. Slot assignments
//! must match the deployed form exactly, so the catalog is validated
//! by the contiguity invariant below rather than built dynamically.

use serde::{Deserialize, Serialize};

/// Number of external field slots (1..=ENTRY_COUNT).
pub const ENTRY_COUNT: usize = 46;

/// The finalize screen's slot. Its wire value is derived from the
/// consent flag, never read from the response store.
pub const FINALIZE_ENTRY: usize = 46;

/// Kind of a survey screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Informational welcome screen with the consent gate.
    Welcome,
    /// Single choice from a fixed option list.
    Choice,
    /// 1–5 agreement scale.
    Likert,
    /// Multi-select from a fixed option list.
    Multi,
    /// Free-text reflection.
    Text,
    /// Finalize screen (submit / export).
    Submit,
}

/// One screen of the survey. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDescriptor {
    /// Stable identifier ("q1", "likert-4", ...).
    pub id: String,
    pub kind: QuestionKind,
    pub title: String,
    pub subtitle: Option<String>,
    /// Selectable option labels. Empty for Likert (the 1–5 scale is
    /// implied), Text, Welcome and Submit screens.
    pub options: Vec<String>,
    /// Whether a free-form "other" answer is accepted alongside the
    /// fixed options. Disables auto-advance.
    pub allow_other: bool,
    /// External field slot: 0 for welcome, 1..=45 for questions,
    /// 46 for finalize. Equals the catalog position.
    pub entry_index: usize,
}

impl QuestionDescriptor {
    fn new(entry_index: usize, id: &str, kind: QuestionKind, title: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            subtitle: None,
            options: Vec::new(),
            allow_other: false,
            entry_index,
        }
    }

    fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|s| s.to_string()).collect();
        self
    }

    fn with_other(mut self) -> Self {
        self.allow_other = true;
        self
    }
}

/// The 1–5 scale labels shared by every Likert screen.
pub const LIKERT_SCALE: [&str; 5] = ["1", "2", "3", "4", "5"];

/// The 30 Likert statements (slots 6..=35), carried verbatim from the
/// deployed instrument.
const LIKERT_STATEMENTS: [&str; 30] = [
    "I have a clear understanding of who I truly am beyond social media personas",
    "I feel authentic and genuine in my daily interactions with others",
    "My online persona accurately reflects my true values and beliefs",
    "I am aware of my core strengths and weaknesses",
    "I feel disconnected from my true self when using social media",
    "I make decisions based on my personal values rather than external pressure",
    "I struggle to identify my genuine interests versus what I think I should like",
    "I feel confident expressing my authentic opinions, even if they are unpopular",
    "I understand what truly motivates me in my personal and academic life",
    "I feel pressure to maintain a curated image on social media",
    "I spend significant time curating my social media content",
    "I experience anxiety when my posts don't receive expected engagement",
    "I compare my life to others' social media presentations",
    "Social media use interferes with my focus on academic tasks",
    "I feel FOMO (Fear of Missing Out) when not checking social media",
    "I modify my behavior based on what I think will get likes or comments",
    "I feel more confident when receiving social validation online",
    "I use social media to escape from uncomfortable emotions",
    "My daily mood is affected by my social media interactions",
    "I have experienced stress due to cyberbullying or negative comments",
    "I am motivated by the desire to learn and grow personally",
    "I pursue my academic goals because they align with my values",
    "I would continue my studies even without grades or external rewards",
    "I feel a sense of purpose in my current pursuits",
    "I am driven by internal satisfaction rather than external recognition",
    "I find my academic work meaningful and worthwhile",
    "I set my own goals rather than following what others expect",
    "I feel intrinsically motivated to achieve excellence",
    "My motivation comes from personal interest, not external pressure",
    "I feel energized when working on tasks aligned with my authentic interests",
];

/// External field names for slots 1..=46, from the deployed form.
const ENTRY_FIELDS: [&str; ENTRY_COUNT] = [
    "entry.1071290361",
    "entry.326184573",
    "entry.1061016185",
    "entry.1666183569",
    "entry.1443380532",
    "entry.1618713911",
    "entry.1129971170",
    "entry.314606889",
    "entry.1660632923",
    "entry.1145664182",
    "entry.251814733",
    "entry.1813740654",
    "entry.1518143852",
    "entry.725572082",
    "entry.1062517478",
    "entry.1187095218",
    "entry.1557776103",
    "entry.1552978670",
    "entry.19578391",
    "entry.523311605",
    "entry.1538962669",
    "entry.1483922759",
    "entry.45645361",
    "entry.1451160984",
    "entry.1373458939",
    "entry.2120013189",
    "entry.1303452281",
    "entry.50165232",
    "entry.240883325",
    "entry.1201893471",
    "entry.882640380",
    "entry.141086092",
    "entry.1494592236",
    "entry.411324695",
    "entry.470867287",
    "entry.1078632822",
    "entry.1133957921",
    "entry.1145582191",
    "entry.1932481296",
    "entry.1943447158",
    "entry.726853438",
    "entry.1599590245",
    "entry.2085314761",
    "entry.522745442",
    "entry.885137032",
    "entry.1350016819",
];

/// Look up the external field name for a slot (1..=46).
pub fn entry_field_name(index: usize) -> Option<&'static str> {
    if (1..=ENTRY_COUNT).contains(&index) {
        Some(ENTRY_FIELDS[index - 1])
    } else {
        None
    }
}

/// Iterate every (slot, field name) pair in slot order.
pub fn entry_fields() -> impl Iterator<Item = (usize, &'static str)> {
    ENTRY_FIELDS.iter().enumerate().map(|(i, name)| (i + 1, *name))
}

/// Build the full ordered catalog.
///
/// Invariant: `catalog[i].entry_index == i` for every position i.
pub fn survey_catalog() -> Vec<QuestionDescriptor> {
    use QuestionKind::*;

    let mut catalog = Vec::with_capacity(ENTRY_COUNT + 1);

    catalog.push(
        QuestionDescriptor::new(0, "welcome", Welcome, "Rediscovering Authentic Potential")
            .with_subtitle(
                "Investigating Digital Wellness and the \"Self-Authentication Theory of Motivation\".",
            ),
    );

    // Demographics (1-5)
    catalog.push(
        QuestionDescriptor::new(1, "q1", Choice, "What is your age range?")
            .with_options(&["18-20", "21-23", "24-26", "27-30", "Above 30"]),
    );
    catalog.push(
        QuestionDescriptor::new(2, "q2", Choice, "Gender Identification")
            .with_options(&["Male", "Female", "Non-binary", "Prefer not to say"]),
    );
    catalog.push(
        QuestionDescriptor::new(3, "q3", Choice, "Current Academic Level")
            .with_options(&["Undergraduate", "Postgraduate (Master's)", "Doctoral"])
            .with_other(),
    );
    catalog.push(
        QuestionDescriptor::new(4, "q4", Choice, "Field of Study")
            .with_options(&["Management", "Engineering", "Sciences", "Arts & Humanities"])
            .with_other(),
    );
    catalog.push(
        QuestionDescriptor::new(5, "q5", Choice, "Years of Social Media Use").with_options(&[
            "Less than 2 years",
            "2-5 years",
            "5-10 years",
            "More than 10 years",
        ]),
    );

    // Likert statements (6-35)
    for (i, statement) in LIKERT_STATEMENTS.iter().enumerate() {
        catalog.push(
            QuestionDescriptor::new(i + 6, &format!("likert-{i}"), Likert, statement)
                .with_subtitle("Select 1 (Strongly Disagree) to 5 (Strongly Agree)"),
        );
    }

    // Digital detox (36-40)
    catalog.push(
        QuestionDescriptor::new(
            36,
            "q31",
            Choice,
            "How often do you intentionally take breaks from social media?",
        )
        .with_options(&["Daily", "Several times a week", "Weekly", "Rarely", "Never"]),
    );
    catalog.push(
        QuestionDescriptor::new(
            37,
            "q32",
            Choice,
            "Do you have device-free times or zones in your daily routine?",
        )
        .with_options(&["Yes, regularly", "Occasionally", "Rarely", "Never"]),
    );
    catalog.push(
        QuestionDescriptor::new(
            38,
            "q33",
            Choice,
            "Noticed improvements after reducing social media use?",
        )
        .with_options(&[
            "Significant improvement",
            "Some improvement",
            "No change",
            "Worsened",
        ]),
    );
    catalog.push(
        QuestionDescriptor::new(
            39,
            "q34",
            Multi,
            "What activities help you reconnect with your authentic self?",
        )
        .with_options(&[
            "Meditation/Mindfulness",
            "Exercise/Outdoor activities",
            "Creative hobbies",
            "Reading",
            "Journaling",
            "Social connections (offline)",
        ])
        .with_other(),
    );
    catalog.push(
        QuestionDescriptor::new(
            40,
            "q35",
            Likert,
            "How would you rate your current digital wellness?",
        )
        .with_subtitle("1 (Poor) to 5 (Excellent)"),
    );

    // Reflections (41-45)
    catalog.push(QuestionDescriptor::new(
        41,
        "q36",
        Text,
        "Relationship between your authentic self and social media presence?",
    ));
    catalog.push(QuestionDescriptor::new(
        42,
        "q37",
        Text,
        "Effective strategies for maintaining self-authentication?",
    ));
    catalog.push(QuestionDescriptor::new(
        43,
        "q38",
        Text,
        "How does self-authentication impact your academic/personal motivation?",
    ));
    catalog.push(QuestionDescriptor::new(
        44,
        "q39",
        Text,
        "Challenges in maintaining your authentic self while online?",
    ));
    catalog.push(QuestionDescriptor::new(
        45,
        "q40",
        Text,
        "Recommendations for others struggling with digital authenticity?",
    ));

    catalog.push(QuestionDescriptor::new(
        FINALIZE_ENTRY,
        "submit",
        Submit,
        "Finalize Your Submission",
    ));

    catalog
}
