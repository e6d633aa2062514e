//! Question templates for each flow

use serde::Serialize;

/// Stable identifier of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionId {
    /// Which vendor
    VendorName,
    /// How late
    DelayDuration,
    /// What the delay touches
    AffectedAreas,
    /// Whether a response plan exists
    Mitigation,
    /// Which system
    ServerType,
    /// How loaded
    CurrentUsage,
    /// Whether scaling is planned
    ScalingPlan,
    /// Which client or project
    ClientName,
    /// Contract value at stake
    ContractImpact,
    /// State of the relationship
    RelationshipStatus,
    /// Which position
    Position,
    /// How badly work is affected
    ImpactLevel,
    /// How the position gets filled
    ReplacementPlan,
    /// What the risk mainly affects
    #[serde(rename = "impact_desc")]
    ImpactDescription,
    /// How likely on a 1-5 scale
    #[serde(rename = "likelihood_est")]
    LikelihoodEstimate,
    /// How severe on a 1-5 scale
    Severity,
    /// Money at stake
    FinancialImpact,
}

impl QuestionId {
    /// Get the id as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionId::VendorName => "vendor_name",
            QuestionId::DelayDuration => "delay_duration",
            QuestionId::AffectedAreas => "affected_areas",
            QuestionId::Mitigation => "mitigation",
            QuestionId::ServerType => "server_type",
            QuestionId::CurrentUsage => "current_usage",
            QuestionId::ScalingPlan => "scaling_plan",
            QuestionId::ClientName => "client_name",
            QuestionId::ContractImpact => "contract_impact",
            QuestionId::RelationshipStatus => "relationship_status",
            QuestionId::Position => "position",
            QuestionId::ImpactLevel => "impact_level",
            QuestionId::ReplacementPlan => "replacement_plan",
            QuestionId::ImpactDescription => "impact_desc",
            QuestionId::LikelihoodEstimate => "likelihood_est",
            QuestionId::Severity => "severity",
            QuestionId::FinancialImpact => "financial_impact",
        }
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for QuestionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_QUESTIONS
            .iter()
            .map(|q| q.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown question id: {}", s))
    }
}

/// Shape of answer a question accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Exactly one of the options
    SingleChoice,
    /// Any subset of the options
    MultiChoice,
    /// Free text
    FreeText,
    /// A number
    Numeric,
}

impl QuestionKind {
    /// Describe the expected answer, for error messages
    pub fn expects(&self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "a single choice",
            QuestionKind::MultiChoice => "a list of choices",
            QuestionKind::FreeText => "free text",
            QuestionKind::Numeric => "a number",
        }
    }
}

/// One selectable answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    /// Machine value submitted as the answer
    pub value: &'static str,

    /// Text shown to the user
    pub label: &'static str,
}

/// A question in a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Identifier
    pub id: QuestionId,

    /// Prompt shown to the user
    pub prompt: &'static str,

    /// Accepted answer shape
    pub kind: QuestionKind,

    /// Options for choice questions; empty otherwise
    pub options: &'static [ChoiceOption],

    /// Why the question is asked
    pub context: Option<&'static str>,
}

impl Question {
    /// Whether the question may be skipped; only the money estimate is
    pub fn is_optional(&self) -> bool {
        self.id == QuestionId::FinancialImpact
    }

    /// Whether `value` is one of the offered options
    pub fn offers(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// Label for an option value, if offered
    pub fn label_for(&self, value: &str) -> Option<&'static str> {
        self.options.iter().find(|o| o.value == value).map(|o| o.label)
    }
}

const VENDOR_NAME: Question = Question {
    id: QuestionId::VendorName,
    prompt: "Which vendor is it?",
    kind: QuestionKind::FreeText,
    options: &[],
    context: Some("Primary and secondary vendors carry different weight"),
};

const DELAY_DURATION: Question = Question {
    id: QuestionId::DelayDuration,
    prompt: "Roughly how many days late?",
    kind: QuestionKind::SingleChoice,
    options: &[
        ChoiceOption { value: "1-3", label: "1-3 days (minor)" },
        ChoiceOption { value: "4-7", label: "4-7 days (moderate)" },
        ChoiceOption { value: "8-14", label: "8-14 days (major)" },
        ChoiceOption { value: "15+", label: "15+ days (critical)" },
    ],
    context: Some("Duration drives the impact score"),
};

const AFFECTED_AREAS: Question = Question {
    id: QuestionId::AffectedAreas,
    prompt: "Which areas are affected? (choose any)",
    kind: QuestionKind::MultiChoice,
    options: &[
        ChoiceOption { value: "production", label: "Production line" },
        ChoiceOption { value: "delivery", label: "Customer delivery" },
        ChoiceOption { value: "revenue", label: "Revenue" },
        ChoiceOption { value: "reputation", label: "Reputation" },
        ChoiceOption { value: "other_contracts", label: "Other contracts" },
    ],
    context: Some("The more areas affected, the stronger the case to escalate"),
};

const MITIGATION: Question = Question {
    id: QuestionId::Mitigation,
    prompt: "Is there a response plan yet?",
    kind: QuestionKind::SingleChoice,
    options: &[
        ChoiceOption { value: "none", label: "Not yet" },
        ChoiceOption { value: "planned", label: "Planned, waiting to execute" },
        ChoiceOption { value: "active", label: "In progress" },
        ChoiceOption { value: "resolved", label: "Resolved" },
    ],
    context: Some("No plan means one is needed quickly"),
};

const SERVER_TYPE: Question = Question {
    id: QuestionId::ServerType,
    prompt: "Which system is it?",
    kind: QuestionKind::SingleChoice,
    options: &[
        ChoiceOption { value: "production", label: "Production (customer-facing)" },
        ChoiceOption { value: "internal", label: "Internal (staff-facing)" },
        ChoiceOption { value: "backup", label: "Backup/DR" },
    ],
    context: None,
};

const CURRENT_USAGE: Question = Question {
    id: QuestionId::CurrentUsage,
    prompt: "What percentage is in use?",
    kind: QuestionKind::SingleChoice,
    options: &[
        ChoiceOption { value: "70-80", label: "70-80%" },
        ChoiceOption { value: "80-90", label: "80-90%" },
        ChoiceOption { value: "90-95", label: "90-95%" },
        ChoiceOption { value: "95+", label: "95%+" },
    ],
    context: None,
};

const SCALING_PLAN: Question = Question {
    id: QuestionId::ScalingPlan,
    prompt: "Is there a scaling plan?",
    kind: QuestionKind::SingleChoice,
    options: &[
        ChoiceOption { value: "auto", label: "Auto-scaling is running" },
        ChoiceOption { value: "manual", label: "Manual scaling (planned)" },
        ChoiceOption { value: "budget_pending", label: "Waiting for budget approval" },
        ChoiceOption { value: "none", label: "No plan yet" },
    ],
    context: None,
};

const CLIENT_NAME: Question = Question {
    id: QuestionId::ClientName,
    prompt: "What is the client or project name?",
    kind: QuestionKind::FreeText,
    options: &[],
    context: Some("So the sales team is aware"),
};

const CONTRACT_IMPACT: Question = Question {
    id: QuestionId::ContractImpact,
    prompt: "Roughly what contract value or financial impact is at stake?",
    kind: QuestionKind::SingleChoice,
    options: &[
        ChoiceOption { value: "low", label: "< $10k" },
        ChoiceOption { value: "medium", label: "$10k - $100k" },
        ChoiceOption { value: "high", label: "> $100k" },
    ],
    context: None,
};

const RELATIONSHIP_STATUS: Question = Question {
    id: QuestionId::RelationshipStatus,
    prompt: "How is the relationship with the client right now?",
    kind: QuestionKind::SingleChoice,
    options: &[
        ChoiceOption { value: "good", label: "Good" },
        ChoiceOption { value: "strained", label: "Strained" },
        ChoiceOption { value: "critical", label: "Critical (may cancel)" },
    ],
    context: None,
};

const POSITION: Question = Question {
    id: QuestionId::Position,
    prompt: "Which position is affected?",
    kind: QuestionKind::FreeText,
    options: &[],
    context: None,
};

const IMPACT_LEVEL: Question = Question {
    id: QuestionId::ImpactLevel,
    prompt: "How much is work affected?",
    kind: QuestionKind::SingleChoice,
    options: &[
        ChoiceOption { value: "low", label: "Slightly" },
        ChoiceOption { value: "medium", label: "Delayed but manageable" },
        ChoiceOption { value: "high", label: "Work stopped / project at risk of failing" },
    ],
    context: None,
};

const REPLACEMENT_PLAN: Question = Question {
    id: QuestionId::ReplacementPlan,
    prompt: "How will the position be filled?",
    kind: QuestionKind::SingleChoice,
    options: &[
        ChoiceOption { value: "internal", label: "Someone internal can cover" },
        ChoiceOption { value: "recruiting", label: "Recruiting" },
        ChoiceOption { value: "difficult", label: "Hard to fill / long training" },
    ],
    context: None,
};

const IMPACT_DESCRIPTION: Question = Question {
    id: QuestionId::ImpactDescription,
    prompt: "What does this risk mainly affect?",
    kind: QuestionKind::FreeText,
    options: &[],
    context: Some("For example finance, reputation, safety"),
};

const LIKELIHOOD_ESTIMATE: Question = Question {
    id: QuestionId::LikelihoodEstimate,
    prompt: "How likely is it to happen?",
    kind: QuestionKind::SingleChoice,
    options: &[
        ChoiceOption { value: "1", label: "Rare" },
        ChoiceOption { value: "3", label: "Possible" },
        ChoiceOption { value: "5", label: "Almost certain" },
    ],
    context: None,
};

const SEVERITY: Question = Question {
    id: QuestionId::Severity,
    prompt: "How severe would it be?",
    kind: QuestionKind::SingleChoice,
    options: &[
        ChoiceOption { value: "1", label: "Minor" },
        ChoiceOption { value: "3", label: "Moderate" },
        ChoiceOption { value: "5", label: "Severe" },
    ],
    context: None,
};

const FINANCIAL_IMPACT: Question = Question {
    id: QuestionId::FinancialImpact,
    prompt: "Estimated financial impact, if known?",
    kind: QuestionKind::Numeric,
    options: &[],
    context: Some("Feeds the exposure totals on the dashboard"),
};

/// Vendor delay flow
pub const VENDOR_DELAY: &[Question] = &[VENDOR_NAME, DELAY_DURATION, AFFECTED_AREAS, MITIGATION];

/// Server capacity flow
pub const SERVER_CAPACITY: &[Question] = &[SERVER_TYPE, CURRENT_USAGE, SCALING_PLAN];

/// Client risk flow
pub const CLIENT_RISK: &[Question] = &[CLIENT_NAME, CONTRACT_IMPACT, RELATIONSHIP_STATUS];

/// HR flow
pub const HR_RISK: &[Question] = &[POSITION, IMPACT_LEVEL, REPLACEMENT_PLAN];

/// Fallback flow
pub const GENERIC: &[Question] = &[
    IMPACT_DESCRIPTION,
    LIKELIHOOD_ESTIMATE,
    SEVERITY,
    FINANCIAL_IMPACT,
];

const ALL_QUESTIONS: &[Question] = &[
    VENDOR_NAME,
    DELAY_DURATION,
    AFFECTED_AREAS,
    MITIGATION,
    SERVER_TYPE,
    CURRENT_USAGE,
    SCALING_PLAN,
    CLIENT_NAME,
    CONTRACT_IMPACT,
    RELATIONSHIP_STATUS,
    POSITION,
    IMPACT_LEVEL,
    REPLACEMENT_PLAN,
    IMPACT_DESCRIPTION,
    LIKELIHOOD_ESTIMATE,
    SEVERITY,
    FINANCIAL_IMPACT,
];
