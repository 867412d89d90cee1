//! Static lookup tables behind the recommendation rules.
//!
//! All data here is read-only. Lookups never fail: unknown keys fall back to
//! a generic row.

use crate::profile::{BudgetTier, CompanySize, ExperienceLevel};

/// Next steps after a consultation topic
const NEXT_STEPS: &[(&str, &[&str])] = &[
    (
        "tokenization",
        &["Smart Contract Development", "Token Economics Design", "Regulatory Compliance"],
    ),
    (
        "defi",
        &["Liquidity Strategy Review", "Smart Contract Audit", "Yield Risk Assessment"],
    ),
    (
        "nft",
        &["Marketplace Integration", "Royalty Structure Design", "Community Strategy"],
    ),
    (
        "strategy",
        &["Technical Architecture Review", "Proof of Concept", "Vendor Selection"],
    ),
    (
        "security",
        &["Smart Contract Audit", "Incident Response Planning", "Key Management Review"],
    ),
    (
        "compliance",
        &["Regulatory Compliance", "KYC/AML Integration", "Jurisdiction Analysis"],
    ),
    (
        "development",
        &["Code Review", "Testnet Deployment", "Mainnet Launch Support"],
    ),
];

const GENERIC_NEXT_STEPS: &[&str] = &["Strategy Session", "Implementation Planning", "Ongoing Advisory"];

/// Next-step services for a topic (case-insensitive), generic list if unknown
pub fn next_steps_for(topic: &str) -> &'static [&'static str] {
    let key = topic.trim().to_lowercase();
    NEXT_STEPS
        .iter()
        .find(|(t, _)| *t == key)
        .map(|(_, steps)| *steps)
        .unwrap_or(GENERIC_NEXT_STEPS)
}

pub fn budget_services(tier: BudgetTier) -> &'static [&'static str] {
    match tier {
        BudgetTier::Starter => &["Strategy Session", "Initial Assessment", "Roadmap Planning"],
        BudgetTier::Growth => &["Technical Consultation", "Implementation Planning", "Team Training"],
        BudgetTier::Premium => &["Full Implementation", "Ongoing Support", "Custom Development"],
    }
}

pub fn learning_path(level: ExperienceLevel) -> &'static [&'static str] {
    match level {
        ExperienceLevel::Beginner => &[
            "Blockchain Fundamentals",
            "Understanding Smart Contracts",
            "Wallets and Key Security",
        ],
        ExperienceLevel::Intermediate => &[
            "DeFi Protocol Mechanics",
            "Token Economics Deep Dive",
            "Layer 2 Scaling Solutions",
        ],
        ExperienceLevel::Advanced => &[
            "Advanced Smart Contract Patterns",
            "Cross-Chain Interoperability",
            "MEV and Protocol Security",
        ],
    }
}

const INDUSTRY_CONTENT: &[(&str, &[&str])] = &[
    (
        "defi",
        &["DeFi Risk Frameworks", "Liquidity Pool Case Studies", "Protocol Governance Trends"],
    ),
    (
        "finance",
        &["Tokenized Assets in Banking", "Settlement on Public Ledgers", "Custody Models Compared"],
    ),
    (
        "real estate",
        &["Property Tokenization Guide", "Fractional Ownership Models", "Title Registry Pilots"],
    ),
    (
        "supply chain",
        &["Provenance Tracking Playbook", "Supplier Onboarding on Chain", "IoT Oracle Patterns"],
    ),
    (
        "healthcare",
        &["Patient Data Consent Models", "Clinical Trial Auditability", "HIPAA and Ledgers"],
    ),
    (
        "gaming",
        &["In-Game Asset Economies", "NFT Interoperability", "Player Wallet UX"],
    ),
];

/// Industry reading list; unknown industries get a generic list naming the industry
pub fn industry_content(industry: &str) -> Vec<String> {
    let key = industry.trim().to_lowercase();
    match INDUSTRY_CONTENT.iter().find(|(i, _)| *i == key) {
        Some((_, items)) => items.iter().map(|s| s.to_string()).collect(),
        None => vec![
            format!("{} Blockchain Adoption Report", industry.trim()),
            format!("{} Case Studies", industry.trim()),
            "Regulatory Outlook".to_string(),
        ],
    }
}

pub struct StrategyTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub focus_areas: &'static [&'static str],
}

pub fn strategy_for(size: CompanySize) -> StrategyTemplate {
    match size {
        CompanySize::Startup => StrategyTemplate {
            title: "Lean Blockchain Adoption",
            description: "Start with a focused proof of concept, validate product-market fit, and scale infrastructure only once traction is proven.",
            focus_areas: &["MVP Development", "Fundraising Readiness", "Community Building"],
        },
        CompanySize::ScaleUp => StrategyTemplate {
            title: "Scaling Blockchain Operations",
            description: "Harden the architecture for growth, formalize security reviews, and expand into new markets with compliant token models.",
            focus_areas: &["Infrastructure Scaling", "Security Hardening", "Market Expansion"],
        },
        CompanySize::Enterprise => StrategyTemplate {
            title: "Enterprise Blockchain Integration",
            description: "Integrate distributed ledgers with existing systems through governed pilots, vendor evaluation, and a phased change-management plan.",
            focus_areas: &["Legacy Integration", "Governance Framework", "Change Management"],
        },
    }
}

pub const RISK_CATEGORIES: &[&str] = &[
    "Smart Contract Vulnerabilities",
    "Regulatory Changes",
    "Market Volatility",
    "Operational Security",
];

pub const MARKET_REASONING: &[&str] = &[
    "Market sentiment indicators are positive",
    "Network activity and liquidity are trending up",
    "Regulatory environment is stable in key jurisdictions",
];

pub const Q4_REASONING: &[&str] = &[
    "Budget planning season for the coming year",
    "Year-end regulatory and reporting deadlines",
    "Positions initiatives for Q1 launches",
];

/// Zero-based month indices (Oct, Nov, Dec) that trigger Q4 planning
pub fn is_q4(month0: u32) -> bool {
    (9..=11).contains(&month0)
}
