use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlanType {
    FreeTier,
    PremiumBasic,
    PremiumPlus,
    StudentPack,
}

impl PlanType {
    /// Every valid plan type, in report priority order.
    pub const ALL: [PlanType; 4] = [
        PlanType::FreeTier,
        PlanType::PremiumBasic,
        PlanType::PremiumPlus,
        PlanType::StudentPack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::FreeTier => "FREE_TIER",
            PlanType::PremiumBasic => "PREMIUM_BASIC",
            PlanType::PremiumPlus => "PREMIUM_PLUS",
            PlanType::StudentPack => "STUDENT_PACK",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "FREE_TIER" => Some(PlanType::FreeTier),
            "PREMIUM_BASIC" => Some(PlanType::PremiumBasic),
            "PREMIUM_PLUS" => Some(PlanType::PremiumPlus),
            "STUDENT_PACK" => Some(PlanType::StudentPack),
            _ => None,
        }
    }

    pub fn priority(&self) -> u8 {
        match self {
            PlanType::FreeTier => 1,
            PlanType::PremiumBasic => 2,
            PlanType::PremiumPlus => 3,
            PlanType::StudentPack => 4,
        }
    }
}

impl Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
