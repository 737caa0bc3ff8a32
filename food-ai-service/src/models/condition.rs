use std::fmt;

/// Health condition a user can select when scanning a dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Diabetic,
    Hypertensive,
    WeightLoss,
    Malnourished,
    PregnantOrNursing,
    CholesterolWatch,
}

impl Condition {
    pub const ALL: [Condition; 6] = [
        Condition::Diabetic,
        Condition::Hypertensive,
        Condition::WeightLoss,
        Condition::Malnourished,
        Condition::PregnantOrNursing,
        Condition::CholesterolWatch,
    ];

    /// Parse a client tag. Matching is exact; anything else is `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Diabetic" => Some(Condition::Diabetic),
            "Hypertensive" => Some(Condition::Hypertensive),
            "Weight Loss" => Some(Condition::WeightLoss),
            "Malnourished" => Some(Condition::Malnourished),
            "Pregnant/Nursing" => Some(Condition::PregnantOrNursing),
            "Cholesterol Watch" => Some(Condition::CholesterolWatch),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Condition::Diabetic => "Diabetic",
            Condition::Hypertensive => "Hypertensive",
            Condition::WeightLoss => "Weight Loss",
            Condition::Malnourished => "Malnourished",
            Condition::PregnantOrNursing => "Pregnant/Nursing",
            Condition::CholesterolWatch => "Cholesterol Watch",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
