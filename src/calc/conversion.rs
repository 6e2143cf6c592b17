use crate::calc::distribution::round_half_up;

/// Hours one craft head contributes per week.
pub const HOURS_PER_HEAD: f64 = 60.0;

pub fn hours_to_workforce(hours: f64, hours_per_head: f64) -> f64 {
    if hours_per_head == 0.0 {
        return 0.0;
    }
    round_half_up(hours / hours_per_head)
}

pub fn workforce_to_hours(workforce: f64, hours_per_head: f64) -> f64 {
    workforce * hours_per_head
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarianceKind {
    Positive,
    Negative,
    Zero,
}

impl VarianceKind {
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            VarianceKind::Positive
        } else if value < 0.0 {
            VarianceKind::Negative
        } else {
            VarianceKind::Zero
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            VarianceKind::Positive => "+",
            VarianceKind::Negative => "-",
            VarianceKind::Zero => "0",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Variance {
    pub value: f64,
    pub kind: VarianceKind,
}

/// Element-wise `a - b`. Missing entries on either side count as zero.
pub fn variance(a: &[f64], b: &[f64]) -> Vec<Variance> {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let value = a.get(i).copied().unwrap_or(0.0) - b.get(i).copied().unwrap_or(0.0);
            Variance {
                value,
                kind: VarianceKind::of(value),
            }
        })
        .collect()
}
