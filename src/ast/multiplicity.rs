use serde::{Deserialize, Serialize};

/// How many values an expression yields, as the evaluator reads it.
///
/// Carried through untouched; the builder never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Bounds", into = "Bounds")]
pub enum Multiplicity {
    /// Exactly one (`[1]`)
    PureOne,
    /// Zero or more (`[*]`)
    PureMany,
}

/// Wire form: `{"lowerBound":1,"upperBound":1}` or `{"lowerBound":0}`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Bounds {
    lower_bound: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    upper_bound: Option<u32>,
}

impl From<Multiplicity> for Bounds {
    fn from(m: Multiplicity) -> Self {
        match m {
            Multiplicity::PureOne => Bounds {
                lower_bound: 1,
                upper_bound: Some(1),
            },
            Multiplicity::PureMany => Bounds {
                lower_bound: 0,
                upper_bound: None,
            },
        }
    }
}

impl TryFrom<Bounds> for Multiplicity {
    type Error = String;

    fn try_from(b: Bounds) -> Result<Self, Self::Error> {
        match (b.lower_bound, b.upper_bound) {
            (1, Some(1)) => Ok(Multiplicity::PureOne),
            (0, None) => Ok(Multiplicity::PureMany),
            (lower, Some(upper)) => Err(format!("unsupported multiplicity [{}..{}]", lower, upper)),
            (lower, None) => Err(format!("unsupported multiplicity [{}..*]", lower)),
        }
    }
}
