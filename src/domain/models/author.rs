use std::fmt;

use super::ModelVariant;

/// Who a transcript entry is displayed as.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Author {
    User,
    Glimpse,
    Model(ModelVariant),
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Author::User => return write!(f, "You"),
            Author::Glimpse => return write!(f, "Glimpse"),
            Author::Model(model) => return write!(f, "{model}"),
        }
    }
}
