//! Subscription topics.
//!
//! Wire form: `all`, `restaurant:<uuid>`, `floorplan:<uuid>`,
//! `reservation:<uuid>`, `client:<uuid>`.

use std::fmt;
use std::str::FromStr;

use tablehost_core::types::PublicId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topic {
    All,
    Restaurant(PublicId),
    Floorplan(PublicId),
    Reservation(PublicId),
    Client(PublicId),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopicParseError {
    #[error("Unknown topic kind '{0}'")]
    UnknownKind(String),

    #[error("Invalid id in topic '{0}'")]
    InvalidId(String),
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::All => f.write_str("all"),
            Topic::Restaurant(id) => write!(f, "restaurant:{id}"),
            Topic::Floorplan(id) => write!(f, "floorplan:{id}"),
            Topic::Reservation(id) => write!(f, "reservation:{id}"),
            Topic::Client(id) => write!(f, "client:{id}"),
        }
    }
}

impl FromStr for Topic {
    type Err = TopicParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "all" {
            return Ok(Topic::All);
        }

        let (kind, raw_id) = s
            .split_once(':')
            .ok_or_else(|| TopicParseError::UnknownKind(s.to_string()))?;
        let id: PublicId = raw_id
            .parse()
            .map_err(|_| TopicParseError::InvalidId(s.to_string()))?;

        match kind {
            "restaurant" => Ok(Topic::Restaurant(id)),
            "floorplan" => Ok(Topic::Floorplan(id)),
            "reservation" => Ok(Topic::Reservation(id)),
            "client" => Ok(Topic::Client(id)),
            other => Err(TopicParseError::UnknownKind(other.to_string())),
        }
    }
}
