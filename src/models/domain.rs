use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binary side attribute of a participant (handedness in the roster data)
///
/// Serializes as `"a"` / `"b"`. Deserializes from any token `FromStr`
/// accepts, from a JSON bool (`true` = right-handed = B) or from 0 / 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::A => "a",
            Side::B => "b",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a side token is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSideError(pub String);

impl fmt::Display for ParseSideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognised side '{}' (expected a/b, 0/1, left/right)", self.0)
    }
}

impl std::error::Error for ParseSideError {}

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a" | "0" | "left" | "false" => Ok(Side::A),
            "b" | "1" | "right" | "true" => Ok(Side::B),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}

struct SideVisitor;

impl<'de> Visitor<'de> for SideVisitor {
    type Value = Side;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a side: a/b, 0/1, left/right or a boolean")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Side, E> {
        Ok(if v { Side::B } else { Side::A })
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Side, E> {
        match v {
            0 => Ok(Side::A),
            1 => Ok(Side::B),
            _ => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Side, E> {
        match v {
            0 => Ok(Side::A),
            1 => Ok(Side::B),
            _ => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Side, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Side {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SideVisitor)
    }
}

/// A registered participant, identified by (name, side)
///
/// Two participants sharing a name but not a side are distinct. Ordering is
/// by name first, then side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub side: Side,
}

impl Participant {
    pub fn new(name: impl Into<String>, side: Side) -> Self {
        Self {
            name: name.into(),
            side,
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.side)
    }
}

/// How the engine treats names that were never registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationPolicy {
    /// Reject declarations naming unknown participants
    #[default]
    Strict,
    /// Register unknown names on side B and carry on
    Lenient,
}

/// Outcome of a single one-sided declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Declaration {
    /// Stored as one-sided interest, awaiting reciprocity
    Recorded,
    /// Reciprocity confirmed, a mutual-interest edge exists
    Promoted,
    /// Both participants are on the same side
    Discarded,
}

/// Per-record counts of declaration outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationTally {
    pub recorded: usize,
    pub promoted: usize,
    pub discarded: usize,
}

impl DeclarationTally {
    pub fn add(&mut self, outcome: Declaration) {
        match outcome {
            Declaration::Recorded => self.recorded += 1,
            Declaration::Promoted => self.promoted += 1,
            Declaration::Discarded => self.discarded += 1,
        }
    }

    pub fn merge(&mut self, other: DeclarationTally) {
        self.recorded += other.recorded;
        self.promoted += other.promoted;
        self.discarded += other.discarded;
    }

    pub fn total(&self) -> usize {
        self.recorded + self.promoted + self.discarded
    }
}

/// One pair of the final matching, left endpoint on side A
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchedPair {
    pub left: Participant,
    pub right: Participant,
}

impl MatchedPair {
    pub fn contains(&self, participant: &Participant) -> bool {
        &self.left == participant || &self.right == participant
    }

    pub fn names(&self) -> (&str, &str) {
        (&self.left.name, &self.right.name)
    }
}

/// Output of one Hopcroft-Karp run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matching {
    pub pairs: Vec<MatchedPair>,
    /// BFS/DFS phases executed, including the final one that found nothing
    pub phases: usize,
    /// Successful augmenting paths
    pub augmentations: usize,
}

impl Matching {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Partner of `participant` in this matching, if any
    pub fn partner_of(&self, participant: &Participant) -> Option<&Participant> {
        self.pairs.iter().find_map(|pair| {
            if &pair.left == participant {
                Some(&pair.right)
            } else if &pair.right == participant {
                Some(&pair.left)
            } else {
                None
            }
        })
    }
}

/// A participant with the set of others it mutually likes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutualInterest {
    pub participant: Participant,
    #[serde(rename = "mutualInterests")]
    pub mutual_interests: Vec<Participant>,
}

/// Matching result as served by the HTTP layer and stored in the cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    #[serde(rename = "runId")]
    pub run_id: uuid::Uuid,
    #[serde(rename = "computedAt")]
    pub computed_at: chrono::DateTime<chrono::Utc>,
    /// Graph revision the matching was computed from
    pub revision: u64,
    pub matching: Matching,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_parsing() {
        assert_eq!("0".parse::<Side>().unwrap(), Side::A);
        assert_eq!("Left".parse::<Side>().unwrap(), Side::A);
        assert_eq!("1".parse::<Side>().unwrap(), Side::B);
        assert_eq!("RIGHT".parse::<Side>().unwrap(), Side::B);
        assert!("middle".parse::<Side>().is_err());
    }

    #[test]
    fn test_participant_ordering() {
        let a = Participant::new("amy", Side::B);
        let b = Participant::new("bob", Side::A);
        let c = Participant::new("amy", Side::A);
        let mut all = vec![a.clone(), b.clone(), c.clone()];
        all.sort();
        assert_eq!(all, vec![c, a, b]);
    }

    #[test]
    fn test_same_name_different_side_distinct() {
        assert_ne!(Participant::new("sam", Side::A), Participant::new("sam", Side::B));
    }

    #[test]
    fn test_side_serde() {
        assert_eq!(serde_json::to_string(&Side::A).unwrap(), "\"a\"");
        let side: Side = serde_json::from_str("\"right\"").unwrap();
        assert_eq!(side, Side::B);
    }

    #[test]
    fn test_side_deserializes_every_accepted_form() {
        for input in ["\"a\"", "\"A\"", "\"Left\"", "\"0\"", "\"false\"", "false", "0"] {
            let side: Side = serde_json::from_str(input).unwrap();
            assert_eq!(side, Side::A, "input {}", input);
        }
        for input in ["\"b\"", "\"RIGHT\"", "\"1\"", "\"true\"", "true", "1"] {
            let side: Side = serde_json::from_str(input).unwrap();
            assert_eq!(side, Side::B, "input {}", input);
        }
        assert!(serde_json::from_str::<Side>("2").is_err());
        assert!(serde_json::from_str::<Side>("\"middle\"").is_err());
    }

    #[test]
    fn test_participant_json_round_trip() {
        let participant = Participant::new("ann", Side::B);
        let json = serde_json::to_string(&participant).unwrap();
        assert_eq!(json, r#"{"name":"ann","side":"b"}"#);
        let back: Participant = serde_json::from_str(&json).unwrap();
        assert_eq!(back, participant);
    }

    #[test]
    fn test_tally() {
        let mut tally = DeclarationTally::default();
        tally.add(Declaration::Recorded);
        tally.add(Declaration::Promoted);
        tally.add(Declaration::Promoted);
        assert_eq!(tally.promoted, 2);
        assert_eq!(tally.total(), 3);
    }
}
