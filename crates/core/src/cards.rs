use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    #[serde(rename = "♥")]
    Hearts,
    #[serde(rename = "♦")]
    Diamonds,
    #[serde(rename = "♣")]
    Clubs,
    #[serde(rename = "♠")]
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn glyph(self) -> &'static str {
        match self {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    #[serde(rename = "A", alias = "1")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
}

impl Rank {
    pub const ALL: [Rank; 6] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
    ];

    /// Numeric value; the ace counts as 1.
    pub fn value(self) -> u8 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
        }
    }

    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value).checked_sub(1)?).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
        }
    }

    pub fn parity(self) -> Parity {
        if self.value() % 2 == 1 {
            Parity::Odd
        } else {
            Parity::Even
        }
    }

    pub fn tier(self) -> Tier {
        match self {
            Rank::Ace | Rank::Two => Tier::Low,
            Rank::Three | Rank::Four => Tier::Mid,
            Rank::Five | Rank::Six => Tier::High,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Parity {
    Odd,
    Even,
}

/// Difficulty band shared by a pair of ranks (A/2, 3/4, 5/6).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Tier {
    Low,
    Mid,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    #[serde(alias = "number")]
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.suit.glyph(), self.rank.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_pair_adjacent_ranks() {
        let tiers: Vec<Tier> = Rank::ALL.iter().map(|rank| rank.tier()).collect();
        assert_eq!(
            tiers,
            vec![Tier::Low, Tier::Low, Tier::Mid, Tier::Mid, Tier::High, Tier::High]
        );
    }

    #[test]
    fn ace_is_odd_rank_one() {
        assert_eq!(Rank::Ace.value(), 1);
        assert_eq!(Rank::Ace.parity(), Parity::Odd);
        assert_eq!(Rank::Six.parity(), Parity::Even);
        assert_eq!(Rank::from_value(1), Some(Rank::Ace));
        assert_eq!(Rank::from_value(0), None);
        assert_eq!(Rank::from_value(7), None);
    }

    #[test]
    fn display_uses_glyph_and_ace_label() {
        assert_eq!(Card::new(Suit::Spades, Rank::Ace).to_string(), "♠ A");
        assert_eq!(Card::new(Suit::Hearts, Rank::Four).to_string(), "♥ 4");
    }
}
