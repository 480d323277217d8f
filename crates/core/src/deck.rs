use crate::{Card, Rank, RngState, RunError, Suit};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DECK_SIZE: usize = 24;

/// A full 24-card deck. Every constructor, deserialization included, checks
/// that each card appears exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Card>", try_from = "Vec<Card>")]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 24 cards in suit-major order.
    pub fn standard24() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(suit, rank));
            }
        }
        Self { cards }
    }

    pub fn shuffled(rng: &mut RngState) -> Self {
        let mut deck = Self::standard24();
        deck.shuffle(rng);
        deck
    }

    /// Wraps an existing ordering; `None` unless it is exactly one of each card.
    pub fn from_cards(cards: Vec<Card>) -> Option<Self> {
        let deck = Self { cards };
        deck.is_complete().then_some(deck)
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.cards);
    }

    pub fn is_complete(&self) -> bool {
        if self.cards.len() != DECK_SIZE {
            return false;
        }
        let unique: HashSet<Card> = self.cards.iter().copied().collect();
        unique.len() == DECK_SIZE
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl TryFrom<Vec<Card>> for Deck {
    type Error = RunError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Self::from_cards(cards).ok_or(RunError::InvalidDeck)
    }
}

impl From<Deck> for Vec<Card> {
    fn from(deck: Deck) -> Self {
        deck.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_deck_has_every_pair_once() {
        let deck = Deck::standard24();
        assert_eq!(deck.len(), DECK_SIZE);
        assert!(deck.is_complete());
        assert_eq!(deck.get(0), Some(Card::new(Suit::Hearts, Rank::Ace)));
        assert_eq!(deck.get(23), Some(Card::new(Suit::Spades, Rank::Six)));
    }

    #[test]
    fn from_cards_rejects_duplicates_and_short_decks() {
        let mut cards = Deck::standard24().cards().to_vec();
        cards[1] = cards[0];
        assert!(Deck::from_cards(cards.clone()).is_none());
        cards.truncate(10);
        assert!(Deck::from_cards(cards).is_none());
    }

    #[test]
    fn deserializing_checks_composition() {
        let deck = Deck::shuffled(&mut RngState::from_seed(5));
        let json = serde_json::to_string(&deck).expect("serialize");
        let back: Deck = serde_json::from_str(&json).expect("full deck");
        assert_eq!(back, deck);

        let pair = vec![Card::new(Suit::Hearts, Rank::Ace); 2];
        let json = serde_json::to_string(&pair).expect("serialize");
        assert!(serde_json::from_str::<Deck>(&json).is_err());

        let mut cards = Deck::standard24().cards().to_vec();
        cards[23] = cards[0];
        let json = serde_json::to_string(&cards).expect("serialize");
        assert!(serde_json::from_str::<Deck>(&json).is_err());
    }
}
