//! Catalog — the read-only registry of the club fleet.
//!
//! Yachts are seeded at startup and never mutated; bookings reference them
//! by id only, so there is no stale copy to diverge.

use serde::{Deserialize, Serialize};

/// A bookable yacht.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Yacht {
  pub id:          String,
  pub name:        String,
  pub model:       String,
  pub home_harbor: String,
  /// Maximum party size; always at least 1.
  pub capacity:    u32,
  pub amenities:   Vec<String>,
}

/// The fleet registry. Lookup only; there is no mutation API.
#[derive(Debug, Clone)]
pub struct Catalog {
  yachts: Vec<Yacht>,
}

impl Catalog {
  pub fn new(yachts: Vec<Yacht>) -> Self {
    Self { yachts }
  }

  pub fn get(&self, id: &str) -> Option<&Yacht> {
    self.yachts.iter().find(|y| y.id == id)
  }

  pub fn capacity(&self, id: &str) -> Option<u32> {
    self.get(id).map(|y| y.capacity)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Yacht> {
    self.yachts.iter()
  }

  pub fn len(&self) -> usize {
    self.yachts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.yachts.is_empty()
  }

  /// The club fleet as seeded in production.
  pub fn club_fleet() -> Self {
    fn yacht(
      id: &str,
      name: &str,
      model: &str,
      home_harbor: &str,
      capacity: u32,
      amenities: &[&str],
    ) -> Yacht {
      Yacht {
        id: id.to_owned(),
        name: name.to_owned(),
        model: model.to_owned(),
        home_harbor: home_harbor.to_owned(),
        capacity,
        amenities: amenities.iter().map(|a| (*a).to_owned()).collect(),
      }
    }

    Self::new(vec![
      yacht("yacht-1", "Serenity", "Hickley 42", "Newport", 8, &[
        "galley",
        "sound-system",
        "swim-platform",
      ]),
      yacht("yacht-2", "Freedom", "Sabre 45", "Nantucket", 10, &[
        "galley",
        "sound-system",
        "radar",
        "ac",
      ]),
      yacht(
        "yacht-3",
        "Azure Dream",
        "Hinckley Picnic Boat 40",
        "Martha's Vineyard",
        6,
        &[
          "galley",
          "sound-system",
          "swim-platform",
          "sun-deck",
          "wine-cooler",
        ],
      ),
      yacht("yacht-4", "Windchaser", "MJM 50z", "Chatham", 12, &[
        "galley",
        "sound-system",
        "radar",
        "ac",
        "generator",
        "bbq-grill",
      ]),
      yacht(
        "yacht-5",
        "Moonlight Bay",
        "Back Cove 41",
        "Provincetown",
        8,
        &[
          "galley",
          "sound-system",
          "swim-platform",
          "fishing-gear",
          "paddle-boards",
        ],
      ),
      yacht("yacht-6", "Sea Breeze", "Hunt Harrier 36", "Newport", 7, &[
        "galley",
        "sound-system",
        "swim-platform",
        "snorkel-gear",
      ]),
      yacht(
        "yacht-7",
        "Coastal Explorer",
        "Grady-White Canyon 456",
        "Block Island",
        14,
        &[
          "galley",
          "sound-system",
          "radar",
          "ac",
          "generator",
          "diving-platform",
          "fish-finder",
        ],
      ),
      yacht(
        "yacht-8",
        "Sunset Chaser",
        "Chris-Craft Catalina 34",
        "Edgartown",
        9,
        &[
          "galley",
          "sound-system",
          "swim-platform",
          "teak-deck",
          "champagne-cooler",
        ],
      ),
    ])
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn club_fleet_is_seeded() {
    let catalog = Catalog::club_fleet();
    assert_eq!(catalog.len(), 8);
    assert_eq!(catalog.capacity("yacht-1"), Some(8));
    assert_eq!(catalog.get("yacht-7").map(|y| y.name.as_str()), Some(
      "Coastal Explorer"
    ));
  }

  #[test]
  fn unknown_id_is_none() {
    let catalog = Catalog::club_fleet();
    assert!(catalog.get("yacht-99").is_none());
    assert!(catalog.capacity("dinghy").is_none());
  }
}
