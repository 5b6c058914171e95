//! Encoding addon messages and reading them back.
//!
//! Run with: cargo run --example roundtrip

use serde::{Deserialize, Serialize};
use serde_ace::{ace, deserialize, from_str, serialize, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct RaidRoster {
    leader: String,
    size: u8,
    members: Vec<Member>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Member {
    name: String,
    class: String,
    item_level: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let roster = RaidRoster {
        leader: "Jaina".to_string(),
        size: 2,
        members: vec![
            Member {
                name: "Jaina".to_string(),
                class: "Mage".to_string(),
                item_level: 489.5,
            },
            Member {
                name: "Thrall".to_string(),
                class: "Shaman".to_string(),
                item_level: 1.0 / 3.0 + 480.0,
            },
        ],
    };

    let text = to_string(&roster)?;
    println!("Roster message:\n{}\n", text);

    let roster_back: RaidRoster = from_str(&text)?;
    assert_eq!(roster, roster_back);
    println!("✓ Round-trip successful, floats are bit-identical");

    // A message may carry several values.
    let values = vec![
        ace!("LOOT"),
        ace!({"item": 19019, "roll": 98}),
        ace!(["need", nil, "greed"]),
    ];
    let text = serialize(&values)?;
    println!("\nMulti-value message:\n{}", text);

    for value in deserialize(&text)? {
        println!("  {}", value);
    }

    Ok(())
}
