//! Sticker identity and draw selection.
//!
//! A sticker is keyed by (country, type, number) and lives in the collection
//! ledger as a single integer id: `country * 10_000 + type * 1_000 +
//! number`. Types stop at 9 and shirt numbers at 999 by construction of the
//! digit layout, so distinct keys can never pack to the same id, and the
//! pack token (id 1) sits far below the smallest sticker id (11_001).

use soroban_sdk::Map;

/// Multiplier placing the country in the id's upper digits.
const COUNTRY_BASE: u64 = 10_000;
/// Multiplier placing the type above the number digits.
const TYPE_BASE: u64 = 1_000;

/// Pack a sticker key into its ledger id.
pub fn encode(country: u32, type_id: u32, number: u32) -> u64 {
    country as u64 * COUNTRY_BASE + type_id as u64 * TYPE_BASE + number as u64
}

/// Split a ledger id back into (country, type, number).
pub fn decode(id: u64) -> (u32, u32, u32) {
    let country = (id / COUNTRY_BASE) as u32;
    let type_id = (id % COUNTRY_BASE / TYPE_BASE) as u32;
    let number = (id % TYPE_BASE) as u32;
    (country, type_id, number)
}

/// Select the sticker sitting at cumulative position `roll` in the
/// id-ordered inventory, weighting each entry by its remaining count.
/// Entries with no copies left are skipped. Returns `None` only when `roll`
/// is not below the total remaining count.
pub fn pick(inventory: &Map<u64, u32>, roll: u64) -> Option<u64> {
    let mut cum: u64 = 0;
    for (id, remaining) in inventory.iter() {
        cum += remaining as u64;
        if roll < cum {
            return Some(id);
        }
    }
    None
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{Env, Map};

    #[test]
    fn test_encode_packs_digits() {
        assert_eq!(encode(1, 1, 1), 11_001);
        assert_eq!(encode(1, 2, 30), 12_030);
        assert_eq!(encode(6, 3, 10), 63_010);
        assert_eq!(encode(32, 3, 99), 323_099);
    }

    #[test]
    fn test_decode_inverts_encode() {
        for country in [1u32, 2, 6, 9, 10, 32, 48] {
            for type_id in 1u32..=3 {
                for number in [1u32, 2, 9, 10, 11, 50, 98, 99] {
                    let id = encode(country, type_id, number);
                    assert_eq!(decode(id), (country, type_id, number));
                }
            }
        }
    }

    #[test]
    fn test_pick_walks_cumulative_weights() {
        let env = Env::default();
        let mut inv: Map<u64, u32> = Map::new(&env);
        inv.set(11_001, 2);
        inv.set(12_001, 0);
        inv.set(13_001, 3);

        assert_eq!(pick(&inv, 0), Some(11_001));
        assert_eq!(pick(&inv, 1), Some(11_001));
        assert_eq!(pick(&inv, 2), Some(13_001));
        assert_eq!(pick(&inv, 4), Some(13_001));
        assert_eq!(pick(&inv, 5), None);
    }

    #[test]
    fn test_pick_skips_exhausted_entries() {
        let env = Env::default();
        let mut inv: Map<u64, u32> = Map::new(&env);
        inv.set(11_001, 0);
        inv.set(21_001, 1);

        assert_eq!(pick(&inv, 0), Some(21_001));
    }

    #[test]
    fn test_pick_empty_inventory_is_none() {
        let env = Env::default();
        let inv: Map<u64, u32> = Map::new(&env);
        assert_eq!(pick(&inv, 0), None);
    }
}
