//! Sticker Cup Collection Contract
//!
//! Multi-token balance ledger for the sticker economy: one fungible pack
//! token plus one token per sticker id, all keyed by integer id. Minting,
//! burning and escrow transfers are driven exclusively by the stored
//! operator (the cup contract); holders never mutate balances here
//! directly.
//!
//! ## Storage Strategy
//! - `instance()`: Admin, Operator, BaseUri, ContractUri, RevealedPath.
//!   Small fixed-size contract config; all instance keys share one ledger
//!   entry and TTL.
//! - `persistent()`: one Balance entry per (holder, id) pair, bumped on
//!   every write and removed when the holding reaches zero so storage does
//!   not accumulate empty entries.
//!
//! ## Invariant
//! No holding ever goes negative: every debit checks the current balance
//! first, and a failed call rolls back all writes in the frame, so a batch
//! that fails partway leaves no partial debits behind.
#![no_std]
#![allow(unexpected_cfgs)]

use soroban_sdk::{
    contract, contracterror, contractevent, contractimpl, contracttype, Address, Env, String, Vec,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Persistent storage TTL in ledgers (~30 days at 5 s/ledger).
/// Bumped on every balance write so active holdings never expire.
pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400;

/// Upper bound on a rendered item URI (revealed path plus decimal id).
const MAX_URI_LEN: usize = 200;

/// Decimal digits of u64::MAX; reserved in the URI buffer for the id.
const ID_DIGITS_MAX: usize = 20;

// ---------------------------------------------------------------------------
// Error Types
// ---------------------------------------------------------------------------

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized  = 1,
    NotInitialized      = 2,
    NotAuthorized       = 3,
    InvalidAmount       = 4,
    InsufficientBalance = 5,
    LengthMismatch      = 6,
    PathAlreadySet      = 7,
    UriTooLong          = 8,
    Overflow            = 9,
}

// ---------------------------------------------------------------------------
// Storage Types
// ---------------------------------------------------------------------------

/// Discriminants for all storage keys.
///
/// Instance keys hold contract config written at init (plus the one-time
/// revealed path). Persistent Balance entries are created and removed as
/// holdings change.
#[contracttype]
pub enum DataKey {
    // --- instance() ---
    Admin,
    /// The only address allowed to mint, burn and move tokens.
    Operator,
    BaseUri,
    ContractUri,
    /// Item URI prefix, set at most once by `set_revealed_path`.
    RevealedPath,
    // --- persistent() ---
    /// Holding of one token id by one address.
    Balance(Address, u64),
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[contractevent]
pub struct Minted {
    #[topic]
    pub to: Address,
    #[topic]
    pub id: u64,
    pub amount: i128,
}

#[contractevent]
pub struct Burned {
    #[topic]
    pub from: Address,
    #[topic]
    pub id: u64,
    pub amount: i128,
}

#[contractevent]
pub struct Transferred {
    #[topic]
    pub from: Address,
    #[topic]
    pub to: Address,
    pub id: u64,
    pub amount: i128,
}

#[contractevent]
pub struct PathRevealed {
    pub path: String,
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

#[contract]
pub struct StickerCollection;

#[contractimpl]
impl StickerCollection {
    // -----------------------------------------------------------------------
    // init
    // -----------------------------------------------------------------------

    /// Initialize the collection. May only be called once.
    ///
    /// `operator` is the address every mint/burn/transfer must be authorized
    /// by (in a live deployment, the cup contract), so token bookkeeping can
    /// only happen as part of a cup operation.
    pub fn init(
        env: Env,
        admin: Address,
        operator: Address,
        base_uri: String,
        contract_uri: String,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Operator, &operator);
        env.storage().instance().set(&DataKey::BaseUri, &base_uri);
        env.storage().instance().set(&DataKey::ContractUri, &contract_uri);

        Ok(())
    }

    // -----------------------------------------------------------------------
    // mint / mint_batch
    // -----------------------------------------------------------------------

    /// Credit `amount` of token `id` to `to`. Operator only.
    pub fn mint(env: Env, to: Address, id: u64, amount: i128) -> Result<(), Error> {
        require_initialized(&env)?;
        require_operator(&env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        credit(&env, &to, id, amount)?;

        Minted { to, id, amount }.publish(&env);

        Ok(())
    }

    /// Credit several token ids to `to` in one call. Operator only.
    ///
    /// `ids` and `amounts` are parallel arrays. One `Minted` event is
    /// published per entry.
    pub fn mint_batch(
        env: Env,
        to: Address,
        ids: Vec<u64>,
        amounts: Vec<i128>,
    ) -> Result<(), Error> {
        require_initialized(&env)?;
        require_operator(&env)?;

        if ids.len() != amounts.len() {
            return Err(Error::LengthMismatch);
        }

        for i in 0..ids.len() {
            let id = ids.get_unchecked(i);
            let amount = amounts.get_unchecked(i);
            if amount <= 0 {
                return Err(Error::InvalidAmount);
            }
            credit(&env, &to, id, amount)?;
            Minted { to: to.clone(), id, amount }.publish(&env);
        }

        Ok(())
    }

    // -----------------------------------------------------------------------
    // burn / burn_batch
    // -----------------------------------------------------------------------

    /// Debit `amount` of token `id` from `from`. Operator only.
    pub fn burn(env: Env, from: Address, id: u64, amount: i128) -> Result<(), Error> {
        require_initialized(&env)?;
        require_operator(&env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        debit(&env, &from, id, amount)?;

        Burned { from, id, amount }.publish(&env);

        Ok(())
    }

    /// Debit several token ids from `from` in one call. Operator only.
    ///
    /// Entries are debited sequentially against live balances, so a
    /// duplicated id cannot spend the same holding twice. Any shortfall
    /// fails the whole call and no debit persists.
    pub fn burn_batch(
        env: Env,
        from: Address,
        ids: Vec<u64>,
        amounts: Vec<i128>,
    ) -> Result<(), Error> {
        require_initialized(&env)?;
        require_operator(&env)?;

        if ids.len() != amounts.len() {
            return Err(Error::LengthMismatch);
        }

        for i in 0..ids.len() {
            let id = ids.get_unchecked(i);
            let amount = amounts.get_unchecked(i);
            if amount <= 0 {
                return Err(Error::InvalidAmount);
            }
            debit(&env, &from, id, amount)?;
            Burned { from: from.clone(), id, amount }.publish(&env);
        }

        Ok(())
    }

    // -----------------------------------------------------------------------
    // transfer / transfer_batch
    // -----------------------------------------------------------------------

    /// Move `amount` of token `id` from `from` to `to`. Operator only.
    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        id: u64,
        amount: i128,
    ) -> Result<(), Error> {
        require_initialized(&env)?;
        require_operator(&env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        debit(&env, &from, id, amount)?;
        credit(&env, &to, id, amount)?;

        Transferred { from, to, id, amount }.publish(&env);

        Ok(())
    }

    /// Move several token ids from `from` to `to` in one call. Operator only.
    pub fn transfer_batch(
        env: Env,
        from: Address,
        to: Address,
        ids: Vec<u64>,
        amounts: Vec<i128>,
    ) -> Result<(), Error> {
        require_initialized(&env)?;
        require_operator(&env)?;

        if ids.len() != amounts.len() {
            return Err(Error::LengthMismatch);
        }

        for i in 0..ids.len() {
            let id = ids.get_unchecked(i);
            let amount = amounts.get_unchecked(i);
            if amount <= 0 {
                return Err(Error::InvalidAmount);
            }
            debit(&env, &from, id, amount)?;
            credit(&env, &to, id, amount)?;
            Transferred { from: from.clone(), to: to.clone(), id, amount }.publish(&env);
        }

        Ok(())
    }

    // -----------------------------------------------------------------------
    // balance queries
    // -----------------------------------------------------------------------

    /// Holding of token `id` by `owner`. Zero when no entry exists.
    pub fn balance_of(env: Env, owner: Address, id: u64) -> Result<i128, Error> {
        require_initialized(&env)?;
        Ok(get_balance(&env, &owner, id))
    }

    /// Holdings for parallel `owners`/`ids` arrays, in order.
    pub fn balance_of_batch(
        env: Env,
        owners: Vec<Address>,
        ids: Vec<u64>,
    ) -> Result<Vec<i128>, Error> {
        require_initialized(&env)?;

        if owners.len() != ids.len() {
            return Err(Error::LengthMismatch);
        }

        let mut balances = Vec::new(&env);
        for i in 0..ids.len() {
            let owner = owners.get_unchecked(i);
            let id = ids.get_unchecked(i);
            balances.push_back(get_balance(&env, &owner, id));
        }

        Ok(balances)
    }

    // -----------------------------------------------------------------------
    // metadata
    // -----------------------------------------------------------------------

    /// URI of token `id`.
    ///
    /// Before the reveal every id resolves to the base URI (hidden
    /// metadata). After `set_revealed_path` the URI is the revealed path
    /// with the decimal id appended.
    pub fn uri(env: Env, id: u64) -> Result<String, Error> {
        require_initialized(&env)?;

        let revealed: Option<String> = env.storage().instance().get(&DataKey::RevealedPath);
        match revealed {
            Some(path) => Ok(render_item_uri(&env, &path, id)),
            None => Ok(get_base_uri(&env)),
        }
    }

    /// Collection-level metadata URI.
    pub fn contract_uri(env: Env) -> Result<String, Error> {
        require_initialized(&env)?;
        Ok(env
            .storage()
            .instance()
            .get(&DataKey::ContractUri)
            .ok_or(Error::NotInitialized)?)
    }

    /// Set the post-reveal item URI prefix. Admin only, one time.
    ///
    /// The path must leave room in the URI buffer for the longest decimal
    /// id, otherwise `UriTooLong`.
    pub fn set_revealed_path(env: Env, admin: Address, path: String) -> Result<(), Error> {
        require_initialized(&env)?;
        require_admin(&env, &admin)?;

        if env.storage().instance().has(&DataKey::RevealedPath) {
            return Err(Error::PathAlreadySet);
        }
        if path.len() as usize > MAX_URI_LEN - ID_DIGITS_MAX {
            return Err(Error::UriTooLong);
        }

        env.storage().instance().set(&DataKey::RevealedPath, &path);

        PathRevealed { path }.publish(&env);

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn require_initialized(env: &Env) -> Result<(), Error> {
    if !env.storage().instance().has(&DataKey::Admin) {
        return Err(Error::NotInitialized);
    }
    Ok(())
}

/// Verify that `caller` is the stored admin and has signed the invocation.
fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    let admin: Address = env
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)?;
    caller.require_auth();
    if caller != &admin {
        return Err(Error::NotAuthorized);
    }
    Ok(())
}

/// Require authorization from the stored operator.
///
/// Satisfied automatically when the operator contract is the direct
/// cross-contract invoker, which is how the cup drives this ledger.
fn require_operator(env: &Env) -> Result<(), Error> {
    let operator: Address = env
        .storage()
        .instance()
        .get(&DataKey::Operator)
        .ok_or(Error::NotInitialized)?;
    operator.require_auth();
    Ok(())
}

fn get_base_uri(env: &Env) -> String {
    env.storage()
        .instance()
        .get(&DataKey::BaseUri)
        .expect("StickerCollection: base uri not set")
}

fn get_balance(env: &Env, owner: &Address, id: u64) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(owner.clone(), id))
        .unwrap_or(0)
}

/// Write a holding, removing the entry when it reaches zero.
fn set_balance(env: &Env, owner: &Address, id: u64, value: i128) {
    let key = DataKey::Balance(owner.clone(), id);
    if value == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &value);
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
    }
}

fn credit(env: &Env, to: &Address, id: u64, amount: i128) -> Result<(), Error> {
    let new_balance = get_balance(env, to, id)
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    set_balance(env, to, id, new_balance);
    Ok(())
}

fn debit(env: &Env, from: &Address, id: u64, amount: i128) -> Result<(), Error> {
    let held = get_balance(env, from, id);
    if amount > held {
        return Err(Error::InsufficientBalance);
    }
    set_balance(env, from, id, held - amount);
    Ok(())
}

/// Append the decimal id to the revealed path in a fixed buffer.
///
/// `set_revealed_path` caps the path length, so path + digits always fit.
fn render_item_uri(env: &Env, path: &String, id: u64) -> String {
    let path_len = path.len() as usize;
    let mut buf = [0u8; MAX_URI_LEN];
    path.copy_into_slice(&mut buf[..path_len]);
    let digits = format_decimal(id, &mut buf[path_len..]);
    String::from_bytes(env, &buf[..path_len + digits])
}

/// Write the decimal digits of `value` into `out`, returning the count.
fn format_decimal(mut value: u64, out: &mut [u8]) -> usize {
    let mut tmp = [0u8; ID_DIGITS_MAX];
    let mut n = 0;
    loop {
        tmp[n] = b'0' + (value % 10) as u8;
        value /= 10;
        n += 1;
        if value == 0 {
            break;
        }
    }
    for i in 0..n {
        out[i] = tmp[n - 1 - i];
    }
    n
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{testutils::Address as _, vec, Address, Env, String};

    // ------------------------------------------------------------------
    // Test helpers
    // ------------------------------------------------------------------

    /// Register and initialize a collection. The operator is a plain
    /// address here; under mocked auths direct client calls stand in for
    /// the cup contract driving the ledger.
    fn setup(env: &Env) -> (StickerCollectionClient<'_>, Address, Address) {
        let admin = Address::generate(env);
        let operator = Address::generate(env);

        let contract_id = env.register(StickerCollection, ());
        let client = StickerCollectionClient::new(env, &contract_id);

        env.mock_all_auths();
        client.init(
            &admin,
            &operator,
            &String::from_str(env, "ipfs://hidden.json"),
            &String::from_str(env, "ipfs://collection.json"),
        );

        (client, admin, operator)
    }

    // ------------------------------------------------------------------
    // 1. Init lifecycle
    // ------------------------------------------------------------------

    #[test]
    fn test_init_rejects_reinit() {
        let env = Env::default();
        let (client, admin, operator) = setup(&env);
        env.mock_all_auths();

        let result = client.try_init(
            &admin,
            &operator,
            &String::from_str(&env, "ipfs://hidden.json"),
            &String::from_str(&env, "ipfs://collection.json"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_queries_before_init_rejected() {
        let env = Env::default();
        let contract_id = env.register(StickerCollection, ());
        let client = StickerCollectionClient::new(&env, &contract_id);

        let holder = Address::generate(&env);
        assert!(client.try_balance_of(&holder, &1u64).is_err());
        assert!(client.try_uri(&1u64).is_err());
    }

    // ------------------------------------------------------------------
    // 2. Mint and balances
    // ------------------------------------------------------------------

    #[test]
    fn test_mint_credits_holder() {
        let env = Env::default();
        let (client, _, _) = setup(&env);
        env.mock_all_auths();

        let holder = Address::generate(&env);
        client.mint(&holder, &11001u64, &3i128);

        assert_eq!(client.balance_of(&holder, &11001u64), 3);
        assert_eq!(client.balance_of(&holder, &11002u64), 0);
    }

    #[test]
    fn test_mint_zero_rejected() {
        let env = Env::default();
        let (client, _, _) = setup(&env);
        env.mock_all_auths();

        let holder = Address::generate(&env);
        assert!(client.try_mint(&holder, &11001u64, &0i128).is_err());
        assert!(client.try_mint(&holder, &11001u64, &-5i128).is_err());
    }

    #[test]
    fn test_mint_batch_and_batch_query() {
        let env = Env::default();
        let (client, _, _) = setup(&env);
        env.mock_all_auths();

        let holder = Address::generate(&env);
        client.mint_batch(
            &holder,
            &vec![&env, 11001u64, 12002u64, 23005u64],
            &vec![&env, 4i128, 1i128, 2i128],
        );

        let balances = client.balance_of_batch(
            &vec![&env, holder.clone(), holder.clone(), holder.clone()],
            &vec![&env, 11001u64, 12002u64, 23005u64],
        );
        assert_eq!(balances, vec![&env, 4i128, 1i128, 2i128]);
    }

    #[test]
    fn test_batch_length_mismatch_rejected() {
        let env = Env::default();
        let (client, _, _) = setup(&env);
        env.mock_all_auths();

        let holder = Address::generate(&env);
        let result = client.try_mint_batch(
            &holder,
            &vec![&env, 11001u64, 12002u64],
            &vec![&env, 1i128],
        );
        assert!(result.is_err());

        let result = client.try_balance_of_batch(
            &vec![&env, holder.clone()],
            &vec![&env, 11001u64, 12002u64],
        );
        assert!(result.is_err());
    }

    // ------------------------------------------------------------------
    // 3. Burn
    // ------------------------------------------------------------------

    #[test]
    fn test_burn_debits_holder() {
        let env = Env::default();
        let (client, _, _) = setup(&env);
        env.mock_all_auths();

        let holder = Address::generate(&env);
        client.mint(&holder, &11001u64, &3i128);
        client.burn(&holder, &11001u64, &2i128);

        assert_eq!(client.balance_of(&holder, &11001u64), 1);
    }

    #[test]
    fn test_burn_exceeding_balance_rejected() {
        let env = Env::default();
        let (client, _, _) = setup(&env);
        env.mock_all_auths();

        let holder = Address::generate(&env);
        client.mint(&holder, &11001u64, &1i128);

        assert!(client.try_burn(&holder, &11001u64, &2i128).is_err());
        assert_eq!(client.balance_of(&holder, &11001u64), 1);
    }

    #[test]
    fn test_failed_batch_burn_rolls_back() {
        let env = Env::default();
        let (client, _, _) = setup(&env);
        env.mock_all_auths();

        let holder = Address::generate(&env);
        client.mint(&holder, &11001u64, &5i128);

        // Second entry is short; the first debit must not persist.
        let result = client.try_burn_batch(
            &holder,
            &vec![&env, 11001u64, 12002u64],
            &vec![&env, 1i128, 1i128],
        );
        assert!(result.is_err());
        assert_eq!(client.balance_of(&holder, &11001u64), 5);
    }

    #[test]
    fn test_duplicate_id_batch_burn_cannot_double_spend() {
        let env = Env::default();
        let (client, _, _) = setup(&env);
        env.mock_all_auths();

        let holder = Address::generate(&env);
        client.mint(&holder, &11001u64, &1i128);

        let result = client.try_burn_batch(
            &holder,
            &vec![&env, 11001u64, 11001u64],
            &vec![&env, 1i128, 1i128],
        );
        assert!(result.is_err());
        assert_eq!(client.balance_of(&holder, &11001u64), 1);
    }

    // ------------------------------------------------------------------
    // 4. Transfer
    // ------------------------------------------------------------------

    #[test]
    fn test_transfer_moves_holding() {
        let env = Env::default();
        let (client, _, _) = setup(&env);
        env.mock_all_auths();

        let alice = Address::generate(&env);
        let bob = Address::generate(&env);
        client.mint(&alice, &11001u64, &2i128);
        client.transfer(&alice, &bob, &11001u64, &1i128);

        assert_eq!(client.balance_of(&alice, &11001u64), 1);
        assert_eq!(client.balance_of(&bob, &11001u64), 1);
    }

    #[test]
    fn test_transfer_short_holding_rejected() {
        let env = Env::default();
        let (client, _, _) = setup(&env);
        env.mock_all_auths();

        let alice = Address::generate(&env);
        let bob = Address::generate(&env);

        assert!(client.try_transfer(&alice, &bob, &11001u64, &1i128).is_err());
    }

    #[test]
    fn test_transfer_batch_moves_all_or_nothing() {
        let env = Env::default();
        let (client, _, _) = setup(&env);
        env.mock_all_auths();

        let alice = Address::generate(&env);
        let bob = Address::generate(&env);
        client.mint_batch(
            &alice,
            &vec![&env, 11001u64, 12002u64],
            &vec![&env, 1i128, 1i128],
        );

        // 23005 is not held; nothing may move.
        let result = client.try_transfer_batch(
            &alice,
            &bob,
            &vec![&env, 11001u64, 23005u64],
            &vec![&env, 1i128, 1i128],
        );
        assert!(result.is_err());
        assert_eq!(client.balance_of(&alice, &11001u64), 1);
        assert_eq!(client.balance_of(&bob, &11001u64), 0);

        client.transfer_batch(
            &alice,
            &bob,
            &vec![&env, 11001u64, 12002u64],
            &vec![&env, 1i128, 1i128],
        );
        assert_eq!(client.balance_of(&bob, &11001u64), 1);
        assert_eq!(client.balance_of(&bob, &12002u64), 1);
    }

    // ------------------------------------------------------------------
    // 5. Metadata and reveal
    // ------------------------------------------------------------------

    #[test]
    fn test_uri_hidden_before_reveal() {
        let env = Env::default();
        let (client, _, _) = setup(&env);

        assert_eq!(client.uri(&11001u64), String::from_str(&env, "ipfs://hidden.json"));
        assert_eq!(client.uri(&1u64), String::from_str(&env, "ipfs://hidden.json"));
        assert_eq!(
            client.contract_uri(),
            String::from_str(&env, "ipfs://collection.json")
        );
    }

    #[test]
    fn test_uri_appends_id_after_reveal() {
        let env = Env::default();
        let (client, admin, _) = setup(&env);
        env.mock_all_auths();

        client.set_revealed_path(&admin, &String::from_str(&env, "ipfs://revealed/"));

        assert_eq!(
            client.uri(&11001u64),
            String::from_str(&env, "ipfs://revealed/11001")
        );
        assert_eq!(client.uri(&1u64), String::from_str(&env, "ipfs://revealed/1"));
    }

    #[test]
    fn test_reveal_only_once() {
        let env = Env::default();
        let (client, admin, _) = setup(&env);
        env.mock_all_auths();

        client.set_revealed_path(&admin, &String::from_str(&env, "ipfs://revealed/"));

        let result =
            client.try_set_revealed_path(&admin, &String::from_str(&env, "ipfs://other/"));
        assert!(result.is_err());
    }

    #[test]
    fn test_reveal_by_non_admin_rejected() {
        let env = Env::default();
        let (client, _, _) = setup(&env);
        env.mock_all_auths();

        let outsider = Address::generate(&env);
        let result =
            client.try_set_revealed_path(&outsider, &String::from_str(&env, "ipfs://revealed/"));
        assert!(result.is_err());
    }

    #[test]
    fn test_overlong_reveal_path_rejected() {
        let env = Env::default();
        let (client, admin, _) = setup(&env);
        env.mock_all_auths();

        // One byte over the longest path that still leaves room for an id.
        let long = "ipfs://aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
        assert_eq!(long.len(), MAX_URI_LEN - ID_DIGITS_MAX + 1);
        let result = client.try_set_revealed_path(&admin, &String::from_str(&env, long));
        assert!(result.is_err());
    }

    // ------------------------------------------------------------------
    // 6. Decimal rendering
    // ------------------------------------------------------------------

    #[test]
    fn test_format_decimal() {
        let mut buf = [0u8; ID_DIGITS_MAX];

        let n = format_decimal(0, &mut buf);
        assert_eq!(&buf[..n], b"0");

        let n = format_decimal(7, &mut buf);
        assert_eq!(&buf[..n], b"7");

        let n = format_decimal(11001, &mut buf);
        assert_eq!(&buf[..n], b"11001");

        let n = format_decimal(u64::MAX, &mut buf);
        assert_eq!(&buf[..n], b"18446744073709551615");
    }
}
