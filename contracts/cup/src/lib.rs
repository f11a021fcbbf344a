//! Sticker Cup Contract
//!
//! The core of a collectible sticker economy: sells sealed packs, opens
//! them into randomly drawn stickers, escrows peer-to-peer trades, and pays
//! an accumulated prize pool out to the first users who complete an album.
//! All token bookkeeping lives in the companion collection contract, which
//! this contract drives as its sole operator; a SEP-41 token settles
//! payments.
//!
//! ## Game Flow
//! 1. Admin registers the sticker catalog (`register_stickers`) and turns
//!    on opening (`enable_open_packs`).
//! 2. Users buy packs (`mint_packs`). While prizes remain claimable, half
//!    of every payment accrues to the prize pool and half to the owner.
//! 3. Users open packs (`open_packs`) for randomly drawn stickers, trade
//!    them (`start_trade` / `complete_trade`), and claim a prize share once
//!    they hold a full album (`claim_prize`).
//!
//! ## Storage Strategy
//! - `instance()`: deployment config plus the two admin-mutable knobs
//!   (pack price, opening toggle). One ledger entry, one TTL.
//! - `persistent()`: the inventory map, accounting counters, trade records
//!   and per-owner trade indices, each bumped on every write.
//!
//! ## Randomness
//! Draws use the host PRNG, freshly seeded by the ledger for each
//! invocation. That is unpredictable to ordinary users but not to a
//! colluding validator, the usual trade-off for on-chain draws without an
//! oracle round trip. Acceptable while single pulls are worth far less
//! than a validator's stake.
#![no_std]
#![allow(unexpected_cfgs)]

#[cfg(test)]
extern crate std;

use soroban_sdk::{
    contract, contracterror, contractevent, contractimpl, contracttype, token::TokenClient,
    Address, Env, IntoVal, Map, Val, Vec,
};

use stickercup_collection::StickerCollectionClient;

mod sticker;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Persistent storage TTL in ledgers (~30 days at 5 s/ledger).
pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400;

/// Token id of the sealed pack in the collection ledger. Sticker ids start
/// at 11_001, so the pack can never collide with one.
pub const PACK_TOKEN_ID: u64 = 1;

/// Sticker types per country.
pub const TOTAL_TYPES: u32 = 3;

/// Shirt numbers run 1–99.
pub const MAX_NUMBER: u32 = 99;

/// Account strkeys are 56 characters and start with `G`.
const STRKEY_LEN: u32 = 56;

// ---------------------------------------------------------------------------
// Error Types
// ---------------------------------------------------------------------------

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized     = 2,
    InvalidConfig      = 3,
    NotAuthorized      = 4,
    NotTradeOwner      = 5,
    LengthMismatch     = 6,
    InvalidCountry     = 7,
    InvalidType        = 8,
    InvalidNumber      = 9,
    InvalidAmount      = 10,
    SupplyExceeded     = 11,
    CatalogExhausted   = 12,
    InsufficientFunds  = 13,
    NotEnabled         = 14,
    TradeNotFound      = 15,
    CannotTradePacks   = 16,
    NumberMismatch     = 17,
    WrongStickerCount  = 18,
    NoMoreWinners      = 19,
    NoBalance          = 20,
    SameValue          = 21,
    NotHuman           = 22,
    Overflow           = 23,
}

// ---------------------------------------------------------------------------
// Storage Types
// ---------------------------------------------------------------------------

/// Discriminants for all storage keys.
///
/// Instance keys hold deployment config; PackPrice and OpeningEnabled are
/// the only ones rewritten after init. Persistent keys hold the live
/// economy: catalog, counters, balances and trades.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    // --- instance() ---
    Admin,
    Token,
    Collection,
    TotalPacks,
    MarketingPacks,
    StickersPerPack,
    MaxWinners,
    TotalCountries,
    PackPrice,
    OpeningEnabled,
    // --- persistent() ---
    /// Remaining undrawn copies per sticker id.
    Inventory,
    /// Catalog entries registered so far (batch entries, not copies).
    RegisteredStickers,
    /// Sum of all remaining inventory counts.
    StickersAvailable,
    /// Packs minted so far, marketing allotment included.
    MintedPacks,
    PoolBalance,
    OwnerBalance,
    WinnersRemaining,
    /// Monotonic trade index allocator; also the count of trades ever opened.
    TotalTrades,
    /// Active trade record keyed by index.
    Trade(u64),
    /// Indices of an owner's active trades.
    OwnerTrades(Address),
}

/// Deployment configuration snapshot returned by `config`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    pub payment_token: Address,
    pub collection: Address,
    pub total_packs: u32,
    pub marketing_packs: u32,
    pub stickers_per_pack: u32,
    pub max_winners: u32,
    pub total_countries: u32,
}

/// Live accounting snapshot returned by `game_state`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameState {
    pub pack_price: i128,
    pub minted_packs: u32,
    pub opening_enabled: bool,
    pub registered_stickers: u32,
    pub stickers_available: u32,
    pub pool_balance: i128,
    pub owner_balance: i128,
    pub winners_remaining: u32,
    pub total_trades: u64,
}

/// An open trade offer, as stored and as returned by the trade views.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TradeInfo {
    pub index: u64,
    pub owner: Address,
    /// Sticker id held in escrow for the taker.
    pub offer_id: u64,
    pub req_country: u32,
    pub req_type: u32,
    /// Requested shirt number; 0 accepts any number.
    pub req_number: u32,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[contractevent]
pub struct StickersRegistered {
    pub entries: u32,
    pub total_available: u32,
}

#[contractevent]
pub struct PriceChanged {
    pub price: i128,
}

#[contractevent]
pub struct OpeningToggled {
    pub enabled: bool,
}

#[contractevent]
pub struct PacksMinted {
    #[topic]
    pub to: Address,
    pub count: u32,
    pub payment: i128,
}

#[contractevent]
pub struct PackOpened {
    #[topic]
    pub opener: Address,
    pub stickers: Vec<u64>,
}

#[contractevent]
pub struct TradeStarted {
    #[topic]
    pub index: u64,
    #[topic]
    pub owner: Address,
    pub offer_id: u64,
    pub req_country: u32,
    pub req_type: u32,
    pub req_number: u32,
}

#[contractevent]
pub struct TradeCompleted {
    #[topic]
    pub index: u64,
    #[topic]
    pub completer: Address,
    pub received_id: u64,
    pub given_id: u64,
}

#[contractevent]
pub struct TradeCanceled {
    #[topic]
    pub index: u64,
}

#[contractevent]
pub struct NewWinner {
    #[topic]
    pub winner: Address,
    pub stickers: Vec<u64>,
    pub prize: i128,
    pub winners_remaining: u32,
}

#[contractevent]
pub struct OwnerWithdrawal {
    #[topic]
    pub to: Address,
    pub amount: i128,
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

#[contract]
pub struct StickerCup;

#[contractimpl]
impl StickerCup {
    // -----------------------------------------------------------------------
    // init
    // -----------------------------------------------------------------------

    /// Initialize the cup. May only be called once.
    ///
    /// The collection must already be initialized with this contract as its
    /// operator: the marketing allotment is minted to the admin here, and
    /// every later operation drives the collection ledger cross-contract.
    pub fn init(
        env: Env,
        admin: Address,
        payment_token: Address,
        collection: Address,
        total_packs: u32,
        marketing_packs: u32,
        stickers_per_pack: u32,
        max_winners: u32,
        total_countries: u32,
        pack_price: i128,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        if marketing_packs > total_packs
            || stickers_per_pack == 0
            || max_winners == 0
            || total_countries == 0
            || pack_price <= 0
        {
            return Err(Error::InvalidConfig);
        }

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Token, &payment_token);
        env.storage().instance().set(&DataKey::Collection, &collection);
        env.storage().instance().set(&DataKey::TotalPacks, &total_packs);
        env.storage().instance().set(&DataKey::MarketingPacks, &marketing_packs);
        env.storage().instance().set(&DataKey::StickersPerPack, &stickers_per_pack);
        env.storage().instance().set(&DataKey::MaxWinners, &max_winners);
        env.storage().instance().set(&DataKey::TotalCountries, &total_countries);
        env.storage().instance().set(&DataKey::PackPrice, &pack_price);
        env.storage().instance().set(&DataKey::OpeningEnabled, &false);

        // Seed the persistent counters so reads never see None.
        set_persistent(&env, DataKey::Inventory, &Map::<u64, u32>::new(&env));
        set_persistent(&env, DataKey::RegisteredStickers, &0u32);
        set_persistent(&env, DataKey::StickersAvailable, &0u32);
        set_persistent(&env, DataKey::MintedPacks, &marketing_packs);
        set_persistent(&env, DataKey::PoolBalance, &0i128);
        set_persistent(&env, DataKey::OwnerBalance, &0i128);
        set_persistent(&env, DataKey::WinnersRemaining, &max_winners);
        set_persistent(&env, DataKey::TotalTrades, &0u64);

        // Marketing allotment goes to the admin outside the paid path.
        if marketing_packs > 0 {
            collection_client(&env).mint(&admin, &PACK_TOKEN_ID, &(marketing_packs as i128));
        }

        Ok(())
    }

    // -----------------------------------------------------------------------
    // register_stickers
    // -----------------------------------------------------------------------

    /// Add sticker copies to the draw catalog. Admin only.
    ///
    /// The four arrays are parallel: entry `i` adds `amounts[i]` copies of
    /// the sticker `(countries[i], types[i], numbers[i])`. Repeated calls
    /// accumulate, so the catalog can be registered in slices and topped up
    /// for an id that already exists.
    pub fn register_stickers(
        env: Env,
        admin: Address,
        countries: Vec<u32>,
        types: Vec<u32>,
        numbers: Vec<u32>,
        amounts: Vec<u32>,
    ) -> Result<(), Error> {
        require_initialized(&env)?;
        require_admin(&env, &admin)?;

        if countries.len() != types.len()
            || countries.len() != numbers.len()
            || countries.len() != amounts.len()
        {
            return Err(Error::LengthMismatch);
        }

        let total_countries: u32 =
            env.storage().instance().get(&DataKey::TotalCountries).unwrap();

        let mut inventory = get_inventory(&env);
        let mut added: u32 = 0;

        for i in 0..countries.len() {
            let country = countries.get_unchecked(i);
            let type_id = types.get_unchecked(i);
            let number = numbers.get_unchecked(i);
            let amount = amounts.get_unchecked(i);

            check_sticker_key(country, type_id, number, total_countries)?;
            if amount == 0 {
                return Err(Error::InvalidAmount);
            }

            let id = sticker::encode(country, type_id, number);
            let remaining = inventory.get(id).unwrap_or(0);
            inventory.set(id, remaining.checked_add(amount).ok_or(Error::Overflow)?);

            added = added.checked_add(amount).ok_or(Error::Overflow)?;
        }

        set_persistent(&env, DataKey::Inventory, &inventory);

        let new_registered = get_u32(&env, DataKey::RegisteredStickers)
            .checked_add(countries.len())
            .ok_or(Error::Overflow)?;
        set_persistent(&env, DataKey::RegisteredStickers, &new_registered);

        let new_available = get_u32(&env, DataKey::StickersAvailable)
            .checked_add(added)
            .ok_or(Error::Overflow)?;
        set_persistent(&env, DataKey::StickersAvailable, &new_available);

        StickersRegistered { entries: countries.len(), total_available: new_available }
            .publish(&env);

        Ok(())
    }

    // -----------------------------------------------------------------------
    // set_pack_price
    // -----------------------------------------------------------------------

    /// Change the pack price. Admin only; setting the current price again
    /// is rejected so a stale duplicate transaction cannot slip through
    /// silently.
    pub fn set_pack_price(env: Env, admin: Address, price: i128) -> Result<(), Error> {
        require_initialized(&env)?;
        require_admin(&env, &admin)?;

        if price <= 0 {
            return Err(Error::InvalidAmount);
        }

        let current: i128 = env.storage().instance().get(&DataKey::PackPrice).unwrap();
        if price == current {
            return Err(Error::SameValue);
        }

        env.storage().instance().set(&DataKey::PackPrice, &price);

        PriceChanged { price }.publish(&env);

        Ok(())
    }

    // -----------------------------------------------------------------------
    // enable_open_packs
    // -----------------------------------------------------------------------

    /// Toggle the gate shared by pack opening and prize claims. Admin only.
    pub fn enable_open_packs(env: Env, admin: Address, enabled: bool) -> Result<(), Error> {
        require_initialized(&env)?;
        require_admin(&env, &admin)?;

        env.storage().instance().set(&DataKey::OpeningEnabled, &enabled);

        OpeningToggled { enabled }.publish(&env);

        Ok(())
    }

    // -----------------------------------------------------------------------
    // mint_packs
    // -----------------------------------------------------------------------

    /// Buy `count` sealed packs for `to`, paying `payment` tokens.
    ///
    /// The full payment is collected and split: while prizes remain
    /// claimable, half accrues to the prize pool and the rest (including
    /// the odd unit) to the owner; once every winner has claimed, the whole
    /// payment goes to the owner. Overpaying is allowed and split the same
    /// way.
    pub fn mint_packs(
        env: Env,
        buyer: Address,
        to: Address,
        count: u32,
        payment: i128,
    ) -> Result<(), Error> {
        require_initialized(&env)?;
        buyer.require_auth();

        if count == 0 || payment <= 0 {
            return Err(Error::InvalidAmount);
        }

        let total_packs: u32 = env.storage().instance().get(&DataKey::TotalPacks).unwrap();
        let new_minted = get_u32(&env, DataKey::MintedPacks)
            .checked_add(count)
            .ok_or(Error::Overflow)?;
        if new_minted > total_packs {
            return Err(Error::SupplyExceeded);
        }

        let cost = get_pack_price(&env)
            .checked_mul(count as i128)
            .ok_or(Error::Overflow)?;
        if payment < cost {
            return Err(Error::InsufficientFunds);
        }

        // Collect the full payment before splitting it.
        TokenClient::new(&env, &get_token(&env)).transfer(
            &buyer,
            &env.current_contract_address(),
            &payment,
        );

        let winners_remaining = get_u32(&env, DataKey::WinnersRemaining);
        let pool_share = if winners_remaining > 0 { payment / 2 } else { 0 };
        let owner_share = payment.checked_sub(pool_share).ok_or(Error::Overflow)?;

        let new_pool = get_i128(&env, DataKey::PoolBalance)
            .checked_add(pool_share)
            .ok_or(Error::Overflow)?;
        set_persistent(&env, DataKey::PoolBalance, &new_pool);

        let new_owner = get_i128(&env, DataKey::OwnerBalance)
            .checked_add(owner_share)
            .ok_or(Error::Overflow)?;
        set_persistent(&env, DataKey::OwnerBalance, &new_owner);

        set_persistent(&env, DataKey::MintedPacks, &new_minted);

        collection_client(&env).mint(&to, &PACK_TOKEN_ID, &(count as i128));

        PacksMinted { to, count, payment }.publish(&env);

        Ok(())
    }

    // -----------------------------------------------------------------------
    // open_packs
    // -----------------------------------------------------------------------

    /// Burn `count` of the opener's packs and draw their stickers.
    ///
    /// Draws are without replacement across the whole catalog: each pull
    /// removes one copy from the inventory, weighted by remaining counts.
    /// A draw attempted against an empty catalog fails the whole call with
    /// `CatalogExhausted` and no pack is lost. One `PackOpened` event is
    /// published per pack; the return value is every drawn id, flattened,
    /// for callers reading the result off a simulation.
    ///
    /// Only account addresses may open packs; contract callers are refused
    /// so draws cannot be wrapped in on-chain retry logic.
    pub fn open_packs(env: Env, opener: Address, count: u32) -> Result<Vec<u64>, Error> {
        require_initialized(&env)?;

        if !opening_enabled(&env) {
            return Err(Error::NotEnabled);
        }
        require_human(&opener)?;
        opener.require_auth();

        if count == 0 {
            return Err(Error::InvalidAmount);
        }

        let stickers_per_pack: u32 =
            env.storage().instance().get(&DataKey::StickersPerPack).unwrap();

        // Burn the packs up front; a short pack balance aborts here.
        collection_client(&env).burn(&opener, &PACK_TOKEN_ID, &(count as i128));

        let mut inventory = get_inventory(&env);
        let mut available = get_u32(&env, DataKey::StickersAvailable);

        let mut packs: Vec<Vec<u64>> = Vec::new(&env);
        let mut drawn: Vec<u64> = Vec::new(&env);

        for _ in 0..count {
            let mut pack: Vec<u64> = Vec::new(&env);
            for _ in 0..stickers_per_pack {
                if available == 0 {
                    return Err(Error::CatalogExhausted);
                }
                let roll = env.prng().gen_range::<u64>(0..(available as u64));
                let id = sticker::pick(&inventory, roll).ok_or(Error::CatalogExhausted)?;

                let remaining = inventory.get(id).unwrap_or(0);
                inventory.set(id, remaining - 1);
                available -= 1;

                pack.push_back(id);
                drawn.push_back(id);
            }
            packs.push_back(pack);
        }

        set_persistent(&env, DataKey::Inventory, &inventory);
        set_persistent(&env, DataKey::StickersAvailable, &available);

        let collection = collection_client(&env);
        for pack in packs.iter() {
            let mut amounts: Vec<i128> = Vec::new(&env);
            for _ in 0..pack.len() {
                amounts.push_back(1);
            }
            collection.mint_batch(&opener, &pack, &amounts);
            PackOpened { opener: opener.clone(), stickers: pack }.publish(&env);
        }

        Ok(drawn)
    }

    // -----------------------------------------------------------------------
    // start_trade
    // -----------------------------------------------------------------------

    /// Offer one sticker in exchange for another, described by country and
    /// type plus an optional shirt number (0 accepts any number).
    ///
    /// The offered sticker moves into contract escrow immediately, so an
    /// open trade cannot be double-spent by trading or claiming with the
    /// same copy. Returns the new trade's index.
    pub fn start_trade(
        env: Env,
        owner: Address,
        offer_id: u64,
        req_country: u32,
        req_type: u32,
        req_number: u32,
    ) -> Result<u64, Error> {
        require_initialized(&env)?;
        owner.require_auth();

        if offer_id == PACK_TOKEN_ID {
            return Err(Error::CannotTradePacks);
        }

        let total_countries: u32 =
            env.storage().instance().get(&DataKey::TotalCountries).unwrap();

        // The offered id must unpack to a well-formed sticker key; escrow
        // below still guards against unheld ids.
        let (offer_country, offer_type, offer_number) = sticker::decode(offer_id);
        check_sticker_key(offer_country, offer_type, offer_number, total_countries)?;

        if req_country == 0 || req_country > total_countries {
            return Err(Error::InvalidCountry);
        }
        if req_type == 0 || req_type > TOTAL_TYPES {
            return Err(Error::InvalidType);
        }
        if req_number > MAX_NUMBER {
            return Err(Error::InvalidNumber);
        }

        // Escrow the offered sticker with this contract.
        collection_client(&env).transfer(
            &owner,
            &env.current_contract_address(),
            &offer_id,
            &1i128,
        );

        let index = get_u64(&env, DataKey::TotalTrades)
            .checked_add(1)
            .ok_or(Error::Overflow)?;
        set_persistent(&env, DataKey::TotalTrades, &index);

        let trade = TradeInfo {
            index,
            owner: owner.clone(),
            offer_id,
            req_country,
            req_type,
            req_number,
        };
        set_persistent(&env, DataKey::Trade(index), &trade);

        let mut open = get_owner_trades(&env, &owner);
        open.push_back(index);
        set_persistent(&env, DataKey::OwnerTrades(owner.clone()), &open);

        TradeStarted { index, owner, offer_id, req_country, req_type, req_number }
            .publish(&env);

        Ok(index)
    }

    // -----------------------------------------------------------------------
    // complete_trade
    // -----------------------------------------------------------------------

    /// Fill an open trade: hand over a sticker matching the request and
    /// receive the escrowed offer.
    ///
    /// `offered_number` picks the concrete sticker when the trade left the
    /// number open; when the trade pins a number, it must match. Both
    /// transfers and the record removal land in one invocation, so the
    /// exchange is atomic.
    pub fn complete_trade(
        env: Env,
        completer: Address,
        index: u64,
        offered_number: u32,
    ) -> Result<(), Error> {
        require_initialized(&env)?;
        completer.require_auth();

        let trade_key = DataKey::Trade(index);
        let trade: TradeInfo = env
            .storage()
            .persistent()
            .get(&trade_key)
            .ok_or(Error::TradeNotFound)?;

        if offered_number == 0 || offered_number > MAX_NUMBER {
            return Err(Error::InvalidNumber);
        }
        if trade.req_number != 0 && offered_number != trade.req_number {
            return Err(Error::NumberMismatch);
        }

        let requested_id = sticker::encode(trade.req_country, trade.req_type, offered_number);

        // Consume the trade before any token movement.
        env.storage().persistent().remove(&trade_key);
        remove_owner_trade(&env, &trade.owner, index);

        let collection = collection_client(&env);
        collection.transfer(&completer, &trade.owner, &requested_id, &1i128);
        collection.transfer(
            &env.current_contract_address(),
            &completer,
            &trade.offer_id,
            &1i128,
        );

        TradeCompleted {
            index,
            completer,
            received_id: trade.offer_id,
            given_id: requested_id,
        }
        .publish(&env);

        Ok(())
    }

    // -----------------------------------------------------------------------
    // cancel_trade
    // -----------------------------------------------------------------------

    /// Withdraw an open trade and recover the escrowed sticker. Only the
    /// trade's owner may cancel it.
    pub fn cancel_trade(env: Env, caller: Address, index: u64) -> Result<(), Error> {
        require_initialized(&env)?;
        caller.require_auth();

        let trade_key = DataKey::Trade(index);
        let trade: TradeInfo = env
            .storage()
            .persistent()
            .get(&trade_key)
            .ok_or(Error::TradeNotFound)?;

        if caller != trade.owner {
            return Err(Error::NotTradeOwner);
        }

        env.storage().persistent().remove(&trade_key);
        remove_owner_trade(&env, &trade.owner, index);

        collection_client(&env).transfer(
            &env.current_contract_address(),
            &trade.owner,
            &trade.offer_id,
            &1i128,
        );

        TradeCanceled { index }.publish(&env);

        Ok(())
    }

    // -----------------------------------------------------------------------
    // claim_prize
    // -----------------------------------------------------------------------

    /// Burn a complete album and collect a prize share.
    ///
    /// `numbers` supplies one shirt number per (country, type) pair in
    /// country-major, type-minor order; the pair grid is fixed by config,
    /// so only the numbers vary per claimant. Every sticker burns in one
    /// batch; a single missing sticker fails the whole claim and nothing
    /// is consumed. Each winner takes half of the current pool, except the
    /// last, who sweeps it. Burned stickers cannot back a second claim.
    pub fn claim_prize(env: Env, claimant: Address, numbers: Vec<u32>) -> Result<i128, Error> {
        require_initialized(&env)?;

        if !opening_enabled(&env) {
            return Err(Error::NotEnabled);
        }
        claimant.require_auth();

        let winners_remaining = get_u32(&env, DataKey::WinnersRemaining);
        if winners_remaining == 0 {
            return Err(Error::NoMoreWinners);
        }

        let total_countries: u32 =
            env.storage().instance().get(&DataKey::TotalCountries).unwrap();
        let album_size = total_countries
            .checked_mul(TOTAL_TYPES)
            .ok_or(Error::Overflow)?;
        if numbers.len() != album_size {
            return Err(Error::WrongStickerCount);
        }

        let mut ids: Vec<u64> = Vec::new(&env);
        let mut amounts: Vec<i128> = Vec::new(&env);
        let mut slot: u32 = 0;
        for country in 1..=total_countries {
            for type_id in 1..=TOTAL_TYPES {
                let number = numbers.get_unchecked(slot);
                if number == 0 || number > MAX_NUMBER {
                    return Err(Error::InvalidNumber);
                }
                ids.push_back(sticker::encode(country, type_id, number));
                amounts.push_back(1);
                slot += 1;
            }
        }

        // The whole album burns or nothing does.
        collection_client(&env).burn_batch(&claimant, &ids, &amounts);

        let pool = get_i128(&env, DataKey::PoolBalance);
        let prize = if winners_remaining == 1 { pool } else { pool / 2 };

        // Update all state before the external token transfer.
        let new_pool = pool.checked_sub(prize).ok_or(Error::Overflow)?;
        set_persistent(&env, DataKey::PoolBalance, &new_pool);
        let new_remaining = winners_remaining - 1;
        set_persistent(&env, DataKey::WinnersRemaining, &new_remaining);

        if prize > 0 {
            TokenClient::new(&env, &get_token(&env)).transfer(
                &env.current_contract_address(),
                &claimant,
                &prize,
            );
        }

        NewWinner { winner: claimant, stickers: ids, prize, winners_remaining: new_remaining }
            .publish(&env);

        Ok(prize)
    }

    // -----------------------------------------------------------------------
    // withdraw
    // -----------------------------------------------------------------------

    /// Pay the accumulated owner share out to the admin.
    pub fn withdraw(env: Env, admin: Address) -> Result<(), Error> {
        require_initialized(&env)?;
        require_admin(&env, &admin)?;

        let amount = get_i128(&env, DataKey::OwnerBalance);
        if amount == 0 {
            return Err(Error::NoBalance);
        }

        // Zero the balance before the external token transfer.
        set_persistent(&env, DataKey::OwnerBalance, &0i128);

        TokenClient::new(&env, &get_token(&env)).transfer(
            &env.current_contract_address(),
            &admin,
            &amount,
        );

        OwnerWithdrawal { to: admin, amount }.publish(&env);

        Ok(())
    }

    // -----------------------------------------------------------------------
    // views
    // -----------------------------------------------------------------------

    /// Deployment configuration.
    pub fn config(env: Env) -> Result<Config, Error> {
        require_initialized(&env)?;
        Ok(Config {
            admin: env.storage().instance().get(&DataKey::Admin).unwrap(),
            payment_token: env.storage().instance().get(&DataKey::Token).unwrap(),
            collection: env.storage().instance().get(&DataKey::Collection).unwrap(),
            total_packs: env.storage().instance().get(&DataKey::TotalPacks).unwrap(),
            marketing_packs: env.storage().instance().get(&DataKey::MarketingPacks).unwrap(),
            stickers_per_pack: env
                .storage()
                .instance()
                .get(&DataKey::StickersPerPack)
                .unwrap(),
            max_winners: env.storage().instance().get(&DataKey::MaxWinners).unwrap(),
            total_countries: env.storage().instance().get(&DataKey::TotalCountries).unwrap(),
        })
    }

    /// Point-in-time snapshot of the live economy.
    pub fn game_state(env: Env) -> Result<GameState, Error> {
        require_initialized(&env)?;
        Ok(GameState {
            pack_price: get_pack_price(&env),
            minted_packs: get_u32(&env, DataKey::MintedPacks),
            opening_enabled: opening_enabled(&env),
            registered_stickers: get_u32(&env, DataKey::RegisteredStickers),
            stickers_available: get_u32(&env, DataKey::StickersAvailable),
            pool_balance: get_i128(&env, DataKey::PoolBalance),
            owner_balance: get_i128(&env, DataKey::OwnerBalance),
            winners_remaining: get_u32(&env, DataKey::WinnersRemaining),
            total_trades: get_u64(&env, DataKey::TotalTrades),
        })
    }

    /// Sealed packs held by `owner`.
    pub fn pack_balance(env: Env, owner: Address) -> Result<i128, Error> {
        require_initialized(&env)?;
        Ok(collection_client(&env).balance_of(&owner, &PACK_TOKEN_ID))
    }

    /// Look up an active trade. Completed and canceled trades are removed,
    /// so their indices fail with `TradeNotFound`.
    pub fn trade_details(env: Env, index: u64) -> Result<TradeInfo, Error> {
        require_initialized(&env)?;
        env.storage()
            .persistent()
            .get(&DataKey::Trade(index))
            .ok_or(Error::TradeNotFound)
    }

    /// All of `owner`'s active trades, each carrying its index.
    pub fn owner_trades(env: Env, owner: Address) -> Result<Vec<TradeInfo>, Error> {
        require_initialized(&env)?;

        let open = get_owner_trades(&env, &owner);
        let mut trades: Vec<TradeInfo> = Vec::new(&env);
        for i in 0..open.len() {
            let trade: Option<TradeInfo> = env
                .storage()
                .persistent()
                .get(&DataKey::Trade(open.get_unchecked(i)));
            if let Some(t) = trade {
                trades.push_back(t);
            }
        }
        Ok(trades)
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

/// Require that `caller` is an account address, not a contract.
///
/// Account strkeys render as `G...`, contract strkeys as `C...`. Checking
/// the class keeps the draw in wallet hands.
fn require_human(caller: &Address) -> Result<(), Error> {
    let strkey = caller.to_string();
    if strkey.len() != STRKEY_LEN {
        return Err(Error::NotHuman);
    }
    let mut buf = [0u8; STRKEY_LEN as usize];
    strkey.copy_into_slice(&mut buf);
    if buf[0] != b'G' {
        return Err(Error::NotHuman);
    }
    Ok(())
}

fn check_sticker_key(
    country: u32,
    type_id: u32,
    number: u32,
    total_countries: u32,
) -> Result<(), Error> {
    if country == 0 || country > total_countries {
        return Err(Error::InvalidCountry);
    }
    if type_id == 0 || type_id > TOTAL_TYPES {
        return Err(Error::InvalidType);
    }
    if number == 0 || number > MAX_NUMBER {
        return Err(Error::InvalidNumber);
    }
    Ok(())
}

fn get_token(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .expect("StickerCup: token not set")
}

fn get_pack_price(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::PackPrice)
        .expect("StickerCup: pack price not set")
}

fn opening_enabled(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::OpeningEnabled)
        .unwrap_or(false)
}

fn collection_client(env: &Env) -> StickerCollectionClient<'_> {
    let collection: Address = env
        .storage()
        .instance()
        .get(&DataKey::Collection)
        .expect("StickerCup: collection not set");
    StickerCollectionClient::new(env, &collection)
}

fn get_inventory(env: &Env) -> Map<u64, u32> {
    env.storage()
        .persistent()
        .get(&DataKey::Inventory)
        .unwrap_or(Map::new(env))
}

fn get_owner_trades(env: &Env, owner: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::OwnerTrades(owner.clone()))
        .unwrap_or(Vec::new(env))
}

/// Drop `index` from an owner's active-trade list.
fn remove_owner_trade(env: &Env, owner: &Address, index: u64) {
    let mut open = get_owner_trades(env, owner);
    let mut found: Option<u32> = None;
    for i in 0..open.len() {
        if open.get_unchecked(i) == index {
            found = Some(i);
            break;
        }
    }
    if let Some(i) = found {
        open.remove(i);
        set_persistent(env, DataKey::OwnerTrades(owner.clone()), &open);
    }
}

fn get_u32(env: &Env, key: DataKey) -> u32 {
    env.storage().persistent().get(&key).unwrap_or(0)
}

fn get_u64(env: &Env, key: DataKey) -> u64 {
    env.storage().persistent().get(&key).unwrap_or(0)
}

fn get_i128(env: &Env, key: DataKey) -> i128 {
    env.storage().persistent().get(&key).unwrap_or(0)
}

/// Write a persistent entry and extend its TTL in one step.
fn set_persistent<V: IntoVal<Env, Val>>(env: &Env, key: DataKey, value: &V) {
    env.storage().persistent().set(&key, value);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
