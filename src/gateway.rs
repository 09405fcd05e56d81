//! Contract gateway — the single point of contact with the group wallet
//! contract.
//!
//! Aggregates the three read queries into a [`ContractSnapshot`] held in an
//! explicitly-invalidated cache, and wraps the two write operations with
//! fail-fast amount validation. Writes never reach the provider unless the
//! amount string converts cleanly.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::amount::{self, AmountError};
use crate::contract_client::{ClientError, ContractClient, TxStatus};

/// One coherent view of the contract's read state.
///
/// Replaced wholesale on every refetch; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSnapshot {
    /// Contract balance in base units.
    pub balance: u128,
    /// Whether the connected account is a member. False when no account
    /// is connected or membership is unknown.
    pub is_member: bool,
    /// Contract owner, if set.
    pub owner: Option<String>,
}

/// Cached snapshot with explicit invalidation. Refreshing goes through the
/// gateway; there is no implicit reactivity.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    current: Option<ContractSnapshot>,
}

impl SnapshotCache {
    pub fn get(&self) -> Option<&ContractSnapshot> {
        self.current.as_ref()
    }

    pub fn invalidate(&mut self) {
        log::debug!("snapshot cache invalidated");
        self.current = None;
    }

    fn store(&mut self, snapshot: ContractSnapshot) {
        self.current = Some(snapshot);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid amount: {0}")]
    Amount(#[from] AmountError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("no wallet account connected")]
    NotConnected,

    #[error("provider has no accounts")]
    NoAccounts,
}

/// Clears the advisory in-flight flag on both success and failure paths.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Relaxed);
        Self(flag)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

pub struct ContractGateway {
    client: ContractClient,
    account: Option<String>,
    cache: SnapshotCache,
    in_flight: AtomicBool,
}

impl ContractGateway {
    pub fn new(client: ContractClient, account: Option<String>) -> Self {
        Self {
            client,
            account,
            cache: SnapshotCache::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    /// Advisory only: true while a write submission is awaiting the
    /// provider. Nothing prevents a second submission; the last one wins.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Relaxed)
    }

    pub fn cached(&self) -> Option<&ContractSnapshot> {
        self.cache.get()
    }

    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// Ask the provider for its accounts and connect the first one.
    pub async fn connect(&mut self) -> Result<String, GatewayError> {
        let accounts = self.client.accounts().await?;
        let address = accounts.into_iter().next().ok_or(GatewayError::NoAccounts)?;
        self.account = Some(address.clone());
        Ok(address)
    }

    /// Read balance, owner, and membership, and replace the cached snapshot
    /// wholesale. Membership is only queried when an account is connected;
    /// otherwise it defaults to false.
    pub async fn refresh_snapshot(&mut self) -> Result<ContractSnapshot, GatewayError> {
        let balance = self.client.get_balance().await?;
        let owner = self.client.owner().await?;
        let is_member = match self.account.as_deref() {
            Some(address) => self.client.is_member(address).await?,
            None => false,
        };

        let snapshot = ContractSnapshot {
            balance,
            is_member,
            owner,
        };
        self.cache.store(snapshot.clone());
        Ok(snapshot)
    }

    /// Submit a value-carrying deposit.
    ///
    /// The amount is validated and converted before any provider call;
    /// a malformed or empty amount never reaches the network.
    pub async fn deposit(&self, raw_amount: &str) -> Result<String, GatewayError> {
        let value = amount::parse_units(raw_amount)?;
        let from = self.account.as_deref().ok_or(GatewayError::NotConnected)?;

        let _guard = InFlightGuard::acquire(&self.in_flight);
        let txid = self.client.deposit(from, value).await.map_err(|e| {
            log::error!("deposit failed: {}", e);
            e
        })?;
        Ok(txid)
    }

    /// Submit a withdrawal. Same contract as [`Self::deposit`], but the
    /// base-unit amount is a call argument rather than attached value.
    pub async fn withdraw(&self, raw_amount: &str) -> Result<String, GatewayError> {
        let value = amount::parse_units(raw_amount)?;
        let from = self.account.as_deref().ok_or(GatewayError::NotConnected)?;

        let _guard = InFlightGuard::acquire(&self.in_flight);
        let txid = self.client.withdraw(from, value).await.map_err(|e| {
            log::error!("withdraw failed: {}", e);
            e
        })?;
        Ok(txid)
    }

    /// Query the status of a submitted transaction. `None` while pending.
    pub async fn transaction_status(&self, txid: &str) -> Result<Option<TxStatus>, GatewayError> {
        Ok(self.client.transaction_status(txid).await?)
    }
}
