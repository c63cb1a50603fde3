// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger owns every collection the application works with:
//! transactions, categories, profiles and fixed items. All changes go
//! through the operations below; each successful one bumps the revision so
//! derived views know to recompute.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Category, DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES, DEFAULT_PROFILE, FixedItem,
    MAX_AMOUNT, NewFixedItem, NewTransaction, OrphanPolicy, PROFILE_COLORS, Profile, Transaction,
    TxType, UNCATEGORIZED_LABEL, UNKNOWN_PROFILE_LABEL,
};

#[derive(Debug, Clone)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    profiles: Vec<Profile>,
    fixed_items: Vec<FixedItem>,
    policy: OrphanPolicy,
    revision: u64,
}

fn next_id<T>(items: &[T], id: impl Fn(&T) -> i64) -> i64 {
    items.iter().map(id).max().unwrap_or(0) + 1
}

fn check_amount(amount: u64) -> LedgerResult<()> {
    if amount == 0 || amount > MAX_AMOUNT {
        return Err(LedgerError::InvalidAmount(amount.to_string()));
    }
    Ok(())
}

fn clean_name(name: &str) -> LedgerResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::EmptyName);
    }
    Ok(trimmed.to_string())
}

impl Default for Ledger {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Ledger {
    /// A ledger seeded with the stock categories and a single profile.
    pub fn with_defaults() -> Self {
        let mut categories = Vec::new();
        let stock = DEFAULT_INCOME_CATEGORIES
            .iter()
            .map(|n| (n, TxType::Income))
            .chain(
                DEFAULT_EXPENSE_CATEGORIES
                    .iter()
                    .map(|n| (n, TxType::Expense)),
            );
        for (i, (name, tx_type)) in stock.enumerate() {
            categories.push(Category {
                id: i as i64 + 1,
                name: name.to_string(),
                tx_type,
                is_default: true,
            });
        }
        Self {
            transactions: Vec::new(),
            categories,
            profiles: vec![Profile {
                id: 1,
                name: DEFAULT_PROFILE.to_string(),
                image: None,
                color: PROFILE_COLORS[0].to_string(),
            }],
            fixed_items: Vec::new(),
            policy: OrphanPolicy::default(),
            revision: 0,
        }
    }

    /// Assembles a ledger from stored collections. An empty profile list is
    /// topped up with the default profile so the ledger is never without one.
    pub fn from_parts(
        transactions: Vec<Transaction>,
        categories: Vec<Category>,
        mut profiles: Vec<Profile>,
        fixed_items: Vec<FixedItem>,
        policy: OrphanPolicy,
    ) -> Self {
        if profiles.is_empty() {
            tracing::warn!("no profiles stored, restoring the default profile");
            profiles.push(Profile {
                id: 1,
                name: DEFAULT_PROFILE.to_string(),
                image: None,
                color: PROFILE_COLORS[0].to_string(),
            });
        }
        Self {
            transactions,
            categories,
            profiles,
            fixed_items,
            policy,
            revision: 0,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    pub fn orphan_policy(&self) -> OrphanPolicy {
        self.policy
    }

    pub fn set_orphan_policy(&mut self, policy: OrphanPolicy) {
        if self.policy != policy {
            info!(%policy, "orphan policy changed");
            self.policy = policy;
            self.touch();
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn fixed_items(&self) -> &[FixedItem] {
        &self.fixed_items
    }

    // ---- transactions -------------------------------------------------

    pub fn transaction(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn transactions_on(&self, date: NaiveDate) -> Vec<&Transaction> {
        self.transactions.iter().filter(|t| t.date == date).collect()
    }

    pub fn add_transaction(&mut self, tx: NewTransaction) -> LedgerResult<&Transaction> {
        check_amount(tx.amount)?;
        let id = next_id(&self.transactions, |t| t.id);
        info!(id, amount = tx.amount, date = %tx.date, tx_type = %tx.tx_type, "transaction added");
        self.transactions.push(tx.into_transaction(id));
        self.touch();
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// Replaces every field of an existing transaction, keeping its id.
    pub fn replace_transaction(&mut self, id: i64, tx: NewTransaction) -> LedgerResult<()> {
        check_amount(tx.amount)?;
        let slot = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(LedgerError::UnknownTransaction(id))?;
        *slot = tx.into_transaction(id);
        info!(id, "transaction replaced");
        self.touch();
        Ok(())
    }

    pub fn delete_transaction(&mut self, id: i64) -> LedgerResult<Transaction> {
        let pos = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or(LedgerError::UnknownTransaction(id))?;
        let removed = self.transactions.remove(pos);
        info!(id, "transaction deleted");
        self.touch();
        Ok(removed)
    }

    // ---- categories ---------------------------------------------------

    pub fn category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn categories_of(&self, tx_type: TxType) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.tx_type == tx_type)
            .collect()
    }

    /// Display name for a category reference, tolerating dangling ids.
    pub fn category_name(&self, id: Option<i64>) -> &str {
        id.and_then(|id| self.category(id))
            .map(|c| c.name.as_str())
            .unwrap_or(UNCATEGORIZED_LABEL)
    }

    pub fn add_category(&mut self, name: &str, tx_type: TxType) -> LedgerResult<i64> {
        let name = clean_name(name)?;
        let id = next_id(&self.categories, |c| c.id);
        info!(id, %name, %tx_type, "category added");
        self.categories.push(Category {
            id,
            name,
            tx_type,
            is_default: false,
        });
        self.touch();
        Ok(id)
    }

    pub fn rename_category(&mut self, id: i64, name: &str) -> LedgerResult<()> {
        let name = clean_name(name)?;
        let cat = self
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(LedgerError::UnknownCategory(id))?;
        cat.name = name;
        self.touch();
        Ok(())
    }

    fn category_refs(&self, id: i64) -> usize {
        let tx = self
            .transactions
            .iter()
            .filter(|t| t.category_id == Some(id))
            .count();
        let fixed = self
            .fixed_items
            .iter()
            .filter(|f| f.category_id == Some(id))
            .count();
        tx + fixed
    }

    pub fn delete_category(&mut self, id: i64) -> LedgerResult<Category> {
        let pos = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(LedgerError::UnknownCategory(id))?;
        if self.categories[pos].is_default {
            return Err(LedgerError::DefaultCategory(id));
        }
        let refs = self.category_refs(id);
        match self.policy {
            OrphanPolicy::Forbid if refs > 0 => {
                return Err(LedgerError::InUse { count: refs });
            }
            OrphanPolicy::Detach => {
                for t in self.transactions.iter_mut().filter(|t| t.category_id == Some(id)) {
                    t.category_id = None;
                }
                for f in self.fixed_items.iter_mut().filter(|f| f.category_id == Some(id)) {
                    f.category_id = None;
                }
            }
            _ => {}
        }
        let removed = self.categories.remove(pos);
        info!(id, refs, policy = %self.policy, "category deleted");
        self.touch();
        Ok(removed)
    }

    // ---- profiles -----------------------------------------------------

    pub fn profile(&self, id: i64) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn profile_name(&self, id: Option<i64>) -> &str {
        id.and_then(|id| self.profile(id))
            .map(|p| p.name.as_str())
            .unwrap_or(UNKNOWN_PROFILE_LABEL)
    }

    pub fn add_profile(&mut self, name: &str) -> LedgerResult<i64> {
        let name = clean_name(name)?;
        let id = next_id(&self.profiles, |p| p.id);
        let color = PROFILE_COLORS[self.profiles.len() % PROFILE_COLORS.len()].to_string();
        info!(id, %name, %color, "profile added");
        self.profiles.push(Profile {
            id,
            name,
            image: None,
            color,
        });
        self.touch();
        Ok(id)
    }

    pub fn rename_profile(&mut self, id: i64, name: &str) -> LedgerResult<()> {
        let name = clean_name(name)?;
        let profile = self
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(LedgerError::UnknownProfile(id))?;
        profile.name = name;
        self.touch();
        Ok(())
    }

    pub fn set_profile_image(&mut self, id: i64, image: Option<String>) -> LedgerResult<()> {
        let profile = self
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(LedgerError::UnknownProfile(id))?;
        debug!(id, bytes = image.as_ref().map(|s| s.len()), "profile image set");
        profile.image = image;
        self.touch();
        Ok(())
    }

    fn profile_refs(&self, id: i64) -> usize {
        let tx = self
            .transactions
            .iter()
            .filter(|t| t.profile_id == Some(id))
            .count();
        let fixed = self
            .fixed_items
            .iter()
            .filter(|f| f.profile_id == Some(id))
            .count();
        tx + fixed
    }

    pub fn delete_profile(&mut self, id: i64) -> LedgerResult<Profile> {
        let pos = self
            .profiles
            .iter()
            .position(|p| p.id == id)
            .ok_or(LedgerError::UnknownProfile(id))?;
        if self.profiles.len() <= 1 {
            return Err(LedgerError::LastProfile);
        }
        let refs = self.profile_refs(id);
        match self.policy {
            OrphanPolicy::Forbid if refs > 0 => {
                return Err(LedgerError::InUse { count: refs });
            }
            OrphanPolicy::Detach => {
                for t in self.transactions.iter_mut().filter(|t| t.profile_id == Some(id)) {
                    t.profile_id = None;
                }
                for f in self.fixed_items.iter_mut().filter(|f| f.profile_id == Some(id)) {
                    f.profile_id = None;
                }
            }
            _ => {}
        }
        let removed = self.profiles.remove(pos);
        info!(id, refs, policy = %self.policy, "profile deleted");
        self.touch();
        Ok(removed)
    }

    // ---- fixed items --------------------------------------------------

    pub fn fixed_item(&self, id: i64) -> Option<&FixedItem> {
        self.fixed_items.iter().find(|f| f.id == id)
    }

    pub fn add_fixed_item(&mut self, item: NewFixedItem) -> LedgerResult<i64> {
        check_amount(item.amount)?;
        let id = next_id(&self.fixed_items, |f| f.id);
        info!(id, amount = item.amount, day = %item.day, "fixed item added");
        self.fixed_items.push(item.into_fixed_item(id));
        self.touch();
        Ok(id)
    }

    pub fn update_fixed_item(&mut self, id: i64, item: NewFixedItem) -> LedgerResult<()> {
        check_amount(item.amount)?;
        let slot = self
            .fixed_items
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(LedgerError::UnknownFixedItem(id))?;
        *slot = item.into_fixed_item(id);
        self.touch();
        Ok(())
    }

    pub fn delete_fixed_item(&mut self, id: i64) -> LedgerResult<FixedItem> {
        let pos = self
            .fixed_items
            .iter()
            .position(|f| f.id == id)
            .ok_or(LedgerError::UnknownFixedItem(id))?;
        let removed = self.fixed_items.remove(pos);
        info!(id, "fixed item deleted");
        self.touch();
        Ok(removed)
    }

    /// Sum of fixed items of one type.
    pub fn fixed_total(&self, tx_type: TxType) -> u64 {
        self.fixed_items
            .iter()
            .filter(|f| f.tx_type == tx_type)
            .fold(0, |acc, f| acc.saturating_add(f.amount))
    }
}
