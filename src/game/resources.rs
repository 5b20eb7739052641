//! # Resources
//!
//! The five town counters. Counters are unsigned, so a spend that would go
//! below zero is refused as a whole instead of being partially applied.

use crate::utils::scale_floor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// One of the five resource counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Coin,
    Lumber,
    Stone,
    Knowledge,
    Magic,
}

impl ResourceKind {
    /// All kinds in display order.
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Coin,
        ResourceKind::Lumber,
        ResourceKind::Stone,
        ResourceKind::Knowledge,
        ResourceKind::Magic,
    ];

    /// Lowercase name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Coin => "coin",
            ResourceKind::Lumber => "lumber",
            ResourceKind::Stone => "stone",
            ResourceKind::Knowledge => "knowledge",
            ResourceKind::Magic => "magic",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A bundle of resource amounts: a stockpile, a cost or a yield.
///
/// # Examples
///
/// ```
/// use lettervale::Resources;
///
/// let mut stock = Resources::new(10, 5, 0, 0, 0);
/// let cost = Resources::new(4, 6, 0, 0, 0);
/// assert!(stock.try_spend(&cost).is_err());
/// assert_eq!(stock, Resources::new(10, 5, 0, 0, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    pub coin: u32,
    pub lumber: u32,
    pub stone: u32,
    pub knowledge: u32,
    pub magic: u32,
}

impl Resources {
    /// Creates a bundle from the five amounts in display order.
    pub const fn new(coin: u32, lumber: u32, stone: u32, knowledge: u32, magic: u32) -> Self {
        Self {
            coin,
            lumber,
            stone,
            knowledge,
            magic,
        }
    }

    /// The empty bundle.
    pub const fn zero() -> Self {
        Self::new(0, 0, 0, 0, 0)
    }

    /// A bundle holding `amount` of a single kind.
    pub fn of(kind: ResourceKind, amount: u32) -> Self {
        let mut bundle = Self::zero();
        *bundle.get_mut(kind) = amount;
        bundle
    }

    /// Amount of one kind.
    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Coin => self.coin,
            ResourceKind::Lumber => self.lumber,
            ResourceKind::Stone => self.stone,
            ResourceKind::Knowledge => self.knowledge,
            ResourceKind::Magic => self.magic,
        }
    }

    fn get_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Coin => &mut self.coin,
            ResourceKind::Lumber => &mut self.lumber,
            ResourceKind::Stone => &mut self.stone,
            ResourceKind::Knowledge => &mut self.knowledge,
            ResourceKind::Magic => &mut self.magic,
        }
    }

    /// Applies `f` to every component.
    pub fn map(&self, mut f: impl FnMut(u32) -> u32) -> Self {
        Self::new(
            f(self.coin),
            f(self.lumber),
            f(self.stone),
            f(self.knowledge),
            f(self.magic),
        )
    }

    /// True if every component is zero.
    pub fn is_zero(&self) -> bool {
        ResourceKind::ALL.iter().all(|&kind| self.get(kind) == 0)
    }

    /// Total of all components.
    pub fn total(&self) -> u64 {
        ResourceKind::ALL
            .iter()
            .map(|&kind| u64::from(self.get(kind)))
            .sum()
    }

    /// Component-wise sum, saturating at `u32::MAX`.
    pub fn deposit(&mut self, other: &Resources) {
        for kind in ResourceKind::ALL {
            let slot = self.get_mut(kind);
            *slot = slot.saturating_add(other.get(kind));
        }
    }

    /// What is still missing to pay `cost`; zero when affordable.
    pub fn shortfall(&self, cost: &Resources) -> Resources {
        let mut missing = Resources::zero();
        for kind in ResourceKind::ALL {
            *missing.get_mut(kind) = cost.get(kind).saturating_sub(self.get(kind));
        }
        missing
    }

    /// True if `cost` can be paid in full.
    pub fn can_afford(&self, cost: &Resources) -> bool {
        self.shortfall(cost).is_zero()
    }

    /// Deducts `cost` in full, or leaves the bundle untouched and returns the
    /// shortfall.
    pub fn try_spend(&mut self, cost: &Resources) -> Result<(), Resources> {
        let missing = self.shortfall(cost);
        if !missing.is_zero() {
            return Err(missing);
        }
        for kind in ResourceKind::ALL {
            *self.get_mut(kind) -= cost.get(kind);
        }
        Ok(())
    }

    /// Deducts as much of `cost` as is available, clamping each counter at zero.
    ///
    /// Returns what was actually paid.
    pub fn drain(&mut self, cost: &Resources) -> Resources {
        let mut paid = Resources::zero();
        for kind in ResourceKind::ALL {
            let slot = self.get_mut(kind);
            let taken = (*slot).min(cost.get(kind));
            *slot -= taken;
            *paid.get_mut(kind) = taken;
        }
        paid
    }

    /// Every component multiplied by `factor`.
    pub fn scaled(&self, factor: u32) -> Resources {
        self.map(|value| value.saturating_mul(factor))
    }

    /// Every component scaled to `percent` percent, floored.
    pub fn percent(&self, percent: u32) -> Resources {
        self.map(|value| scale_floor(value, percent, 100))
    }
}

impl Add for Resources {
    type Output = Resources;

    fn add(mut self, other: Resources) -> Resources {
        self.deposit(&other);
        self
    }
}

impl AddAssign for Resources {
    fn add_assign(&mut self, other: Resources) {
        self.deposit(&other);
    }
}

impl fmt::Display for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = ResourceKind::ALL
            .iter()
            .filter(|&&kind| self.get(kind) > 0)
            .map(|&kind| format!("{} {}", self.get(kind), kind))
            .collect();
        if parts.is_empty() {
            f.write_str("nothing")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}
