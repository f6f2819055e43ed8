//! # Ownership
//!
//! A single privileged principal gates every administrative operation.
//! Ownership can be handed over to another non-null account or renounced,
//! after which no one can administer the token again.

use serde::{Deserialize, Serialize};
use tollgate_protocol::{AccessControl, Address, Event, LedgerError};

/// Holder of the administrative privilege.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ownership {
    owner: Address,
}

impl Ownership {
    /// Installs `owner`. Returns the ownership record and the
    /// `OwnershipTransferred` event from the null identity.
    pub fn new(owner: Address) -> Result<(Self, Event), LedgerError> {
        if owner.is_zero() {
            return Err(LedgerError::InvalidOwner(owner));
        }
        let event = Event::OwnershipTransferred {
            old: Address::ZERO,
            new: owner,
        };
        Ok((Self { owner }, event))
    }

    /// Hands ownership to `new_owner`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] unless `caller` is the owner.
    /// - [`LedgerError::InvalidOwner`] for the null identity; use
    ///   [`renounce`](Self::renounce) to give ownership up.
    pub fn transfer(&mut self, caller: &Address, new_owner: Address) -> Result<Event, LedgerError> {
        self.ensure_owner(caller)?;
        if new_owner.is_zero() {
            return Err(LedgerError::InvalidOwner(new_owner));
        }
        let old = std::mem::replace(&mut self.owner, new_owner);
        Ok(Event::OwnershipTransferred {
            old,
            new: new_owner,
        })
    }

    /// Gives ownership up for good.
    pub fn renounce(&mut self, caller: &Address) -> Result<Event, LedgerError> {
        self.ensure_owner(caller)?;
        let old = std::mem::replace(&mut self.owner, Address::ZERO);
        Ok(Event::OwnershipTransferred {
            old,
            new: Address::ZERO,
        })
    }
}

impl AccessControl for Ownership {
    fn owner(&self) -> Address {
        self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Address {
        Address::from_low_u64(1)
    }

    fn stranger() -> Address {
        Address::from_low_u64(2)
    }

    #[test]
    fn null_owner_rejected() {
        assert!(Ownership::new(Address::ZERO).is_err());
    }

    #[test]
    fn transfer_moves_privilege() {
        let (mut ownership, _) = Ownership::new(owner()).unwrap();
        let event = ownership.transfer(&owner(), stranger()).unwrap();
        assert_eq!(
            event,
            Event::OwnershipTransferred {
                old: owner(),
                new: stranger()
            }
        );
        assert!(ownership.ensure_owner(&stranger()).is_ok());
        assert!(ownership.ensure_owner(&owner()).is_err());
    }

    #[test]
    fn stranger_cannot_transfer() {
        let (mut ownership, _) = Ownership::new(owner()).unwrap();
        assert_eq!(
            ownership.transfer(&stranger(), stranger()).unwrap_err(),
            LedgerError::Unauthorized { caller: stranger() }
        );
        assert_eq!(ownership.owner(), owner());
    }

    #[test]
    fn transfer_to_null_rejected() {
        let (mut ownership, _) = Ownership::new(owner()).unwrap();
        assert!(matches!(
            ownership.transfer(&owner(), Address::ZERO),
            Err(LedgerError::InvalidOwner(_))
        ));
    }

    #[test]
    fn renounce_locks_everyone_out() {
        let (mut ownership, _) = Ownership::new(owner()).unwrap();
        ownership.renounce(&owner()).unwrap();
        assert_eq!(ownership.owner(), Address::ZERO);
        assert!(ownership.ensure_owner(&owner()).is_err());
        assert!(ownership.renounce(&owner()).is_err());
    }
}
